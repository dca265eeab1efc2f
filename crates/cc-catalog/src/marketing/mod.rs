//! Marketing site integration.
//!
//! The marketing site is an external CMS that receives a publishable "node"
//! per person. Access goes through the [`MarketingPublisher`] seam so the
//! create flow can be exercised without the real site.

pub mod people;

pub use people::{MarketingPublisher, MarketingSitePeople, MarketingError, NodeRef};

#[cfg(test)]
pub use people::MockMarketingSite;
