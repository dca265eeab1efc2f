//! Person aggregate: people appearing in the catalog, with their position,
//! published works, and social networks.

pub mod api;
pub mod entity;
pub mod operations;
pub mod repository;
