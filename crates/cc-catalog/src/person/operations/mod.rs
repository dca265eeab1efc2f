//! Person operations.

pub mod create;

pub use create::{CreatePerson, CreatePersonCommand, PositionPayload, UrlsPayload};
