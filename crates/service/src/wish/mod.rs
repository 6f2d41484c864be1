//! Wish module: repository abstraction, backends and the store service.

pub mod repository;
pub mod repo;
pub mod service;

pub use models::wish::{Model as Wish, UpsertOutcome};
pub use service::WishStore;
