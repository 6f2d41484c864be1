//! Service layer for wishes.
//! - `WishRepository` abstracts storage; SeaORM and in-memory backends implement it.
//! - `WishStore` carries the list/exists/upsert rules on top of a repository.

pub mod errors;
pub mod wish;
#[cfg(test)]
pub mod test_support;

pub use wish::WishStore;
