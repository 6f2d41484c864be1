pub mod routes;
pub mod startup;
pub mod errors;

pub use startup::{invoke, invoke_with, run, Backend};
