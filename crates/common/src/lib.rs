//! Process-wide helpers shared by the wishes binaries.

pub mod utils;
