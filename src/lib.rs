pub mod app;
pub mod core;
pub mod harness;

pub use harness::api::test_all;
