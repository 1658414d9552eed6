//! Harness Integration Test Modules

pub mod custom_cases;
