//! Built-in Test Cases
//!
//! Cases that ship with the binary and register themselves with
//! `builtin_case!`.

pub mod api;
pub mod environment;
pub mod selfcheck;
