//! Test modules for the harness
//!
//! Collection and execution tests over in-memory registries built from the
//! mock cases in `utils`.

mod utils;
