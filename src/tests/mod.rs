//! Crate-level tests
//!
//! - `common`: shared document fixtures
//! - `mocks`: scripted search backends
//! - `unit`: pipeline behaviour per category
//! - `property`: proptest invariants for description handling

mod mocks;
