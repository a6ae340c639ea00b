//! Library entry for the APT proxy editor exposing core logic for integration tests.

pub mod args;
pub mod proxy;
pub mod settings;
pub mod util;
