//! Logging setup shared by Aula binaries
//!
//! Library crates only emit `tracing` events; installing a subscriber is
//! left to the binary through [`init::init_tracing`].

#[cfg(not(target_arch = "wasm32"))]
pub mod config;
#[cfg(not(target_arch = "wasm32"))]
pub mod init;

#[cfg(not(target_arch = "wasm32"))]
pub use config::{InstrumentationConfig, LogFileConfig};
#[cfg(not(target_arch = "wasm32"))]
pub use init::init_tracing;
