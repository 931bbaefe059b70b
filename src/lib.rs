// Library root: the bootstrap pipeline used by the `envboot` binary.
// The binary entry point is src/main.rs; tests/ drives the built binary.

pub mod bootstrap;
pub mod config;
pub mod env_file;
pub mod error;
pub mod keypair;
pub mod logger;
pub mod report;
pub mod template;
pub mod verify;
