//! Test harness for CLI integration tests.
//!
//! Provides isolated vaults, programmatic note creation,
//! and CLI assertion helpers using `assert_cmd`.

mod command;
mod env;
mod note;

// Re-export main types for external use
#[allow(unused_imports)]
pub use command::ExportCommand;
#[allow(unused_imports)]
pub use env::TestVault;
#[allow(unused_imports)]
pub use note::TestNote;
