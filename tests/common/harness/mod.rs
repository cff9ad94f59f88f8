//! Test harness for CLI integration tests.
//!
//! Provides isolated data directories, programmatic record seeding,
//! and CLI assertion helpers using `assert_cmd`.

mod command;
mod env;
mod record;

// Re-export main types for external use
#[allow(unused_imports)]
pub use command::ClassnotesCommand;
#[allow(unused_imports)]
pub use env::TestEnv;
#[allow(unused_imports)]
pub use record::TestRecord;
