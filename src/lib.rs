//! Build-and-diff checker for Jack tokenizer output.
//!
//! Each test case is a directory. The runner builds it with an external
//! tool, then compares every `<base>.tokens.xml` it finds against the
//! checked-in `<base>T.xml` with an external diff, printing one status line
//! per file.

pub mod artifact;
pub mod config;
pub mod outcome;
pub mod process;
pub mod runner;

pub use config::RunConfig;
pub use outcome::{BuildFailure, CaseError, Outcome, Summary};
pub use process::{ProcessRunner, SystemRunner};
pub use runner::TestRunner;
