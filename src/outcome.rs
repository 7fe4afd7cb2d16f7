use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result of comparing one artifact with its expected file.
///
/// `Display` renders the status line printed for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Match { artifact: String, expected: String },
    Mismatch { artifact: String, expected: String },
    /// No diff was run.
    ExpectedMissing { artifact: String, expected: String },
    /// The diff tool could not be started or was killed.
    CompareFailed {
        artifact: String,
        expected: String,
        reason: String,
    },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Match { artifact, expected } => {
                write!(f, "✅ {artifact} and {expected} are the same")
            }
            Outcome::Mismatch { artifact, expected } => {
                write!(f, "❌ {artifact} and {expected} differ")
            }
            Outcome::ExpectedMissing { expected, .. } => {
                write!(f, "⚠️  Missing file: {expected}")
            }
            Outcome::CompareFailed {
                artifact,
                expected,
                reason,
            } => write!(f, "❌ Could not compare {artifact} and {expected}: {reason}"),
        }
    }
}

/// Why a whole case was skipped.
///
/// `Display` is the status line; the cause is left to `source()`.
#[derive(Debug, Error)]
pub enum CaseError {
    #[error("❌ {tool} run failed in {case}")]
    BuildFailed {
        tool: String,
        case: String,
        #[source]
        source: BuildFailure,
    },
    #[error("❌ Failed to enter directory {case}")]
    DirectoryMissing {
        case: String,
        path: PathBuf,
        #[source]
        source: Option<io::Error>,
    },
}

#[derive(Debug, Error)]
pub enum BuildFailure {
    #[error("exit code {0}")]
    Exit(i32),
    #[error("terminated by signal")]
    Signal,
    #[error("could not start: {0}")]
    Spawn(#[from] io::Error),
}

/// Tally over a whole run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub matched: usize,
    pub mismatched: usize,
    pub expected_missing: usize,
    pub compare_failed: usize,
    pub build_failed: usize,
    pub directory_missing: usize,
}

impl Summary {
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Match { .. } => self.matched += 1,
            Outcome::Mismatch { .. } => self.mismatched += 1,
            Outcome::ExpectedMissing { .. } => self.expected_missing += 1,
            Outcome::CompareFailed { .. } => self.compare_failed += 1,
        }
    }

    pub fn record_skip(&mut self, err: &CaseError) {
        match err {
            CaseError::BuildFailed { .. } => self.build_failed += 1,
            CaseError::DirectoryMissing { .. } => self.directory_missing += 1,
        }
    }

    pub fn merge(&mut self, other: Summary) {
        self.matched += other.matched;
        self.mismatched += other.mismatched;
        self.expected_missing += other.expected_missing;
        self.compare_failed += other.compare_failed;
        self.build_failed += other.build_failed;
        self.directory_missing += other.directory_missing;
    }

    pub fn failures(&self) -> usize {
        self.mismatched
            + self.expected_missing
            + self.compare_failed
            + self.build_failed
            + self.directory_missing
    }

    pub fn total(&self) -> usize {
        self.matched + self.failures()
    }

    pub fn all_passed(&self) -> bool {
        self.failures() == 0
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} same, {} differ, {} missing, {} not compared, {} build failures, {} missing directories",
            self.matched,
            self.mismatched,
            self.expected_missing,
            self.compare_failed,
            self.build_failed,
            self.directory_missing
        )
    }
}
