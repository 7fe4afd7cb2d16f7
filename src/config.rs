use std::path::PathBuf;

use regex::Regex;

/// Cases run when none are named on the command line.
pub const DEFAULT_CASES: [&str; 3] = ["ArrayTest", "ExpressionLessSquare", "Square"];

pub const DEFAULT_BUILD_TOOL: &str = "cargo";
pub const DEFAULT_DIFF_TOOL: &str = "diff";

/// Everything a run needs to know up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Case names are resolved against this directory, and the build tool
    /// runs from it.
    pub root: PathBuf,
    /// Processed in order.
    pub cases: Vec<String>,
    pub build_tool: String,
    pub diff_tool: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            cases: DEFAULT_CASES.iter().map(|s| s.to_string()).collect(),
            build_tool: DEFAULT_BUILD_TOOL.to_string(),
            diff_tool: DEFAULT_DIFF_TOOL.to_string(),
        }
    }
}

impl RunConfig {
    /// Drops every case whose name `filter` does not match, keeping order.
    pub fn retain_matching(&mut self, filter: &Regex) {
        self.cases.retain(|case| filter.is_match(case));
    }
}
