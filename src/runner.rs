use std::ffi::{OsStr, OsString};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::artifact::{expected_name, list_artifacts};
use crate::config::RunConfig;
use crate::outcome::{BuildFailure, CaseError, Outcome, Summary};
use crate::process::ProcessRunner;

/// Builds each configured case and diffs its tokenizer output.
///
/// Never changes the process working directory: every path handed to the
/// build and diff tools is derived from [`RunConfig::root`].
pub struct TestRunner<P> {
    config: RunConfig,
    process: P,
}

impl<P: ProcessRunner> TestRunner<P> {
    pub fn new(config: RunConfig, process: P) -> Self {
        Self { config, process }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    #[cfg(test)]
    pub(crate) fn into_process(self) -> P {
        self.process
    }

    /// Runs every configured case in order. A failing case is reported and
    /// skipped; only a failed write to `out` aborts the run.
    pub fn run_all<W: Write>(&mut self, out: &mut W) -> Result<Summary> {
        let mut summary = Summary::default();
        let cases = self.config.cases.clone();
        for case in &cases {
            summary.merge(self.run_case(case, out)?);
        }
        info!(%summary, "run finished");
        Ok(summary)
    }

    pub fn run_case<W: Write>(&mut self, case: &str, out: &mut W) -> Result<Summary> {
        info!(case, "starting case");
        writeln!(out, "{case}:")?;

        let mut summary = Summary::default();
        let dir = match self
            .run_build(case)
            .and_then(|()| self.case_directory(case))
        {
            Ok(dir) => dir,
            Err(err) => {
                skip_case(&err, &mut summary, out)?;
                return Ok(summary);
            }
        };

        let artifacts = match list_artifacts(&dir) {
            Ok(artifacts) => artifacts,
            Err(source) => {
                let err = CaseError::DirectoryMissing {
                    case: case.to_string(),
                    path: dir,
                    source: Some(source),
                };
                skip_case(&err, &mut summary, out)?;
                return Ok(summary);
            }
        };

        summary.merge(self.compare_artifacts(&dir, &artifacts, out)?);
        Ok(summary)
    }

    /// Compares the artifacts already present in `dir` without building.
    pub fn check_directory<W: Write>(&mut self, dir: &Path, out: &mut W) -> Result<Summary> {
        let artifacts = list_artifacts(dir)
            .with_context(|| format!("failed to read directory {}", dir.display()))?;
        self.compare_artifacts(dir, &artifacts, out)
    }

    /// `<build-tool> run -- <case>`, run from the configured root.
    pub fn run_build(&mut self, case: &str) -> Result<(), CaseError> {
        let args: Vec<OsString> = vec!["run".into(), "--".into(), case.into()];
        let status = self
            .process
            .run(&self.config.build_tool, &args, Some(self.config.root.as_path()));

        let source = match status {
            Ok(Some(0)) => return Ok(()),
            Ok(Some(code)) => BuildFailure::Exit(code),
            Ok(None) => BuildFailure::Signal,
            Err(err) => BuildFailure::Spawn(err),
        };
        Err(CaseError::BuildFailed {
            tool: self.config.build_tool.clone(),
            case: case.to_string(),
            source,
        })
    }

    /// Resolves the directory of `case`, which must already exist.
    pub fn case_directory(&self, case: &str) -> Result<PathBuf, CaseError> {
        let path = self.config.root.join(case);
        if path.is_dir() {
            Ok(path)
        } else {
            Err(CaseError::DirectoryMissing {
                case: case.to_string(),
                path,
                source: None,
            })
        }
    }

    /// Diffs `dir/<artifact>` against its expected file. The diff tool is
    /// not invoked when the expected file is absent.
    pub fn compare(&mut self, dir: &Path, artifact: &OsStr) -> Outcome {
        let expected_file = expected_name(artifact);
        let expected_path = dir.join(&expected_file);
        let expected = expected_file.to_string_lossy().into_owned();
        let artifact_path = dir.join(artifact);
        let artifact = artifact.to_string_lossy().into_owned();
        if !expected_path.is_file() {
            return Outcome::ExpectedMissing { artifact, expected };
        }

        let args: Vec<OsString> = vec![
            "-q".into(),
            "--strip-trailing-cr".into(),
            expected_path.into_os_string(),
            artifact_path.into_os_string(),
        ];
        match self.process.run(&self.config.diff_tool, &args, None) {
            Ok(Some(0)) => Outcome::Match { artifact, expected },
            Ok(Some(_)) => Outcome::Mismatch { artifact, expected },
            Ok(None) => Outcome::CompareFailed {
                artifact,
                expected,
                reason: format!("{} terminated by signal", self.config.diff_tool),
            },
            Err(err) => Outcome::CompareFailed {
                artifact,
                expected,
                reason: format!("failed to run {}: {err}", self.config.diff_tool),
            },
        }
    }

    fn compare_artifacts<W: Write>(
        &mut self,
        dir: &Path,
        artifacts: &[OsString],
        out: &mut W,
    ) -> Result<Summary> {
        let mut summary = Summary::default();
        for artifact in artifacts {
            let outcome = self.compare(dir, artifact);
            writeln!(out, "{outcome}")?;
            summary.record(&outcome);
        }
        Ok(summary)
    }
}

fn skip_case<W: Write>(err: &CaseError, summary: &mut Summary, out: &mut W) -> Result<()> {
    match err {
        CaseError::BuildFailed { case, source, .. } => {
            warn!(case, %source, "build failed");
        }
        CaseError::DirectoryMissing {
            case,
            path,
            source: Some(source),
        } => {
            warn!(case, path = %path.display(), %source, "cannot list case directory");
        }
        CaseError::DirectoryMissing { case, path, .. } => {
            warn!(case, path = %path.display(), "case directory not found");
        }
    }
    writeln!(out, "{err}")?;
    summary.record_skip(err);
    Ok(())
}
