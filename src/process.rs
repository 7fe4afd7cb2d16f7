use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

/// Runs an external program to completion and reports its exit code.
///
/// `Ok(None)` means the child ended without a code (killed by a signal).
/// `Err` means it could not be started at all.
pub trait ProcessRunner {
    fn run(
        &mut self,
        program: &str,
        args: &[OsString],
        cwd: Option<&Path>,
    ) -> io::Result<Option<i32>>;
}

/// Spawns real processes with all standard streams discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(
        &mut self,
        program: &str,
        args: &[OsString],
        cwd: Option<&Path>,
    ) -> io::Result<Option<i32>> {
        let mut command = Command::new(program);
        command.args(args);
        if let Some(dir) = cwd {
            command.current_dir(dir);
        }
        command.stdin(Stdio::null());
        command.stdout(Stdio::null());
        command.stderr(Stdio::null());

        debug!(program, ?args, ?cwd, "spawning");
        let status = command.status()?;
        debug!(program, %status, "exited");
        Ok(status.code())
    }
}
