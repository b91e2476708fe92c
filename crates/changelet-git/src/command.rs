use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::{CommandOutput, GitError, Result};

/// Runs external programs. The seam lets `git` and `gh` invocations be
/// replaced in tests.
pub trait CommandRunner: Send + Sync {
    /// Runs `program` in `dir` and captures its output.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::Spawn`] if the program cannot be started. A
    /// non-zero exit is reported through [`CommandOutput::success`].
    fn run(&self, dir: &Path, program: &str, args: &[&str]) -> Result<CommandOutput>;

    /// Runs `program` in `dir` attached to the caller's terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if the program cannot be started or exits
    /// unsuccessfully.
    fn run_interactive(&self, dir: &Path, program: &str, args: &[&str]) -> Result<()>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, dir: &Path, program: &str, args: &[&str]) -> Result<CommandOutput> {
        (**self).run(dir, program, args)
    }

    fn run_interactive(&self, dir: &Path, program: &str, args: &[&str]) -> Result<()> {
        (**self).run_interactive(dir, program, args)
    }
}

#[must_use]
pub fn render_command(program: &str, args: &[&str]) -> String {
    let mut rendered = program.to_string();
    for arg in args {
        rendered.push(' ');
        rendered.push_str(arg);
    }
    rendered
}

/// [`CommandRunner`] backed by [`std::process::Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, dir: &Path, program: &str, args: &[&str]) -> Result<CommandOutput> {
        tracing::debug!(command = %render_command(program, args), dir = %dir.display(), "running");

        let output = Command::new(program)
            .args(args)
            .current_dir(dir)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| GitError::Spawn {
                program: program.to_string(),
                source,
            })?;

        Ok(CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn run_interactive(&self, dir: &Path, program: &str, args: &[&str]) -> Result<()> {
        tracing::debug!(command = %render_command(program, args), dir = %dir.display(), "running interactively");

        let status = Command::new(program)
            .args(args)
            .current_dir(dir)
            .status()
            .map_err(|source| GitError::Spawn {
                program: program.to_string(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(GitError::CommandFailed {
                command: render_command(program, args),
                stderr: format!("exited with {status}"),
            })
        }
    }
}

/// The git porcelain commands that go through the `git` binary rather than
/// libgit2: anything touching the network or needing the user's terminal.
#[derive(Debug, Clone)]
pub struct GitCli<R> {
    runner: R,
    root: PathBuf,
}

impl<R: CommandRunner> GitCli<R> {
    #[must_use]
    pub fn new(runner: R, root: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            root: root.into(),
        }
    }

    /// # Errors
    ///
    /// Returns an error if `git pull` fails.
    pub fn pull(&self) -> Result<()> {
        self.checked(&["pull"])
    }

    /// Pushes `branch` to `remote` and sets it as the upstream.
    ///
    /// # Errors
    ///
    /// Returns an error if `git push` fails.
    pub fn push_upstream(&self, remote: &str, branch: &str) -> Result<()> {
        self.checked(&["push", "-u", remote, branch])
    }

    /// Lets the user review and stage hunks with `git add -p`.
    ///
    /// # Errors
    ///
    /// Returns an error if `git add -p` fails.
    pub fn add_patch(&self) -> Result<()> {
        self.runner.run_interactive(&self.root, "git", &["add", "-p"])
    }

    fn checked(&self, args: &[&str]) -> Result<()> {
        let output = self.runner.run(&self.root, "git", args)?;
        if output.success {
            Ok(())
        } else {
            Err(GitError::CommandFailed {
                command: render_command("git", args),
                stderr: output.stderr,
            })
        }
    }
}
