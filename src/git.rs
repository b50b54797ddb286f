use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use crate::error::{Result, SetupError};
use crate::models::RemoteEntry;

/// Run a git command and return the raw output, whatever its exit status
pub fn run_git_command(args: &[&str], working_dir: Option<&Path>) -> Result<Output> {
    let mut cmd = Command::new("git");
    cmd.args(args);

    if let Some(dir) = working_dir {
        cmd.current_dir(dir);
    }

    Ok(cmd.output()?)
}

/// Run a git command, failing with its stderr if it exits non-zero, and
/// return trimmed stdout
pub fn run_git_command_string(args: &[&str], cwd: Option<&Path>) -> Result<String> {
    let output = run_git_command(args, cwd)?;

    if !output.status.success() {
        return Err(SetupError::ExternalTool {
            command: args.join(" "),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            code: output.status.code(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Run a long git command (clone, fetch) with its progress shown on our
/// stderr as it arrives. Stderr is also kept for the error on failure.
pub fn run_git_command_streamed(args: &[&str], cwd: Option<&Path>) -> Result<()> {
    let mut cmd = Command::new("git");
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::piped());

    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    let mut child = cmd.spawn()?;
    let mut captured = Vec::new();

    if let Some(mut pipe) = child.stderr.take() {
        let mut terminal = io::stderr();
        let mut buf = [0u8; 4096];
        loop {
            let n = pipe.read(&mut buf)?;
            if n == 0 {
                break;
            }
            // Progress display is best effort
            let _ = terminal.write_all(&buf[..n]);
            let _ = terminal.flush();
            captured.extend_from_slice(&buf[..n]);
        }
    }

    let status = child.wait()?;
    if !status.success() {
        return Err(SetupError::ExternalTool {
            command: args.join(" "),
            stderr: String::from_utf8_lossy(&captured).trim().to_string(),
            code: status.code(),
        });
    }

    Ok(())
}

/// Check if git is available on the system
pub fn check_git_availability() -> Result<()> {
    Command::new("git").args(["--version"]).output().map_err(|e| {
        SetupError::ExternalTool {
            command: "--version".to_string(),
            stderr: format!(
                "Git is not installed or not available in PATH ({e}). Please install git and try again."
            ),
            code: None,
        }
    })?;
    Ok(())
}

/// Check if a directory is a git repository
#[must_use]
pub fn is_git_repo(path: &Path) -> bool {
    path.join(".git").exists()
}

/// `git clone --progress <url> <dest_name>` run from `parent`
pub fn clone_repository(url: &str, parent: &Path, dest_name: &str) -> Result<PathBuf> {
    run_git_command_streamed(&["clone", "--progress", url, dest_name], Some(parent))?;
    Ok(parent.join(dest_name))
}

/// The local remote configuration this tool reads and appends to.
///
/// Remotes are never removed or renamed through this interface.
pub trait RemoteStore {
    /// Names of every configured remote
    fn remote_names(&self) -> Result<Vec<String>>;

    /// URL of the named remote, or `None` if no such remote exists
    fn remote_url(&self, name: &str) -> Result<Option<String>>;

    /// The named remote with its URL, if configured
    fn remote_entry(&self, name: &str) -> Result<Option<RemoteEntry>> {
        Ok(self.remote_url(name)?.map(|url| RemoteEntry {
            name: name.to_string(),
            url,
        }))
    }

    fn add_remote(&mut self, name: &str, url: &str) -> Result<()>;

    /// Fetch the refs of the named remote
    fn fetch(&mut self, name: &str) -> Result<()>;
}

/// A local working copy driven through the `git` command line
#[derive(Debug, Clone)]
pub struct GitRepo {
    path: PathBuf,
}

impl GitRepo {
    #[must_use]
    pub const fn open(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RemoteStore for GitRepo {
    fn remote_names(&self) -> Result<Vec<String>> {
        let output = run_git_command_string(&["remote"], Some(&self.path))?;
        Ok(output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }

    fn remote_url(&self, name: &str) -> Result<Option<String>> {
        let output = run_git_command(&["remote", "get-url", name], Some(&self.path))?;

        // Non-zero means the remote is not configured
        if !output.status.success() {
            return Ok(None);
        }

        Ok(Some(
            String::from_utf8_lossy(&output.stdout).trim().to_string(),
        ))
    }

    fn add_remote(&mut self, name: &str, url: &str) -> Result<()> {
        run_git_command_string(&["remote", "add", name, url], Some(&self.path))?;
        Ok(())
    }

    fn fetch(&mut self, name: &str) -> Result<()> {
        run_git_command_streamed(&["fetch", "--progress", name], Some(&self.path))?;
        Ok(())
    }
}
