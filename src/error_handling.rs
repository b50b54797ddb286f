use std::path::Path;

use crate::error::SetupError;
use crate::ui;

fn stderr_of(err: &SetupError) -> Option<&str> {
    match err {
        SetupError::ExternalTool { stderr, .. } => Some(stderr),
        _ => None,
    }
}

/// Print recovery hints for a failed clone and hand the error back
#[must_use]
pub fn handle_clone_error(clone_url: &str, err: SetupError) -> SetupError {
    let Some(stderr) = stderr_of(&err) else {
        return err;
    };

    if stderr.contains("Permission denied") || stderr.contains("Authentication failed") {
        ui::show_error_with_help(
            &format!("Authentication failed cloning {clone_url}"),
            &[
                "Check that your credentials for github.com are configured for git",
                "Test access manually: git ls-remote <url>",
            ],
        );
    } else if stderr.contains("not found") || stderr.contains("does not exist") {
        ui::show_error_with_help(
            &format!("Repository not found: {clone_url}"),
            &[
                "Make sure you have forked the repository on GitHub first",
                "Check that the username argument is your GitHub login",
            ],
        );
    } else if stderr.contains("Could not resolve host")
        || stderr.contains("timed out")
        || stderr.contains("network")
    {
        ui::show_error_with_help(
            &format!("Network error cloning {clone_url}"),
            &["Check your internet connection", "Try again in a few moments"],
        );
    } else {
        ui::print_error(&format!("Failed to clone {clone_url}"));
    }

    err
}

/// Print recovery hints for a failed fetch of a remote
#[must_use]
pub fn handle_fetch_error(remote: &str, err: SetupError) -> SetupError {
    if stderr_of(&err).is_some() {
        ui::show_error_with_help(
            &format!("Failed to fetch remote '{remote}'"),
            &[
                &format!("Retry manually: git fetch {remote}"),
                "Re-running this tool is safe; existing remotes are kept",
            ],
        );
    }
    err
}

/// Print recovery hints when `git remote add` is rejected
#[must_use]
pub fn handle_remote_add_error(name: &str, err: SetupError) -> SetupError {
    let Some(stderr) = stderr_of(&err) else {
        return err;
    };

    if stderr.contains("not a valid remote name") {
        ui::show_error_with_help(
            &format!("'{name}' cannot be used as a remote name"),
            &["Add it by hand under another name: git remote add <name> <url>"],
        );
    } else if stderr.contains("already exists") {
        ui::show_error_with_help(
            &format!("Remote '{name}' already exists"),
            &["Inspect existing remotes: git remote -v"],
        );
    } else {
        ui::print_error(&format!("Failed to add remote '{name}'"));
    }

    err
}

/// Explain an upstream remote that points somewhere unexpected
pub fn show_upstream_mismatch(current: &str, expected: &str) {
    ui::show_error_with_help(
        "Existing 'upstream' remote points at a different repository",
        &[
            &format!("Current:  {current}"),
            &format!("Expected: {expected}"),
            &format!("Fix it with: git remote set-url upstream {expected}"),
        ],
    );
}

/// Explain why an existing directory cannot be reused
pub fn show_not_a_repository(path: &Path) {
    ui::show_error_with_help(
        &format!("{} exists but is not a git repository", path.display()),
        &[
            "Move or rename the directory, then run again to clone the fork",
            &format!("Or initialise it yourself: git -C {} init", path.display()),
        ],
    );
}
