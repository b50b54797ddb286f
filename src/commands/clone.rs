use std::path::Path;

use crate::error::{Result, SetupError};
use crate::error_handling;
use crate::git::{self, GitRepo};
use crate::models::RepositoryReference;
use crate::ui;

/// Make sure `<parent>/<repo name>` holds a working copy of the user's fork.
///
/// An existing git working copy of that name is reused as-is; an existing
/// directory that is not one is refused so no remote lands in an enclosing
/// repository. Otherwise `<clone_base>/<username>/<repo>.git` is cloned into it.
pub fn ensure_clone(
    parent: &Path,
    upstream: &RepositoryReference,
    username: &str,
    clone_base: &str,
) -> Result<GitRepo> {
    let repo_path = parent.join(&upstream.name);

    if repo_path.exists() {
        if !git::is_git_repo(&repo_path) {
            error_handling::show_not_a_repository(&repo_path);
            return Err(SetupError::NotARepository(repo_path));
        }
        ui::print_info(&format!(
            "Repository {} already exists, verifying remotes...",
            upstream.name
        ));
        return Ok(GitRepo::open(repo_path));
    }

    let clone_url = upstream.with_owner(username).clone_url(clone_base);
    ui::print_info(&format!("Cloning repository from {clone_url}"));

    let path = git::clone_repository(&clone_url, parent, &upstream.name)
        .map_err(|e| error_handling::handle_clone_error(&clone_url, e))?;

    ui::print_success(&format!("✓ Cloned into {}", path.display()));
    Ok(GitRepo::open(path))
}
