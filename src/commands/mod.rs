pub mod clone;
pub mod forks;
pub mod upstream;

use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::error::Result;
use crate::git;
use crate::github::ForkSource;
use crate::interactive::Confirm;
use crate::models::{ForkLimit, RepositoryReference};
use crate::ui;

pub use forks::{FetchPlan, ForkReport};

/// Validated input for one run
#[derive(Debug, Clone)]
pub struct SetupRequest {
    pub upstream: RepositoryReference,
    pub username: String,
    pub limit: ForkLimit,
}

/// What a completed run did
#[derive(Debug, Clone)]
pub struct SetupSummary {
    pub repo_path: PathBuf,
    /// `None` when the operator declined an unlimited fork fetch
    pub forks: Option<ForkReport>,
}

/// Clone, register upstream, then register forks, in that order.
///
/// The working copy lives at `<parent>/<repo name>`; every git call after
/// the clone runs inside it. Remotes added before a failure stay in place,
/// so re-running is the way to recover.
pub fn run<F, C>(
    request: &SetupRequest,
    settings: &Settings,
    parent: &Path,
    source: &F,
    confirm: &mut C,
) -> Result<SetupSummary>
where
    F: ForkSource + ?Sized,
    C: Confirm + ?Sized,
{
    git::check_git_availability()?;

    ui::print_header(&format!("[1/3] Cloning fork of {}", request.upstream));
    let mut repo = clone::ensure_clone(
        parent,
        &request.upstream,
        &request.username,
        &settings.clone_base,
    )?;

    ui::print_header("[2/3] Registering upstream");
    let upstream_url = request.upstream.clone_url(&settings.clone_base);
    upstream::ensure_upstream(&mut repo, &upstream_url)?;

    ui::print_header("[3/3] Adding forks as remotes");
    let forks = forks::add_forks_as_remotes(
        source,
        &mut repo,
        &request.upstream,
        &request.username,
        request.limit,
        settings.confirm_threshold,
        confirm,
    )?;

    if forks.is_some() {
        ui::print_success(&format!(
            "Remotes for {} are ready in {}",
            request.upstream,
            repo.path().display()
        ));
    }

    Ok(SetupSummary {
        repo_path: repo.path().to_path_buf(),
        forks,
    })
}
