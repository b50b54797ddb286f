use std::collections::HashSet;

use crate::error::Result;
use crate::error_handling;
use crate::git::RemoteStore;
use crate::github::ForkSource;
use crate::interactive::Confirm;
use crate::models::{ForkLimit, RepositoryReference};
use crate::ui;

/// How far enumeration may go, decided before the first page is requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPlan {
    /// Stop once this many forks have been processed
    Bounded(usize),
    /// Read until the host returns an empty page
    Unbounded,
}

impl FetchPlan {
    const fn is_exhausted(self, processed: usize) -> bool {
        match self {
            Self::Bounded(limit) => processed >= limit,
            Self::Unbounded => false,
        }
    }
}

/// Counters for one enumeration pass. `processed == added + skipped`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForkReport {
    pub processed: usize,
    pub added: usize,
    pub skipped: usize,
    /// True when the pass stopped at the bounded limit rather than at the
    /// end of the listing
    pub limit_reached: bool,
}

/// Turn the requested limit into a plan, asking the operator first when an
/// unlimited run would cover more than `threshold` forks.
///
/// Returns `None` if the operator declines.
pub fn resolve_plan<C: Confirm + ?Sized>(
    limit: ForkLimit,
    total_forks: u64,
    threshold: u64,
    confirm: &mut C,
) -> Result<Option<FetchPlan>> {
    match limit {
        ForkLimit::Limited(n) => {
            ui::print_info(&format!("Fetching up to {n} forks..."));
            Ok(Some(FetchPlan::Bounded(n)))
        }
        ForkLimit::All => {
            ui::print_info("fetching all of them...");
            if total_forks > threshold {
                let prompt = format!("Warning: Fetching {total_forks} forks. Continue? (y/N) ");
                if !confirm.confirm(&prompt)? {
                    ui::print_warning("Aborted.");
                    return Ok(None);
                }
            }
            Ok(Some(FetchPlan::Unbounded))
        }
    }
}

/// Page through the forks of `upstream` and add a remote per new owner.
///
/// Forks owned by `username`, or whose owner already names a remote, are
/// skipped but still count towards the plan's limit. Owner logins are used
/// verbatim as remote names.
pub fn register_forks<F, S>(
    source: &F,
    store: &mut S,
    upstream: &RepositoryReference,
    username: &str,
    mut existing: HashSet<String>,
    plan: FetchPlan,
) -> Result<ForkReport>
where
    F: ForkSource + ?Sized,
    S: RemoteStore,
{
    let mut report = ForkReport::default();
    let mut page = 1u32;

    loop {
        let forks = source.fork_page(upstream, page)?;
        if forks.is_empty() {
            break;
        }

        for fork in forks {
            report.processed += 1;

            if fork.owner_login == username || existing.contains(&fork.owner_login) {
                println!("Skipping {} (already exists)", fork.owner_login);
                report.skipped += 1;
            } else {
                println!(
                    "Adding remote for fork owned by {}: {}",
                    fork.owner_login, fork.clone_url
                );
                store
                    .add_remote(&fork.owner_login, &fork.clone_url)
                    .map_err(|e| error_handling::handle_remote_add_error(&fork.owner_login, e))?;
                report.added += 1;
                existing.insert(fork.owner_login);
            }

            if plan.is_exhausted(report.processed) {
                report.limit_reached = true;
                ui::print_success(&format!(
                    "Processed {} forks ({} added, {} skipped).",
                    report.processed, report.added, report.skipped
                ));
                return Ok(report);
            }
        }

        page += 1;
    }

    ui::print_success(&format!(
        "Added {} new forks, skipped {}.",
        report.added, report.skipped
    ));
    Ok(report)
}

/// Full fork step: read existing remotes, look up the fork count, resolve
/// the plan, then enumerate.
///
/// `Ok(None)` means the operator declined an unlimited run.
pub fn add_forks_as_remotes<F, S, C>(
    source: &F,
    store: &mut S,
    upstream: &RepositoryReference,
    username: &str,
    limit: ForkLimit,
    threshold: u64,
    confirm: &mut C,
) -> Result<Option<ForkReport>>
where
    F: ForkSource + ?Sized,
    S: RemoteStore,
    C: Confirm + ?Sized,
{
    let existing: HashSet<String> = store.remote_names()?.into_iter().collect();

    let total_forks = source.forks_count(upstream)?;
    println!();
    ui::print_info(&format!("Repository has {total_forks} forks total."));

    let Some(plan) = resolve_plan(limit, total_forks, threshold, confirm)? else {
        return Ok(None);
    };

    register_forks(source, store, upstream, username, existing, plan).map(Some)
}
