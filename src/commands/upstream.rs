use crate::error::{Result, SetupError};
use crate::error_handling;
use crate::git::RemoteStore;
use crate::ui;

pub const UPSTREAM: &str = "upstream";

/// Ensure `upstream` points at `expected_url`, then fetch it.
///
/// An existing `upstream` must match byte for byte; nothing is normalised.
/// On a mismatch nothing is fetched.
pub fn ensure_upstream<S: RemoteStore>(store: &mut S, expected_url: &str) -> Result<()> {
    match store.remote_entry(UPSTREAM)? {
        Some(current) if current.url != expected_url => {
            error_handling::show_upstream_mismatch(&current.url, expected_url);
            return Err(SetupError::Configuration {
                current: current.url,
                expected: expected_url.to_string(),
            });
        }
        Some(_) => {
            ui::print_info(&format!("Upstream remote already set to {expected_url}"));
        }
        None => {
            ui::print_info(&format!("Adding upstream remote {expected_url}"));
            store
                .add_remote(UPSTREAM, expected_url)
                .map_err(|e| error_handling::handle_remote_add_error(UPSTREAM, e))?;
        }
    }

    ui::print_info("Fetching upstream...");
    store
        .fetch(UPSTREAM)
        .map_err(|e| error_handling::handle_fetch_error(UPSTREAM, e))?;

    Ok(())
}
