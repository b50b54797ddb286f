use std::process::ExitCode;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;

use fork_remotes::commands::{self, SetupRequest};
use fork_remotes::config;
use fork_remotes::github::GitHubClient;
use fork_remotes::interactive::{AssumeYes, Confirm, StdinConfirm};
use fork_remotes::{ui, ForkLimit, RepositoryReference, SetupError};

const USAGE: &str = "\
Usage: fork-remotes <repo_url> <username> [fork_count]
  <repo_url>: The full URL of the upstream GitHub repository (e.g., https://github.com/owner/repo)
  <username>: Your GitHub username (the owner of the origin fork you want to clone)
  [fork_count]: Number of forks to add (default: 30, 'all' for all forks)";

#[derive(Parser)]
#[command(name = "fork-remotes")]
#[command(about = "Clone your fork and add upstream plus every other fork as git remotes")]
#[command(version)]
#[command(
    long_about = "Clones https://github.com/<username>/<repo>.git as origin, registers the original repository as 'upstream', and adds other forks of it as remotes named after their owners so their branches can be fetched by name."
)]
struct Cli {
    /// URL of the upstream repository, e.g. https://github.com/owner/repo
    repo_url: String,

    /// Your GitHub username (owner of the fork cloned as origin)
    username: String,

    /// Number of forks to process, or 'all'
    #[arg(allow_negative_numbers = true)]
    fork_count: Option<String>,

    /// Answer yes to the confirmation asked before fetching a large number of forks
    #[arg(short, long)]
    yes: bool,

    /// GitHub token for API requests (defaults to $GITHUB_TOKEN)
    #[arg(long, value_name = "TOKEN")]
    token: Option<String>,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            ui::print_error(&format!("Error: {}", e.kind()));
            println!("{USAGE}");
            return ExitCode::from(1);
        }
    };

    match run_cli(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Setup(e)) => {
            ui::print_error(&format!("Error: {e}"));
            u8::try_from(e.exit_code()).map_or(ExitCode::FAILURE, ExitCode::from)
        }
        Err(CliError::Other(e)) => {
            ui::print_error(&format!("Error: {e:#}"));
            ExitCode::from(1)
        }
    }
}

enum CliError {
    Setup(SetupError),
    Other(anyhow::Error),
}

impl From<SetupError> for CliError {
    fn from(err: SetupError) -> Self {
        Self::Setup(err)
    }
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err)
    }
}

fn run_cli(cli: Cli) -> Result<(), CliError> {
    // Validate every argument before touching git or the network
    let upstream = RepositoryReference::parse(&cli.repo_url)?;
    let requested = cli
        .fork_count
        .as_deref()
        .map(str::parse::<ForkLimit>)
        .transpose()?;

    let mut settings = config::load_settings().context("Failed to load settings")?;
    if let Some(token) = cli.token {
        settings.github_token = Some(token);
    }

    let request = SetupRequest {
        upstream,
        username: cli.username,
        limit: requested.unwrap_or(ForkLimit::Limited(settings.default_fork_count)),
    };

    let client = GitHubClient::new(&settings)?;
    let mut confirm: Box<dyn Confirm> = if cli.yes {
        Box::new(AssumeYes)
    } else {
        Box::new(StdinConfirm)
    };

    let parent = std::env::current_dir().context("Failed to read current directory")?;
    commands::run(&request, &settings, &parent, &client, confirm.as_mut())?;

    Ok(())
}
