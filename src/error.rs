use std::path::PathBuf;

use thiserror::Error;

/// Everything that can abort a setup run. Every variant is fatal.
#[derive(Error, Debug)]
pub enum SetupError {
    /// Malformed command-line input
    #[error("{0}")]
    Validation(String),

    /// Local repository state conflicts with what this tool expects
    #[error("Upstream URL {current} doesn't match expected {expected}")]
    Configuration { current: String, expected: String },

    /// The directory to reuse exists but holds no git working copy
    #[error("{} exists but is not a git repository", .0.display())]
    NotARepository(PathBuf),

    /// A git command exited non-zero
    #[error("Git command failed: git {command}\n{stderr}")]
    ExternalTool {
        command: String,
        stderr: String,
        code: Option<i32>,
    },

    /// The hosting API request failed or returned something unusable
    #[error("GitHub API error: {0}")]
    Network(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SetupError {
    /// Process exit code reported for this error
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 1,
            Self::Configuration { .. } | Self::NotARepository(_) => 2,
            Self::ExternalTool { code, .. } => match code {
                Some(c) if *c != 0 => *c,
                _ => 3,
            },
            Self::Network(_) => 4,
            Self::Io(_) => 5,
        }
    }
}

impl From<reqwest::Error> for SetupError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SetupError>;
