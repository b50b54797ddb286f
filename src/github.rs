use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::Settings;
use crate::error::{Result, SetupError};
use crate::models::{ForkDescriptor, RepoMetadata, RepositoryReference};

/// Where fork information comes from
pub trait ForkSource {
    /// Total number of forks the host reports for the repository
    fn forks_count(&self, repo: &RepositoryReference) -> Result<u64>;

    /// One page of the forks listing, 1-based. An empty page means there is
    /// nothing more to read.
    fn fork_page(&self, repo: &RepositoryReference, page: u32) -> Result<Vec<ForkDescriptor>>;
}

#[derive(Debug, Deserialize)]
struct ApiOwner {
    login: String,
}

#[derive(Debug, Deserialize)]
struct ApiFork {
    owner: ApiOwner,
    clone_url: String,
}

impl From<ApiFork> for ForkDescriptor {
    fn from(fork: ApiFork) -> Self {
        Self {
            owner_login: fork.owner.login,
            clone_url: fork.clone_url,
        }
    }
}

/// Blocking client for the GitHub REST API
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    api_url: String,
    token: Option<String>,
    user_agent: String,
}

impl GitHubClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let http = Client::builder().build()?;
        Ok(Self {
            http,
            api_url: settings.api_url.trim_end_matches('/').to_string(),
            token: settings.github_token.clone(),
            user_agent: settings.user_agent.clone(),
        })
    }

    fn repo_endpoint(&self, repo: &RepositoryReference) -> String {
        format!("{}/repos/{}/{}", self.api_url, repo.owner, repo.name)
    }

    fn request(&self, url: &str) -> RequestBuilder {
        let builder = self
            .http
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .header(ACCEPT, "application/vnd.github+json");

        match &self.token {
            Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
            None => builder,
        }
    }

    /// Send a GET and decode the JSON body; any failure is a network error
    fn get_json<T: DeserializeOwned>(&self, builder: RequestBuilder, url: &str) -> Result<T> {
        let response = builder
            .send()
            .map_err(|e| SetupError::Network(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(SetupError::Network(format!(
                "{url} returned {status}: {}",
                body.trim()
            )));
        }

        let body = response
            .text()
            .map_err(|e| SetupError::Network(format!("failed to read response from {url}: {e}")))?;

        serde_json::from_str(&body)
            .map_err(|e| SetupError::Network(format!("unexpected response from {url}: {e}")))
    }
}

impl ForkSource for GitHubClient {
    fn forks_count(&self, repo: &RepositoryReference) -> Result<u64> {
        let url = self.repo_endpoint(repo);
        let metadata: RepoMetadata = self.get_json(self.request(&url), &url)?;
        Ok(metadata.forks_count)
    }

    fn fork_page(&self, repo: &RepositoryReference, page: u32) -> Result<Vec<ForkDescriptor>> {
        let url = format!("{}/forks", self.repo_endpoint(repo));
        let builder = self.request(&url).query(&[("page", page)]);
        let forks: Vec<ApiFork> = self.get_json(builder, &url)?;
        Ok(forks.into_iter().map(ForkDescriptor::from).collect())
    }
}
