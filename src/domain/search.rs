use crate::domain::error::Result;
use crate::domain::models::GithubUser;
use async_trait::async_trait;

/// Remote user lookup consumed by the application runtime.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchFacade: Send + Sync {
    // Users whose login contains `prefix`
    async fn search_by_prefix(&self, prefix: &str) -> Result<Vec<GithubUser>>;

    // Full record for one login
    async fn fetch_exact(&self, login: &str) -> Result<GithubUser>;

    // Origin of the remote API, shown in the header
    fn origin(&self) -> String;
}
