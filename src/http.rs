use anyhow::Context;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

const USER_AGENT: &str = concat!("nowplaying/", env!("CARGO_PKG_VERSION"));

/// Shared HTTP client; every endpoint client clones this handle.
pub fn client() -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(10))
        .build()
        .context("build reqwest client")
}

/// Boxed future returned by the endpoint traits so the clients can sit
/// behind `Arc<dyn ...>` and be swapped for fakes.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
