use std::time::Duration;

use reqwest::{Client, Response};
use tracing::debug;

use crate::{Error, Result};

/// Builds the shared client. `Client` wraps an `Arc`, so clones are cheap and
/// share one connection pool.
pub(crate) fn build_client(
    user_agent: Option<&str>,
    connect_timeout: Duration,
    request_timeout: Duration,
) -> Result<Client> {
    let mut builder = Client::builder()
        .connect_timeout(connect_timeout)
        .timeout(request_timeout);
    if let Some(user_agent) = user_agent {
        builder = builder.user_agent(user_agent);
    }
    Ok(builder.build()?)
}

/// Sends a GET and turns any non-2xx status into [`Error::BadStatus`].
pub(crate) async fn get_checked(client: &Client, url: &str) -> Result<Response> {
    let res = client.get(url).send().await?;
    let status = res.status();
    debug!(%url, %status, "response");
    if !status.is_success() {
        return Err(Error::BadStatus {
            url: url.to_string(),
            status,
        });
    }
    Ok(res)
}

/// Requests a page and returns its HTML.
pub(crate) async fn fetch_html(client: &Client, url: &str) -> Result<String> {
    let html = get_checked(client, url).await?.text().await?;
    Ok(html)
}
