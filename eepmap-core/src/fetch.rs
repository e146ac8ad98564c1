use crate::error::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

/// A completed HTTP exchange. Any received response counts as completed,
/// error statuses included - only transport failures are absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

/// Builds the shared HTTP client, routed through the I2P router's HTTP
/// proxy when one is configured.
pub fn build_client(proxy: Option<&str>, timeout: Duration) -> Result<Client> {
    let mut builder = Client::builder()
        .user_agent("eepmap/0.2 (https://github.com/trapdoorsec/eepmap)")
        .timeout(timeout)
        .connect_timeout(timeout / 2)
        .redirect(reqwest::redirect::Policy::limited(5));

    if let Some(proxy) = proxy {
        let proxy_url = format!("http://{}", proxy);
        debug!("routing all requests through proxy {}", proxy_url);
        builder = builder.proxy(reqwest::Proxy::all(&proxy_url)?);
    }

    Ok(builder.build()?)
}

/// Fetches a URL with up to `max_attempts` tries, sleeping
/// `base_delay * attempt` between them (linear backoff, 1-indexed).
/// Transport-level failures are retried; a received response is returned
/// immediately whatever its status code. Returns `None` once the attempt
/// budget is exhausted.
pub async fn fetch_with_retry(
    client: &Client,
    url: &str,
    max_attempts: u32,
    base_delay: Duration,
) -> Option<FetchResponse> {
    for attempt in 1..=max_attempts {
        debug!("attempt {}/{} for {}", attempt, max_attempts, url);
        match try_fetch(client, url).await {
            Ok(response) => {
                info!(
                    "fetched {} (status {}) on attempt {}",
                    url, response.status, attempt
                );
                return Some(response);
            }
            Err(e) => {
                warn!("attempt {}/{} failed for {}: {}", attempt, max_attempts, url, e);
                if attempt < max_attempts {
                    let backoff = base_delay * attempt;
                    debug!("retrying in {:?}", backoff);
                    tokio::time::sleep(backoff).await;
                }
            }
        }
    }

    warn!("giving up on {} after {} attempts", url, max_attempts);
    None
}

async fn try_fetch(client: &Client, url: &str) -> reqwest::Result<FetchResponse> {
    let response = client.get(url).send().await?;
    let status = response.status().as_u16();
    // a failure while draining the body is still a transport failure
    let body = response.text().await?;
    Ok(FetchResponse { status, body })
}
