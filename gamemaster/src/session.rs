use crate::Error;

use bytes::Bytes;
use std::sync::LazyLock;

static CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::ClientBuilder::new()
        .user_agent(concat!("gamemaster/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("Build reqwest client")
});

/// Fetches a remote document. No retries: a failure is final.
pub async fn download(url: &str) -> Result<Bytes, Error> {
    log::info!("Downloading {url}");

    let response = CLIENT.get(url).send().await?;

    Ok(response.error_for_status()?.bytes().await?)
}
