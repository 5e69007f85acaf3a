use crate::Error;
use crate::session;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;

/// File names looked up, in order, when a source is a directory.
pub const CANDIDATES: [&str; 3] = ["latest.json", "GAME_MASTER.json", "gamemaster.json"];

/// Where a JSON document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Remote(String),
    Local(PathBuf),
}

impl Source {
    /// HTTP(S) URLs are remote; anything else is a filesystem path.
    pub fn parse(reference: &str) -> Self {
        if reference.starts_with("http://") || reference.starts_with("https://") {
            Self::Remote(reference.to_owned())
        } else {
            Self::Local(PathBuf::from(reference))
        }
    }

    pub async fn load<T: DeserializeOwned>(&self) -> Result<T, Error> {
        let bytes = self.read().await?;

        serde_json::from_slice(&bytes).map_err(|error| Error::Parse {
            origin: self.to_string(),
            error: Arc::new(error),
        })
    }

    pub async fn read(&self) -> Result<Bytes, Error> {
        match self {
            Self::Remote(url) => session::download(url).await,
            Self::Local(path) => {
                let path = resolve(path).await?;

                log::info!("Reading {}", path.display());

                Ok(Bytes::from(fs::read(&path).await?))
            }
        }
    }
}

async fn resolve(path: &Path) -> Result<PathBuf, Error> {
    let is_dir = fs::metadata(path)
        .await
        .map(|metadata| metadata.is_dir())
        .unwrap_or(false);

    if is_dir {
        for name in CANDIDATES {
            let candidate = path.join(name);

            if fs::try_exists(&candidate).await? {
                return Ok(candidate);
            }
        }

        return Err(Error::NotFound(path.to_owned()));
    }

    if !fs::try_exists(path).await? {
        return Err(Error::NotFound(path.to_owned()));
    }

    Ok(path.to_owned())
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(url) => f.write_str(url),
            Self::Local(path) => write!(f, "{}", path.display()),
        }
    }
}
