use crate::{Dataset, Error};

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;

/// Writes the dataset as compact JSON, replacing `path` in a single rename.
pub async fn save(dataset: &Dataset, path: impl AsRef<Path>) -> Result<(), Error> {
    let path = path.as_ref();
    let json = serde_json::to_vec(dataset).map_err(|error| Error::Encode(Arc::new(error)))?;

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }

    let temporary = {
        let mut name = path.as_os_str().to_owned();
        name.push(".tmp");

        PathBuf::from(name)
    };

    fs::write(&temporary, json).await?;
    fs::rename(&temporary, path).await?;

    log::info!("Wrote {} Pokémon to {}", dataset.len(), path.display());

    Ok(())
}
