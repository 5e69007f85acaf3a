//! Collects one sprite per dex number out of a PokeAPI sprites checkout.
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("no pokemon sprites found under {}", .0.display())]
    SpritesNotFound(PathBuf),
    #[error("I/O failed: {0}")]
    Io(Arc<io::Error>),
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Self::Io(Arc::new(error))
    }
}

/// The two sprite folders of a checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    pub official: PathBuf,
    pub front: PathBuf,
}

impl Tree {
    /// Accepts either the repository root or its `sprites` folder.
    pub fn find(root: &Path) -> Result<Self, Error> {
        let layouts = [root.join("sprites").join("pokemon"), root.join("pokemon")];

        let front = layouts
            .into_iter()
            .find(|front| front.exists())
            .ok_or_else(|| Error::SpritesNotFound(root.to_owned()))?;

        Ok(Self {
            official: front.join("other").join("official-artwork"),
            front,
        })
    }

    /// Every dex number with a sprite in either folder.
    pub fn ids(&self) -> Result<BTreeSet<u32>, Error> {
        let mut ids = BTreeSet::new();

        for directory in [&self.official, &self.front] {
            let entries = match fs::read_dir(directory) {
                Ok(entries) => entries,
                Err(error) if error.kind() == io::ErrorKind::NotFound => continue,
                Err(error) => return Err(error.into()),
            };

            for entry in entries {
                let file_name = entry?.file_name();

                if let Some(id) = file_name.to_str().and_then(parse_id) {
                    let _ = ids.insert(id);
                }
            }
        }

        Ok(ids)
    }

    /// The official artwork if present, the front sprite otherwise.
    pub fn source(&self, id: u32) -> Option<PathBuf> {
        let file_name = format!("{id}.png");

        [self.official.join(&file_name), self.front.join(&file_name)]
            .into_iter()
            .find(|path| path.is_file())
    }
}

/// Counts of a collection run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub found: usize,
    pub written: usize,
}

/// Copies every sprite of `root` into `output` as `<dex>.png`.
///
/// Rerunning overwrites the same files with the same content.
pub fn collect(root: &Path, output: &Path) -> Result<Summary, Error> {
    let tree = Tree::find(root)?;
    let ids = tree.ids()?;

    log::info!(
        "Found {} candidate sprites (official artwork: {}, front: {})",
        ids.len(),
        tree.official.exists(),
        tree.front.exists()
    );

    fs::create_dir_all(output)?;

    let mut written = 0;

    for &id in &ids {
        let Some(source) = tree.source(id) else {
            log::debug!("No sprite file for {id}");
            continue;
        };

        let _ = fs::copy(&source, output.join(file_name(id)))?;
        written += 1;
    }

    Ok(Summary {
        found: ids.len(),
        written,
    })
}

/// Zero-padded to three digits below 1000.
pub fn file_name(id: u32) -> String {
    format!("{id:03}.png")
}

fn parse_id(file_name: &str) -> Option<u32> {
    let digits = file_name.strip_suffix(".png")?;

    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }

    digits.parse().ok()
}
