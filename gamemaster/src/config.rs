use crate::pokemon::Bracket;
use crate::{Error, Source};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Optional overrides of the defaults, relative to the working directory.
pub const CONFIG_PATH: &str = "data/build-config.json";

const GAME_MASTER_URL: &str =
    "https://raw.githubusercontent.com/PokeMiners/game_masters/master/latest/latest.json";
const MOVES_URL: &str = "https://raw.githubusercontent.com/pokemongo-dev-contrib/pokemongo-json-pokedex/master/output/move.json";
const RELEASES_URL: &str =
    "https://raw.githubusercontent.com/pvpoke/pvpoke/master/src/data/gamemaster/pokemon.json";
const RANKINGS_URL: &str =
    "https://raw.githubusercontent.com/pvpoke/pvpoke/master/src/data/rankings/all/overall";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub game_master: String,
    pub moves: String,
    pub releases: Option<String>,
    pub rankings: Vec<RankingFeed>,
    pub default_bracket: Bracket,
    pub pokedex: PathBuf,
    pub output: PathBuf,
    /// Slugs always flagged as released, whatever the release feed says.
    pub release_overrides: Vec<String>,
}

/// A ranking feed; without a bracket it is a flat recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingFeed {
    #[serde(default)]
    pub bracket: Option<Bracket>,
    pub source: String,
}

impl Config {
    /// Reads the configuration file, if any.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();

        if !fs::try_exists(path).await? {
            return Ok(Self::default());
        }

        Source::Local(path.to_owned()).load().await
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            game_master: GAME_MASTER_URL.to_owned(),
            moves: MOVES_URL.to_owned(),
            releases: Some(RELEASES_URL.to_owned()),
            rankings: Bracket::ALL
                .into_iter()
                .map(|bracket| RankingFeed {
                    bracket: Some(bracket),
                    source: format!("{RANKINGS_URL}/rankings-{}.json", bracket.cp_limit()),
                })
                .collect(),
            default_bracket: Bracket::Great,
            pokedex: PathBuf::from("data/pokedex.json"),
            output: PathBuf::from("data/pokemon.min.json"),
            release_overrides: vec!["ditto".to_owned(), "shedinja".to_owned()],
        }
    }
}
