use crate::moves::{self, Dictionary};
use crate::pokedex::{self, Pokedex};
use crate::pvpoke::{self, Rankings, Releases};
use crate::template::{self, GameMaster};
use crate::{Config, Dataset, Error, Source, Sources};

use std::path::Path;
use tokio::fs;

/// Runs the whole build. Only the Game Master and the move list are required;
/// every other source degrades to nothing when it cannot be loaded.
pub async fn build(config: &Config, game_master: &Source) -> Result<Dataset, Error> {
    let records: Vec<template::Record> = game_master.load().await?;
    let game_master = GameMaster::new(records);

    let entries: Vec<moves::Entry> = Source::parse(&config.moves).load().await?;

    let sources = Sources {
        moves: Dictionary::new(entries, &game_master),
        pokedex: load_pokedex(&config.pokedex).await,
        releases: load_releases(config).await,
        rankings: load_rankings(config).await,
        release_overrides: config.release_overrides.iter().cloned().collect(),
    };

    Ok(Dataset::generate(&game_master, &sources))
}

async fn load_pokedex(path: &Path) -> Pokedex {
    if !fs::try_exists(path).await.unwrap_or(false) {
        log::debug!("No Pokédex names at {}", path.display());
        return Pokedex::default();
    }

    let Some(rows) = optional(
        "Pokédex names",
        Source::Local(path.to_owned())
            .load::<Vec<pokedex::Row>>()
            .await,
    ) else {
        return Pokedex::default();
    };

    let pokedex = Pokedex::new(rows);
    log::info!("Loaded {} base Pokédex names", pokedex.len());

    pokedex
}

async fn load_releases(config: &Config) -> Releases {
    let Some(source) = &config.releases else {
        return Releases::default();
    };

    let Some(feed) = optional(
        "release feed",
        Source::parse(source).load::<pvpoke::Feed>().await,
    ) else {
        return Releases::default();
    };

    let releases = Releases::new(feed.into_species());
    log::info!("Loaded {} release entries", releases.len());

    releases
}

async fn load_rankings(config: &Config) -> Rankings {
    let mut rankings = Rankings::new(config.default_bracket);

    for feed in &config.rankings {
        let label = match feed.bracket {
            Some(bracket) => format!("{bracket} league rankings"),
            None => "rankings".to_owned(),
        };

        let source = Source::parse(&feed.source);

        if let Some(entries) = optional(&label, source.load::<Vec<pvpoke::Ranking>>().await) {
            log::info!("Loaded {} {label}", entries.len());
            rankings.insert(feed.bracket, entries);
        }
    }

    rankings
}

fn optional<T>(label: &str, result: Result<T, Error>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            log::warn!("Skipping {label}: {error}");
            None
        }
    }
}
