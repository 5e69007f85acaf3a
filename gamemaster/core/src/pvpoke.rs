//! PvPoke release flags, move pools and recommended movesets.
use crate::moves::{self, Category};
use crate::name;
use crate::pokemon::{Bracket, Move, Moveset, Recommended};
use crate::template::Identifier;

use serde::Deserialize;
use std::collections::BTreeMap;

/// A species of the release feed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Species {
    pub species_id: String,
    #[serde(default)]
    pub fast_moves: Vec<Identifier>,
    #[serde(default)]
    pub charged_moves: Vec<Identifier>,
    #[serde(default)]
    pub released: Option<bool>,
}

/// The release feed, either a bare list or wrapped in a game master object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Feed {
    List(Vec<Species>),
    Wrapped { pokemon: Vec<Species> },
}

impl Feed {
    pub fn into_species(self) -> Vec<Species> {
        match self {
            Self::List(species) | Self::Wrapped { pokemon: species } => species,
        }
    }
}

/// Release feed entries keyed by slug.
#[derive(Debug, Clone, Default)]
pub struct Releases(BTreeMap<String, Species>);

impl Releases {
    pub fn new(species: impl IntoIterator<Item = Species>) -> Self {
        let mut releases = BTreeMap::new();

        for species in species {
            let _ = releases
                .entry(name::slugify(&species.species_id))
                .or_insert(species);
        }

        Self(releases)
    }

    pub fn get(&self, slug: &str) -> Option<&Species> {
        self.0.get(slug)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// An entry of a ranking feed. The first move of the moveset is the fast one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ranking {
    pub species_id: String,
    #[serde(default)]
    pub moveset: Vec<Identifier>,
}

/// Recommended move identifiers, not yet resolved against a move list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Choice {
    pub fast: Option<String>,
    pub charged: Vec<String>,
}

impl Choice {
    fn from_moveset(moveset: &[Identifier]) -> Self {
        let mut moveset = moveset.iter().map(|id| id.as_str().to_owned());

        Self {
            fast: moveset.next(),
            charged: moveset.take(2).collect(),
        }
    }

    /// Resolves the choice against a variant's own moves.
    ///
    /// Returns `None` when not a single move resolves.
    pub fn resolve(&self, fast: &[Move], charged: &[Move]) -> Option<Moveset> {
        let moveset = Moveset {
            fast: self
                .fast
                .as_deref()
                .and_then(|id| lookup(id, fast))
                .map(|move_| move_.name.clone()),
            charged: self
                .charged
                .iter()
                .filter_map(|id| lookup(id, charged))
                .map(|move_| move_.name.clone())
                .collect(),
        };

        if moveset.is_empty() { None } else { Some(moveset) }
    }
}

fn lookup<'a>(id: &str, candidates: &'a [Move]) -> Option<&'a Move> {
    candidates.iter().find(|move_| moves::same_move(&move_.id, id))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recommendation {
    Brackets(BTreeMap<Bracket, Choice>),
    Flat(Choice),
}

/// Recommended movesets keyed by slug.
#[derive(Debug, Clone)]
pub struct Rankings {
    default: Bracket,
    entries: BTreeMap<String, Recommendation>,
}

impl Rankings {
    pub fn new(default: Bracket) -> Self {
        Self {
            default,
            entries: BTreeMap::new(),
        }
    }

    pub fn default_bracket(&self) -> Bracket {
        self.default
    }

    /// Adds one ranking feed; without a bracket the feed is a flat recommendation.
    ///
    /// Bracketed rankings take precedence: they replace a flat recommendation
    /// of the same species, and a later flat feed never replaces them.
    pub fn insert(&mut self, bracket: Option<Bracket>, rankings: Vec<Ranking>) {
        for ranking in rankings {
            if ranking.moveset.is_empty() {
                continue;
            }

            let slug = name::slugify(&ranking.species_id);
            let choice = Choice::from_moveset(&ranking.moveset);

            match bracket {
                Some(bracket) => {
                    let recommendation = self
                        .entries
                        .entry(slug.clone())
                        .or_insert_with(|| Recommendation::Brackets(BTreeMap::new()));

                    if matches!(recommendation, Recommendation::Flat(_)) {
                        log::debug!("Bracketed rankings replace the flat recommendation of {slug}");
                        *recommendation = Recommendation::Brackets(BTreeMap::new());
                    }

                    if let Recommendation::Brackets(brackets) = recommendation {
                        let _ = brackets.entry(bracket).or_insert(choice);
                    }
                }
                None => {
                    let _ = self
                        .entries
                        .entry(slug)
                        .or_insert(Recommendation::Flat(choice));
                }
            }
        }
    }

    pub fn get(&self, slug: &str) -> Option<&Recommendation> {
        self.entries.get(slug)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The recommended movesets of a variant, resolved against its moves.
    pub fn recommend(&self, slug: &str, fast: &[Move], charged: &[Move]) -> Option<Recommended> {
        match self.get(slug)? {
            Recommendation::Brackets(brackets) => {
                let leagues: BTreeMap<Bracket, Moveset> = brackets
                    .iter()
                    .filter_map(|(bracket, choice)| Some((*bracket, choice.resolve(fast, charged)?)))
                    .collect();

                let (league, moveset) = leagues
                    .get_key_value(&self.default)
                    .or_else(|| leagues.iter().next())?;

                Some(Recommended {
                    league: Some(*league),
                    fast: moveset.fast.clone(),
                    charged: moveset.charged.clone(),
                    leagues: leagues.clone(),
                })
            }
            Recommendation::Flat(choice) => {
                let moveset = choice.resolve(fast, charged)?;

                Some(Recommended {
                    league: None,
                    fast: moveset.fast,
                    charged: moveset.charged,
                    leagues: BTreeMap::new(),
                })
            }
        }
    }
}

impl Default for Rankings {
    fn default() -> Self {
        Self::new(Bracket::Great)
    }
}

/// Third-party move identifiers missing from `ids`, in canonical form.
pub fn missing_moves<'a>(
    ids: &[String],
    extra: impl IntoIterator<Item = &'a Identifier>,
    category: Category,
    dictionary: &moves::Dictionary,
) -> Vec<String> {
    let mut missing: Vec<String> = Vec::new();

    for id in extra {
        let id = id.as_str();

        if id.is_empty()
            || ids.iter().chain(&missing).any(|known| moves::same_move(known, id))
        {
            continue;
        }

        missing.push(dictionary.canonical_id(id, category));
    }

    missing
}
