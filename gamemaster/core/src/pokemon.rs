use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// One row of the dataset: a species, form or temporary evolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pokemon {
    pub dex: Id,
    pub name: String,
    pub slug: String,
    pub types: Vec<String>,
    pub stats: Stats,
    pub moves: Moves,
    pub released: bool,
}

/// National Pokédex number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(pub(crate) u32);

impl Id {
    pub fn new(number: u32) -> Self {
        Self(number)
    }

    pub fn number(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:04}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub attack: u32,
    pub defense: u32,
    pub stamina: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Moves {
    pub fast: Vec<Move>,
    pub charged: Vec<Move>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended: Option<Recommended>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Move {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "whole"
    )]
    pub power: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "whole"
    )]
    pub energy: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "rounded"
    )]
    pub cooldown: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "rounded"
    )]
    pub turns: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "rounded"
    )]
    pub dps: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "rounded"
    )]
    pub eps: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "rounded"
    )]
    pub dpe: Option<f64>,
}

/// Recommended movesets, by competitive bracket.
///
/// `league`, `fast` and `charged` mirror the default bracket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recommended {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub league: Option<Bracket>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fast: Option<String>,
    #[serde(default)]
    pub charged: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub leagues: BTreeMap<Bracket, Moveset>,
}

/// Display names of a recommended fast move and up to two charged moves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Moveset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fast: Option<String>,
    #[serde(default)]
    pub charged: Vec<String>,
}

impl Moveset {
    pub fn is_empty(&self) -> bool {
        self.fast.is_none() && self.charged.is_empty()
    }
}

/// A competitive weight class, capped by combat power.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bracket {
    Little,
    Great,
    Ultra,
    Master,
}

impl Bracket {
    pub const ALL: [Self; 4] = [Self::Little, Self::Great, Self::Ultra, Self::Master];

    pub fn cp_limit(self) -> u32 {
        match self {
            Self::Little => 500,
            Self::Great => 1500,
            Self::Ultra => 2500,
            Self::Master => 10000,
        }
    }
}

impl fmt::Display for Bracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Little => "little",
            Self::Great => "great",
            Self::Ultra => "ultra",
            Self::Master => "master",
        })
    }
}

/// Rounds to two decimals; derived metrics are only rounded on output.
pub fn round(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn rounded<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(value) => serializer.serialize_some(&round(*value)),
        None => serializer.serialize_none(),
    }
}

/// Whole values are written as integers.
fn whole<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(value) if value.fract() == 0.0 && value.abs() < i64::MAX as f64 => {
            serializer.serialize_some(&(*value as i64))
        }
        Some(value) => serializer.serialize_some(value),
        None => serializer.serialize_none(),
    }
}
