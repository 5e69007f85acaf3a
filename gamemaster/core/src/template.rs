use crate::pokemon;

use serde::{Deserialize, Deserializer};
use std::collections::BTreeSet;
use std::fmt;

/// One entry of the Game Master dump.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub template_id: String,
    #[serde(default)]
    pub data: Data,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Data {
    #[serde(default)]
    pub pokemon_settings: Option<PokemonSettings>,
    #[serde(default)]
    pub form_settings: Option<FormSettings>,
    #[serde(default)]
    pub combat_move: Option<CombatMove>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PokemonSettings {
    #[serde(default)]
    pub pokemon_id: Option<Identifier>,
    #[serde(default)]
    pub form: Option<Identifier>,
    #[serde(default)]
    pub r#type: Option<String>,
    #[serde(default)]
    pub type2: Option<String>,
    #[serde(default)]
    pub stats: Stats,
    #[serde(default)]
    pub quick_moves: Vec<Identifier>,
    #[serde(default)]
    pub cinematic_moves: Vec<Identifier>,
    #[serde(default)]
    pub elite_quick_move: Vec<Identifier>,
    #[serde(default)]
    pub elite_cinematic_move: Vec<Identifier>,
    #[serde(default)]
    pub temp_evo_overrides: Vec<TempEvoOverride>,
    #[serde(default)]
    pub is_transferable: Option<bool>,
    #[serde(default)]
    pub is_deployable: Option<bool>,
    #[serde(default)]
    pub is_tradable: Option<bool>,
}

impl PokemonSettings {
    pub fn form(&self) -> Option<&str> {
        self.form.as_ref().map(Identifier::as_str)
    }

    /// Standard and elite fast moves.
    pub fn fast_moves(&self) -> impl Iterator<Item = &str> {
        self.quick_moves
            .iter()
            .chain(&self.elite_quick_move)
            .map(Identifier::as_str)
    }

    /// Standard and elite charged moves.
    pub fn charged_moves(&self) -> impl Iterator<Item = &str> {
        self.cinematic_moves
            .iter()
            .chain(&self.elite_cinematic_move)
            .map(Identifier::as_str)
    }

    /// Whether any availability flag marks the species as obtainable.
    ///
    /// `None` when the record carries none of them.
    pub fn is_available(&self) -> Option<bool> {
        let flags = [self.is_transferable, self.is_deployable, self.is_tradable];

        if flags.iter().all(Option::is_none) {
            return None;
        }

        Some(flags.into_iter().flatten().any(|flag| flag))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    #[serde(default)]
    pub base_attack: u32,
    #[serde(default)]
    pub base_defense: u32,
    #[serde(default)]
    pub base_stamina: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TempEvoOverride {
    #[serde(default)]
    pub temp_evo_id: Option<Identifier>,
    #[serde(default)]
    pub stats: Option<Stats>,
    #[serde(default)]
    pub type_override1: Option<String>,
    #[serde(default)]
    pub type_override2: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSettings {
    #[serde(default)]
    pub pokemon: Option<Identifier>,
    #[serde(default)]
    pub forms: Vec<Form>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    #[serde(default)]
    pub form: Option<Identifier>,
    #[serde(default)]
    pub is_costume: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatMove {
    #[serde(default)]
    pub unique_id: Option<Identifier>,
    #[serde(default)]
    pub r#type: Option<String>,
    #[serde(default)]
    pub power: Option<f64>,
    #[serde(default)]
    pub energy_delta: Option<f64>,
    #[serde(default)]
    pub duration_turns: Option<f64>,
}

/// An enum-like identifier that newer dumps may encode as a number.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Integer(i64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => Self(text),
            Raw::Integer(number) => Self(number.to_string()),
        })
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The dex number and species identifier encoded in a template id.
///
/// Matches `V<4 digits>_POKEMON_<rest>`; anything else is not a species template.
pub fn parse_template_id(template_id: &str) -> Option<(pokemon::Id, &str)> {
    let rest = template_id.strip_prefix('V')?;
    let digits = rest.get(..4)?;

    if !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }

    let species = rest[4..].strip_prefix("_POKEMON_")?;

    if species.is_empty() {
        return None;
    }

    Some((pokemon::Id(digits.parse().ok()?), species))
}

/// The whole Game Master dump.
#[derive(Debug, Clone, Default)]
pub struct GameMaster {
    pub records: Vec<Record>,
}

impl GameMaster {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::from_value(value)?))
    }

    /// `(species, form)` pairs declared as cosmetic costumes.
    pub fn costumes(&self) -> BTreeSet<(String, String)> {
        self.records
            .iter()
            .filter_map(|record| record.data.form_settings.as_ref())
            .flat_map(|settings| {
                let pokemon = settings
                    .pokemon
                    .as_ref()
                    .map(Identifier::as_str)
                    .unwrap_or_default();

                settings
                    .forms
                    .iter()
                    .filter(|form| form.is_costume)
                    .filter_map(move |form| {
                        Some((pokemon.to_owned(), form.form.as_ref()?.as_str().to_owned()))
                    })
            })
            .collect()
    }

    pub fn combat_moves(&self) -> impl Iterator<Item = &CombatMove> {
        self.records
            .iter()
            .filter_map(|record| record.data.combat_move.as_ref())
    }

    /// Every species template with its dex number and residual identifier.
    pub fn pokemon(&self) -> impl Iterator<Item = (pokemon::Id, &str, &PokemonSettings)> {
        self.records.iter().filter_map(|record| {
            let settings = record.data.pokemon_settings.as_ref()?;
            let (dex, species) = parse_template_id(&record.template_id)?;

            Some((dex, species, settings))
        })
    }
}
