use crate::Map;
use crate::name;
use crate::pokemon;
use crate::template::{CombatMove, GameMaster, Identifier};

use serde::Deserialize;
use std::collections::BTreeMap;

const FAST_SUFFIX: &str = "_FAST";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Category {
    Fast,
    Charged,
}

impl Category {
    /// Fast moves gain energy; everything else spends it.
    pub fn from_energy(energy: f64) -> Self {
        if energy > 0.0 {
            Self::Fast
        } else {
            Self::Charged
        }
    }
}

/// An entry of the move-name dictionary.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    #[serde(default)]
    pub id: Option<Identifier>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub r#type: Option<MoveType>,
    #[serde(default)]
    pub power: Option<f64>,
    #[serde(default)]
    pub energy_delta: Option<f64>,
    /// Milliseconds.
    #[serde(default)]
    pub duration: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MoveType {
    Enum(String),
    Object { id: String },
}

impl MoveType {
    fn as_str(&self) -> &str {
        match self {
            Self::Enum(id) | Self::Object { id } => id,
        }
    }
}

/// A move with its combat metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub id: String,
    pub name: String,
    pub r#type: Option<String>,
    pub category: Category,
    pub power: f64,
    pub energy: f64,
    /// Seconds.
    pub cooldown: Option<f64>,
    pub turns: Option<f64>,
    pub dps: Option<f64>,
    pub eps: Option<f64>,
    pub dpe: Option<f64>,
}

impl Definition {
    /// Builds a definition from a dictionary entry, skipping entries without id or name.
    pub fn from_entry(entry: Entry) -> Option<Self> {
        let id = entry.id?.as_str().to_owned();
        let display = entry.name.filter(|name| !name.trim().is_empty())?;

        Some(Self::new(
            id,
            &display,
            entry.r#type.as_ref().map(MoveType::as_str),
            entry.power.unwrap_or_default(),
            entry.energy_delta.unwrap_or_default(),
            entry.duration.map(|duration| duration / 1000.0),
        ))
    }

    /// Builds a definition from a Game Master combat move, which counts in half-second turns.
    pub fn from_combat_move(combat_move: &CombatMove) -> Option<Self> {
        let id = combat_move.unique_id.as_ref()?.as_str().to_owned();
        let display = name::move_name(&id);

        Some(Self::new(
            id,
            &display,
            combat_move.r#type.as_deref(),
            combat_move.power.unwrap_or_default(),
            combat_move.energy_delta.unwrap_or_default(),
            combat_move.duration_turns.map(|turns| turns * 0.5),
        ))
    }

    fn new(
        id: String,
        display: &str,
        type_: Option<&str>,
        power: f64,
        energy: f64,
        cooldown: Option<f64>,
    ) -> Self {
        let category = Category::from_energy(energy);
        let rate = |amount: f64| {
            cooldown
                .filter(|cooldown| *cooldown > 0.0)
                .map(|cooldown| amount / cooldown)
        };

        Self {
            name: match category {
                Category::Fast => name::fast_name(display),
                Category::Charged => display.trim().to_owned(),
            },
            id,
            r#type: name::type_name(type_),
            category,
            power,
            energy,
            cooldown,
            turns: cooldown.map(|cooldown| cooldown * 2.0),
            dps: rate(power),
            eps: rate(energy),
            dpe: match category {
                Category::Charged if energy != 0.0 => Some(power / energy.abs()),
                _ => None,
            },
        }
    }

    pub fn to_move(&self) -> pokemon::Move {
        pokemon::Move {
            id: self.id.clone(),
            name: self.name.clone(),
            r#type: self.r#type.clone(),
            power: Some(self.power),
            energy: Some(self.energy),
            cooldown: self.cooldown,
            turns: self.turns,
            dps: self.dps,
            eps: self.eps,
            dpe: self.dpe,
        }
    }
}

/// Every known move, keyed by identifier.
#[derive(Debug, Clone)]
pub struct Dictionary {
    definitions: Map<String, Definition>,
}

impl Dictionary {
    /// Builds the dictionary from the move-name dataset, completed with the
    /// Game Master combat moves it lacks.
    pub fn new(entries: Vec<Entry>, game_master: &GameMaster) -> Self {
        let mut definitions = BTreeMap::new();

        for definition in entries.into_iter().filter_map(Definition::from_entry) {
            let _ = definitions
                .entry(definition.id.clone())
                .or_insert(definition);
        }

        let primary = definitions.len();

        for definition in game_master
            .combat_moves()
            .filter_map(Definition::from_combat_move)
        {
            let _ = definitions
                .entry(definition.id.clone())
                .or_insert(definition);
        }

        log::info!(
            "Loaded {primary} move definitions ({} more from combat moves)",
            definitions.len() - primary
        );

        Self::from_definitions(definitions.into_values())
    }

    pub fn from_definitions(definitions: impl IntoIterator<Item = Definition>) -> Self {
        let definitions: Vec<_> = definitions.into_iter().collect();

        Self {
            definitions: Map::new(definitions, |definition| definition.id.clone()),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Definition> {
        self.definitions.get(id)
    }

    /// Looks a move up, tolerating case and a `_FAST` suffix mismatch.
    ///
    /// A suffix-tolerant match must belong to `category`; exact matches always do.
    pub fn find(&self, id: &str, category: Category) -> Option<&Definition> {
        let upper = id.to_uppercase();

        if let Some(definition) = self.get(id).or_else(|| self.get(&upper)) {
            return Some(definition);
        }

        let stripped = upper.strip_suffix(FAST_SUFFIX).unwrap_or(&upper);

        [format!("{stripped}{FAST_SUFFIX}"), stripped.to_owned()]
            .iter()
            .filter_map(|candidate| self.get(candidate))
            .find(|definition| definition.category == category)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolves move identifiers to output moves, de-duplicated and sorted by name.
    pub fn format<'a>(
        &self,
        ids: impl IntoIterator<Item = &'a str>,
        category: Category,
    ) -> Vec<pokemon::Move> {
        let mut moves: BTreeMap<String, pokemon::Move> = BTreeMap::new();

        for id in ids.into_iter().filter(|id| !id.is_empty()) {
            let move_ = match self.find(id, category) {
                Some(definition) => definition.to_move(),
                None => synthesize(id, category),
            };

            let _ = moves.entry(move_.id.clone()).or_insert(move_);
        }

        let mut moves: Vec<_> = moves.into_values().collect();
        moves.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        moves
    }

    /// The identifier a third-party move id should be stored under.
    pub fn canonical_id(&self, id: &str, category: Category) -> String {
        if let Some(definition) = self.find(id, category) {
            return definition.id.clone();
        }

        let upper = id.to_uppercase();

        match category {
            Category::Fast if !upper.ends_with(FAST_SUFFIX) => format!("{upper}{FAST_SUFFIX}"),
            _ => upper,
        }
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::from_definitions([])
    }
}

/// Whether two identifiers from different sources name the same move.
pub fn same_move(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

fn normalize(id: &str) -> String {
    let upper = id.trim().to_uppercase();

    match upper.strip_suffix(FAST_SUFFIX) {
        Some(stripped) => stripped.to_owned(),
        None => upper,
    }
}

fn synthesize(id: &str, category: Category) -> pokemon::Move {
    let display = name::move_name(id);

    pokemon::Move {
        id: id.to_owned(),
        name: match category {
            Category::Fast => name::fast_name(&display),
            Category::Charged => display,
        },
        r#type: None,
        power: None,
        energy: None,
        cooldown: None,
        turns: None,
        dps: None,
        eps: None,
        dpe: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    fn entries() -> Vec<Entry> {
        serde_json::from_value(json!([
            {
                "id": "FURY_CUTTER_FAST",
                "name": "Fury Cutter Fast",
                "type": { "id": "POKEMON_TYPE_BUG", "name": "Bug" },
                "power": 3,
                "energyDelta": 6,
                "duration": 400
            },
            {
                "id": "FLAMETHROWER",
                "name": "Flamethrower",
                "type": "POKEMON_TYPE_FIRE",
                "power": 70,
                "energyDelta": -50,
                "duration": 2200
            },
            {
                "id": "SPLASH_FAST",
                "name": "Splash",
                "type": "POKEMON_TYPE_WATER",
                "energyDelta": 20,
                "duration": 1730
            },
            {
                "id": "TRANSFORM_FAST",
                "name": "Transform"
            },
            { "id": "NAMELESS" }
        ]))
        .unwrap()
    }

    fn dictionary() -> Dictionary {
        Dictionary::new(entries(), &GameMaster::default())
    }

    #[test]
    fn categories_follow_energy() {
        let dictionary = dictionary();

        assert_eq!(dictionary.get("FURY_CUTTER_FAST").unwrap().category, Category::Fast);
        assert_eq!(dictionary.get("FLAMETHROWER").unwrap().category, Category::Charged);
        assert_eq!(dictionary.get("TRANSFORM_FAST").unwrap().category, Category::Charged);
        assert!(dictionary.get("NAMELESS").is_none());
    }

    #[test]
    fn fast_metrics_are_derived() {
        let dictionary = dictionary();
        let fury_cutter = dictionary.get("FURY_CUTTER_FAST").unwrap();

        assert_eq!(fury_cutter.name, "Fury Cutter (Fast)");
        assert_eq!(fury_cutter.r#type.as_deref(), Some("bug"));
        assert_eq!(fury_cutter.cooldown, Some(0.4));
        assert_eq!(fury_cutter.turns, Some(0.8));
        assert!((fury_cutter.dps.unwrap() - 7.5).abs() < 1e-9);
        assert!((fury_cutter.eps.unwrap() - 15.0).abs() < 1e-9);
        assert_eq!(fury_cutter.dpe, None);
    }

    #[test]
    fn charged_metrics_are_derived() {
        let dictionary = dictionary();
        let flamethrower = dictionary.get("FLAMETHROWER").unwrap();

        assert_eq!(flamethrower.name, "Flamethrower");
        assert_eq!(flamethrower.r#type.as_deref(), Some("fire"));
        assert_eq!(flamethrower.dpe, Some(1.4));
        assert!(flamethrower.eps.unwrap() < 0.0);
    }

    #[test]
    fn missing_duration_leaves_rates_undefined() {
        let dictionary = dictionary();
        let transform = dictionary.get("TRANSFORM_FAST").unwrap();

        assert_eq!(transform.cooldown, None);
        assert_eq!(transform.turns, None);
        assert_eq!(transform.dps, None);
        assert_eq!(transform.eps, None);
        assert_eq!(transform.dpe, None);
    }

    #[test]
    fn damage_per_energy_only_for_charged_moves() {
        for definition in dictionary().definitions.values() {
            assert_eq!(definition.category == Category::Fast, definition.energy > 0.0);

            if definition.dpe.is_some() {
                assert_eq!(definition.category, Category::Charged);
                assert_ne!(definition.energy, 0.0);
            }
        }
    }

    #[test]
    fn combat_moves_fill_gaps() {
        let game_master = GameMaster::from_value(json!([
            {
                "templateId": "COMBAT_V0250_MOVE_VOLT_SWITCH_FAST",
                "data": {
                    "combatMove": {
                        "uniqueId": "VOLT_SWITCH_FAST",
                        "type": "POKEMON_TYPE_ELECTRIC",
                        "power": 12,
                        "durationTurns": 4,
                        "energyDelta": 16
                    }
                }
            },
            {
                "templateId": "COMBAT_V0083_MOVE_FLAMETHROWER",
                "data": {
                    "combatMove": {
                        "uniqueId": "FLAMETHROWER",
                        "power": 90,
                        "energyDelta": -55
                    }
                }
            }
        ]))
        .unwrap();

        let dictionary = Dictionary::new(entries(), &game_master);
        let volt_switch = dictionary.get("VOLT_SWITCH_FAST").unwrap();

        assert_eq!(volt_switch.name, "Volt Switch (Fast)");
        assert_eq!(volt_switch.cooldown, Some(2.0));
        assert_eq!(volt_switch.turns, Some(4.0));
        assert_eq!(volt_switch.dps, Some(6.0));
        assert_eq!(volt_switch.eps, Some(8.0));

        assert_eq!(dictionary.get("FLAMETHROWER").unwrap().power, 70.0);
    }

    #[test]
    fn lookups_tolerate_case_and_fast_suffix() {
        let dictionary = dictionary();

        assert_eq!(
            dictionary.find("fury_cutter", Category::Fast).unwrap().id,
            "FURY_CUTTER_FAST"
        );
        assert_eq!(
            dictionary.find("FURY_CUTTER", Category::Fast).unwrap().id,
            "FURY_CUTTER_FAST"
        );
        assert_eq!(
            dictionary.find("flamethrower", Category::Charged).unwrap().id,
            "FLAMETHROWER"
        );
        assert!(dictionary.find("HYDRO_PUMP", Category::Charged).is_none());

        assert_eq!(
            dictionary.canonical_id("fury_cutter", Category::Fast),
            "FURY_CUTTER_FAST"
        );
        assert_eq!(
            dictionary.canonical_id("counter", Category::Fast),
            "COUNTER_FAST"
        );
        assert_eq!(
            dictionary.canonical_id("hydro_pump", Category::Charged),
            "HYDRO_PUMP"
        );

        assert!(same_move("counter", "COUNTER_FAST"));
        assert!(!same_move("COUNTER", "CROSS_CHOP"));
    }

    #[test]
    fn suffix_matches_respect_category() {
        let dictionary = dictionary();

        assert!(dictionary.find("FURY_CUTTER", Category::Charged).is_none());
        assert!(dictionary.find("FLAMETHROWER_FAST", Category::Fast).is_none());
        assert_eq!(
            dictionary.find("TRANSFORM_FAST", Category::Fast).unwrap().id,
            "TRANSFORM_FAST"
        );
        assert_eq!(
            dictionary.canonical_id("fury_cutter", Category::Charged),
            "FURY_CUTTER"
        );
    }

    #[test]
    fn formatting_deduplicates_and_sorts() {
        let dictionary = dictionary();
        let moves = dictionary.format(
            ["SPLASH_FAST", "FURY_CUTTER_FAST", "SPLASH_FAST", "MUD_SHOT_FAST", ""],
            Category::Fast,
        );

        let names: Vec<_> = moves.iter().map(|move_| move_.name.as_str()).collect();

        assert_eq!(
            names,
            ["Fury Cutter (Fast)", "Mud Shot (Fast)", "Splash (Fast)"]
        );
        assert_eq!(moves[1].power, None);
        assert_eq!(moves[2].dps, Some(0.0));
    }
}
