use crate::pokemon;

use serde::Deserialize;
use std::collections::BTreeMap;

/// English species names by dex number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pokedex(BTreeMap<pokemon::Id, String>);

#[derive(Debug, Clone, Deserialize)]
pub struct Row {
    pub id: u32,
    #[serde(default)]
    pub name: Names,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Names {
    #[serde(default)]
    pub english: Option<String>,
}

impl Pokedex {
    pub fn new(rows: impl IntoIterator<Item = Row>) -> Self {
        Self(
            rows.into_iter()
                .filter_map(|row| {
                    let name = row.name.english.filter(|name| !name.is_empty())?;

                    Some((pokemon::Id(row.id), name))
                })
                .collect(),
        )
    }

    pub fn name(&self, id: pokemon::Id) -> Option<&str> {
        self.0.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
