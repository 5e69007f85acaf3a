use crate::moves::{self, Category};
use crate::name;
use crate::pokemon::{self, Moves, Pokemon, Stats};
use crate::pvpoke::{self, Rankings, Releases};
use crate::template::{self, GameMaster, Identifier};
use crate::Pokedex;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// The flattened list of every species variant.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    pub pokemon: Vec<Pokemon>,
}

/// Everything the Game Master is cross-referenced with.
#[derive(Debug, Clone, Default)]
pub struct Sources {
    pub moves: moves::Dictionary,
    pub pokedex: Pokedex,
    pub releases: Releases,
    pub rankings: Rankings,
    /// Slugs always flagged as released.
    pub release_overrides: BTreeSet<String>,
}

impl Dataset {
    pub fn generate(game_master: &GameMaster, sources: &Sources) -> Self {
        let costumes = game_master.costumes();

        let mut builder = Builder {
            sources,
            seen: BTreeSet::new(),
            pokemon: Vec::new(),
        };

        for (dex, species, settings) in game_master.pokemon() {
            let pokemon_id = settings
                .pokemon_id
                .as_ref()
                .map(Identifier::as_str)
                .unwrap_or(species);

            let form = settings.form();

            if let Some(form) = form {
                if costumes.contains(&(pokemon_id.to_owned(), form.to_owned())) {
                    log::debug!("Skipping costume {form} of {dex}");
                    continue;
                }
            }

            let base_name = sources
                .pokedex
                .name(dex)
                .map(str::to_owned)
                .unwrap_or_else(|| name::species_name(pokemon_id));

            let types = types([settings.r#type.as_deref(), settings.type2.as_deref()]);
            let fast: Vec<&str> = settings.fast_moves().collect();
            let charged: Vec<&str> = settings.charged_moves().collect();

            builder.add(Variant {
                dex,
                base_name: &base_name,
                label: name::form_label(pokemon_id, form),
                key: form_key(form),
                types: types.clone(),
                stats: settings.stats,
                fast: &fast,
                charged: &charged,
                availability: settings.is_available(),
            });

            for temp_evo in &settings.temp_evo_overrides {
                let Some(temp_id) = temp_evo
                    .temp_evo_id
                    .as_ref()
                    .map(Identifier::as_str)
                    .filter(|id| !id.is_empty())
                else {
                    continue;
                };

                let override_types = self::types([
                    temp_evo.type_override1.as_deref(),
                    temp_evo.type_override2.as_deref(),
                ]);

                builder.add(Variant {
                    dex,
                    base_name: &base_name,
                    label: Some(name::format_temp_evo(temp_id)),
                    key: temp_id.to_owned(),
                    types: if override_types.is_empty() {
                        types.clone()
                    } else {
                        override_types
                    },
                    stats: temp_evo.stats.unwrap_or(settings.stats),
                    fast: &fast,
                    charged: &charged,
                    availability: settings.is_available(),
                });
            }
        }

        builder.finish()
    }

    pub fn len(&self) -> usize {
        self.pokemon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pokemon.is_empty()
    }
}

impl fmt::Debug for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dataset")
            .field("pokemon", &self.pokemon.len())
            .finish()
    }
}

/// The form key of a variant; every default form shares one.
pub fn form_key(form: Option<&str>) -> String {
    match form {
        Some(form) if !name::is_default_form(form) => form.to_owned(),
        _ => name::DEFAULT_FORM.to_owned(),
    }
}

fn types<'a>(codes: impl IntoIterator<Item = Option<&'a str>>) -> Vec<String> {
    let mut types = Vec::new();

    for type_ in codes.into_iter().filter_map(name::type_name) {
        if !type_.is_empty() && !types.contains(&type_) {
            types.push(type_);
        }
    }

    types
}

struct Variant<'a> {
    dex: pokemon::Id,
    base_name: &'a str,
    label: Option<String>,
    key: String,
    types: Vec<String>,
    stats: template::Stats,
    fast: &'a [&'a str],
    charged: &'a [&'a str],
    availability: Option<bool>,
}

struct Builder<'a> {
    sources: &'a Sources,
    seen: BTreeSet<(pokemon::Id, String)>,
    pokemon: Vec<Pokemon>,
}

impl Builder<'_> {
    fn add(&mut self, variant: Variant<'_>) {
        if !self.seen.insert((variant.dex, variant.key.clone())) {
            log::debug!("Skipping duplicate {} of {}", variant.key, variant.dex);
            return;
        }

        let display = match &variant.label {
            Some(label) => format!("{} ({label})", variant.base_name),
            None => variant.base_name.to_owned(),
        };

        let slug = name::slugify(&display);
        let release = self.sources.releases.get(&slug);
        let dictionary = &self.sources.moves;

        let mut fast_ids: Vec<String> = variant.fast.iter().map(|id| (*id).to_owned()).collect();
        let mut charged_ids: Vec<String> =
            variant.charged.iter().map(|id| (*id).to_owned()).collect();

        if let Some(release) = release {
            let fast_extra =
                pvpoke::missing_moves(&fast_ids, &release.fast_moves, Category::Fast, dictionary);
            let charged_extra = pvpoke::missing_moves(
                &charged_ids,
                &release.charged_moves,
                Category::Charged,
                dictionary,
            );

            fast_ids.extend(fast_extra);
            charged_ids.extend(charged_extra);
        }

        let fast = dictionary.format(fast_ids.iter().map(String::as_str), Category::Fast);
        let charged = dictionary.format(charged_ids.iter().map(String::as_str), Category::Charged);
        let recommended = self.sources.rankings.recommend(&slug, &fast, &charged);

        let released = if self.sources.release_overrides.contains(&slug) {
            true
        } else if let Some(released) = release.and_then(|release| release.released) {
            released
        } else {
            variant.availability.unwrap_or(true)
        };

        self.pokemon.push(Pokemon {
            dex: variant.dex,
            name: display,
            slug,
            types: variant.types,
            stats: Stats {
                attack: variant.stats.base_attack,
                defense: variant.stats.base_defense,
                stamina: variant.stats.base_stamina,
            },
            moves: Moves {
                fast,
                charged,
                recommended,
            },
            released,
        });
    }

    fn finish(self) -> Dataset {
        let mut pokemon = self.pokemon;

        pokemon.sort_by(|a, b| a.dex.cmp(&b.dex).then_with(|| a.name.cmp(&b.name)));

        log::info!("Converted {} entries", pokemon.len());

        Dataset { pokemon }
    }
}
