//! Display names and slugs derived from Game Master identifiers.

/// Form codes ending in one of these suffixes are the default form of a species.
pub const DEFAULT_SUFFIXES: [&str; 3] = ["_NORMAL", "_STANDARD", "_AVERAGE"];

/// Form code used when a species has no form at all.
pub const DEFAULT_FORM: &str = "DEFAULT";

/// Fallback slug for names without a single alphanumeric character.
pub const DEFAULT_SLUG: &str = "pokemon";

const TYPE_PREFIX: &str = "POKEMON_TYPE_";
const TEMP_EVOLUTION_PREFIX: &str = "TEMP_EVOLUTION_";
const FAST_MARKER: &str = "(Fast)";

/// Turns a single underscore-delimited token into its display form.
pub fn clean_token(token: &str) -> String {
    let token = token.trim_matches('_').to_lowercase();

    if token.is_empty() {
        return String::new();
    }

    if let Some(replacement) = special_token(&token) {
        return replacement.to_owned();
    }

    if let Some(stripped) = token.strip_suffix("_form") {
        return clean_token(stripped);
    }

    let token = token.replace("gmax", "G-Max");

    if is_uppercase(&token) {
        return token;
    }

    fix_acronyms(&title_case(&token.replace('-', " ")))
}

fn special_token(token: &str) -> Option<&'static str> {
    Some(match token {
        "alola" => "Alola",
        "alolan" => "Alolan",
        "galar" => "Galar",
        "galarian" => "Galarian",
        "hisui" => "Hisui",
        "hisui_an" => "Hisuian",
        "mega" => "Mega",
        "purified" => "Purified",
        "shadow" => "Shadow",
        "starter_2021" => "Starter 2021",
        "starter_2022" => "Starter 2022",
        "standard" | "normal" | "average" => "",
        "speed" => "Speed",
        "solo" => "Solo",
        _ => return None,
    })
}

/// Whether `form` names the default form of its species.
pub fn is_default_form(form: &str) -> bool {
    form.is_empty()
        || form == DEFAULT_FORM
        || DEFAULT_SUFFIXES.iter().any(|suffix| form.ends_with(suffix))
}

/// The parenthesized label of a form, e.g. `"Alola"` for `PIKACHU_ALOLA`.
///
/// Returns `None` for default forms and for forms that clean down to nothing.
pub fn form_label(pokemon_id: &str, form: Option<&str>) -> Option<String> {
    let form = form?;

    if is_default_form(form) {
        return None;
    }

    let suffix = form.strip_prefix(pokemon_id).unwrap_or(form);

    join_tokens(suffix.trim_matches('_'))
}

/// The label of a temporary evolution, e.g. `"Mega X"` for `TEMP_EVOLUTION_MEGA_X`.
pub fn format_temp_evo(temp_id: &str) -> String {
    join_tokens(&temp_id.replace(TEMP_EVOLUTION_PREFIX, "")).unwrap_or_else(|| "Mega".to_owned())
}

/// The readable name of a species identifier, used when no Pokédex name is known.
pub fn species_name(pokemon_id: &str) -> String {
    join_tokens(pokemon_id).unwrap_or_else(|| title_case(pokemon_id))
}

/// The lowercase name of an elemental type, e.g. `"fire"` for `POKEMON_TYPE_FIRE`.
pub fn type_name(enum_value: Option<&str>) -> Option<String> {
    let value = enum_value.filter(|value| !value.is_empty())?;

    Some(value.replace(TYPE_PREFIX, "").replace('_', " ").to_lowercase())
}

/// A readable move name synthesized from its identifier.
pub fn move_name(move_id: &str) -> String {
    fix_acronyms(&title_case(&move_id.replace("_FAST", "").replace('_', " ")))
}

/// Tags a fast move name with `(Fast)` exactly once.
///
/// Upstream names such as `"Fury Cutter Fast"` lose their trailing word first.
pub fn fast_name(name: &str) -> String {
    let name = name.trim();
    let name = name.strip_suffix(" Fast").unwrap_or(name);

    if name.contains(FAST_MARKER) {
        name.to_owned()
    } else {
        format!("{name} {FAST_MARKER}")
    }
}

/// A URL-safe, lowercase, hyphenated identifier.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for c in text.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }

            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    if slug.is_empty() {
        DEFAULT_SLUG.to_owned()
    } else {
        slug
    }
}

fn join_tokens(text: &str) -> Option<String> {
    let parts: Vec<String> = text
        .split('_')
        .map(clean_token)
        .filter(|part| !part.is_empty())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut previous_is_letter = false;

    for c in text.chars() {
        if previous_is_letter {
            result.extend(c.to_lowercase());
        } else {
            result.extend(c.to_uppercase());
        }

        previous_is_letter = c.is_alphabetic();
    }

    result
}

fn is_uppercase(text: &str) -> bool {
    text.chars().any(char::is_uppercase) && !text.chars().any(char::is_lowercase)
}

fn fix_acronyms(text: &str) -> String {
    text.replace("Hp", "HP").replace("Cp", "CP")
}
