use gamemaster::pokemon::{Bracket, Pokemon};
use gamemaster::{Config, Dataset, RankingFeed, Source};

use serde_json::{Value, json};
use std::fs;
use std::path::Path;

fn write(path: &Path, value: Value) {
    fs::write(path, serde_json::to_vec(&value).unwrap()).unwrap();
}

fn game_master() -> Value {
    json!([
        {
            "templateId": "V0068_POKEMON_MACHAMP",
            "data": {
                "pokemonSettings": {
                    "pokemonId": "MACHAMP",
                    "type": "POKEMON_TYPE_FIGHTING",
                    "stats": { "baseStamina": 207, "baseAttack": 234, "baseDefense": 159 },
                    "quickMoves": ["COUNTER_FAST", "KARATE_CHOP_FAST"],
                    "cinematicMoves": ["CROSS_CHOP", "ROCK_SLIDE"]
                }
            }
        },
        {
            "templateId": "V0132_POKEMON_DITTO",
            "data": {
                "pokemonSettings": {
                    "pokemonId": "DITTO",
                    "type": "POKEMON_TYPE_NORMAL",
                    "stats": { "baseStamina": 134, "baseAttack": 91, "baseDefense": 91 },
                    "quickMoves": ["TRANSFORM_FAST"],
                    "cinematicMoves": ["STRUGGLE"],
                    "isTransferable": false
                }
            }
        },
        {
            "templateId": "COMBAT_V0133_MOVE_STRUGGLE",
            "data": {
                "combatMove": {
                    "uniqueId": "STRUGGLE",
                    "type": "POKEMON_TYPE_NORMAL",
                    "power": 35,
                    "energyDelta": -33,
                    "durationTurns": 1
                }
            }
        }
    ])
}

fn moves() -> Value {
    json!([
        { "id": "COUNTER_FAST", "name": "Counter Fast", "type": "POKEMON_TYPE_FIGHTING",
          "power": 12, "energyDelta": 8, "duration": 900 },
        { "id": "KARATE_CHOP_FAST", "name": "Karate Chop Fast", "type": "POKEMON_TYPE_FIGHTING",
          "power": 8, "energyDelta": 10, "duration": 800 },
        { "id": "CROSS_CHOP", "name": "Cross Chop", "type": "POKEMON_TYPE_FIGHTING",
          "power": 50, "energyDelta": -35, "duration": 1500 },
        { "id": "ROCK_SLIDE", "name": "Rock Slide", "type": "POKEMON_TYPE_ROCK",
          "power": 65, "energyDelta": -45, "duration": 2700 }
    ])
}

fn config(root: &Path) -> Config {
    write(&root.join("move.json"), moves());

    Config {
        game_master: String::new(),
        moves: root.join("move.json").display().to_string(),
        releases: None,
        rankings: Vec::new(),
        default_bracket: Bracket::Great,
        pokedex: root.join("pokedex.json"),
        output: root.join("out/pokemon.min.json"),
        release_overrides: vec!["ditto".to_owned()],
    }
}

fn entry<'a>(dataset: &'a Dataset, slug: &str) -> &'a Pokemon {
    dataset
        .pokemon
        .iter()
        .find(|pokemon| pokemon.slug == slug)
        .unwrap()
}

#[tokio::test]
async fn local_sources_build_a_dataset() {
    let root = tempfile::tempdir().unwrap();
    let config = config(root.path());

    write(&root.path().join("latest.json"), game_master());
    write(
        &root.path().join("pokedex.json"),
        json!([{ "id": 68, "name": { "english": "Machamp" } }]),
    );

    let dataset = gamemaster::build(&config, &Source::Local(root.path().to_owned()))
        .await
        .unwrap();

    let slugs: Vec<_> = dataset.pokemon.iter().map(|pokemon| pokemon.slug.as_str()).collect();
    assert_eq!(slugs, ["machamp", "ditto"]);

    let machamp = entry(&dataset, "machamp");
    assert_eq!(machamp.types, ["fighting"]);
    assert!(machamp.released);

    let ditto = entry(&dataset, "ditto");
    assert!(ditto.released);
    assert_eq!(ditto.moves.fast[0].id, "TRANSFORM_FAST");
    assert_eq!(ditto.moves.fast[0].name, "Transform (Fast)");
    assert_eq!(ditto.moves.charged[0].name, "Struggle");
    assert_eq!(ditto.moves.charged[0].power, Some(35.0));
}

#[tokio::test]
async fn unreachable_rankings_only_degrade() {
    let root = tempfile::tempdir().unwrap();
    let config = Config {
        releases: Some("http://127.0.0.1:1/pokemon.json".to_owned()),
        rankings: vec![RankingFeed {
            bracket: Some(Bracket::Great),
            source: "http://127.0.0.1:1/rankings-1500.json".to_owned(),
        }],
        ..config(root.path())
    };

    write(&root.path().join("latest.json"), game_master());

    let dataset = gamemaster::build(&config, &Source::Local(root.path().join("latest.json")))
        .await
        .unwrap();

    assert_eq!(dataset.len(), 2);
    assert!(
        dataset
            .pokemon
            .iter()
            .all(|pokemon| pokemon.moves.recommended.is_none())
    );
}

#[tokio::test]
async fn malformed_optional_sources_only_degrade() {
    let root = tempfile::tempdir().unwrap();
    let releases = root.path().join("pokemon.json");
    let rankings = root.path().join("rankings-1500.json");

    write(&root.path().join("latest.json"), game_master());
    fs::write(&releases, "{ \"pokemon\": [").unwrap();
    fs::write(&rankings, "not json").unwrap();
    fs::write(root.path().join("pokedex.json"), "[{ \"id\": ").unwrap();

    let config = Config {
        releases: Some(releases.display().to_string()),
        rankings: vec![RankingFeed {
            bracket: None,
            source: rankings.display().to_string(),
        }],
        ..config(root.path())
    };

    let dataset = gamemaster::build(&config, &Source::Local(root.path().to_owned()))
        .await
        .unwrap();

    assert_eq!(dataset.len(), 2);
    assert_eq!(entry(&dataset, "machamp").name, "Machamp");
    assert!(
        dataset
            .pokemon
            .iter()
            .all(|pokemon| pokemon.moves.recommended.is_none())
    );
}

#[tokio::test]
async fn a_malformed_move_dictionary_is_fatal() {
    let root = tempfile::tempdir().unwrap();
    let config = config(root.path());

    write(&root.path().join("latest.json"), game_master());
    fs::write(root.path().join("move.json"), "[{ \"id\": ").unwrap();

    let result = gamemaster::build(&config, &Source::Local(root.path().to_owned())).await;

    assert!(matches!(result, Err(gamemaster::Error::Parse { .. })));
}

#[tokio::test]
async fn local_rankings_recommend_movesets() {
    let root = tempfile::tempdir().unwrap();
    let rankings = root.path().join("rankings-1500.json");

    write(&root.path().join("latest.json"), game_master());
    write(
        &rankings,
        json!([{ "speciesId": "machamp", "moveset": ["COUNTER", "CROSS_CHOP", "ROCK_SLIDE"] }]),
    );

    let config = Config {
        rankings: vec![RankingFeed {
            bracket: Some(Bracket::Great),
            source: rankings.display().to_string(),
        }],
        ..config(root.path())
    };

    let dataset = gamemaster::build(&config, &Source::Local(root.path().to_owned()))
        .await
        .unwrap();

    let recommended = entry(&dataset, "machamp").moves.recommended.as_ref().unwrap();

    assert_eq!(recommended.league, Some(Bracket::Great));
    assert_eq!(recommended.fast.as_deref(), Some("Counter (Fast)"));
    assert_eq!(recommended.charged, ["Cross Chop", "Rock Slide"]);
}

#[tokio::test]
async fn a_missing_game_master_is_fatal() {
    let root = tempfile::tempdir().unwrap();
    let config = config(root.path());

    let result = gamemaster::build(&config, &Source::Local(root.path().join("latest.json"))).await;

    assert!(matches!(result, Err(gamemaster::Error::NotFound(_))));
}

#[tokio::test]
async fn saved_datasets_read_back_identically() {
    let root = tempfile::tempdir().unwrap();
    let config = config(root.path());

    write(&root.path().join("latest.json"), game_master());

    let dataset = gamemaster::build(&config, &Source::Local(root.path().to_owned()))
        .await
        .unwrap();

    gamemaster::save(&dataset, &config.output).await.unwrap();

    let bytes = fs::read(&config.output).unwrap();
    let saved: Dataset = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(saved.len(), dataset.len());
    assert_eq!(serde_json::to_vec(&saved).unwrap(), bytes);
    assert!(!bytes.contains(&b'\n'));
    assert!(!config.output.with_extension("json.tmp").exists());

    let first: Value = serde_json::from_slice(&bytes).unwrap();
    let keys: Vec<_> = first[0].as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys.len(), 7);
}
