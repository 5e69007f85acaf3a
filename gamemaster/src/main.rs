use gamemaster::{CONFIG_PATH, Config, Source};

use std::env;
use std::path::PathBuf;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), anywho::Error> {
    tracing_subscriber::fmt::init();

    let config = Config::load(CONFIG_PATH).await?;
    let mut args = env::args().skip(1);

    let source = Source::parse(&args.next().unwrap_or_else(|| config.game_master.clone()));
    let output = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| config.output.clone());

    let dataset = gamemaster::build(&config, &source).await?;
    gamemaster::save(&dataset, &output).await?;

    Ok(())
}
