use godex::sprites;

use std::env;
use std::path::PathBuf;
use std::process;

fn main() -> Result<(), anywho::Error> {
    tracing_subscriber::fmt::init();

    let mut args = env::args().skip(1);

    let Some(root) = args.next().map(PathBuf::from) else {
        eprintln!("usage: collect-sprites <PokeAPI sprites checkout or its sprites folder> [output]");
        process::exit(2);
    };

    let output = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("sprites"));

    if !root.exists() {
        return Err(sprites::Error::SpritesNotFound(root).into());
    }

    let summary = sprites::collect(&root, &output)?;

    log::info!("Wrote {} sprites to {}", summary.written, output.display());

    Ok(())
}
