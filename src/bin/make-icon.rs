use std::path::Path;

fn main() -> Result<(), anywho::Error> {
    tracing_subscriber::fmt::init();

    godex::icon::save(Path::new("."))?;

    Ok(())
}
