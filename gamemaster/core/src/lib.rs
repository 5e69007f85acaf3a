mod dataset;
mod map;

pub mod moves;
pub mod name;
pub mod pokedex;
pub mod pokemon;
pub mod pvpoke;
pub mod template;

pub use dataset::{Dataset, Sources, form_key};
pub use map::Map;
pub use moves::Dictionary;
pub use pokedex::Pokedex;
pub use pokemon::Pokemon;
pub use pvpoke::{Rankings, Releases};
pub use template::GameMaster;
