pub use gamemaster_core::*;

pub mod session;
pub mod source;

mod config;
mod error;
mod output;
mod pipeline;

pub use config::{CONFIG_PATH, Config, RankingFeed};
pub use error::Error;
pub use output::save;
pub use pipeline::build;
pub use source::Source;
