mod config_cmd;
mod entity;
mod game;
mod listing;
mod store;

use clap::ValueEnum;

pub use config_cmd::ConfigCommand;
pub use game::GameCommand;
pub use listing::ListingCommand;
pub use store::StoreCommand;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
