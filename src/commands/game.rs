use clap::{Args, Subcommand};

use gamestock_core::{EntityId, Game, Remote, SyncCoordinator};

use super::entity::{self, fit, DeleteArgs, FieldValues, ListArgs, ShowArgs, Tabular};

#[derive(Args)]
pub struct GameCommand {
    #[command(subcommand)]
    pub command: GameSubcommand,
}

#[derive(Args, Default)]
pub struct GameFields {
    /// Title (2-60 characters)
    #[arg(long)]
    pub title: Option<String>,

    /// ESRB rating: E, T or M
    #[arg(long)]
    pub rating: Option<String>,

    /// Console: playstation, xbox, pc or "nintendo switch"
    #[arg(long)]
    pub console: Option<String>,

    /// Genre
    #[arg(long)]
    pub genre: Option<String>,

    /// Cover image URL
    #[arg(long)]
    pub image: Option<String>,
}

impl GameFields {
    fn values(&self) -> FieldValues<'_> {
        vec![
            ("title", self.title.as_deref()),
            ("rating", self.rating.as_deref()),
            ("console", self.console.as_deref()),
            ("genre", self.genre.as_deref()),
            ("image", self.image.as_deref()),
        ]
    }
}

#[derive(Subcommand)]
pub enum GameSubcommand {
    /// List games (sort keys: title, genre, console, rating)
    List(ListArgs),

    /// Show a game's details
    Show(ShowArgs),

    /// Create a new game
    Create(GameFields),

    /// Update an existing game; omitted fields keep their values
    Update {
        /// Game ID
        id: EntityId,

        #[command(flatten)]
        fields: GameFields,
    },

    /// Delete a game
    Delete(DeleteArgs),
}

impl GameCommand {
    pub async fn run<R: Remote>(
        &self,
        coordinator: &SyncCoordinator<R>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            GameSubcommand::List(args) => entity::list::<Game, R>(coordinator, args).await,
            GameSubcommand::Show(args) => entity::show::<Game, R>(coordinator, args).await,
            GameSubcommand::Create(fields) => {
                entity::create::<Game, R>(coordinator, fields.values()).await
            }
            GameSubcommand::Update { id, fields } => {
                entity::update::<Game, R>(coordinator, *id, fields.values()).await
            }
            GameSubcommand::Delete(args) => entity::delete::<Game, R>(coordinator, args).await,
        }
    }
}

impl Tabular for Game {
    fn header() -> String {
        format!(
            "{:<6}  {:<30}  {:<6}  {:<16}  GENRE",
            "ID", "TITLE", "RATING", "CONSOLE"
        )
    }

    fn row(&self) -> String {
        format!(
            "{:<6}  {}  {:<6}  {}  {}",
            self.id,
            fit(&self.title, 30),
            self.rating,
            fit(&self.console, 16),
            self.genre
        )
    }

    fn label(&self) -> String {
        self.title.clone()
    }
}
