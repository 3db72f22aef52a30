use clap::{Args, Subcommand};

use gamestock_core::{EntityId, Listing, Remote, SyncCoordinator};

use super::entity::{self, fit, DeleteArgs, FieldValues, ListArgs, ShowArgs, Tabular};

#[derive(Args)]
pub struct ListingCommand {
    #[command(subcommand)]
    pub command: ListingSubcommand,
}

#[derive(Args, Default)]
pub struct ListingFields {
    /// Condition: New or Used
    #[arg(long)]
    pub condition: Option<String>,

    /// Units in stock (0-100)
    #[arg(long)]
    pub stock: Option<String>,

    /// Price in dollars
    #[arg(long)]
    pub price: Option<String>,

    /// ID of the game being sold
    #[arg(long)]
    pub game_id: Option<String>,

    /// ID of the selling store
    #[arg(long)]
    pub store_id: Option<String>,
}

impl ListingFields {
    fn values(&self) -> FieldValues<'_> {
        vec![
            ("condition", self.condition.as_deref()),
            ("stock", self.stock.as_deref()),
            ("price", self.price.as_deref()),
            ("game_id", self.game_id.as_deref()),
            ("store_id", self.store_id.as_deref()),
        ]
    }
}

#[derive(Subcommand)]
pub enum ListingSubcommand {
    /// List listings (sort keys: price, stock, condition, game, store)
    List(ListArgs),

    /// Show a listing's details
    Show(ShowArgs),

    /// Create a new listing
    Create(ListingFields),

    /// Update an existing listing; omitted fields keep their values
    Update {
        /// Listing ID
        id: EntityId,

        #[command(flatten)]
        fields: ListingFields,
    },

    /// Delete a listing
    Delete(DeleteArgs),
}

impl ListingCommand {
    pub async fn run<R: Remote>(
        &self,
        coordinator: &SyncCoordinator<R>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ListingSubcommand::List(args) => entity::list::<Listing, R>(coordinator, args).await,
            ListingSubcommand::Show(args) => entity::show::<Listing, R>(coordinator, args).await,
            ListingSubcommand::Create(fields) => {
                entity::create::<Listing, R>(coordinator, fields.values()).await
            }
            ListingSubcommand::Update { id, fields } => {
                entity::update::<Listing, R>(coordinator, *id, fields.values()).await
            }
            ListingSubcommand::Delete(args) => {
                entity::delete::<Listing, R>(coordinator, args).await
            }
        }
    }
}

impl Tabular for Listing {
    fn header() -> String {
        format!(
            "{:<6}  {:<30}  {:<20}  {:<9}  {:>9}  STOCK",
            "ID", "GAME", "STORE", "CONDITION", "PRICE"
        )
    }

    fn row(&self) -> String {
        format!(
            "{:<6}  {}  {}  {:<9}  {:>9}  {}",
            self.id,
            fit(self.game_title(), 30),
            fit(self.store_name(), 20),
            self.condition,
            format!("${:.2}", self.price),
            self.stock
        )
    }

    fn label(&self) -> String {
        format!("{} at {}", self.game_title(), self.store_name())
    }
}
