use clap::{Args, Subcommand};

use gamestock_core::{EntityId, Remote, Store, SyncCoordinator};

use super::entity::{self, fit, DeleteArgs, FieldValues, ListArgs, ShowArgs, Tabular};

#[derive(Args)]
pub struct StoreCommand {
    #[command(subcommand)]
    pub command: StoreSubcommand,
}

#[derive(Args, Default)]
pub struct StoreFields {
    /// Store name
    #[arg(long)]
    pub name: Option<String>,

    /// Street address, including a street number
    #[arg(long)]
    pub location: Option<String>,

    /// Opening hours, e.g. "9:00 - 21:00"
    #[arg(long)]
    pub hours: Option<String>,
}

impl StoreFields {
    fn values(&self) -> FieldValues<'_> {
        vec![
            ("name", self.name.as_deref()),
            ("location", self.location.as_deref()),
            ("hours", self.hours.as_deref()),
        ]
    }
}

#[derive(Subcommand)]
pub enum StoreSubcommand {
    /// List stores (sort keys: name, location)
    List(ListArgs),

    /// Show a store's details
    Show(ShowArgs),

    /// Create a new store
    Create(StoreFields),

    /// Update an existing store; omitted fields keep their values
    Update {
        /// Store ID
        id: EntityId,

        #[command(flatten)]
        fields: StoreFields,
    },

    /// Delete a store
    Delete(DeleteArgs),
}

impl StoreCommand {
    pub async fn run<R: Remote>(
        &self,
        coordinator: &SyncCoordinator<R>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            StoreSubcommand::List(args) => entity::list::<Store, R>(coordinator, args).await,
            StoreSubcommand::Show(args) => entity::show::<Store, R>(coordinator, args).await,
            StoreSubcommand::Create(fields) => {
                entity::create::<Store, R>(coordinator, fields.values()).await
            }
            StoreSubcommand::Update { id, fields } => {
                entity::update::<Store, R>(coordinator, *id, fields.values()).await
            }
            StoreSubcommand::Delete(args) => entity::delete::<Store, R>(coordinator, args).await,
        }
    }
}

impl Tabular for Store {
    fn header() -> String {
        format!("{:<6}  {:<24}  {:<32}  HOURS", "ID", "NAME", "LOCATION")
    }

    fn row(&self) -> String {
        format!(
            "{:<6}  {}  {}  {}",
            self.id,
            fit(&self.name, 24),
            fit(&self.location, 32),
            self.hours
        )
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}
