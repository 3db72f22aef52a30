//! Command flows shared by the game, store and listing commands.
//!
//! Mutating commands drive the core the way an interactive view would:
//! load the collections, open a form, change the given fields, submit.

use clap::Args;
use std::cell::RefCell;
use std::fmt::Display;
use std::io::{self, Write};

use gamestock_core::{
    project, Entity, EntityId, EntityKind, Filter, FormController, Remote, SubmitError,
    SyncCoordinator,
};

use super::OutputFormat;

/// Table rendering for `list`.
pub trait Tabular: Entity + Display {
    fn header() -> String;

    fn row(&self) -> String;

    /// Short name used in confirmations.
    fn label(&self) -> String;
}

#[derive(Args)]
pub struct ListArgs {
    /// Sort key (unknown keys keep server order)
    #[arg(long, short)]
    pub sort: Option<String>,

    /// Filter: all, under30, over30, FIELD<N or FIELD>=N
    #[arg(long, default_value = "all")]
    pub filter: Filter,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct ShowArgs {
    pub id: EntityId,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct DeleteArgs {
    pub id: EntityId,

    /// Skip confirmation prompt
    #[arg(long, short)]
    pub force: bool,
}

/// Field name and the value given on the command line, if any.
pub type FieldValues<'a> = Vec<(&'static str, Option<&'a str>)>;

type CommandResult = Result<(), Box<dyn std::error::Error>>;

pub async fn list<E: Tabular, R: Remote>(
    coordinator: &SyncCoordinator<R>,
    args: &ListArgs,
) -> CommandResult {
    coordinator.activate(E::KIND).await?;

    let catalog = coordinator.catalog();
    let sort = args.sort.as_deref().unwrap_or("");
    let view = project(E::collection(&catalog).snapshot(), sort, &args.filter);

    if view.is_empty() {
        println!("No {} found", E::KIND);
        return Ok(());
    }

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        OutputFormat::Text => {
            let header = E::header();
            println!("{}", header);
            println!("{}", "-".repeat(header.len()));
            for entity in &view {
                println!("{}", entity.row());
            }
            println!("\nTotal: {} {}(s)", view.len(), E::KIND.singular());
        }
    }
    Ok(())
}

pub async fn show<E: Tabular, R: Remote>(
    coordinator: &SyncCoordinator<R>,
    args: &ShowArgs,
) -> CommandResult {
    let entity = fetch::<E, R>(coordinator, args.id).await?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entity)?),
        OutputFormat::Text => println!("{}", entity),
    }
    Ok(())
}

pub async fn create<E: Tabular, R: Remote>(
    coordinator: &SyncCoordinator<R>,
    fields: FieldValues<'_>,
) -> CommandResult {
    activate_for_form(coordinator, E::KIND).await?;

    let form = RefCell::new(FormController::new(E::KIND));
    {
        let mut form = form.borrow_mut();
        form.start_create();
        apply_fields(&mut form, &fields);
    }

    let created: E = submit(coordinator, &form).await?;
    println!("Created {}:", E::KIND.singular());
    println!("{}", created);
    Ok(())
}

pub async fn update<E: Tabular, R: Remote>(
    coordinator: &SyncCoordinator<R>,
    id: EntityId,
    fields: FieldValues<'_>,
) -> CommandResult {
    activate_for_form(coordinator, E::KIND).await?;

    let entity = E::collection(&coordinator.catalog())
        .get(id)
        .cloned()
        .ok_or_else(|| not_found(E::KIND, id))?;

    let form = RefCell::new(FormController::new(E::KIND));
    {
        let mut form = form.borrow_mut();
        form.start_edit(&entity);
        apply_fields(&mut form, &fields);
    }

    let updated: E = submit(coordinator, &form).await?;
    println!("Updated {}:", E::KIND.singular());
    println!("{}", updated);
    Ok(())
}

pub async fn delete<E: Tabular, R: Remote>(
    coordinator: &SyncCoordinator<R>,
    args: &DeleteArgs,
) -> CommandResult {
    let entity = fetch::<E, R>(coordinator, args.id).await?;

    if !args.force {
        print!("Delete {} '{}'? [y/N] ", E::KIND.singular(), entity.label());
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    coordinator.remove::<E>(args.id).await?;
    println!("Deleted {}: {}", E::KIND.singular(), entity.label());
    Ok(())
}

async fn fetch<E: Tabular, R: Remote>(
    coordinator: &SyncCoordinator<R>,
    id: EntityId,
) -> Result<E, Box<dyn std::error::Error>> {
    coordinator.activate(E::KIND).await?;
    let catalog = coordinator.catalog();
    E::collection(&catalog)
        .get(id)
        .cloned()
        .ok_or_else(|| not_found(E::KIND, id))
}

/// Listing forms check their game and store references, so those
/// collections are loaded too.
async fn activate_for_form<R: Remote>(
    coordinator: &SyncCoordinator<R>,
    kind: EntityKind,
) -> Result<(), Box<dyn std::error::Error>> {
    match kind {
        EntityKind::Listings => coordinator.activate_all().await?,
        kind => {
            coordinator.activate(kind).await?;
        }
    }
    Ok(())
}

fn apply_fields(form: &mut FormController, fields: &FieldValues<'_>) {
    for (name, value) in fields {
        if let Some(value) = value {
            form.change_field(name, *value);
        }
    }
}

async fn submit<E: Tabular, R: Remote>(
    coordinator: &SyncCoordinator<R>,
    form: &RefCell<FormController>,
) -> Result<E, Box<dyn std::error::Error>> {
    match coordinator.submit::<E>(form).await {
        Ok(entity) => Ok(entity),
        Err(SubmitError::Invalid(_)) => {
            let form = form.borrow();
            let errors = form.visible_errors(&coordinator.catalog());
            eprintln!("Invalid {}:", E::KIND.singular());
            for (field, message) in errors.iter() {
                eprintln!("  {}: {}", field, message);
            }
            Err(format!("{} was not saved", E::KIND.singular()).into())
        }
        Err(SubmitError::Pristine) => {
            Err("Nothing to update. Provide at least one option.".into())
        }
        Err(SubmitError::Sync(err)) => {
            let message = form
                .borrow()
                .state()
                .last_error
                .clone()
                .unwrap_or_else(|| err.user_message());
            Err(format!("{} ({})", message, err).into())
        }
        Err(err) => Err(err.into()),
    }
}

fn not_found(kind: EntityKind, id: EntityId) -> Box<dyn std::error::Error> {
    format!("{} not found: {}", capitalize(kind.singular()), id).into()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Pads or cuts `text` to exactly `width` characters.
pub fn fit(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let cut: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", cut)
    } else {
        format!("{:<width$}", text, width = width)
    }
}
