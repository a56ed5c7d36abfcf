//! Terminal front end: argument parsing and command dispatch.

use std::io::{self, BufRead, Write};

use chrono::{Local, Utc};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tera::{Context, Tera};
use thiserror::Error;

use crate::domain::types::{ClientId, StatusFilter};
use crate::forms::client::ClientForm;
use crate::models::config::AppConfig;
use crate::repository::{ClientStore, FileSlotStorage, SystemClock};
use crate::services::ServiceError;

pub mod client;
pub mod main;

#[derive(Debug, Parser)]
#[command(
    name = "crm-followup",
    version,
    about = "Track leads, their status and who needs a follow-up"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List clients, most urgent first.
    List {
        /// all, new, in_contact, awaiting, closed or lost.
        #[arg(long, short, default_value = "all")]
        status: StatusFilter,
    },
    /// Show a single client.
    Show { id: ClientId },
    /// Add a new client.
    Add(ClientArgs),
    /// Edit a client; omitted options keep their stored values.
    Edit {
        id: ClientId,
        #[command(flatten)]
        fields: ClientArgs,
    },
    /// Delete a client after confirmation.
    Delete {
        id: ClientId,
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
}

/// Client fields accepted on the command line.
#[derive(Debug, Default, Args)]
pub struct ClientArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    /// Product or service of interest.
    #[arg(long)]
    pub product: Option<String>,
    /// new, in_contact, awaiting, closed or lost.
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
    /// Date of the last contact, YYYY-MM-DD.
    #[arg(long)]
    pub last_contact: Option<String>,
}

impl ClientArgs {
    /// Overwrites the form fields that were given on the command line.
    pub fn apply_to(self, form: &mut ClientForm) {
        let fields = [
            (self.name, &mut form.name),
            (self.phone, &mut form.phone),
            (self.email, &mut form.email),
            (self.product, &mut form.product),
            (self.status, &mut form.status),
            (self.notes, &mut form.notes),
            (self.last_contact, &mut form.last_contact),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type CommandResult = Result<(), CommandError>;

/// Runs one command against the configured store.
pub fn execute<I, W>(config: &AppConfig, cli: Cli, input: &mut I, out: &mut W) -> CommandResult
where
    I: BufRead,
    W: Write,
{
    let tera = Tera::new(&config.templates_dir)?;
    let storage = FileSlotStorage::new(&config.storage_dir);
    let mut store = ClientStore::open_with(storage, SystemClock, config.storage_key.as_str());
    let thresholds = config.thresholds();
    let now = Utc::now();

    match cli.command {
        Command::List { status } => main::list_clients(&store, &tera, status, thresholds, now, out),
        Command::Show { id } => client::show_client(&store, &tera, &id, thresholds, now, out),
        Command::Add(fields) => {
            let today = now.with_timezone(&Local).date_naive();
            main::add_client(&mut store, &tera, fields, today, out)
        }
        Command::Edit { id, fields } => client::edit_client(&mut store, &tera, &id, fields, out),
        Command::Delete { id, yes } => {
            client::delete_client(&mut store, &tera, &id, yes, input, out)
        }
    }
}

fn render<T, W>(tera: &Tera, template: &str, data: &T, out: &mut W) -> CommandResult
where
    T: Serialize,
    W: Write + ?Sized,
{
    let context = Context::from_serialize(data)?;
    let body = tera.render(template, &context)?;
    out.write_all(body.as_bytes())?;
    Ok(())
}

/// Prints what went wrong in user terms and hands the error back.
fn report<W>(tera: &Tera, err: ServiceError, out: &mut W) -> CommandResult
where
    W: Write + ?Sized,
{
    match &err {
        ServiceError::Form(errors) => {
            render(tera, "form_errors.txt", &serde_json::json!({ "errors": errors }), out)?;
        }
        ServiceError::NotFound => writeln!(out, "Cliente não encontrado")?,
    }
    Err(err.into())
}
