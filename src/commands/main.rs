use std::io::Write;

use chrono::{DateTime, NaiveDate, Utc};
use tera::Tera;

use crate::commands::{ClientArgs, CommandResult, render, report};
use crate::domain::follow_up::OverdueThresholds;
use crate::domain::types::StatusFilter;
use crate::forms::client::ClientForm;
use crate::repository::{ClientReader, ClientWriter};
use crate::services::main::{self as main_service, IndexQuery};

/// Prints the dashboard: stats, filter bar and the client cards.
pub fn list_clients<R, W>(
    repo: &R,
    tera: &Tera,
    status: StatusFilter,
    thresholds: OverdueThresholds,
    now: DateTime<Utc>,
    out: &mut W,
) -> CommandResult
where
    R: ClientReader + ?Sized,
    W: Write + ?Sized,
{
    let page = main_service::load_index_page(repo, IndexQuery { status }, thresholds, now);
    render(tera, "index.txt", &page, out)
}

pub fn add_client<R, W>(
    repo: &mut R,
    tera: &Tera,
    fields: ClientArgs,
    today: NaiveDate,
    out: &mut W,
) -> CommandResult
where
    R: ClientWriter + ?Sized,
    W: Write + ?Sized,
{
    let mut form = ClientForm::blank(today);
    fields.apply_to(&mut form);

    match main_service::add_client(repo, &form) {
        Ok(client) => {
            writeln!(out, "Cliente adicionado com sucesso ({})", client.id)?;
            Ok(())
        }
        Err(err) => report(tera, err, out),
    }
}
