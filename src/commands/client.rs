use std::io::{BufRead, Write};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tera::Tera;

use crate::commands::{ClientArgs, CommandResult, render, report};
use crate::domain::follow_up::OverdueThresholds;
use crate::domain::types::ClientId;
use crate::repository::{ClientReader, ClientWriter};
use crate::services::ServiceError;
use crate::services::client as client_service;

#[derive(Serialize)]
struct ConfirmDelete<'a> {
    name: &'a str,
}

pub fn show_client<R, W>(
    repo: &R,
    tera: &Tera,
    client_id: &ClientId,
    thresholds: OverdueThresholds,
    now: DateTime<Utc>,
    out: &mut W,
) -> CommandResult
where
    R: ClientReader + ?Sized,
    W: Write + ?Sized,
{
    match client_service::load_client(repo, client_id, thresholds, now) {
        Ok(page) => render(tera, "client.txt", &page, out),
        Err(err) => report(tera, err, out),
    }
}

/// Applies the given options over the stored values and saves the client.
pub fn edit_client<R, W>(
    repo: &mut R,
    tera: &Tera,
    client_id: &ClientId,
    fields: ClientArgs,
    out: &mut W,
) -> CommandResult
where
    R: ClientReader + ClientWriter + ?Sized,
    W: Write + ?Sized,
{
    let mut form = match client_service::edit_form(repo, client_id) {
        Ok(form) => form,
        Err(err) => return report(tera, err, out),
    };
    fields.apply_to(&mut form);

    match client_service::save_client(repo, client_id, &form) {
        Ok(_) => {
            writeln!(out, "Cliente atualizado com sucesso")?;
            Ok(())
        }
        Err(err) => report(tera, err, out),
    }
}

/// Deletes the client once the user confirmed, or right away with `--yes`.
pub fn delete_client<R, I, W>(
    repo: &mut R,
    tera: &Tera,
    client_id: &ClientId,
    confirmed: bool,
    input: &mut I,
    out: &mut W,
) -> CommandResult
where
    R: ClientReader + ClientWriter + ?Sized,
    I: BufRead + ?Sized,
    W: Write + ?Sized,
{
    if !confirmed {
        let Some(client) = repo.get_client(client_id) else {
            return report(tera, ServiceError::NotFound, out);
        };
        render(
            tera,
            "confirm_delete.txt",
            &ConfirmDelete {
                name: client.name.as_str(),
            },
            out,
        )?;
        out.flush()?;

        let mut answer = String::new();
        input.read_line(&mut answer)?;
        if !is_yes(&answer) {
            writeln!(out, "Exclusão cancelada")?;
            return Ok(());
        }
    }

    match client_service::delete_client(repo, client_id) {
        Ok(_) => {
            writeln!(out, "Cliente excluído com sucesso")?;
            Ok(())
        }
        Err(err) => report(tera, err, out),
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "s" | "sim" | "y" | "yes"
    )
}
