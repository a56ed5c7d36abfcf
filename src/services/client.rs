use chrono::{DateTime, Utc};

use crate::domain::client::Client;
use crate::domain::follow_up::OverdueThresholds;
use crate::domain::types::ClientId;
use crate::dto::client::{ClientCard, ClientPageData};
use crate::forms::client::ClientForm;
use crate::repository::{ClientReader, ClientWriter};
use crate::services::{ServiceError, ServiceResult};

/// Loads a single client card.
pub fn load_client<R>(
    repo: &R,
    client_id: &ClientId,
    thresholds: OverdueThresholds,
    now: DateTime<Utc>,
) -> ServiceResult<ClientPageData>
where
    R: ClientReader + ?Sized,
{
    let client = repo.get_client(client_id).ok_or(ServiceError::NotFound)?;

    Ok(ClientPageData {
        client: ClientCard::new(client, now, thresholds),
    })
}

/// Returns the edit form pre-filled with the stored values.
pub fn edit_form<R>(repo: &R, client_id: &ClientId) -> ServiceResult<ClientForm>
where
    R: ClientReader + ?Sized,
{
    repo.get_client(client_id)
        .map(ClientForm::from)
        .ok_or(ServiceError::NotFound)
}

/// Validates the edit form and applies it to the client.
pub fn save_client<R>(repo: &mut R, client_id: &ClientId, form: &ClientForm) -> ServiceResult<Client>
where
    R: ClientReader + ClientWriter + ?Sized,
{
    let Some(stored) = repo.get_client(client_id) else {
        log::error!("Failed to update client {client_id}: not found");
        return Err(ServiceError::NotFound);
    };
    let updates = form.update_for(stored).map_err(|err| {
        log::warn!("Rejected edit form for client {client_id}: {err}");
        err
    })?;

    repo.update_client(client_id, &updates).ok_or_else(|| {
        log::error!("Failed to update client {client_id}: not found");
        ServiceError::NotFound
    })
}

/// Removes the client after the caller confirmed the deletion.
pub fn delete_client<R>(repo: &mut R, client_id: &ClientId) -> ServiceResult<Client>
where
    R: ClientWriter + ?Sized,
{
    repo.remove_client(client_id).ok_or_else(|| {
        log::error!("Failed to delete client {client_id}: not found");
        ServiceError::NotFound
    })
}
