//! DTOs shaped for client cards and forms.

use chrono::{DateTime, Local, Utc};
use serde::Serialize;

use crate::domain::client::Client;
use crate::domain::follow_up::{OverdueThresholds, days_since_contact, overdue_level};
use crate::domain::types::{ClientId, OverdueLevel};

/// Display format of the last contact date.
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Everything a rendered client card shows.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ClientCard {
    pub id: ClientId,
    pub name: String,
    pub status: String,
    pub status_label: &'static str,
    pub phone: String,
    pub email: String,
    pub product: String,
    pub notes: String,
    pub last_contact: String,
    pub days_since_contact: i64,
    pub overdue_level: OverdueLevel,
}

impl ClientCard {
    pub fn new(client: &Client, now: DateTime<Utc>, thresholds: OverdueThresholds) -> Self {
        Self {
            id: client.id.clone(),
            name: client.name.to_string(),
            status: client.status.as_str().to_string(),
            status_label: client.status.label(),
            phone: client.phone.clone(),
            email: client.email.clone(),
            product: client.product.clone(),
            notes: client.notes.clone(),
            last_contact: client
                .last_contact
                .with_timezone(&Local)
                .format(DISPLAY_DATE_FORMAT)
                .to_string(),
            days_since_contact: days_since_contact(client, now),
            overdue_level: overdue_level(client, now, thresholds),
        }
    }
}

/// Data required to render a single client.
#[derive(Debug, Serialize)]
pub struct ClientPageData {
    pub client: ClientCard,
}
