use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{ClientId, ClientName, ClientStatus};

/// A lead or contact tracked for follow-up.
///
/// The serialized shape (camelCase keys, every value a string) is the
/// persisted layout of the client slot.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: ClientId,
    pub name: ClientName,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub product: String,
    pub status: ClientStatus,
    #[serde(default)]
    pub notes: String,
    #[serde(with = "iso_millis")]
    pub last_contact: DateTime<Utc>,
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "iso_millis")]
    pub updated_at: DateTime<Utc>,
}

/// Caller supplied fields of a new client. Identifier and timestamps are
/// assigned by the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewClient {
    pub name: ClientName,
    pub phone: String,
    pub email: String,
    pub product: String,
    pub status: ClientStatus,
    pub notes: String,
    pub last_contact: DateTime<Utc>,
}

impl NewClient {
    /// Starts a new client in the `New` status with empty optional fields.
    #[must_use]
    pub fn new(name: ClientName, last_contact: DateTime<Utc>) -> Self {
        Self {
            name,
            phone: String::new(),
            email: String::new(),
            product: String::new(),
            status: ClientStatus::New,
            notes: String::new(),
            last_contact,
        }
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn product(mut self, product: impl Into<String>) -> Self {
        self.product = product.into();
        self
    }

    pub fn status(mut self, status: ClientStatus) -> Self {
        self.status = status;
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Materializes the stored record.
    pub(crate) fn into_client(self, id: ClientId, now: DateTime<Utc>) -> Client {
        Client {
            id,
            name: self.name,
            phone: self.phone,
            email: self.email,
            product: self.product,
            status: self.status,
            notes: self.notes,
            last_contact: self.last_contact,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update of a client. Only the fields set to `Some` are merged;
/// identifier and timestamps cannot be changed through this type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UpdateClient {
    pub name: Option<ClientName>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub product: Option<String>,
    pub status: Option<ClientStatus>,
    pub notes: Option<String>,
    pub last_contact: Option<DateTime<Utc>>,
}

impl UpdateClient {
    pub fn name(mut self, name: ClientName) -> Self {
        self.name = Some(name);
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn product(mut self, product: impl Into<String>) -> Self {
        self.product = Some(product.into());
        self
    }

    pub fn status(mut self, status: ClientStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn last_contact(mut self, last_contact: DateTime<Utc>) -> Self {
        self.last_contact = Some(last_contact);
        self
    }

    /// Merges the provided fields over `client`. Timestamps are left to the
    /// caller.
    pub fn apply_to(&self, client: &mut Client) {
        if let Some(name) = &self.name {
            client.name = name.clone();
        }
        if let Some(phone) = &self.phone {
            client.phone = phone.clone();
        }
        if let Some(email) = &self.email {
            client.email = email.clone();
        }
        if let Some(product) = &self.product {
            client.product = product.clone();
        }
        if let Some(status) = self.status {
            client.status = status;
        }
        if let Some(notes) = &self.notes {
            client.notes = notes.clone();
        }
        if let Some(last_contact) = self.last_contact {
            client.last_contact = last_contact;
        }
    }
}

/// RFC 3339 timestamps in UTC with millisecond precision
/// (`2026-10-19T12:00:00.000Z`). Any RFC 3339 offset is accepted on read.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(|err| D::Error::custom(format!("invalid timestamp {raw:?}: {err}")))
    }
}
