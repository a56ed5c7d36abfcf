use std::borrow::Cow;

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::types::{ClientName, ClientStatus, check_optional_email};
use crate::forms::FormError;

pub const NAME_REQUIRED: &str = "Nome é obrigatório";
pub const EMAIL_INVALID: &str = "E-mail inválido";
pub const STATUS_INVALID: &str = "Status inválido";
pub const LAST_CONTACT_REQUIRED: &str = "Data do último contato é obrigatória";
pub const LAST_CONTACT_INVALID: &str = "Data do último contato inválida";

/// Format of the last contact date entered by the user.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Clone, Debug, Default, Deserialize, Validate, PartialEq, Eq)]
/// Raw user input for adding or editing a client.
pub struct ClientForm {
    /// Display name, required.
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    /// Optional email; must look like `local@domain.tld` when present.
    #[serde(default)]
    #[validate(custom(function = "validate_email"))]
    pub email: String,
    /// Product or service of interest.
    #[serde(default)]
    pub product: String,
    /// One of the status keys (`new`, `in_contact`, ...).
    #[validate(custom(function = "validate_status"))]
    pub status: String,
    #[serde(default)]
    pub notes: String,
    /// Date of the last contact as `YYYY-MM-DD`.
    #[validate(custom(function = "validate_last_contact"))]
    pub last_contact: String,
}

impl ClientForm {
    /// Empty form for a new client: status `new`, last contact `today`.
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            status: ClientStatus::New.as_str().to_string(),
            last_contact: today.format(DATE_FORMAT).to_string(),
            ..Self::default()
        }
    }

    fn parsed_name(&self) -> Result<ClientName, FormError> {
        ClientName::new(self.name.as_str()).map_err(|_| FormError::InvalidName)
    }

    fn parsed_email(&self) -> Result<String, FormError> {
        let email = self.email.trim();
        check_optional_email(email).map_err(|_| FormError::InvalidEmail)?;
        Ok(email.to_string())
    }

    fn parsed_status(&self) -> Result<ClientStatus, FormError> {
        self.status.parse().map_err(|_| FormError::InvalidStatus)
    }

    fn parsed_last_contact(&self) -> Result<DateTime<Utc>, FormError> {
        parse_date(&self.last_contact)
            .map(noon_local)
            .ok_or(FormError::InvalidLastContact)
    }
}

impl ClientForm {
    /// Builds the update for an edit of `client`. The stored last contact is
    /// kept as is while the form still shows its date.
    pub fn update_for(&self, client: &Client) -> Result<UpdateClient, FormError> {
        let mut updates = UpdateClient::try_from(self)?;
        if parse_date(&self.last_contact) == Some(local_date(client.last_contact)) {
            updates.last_contact = None;
        }
        Ok(updates)
    }
}

impl From<&Client> for ClientForm {
    /// Pre-fills the edit form from a stored client.
    fn from(client: &Client) -> Self {
        Self {
            name: client.name.to_string(),
            phone: client.phone.clone(),
            email: client.email.clone(),
            product: client.product.clone(),
            status: client.status.as_str().to_string(),
            notes: client.notes.clone(),
            last_contact: local_date(client.last_contact)
                .format(DATE_FORMAT)
                .to_string(),
        }
    }
}

impl TryFrom<&ClientForm> for NewClient {
    type Error = FormError;

    fn try_from(form: &ClientForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(NewClient::new(form.parsed_name()?, form.parsed_last_contact()?)
            .phone(form.phone.trim())
            .email(form.parsed_email()?)
            .product(form.product.trim())
            .status(form.parsed_status()?)
            .notes(form.notes.trim()))
    }
}

impl TryFrom<&ClientForm> for UpdateClient {
    type Error = FormError;

    /// The edit form always carries every field, so every field is replaced.
    fn try_from(form: &ClientForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(UpdateClient::default()
            .name(form.parsed_name()?)
            .phone(form.phone.trim())
            .email(form.parsed_email()?)
            .product(form.product.trim())
            .status(form.parsed_status()?)
            .notes(form.notes.trim())
            .last_contact(form.parsed_last_contact()?))
    }
}

/// Interprets a date-only value as 12:00 local time on that day.
pub fn noon_local(date: NaiveDate) -> DateTime<Utc> {
    let noon = date.and_time(NaiveTime::from_hms_opt(12, 0, 0).expect("noon is a valid time"));
    Local
        .from_local_datetime(&noon)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&noon))
}

fn local_date(at: DateTime<Utc>) -> NaiveDate {
    at.with_timezone(&Local).date_naive()
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

fn error_with_message(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(error_with_message("required", NAME_REQUIRED));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    check_optional_email(email.trim()).map_err(|_| error_with_message("email", EMAIL_INVALID))
}

fn validate_status(status: &str) -> Result<(), ValidationError> {
    status
        .parse::<ClientStatus>()
        .map(|_| ())
        .map_err(|_| error_with_message("status", STATUS_INVALID))
}

fn validate_last_contact(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error_with_message("required", LAST_CONTACT_REQUIRED));
    }
    match parse_date(value) {
        Some(_) => Ok(()),
        None => Err(error_with_message("date", LAST_CONTACT_INVALID)),
    }
}
