//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (non-empty identifiers and names,
//! a closed set of statuses) so that once a value reaches the domain layer it
//! can be treated as trusted.
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided email failed the `local@domain.tld` shape check.
    #[error("invalid email address")]
    InvalidEmail,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided status is not one of the known lifecycle stages.
    #[error("unknown client status: {0}")]
    UnknownStatus(String),
}

static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email shape pattern is valid")
});

/// Returns `true` when `email` looks like `local@domain.tld`.
pub fn is_email_shape(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}

/// Checks an optional email: empty input is accepted, anything else must
/// match the `local@domain.tld` shape.
pub fn check_optional_email(email: &str) -> Result<(), TypeConstraintError> {
    if email.is_empty() || is_email_shape(email) {
        Ok(())
    } else {
        Err(TypeConstraintError::InvalidEmail)
    }
}

/// Opaque client identifier generated by the store.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct ClientId(String);

impl ClientId {
    /// Generates a fresh identifier from a time-ordered UUID (millisecond
    /// timestamp followed by random bits).
    pub fn generate() -> Self {
        Self(Uuid::now_v7().simple().to_string())
    }

    /// Wraps an existing identifier, rejecting blank values.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    /// Borrow the identifier as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ClientId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ClientId {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ClientId {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ClientId> for String {
    fn from(value: ClientId) -> Self {
        value.0
    }
}

/// Customer name wrapper enforcing trimmed, non-empty values.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct ClientName(String);

impl ClientName {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    /// Borrow the value as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for ClientName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for ClientName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ClientName {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ClientName {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ClientName> for String {
    fn from(value: ClientName) -> Self {
        value.0
    }
}

/// Lifecycle stage of a client relationship.
///
/// Serialized in `snake_case`; the legacy Portuguese keys written by older
/// versions of the data file are accepted on read.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ClientStatus {
    #[default]
    #[serde(alias = "novo")]
    New,
    #[serde(alias = "em_contato")]
    InContact,
    #[serde(alias = "aguardando")]
    Awaiting,
    #[serde(alias = "fechado")]
    Closed,
    #[serde(alias = "perdido")]
    Lost,
}

impl ClientStatus {
    /// Every status in display order.
    pub const ALL: [ClientStatus; 5] = [
        ClientStatus::New,
        ClientStatus::InContact,
        ClientStatus::Awaiting,
        ClientStatus::Closed,
        ClientStatus::Lost,
    ];

    /// Storage key of the status.
    pub const fn as_str(self) -> &'static str {
        match self {
            ClientStatus::New => "new",
            ClientStatus::InContact => "in_contact",
            ClientStatus::Awaiting => "awaiting",
            ClientStatus::Closed => "closed",
            ClientStatus::Lost => "lost",
        }
    }

    /// Human readable label shown in listings.
    pub const fn label(self) -> &'static str {
        match self {
            ClientStatus::New => "Novo",
            ClientStatus::InContact => "Em Contato",
            ClientStatus::Awaiting => "Aguardando Resposta",
            ClientStatus::Closed => "Fechado",
            ClientStatus::Lost => "Perdido",
        }
    }

    /// Closed and lost clients no longer need follow-up.
    pub const fn is_active(self) -> bool {
        !matches!(self, ClientStatus::Closed | ClientStatus::Lost)
    }
}

impl Display for ClientStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ClientStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "new" | "novo" => Ok(ClientStatus::New),
            "in_contact" | "em_contato" => Ok(ClientStatus::InContact),
            "awaiting" | "aguardando" => Ok(ClientStatus::Awaiting),
            "closed" | "fechado" => Ok(ClientStatus::Closed),
            "lost" | "perdido" => Ok(ClientStatus::Lost),
            other => Err(TypeConstraintError::UnknownStatus(other.to_string())),
        }
    }
}

/// Status selection applied to the client list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ClientStatus),
}

impl StatusFilter {
    /// Every filter option in display order, `All` first.
    pub fn options() -> impl Iterator<Item = StatusFilter> {
        std::iter::once(StatusFilter::All).chain(ClientStatus::ALL.into_iter().map(StatusFilter::Only))
    }

    pub fn matches(self, status: ClientStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Only(status) => status.as_str(),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "Todos",
            StatusFilter::Only(status) => status.label(),
        }
    }
}

impl Display for StatusFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "all" => Ok(StatusFilter::All),
            other => other.parse().map(StatusFilter::Only),
        }
    }
}

impl From<ClientStatus> for StatusFilter {
    fn from(status: ClientStatus) -> Self {
        StatusFilter::Only(status)
    }
}

/// Follow-up urgency of a client.
///
/// Variants are declared most urgent first so that the derived ordering sorts
/// `Danger` before `Warning` before `None`.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OverdueLevel {
    Danger,
    Warning,
    None,
}

impl OverdueLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            OverdueLevel::Danger => "danger",
            OverdueLevel::Warning => "warning",
            OverdueLevel::None => "none",
        }
    }
}

impl Display for OverdueLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape_accepts_simple_addresses() {
        assert!(is_email_shape("ana@example.com"));
        assert!(is_email_shape("a.b+c@mail.example.co"));
        assert!(!is_email_shape("bad-email"));
        assert!(!is_email_shape("ana@example"));
        assert!(!is_email_shape("ana @example.com"));
        assert!(!is_email_shape("ana@@example.com"));
    }

    #[test]
    fn optional_email_allows_empty() {
        assert_eq!(check_optional_email(""), Ok(()));
        assert_eq!(
            check_optional_email("bad-email"),
            Err(TypeConstraintError::InvalidEmail)
        );
    }

    #[test]
    fn client_name_is_trimmed_and_non_empty() {
        assert_eq!(ClientName::new("  Ana  ").unwrap().as_str(), "Ana");
        assert_eq!(ClientName::new("   "), Err(TypeConstraintError::EmptyString));
    }

    #[test]
    fn generated_ids_are_distinct() {
        let a = ClientId::generate();
        let b = ClientId::generate();
        assert_ne!(a, b);
        assert!(!a.as_str().is_empty());
    }

    #[test]
    fn status_parses_current_and_legacy_keys() {
        assert_eq!("awaiting".parse::<ClientStatus>(), Ok(ClientStatus::Awaiting));
        assert_eq!("fechado".parse::<ClientStatus>(), Ok(ClientStatus::Closed));
        assert_eq!(
            "archived".parse::<ClientStatus>(),
            Err(TypeConstraintError::UnknownStatus("archived".to_string()))
        );
    }

    #[test]
    fn status_serde_uses_snake_case_and_reads_legacy() {
        let json = serde_json::to_string(&ClientStatus::InContact).unwrap();
        assert_eq!(json, "\"in_contact\"");

        let legacy: ClientStatus = serde_json::from_str("\"em_contato\"").unwrap();
        assert_eq!(legacy, ClientStatus::InContact);

        assert!(serde_json::from_str::<ClientStatus>("\"archived\"").is_err());
    }

    #[test]
    fn status_filter_round_trips_through_text() {
        assert_eq!("all".parse::<StatusFilter>(), Ok(StatusFilter::All));
        assert_eq!(
            "lost".parse::<StatusFilter>(),
            Ok(StatusFilter::Only(ClientStatus::Lost))
        );
        assert_eq!(StatusFilter::Only(ClientStatus::New).to_string(), "new");
        assert_eq!(StatusFilter::options().count(), 6);
    }

    #[test]
    fn overdue_levels_order_most_urgent_first() {
        assert!(OverdueLevel::Danger < OverdueLevel::Warning);
        assert!(OverdueLevel::Warning < OverdueLevel::None);
    }
}
