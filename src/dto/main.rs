use serde::Serialize;

use crate::domain::follow_up::{FollowUpStats, StatusCounts};
use crate::domain::types::StatusFilter;
use crate::dto::client::ClientCard;

/// Query parameters accepted by the index page service.
#[derive(Debug, Default, Clone, Copy)]
pub struct IndexQuery {
    /// Status selected in the filter bar.
    pub status: StatusFilter,
}

/// One entry of the status filter bar.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FilterOption {
    pub value: &'static str,
    pub label: &'static str,
    pub count: usize,
    pub active: bool,
}

/// Data required to render the main index template.
#[derive(Debug, Serialize)]
pub struct IndexPageData {
    pub stats: FollowUpStats,
    pub counts: StatusCounts,
    pub filters: Vec<FilterOption>,
    /// Whether a status other than `all` is selected; drives the empty state.
    pub has_filter: bool,
    /// Filtered clients, most urgent first.
    pub clients: Vec<ClientCard>,
}
