use chrono::{DateTime, Utc};

use crate::domain::client::{Client, NewClient};
use crate::domain::follow_up::{
    FollowUpStats, OverdueThresholds, counts_by_status, filter_by_status, sort_for_display,
};
use crate::domain::types::StatusFilter;
use crate::dto::client::ClientCard;
pub use crate::dto::main::IndexQuery;
use crate::dto::main::{FilterOption, IndexPageData};
use crate::forms::client::ClientForm;
use crate::repository::{ClientReader, ClientWriter};
use crate::services::ServiceResult;

/// Builds the dashboard: stats, filter bar and the filtered, sorted cards.
pub fn load_index_page<R>(
    repo: &R,
    query: IndexQuery,
    thresholds: OverdueThresholds,
    now: DateTime<Utc>,
) -> IndexPageData
where
    R: ClientReader + ?Sized,
{
    let clients = repo.list_clients();
    let counts = counts_by_status(clients);

    let filters = StatusFilter::options()
        .map(|option| FilterOption {
            value: option.as_str(),
            label: option.label(),
            count: counts.get(option),
            active: option == query.status,
        })
        .collect();

    let cards = sort_for_display(filter_by_status(clients, query.status), now, thresholds)
        .into_iter()
        .map(|client| ClientCard::new(client, now, thresholds))
        .collect();

    IndexPageData {
        stats: FollowUpStats::compute(clients, now, thresholds),
        counts,
        filters,
        has_filter: query.status != StatusFilter::All,
        clients: cards,
    }
}

/// Validates the add-client form and stores a new client record.
pub fn add_client<R>(repo: &mut R, form: &ClientForm) -> ServiceResult<Client>
where
    R: ClientWriter + ?Sized,
{
    let new_client = NewClient::try_from(form).map_err(|err| {
        log::warn!("Rejected new client form: {err}");
        err
    })?;

    Ok(repo.add_client(new_client))
}
