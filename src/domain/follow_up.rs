//! Follow-up views derived from the client collection.
//!
//! Everything here is a pure function of the collection and an explicit
//! `now`; nothing reads the wall clock or touches the store.

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

use crate::domain::client::Client;
use crate::domain::types::{ClientStatus, OverdueLevel, StatusFilter};

/// Days without contact after which a client is flagged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverdueThresholds {
    pub warning_days: i64,
    pub danger_days: i64,
}

impl OverdueThresholds {
    pub const fn new(warning_days: i64, danger_days: i64) -> Self {
        Self {
            warning_days,
            danger_days,
        }
    }
}

impl Default for OverdueThresholds {
    fn default() -> Self {
        Self::new(7, 14)
    }
}

/// Whole days elapsed since the last contact, rounded down. Negative when the
/// last contact lies in the future.
pub fn days_since_contact(client: &Client, now: DateTime<Utc>) -> i64 {
    let elapsed = now - client.last_contact;
    let days = elapsed.num_days();
    if elapsed < TimeDelta::days(days) {
        days - 1
    } else {
        days
    }
}

/// Classifies how urgently a client needs follow-up. Closed and lost clients
/// are never overdue.
pub fn overdue_level(
    client: &Client,
    now: DateTime<Utc>,
    thresholds: OverdueThresholds,
) -> OverdueLevel {
    if !client.status.is_active() {
        return OverdueLevel::None;
    }

    let days = days_since_contact(client, now);
    if days >= thresholds.danger_days {
        OverdueLevel::Danger
    } else if days >= thresholds.warning_days {
        OverdueLevel::Warning
    } else {
        OverdueLevel::None
    }
}

/// Number of clients per status plus the overall total.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub all: usize,
    pub new: usize,
    pub in_contact: usize,
    pub awaiting: usize,
    pub closed: usize,
    pub lost: usize,
}

impl StatusCounts {
    pub fn get(&self, filter: StatusFilter) -> usize {
        match filter {
            StatusFilter::All => self.all,
            StatusFilter::Only(ClientStatus::New) => self.new,
            StatusFilter::Only(ClientStatus::InContact) => self.in_contact,
            StatusFilter::Only(ClientStatus::Awaiting) => self.awaiting,
            StatusFilter::Only(ClientStatus::Closed) => self.closed,
            StatusFilter::Only(ClientStatus::Lost) => self.lost,
        }
    }

    fn slot_mut(&mut self, status: ClientStatus) -> &mut usize {
        match status {
            ClientStatus::New => &mut self.new,
            ClientStatus::InContact => &mut self.in_contact,
            ClientStatus::Awaiting => &mut self.awaiting,
            ClientStatus::Closed => &mut self.closed,
            ClientStatus::Lost => &mut self.lost,
        }
    }
}

pub fn counts_by_status(clients: &[Client]) -> StatusCounts {
    let mut counts = StatusCounts {
        all: clients.len(),
        ..StatusCounts::default()
    };
    for client in clients {
        *counts.slot_mut(client.status) += 1;
    }
    counts
}

/// Keeps the clients matching `filter`, preserving their order.
pub fn filter_by_status(clients: &[Client], filter: StatusFilter) -> Vec<&Client> {
    clients
        .iter()
        .filter(|client| filter.matches(client.status))
        .collect()
}

/// Orders clients most urgent first, then by oldest last contact. The sort is
/// stable, so clients with equal keys keep their relative order.
pub fn sort_for_display<'a>(
    mut clients: Vec<&'a Client>,
    now: DateTime<Utc>,
    thresholds: OverdueThresholds,
) -> Vec<&'a Client> {
    clients.sort_by(|a, b| {
        overdue_level(a, now, thresholds)
            .cmp(&overdue_level(b, now, thresholds))
            .then_with(|| a.last_contact.cmp(&b.last_contact))
    });
    clients
}

/// Headline numbers of the dashboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FollowUpStats {
    pub total: usize,
    pub active: usize,
    pub closed: usize,
    pub needs_follow_up: usize,
}

impl FollowUpStats {
    /// `needs_follow_up` counts active clients that reached the warning
    /// threshold.
    pub fn compute(clients: &[Client], now: DateTime<Utc>, thresholds: OverdueThresholds) -> Self {
        let mut stats = Self {
            total: clients.len(),
            ..Self::default()
        };
        for client in clients {
            if client.status == ClientStatus::Closed {
                stats.closed += 1;
            }
            if client.status.is_active() {
                stats.active += 1;
                if days_since_contact(client, now) >= thresholds.warning_days {
                    stats.needs_follow_up += 1;
                }
            }
        }
        stats
    }
}
