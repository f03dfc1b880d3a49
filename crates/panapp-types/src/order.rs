use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::id::RecordId;

/// Lifecycle state of an [`Order`].
///
/// The intended progression is `Pending -> InProgress -> Completed`, with
/// `Completed` terminal. [`OrderStatus::next`] yields the single forward
/// transition; the store layer itself accepts any status write, so
/// enforcement sits with whoever offers the actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Pending,
    InProgress,
    Completed,
}

impl OrderStatus {
    /// The single legal forward transition, `None` once completed.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Pending => Some(Self::InProgress),
            Self::InProgress => Some(Self::Completed),
            Self::Completed => None,
        }
    }

    /// Returns `true` for the terminal state.
    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    /// The stored spelling of this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl FromStr for OrderStatus {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            other => Err(TypeError::UnknownStatus(other.to_string())),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bakery order.
///
/// `customer_name` is free text denormalized from the client at creation
/// time, not a foreign key; deleting a client leaves its orders intact.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: RecordId,
    pub customer_name: String,
    /// Free-text description, typically derived from a line-item cart.
    pub details: String,
    /// Total units across the order; positive.
    pub quantity: u32,
    /// Calendar date of delivery, no time zone attached.
    pub delivery_date: NaiveDate,
    /// Wall-clock delivery time as entered (e.g. "14:30").
    pub delivery_time: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied fields for creating an [`Order`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewOrder {
    pub customer_name: String,
    pub details: String,
    pub quantity: u32,
    pub delivery_date: NaiveDate,
    pub delivery_time: String,
    pub status: OrderStatus,
}

/// Partial update of an [`Order`]. `None` fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderPatch {
    pub customer_name: Option<String>,
    pub details: Option<String>,
    pub quantity: Option<u32>,
    pub delivery_date: Option<NaiveDate>,
    pub delivery_time: Option<String>,
    pub status: Option<OrderStatus>,
}

/// Counts of orders per status plus the total.
///
/// Derived, never stored: recomputed from the live collection on demand, so
/// it cannot go stale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OrderStats {
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub total: usize,
}

impl OrderStats {
    /// Fold one order's status into the counts.
    pub fn record(&mut self, status: OrderStatus) {
        self.total += 1;
        match status {
            OrderStatus::Pending => self.pending += 1,
            OrderStatus::InProgress => self.in_progress += 1,
            OrderStatus::Completed => self.completed += 1,
        }
    }
}

impl<'a> FromIterator<&'a OrderStatus> for OrderStats {
    fn from_iter<I: IntoIterator<Item = &'a OrderStatus>>(iter: I) -> Self {
        let mut stats = Self::default();
        for status in iter {
            stats.record(*status);
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_progression_stops_at_completed() {
        assert_eq!(OrderStatus::Pending.next(), Some(OrderStatus::InProgress));
        assert_eq!(OrderStatus::InProgress.next(), Some(OrderStatus::Completed));
        assert_eq!(OrderStatus::Completed.next(), None);
        assert!(OrderStatus::Completed.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
    }

    #[test]
    fn status_round_trips_through_its_stored_spelling() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::InProgress,
            OrderStatus::Completed,
        ] {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
        assert_eq!(
            "in-progress".parse::<OrderStatus>().unwrap(),
            OrderStatus::InProgress
        );
    }

    #[test]
    fn unknown_status_is_an_error() {
        let err = "done".parse::<OrderStatus>().unwrap_err();
        assert_eq!(err, TypeError::UnknownStatus("done".into()));
    }

    #[test]
    fn status_serializes_kebab_case() {
        let json = serde_json::to_string(&OrderStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
    }

    #[test]
    fn stats_fold_counts_every_status() {
        let statuses = [
            OrderStatus::Pending,
            OrderStatus::Pending,
            OrderStatus::InProgress,
            OrderStatus::Completed,
        ];
        let stats: OrderStats = statuses.iter().collect();
        assert_eq!(
            stats,
            OrderStats {
                pending: 2,
                in_progress: 1,
                completed: 1,
                total: 4
            }
        );
    }
}
