//! Read-only lookup index over the activity and access logs.
//!
//! The index holds three mappings:
//! - user → computers, from activity records
//! - computer → users, from access records
//! - computer → (user, activity type), from access records
//!
//! Every sequence keeps input order and retains duplicates. The two record
//! kinds are not cross-checked: a computer seen only in access records is
//! simply unreachable through user edges.

use crate::domain::{
    AccessRecord, Activity, ActivityRecord, ComputerId, RawAccessRow, RawActivityRow, UserId,
};
use crate::error::Result;
use std::collections::HashMap;

/// Counts describing what went into an index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Activity records ingested
    pub activity_records: usize,
    /// Access records ingested
    pub access_records: usize,
    /// Distinct users with at least one activity record
    pub users: usize,
    /// Distinct computers with at least one access record
    pub computers: usize,
}

/// Immutable lookup mappings built once from the input logs.
///
/// `LogIndex` is never mutated after construction, so one index can back any
/// number of traversals, including traversals on other threads.
#[derive(Debug, Clone, Default)]
pub struct LogIndex {
    user_to_computers: HashMap<UserId, Vec<ComputerId>>,
    computer_to_users: HashMap<ComputerId, Vec<UserId>>,
    computer_activities: HashMap<ComputerId, Vec<Activity>>,
    stats: IndexStats,
}

impl LogIndex {
    /// Validate raw rows and build the index.
    ///
    /// Every row of both datasets is validated before any mapping is
    /// populated, so a failure never yields a partial index.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::MalformedRecord`] for the first row (activity
    /// rows first, then access rows) with a missing or blank field.
    pub fn build(activity_rows: &[RawActivityRow], access_rows: &[RawAccessRow]) -> Result<Self> {
        let activity = activity_rows
            .iter()
            .enumerate()
            .map(|(i, row)| row.validate(i + 1))
            .collect::<Result<Vec<_>>>()?;
        let access = access_rows
            .iter()
            .enumerate()
            .map(|(i, row)| row.validate(i + 1))
            .collect::<Result<Vec<_>>>()?;

        let index = Self::from_records(activity, access);
        tracing::info!(
            activity_records = index.stats.activity_records,
            access_records = index.stats.access_records,
            users = index.stats.users,
            computers = index.stats.computers,
            "Built log index"
        );
        Ok(index)
    }

    /// Build the index from already-validated records.
    pub fn from_records<A, B>(activity: A, access: B) -> Self
    where
        A: IntoIterator<Item = ActivityRecord>,
        B: IntoIterator<Item = AccessRecord>,
    {
        let mut index = Self::default();

        for record in activity {
            index.stats.activity_records += 1;
            index
                .user_to_computers
                .entry(record.user_id)
                .or_default()
                .push(record.computer_id);
        }

        for record in access {
            index.stats.access_records += 1;
            index
                .computer_to_users
                .entry(record.computer_id.clone())
                .or_default()
                .push(record.affected_user_id.clone());
            index
                .computer_activities
                .entry(record.computer_id)
                .or_default()
                .push(Activity {
                    user_id: record.affected_user_id,
                    activity_type: record.activity_type,
                });
        }

        index.stats.users = index.user_to_computers.len();
        index.stats.computers = index.computer_to_users.len();
        index
    }

    /// Computers the user was active on, in record order.
    #[must_use]
    pub fn computers_for(&self, user: &UserId) -> &[ComputerId] {
        self.user_to_computers
            .get(user)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Users observed on the computer, in record order.
    #[must_use]
    pub fn users_on(&self, computer: &ComputerId) -> &[UserId] {
        self.computer_to_users
            .get(computer)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Activities observed on the computer, in record order.
    #[must_use]
    pub fn activities_on(&self, computer: &ComputerId) -> &[Activity] {
        self.computer_activities
            .get(computer)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of distinct users with activity records.
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.stats.users
    }

    /// Number of distinct computers with access records.
    #[must_use]
    pub fn computer_count(&self) -> usize {
        self.stats.computers
    }

    /// Ingestion statistics.
    #[must_use]
    pub fn stats(&self) -> IndexStats {
        self.stats
    }
}
