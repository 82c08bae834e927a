//! Domain types for compromise propagation.
//!
//! Identifiers are plain string values compared by equality. Raw rows are
//! what the tabular loader produces; they are validated into typed records
//! before an index is built.

use crate::error::{Error, Result};
use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier of a user account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    /// Create a new user ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Identifier of a computer (host).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComputerId(pub String);

impl ComputerId {
    /// Create a new computer ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComputerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ComputerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ComputerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A user associated with a computer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRecord {
    /// The acting user
    pub user_id: UserId,
    /// The computer the user was active on
    pub computer_id: ComputerId,
}

impl ActivityRecord {
    /// Create a new activity record
    pub fn new(user_id: impl Into<UserId>, computer_id: impl Into<ComputerId>) -> Self {
        Self {
            user_id: user_id.into(),
            computer_id: computer_id.into(),
        }
    }
}

/// An observed activity on a computer attributed to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRecord {
    /// The computer where the activity was observed
    pub computer_id: ComputerId,
    /// The user the activity is attributed to
    pub affected_user_id: UserId,
    /// Free-form activity label (e.g., "login", "copy")
    pub activity_type: String,
}

impl AccessRecord {
    /// Create a new access record
    pub fn new(
        computer_id: impl Into<ComputerId>,
        affected_user_id: impl Into<UserId>,
        activity_type: impl Into<String>,
    ) -> Self {
        Self {
            computer_id: computer_id.into(),
            affected_user_id: affected_user_id.into(),
            activity_type: activity_type.into(),
        }
    }
}

/// One entry of a computer's activity list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    /// User the activity is attributed to
    pub user_id: UserId,
    /// Activity label
    pub activity_type: String,
}

/// Which input dataset a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    /// User→computer activity log
    Activity,
    /// Computer→user access log
    Access,
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Activity => write!(f, "activity"),
            Self::Access => write!(f, "access"),
        }
    }
}

/// One field of a raw row, as decoded from the input file.
///
/// CSV fields always arrive as text. In JSON Lines a field can hold any
/// value; anything other than a string is kept as [`RawField::Unparsable`]
/// so validation can report it against the row and column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawField {
    /// A string value, verbatim
    Text(String),
    /// A number, boolean, array, or object
    Unparsable,
}

impl From<&str> for RawField {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl<'de> Deserialize<'de> for RawField {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(RawFieldVisitor)
    }
}

struct RawFieldVisitor;

impl<'de> Visitor<'de> for RawFieldVisitor {
    type Value = RawField;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a field value")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<RawField, E> {
        Ok(RawField::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<RawField, E> {
        Ok(RawField::Text(v))
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> std::result::Result<RawField, E> {
        Ok(RawField::Unparsable)
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> std::result::Result<RawField, E> {
        Ok(RawField::Unparsable)
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> std::result::Result<RawField, E> {
        Ok(RawField::Unparsable)
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> std::result::Result<RawField, E> {
        Ok(RawField::Unparsable)
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<RawField, E> {
        Ok(RawField::Unparsable)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<RawField, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(RawField::Unparsable)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<RawField, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(RawField::Unparsable)
    }
}

/// An activity-log row as read from disk, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawActivityRow {
    /// `user_id` column
    pub user_id: Option<RawField>,
    /// `computer_id` column
    pub computer_id: Option<RawField>,
}

impl RawActivityRow {
    /// Validate this row into an [`ActivityRecord`].
    ///
    /// `row` is the 1-based record number used in the error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedRecord`] if a field is absent, empty, or not
    /// a string.
    pub fn validate(&self, row: usize) -> Result<ActivityRecord> {
        let field = |value: &Option<RawField>, name| {
            required(value.as_ref(), Dataset::Activity, row, name)
        };
        Ok(ActivityRecord {
            user_id: UserId(field(&self.user_id, "user_id")?),
            computer_id: ComputerId(field(&self.computer_id, "computer_id")?),
        })
    }
}

/// An access-log row as read from disk, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawAccessRow {
    /// `computer_id` column
    pub computer_id: Option<RawField>,
    /// `affected_user_id` column
    pub affected_user_id: Option<RawField>,
    /// `activity_type` column
    pub activity_type: Option<RawField>,
}

impl RawAccessRow {
    /// Validate this row into an [`AccessRecord`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedRecord`] if a field is absent, empty, or not
    /// a string.
    pub fn validate(&self, row: usize) -> Result<AccessRecord> {
        let field = |value: &Option<RawField>, name| {
            required(value.as_ref(), Dataset::Access, row, name)
        };
        Ok(AccessRecord {
            computer_id: ComputerId(field(&self.computer_id, "computer_id")?),
            affected_user_id: UserId(field(&self.affected_user_id, "affected_user_id")?),
            activity_type: field(&self.activity_type, "activity_type")?,
        })
    }
}

// Values are taken verbatim. " C1 " and "C1" are different computers.
fn required(
    value: Option<&RawField>,
    dataset: Dataset,
    row: usize,
    field: &'static str,
) -> Result<String> {
    match value {
        Some(RawField::Text(v)) if !v.is_empty() => Ok(v.clone()),
        _ => Err(Error::MalformedRecord {
            dataset,
            row,
            field,
        }),
    }
}
