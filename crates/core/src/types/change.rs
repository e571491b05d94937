//! Row change notifications.
//!
//! Database triggers publish one JSON payload per changed row:
//!
//! ```json
//! {"table": "products", "type": "UPDATE", "id": "3f0c..."}
//! ```

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Error returned for an unknown table name.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown table: {0}")]
pub struct ParseTableError(pub String);

/// Tables that publish change notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Products,
    StoreSettings,
}

impl Table {
    /// The SQL table name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::StoreSettings => "store_settings",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Table {
    type Err = ParseTableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "products" => Ok(Self::Products),
            "store_settings" => Ok(Self::StoreSettings),
            other => Err(ParseTableError(other.to_owned())),
        }
    }
}

/// The kind of row change, as reported by the trigger's `TG_OP`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// A single row change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub table: Table,
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    /// Primary key of the changed row, when the trigger reports one.
    #[serde(default)]
    pub id: Option<Uuid>,
}

impl ChangeEvent {
    /// Create an event without a row id.
    #[must_use]
    pub const fn new(table: Table, kind: ChangeKind) -> Self {
        Self {
            table,
            kind,
            id: None,
        }
    }

    /// Parse a notification payload.
    ///
    /// # Errors
    ///
    /// Returns the JSON error when the payload is malformed or names an
    /// unknown table or operation.
    pub fn from_payload(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }
}
