//! Todo records as exchanged with the `/items` endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A single task record.
///
/// `group_id` is always a string: a missing or null value on the wire
/// becomes empty and is replaced with a real group during normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub heading: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: String,
    #[serde(default)]
    pub is_complete: bool,
    #[serde(default)]
    pub is_starred: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub group_id: String,
    /// Display name of the resolved group; filled in client-side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    #[serde(default)]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_date: Option<DateTime<Utc>>,
}

impl Todo {
    /// Copy of this todo with completion flipped.
    ///
    /// Completing stamps `completed_date` with `now`, never earlier than
    /// `created_date`. Un-completing clears it.
    pub fn with_completion_toggled(&self, now: DateTime<Utc>) -> Self {
        let mut next = self.clone();
        next.is_complete = !self.is_complete;
        next.completed_date = if next.is_complete {
            Some(match self.created_date {
                Some(created) if created > now => created,
                _ => now,
            })
        } else {
            None
        };
        next
    }

    /// Copy of this todo with the star flipped.
    pub fn with_star_toggled(&self) -> Self {
        let mut next = self.clone();
        next.is_starred = !self.is_starred;
        next
    }
}

/// Request body for `POST /items`.
///
/// The id is generated client-side; the server's response is authoritative.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoCreateRequest {
    pub id: String,
    pub heading: String,
    pub body: String,
    pub is_complete: bool,
    pub is_starred: bool,
    pub group_id: String,
    pub created_date: Option<DateTime<Utc>>,
    pub completed_date: Option<DateTime<Utc>>,
}

impl TodoCreateRequest {
    pub fn new(
        heading: impl Into<String>,
        body: impl Into<String>,
        group_id: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            heading: heading.into(),
            body: body.into(),
            is_complete: false,
            is_starred: false,
            group_id: group_id.into(),
            created_date: None,
            completed_date: None,
        }
    }
}

/// Query parameters for `GET /items`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_complete: Option<bool>,
}

impl TodoQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn completed() -> Self {
        Self {
            is_complete: Some(true),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
