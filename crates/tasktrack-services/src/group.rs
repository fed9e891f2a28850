use serde::{Deserialize, Serialize};

/// A named category todos belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
}

/// Request body for `POST /groups`.
#[derive(Debug, Clone, Serialize)]
pub struct GroupCreateRequest {
    pub id: String,
    pub name: String,
}

impl GroupCreateRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
        }
    }
}

/// Request body for `PATCH /groups/:id`.
#[derive(Debug, Clone, Serialize)]
pub struct GroupUpdateRequest {
    pub name: String,
}
