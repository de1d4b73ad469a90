use serde::{Deserialize, Serialize};

/// Geographic coordinates of a city.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
}

/// A single record in the cities collection.
///
/// Only `id` and `name` are guaranteed by the backend; the remaining fields
/// default when a document omits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// Creation payload: a [`City`] without the server-assigned id.
///
/// The backend echoes the created record, id included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCity {
    pub name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl NewCity {
    /// Payload with just a name; every other field stays empty.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            country: String::new(),
            notes: String::new(),
            position: None,
        }
    }
}
