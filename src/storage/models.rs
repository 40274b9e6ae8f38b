use serde::{Deserialize, Serialize};

/// One short-id → target-URL mapping.
///
/// Created once by a shorten call, never mutated. The serialized form is
/// also the success body of the `/shorten` and `/resolve` endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlMapping {
    pub short_id: String,
    pub url: String,
}
