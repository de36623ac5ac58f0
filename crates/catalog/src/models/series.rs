use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A book series. Only the title takes part in search; every other field of
/// the series document is kept as-is for whoever renders it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    #[serde(default, deserialize_with = "super::null_as_empty")]
    pub title: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
impl Series {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            extra: Map::new(),
        }
    }
}
