use serde::{Deserialize, Serialize};

/// One book entry as returned by the Open Library search endpoint.
///
/// Every field is optional on the wire; absent values stay `None` and are
/// rendered as a placeholder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author_name: Option<Vec<String>>,
    #[serde(default)]
    pub first_publish_year: Option<i32>,
    #[serde(default)]
    pub ratings_average: Option<f64>,
    #[serde(default)]
    pub subject: Option<Vec<String>>,
}

impl Record {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn primary_subject(&self) -> Option<&str> {
        self.subject
            .as_ref()
            .and_then(|subjects| subjects.first())
            .map(String::as_str)
    }
}

/// Body of `search.json`. Only `docs` is required.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub docs: Vec<Record>,
    #[serde(default, rename = "numFound")]
    pub num_found: Option<u64>,
}
