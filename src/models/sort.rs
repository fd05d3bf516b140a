use crate::models::record::Record;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unknown sort key: {0}")]
pub struct UnknownSortKey(pub String);

/// Record field a view is sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Title,
    AuthorName,
    FirstPublishYear,
    RatingsAverage,
    Subject,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Title => "title",
            SortKey::AuthorName => "author_name",
            SortKey::FirstPublishYear => "first_publish_year",
            SortKey::RatingsAverage => "ratings_average",
            SortKey::Subject => "subject",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(SortKey::Title),
            "author_name" => Ok(SortKey::AuthorName),
            "first_publish_year" => Ok(SortKey::FirstPublishYear),
            "ratings_average" => Ok(SortKey::RatingsAverage),
            "subject" => Ok(SortKey::Subject),
            other => Err(UnknownSortKey(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn new(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Ascending,
        }
    }

    /// Flips the direction. The key never changes.
    pub fn toggle(&mut self) {
        self.direction = self.direction.flipped();
    }

    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        let ordering = SortValue::of(a, self.key).cmp_value(&SortValue::of(b, self.key));
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Comparable projection of one record field.
///
/// A missing field behaves like the empty string: it ties with empty text,
/// sorts before any non-empty text and compares against numbers as zero.
/// Sequences compare by their comma-joined text.
#[derive(Debug, Clone)]
enum SortValue<'a> {
    Missing,
    Text(Cow<'a, str>),
    Number(f64),
}

impl<'a> SortValue<'a> {
    fn of(record: &'a Record, key: SortKey) -> Self {
        match key {
            SortKey::Title => record
                .title
                .as_deref()
                .map_or(SortValue::Missing, |t| SortValue::Text(Cow::Borrowed(t))),
            SortKey::AuthorName => Self::joined(record.author_name.as_deref()),
            SortKey::Subject => Self::joined(record.subject.as_deref()),
            SortKey::FirstPublishYear => record
                .first_publish_year
                .map_or(SortValue::Missing, |y| SortValue::Number(f64::from(y))),
            SortKey::RatingsAverage => record
                .ratings_average
                .map_or(SortValue::Missing, SortValue::Number),
        }
    }

    fn joined(values: Option<&'a [String]>) -> Self {
        match values {
            None => SortValue::Missing,
            Some([single]) => SortValue::Text(Cow::Borrowed(single.as_str())),
            Some(many) => SortValue::Text(Cow::Owned(many.join(","))),
        }
    }

    fn cmp_value(&self, other: &SortValue<'_>) -> Ordering {
        use SortValue::*;

        match (self, other) {
            (Missing, Missing) => Ordering::Equal,
            (Missing, Text(t)) => cmp_text("", t),
            (Text(t), Missing) => cmp_text(t, ""),
            (Missing, Number(n)) => cmp_numbers(0.0, *n),
            (Number(n), Missing) => cmp_numbers(*n, 0.0),
            (Text(a), Text(b)) => cmp_text(a, b),
            (Number(a), Number(b)) => cmp_numbers(*a, *b),
            (Text(a), Number(b)) => cmp_text(a, &b.to_string()),
            (Number(a), Text(b)) => cmp_text(&a.to_string(), b),
        }
    }
}

fn cmp_text(a: &str, b: &str) -> Ordering {
    a.cmp(b)
}

fn cmp_numbers(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Returns the records ordered by `config`, leaving `records` untouched.
///
/// The sort is stable: records that compare equal keep their dataset order
/// in both directions.
pub fn sort_records<'a>(records: &'a [Record], config: &SortConfig) -> Vec<&'a Record> {
    let mut sorted: Vec<&Record> = records.iter().collect();
    sorted.sort_by(|a, b| config.compare(a, b));
    sorted
}
