use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::fields;

/// One guest review (or check-in) as delivered by the backend: a loosely
/// typed map of column name to value. Every accessor fails soft.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Review {
    pub fn new(id: Option<String>, fields: Map<String, Value>) -> Self {
        Self { id, fields }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Numeric view of a field; anything missing or unparseable is zero.
    pub fn number(&self, field: &str) -> f64 {
        self.get(field).map(parse_numeric_or_zero).unwrap_or(0.0)
    }

    /// Text view of a field, present only when the value is truthy.
    pub fn text(&self, field: &str) -> Option<String> {
        match self.get(field)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Array(items) => {
                let parts: Vec<String> = items
                    .iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s.clone()),
                        Value::Number(n) => Some(n.to_string()),
                        _ => None,
                    })
                    .collect();
                if parts.is_empty() {
                    None
                } else {
                    Some(parts.join(", "))
                }
            }
            Value::Number(n) if n.as_f64().is_some_and(|v| v != 0.0) => Some(n.to_string()),
            Value::Bool(true) => Some("true".to_string()),
            _ => None,
        }
    }

    pub fn flag(&self, field: &str) -> bool {
        matches!(self.get(field), Some(Value::Bool(true)))
    }

    /// Comma-separated multi-value field, trimmed, with empty tokens dropped.
    pub fn tokens(&self, field: &str) -> Vec<String> {
        self.text(field)
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|token| !token.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn submitted_on(&self) -> Option<DateTime<Utc>> {
        self.text(fields::SUBMITTED_ON)
            .as_deref()
            .and_then(parse_timestamp)
    }

    pub fn guest_name(&self) -> String {
        self.text(fields::FULL_NAME)
            .unwrap_or_else(|| "Anonymous".to_string())
    }
}

/// Zero-default numeric coercion used by every rating aggregator.
pub fn parse_numeric_or_zero(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        Value::Array(items) if items.len() == 1 => parse_numeric_or_zero(&items[0]),
        _ => 0.0,
    };

    if parsed.is_finite() {
        parsed
    } else {
        0.0
    }
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(parsed.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodPair {
    #[serde(default)]
    pub current_period: Vec<Review>,
    #[serde(default)]
    pub previous_period: Vec<Review>,
}

impl PeriodPair {
    pub fn new(current_period: Vec<Review>, previous_period: Vec<Review>) -> Self {
        Self {
            current_period,
            previous_period,
        }
    }
}

/// Inclusive calendar-day range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatCard {
    pub value: String,
    pub change: String,
}

impl StatCard {
    #[cfg(test)]
    pub fn zero() -> Self {
        Self {
            value: "0%".to_string(),
            change: "0%".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketingSource {
    pub name: String,
    pub value: f64,
    pub previous_value: f64,
    pub count: usize,
    pub previous_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentShare {
    pub name: String,
    pub value: i64,
    pub previous_value: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityCount {
    pub name: String,
    pub count: usize,
    pub previous_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SightingCount {
    pub name: String,
    pub value: usize,
    pub previous_value: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMention {
    pub name: String,
    pub mentions: usize,
    pub previous_mentions: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuidePerformance {
    pub name: String,
    pub rating: f64,
    pub previous_rating: f64,
    pub trips: usize,
    pub previous_trips: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TravelAgent {
    pub name: String,
    pub bookings: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuestNationality {
    pub country: String,
    pub count: usize,
    /// `[longitude, latitude]`
    pub coordinates: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentScore {
    pub name: String,
    pub current: f64,
    pub previous: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommunicationRating {
    pub name: String,
    pub value: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sentiment {
    Positive,
    Negative,
}

impl Sentiment {
    /// Missing or unrecognised labels count as positive.
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            Some(raw) if raw.trim().eq_ignore_ascii_case("negative") => Sentiment::Negative,
            _ => Sentiment::Positive,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "POSITIVE",
            Sentiment::Negative => "NEGATIVE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentEntry {
    pub name: String,
    pub sentiment: Sentiment,
    pub comment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    pub id: Option<String>,
    pub name: String,
    pub submitted_on: Option<String>,
    pub ots: f64,
    pub wes: f64,
    pub recommend: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPage {
    pub data: Vec<ReviewSummary>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub items_per_page: usize,
}
