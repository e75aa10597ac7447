//! Core data types for the complaint feed
//!
//! This module defines the records served by the complaint endpoint:
//! - `Complaint`: one customer-filed incident
//! - `FeedResponse`: the `{ count, complaints }` envelope
//! - `MealType`: the meal categories the dashboard knows about
//! - `DisplayZone`: the time zone complaint timestamps are read in

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Status value marking an unresolved complaint. Anything else is resolved.
pub const OPEN_STATUS: &str = "Open";

/// Naive timestamp layouts accepted after RFC 3339 fails.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Complaint identifier, either numeric or textual depending on the feed
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComplaintId {
    Number(i64),
    Text(String),
}

impl Default for ComplaintId {
    fn default() -> Self {
        ComplaintId::Text(String::new())
    }
}

impl fmt::Display for ComplaintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComplaintId::Number(n) => write!(f, "{}", n),
            ComplaintId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for ComplaintId {
    fn from(n: i64) -> Self {
        ComplaintId::Number(n)
    }
}

impl From<i32> for ComplaintId {
    fn from(n: i32) -> Self {
        ComplaintId::Number(n as i64)
    }
}

impl From<&str> for ComplaintId {
    fn from(s: &str) -> Self {
        ComplaintId::Text(s.to_string())
    }
}

/// A single complaint record
///
/// Every field is optional on the wire. Missing, `null` or wrongly-typed
/// values fall back to the empty string / zero so a sloppy feed still
/// renders. Deserializing a JSON object into a `Complaint` never fails.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Complaint {
    #[serde(default, deserialize_with = "lenient")]
    pub id: ComplaintId,
    #[serde(default, deserialize_with = "lenient_string")]
    pub customer_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    /// Observed domain is 1-5, but the feed does not enforce it
    #[serde(default, deserialize_with = "lenient_integer")]
    pub severity: i64,
    /// ISO-8601 timestamp, kept raw and parsed on demand
    #[serde(default, deserialize_with = "lenient_string")]
    pub complaint_date: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub meal_type: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: String,
}

impl Complaint {
    /// Create a complaint with the given id and everything else empty
    pub fn new(id: impl Into<ComplaintId>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Builder method: set customer name
    pub fn customer(mut self, name: impl Into<String>) -> Self {
        self.customer_name = name.into();
        self
    }

    /// Builder method: set description
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    /// Builder method: set severity
    pub fn severity(mut self, severity: i64) -> Self {
        self.severity = severity;
        self
    }

    /// Builder method: set the raw complaint timestamp
    pub fn filed(mut self, date: impl Into<String>) -> Self {
        self.complaint_date = date.into();
        self
    }

    /// Builder method: set meal type
    pub fn meal_type(mut self, meal: impl Into<String>) -> Self {
        self.meal_type = meal.into();
        self
    }

    /// Builder method: set status
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Unresolved complaints carry exactly `"Open"` (case-sensitive)
    pub fn is_open(&self) -> bool {
        self.status == OPEN_STATUS
    }

    /// Known meal category, if the raw value matches one exactly
    pub fn meal(&self) -> Option<MealType> {
        MealType::parse(&self.meal_type)
    }

    /// Wall-clock time the complaint was filed, read in `zone`
    pub fn filed_at(&self, zone: DisplayZone) -> Option<NaiveDateTime> {
        parse_complaint_date(&self.complaint_date, zone)
    }
}

/// Top-level payload returned by the complaint endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedResponse {
    /// Server-advertised total; not guaranteed to match `complaints.len()`
    #[serde(default, deserialize_with = "lenient_count")]
    pub count: u64,
    /// Entries that are not JSON objects are dropped
    #[serde(default, deserialize_with = "lenient_complaints")]
    pub complaints: Vec<Complaint>,
}

impl FeedResponse {
    /// Build a response whose `count` matches the list
    pub fn new(complaints: Vec<Complaint>) -> Self {
        Self {
            count: complaints.len() as u64,
            complaints,
        }
    }

    /// Build a response with an explicit (possibly inconsistent) count
    pub fn with_count(count: u64, complaints: Vec<Complaint>) -> Self {
        Self { count, complaints }
    }

    /// Whether the advertised count agrees with the list length
    pub fn is_consistent(&self) -> bool {
        self.count == self.complaints.len() as u64
    }
}

/// Meal categories, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Brunch,
}

impl MealType {
    /// All categories in the order charts present them
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Brunch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Brunch => "brunch",
        }
    }

    /// Exact, case-sensitive match against the wire value
    pub fn parse(s: &str) -> Option<MealType> {
        MealType::ALL.into_iter().find(|m| m.as_str() == s)
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time zone used to turn complaint timestamps into calendar hours and days
///
/// Timestamps carrying an offset are converted into this zone. Naive
/// timestamps are taken as wall-clock time already.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DisplayZone {
    #[default]
    Local,
    Utc,
    Fixed(FixedOffset),
}

impl DisplayZone {
    /// Convert an offset-aware timestamp into wall-clock time in this zone
    pub fn localize(&self, dt: DateTime<FixedOffset>) -> NaiveDateTime {
        match self {
            DisplayZone::Local => dt.with_timezone(&Local).naive_local(),
            DisplayZone::Utc => dt.naive_utc(),
            DisplayZone::Fixed(offset) => dt.with_timezone(offset).naive_local(),
        }
    }
}

impl FromStr for DisplayZone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "local" => return Ok(DisplayZone::Local),
            "utc" | "z" => return Ok(DisplayZone::Utc),
            _ => {}
        }

        parse_offset(trimmed)
            .map(DisplayZone::Fixed)
            .ok_or_else(|| format!("Invalid time zone: {}. Use: local, utc, +02:00", s))
    }
}

impl TryFrom<String> for DisplayZone {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<DisplayZone> for String {
    fn from(zone: DisplayZone) -> Self {
        zone.to_string()
    }
}

impl fmt::Display for DisplayZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayZone::Local => f.write_str("local"),
            DisplayZone::Utc => f.write_str("utc"),
            DisplayZone::Fixed(offset) => write!(f, "{}", offset),
        }
    }
}

/// "+02:00", "-0530", "+05" → FixedOffset
fn parse_offset(s: &str) -> Option<FixedOffset> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };

    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
        _ => return None,
    };

    if minutes >= 60 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Parse a complaint timestamp into wall-clock time in `zone`.
/// Returns None for empty or unparseable strings.
pub fn parse_complaint_date(raw: &str, zone: DisplayZone) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(zone.localize(dt));
    }

    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

// ============================================
// Lenient field decoding
// ============================================

/// Any value `T` cannot be built from, `null` included, becomes `T::default()`
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Strings pass through, numbers and booleans are rendered, anything else is empty
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

fn lenient_integer<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(integer_value(&Value::deserialize(deserializer)?).unwrap_or_default())
}

/// Negative or non-integral counts read as 0
fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let count = integer_value(&Value::deserialize(deserializer)?).unwrap_or_default();
    Ok(u64::try_from(count).unwrap_or_default())
}

fn lenient_complaints<'de, D>(deserializer: D) -> Result<Vec<Complaint>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };

    let total = items.len();
    let complaints: Vec<Complaint> = items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();

    if complaints.len() < total {
        tracing::warn!(
            dropped = total - complaints.len(),
            "Dropped complaint entries that are not JSON objects"
        );
    }
    Ok(complaints)
}

/// JSON integers, and floats with no fractional part (`3.0`).
/// Fractional values have no integer reading and yield None.
fn integer_value(value: &Value) -> Option<i64> {
    let Value::Number(n) = value else {
        return None;
    };
    if let Some(i) = n.as_i64() {
        return Some(i);
    }

    let f = n.as_f64()?;
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (f.fract() == 0.0 && in_range).then(|| f as i64)
}
