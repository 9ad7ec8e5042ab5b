//! Data row parsing
//!
//! Turns one raw spreadsheet row into a [`MemberRow`]: every cell is parsed
//! and every category/tag/property name resolved before anything is written.

use std::borrow::Cow;
use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;
use shared::models::Member;

use super::RowError;
use super::definitions::Definitions;
use super::header::{HeaderMap, ScalarField};

/// One submitted row: column name → cell value
pub type RawRow = serde_json::Map<String, Value>;

/// Trimmed text of a cell; `None` when absent or blank
pub fn cell_text<'a>(row: &'a RawRow, column: &str) -> Option<Cow<'a, str>> {
    let text = match row.get(column)? {
        Value::String(s) => Cow::Borrowed(s.trim()),
        Value::Number(n) => Cow::Owned(number_text(n)),
        Value::Bool(b) => Cow::Owned(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    if text.is_empty() { None } else { Some(text) }
}

/// Spreadsheet exports write integers as `1001.0`; drop the zero fraction
fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
            (f as i64).to_string()
        }
        _ => n.to_string(),
    }
}

/// Desired member ↔ category association
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CategorySlot {
    pub category_id: i64,
    pub position: i32,
}

/// Fully parsed and resolved data row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberRow {
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub star: Option<i32>,
    pub created_at: Option<i64>,
    /// Outer `None`: column not mapped. `Some(None)`: mapped but blank.
    pub logined_at: Option<Option<i64>>,
    pub phones: Vec<String>,
    pub categories: Vec<CategorySlot>,
    pub tags: Vec<i64>,
    /// `(property_id, value)`, non-blank values only
    pub properties: Vec<(i64, String)>,
}

impl MemberRow {
    /// Overwrite the member's scalars with every value present in the row
    pub fn apply_to(&self, member: &mut Member) {
        if let Some(name) = &self.name {
            member.name = Some(name.clone());
        }
        if let Some(username) = &self.username {
            member.username = Some(username.clone());
        }
        if let Some(email) = &self.email {
            member.email = Some(email.clone());
        }
        if let Some(role) = &self.role {
            member.role = role.clone();
        }
        if let Some(star) = self.star {
            member.star = star;
        }
        if let Some(created_at) = self.created_at {
            member.created_at = created_at;
        }
        if let Some(logined_at) = self.logined_at {
            member.logined_at = logined_at;
        }
    }
}

/// Member id of a row
pub fn extract_id(row: &RawRow, header: &HeaderMap) -> Option<String> {
    let column = header.column(ScalarField::Id)?;
    cell_text(row, column).map(Cow::into_owned)
}

pub fn parse_row(
    row: &RawRow,
    header: &HeaderMap,
    definitions: &Definitions,
) -> Result<MemberRow, RowError> {
    let text = |field: ScalarField| {
        header
            .column(field)
            .and_then(|column| cell_text(row, column))
            .map(Cow::into_owned)
    };

    let star = text(ScalarField::Star)
        .map(|raw| parse_star(&raw).ok_or(RowError::InvalidStar(raw)))
        .transpose()?;
    let created_at = text(ScalarField::CreatedAt)
        .map(|raw| parse_timestamp(ScalarField::CreatedAt, &raw))
        .transpose()?;
    let logined_at = match header.column(ScalarField::LoginedAt) {
        None => None,
        Some(_) => Some(
            text(ScalarField::LoginedAt)
                .map(|raw| parse_timestamp(ScalarField::LoginedAt, &raw))
                .transpose()?,
        ),
    };

    let mut phones = Vec::new();
    for column in header.phone_columns() {
        if let Some(phone) = cell_text(row, column)
            && !phones.iter().any(|p: &String| *p == *phone)
        {
            phones.push(phone.into_owned());
        }
    }

    let mut categories: Vec<CategorySlot> = Vec::new();
    for (position, column) in header.category_columns() {
        let Some(name) = cell_text(row, column) else {
            continue;
        };
        let category_id = definitions
            .category_id(&name)
            .ok_or_else(|| RowError::UnknownCategory(name.to_string()))?;
        if categories.iter().all(|c| c.category_id != category_id) {
            categories.push(CategorySlot {
                category_id,
                position: i32::from(position),
            });
        }
    }

    let mut tags = Vec::new();
    for column in header.tag_columns() {
        let Some(name) = cell_text(row, column) else {
            continue;
        };
        let tag_id = definitions
            .tag_id(&name)
            .ok_or_else(|| RowError::UnknownTag(name.to_string()))?;
        if !tags.contains(&tag_id) {
            tags.push(tag_id);
        }
    }

    let mut seen_properties = HashSet::new();
    let mut properties = Vec::new();
    for property in header.property_columns() {
        let Some(property_id) = definitions.property_id(&property.property_name) else {
            tracing::debug!(
                column = %property.column,
                property = %property.property_name,
                "Ignoring column for unknown property"
            );
            continue;
        };
        if seen_properties.contains(&property_id) {
            continue;
        }
        if let Some(value) = cell_text(row, &property.column) {
            seen_properties.insert(property_id);
            properties.push((property_id, value.into_owned()));
        }
    }

    Ok(MemberRow {
        name: text(ScalarField::Name),
        username: text(ScalarField::Username),
        email: text(ScalarField::Email),
        role: text(ScalarField::Role),
        star,
        created_at,
        logined_at,
        phones,
        categories,
        tags,
        properties,
    })
}

/// Integer star count; integral floats such as `3.0` are accepted
fn parse_star(raw: &str) -> Option<i32> {
    if let Ok(star) = raw.parse::<i32>() {
        return Some(star);
    }
    let value = raw.parse::<f64>().ok()?;
    if value.fract() == 0.0 && value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX) {
        Some(value as i32)
    } else {
        None
    }
}

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y/%m/%d %H:%M:%S"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Epoch milliseconds of a date cell; naive values are taken as UTC
pub fn parse_timestamp(field: ScalarField, raw: &str) -> Result<i64, RowError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.timestamp_millis());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(dt.and_utc().timestamp_millis());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format)
            && let Some(dt) = date.and_hms_opt(0, 0, 0)
        {
            return Ok(dt.and_utc().timestamp_millis());
        }
    }
    Err(RowError::InvalidDate {
        field: field.as_str(),
        value: raw.to_string(),
    })
}
