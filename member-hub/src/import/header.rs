//! Header mapping
//!
//! The first submitted row maps each spreadsheet column (localized, free
//! text) to a canonical field path such as `name`, `phones.0` or
//! `properties.2`.

use std::collections::{BTreeMap, HashMap};

use super::ImportError;
use super::row::{RawRow, cell_text};

/// Member scalar columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarField {
    Id,
    Name,
    Username,
    Email,
    Role,
    Star,
    CreatedAt,
    LoginedAt,
}

impl ScalarField {
    fn from_path(path: &str) -> Option<Self> {
        match path {
            "id" => Some(Self::Id),
            "name" => Some(Self::Name),
            "username" => Some(Self::Username),
            "email" => Some(Self::Email),
            "role" => Some(Self::Role),
            "star" => Some(Self::Star),
            "createdAt" => Some(Self::CreatedAt),
            "loginedAt" => Some(Self::LoginedAt),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Username => "username",
            Self::Email => "email",
            Self::Role => "role",
            Self::Star => "star",
            Self::CreatedAt => "createdAt",
            Self::LoginedAt => "loginedAt",
        }
    }
}

/// Parsed header cell
#[derive(Debug, Clone, PartialEq, Eq)]
enum FieldPath {
    Scalar(ScalarField),
    Phone(u16),
    Category(u16),
    Tag(u16),
    /// `properties.N` (None) or `properties.<name>` (Some)
    Property(Option<String>),
}

impl FieldPath {
    fn parse(path: &str) -> Option<Self> {
        if let Some(field) = ScalarField::from_path(path) {
            return Some(Self::Scalar(field));
        }
        let (list, suffix) = path.split_once('.')?;
        let index = suffix.parse::<u16>().ok();
        match list {
            "phones" => index.map(Self::Phone),
            "categories" => index.map(Self::Category),
            "tags" => index.map(Self::Tag),
            "properties" if index.is_some() => Some(Self::Property(None)),
            "properties" if !suffix.trim().is_empty() => {
                Some(Self::Property(Some(suffix.trim().to_string())))
            }
            _ => None,
        }
    }
}

/// Property column and the definition name it refers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyColumn {
    pub column: String,
    pub property_name: String,
}

/// Canonical field path → spreadsheet column name
#[derive(Debug, Clone, Default)]
pub struct HeaderMap {
    scalars: HashMap<ScalarField, String>,
    phones: BTreeMap<u16, String>,
    categories: BTreeMap<u16, String>,
    tags: BTreeMap<u16, String>,
    properties: Vec<PropertyColumn>,
}

impl HeaderMap {
    /// Build the mapping from the header row
    ///
    /// Columns are visited in submission order. When two columns claim the
    /// same scalar or list slot the first one keeps it; every property column
    /// is kept and the row parser takes the first non-blank value.
    pub fn parse(header: &RawRow) -> Result<Self, ImportError> {
        let mut map = Self::default();

        for column in header.keys() {
            let Some(path) = cell_text(header, column) else {
                continue;
            };
            let Some(field) = FieldPath::parse(&path) else {
                tracing::debug!(column = %column, path = %path, "Ignoring unrecognized header cell");
                continue;
            };
            match field {
                FieldPath::Scalar(scalar) => {
                    map.scalars.entry(scalar).or_insert_with(|| column.clone());
                }
                FieldPath::Phone(index) => {
                    map.phones.entry(index).or_insert_with(|| column.clone());
                }
                FieldPath::Category(index) => {
                    map.categories.entry(index).or_insert_with(|| column.clone());
                }
                FieldPath::Tag(index) => {
                    map.tags.entry(index).or_insert_with(|| column.clone());
                }
                FieldPath::Property(name) => {
                    let property_name = name.unwrap_or_else(|| column.trim().to_string());
                    map.properties.push(PropertyColumn {
                        column: column.clone(),
                        property_name,
                    });
                }
            }
        }

        if !map.scalars.contains_key(&ScalarField::Id) {
            return Err(ImportError::MissingIdColumn);
        }
        Ok(map)
    }

    /// Column mapped to a scalar field
    pub fn column(&self, field: ScalarField) -> Option<&str> {
        self.scalars.get(&field).map(String::as_str)
    }

    pub fn phone_columns(&self) -> impl Iterator<Item = &str> {
        self.phones.values().map(String::as_str)
    }

    /// `(position, column)` in ascending position order
    pub fn category_columns(&self) -> impl Iterator<Item = (u16, &str)> {
        self.categories.iter().map(|(i, c)| (*i, c.as_str()))
    }

    pub fn tag_columns(&self) -> impl Iterator<Item = &str> {
        self.tags.values().map(String::as_str)
    }

    pub fn property_columns(&self) -> &[PropertyColumn] {
        &self.properties
    }
}
