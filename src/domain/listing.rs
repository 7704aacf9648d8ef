// src/domain/listing.rs

use chrono::NaiveDate;
use std::fmt;

/// The agency a listing was scraped from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EstateAgent {
    Central,
    StowBros,
    Foxtons,
}

impl EstateAgent {
    /// Literal written to the `estate_agent` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            EstateAgent::Central => "Central",
            EstateAgent::StowBros => "Stow Bros",
            EstateAgent::Foxtons => "Foxtons",
        }
    }
}

impl fmt::Display for EstateAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A listing after normalization: the shared seven-field row.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    /// Run date, not the listing's own posting date.
    pub update_date: NaiveDate,
    pub area: Option<String>,
    pub num_beds: Option<i32>,
    pub cost_pcm: Option<i64>,
    pub address: String,
    pub estate_agent: EstateAgent,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Date,
    Utf8,
    Int32,
    Int64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnType,
    pub nullable: bool,
}

impl Column {
    pub const fn new(name: &'static str, kind: ColumnType, nullable: bool) -> Self {
        Self {
            name,
            kind,
            nullable,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let null = if self.nullable { "?" } else { "" };
        write!(f, "{}: {:?}{null}", self.name, self.kind)
    }
}

/// Column order every normalizer must emit.
pub const LISTING_COLUMNS: [Column; 7] = [
    Column::new("update_date", ColumnType::Date, false),
    Column::new("area", ColumnType::Utf8, true),
    Column::new("num_beds", ColumnType::Int32, true),
    Column::new("cost_pcm", ColumnType::Int64, true),
    Column::new("address", ColumnType::Utf8, false),
    Column::new("estate_agent", ColumnType::Utf8, false),
    Column::new("description", ColumnType::Utf8, true),
];

/// One source's normalized rows together with the columns they claim.
#[derive(Debug, Clone)]
pub struct ListingTable {
    pub agent: EstateAgent,
    pub columns: Vec<Column>,
    pub rows: Vec<Listing>,
}

impl ListingTable {
    pub fn new(agent: EstateAgent, rows: Vec<Listing>) -> Self {
        Self {
            agent,
            columns: LISTING_COLUMNS.to_vec(),
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}
