// src/dataset/assemble.rs

use crate::dataset::DatasetError;
use crate::domain::listing::{Column, ColumnType, Listing, ListingTable, LISTING_COLUMNS};
use sha2::{Digest, Sha256};

/// Unit separator between hashed fields.
const FIELD_SEPARATOR: &str = "\u{1f}";
const NULL_TEXT: &str = "null";

pub const UNIQUE_ID_COLUMN: Column = Column::new("unique_id", ColumnType::Utf8, false);

/// The listing columns followed by `unique_id`.
pub fn dataset_columns() -> Vec<Column> {
    let mut columns = LISTING_COLUMNS.to_vec();
    columns.push(UNIQUE_ID_COLUMN);
    columns
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatasetRow {
    pub listing: Listing,
    pub unique_id: String,
}

/// All sources' rows, stacked, each carrying its fingerprint.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub rows: Vec<DatasetRow>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Stacks the tables in the given order. Every table must carry exactly
/// the canonical listing columns.
pub fn concat(tables: Vec<ListingTable>) -> Result<Dataset, DatasetError> {
    for table in &tables {
        if table.columns.as_slice() != LISTING_COLUMNS.as_slice() {
            return Err(DatasetError::SchemaMismatch {
                agent: table.agent,
                expected: describe(&LISTING_COLUMNS),
                found: describe(&table.columns),
            });
        }
    }

    let rows = tables
        .into_iter()
        .flat_map(|table| table.rows)
        .map(|listing| DatasetRow {
            unique_id: unique_id(
                listing.description.as_deref(),
                listing.cost_pcm,
                listing.area.as_deref(),
            ),
            listing,
        })
        .collect();

    Ok(Dataset { rows })
}

/// Deterministic fingerprint over (description, cost_pcm, area).
/// Absent values hash as "null", so equal null patterns collide.
pub fn unique_id(description: Option<&str>, cost_pcm: Option<i64>, area: Option<&str>) -> String {
    let cost = cost_pcm.map(|c| c.to_string());

    let mut hasher = Sha256::new();
    hasher.update(description.unwrap_or(NULL_TEXT).as_bytes());
    hasher.update(FIELD_SEPARATOR.as_bytes());
    hasher.update(cost.as_deref().unwrap_or(NULL_TEXT).as_bytes());
    hasher.update(FIELD_SEPARATOR.as_bytes());
    hasher.update(area.unwrap_or(NULL_TEXT).as_bytes());
    let digest = hasher.finalize();

    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(prefix).to_string()
}

fn describe(columns: &[Column]) -> String {
    columns
        .iter()
        .map(Column::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
