pub mod assemble;
pub mod columnar;

use crate::domain::listing::EstateAgent;
use thiserror::Error;

pub use assemble::{concat, Dataset};
pub use columnar::write_parquet;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("{agent} table columns [{found}] do not match [{expected}]")]
    SchemaMismatch {
        agent: EstateAgent,
        expected: String,
        found: String,
    },

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow_schema::ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
}
