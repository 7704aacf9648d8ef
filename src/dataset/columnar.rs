// src/dataset/columnar.rs

use crate::dataset::assemble::{dataset_columns, Dataset};
use crate::dataset::DatasetError;
use crate::domain::listing::{Column, ColumnType};
use arrow_array::{ArrayRef, Date32Array, Int32Array, Int64Array, RecordBatch, StringArray};
use arrow_schema::{DataType, Field, Schema};
use chrono::{Datelike, NaiveDate};
use parquet::arrow::ArrowWriter;
use std::sync::Arc;

/// Days from 0001-01-01 (CE) to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

fn arrow_type(kind: ColumnType) -> DataType {
    match kind {
        ColumnType::Date => DataType::Date32,
        ColumnType::Utf8 => DataType::Utf8,
        ColumnType::Int32 => DataType::Int32,
        ColumnType::Int64 => DataType::Int64,
    }
}

pub fn arrow_schema(columns: &[Column]) -> Schema {
    Schema::new(
        columns
            .iter()
            .map(|c| Field::new(c.name, arrow_type(c.kind), c.nullable))
            .collect::<Vec<_>>(),
    )
}

fn days_since_epoch(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

pub fn to_record_batch(dataset: &Dataset) -> Result<RecordBatch, DatasetError> {
    let schema = Arc::new(arrow_schema(&dataset_columns()));
    let rows = &dataset.rows;

    let update_dates = Date32Array::from(
        rows.iter()
            .map(|r| days_since_epoch(r.listing.update_date))
            .collect::<Vec<_>>(),
    );
    let areas = StringArray::from(
        rows.iter()
            .map(|r| r.listing.area.as_deref())
            .collect::<Vec<_>>(),
    );
    let beds = Int32Array::from(rows.iter().map(|r| r.listing.num_beds).collect::<Vec<_>>());
    let costs = Int64Array::from(rows.iter().map(|r| r.listing.cost_pcm).collect::<Vec<_>>());
    let addresses = StringArray::from(
        rows.iter()
            .map(|r| r.listing.address.as_str())
            .collect::<Vec<_>>(),
    );
    let agents = StringArray::from(
        rows.iter()
            .map(|r| r.listing.estate_agent.as_str())
            .collect::<Vec<_>>(),
    );
    let descriptions = StringArray::from(
        rows.iter()
            .map(|r| r.listing.description.as_deref())
            .collect::<Vec<_>>(),
    );
    let ids = StringArray::from(
        rows.iter()
            .map(|r| r.unique_id.as_str())
            .collect::<Vec<_>>(),
    );

    let columns: Vec<ArrayRef> = vec![
        Arc::new(update_dates),
        Arc::new(areas),
        Arc::new(beds),
        Arc::new(costs),
        Arc::new(addresses),
        Arc::new(agents),
        Arc::new(descriptions),
        Arc::new(ids),
    ];

    Ok(RecordBatch::try_new(schema, columns)?)
}

/// Serializes the dataset to an in-memory Parquet file.
pub fn write_parquet(dataset: &Dataset) -> Result<Vec<u8>, DatasetError> {
    let batch = to_record_batch(dataset)?;

    let mut buffer = Vec::new();
    let mut writer = ArrowWriter::try_new(&mut buffer, batch.schema(), None)?;
    writer.write(&batch)?;
    writer.close()?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::assemble::concat;
    use crate::domain::listing::{EstateAgent, Listing, ListingTable};
    use arrow_array::Array;
    use bytes::Bytes;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    fn sample() -> Dataset {
        let today = NaiveDate::from_ymd_opt(2024, 5, 14).unwrap();
        let rows = vec![
            Listing {
                update_date: today,
                area: Some("Leyton".into()),
                num_beds: Some(2),
                cost_pcm: Some(1200),
                address: "Grove Road, Leyton".into(),
                estate_agent: EstateAgent::Foxtons,
                description: None,
            },
            Listing {
                update_date: today,
                area: None,
                num_beds: None,
                cost_pcm: None,
                address: "Unknown Street".into(),
                estate_agent: EstateAgent::Central,
                description: Some("Studio".into()),
            },
        ];
        concat(vec![ListingTable::new(EstateAgent::Foxtons, rows)]).unwrap()
    }

    #[test]
    fn epoch_day_offsets() {
        assert_eq!(days_since_epoch(NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()), 0);
        assert_eq!(days_since_epoch(NaiveDate::from_ymd_opt(1970, 1, 2).unwrap()), 1);
        assert_eq!(days_since_epoch(NaiveDate::from_ymd_opt(2024, 5, 14).unwrap()), 19857);
    }

    #[test]
    fn record_batch_keeps_nulls() {
        let batch = to_record_batch(&sample()).unwrap();
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.num_columns(), 8);

        let areas = batch.column(1).as_any().downcast_ref::<StringArray>().unwrap();
        assert_eq!(areas.value(0), "Leyton");
        assert!(areas.is_null(1));

        let costs = batch.column(3).as_any().downcast_ref::<Int64Array>().unwrap();
        assert_eq!(costs.value(0), 1200);
        assert!(costs.is_null(1));
    }

    #[test]
    fn parquet_file_has_the_published_schema() {
        let bytes = write_parquet(&sample()).unwrap();

        let builder = ParquetRecordBatchReaderBuilder::try_new(Bytes::from(bytes)).unwrap();
        let schema = builder.schema().clone();
        let fields: Vec<(String, DataType, bool)> = schema
            .fields()
            .iter()
            .map(|f| (f.name().clone(), f.data_type().clone(), f.is_nullable()))
            .collect();

        assert_eq!(
            fields,
            vec![
                ("update_date".to_string(), DataType::Date32, false),
                ("area".to_string(), DataType::Utf8, true),
                ("num_beds".to_string(), DataType::Int32, true),
                ("cost_pcm".to_string(), DataType::Int64, true),
                ("address".to_string(), DataType::Utf8, false),
                ("estate_agent".to_string(), DataType::Utf8, false),
                ("description".to_string(), DataType::Utf8, true),
                ("unique_id".to_string(), DataType::Utf8, false),
            ]
        );

        let rows: usize = builder
            .build()
            .unwrap()
            .map(|batch| batch.unwrap().num_rows())
            .sum();
        assert_eq!(rows, 2);
    }

    #[test]
    fn empty_dataset_still_serializes() {
        let bytes = write_parquet(&Dataset::default()).unwrap();
        let builder = ParquetRecordBatchReaderBuilder::try_new(Bytes::from(bytes)).unwrap();
        assert_eq!(builder.schema().fields().len(), 8);
    }
}
