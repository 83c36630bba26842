use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, AsArray, BooleanArray, ListArray, ListBuilder, StringArray, StringBuilder,
};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use log::info;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;
use parquet::format::KeyValue;

use super::model::CorpusDataset;
use crate::error::{CorpusError, Result};

/// Output file stem; the writer appends [`ARCHIVE_EXTENSION`].
pub const ARCHIVE_STEM: &str = "lingspam";
pub const ARCHIVE_EXTENSION: &str = "parquet";

pub const FILE_NAMES: &str = "file_names";
pub const TARGETS: &str = "targets";
pub const WORDS: &str = "words";
/// File-level metadata key holding the JSON-encoded class names.
pub const TARGET_NAMES_KEY: &str = "target_names";

/// `<dir>/lingspam.parquet`
pub fn archive_path(dir: &Path) -> PathBuf {
    dir.join(ARCHIVE_STEM).with_extension(ARCHIVE_EXTENSION)
}

/// Arrow schema of the archive: one row per corpus entry.
///
/// `words` is a list column, so the ragged token lists are stored as one
/// flat string buffer plus per-row offsets.
pub fn archive_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new(FILE_NAMES, DataType::Utf8, false),
        Field::new(TARGETS, DataType::Boolean, false),
        Field::new(
            WORDS,
            DataType::List(Arc::new(Field::new("item", DataType::Utf8, true))),
            false,
        ),
    ]))
}

// ---------------------------------------------------------------------------
// Writer
// ---------------------------------------------------------------------------

fn to_record_batch(dataset: &CorpusDataset) -> Result<RecordBatch> {
    let file_names = StringArray::from_iter_values(dataset.file_names());
    let targets = BooleanArray::from(dataset.targets().to_vec());

    let mut words_builder = ListBuilder::new(StringBuilder::new());
    for row in dataset.words() {
        let values = words_builder.values();
        for word in row {
            values.append_value(word);
        }
        words_builder.append(true);
    }
    let words = words_builder.finish();

    let batch = RecordBatch::try_new(
        archive_schema(),
        vec![
            Arc::new(file_names) as ArrayRef,
            Arc::new(targets),
            Arc::new(words),
        ],
    )?;
    Ok(batch)
}

/// Write the whole dataset to a Parquet archive at `path`.
pub fn write_archive(path: &Path, dataset: &CorpusDataset) -> Result<()> {
    let batch = to_record_batch(dataset)?;

    let target_names = serde_json::to_string(dataset.target_names())?;
    let props = WriterProperties::builder()
        .set_key_value_metadata(Some(vec![KeyValue::new(
            TARGET_NAMES_KEY.to_string(),
            target_names,
        )]))
        .build();

    let file = File::create(path).map_err(|source| CorpusError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
    writer.write(&batch)?;
    writer.close()?;

    info!("wrote {} rows to {}", batch.num_rows(), path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

/// Load an archive written by [`write_archive`].
pub fn read_archive(path: &Path) -> Result<CorpusDataset> {
    let file = File::open(path).map_err(|source| CorpusError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

    let target_names = builder
        .metadata()
        .file_metadata()
        .key_value_metadata()
        .and_then(|kvs| kvs.iter().find(|kv| kv.key == TARGET_NAMES_KEY))
        .and_then(|kv| kv.value.as_deref())
        .ok_or_else(|| CorpusError::Schema(format!("missing '{TARGET_NAMES_KEY}' metadata")))?;
    let target_names: Vec<String> = serde_json::from_str(target_names)?;

    let reader = builder.build()?;

    let mut file_names = Vec::new();
    let mut targets = Vec::new();
    let mut words = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;

        let names_col = column(&batch, FILE_NAMES)?;
        let names = names_col
            .as_string_opt::<i32>()
            .ok_or_else(|| wrong_type(FILE_NAMES, names_col.data_type()))?;
        file_names.extend(names.iter().map(|v| v.unwrap_or_default().to_string()));

        let targets_col = column(&batch, TARGETS)?;
        let bools = targets_col
            .as_boolean_opt()
            .ok_or_else(|| wrong_type(TARGETS, targets_col.data_type()))?;
        targets.extend(bools.iter().map(|v| v.unwrap_or(false)));

        let words_col = column(&batch, WORDS)?;
        let lists = words_col
            .as_any()
            .downcast_ref::<ListArray>()
            .ok_or_else(|| wrong_type(WORDS, words_col.data_type()))?;
        for row in 0..lists.len() {
            words.push(extract_string_list(lists, row)?);
        }
    }

    CorpusDataset::from_columns(target_names, file_names, targets, words)
        .ok_or_else(|| CorpusError::Schema("column lengths differ".to_string()))
}

// -- Arrow helpers --

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef> {
    batch
        .column_by_name(name)
        .ok_or_else(|| CorpusError::Schema(format!("missing '{name}' column")))
}

fn wrong_type(name: &str, actual: &DataType) -> CorpusError {
    CorpusError::Schema(format!("column '{name}' has unexpected type {actual:?}"))
}

/// Extract the token list stored at `row`; a null row reads as empty.
fn extract_string_list(lists: &ListArray, row: usize) -> Result<Vec<String>> {
    if lists.is_null(row) {
        return Ok(Vec::new());
    }
    let values = lists.value(row);
    let strings = values
        .as_string_opt::<i32>()
        .ok_or_else(|| wrong_type(WORDS, values.data_type()))?;
    Ok(strings
        .iter()
        .map(|v| v.unwrap_or_default().to_string())
        .collect())
}
