use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{ArrayRef, BooleanArray, StringArray};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;

use lingspam_prep::data::archive::{archive_path, read_archive};
use lingspam_prep::CorpusDataset;

/// Rows shown in the preview table.
const PREVIEW_ROWS: usize = 5;
/// Tokens per row shown in the preview table.
const PREVIEW_WORDS: usize = 8;

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args_os().skip(1);
    let path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| archive_path(std::path::Path::new(".")));
    if args.next().is_some() {
        bail!("usage: inspect_archive [archive.parquet]");
    }

    let dataset =
        read_archive(&path).with_context(|| format!("loading archive {}", path.display()))?;
    let summary = dataset.summary();

    println!("Archive      : {}", path.display());
    println!("target_names : {:?}", dataset.target_names());
    println!("file_names   : {}", dataset.file_names().len());
    println!("targets      : {}", dataset.targets().len());
    println!("words        : {}", dataset.words().len());
    println!("Summary      : {summary}");
    println!(
        "JSON         : {}",
        serde_json::to_string(&summary).context("encoding summary")?
    );

    if !dataset.is_empty() {
        println!("{}", preview(&dataset)?);
    }
    Ok(())
}

/// Tabular preview of the first rows, with the class name resolved.
fn preview(dataset: &CorpusDataset) -> Result<String> {
    let rows = dataset.len().min(PREVIEW_ROWS);
    let names = dataset.target_names();

    let class: Vec<String> = dataset.targets()[..rows]
        .iter()
        .map(|&t| names.get(usize::from(t)).cloned().unwrap_or_default())
        .collect();
    let words: Vec<String> = dataset.words()[..rows]
        .iter()
        .map(|w| w[..w.len().min(PREVIEW_WORDS)].join(" "))
        .collect();

    let batch = RecordBatch::try_from_iter(vec![
        (
            "file_name",
            Arc::new(StringArray::from_iter_values(&dataset.file_names()[..rows])) as ArrayRef,
        ),
        (
            "target",
            Arc::new(BooleanArray::from(dataset.targets()[..rows].to_vec())) as ArrayRef,
        ),
        ("class", Arc::new(StringArray::from_iter_values(&class)) as ArrayRef),
        ("words", Arc::new(StringArray::from_iter_values(&words)) as ArrayRef),
    ])
    .context("building preview")?;

    Ok(pretty_format_batches(&[batch])
        .context("formatting preview")?
        .to_string())
}
