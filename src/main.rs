use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;

use lingspam_prep::data::archive::{archive_path, write_archive};
use lingspam_prep::{CorpusDataset, CorpusIndexer};

/// Number of leading tokens of the first entry shown in the summary.
const SAMPLE_WORDS: usize = 10;

fn main() -> Result<()> {
    env_logger::init();

    // The shell expands wildcards: `lingspam-prep lingspam_public/lemm_stop/*/*`
    let paths: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();

    let dataset = CorpusIndexer::default()
        .index_files(&paths, std::io::stdout())
        .context("indexing corpus")?;

    print_summary(&dataset);

    let output = archive_path(std::path::Path::new("."));
    write_archive(&output, &dataset)
        .with_context(|| format!("writing archive {}", output.display()))?;
    info!("done: {}", dataset.summary());

    Ok(())
}

fn print_summary(dataset: &CorpusDataset) {
    let first = dataset.entry(0);
    let (target, file_name, words) = match &first {
        Some(e) => (
            e.target.to_string(),
            e.file_name.as_str(),
            &e.words[..e.words.len().min(SAMPLE_WORDS)],
        ),
        None => (String::new(), "", &[][..]),
    };

    println!("\nTargets:  {}   {}", dataset.targets().len(), target);
    println!("FileNames:  {}   {}", dataset.file_names().len(), file_name);
    println!("Words:  {}   {:?}", dataset.words().len(), words);
}
