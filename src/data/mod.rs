/// Data layer: text filtering, corpus indexing, and the archive.
///
/// Architecture:
/// ```text
///  email files (lemm_stop/*/*)
///        │
///        ▼
///   ┌──────────┐   line 2 of each file
///   │ indexer  │──────────────┐
///   └──────────┘              ▼
///        │              ┌────────────┐
///        │              │ normalizer │  4 regex passes → tokens
///        │              └────────────┘
///        ▼
///   ┌───────────────┐
///   │ CorpusDataset │  file_names / targets / words, index-aligned
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ archive  │  lingspam.parquet (+ target_names metadata)
///   └──────────┘
/// ```

pub mod archive;
pub mod indexer;
pub mod model;
pub mod normalizer;
