pub mod data;
pub mod error;

pub use data::indexer::{CorpusIndexer, IndexerConfig};
pub use data::model::{CorpusDataset, CorpusEntry, TARGET_NAMES};
pub use data::normalizer::EmailFilter;
pub use error::CorpusError;
