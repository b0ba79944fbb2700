//! # MirrorBERT sentence embeddings pipeline
//!
//! Compute sentence/text embeddings that can be compared (e.g. with
//! cosine-similarity) to find sentences with a similar meaning. The pipeline
//! wraps a MirrorBERT-style encoder (a BERT encoder fine-tuned with a
//! contrastive objective) exported to TorchScript, together with its WordPiece
//! vocabulary.
//!
//! Basic usage is as follows:
//!
//! ```no_run
//! use mirror_bert::mirror_bert::{EmbeddingOptions, LoadOptions, MirrorBertModel};
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut model = MirrorBertModel::new(false);
//! model.load_model(
//!     "local/path/to/mirror-bert-base-uncased-sentence",
//!     LoadOptions {
//!         use_cuda: false,
//!         ..LoadOptions::default()
//!     },
//! )?;
//!
//! let sentences = ["This is an example sentence", "Each sentence is converted"];
//! let embeddings = model.get_embeddings(&sentences, &EmbeddingOptions::default())?;
//! # Ok(())
//! # }
//! ```

mod config;
mod model;
mod pooling;
#[cfg(feature = "remote")]
mod resources;

pub use config::{EmbeddingOptions, EncodeOptions, LoadOptions, MirrorBertConfig};
pub use model::{MirrorBertModel, TokenizedBatch, CONFIG_NAME, VOCAB_NAME, WEIGHTS_NAME};
pub use pooling::AggregationMethod;

#[cfg(feature = "remote")]
pub use resources::MirrorBertModelResources;

/// Length = hidden dimension of the encoder
pub type Embedding = Vec<f32>;
