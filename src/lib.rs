//! # Sentence embeddings from pretrained MirrorBERT encoders
//!
//! This crate wraps a pretrained transformer encoder exported to TorchScript
//! and turns raw sentences into fixed-size embedding vectors. It covers the
//! full lifecycle of such an encoder: loading a pretrained model and WordPiece
//! vocabulary (from a local directory or a hub identifier), encoding batches
//! of sentences into a `(n_sentences x hidden_dim)` tensor with a choice of
//! pooling strategies, batching that process over large sentence lists with
//! bounded accelerator memory, and saving the model artifacts back to disk.
//!
//! Tokenization is delegated to `rust_tokenizers`, tensor computation and
//! model execution to `tch` (libtorch). No training logic lives here, the
//! encoder runs in inference mode only.
//!
//! ## Usage
//!
//! ```no_run
//! use mirror_bert::{EmbeddingOptions, LoadOptions, MirrorBertModel};
//!
//! fn main() -> Result<(), mirror_bert::MirrorBertError> {
//!     let mut model = MirrorBertModel::default();
//!     model.load_model(
//!         "cambridgeltl/mirror-bert-base-uncased-sentence",
//!         LoadOptions::default(),
//!     )?;
//!
//!     let sentences = ["This is an example sentence", "Each sentence is converted"];
//!     let embeddings = model.get_embeddings(&sentences, &EmbeddingOptions::default())?;
//!     assert_eq!(embeddings.size()[0], 2);
//!     Ok(())
//! }
//! ```
//!
//! ## Model artifacts
//!
//! A model directory is expected to contain:
//! - `model.pt`: TorchScript export of the encoder, taking `(input_ids,
//!   attention_mask)` and returning the last hidden state (or a tuple whose
//!   first element is the last hidden state);
//! - `vocab.txt`: WordPiece vocabulary, one token per line;
//! - `mirror_bert_config.json` _(written on save)_: tokenizer behavior and
//!   default sequence length.

mod common;
pub mod mirror_bert;

pub use common::error::MirrorBertError;
pub use common::resources;
pub use common::Config;

pub use crate::mirror_bert::{
    AggregationMethod, Embedding, EmbeddingOptions, EncodeOptions, LoadOptions, MirrorBertConfig,
    MirrorBertModel,
};
