use serde::{Deserialize, Serialize};

use crate::mirror_bert::AggregationMethod;
use crate::Config;

/// Default sequence length used when none is supplied at load time.
pub(crate) const DEFAULT_MAX_SEQ_LENGTH: usize = 50;

/// Default number of sentences encoded per forward pass in
/// [`get_embeddings`](crate::MirrorBertModel::get_embeddings).
pub(crate) const DEFAULT_BATCH_SIZE: usize = 1024;

/// Configuration stored alongside saved model artifacts
/// (`mirror_bert_config.json`), describing tokenizer behavior and the default
/// sequence length the model was loaded with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MirrorBertConfig {
    /// Maximum sequence length (in tokens, special tokens included)
    pub max_seq_length: usize,
    /// Whether the tokenizer lower-cases its input
    pub do_lower_case: bool,
}

impl Config for MirrorBertConfig {}

impl Default for MirrorBertConfig {
    fn default() -> Self {
        MirrorBertConfig {
            max_seq_length: DEFAULT_MAX_SEQ_LENGTH,
            do_lower_case: true,
        }
    }
}

/// Options for [`load_model`](crate::MirrorBertModel::load_model).
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Default sequence length recorded on the model. Consulted by the encode
    /// operations whenever their own options do not override it.
    pub max_length: usize,
    /// Lower-case inputs during tokenization
    pub lower_case: bool,
    /// Place the encoder on the CUDA device. Loading fails with the underlying
    /// libtorch error if no such device is available.
    pub use_cuda: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            max_length: DEFAULT_MAX_SEQ_LENGTH,
            lower_case: true,
            use_cuda: true,
        }
    }
}

/// Options for [`encode`](crate::MirrorBertModel::encode).
#[derive(Debug, Clone, Default)]
pub struct EncodeOptions {
    /// Sequence length to pad/truncate to. `None` falls back to the length
    /// recorded at load time.
    pub max_length: Option<usize>,
    /// Pooling strategy reducing per-token hidden states to one vector
    pub aggregation: AggregationMethod,
}

/// Options for [`get_embeddings`](crate::MirrorBertModel::get_embeddings).
#[derive(Debug, Clone)]
pub struct EmbeddingOptions {
    /// Maximum number of sentences encoded per forward pass
    pub batch_size: usize,
    /// Sequence length to pad/truncate to. `None` falls back to the length
    /// recorded at load time.
    pub max_length: Option<usize>,
    /// Pooling strategy reducing per-token hidden states to one vector
    pub aggregation: AggregationMethod,
    /// Display a progress bar while encoding. Cosmetic only.
    pub show_progress: bool,
}

impl Default for EmbeddingOptions {
    fn default() -> Self {
        EmbeddingOptions {
            batch_size: DEFAULT_BATCH_SIZE,
            max_length: None,
            aggregation: AggregationMethod::default(),
            show_progress: true,
        }
    }
}
