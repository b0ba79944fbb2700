use std::convert::TryFrom;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use rust_tokenizers::tokenizer::{BertTokenizer, MultiThreadedTokenizer, TruncationStrategy};
use tch::{CModule, Device, IValue, Tensor};
use tracing::{debug, info};

use crate::mirror_bert::config::{
    EmbeddingOptions, EncodeOptions, LoadOptions, MirrorBertConfig, DEFAULT_MAX_SEQ_LENGTH,
};
use crate::mirror_bert::Embedding;
#[cfg(feature = "remote")]
use crate::mirror_bert::resources::hub_resource;
use crate::resources::{LocalResource, ResourceProvider};
use crate::MirrorBertError;

/// Name of the TorchScript encoder artifact inside a model directory.
pub const WEIGHTS_NAME: &str = "model.pt";
/// Name of the WordPiece vocabulary artifact inside a model directory.
pub const VOCAB_NAME: &str = "vocab.txt";
/// Name of the configuration artifact written on save.
pub const CONFIG_NAME: &str = "mirror_bert_config.json";

/// Container for a tokenized batch of sentences, one `(max_length,)` i64
/// tensor per sentence for both token ids and attention masks.
pub struct TokenizedBatch {
    pub tokens_ids: Vec<Tensor>,
    pub tokens_masks: Vec<Tensor>,
}

struct ModelArtifacts {
    weights: PathBuf,
    vocab: PathBuf,
}

/// # MirrorBertModel to compute sentence embeddings
///
/// Owns a WordPiece tokenizer and a TorchScript encoder, both unset until
/// [`load_model`](MirrorBertModel::load_model) succeeds. Encoding operations
/// run the encoder in inference mode (no gradient state is retained) and pool
/// the per-token hidden states according to an
/// [`AggregationMethod`](crate::AggregationMethod).
pub struct MirrorBertModel {
    tokenizer: Option<BertTokenizer>,
    encoder: Option<CModule>,
    device: Device,
    max_seq_length: usize,
    do_lower_case: bool,
}

impl Default for MirrorBertModel {
    fn default() -> Self {
        MirrorBertModel::new(true)
    }
}

impl MirrorBertModel {
    /// Creates an empty model. `use_cuda` selects the target device for
    /// subsequent loads; it can be overridden by
    /// [`LoadOptions::use_cuda`](crate::LoadOptions).
    pub fn new(use_cuda: bool) -> Self {
        MirrorBertModel {
            tokenizer: None,
            encoder: None,
            device: Self::device_for(use_cuda),
            max_seq_length: DEFAULT_MAX_SEQ_LENGTH,
            do_lower_case: true,
        }
    }

    fn device_for(use_cuda: bool) -> Device {
        if use_cuda {
            Device::Cuda(0)
        } else {
            Device::Cpu
        }
    }

    /// Returns the loaded TorchScript encoder.
    ///
    /// # Panics
    ///
    /// Panics if no model has been loaded. Calling any encoding operation
    /// before `load_model` is a programming error.
    pub fn get_encoder(&self) -> &CModule {
        self.encoder
            .as_ref()
            .expect("encoder not set, call `load_model` first")
    }

    /// Returns the loaded tokenizer.
    ///
    /// # Panics
    ///
    /// Panics if no model has been loaded.
    pub fn get_tokenizer(&self) -> &BertTokenizer {
        self.tokenizer
            .as_ref()
            .expect("tokenizer not set, call `load_model` first")
    }

    /// Device the encoder and tokenized batches are placed on.
    pub fn device(&self) -> Device {
        self.device
    }

    /// Loads a pretrained encoder and vocabulary.
    ///
    /// `model_name_or_path` is either a local model directory (containing
    /// `model.pt` and `vocab.txt`) or, with the `remote` feature, a hub
    /// checkpoint identifier such as
    /// `cambridgeltl/mirror-bert-base-uncased-sentence`, fetched and cached on
    /// first use. May be called again on a loaded model to swap the
    /// underlying weights.
    ///
    /// With `options.use_cuda` set, the encoder is placed on the CUDA device;
    /// if none is available on the host the underlying libtorch error is
    /// returned unmodified.
    pub fn load_model(
        &mut self,
        model_name_or_path: &str,
        options: LoadOptions,
    ) -> Result<(), MirrorBertError> {
        let artifacts = Self::resolve_artifacts(model_name_or_path)?;

        let tokenizer = BertTokenizer::from_file(
            artifacts.vocab.to_string_lossy().as_ref(),
            options.lower_case,
            options.lower_case,
        )?;

        let device = Self::device_for(options.use_cuda);
        let mut encoder = CModule::load_on_device(&artifacts.weights, device)?;
        encoder.f_set_eval()?;

        info!(
            model = model_name_or_path,
            device = ?device,
            "loaded pretrained encoder"
        );

        // state is updated only once both artifacts loaded; a failed reload
        // must leave any previously loaded model untouched
        self.tokenizer = Some(tokenizer);
        self.encoder = Some(encoder);
        self.device = device;
        self.max_seq_length = options.max_length;
        self.do_lower_case = options.lower_case;
        Ok(())
    }

    fn resolve_artifacts(model_name_or_path: &str) -> Result<ModelArtifacts, MirrorBertError> {
        let model_dir = Path::new(model_name_or_path);
        if model_dir.is_dir() {
            return Ok(ModelArtifacts {
                weights: LocalResource::from(model_dir.join(WEIGHTS_NAME)).get_local_path()?,
                vocab: LocalResource::from(model_dir.join(VOCAB_NAME)).get_local_path()?,
            });
        }
        #[cfg(feature = "remote")]
        {
            return Ok(ModelArtifacts {
                weights: hub_resource(model_name_or_path, WEIGHTS_NAME).get_local_path()?,
                vocab: hub_resource(model_name_or_path, VOCAB_NAME).get_local_path()?,
            });
        }
        #[cfg(not(feature = "remote"))]
        {
            return Err(MirrorBertError::IOError(format!(
                "{model_name_or_path} is not a local model directory and the `remote` feature is disabled"
            )));
        }
    }

    /// Saves the encoder weights, vocabulary and configuration to a model
    /// directory that [`load_model`](MirrorBertModel::load_model) can read
    /// back.
    ///
    /// # Panics
    ///
    /// Panics if no model has been loaded.
    pub fn save_model<P: AsRef<Path>>(&self, path: P) -> Result<(), MirrorBertError> {
        let encoder = self.get_encoder();
        let tokenizer = self.get_tokenizer();
        let target = path.as_ref();
        fs::create_dir_all(target)?;

        encoder.save(target.join(WEIGHTS_NAME))?;

        let vocab = MultiThreadedTokenizer::vocab(tokenizer);
        let mut tokens = vocab.values.iter().collect::<Vec<_>>();
        tokens.sort_by_key(|(_, index)| **index);
        let mut vocab_file = BufWriter::new(File::create(target.join(VOCAB_NAME))?);
        for (token, _) in tokens {
            writeln!(vocab_file, "{token}")?;
        }
        vocab_file.flush()?;

        let config = MirrorBertConfig {
            max_seq_length: self.max_seq_length,
            do_lower_case: self.do_lower_case,
        };
        serde_json::to_writer_pretty(File::create(target.join(CONFIG_NAME))?, &config)?;

        info!(path = %target.display(), "saved model artifacts");
        Ok(())
    }

    /// Tokenizes a batch of sentences into rectangular id/mask tensors,
    /// padding or truncating every sentence to exactly `max_length` positions
    /// (special tokens included). Tokens beyond `max_length` are silently
    /// dropped.
    pub fn tokenize<S>(&self, sentences: &[S], max_length: usize) -> TokenizedBatch
    where
        S: AsRef<str> + Sync,
    {
        let tokenizer = self.get_tokenizer();
        let tokenized_input = MultiThreadedTokenizer::encode_list(
            tokenizer,
            sentences,
            max_length,
            &TruncationStrategy::LongestFirst,
            0,
        );

        let vocab = MultiThreadedTokenizer::vocab(tokenizer);
        let pad_token_id = *vocab
            .special_values
            .get(vocab.get_pad_value())
            .expect("PAD token not found in vocabulary");

        let mut tokens_ids = Vec::with_capacity(tokenized_input.len());
        let mut tokens_masks = Vec::with_capacity(tokenized_input.len());
        for input in tokenized_input {
            let mut token_ids = input.token_ids;
            let mut attention_mask = vec![1i64; token_ids.len()];
            token_ids.resize(max_length, pad_token_id);
            attention_mask.resize(max_length, 0);
            tokens_ids.push(Tensor::from_slice(&token_ids));
            tokens_masks.push(Tensor::from_slice(&attention_mask));
        }

        TokenizedBatch {
            tokens_ids,
            tokens_masks,
        }
    }

    /// Encodes a batch of sentences into one embedding vector per sentence.
    ///
    /// The returned `(n_sentences, hidden_dim)` tensor stays on the compute
    /// device; [`get_embeddings`](MirrorBertModel::get_embeddings) is the
    /// batching variant that also moves results back to host memory.
    ///
    /// # Panics
    ///
    /// Panics if no model has been loaded.
    pub fn encode<S>(
        &self,
        sentences: &[S],
        options: &EncodeOptions,
    ) -> Result<Tensor, MirrorBertError>
    where
        S: AsRef<str> + Sync,
    {
        let encoder = self.get_encoder();
        let max_length = options.max_length.unwrap_or(self.max_seq_length);

        let TokenizedBatch {
            tokens_ids,
            tokens_masks,
        } = self.tokenize(sentences, max_length);
        let tokens_ids = Tensor::f_stack(&tokens_ids, 0)?.to(self.device);
        let tokens_masks = Tensor::f_stack(&tokens_masks, 0)?.to(self.device);

        let token_embeddings =
            tch::no_grad(|| Self::forward_encoder(encoder, &tokens_ids, &tokens_masks))?;
        let pooled = tch::no_grad(|| options.aggregation.pool(&token_embeddings, &tokens_masks));
        Ok(pooled)
    }

    /// Runs the scripted encoder on a tokenized batch, returning the last
    /// hidden state. Accepts modules traced to return either the hidden state
    /// tensor directly or a tuple with the hidden state in first position.
    fn forward_encoder(
        encoder: &CModule,
        tokens_ids: &Tensor,
        tokens_masks: &Tensor,
    ) -> Result<Tensor, MirrorBertError> {
        let output = encoder.forward_is(&[
            IValue::Tensor(tokens_ids.shallow_clone()),
            IValue::Tensor(tokens_masks.shallow_clone()),
        ])?;
        match output {
            IValue::Tensor(hidden_states) => Ok(hidden_states),
            IValue::Tuple(outputs) => match outputs.into_iter().next() {
                Some(IValue::Tensor(hidden_states)) => Ok(hidden_states),
                _ => Err(MirrorBertError::InvalidConfigurationError(
                    "scripted encoder did not return hidden states as its first output"
                        .to_string(),
                )),
            },
            other => Err(MirrorBertError::InvalidConfigurationError(format!(
                "unexpected scripted encoder output: {other:?}"
            ))),
        }
    }

    /// Computes embeddings for a list of sentences of arbitrary size.
    ///
    /// The list is split into contiguous chunks of at most
    /// `options.batch_size` sentences, preserving order. Each chunk is encoded
    /// under a single inference scope and copied to host memory before the
    /// next chunk runs, so accelerator memory usage stays bounded by one chunk
    /// regardless of the input size. Returns a `(n_sentences, hidden_dim)`
    /// CPU tensor.
    ///
    /// # Panics
    ///
    /// Panics if no model has been loaded.
    pub fn get_embeddings<S>(
        &self,
        sentences: &[S],
        options: &EmbeddingOptions,
    ) -> Result<Tensor, MirrorBertError>
    where
        S: AsRef<str> + Sync,
    {
        let n_batches = (sentences.len() + options.batch_size - 1) / options.batch_size;
        let progress = if options.show_progress {
            let bar = ProgressBar::new(n_batches as u64);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{bar:40.cyan/blue} {pos}/{len} batches {msg}")
                    .expect("valid progress template"),
            );
            bar
        } else {
            ProgressBar::hidden()
        };

        let encode_options = EncodeOptions {
            max_length: options.max_length,
            aggregation: options.aggregation,
        };
        debug!(
            sentences = sentences.len(),
            batches = n_batches,
            "computing embeddings"
        );

        let embedding_table = tch::no_grad(|| -> Result<Vec<Tensor>, MirrorBertError> {
            let mut embedding_table = Vec::with_capacity(n_batches);
            for batch in sentences.chunks(options.batch_size) {
                let batch_embedding = self.encode(batch, &encode_options)?;
                embedding_table.push(batch_embedding.to_device(Device::Cpu));
                progress.inc(1);
            }
            Ok(embedding_table)
        })?;
        progress.finish_and_clear();

        Ok(Tensor::f_cat(&embedding_table, 0)?)
    }

    /// Variant of [`get_embeddings`](MirrorBertModel::get_embeddings)
    /// returning plain `f32` vectors instead of a tensor.
    pub fn get_embeddings_list<S>(
        &self,
        sentences: &[S],
        options: &EmbeddingOptions,
    ) -> Result<Vec<Embedding>, MirrorBertError>
    where
        S: AsRef<str> + Sync,
    {
        let embeddings = self.get_embeddings(sentences, options)?;
        Ok(Vec::try_from(embeddings)?)
    }
}
