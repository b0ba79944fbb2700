use std::str::FromStr;

use tch::{Kind, Tensor};

use crate::MirrorBertError;

/// Strategy used to reduce the per-token hidden states of a sentence to one
/// fixed-size vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationMethod {
    /// Hidden state at the first (`[CLS]`) token position.
    Cls,
    /// Arithmetic mean over all token positions, padding included.
    ///
    /// This reproduces the historical MirrorBERT behavior: because padding
    /// positions contribute to the average, embeddings of sentences shorter
    /// than the sequence length are pulled towards the padding representation.
    /// Kept as-is for compatibility with published checkpoints; use
    /// [`AggregationMethod::MaskedMean`] for a padding-excluded mean.
    Mean,
    /// Attention-mask-weighted mean: each hidden state is multiplied by its
    /// mask value before summing, and the sum is divided by the per-sentence
    /// count of real tokens. Serialized as `mean_std`.
    MaskedMean,
}

impl Default for AggregationMethod {
    fn default() -> Self {
        AggregationMethod::Cls
    }
}

impl AggregationMethod {
    /// Pools `(batch, seq_length, hidden_dim)` token embeddings into a
    /// `(batch, hidden_dim)` sentence embedding.
    pub fn pool(&self, token_embeddings: &Tensor, attention_mask: &Tensor) -> Tensor {
        match self {
            AggregationMethod::Cls => token_embeddings.select(1, 0),
            AggregationMethod::Mean => {
                token_embeddings.mean_dim([1].as_slice(), false, Kind::Float)
            }
            AggregationMethod::MaskedMean => {
                let input_mask_expanded = attention_mask.unsqueeze(-1).to_kind(Kind::Float);
                let sum_embeddings = (token_embeddings * input_mask_expanded).sum_dim_intlist(
                    [1].as_slice(),
                    false,
                    Kind::Float,
                );
                let token_counts = attention_mask
                    .sum_dim_intlist([-1].as_slice(), false, Kind::Float)
                    .unsqueeze(-1);
                sum_embeddings / token_counts
            }
        }
    }
}

impl FromStr for AggregationMethod {
    type Err = MirrorBertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cls" => Ok(AggregationMethod::Cls),
            "mean" => Ok(AggregationMethod::Mean),
            "mean_std" => Ok(AggregationMethod::MaskedMean),
            _ => Err(MirrorBertError::NotImplementedError(format!(
                "Aggregation method \"{s}\" is not implemented (expected one of \"cls\", \"mean\", \"mean_std\")"
            ))),
        }
    }
}
