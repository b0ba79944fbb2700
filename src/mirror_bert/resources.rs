use crate::resources::RemoteResource;

/// Base URL of the model hub hosting pretrained MirrorBERT checkpoints.
const HUB_BASE_URL: &str = "https://huggingface.co";

/// Builds the remote resource pointing to one file of a hub-hosted checkpoint,
/// cached under a subdirectory named after the checkpoint identifier.
pub(crate) fn hub_resource(model_id: &str, file_name: &str) -> RemoteResource {
    RemoteResource::new(
        &format!("{HUB_BASE_URL}/{model_id}/resolve/main/{file_name}"),
        model_id,
    )
}

/// # Checkpoint identifiers released with the original MirrorBERT work
///
/// Any of these can be passed directly to
/// [`load_model`](crate::MirrorBertModel::load_model).
pub struct MirrorBertModelResources;

impl MirrorBertModelResources {
    /// Word-level encoder fine-tuned from bert-base-uncased.
    pub const MIRROR_BERT_UNCASED_WORD: &'static str =
        "cambridgeltl/mirror-bert-base-uncased-word";
    /// Sentence-level encoder fine-tuned from bert-base-uncased.
    pub const MIRROR_BERT_UNCASED_SENTENCE: &'static str =
        "cambridgeltl/mirror-bert-base-uncased-sentence";
    /// Sentence-level encoder fine-tuned with drophead regularization.
    pub const MIRROR_BERT_UNCASED_SENTENCE_DROPHEAD: &'static str =
        "cambridgeltl/mirror-bert-base-uncased-sentence-drophead";
}
