use std::path::PathBuf;

use mirror_bert::{
    AggregationMethod, Config, EmbeddingOptions, EncodeOptions, LoadOptions, MirrorBertConfig,
    MirrorBertError, MirrorBertModel,
};

/// Model-dependent tests run only when `MIRROR_BERT_MODEL_DIR` points at a
/// directory holding `model.pt` and `vocab.txt`; they are skipped otherwise.
fn model_dir() -> Option<PathBuf> {
    std::env::var_os("MIRROR_BERT_MODEL_DIR").map(PathBuf::from)
}

fn cpu_load_options() -> LoadOptions {
    LoadOptions {
        use_cuda: false,
        ..LoadOptions::default()
    }
}

#[test]
#[should_panic(expected = "encoder not set")]
fn encoder_accessor_panics_before_load() {
    let model = MirrorBertModel::new(false);
    model.get_encoder();
}

#[test]
#[should_panic(expected = "tokenizer not set")]
fn tokenizer_accessor_panics_before_load() {
    let model = MirrorBertModel::new(false);
    model.get_tokenizer();
}

#[test]
fn default_options() {
    let load = LoadOptions::default();
    assert_eq!(load.max_length, 50);
    assert!(load.lower_case);
    assert!(load.use_cuda);

    let embedding = EmbeddingOptions::default();
    assert_eq!(embedding.batch_size, 1024);
    assert_eq!(embedding.max_length, None);
    assert_eq!(embedding.aggregation, AggregationMethod::Cls);
    assert!(embedding.show_progress);
}

#[test]
fn empty_sentence_list_is_an_error() {
    let model = MirrorBertModel::new(false);
    let err = model
        .get_embeddings(
            &Vec::<String>::new(),
            &EmbeddingOptions {
                show_progress: false,
                ..EmbeddingOptions::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, MirrorBertError::TchError(_)));
}

#[test]
fn config_round_trips_through_json() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let config_path = dir.path().join("mirror_bert_config.json");

    let config = MirrorBertConfig {
        max_seq_length: 25,
        do_lower_case: false,
    };
    serde_json::to_writer_pretty(std::fs::File::create(&config_path)?, &config)?;

    let restored = MirrorBertConfig::from_file(&config_path);
    assert_eq!(restored.max_seq_length, 25);
    assert!(!restored.do_lower_case);
    Ok(())
}

#[test]
fn accessors_succeed_after_load() -> anyhow::Result<()> {
    let model_dir = match model_dir() {
        Some(dir) => dir,
        None => return Ok(()),
    };

    let mut model = MirrorBertModel::new(false);
    model.load_model(model_dir.to_str().unwrap(), cpu_load_options())?;

    model.get_encoder();
    model.get_tokenizer();
    Ok(())
}

#[test]
fn batching_does_not_change_embeddings() -> anyhow::Result<()> {
    let model_dir = match model_dir() {
        Some(dir) => dir,
        None => return Ok(()),
    };

    let mut model = MirrorBertModel::new(false);
    model.load_model(model_dir.to_str().unwrap(), cpu_load_options())?;

    let sentences = ["cat", "dog", "the quick brown fox jumps over the lazy dog"];
    let per_sentence = model.get_embeddings(
        &sentences,
        &EmbeddingOptions {
            batch_size: 1,
            show_progress: false,
            ..EmbeddingOptions::default()
        },
    )?;
    let joint = model.get_embeddings(
        &sentences,
        &EmbeddingOptions {
            show_progress: false,
            ..EmbeddingOptions::default()
        },
    )?;

    assert_eq!(per_sentence.size()[0], sentences.len() as i64);
    assert_eq!(per_sentence.size(), joint.size());
    assert!(per_sentence.allclose(&joint, 1e-5, 1e-5, false));
    Ok(())
}

#[test]
fn encode_with_empty_batch_is_an_error() -> anyhow::Result<()> {
    let model_dir = match model_dir() {
        Some(dir) => dir,
        None => return Ok(()),
    };

    let mut model = MirrorBertModel::new(false);
    model.load_model(model_dir.to_str().unwrap(), cpu_load_options())?;

    let err = model
        .encode(&Vec::<String>::new(), &EncodeOptions::default())
        .unwrap_err();
    assert!(matches!(err, MirrorBertError::TchError(_)));
    Ok(())
}

#[test]
fn failed_reload_keeps_previous_model() -> anyhow::Result<()> {
    let model_dir = match model_dir() {
        Some(dir) => dir,
        None => return Ok(()),
    };

    let mut model = MirrorBertModel::new(false);
    model.load_model(model_dir.to_str().unwrap(), cpu_load_options())?;

    let sentences = ["cat", "dog"];
    let options = EmbeddingOptions {
        show_progress: false,
        ..EmbeddingOptions::default()
    };
    let before = model.get_embeddings(&sentences, &options)?;

    // a model directory whose weights are not a TorchScript archive
    let broken_dir = tempfile::tempdir()?;
    std::fs::write(broken_dir.path().join("model.pt"), b"not a torchscript archive")?;
    std::fs::write(broken_dir.path().join("vocab.txt"), "[PAD]\n[UNK]\n[CLS]\n[SEP]\n")?;

    let reload = model.load_model(
        broken_dir.path().to_str().unwrap(),
        LoadOptions::default(),
    );
    assert!(reload.is_err());

    // the failed reload must not have touched the loaded model or its device
    assert_eq!(model.device(), tch::Device::Cpu);
    let after = model.get_embeddings(&sentences, &options)?;
    assert!(before.allclose(&after, 1e-6, 1e-6, false));
    Ok(())
}

#[test]
fn save_and_load_round_trip() -> anyhow::Result<()> {
    let model_dir = match model_dir() {
        Some(dir) => dir,
        None => return Ok(()),
    };

    let mut model = MirrorBertModel::new(false);
    model.load_model(model_dir.to_str().unwrap(), cpu_load_options())?;

    let sentences = ["This is an example sentence", "Each sentence is converted"];
    let options = EmbeddingOptions {
        show_progress: false,
        ..EmbeddingOptions::default()
    };
    let original = model.get_embeddings(&sentences, &options)?;

    let save_dir = tempfile::tempdir()?;
    model.save_model(save_dir.path())?;

    let mut restored = MirrorBertModel::new(false);
    restored.load_model(save_dir.path().to_str().unwrap(), cpu_load_options())?;
    let round_tripped = restored.get_embeddings(&sentences, &options)?;

    assert!(original.allclose(&round_tripped, 1e-5, 1e-5, false));
    Ok(())
}
