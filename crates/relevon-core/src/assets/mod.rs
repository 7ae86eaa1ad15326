//! Download-if-missing bootstrap for model files.
//!
//! Fetches the bi-encoder and sensitivity classifier from HuggingFace into a
//! local directory at startup. Files that already exist are skipped, so the
//! bootstrap is idempotent and costs one `stat` per file on warm starts.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::info;

/// HuggingFace repo for the bi-encoder.
const BI_ENCODER_HF_URL: &str =
    "https://huggingface.co/sentence-transformers/all-MiniLM-L6-v2/resolve/main";

/// HuggingFace repo for the sensitivity classifier.
const CLASSIFIER_HF_URL: &str = "https://huggingface.co/unitary/toxic-bert/resolve/main";

/// Files both models need on disk before they can be loaded.
const MODEL_FILES: [&str; 3] = ["config.json", "model.safetensors", "tokenizer.json"];

/// Subdirectory of the asset dir holding the bi-encoder.
pub fn bi_encoder_dir(base: &Path) -> PathBuf {
    base.join("all-MiniLM-L6-v2")
}

/// Subdirectory of the asset dir holding the sensitivity classifier.
pub fn classifier_dir(base: &Path) -> PathBuf {
    base.join("toxic-bert")
}

/// Returns `true` when every file a model load needs exists in `dir`.
pub fn model_files_present(dir: &Path) -> bool {
    MODEL_FILES.iter().all(|file| dir.join(file).is_file())
}

/// Downloads the bi-encoder files into `bi_encoder_dir(base)` if missing.
pub async fn ensure_bi_encoder(base: &Path) -> Result<PathBuf> {
    let dir = bi_encoder_dir(base);
    ensure_model(BI_ENCODER_HF_URL, &dir, "bi-encoder").await?;
    Ok(dir)
}

/// Downloads the classifier files into `classifier_dir(base)` if missing.
pub async fn ensure_classifier(base: &Path) -> Result<PathBuf> {
    let dir = classifier_dir(base);
    ensure_model(CLASSIFIER_HF_URL, &dir, "classifier").await?;
    Ok(dir)
}

async fn ensure_model(base_url: &str, dir: &Path, name: &str) -> Result<()> {
    if model_files_present(dir) {
        info!(model = name, dir = %dir.display(), "model files present, skipping download");
        return Ok(());
    }

    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("failed to create model directory {}", dir.display()))?;

    for file in MODEL_FILES {
        let dest = dir.join(file);
        if dest.is_file() {
            continue;
        }
        info!(model = name, file, "downloading model file");
        download_file(&format!("{base_url}/{file}"), &dest).await?;
    }

    info!(model = name, dir = %dir.display(), "model files ready");
    Ok(())
}

async fn download_file(url: &str, dest: &Path) -> Result<()> {
    let response = reqwest::get(url)
        .await
        .with_context(|| format!("failed to download {url}"))?;

    if !response.status().is_success() {
        bail!("download of {url} failed with status {}", response.status());
    }

    let bytes = response
        .bytes()
        .await
        .with_context(|| format!("failed to read response body for {url}"))?;

    // Write to a temp name first so a partial download never passes the
    // `is_file` check on the next start.
    let partial = dest.with_extension("partial");
    tokio::fs::write(&partial, &bytes)
        .await
        .with_context(|| format!("failed to write {}", partial.display()))?;
    tokio::fs::rename(&partial, dest)
        .await
        .with_context(|| format!("failed to move {} into place", dest.display()))?;

    info!(url, dest = %dest.display(), bytes = bytes.len(), "downloaded");
    Ok(())
}
