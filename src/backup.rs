use crate::store::SessionDataset;
use anyhow::{anyhow, Context};
use serde_json::json;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

const MANIFEST_ENTRY: &str = "manifest.json";
const DATASET_ENTRY: &str = "data/session.json";
pub const BUNDLE_FORMAT_V1: &str = "examd-session-v1";

#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub bundle_format: String,
    pub entry_count: usize,
    pub dataset_sha256: String,
}

#[derive(Debug, Clone)]
pub struct ImportSummary {
    pub bundle_format_detected: String,
}

fn hex_digest(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

pub fn export_session_bundle(
    dataset: &SessionDataset,
    out_path: &Path,
) -> anyhow::Result<ExportSummary> {
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.to_string_lossy()))?;
    }

    let payload =
        serde_json::to_vec_pretty(dataset).context("failed to serialize session dataset")?;
    let dataset_sha256 = hex_digest(&payload);

    let out_file = File::create(out_path).with_context(|| {
        format!(
            "failed to create output file {}",
            out_path.to_string_lossy()
        )
    })?;
    let mut zip = ZipWriter::new(out_file);
    let opts = FileOptions::default().compression_method(CompressionMethod::Deflated);

    let exported_at = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let manifest = json!({
        "format": BUNDLE_FORMAT_V1,
        "version": 1,
        "appVersion": env!("CARGO_PKG_VERSION"),
        "exportedAt": exported_at,
        "datasetSha256": dataset_sha256,
    });
    zip.start_file(MANIFEST_ENTRY, opts)
        .context("failed to start manifest entry")?;
    zip.write_all(
        serde_json::to_string_pretty(&manifest)
            .context("failed to serialize manifest")?
            .as_bytes(),
    )
    .context("failed to write manifest entry")?;

    zip.start_file(DATASET_ENTRY, opts)
        .context("failed to start dataset entry")?;
    zip.write_all(&payload)
        .context("failed to write dataset entry")?;

    zip.finish().context("failed to finalize zip bundle")?;

    Ok(ExportSummary {
        bundle_format: BUNDLE_FORMAT_V1.to_string(),
        entry_count: 2,
        dataset_sha256,
    })
}

pub fn import_session_bundle(
    in_path: &Path,
) -> anyhow::Result<(SessionDataset, ImportSummary)> {
    let in_file = File::open(in_path)
        .with_context(|| format!("failed to open bundle {}", in_path.to_string_lossy()))?;
    let mut archive = ZipArchive::new(in_file).context("invalid zip archive")?;

    let mut manifest_text = String::new();
    archive
        .by_name(MANIFEST_ENTRY)
        .context("bundle missing manifest.json")?
        .read_to_string(&mut manifest_text)
        .context("failed to read manifest.json")?;
    let manifest: serde_json::Value =
        serde_json::from_str(&manifest_text).context("manifest.json is invalid JSON")?;
    let format = manifest
        .get("format")
        .and_then(|v| v.as_str())
        .unwrap_or("");
    if format != BUNDLE_FORMAT_V1 {
        return Err(anyhow!("unsupported bundle format: {}", format));
    }
    let expected_sha = manifest
        .get("datasetSha256")
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string();

    let mut payload = Vec::new();
    archive
        .by_name(DATASET_ENTRY)
        .context("bundle missing data/session.json")?
        .read_to_end(&mut payload)
        .context("failed to read dataset entry")?;

    if !expected_sha.is_empty() && hex_digest(&payload) != expected_sha {
        return Err(anyhow!("dataset checksum mismatch, bundle is corrupt"));
    }

    let dataset: SessionDataset =
        serde_json::from_slice(&payload).context("session dataset is invalid JSON")?;

    Ok((
        dataset,
        ImportSummary {
            bundle_format_detected: BUNDLE_FORMAT_V1.to_string(),
        },
    ))
}
