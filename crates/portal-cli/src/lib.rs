//! Shared helpers for the `seller-portal` binary.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use clap::ValueEnum;
use portal_core::models::SellerProfile;
use portal_core::{ErrorMetadata, FieldErrors};
use portal_documents::codec::{decode_to_bytes, encode_to_data_uri};
use portal_documents::slots::PROFILE_SLOTS;
use portal_documents::validator::validate;
use portal_documents::{DecodeWarning, FileSource, LocalFile, SlotError, SlotKind};
use portal_infra::ErrorReport;
use serde::Serialize;

/// Slot kind as typed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Image,
    Pdf,
}

impl From<KindArg> for SlotKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Image => SlotKind::Image,
            KindArg::Pdf => SlotKind::PdfDocument,
        }
    }
}

pub fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

/// Print an error report on stderr, with details when `verbose` is set.
pub fn print_error<E>(err: &E, verbose: bool)
where
    E: ErrorMetadata + std::fmt::Display,
{
    portal_infra::log_error(err);
    let report = ErrorReport::from_error(err, verbose);
    match serde_json::to_string_pretty(&report) {
        Ok(out) => eprintln!("{}", out),
        Err(_) => eprintln!("{}", err),
    }
}

/// Field errors as a JSON-friendly map.
pub fn field_messages(errors: &FieldErrors) -> BTreeMap<String, String> {
    errors
        .iter()
        .map(|(field, message)| (field.to_string(), message.to_string()))
        .collect()
}

/// Result of `encode`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodeReport {
    pub file_name: String,
    pub mime_type: String,
    pub size: u64,
    pub data_uri: String,
}

/// Validate a file on disk for a slot kind and encode it as a data URI.
pub async fn encode_file(
    path: &Path,
    kind: SlotKind,
    max_size_bytes: u64,
) -> Result<EncodeReport, SlotError> {
    let file = LocalFile::open(path).await?;
    validate(file.meta(), kind, max_size_bytes)?;
    let data_uri = encode_to_data_uri(&file).await?;

    let meta = file.meta();
    Ok(EncodeReport {
        file_name: meta.file_name.clone(),
        mime_type: meta.mime_type.clone(),
        size: meta.size,
        data_uri,
    })
}

/// What a stored document field holds, without the payload itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    pub slot: &'static str,
    pub label: &'static str,
    pub present: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

pub fn summarize_documents(profile: &SellerProfile) -> Vec<DocumentSummary> {
    PROFILE_SLOTS
        .iter()
        .map(|spec| {
            let mut summary = DocumentSummary {
                slot: spec.name,
                label: spec.label,
                present: false,
                mime_type: None,
                bytes: None,
                url: None,
                warning: None,
            };
            let Some(value) = profile.document(spec.name) else {
                return summary;
            };
            summary.present = true;
            match decode_to_bytes(value, spec.kind) {
                Ok((mime_type, data)) => {
                    summary.mime_type = Some(mime_type);
                    summary.bytes = Some(data.len());
                }
                Err(DecodeWarning::Remote) => summary.url = Some(value.trim().to_string()),
                Err(warning) => summary.warning = Some(warning.to_string()),
            }
            summary
        })
        .collect()
}

/// `profile show` output: plain fields plus document summaries.
#[derive(Debug, Serialize)]
pub struct ProfileView {
    pub profile: SellerProfile,
    pub documents: Vec<DocumentSummary>,
}

impl ProfileView {
    pub fn new(profile: &SellerProfile) -> Self {
        Self {
            profile: profile.redacted(),
            documents: summarize_documents(profile),
        }
    }
}
