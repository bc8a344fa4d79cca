//! Encoder/decoder between file bytes, data URIs and display handles.
//!
//! Data URIs produced here always carry the `data:<mime>;base64,` prefix and padded
//! standard Base64. On the way back in, three shapes are accepted: a data URI, a
//! bare Base64 payload (older backend responses) whose MIME type has to be sniffed,
//! and an http(s) URL (product images), which has no local content.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use bytes::Bytes;
use regex::Regex;
use std::sync::LazyLock;

use crate::error::{DecodeWarning, SlotError};
use crate::handles::{DisplayHandle, HandleRegistry};
use crate::slots::SlotKind;
use crate::source::FileSource;

static DATA_URI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^data:([a-zA-Z0-9]+/[a-zA-Z0-9.+-]+);base64,(.*)$")
        .expect("data URI pattern is valid")
});

/// Standard alphabet; padding optional and trailing bits tolerated on decode.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

const SIGNATURES: [(&[u8], &str); 4] = [
    (&[0x89, 0x50, 0x4E, 0x47], "image/png"),
    (&[0xFF, 0xD8, 0xFF], "image/jpeg"),
    (&[0x47, 0x49, 0x46, 0x38], "image/gif"),
    (&[0x25, 0x50, 0x44, 0x46], "application/pdf"),
];

/// Shape of a stored document value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload<'a> {
    DataUri { mime: &'a str, base64: &'a str },
    Bare { base64: &'a str },
    Remote { url: &'a str },
}

pub fn parse_payload(value: &str) -> Payload<'_> {
    let value = value.trim();

    if let Some(caps) = DATA_URI.captures(value) {
        if let (Some(mime), Some(base64)) = (caps.get(1), caps.get(2)) {
            return Payload::DataUri {
                mime: mime.as_str(),
                base64: base64.as_str(),
            };
        }
    }

    let lower = value.get(..8).unwrap_or(value).to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return Payload::Remote { url: value };
    }

    Payload::Bare { base64: value }
}

/// MIME type from the leading byte signature, if recognised.
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    SIGNATURES
        .iter()
        .find(|(signature, _)| bytes.starts_with(signature))
        .map(|(_, mime)| *mime)
}

pub fn encode_bytes(mime_type: &str, data: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(data))
}

fn decode_base64(payload: &str) -> Result<Bytes, DecodeWarning> {
    let compact: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    LENIENT
        .decode(compact.as_bytes())
        .map(Bytes::from)
        .map_err(|e| DecodeWarning::InvalidBase64(e.to_string()))
}

struct Inline {
    canonical: String,
    mime_type: String,
    data: Bytes,
}

/// `Ok(None)` for remote URLs.
fn decode_inline(value: &str, kind: SlotKind) -> Result<Option<Inline>, DecodeWarning> {
    match parse_payload(value) {
        Payload::Remote { .. } => Ok(None),
        Payload::DataUri { mime, base64 } => {
            let data = decode_base64(base64)?;
            Ok(Some(Inline {
                canonical: value.trim().to_string(),
                mime_type: mime.to_string(),
                data,
            }))
        }
        Payload::Bare { base64 } => {
            if base64.is_empty() {
                return Err(DecodeWarning::Empty);
            }
            let data = decode_base64(base64)?;
            if data.is_empty() {
                return Err(DecodeWarning::Empty);
            }
            let mime_type = sniff_mime(&data).unwrap_or(kind.fallback_mime());
            Ok(Some(Inline {
                canonical: encode_bytes(mime_type, &data),
                mime_type: mime_type.to_string(),
                data,
            }))
        }
    }
}

/// Decoded content and MIME type of an inline value.
pub fn decode_to_bytes(value: &str, kind: SlotKind) -> Result<(String, Bytes), DecodeWarning> {
    match decode_inline(value, kind)? {
        Some(inline) => Ok((inline.mime_type, inline.data)),
        None => Err(DecodeWarning::Remote),
    }
}

/// Value as it should be written back: bare payloads gain their data URI prefix.
/// `None` when the value cannot be decoded.
pub fn canonicalize(value: &str, kind: SlotKind) -> Option<String> {
    match decode_inline(value, kind) {
        Ok(Some(inline)) => Some(inline.canonical),
        Ok(None) => Some(value.trim().to_string()),
        Err(_) => None,
    }
}

/// Read the file completely and wrap it in a data URI with the file's own MIME type,
/// normalized the same way the validator compares it.
pub async fn encode_to_data_uri(file: &dyn FileSource) -> Result<String, SlotError> {
    let meta = file.meta();
    let mime_type = meta.mime_type.trim().to_ascii_lowercase();
    let data = file.read_all().await.map_err(|e| {
        tracing::warn!(file_name = %meta.file_name, error = %e, "File read failed");
        SlotError::ReadError(e.to_string())
    })?;

    tracing::debug!(
        file_name = %meta.file_name,
        mime_type = %mime_type,
        bytes = data.len(),
        "Encoded file as data URI"
    );
    Ok(encode_bytes(&mime_type, &data))
}

/// Result of decoding a stored value for a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Value in canonical form.
    pub value: String,
    pub handle: Option<DisplayHandle>,
}

/// Builds and releases display handles against a shared registry.
#[derive(Debug, Clone, Default)]
pub struct DocumentCodec {
    registry: HandleRegistry,
}

impl DocumentCodec {
    pub fn new(registry: HandleRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &HandleRegistry {
        &self.registry
    }

    pub async fn encode_to_data_uri(&self, file: &dyn FileSource) -> Result<String, SlotError> {
        encode_to_data_uri(file).await
    }

    /// Handle for a stored value; `Ok(None)` for remote URLs, which have no local content.
    pub fn decode_to_display_handle(
        &self,
        value: &str,
        kind: SlotKind,
    ) -> Result<Option<DisplayHandle>, DecodeWarning> {
        self.decode(value, kind).map(|decoded| decoded.handle)
    }

    /// Decode a value into its canonical form plus a fresh handle.
    pub fn decode(&self, value: &str, kind: SlotKind) -> Result<Decoded, DecodeWarning> {
        match decode_inline(value, kind)? {
            Some(inline) => Ok(Decoded {
                handle: Some(self.registry.create(inline.mime_type, inline.data)),
                value: inline.canonical,
            }),
            None => Ok(Decoded {
                value: value.trim().to_string(),
                handle: None,
            }),
        }
    }

    /// Releasing `None` or an already released handle does nothing.
    pub fn release_display_handle(&self, handle: Option<&DisplayHandle>) {
        if let Some(handle) = handle {
            self.registry.release(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{FileMeta, InMemoryFile};
    use async_trait::async_trait;
    use std::io;

    const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x01];
    const PDF: &[u8] = b"%PDF-1.4\n%test";

    struct BrokenFile(FileMeta);

    #[async_trait]
    impl FileSource for BrokenFile {
        fn meta(&self) -> &FileMeta {
            &self.0
        }

        async fn read_all(&self) -> io::Result<Bytes> {
            Err(io::Error::new(io::ErrorKind::Interrupted, "read aborted"))
        }
    }

    #[test]
    fn test_parse_payload_shapes() {
        assert_eq!(
            parse_payload("data:image/png;base64,iVBORw0KGgo="),
            Payload::DataUri {
                mime: "image/png",
                base64: "iVBORw0KGgo="
            }
        );
        assert_eq!(
            parse_payload("data:application/vnd.ms-excel;base64,AAAA"),
            Payload::DataUri {
                mime: "application/vnd.ms-excel",
                base64: "AAAA"
            }
        );
        assert_eq!(
            parse_payload("HTTPS://cdn.example.com/a.png"),
            Payload::Remote {
                url: "HTTPS://cdn.example.com/a.png"
            }
        );
        assert_eq!(
            parse_payload("JVBERi0xLjQ="),
            Payload::Bare {
                base64: "JVBERi0xLjQ="
            }
        );
    }

    #[test]
    fn test_sniff_mime() {
        assert_eq!(sniff_mime(PNG), Some("image/png"));
        assert_eq!(sniff_mime(&[0xFF, 0xD8, 0xFF, 0xE0]), Some("image/jpeg"));
        assert_eq!(sniff_mime(b"GIF89a"), Some("image/gif"));
        assert_eq!(sniff_mime(PDF), Some("application/pdf"));
        assert_eq!(sniff_mime(b"PK\x03\x04"), None);
        assert_eq!(sniff_mime(&[]), None);
    }

    #[tokio::test]
    async fn test_round_trip_fidelity() {
        let samples: [(&str, &[u8]); 4] = [
            ("image/png", PNG),
            ("application/pdf", PDF),
            ("image/gif", b"GIF89a\x01\x00"),
            ("image/jpeg", &[]),
        ];

        for (mime, data) in samples {
            let file = InMemoryFile::new("f", mime, data.to_vec());
            let uri = encode_to_data_uri(&file).await.unwrap();
            assert!(uri.starts_with(&format!("data:{};base64,", mime)));
            let (decoded_mime, decoded) = decode_to_bytes(&uri, SlotKind::Image).unwrap();
            assert_eq!(decoded_mime, mime);
            assert_eq!(decoded.as_ref(), data);
        }
    }

    #[tokio::test]
    async fn test_encode_normalizes_reported_mime() {
        let file = InMemoryFile::new("photo.png", " Image/PNG ", PNG.to_vec());
        let uri = encode_to_data_uri(&file).await.unwrap();
        assert!(uri.starts_with("data:image/png;base64,"));
        assert_eq!(
            parse_payload(&uri),
            Payload::DataUri {
                mime: "image/png",
                base64: uri.trim_start_matches("data:image/png;base64,"),
            }
        );
    }

    #[test]
    fn test_encoding_is_padded_standard() {
        assert_eq!(encode_bytes("image/png", &[0xFB, 0xFF]), "data:image/png;base64,+/8=");
    }

    #[test]
    fn test_decode_tolerates_whitespace_and_missing_padding() {
        let (_, data) = decode_to_bytes("data:image/png;base64,+/\n8", SlotKind::Image).unwrap();
        assert_eq!(data.as_ref(), &[0xFB, 0xFF]);
    }

    #[test]
    fn test_decode_rejects_url_safe_alphabet() {
        let result = decode_to_bytes("data:image/png;base64,-_8=", SlotKind::Image);
        assert!(matches!(result, Err(DecodeWarning::InvalidBase64(_))));
    }

    #[test]
    fn test_bare_payload_is_sniffed() {
        let bare = STANDARD.encode(PNG);
        let (mime, data) = decode_to_bytes(&bare, SlotKind::PdfDocument).unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(data.as_ref(), PNG);
    }

    #[test]
    fn test_bare_payload_falls_back_per_kind() {
        let bare = STANDARD.encode(b"no known signature");
        assert_eq!(decode_to_bytes(&bare, SlotKind::Image).unwrap().0, "image/jpeg");
        assert_eq!(
            decode_to_bytes(&bare, SlotKind::PdfDocument).unwrap().0,
            "application/pdf"
        );
    }

    #[test]
    fn test_undecodable_and_empty_values() {
        assert!(matches!(
            decode_to_bytes("%%%not-base64%%%", SlotKind::Image),
            Err(DecodeWarning::InvalidBase64(_))
        ));
        assert_eq!(decode_to_bytes("  ", SlotKind::Image), Err(DecodeWarning::Empty));
        assert_eq!(
            decode_to_bytes("https://cdn.example.com/a.png", SlotKind::Image),
            Err(DecodeWarning::Remote)
        );
    }

    #[test]
    fn test_canonicalize() {
        let bare = STANDARD.encode(PDF);
        assert_eq!(
            canonicalize(&bare, SlotKind::PdfDocument),
            Some(format!("data:application/pdf;base64,{}", bare))
        );

        let uri = encode_bytes("image/gif", b"GIF89a");
        assert_eq!(canonicalize(&uri, SlotKind::Image), Some(uri.clone()));
        assert_eq!(
            canonicalize("https://cdn.example.com/a.png", SlotKind::Image).as_deref(),
            Some("https://cdn.example.com/a.png")
        );
        assert_eq!(canonicalize("%%%", SlotKind::Image), None);
    }

    #[test]
    fn test_decode_to_display_handle() {
        let codec = DocumentCodec::default();
        let bare = STANDARD.encode(PNG);

        let handle = codec
            .decode_to_display_handle(&bare, SlotKind::Image)
            .unwrap()
            .unwrap();
        assert_eq!(codec.registry().resolve(&handle).unwrap().mime_type, "image/png");

        assert!(codec
            .decode_to_display_handle("%%%not-base64%%%", SlotKind::Image)
            .is_err());
        assert_eq!(
            codec
                .decode_to_display_handle("http://cdn.example.com/a.png", SlotKind::Image)
                .unwrap(),
            None
        );
        assert_eq!(codec.registry().live_count(), 1);
    }

    #[test]
    fn test_release_display_handle_is_idempotent() {
        let codec = DocumentCodec::default();
        let handle = codec
            .decode_to_display_handle(&encode_bytes("application/pdf", PDF), SlotKind::PdfDocument)
            .unwrap();

        codec.release_display_handle(handle.as_ref());
        codec.release_display_handle(handle.as_ref());
        codec.release_display_handle(None);
        assert_eq!(codec.registry().live_count(), 0);
    }

    #[tokio::test]
    async fn test_read_failure_is_surfaced() {
        let file = BrokenFile(FileMeta {
            file_name: "scan.pdf".into(),
            mime_type: "application/pdf".into(),
            size: 42,
        });
        let result = encode_to_data_uri(&file).await;
        assert!(matches!(result, Err(SlotError::ReadError(_))));
    }
}
