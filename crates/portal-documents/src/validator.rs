use crate::slots::SlotKind;
use crate::source::FileMeta;

/// Reasons a picked file is refused before it is read
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid content type: {content_type} (allowed: {allowed:?})")]
    UnsupportedType {
        content_type: String,
        kind: SlotKind,
        allowed: &'static [&'static str],
    },

    #[error("File too large: {size} bytes (max: {max} bytes)")]
    TooLarge { size: u64, max: u64 },
}

/// Upload validator
///
/// Pure predicate over the metadata of the file-selection event; nothing is
/// read from disk here.
#[derive(Debug, Clone, Copy)]
pub struct UploadValidator {
    kind: SlotKind,
    max_file_size: u64,
}

impl UploadValidator {
    pub fn new(kind: SlotKind, max_file_size: u64) -> Self {
        Self {
            kind,
            max_file_size,
        }
    }

    /// Validate content type against the slot kind
    pub fn validate_content_type(&self, content_type: &str) -> Result<(), ValidationError> {
        let normalized = content_type.trim().to_lowercase();
        let allowed = self.kind.accepted_content_types();

        if !allowed.iter().any(|ct| *ct == normalized) {
            return Err(ValidationError::UnsupportedType {
                content_type: content_type.to_string(),
                kind: self.kind,
                allowed,
            });
        }

        Ok(())
    }

    /// Validate file size; a file of exactly the ceiling passes
    pub fn validate_file_size(&self, size: u64) -> Result<(), ValidationError> {
        if size > self.max_file_size {
            return Err(ValidationError::TooLarge {
                size,
                max: self.max_file_size,
            });
        }

        Ok(())
    }

    /// Type first, then size.
    pub fn validate(&self, file: &FileMeta) -> Result<(), ValidationError> {
        self.validate_content_type(&file.mime_type)?;
        self.validate_file_size(file.size)?;
        Ok(())
    }
}

/// Check a candidate file against a slot kind and ceiling.
pub fn validate(file: &FileMeta, kind: SlotKind, max_size_bytes: u64) -> Result<(), ValidationError> {
    UploadValidator::new(kind, max_size_bytes).validate(file)
}

/// Content type implied by a file extension, used for files opened from disk.
pub fn content_type_for_extension(extension: &str) -> Option<&'static str> {
    let content_type = match extension.to_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "txt" => "text/plain",
        "csv" => "text/csv",
        "zip" => "application/zip",
        _ => return None,
    };
    Some(content_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: u64 = 2 * 1024 * 1024;

    fn meta(mime_type: &str, size: u64) -> FileMeta {
        FileMeta {
            file_name: "upload".to_string(),
            mime_type: mime_type.to_string(),
            size,
        }
    }

    #[test]
    fn test_accepted_types_per_kind() {
        let table = [
            ("image/jpeg", true, false),
            ("image/png", true, false),
            ("image/gif", true, false),
            ("application/pdf", false, true),
            ("image/webp", false, false),
            ("text/plain", false, false),
        ];

        for (mime, image_ok, pdf_ok) in table {
            let image = validate(&meta(mime, 10), SlotKind::Image, MAX);
            let pdf = validate(&meta(mime, 10), SlotKind::PdfDocument, MAX);
            assert_eq!(image.is_ok(), image_ok, "{mime} as image");
            assert_eq!(pdf.is_ok(), pdf_ok, "{mime} as pdf");
            if !image_ok {
                assert!(matches!(image, Err(ValidationError::UnsupportedType { .. })));
            }
            if !pdf_ok {
                assert!(matches!(pdf, Err(ValidationError::UnsupportedType { .. })));
            }
        }
    }

    #[test]
    fn test_content_type_case_insensitive() {
        let validator = UploadValidator::new(SlotKind::Image, MAX);
        assert!(validator.validate_content_type("IMAGE/PNG").is_ok());
    }

    #[test]
    fn test_size_boundary() {
        let validator = UploadValidator::new(SlotKind::PdfDocument, MAX);
        assert!(validator.validate(&meta("application/pdf", MAX)).is_ok());
        assert_eq!(
            validator.validate(&meta("application/pdf", MAX + 1)),
            Err(ValidationError::TooLarge {
                size: MAX + 1,
                max: MAX
            })
        );
    }

    #[test]
    fn test_empty_file_is_not_rejected() {
        assert!(validate(&meta("image/png", 0), SlotKind::Image, MAX).is_ok());
    }

    #[test]
    fn test_type_checked_before_size() {
        let result = validate(&meta("image/png", MAX + 1), SlotKind::PdfDocument, MAX);
        assert!(matches!(result, Err(ValidationError::UnsupportedType { .. })));
    }

    #[test]
    fn test_content_type_for_extension() {
        assert_eq!(content_type_for_extension("JPG"), Some("image/jpeg"));
        assert_eq!(content_type_for_extension("pdf"), Some("application/pdf"));
        assert_eq!(content_type_for_extension("xyz"), None);
    }
}
