//! Slot catalogues for the profile and product forms.

use portal_core::DEFAULT_MAX_UPLOAD_MB;
use serde::Serialize;

const MIB: u64 = 1024 * 1024;

/// What a slot accepts and how its preview is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SlotKind {
    Image,
    PdfDocument,
}

impl SlotKind {
    pub fn accepted_content_types(&self) -> &'static [&'static str] {
        match self {
            SlotKind::Image => &["image/jpeg", "image/png", "image/gif"],
            SlotKind::PdfDocument => &["application/pdf"],
        }
    }

    /// MIME type assumed for a bare payload whose signature is not recognised.
    pub fn fallback_mime(&self) -> &'static str {
        match self {
            SlotKind::Image => "image/jpeg",
            SlotKind::PdfDocument => "application/pdf",
        }
    }

    pub fn unsupported_type_message(&self) -> &'static str {
        match self {
            SlotKind::Image => "Only JPG, PNG, GIF files are allowed.",
            SlotKind::PdfDocument => "Only PDF files are allowed.",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SlotKind::Image => "image",
            SlotKind::PdfDocument => "pdf",
        }
    }
}

/// Static description of one upload field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: SlotKind,
    pub max_size_bytes: u64,
}

impl SlotSpec {
    pub const fn new(name: &'static str, label: &'static str, kind: SlotKind) -> Self {
        Self {
            name,
            label,
            kind,
            max_size_bytes: DEFAULT_MAX_UPLOAD_MB * MIB,
        }
    }

    pub fn with_max_size(mut self, max_size_bytes: u64) -> Self {
        self.max_size_bytes = max_size_bytes;
        self
    }
}

/// "File size exceeds 2MB limit." for the given ceiling.
pub fn size_limit_message(max_size_bytes: u64) -> String {
    if max_size_bytes >= MIB && max_size_bytes % MIB == 0 {
        format!("File size exceeds {}MB limit.", max_size_bytes / MIB)
    } else if max_size_bytes >= 1024 && max_size_bytes % 1024 == 0 {
        format!("File size exceeds {}KB limit.", max_size_bytes / 1024)
    } else {
        format!("File size exceeds {} bytes limit.", max_size_bytes)
    }
}

pub const PROFILE_SLOTS: [SlotSpec; 6] = [
    SlotSpec::new("userPhoto", "Contact Person Photo", SlotKind::Image),
    SlotSpec::new("shopPhoto", "Shop/Farm Photo", SlotKind::Image),
    SlotSpec::new(
        "companyRegistrationDoc",
        "Company Registration Document",
        SlotKind::PdfDocument,
    ),
    SlotSpec::new("gstCertificate", "GST Certificate", SlotKind::PdfDocument),
    SlotSpec::new("bankDetailsDoc", "Bank Details Document", SlotKind::PdfDocument),
    SlotSpec::new("idProofDoc", "ID Proof Document", SlotKind::PdfDocument),
];

pub const PRODUCT_IMAGE_SLOT: &str = "imageUrl";

/// Document slots of the seller profile with the given ceiling.
pub fn profile_slots(max_size_bytes: u64) -> Vec<SlotSpec> {
    PROFILE_SLOTS
        .iter()
        .cloned()
        .map(|spec| spec.with_max_size(max_size_bytes))
        .collect()
}

/// The product form's single image slot.
pub fn product_slots(max_size_bytes: u64) -> Vec<SlotSpec> {
    vec![SlotSpec::new(PRODUCT_IMAGE_SLOT, "Product Image", SlotKind::Image)
        .with_max_size(max_size_bytes)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::models::PROFILE_DOCUMENT_FIELDS;

    #[test]
    fn test_profile_slots_match_profile_fields() {
        let names: Vec<&str> = PROFILE_SLOTS.iter().map(|s| s.name).collect();
        assert_eq!(names, PROFILE_DOCUMENT_FIELDS);
    }

    #[test]
    fn test_default_ceiling_is_two_mib() {
        assert!(PROFILE_SLOTS.iter().all(|s| s.max_size_bytes == 2 * 1024 * 1024));
        assert_eq!(product_slots(MIB)[0].max_size_bytes, MIB);
    }

    #[test]
    fn test_size_limit_message() {
        assert_eq!(size_limit_message(2 * MIB), "File size exceeds 2MB limit.");
        assert_eq!(size_limit_message(512 * 1024), "File size exceeds 512KB limit.");
        assert_eq!(size_limit_message(1000), "File size exceeds 1000 bytes limit.");
    }

    #[test]
    fn test_kind_messages() {
        assert_eq!(
            SlotKind::Image.unsupported_type_message(),
            "Only JPG, PNG, GIF files are allowed."
        );
        assert_eq!(
            SlotKind::PdfDocument.unsupported_type_message(),
            "Only PDF files are allowed."
        );
    }
}
