use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::serde_helpers::{date_only, empty_as_none, lenient_count, null_default};

/// JSON names of the profile's document fields, in display order.
pub const PROFILE_DOCUMENT_FIELDS: [&str; 6] = [
    "userPhoto",
    "shopPhoto",
    "companyRegistrationDoc",
    "gstCertificate",
    "bankDetailsDoc",
    "idProofDoc",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BusinessType {
    /// Small/Medium Enterprise
    #[default]
    #[serde(rename = "SME")]
    Sme,
    /// Farmer Producer Organization
    #[serde(rename = "FPO")]
    Fpo,
}

impl BusinessType {
    pub fn label(&self) -> &'static str {
        match self {
            BusinessType::Sme => "SME (Small/Medium Enterprise)",
            BusinessType::Fpo => "FPO (Farmer Producer Organization)",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    #[serde(deserialize_with = "null_default")]
    pub street: String,
    #[serde(deserialize_with = "null_default")]
    pub city: String,
    #[serde(deserialize_with = "null_default")]
    pub state: String,
    #[serde(deserialize_with = "null_default")]
    pub pincode: String,
}

fn default_seller_status() -> String {
    "new".to_string()
}

/// Seller profile as exchanged with `GET/PUT sellerprofile`.
///
/// Every field is optional on the wire; absent or `null` values fall back to the
/// defaults the profile screen shows. Document fields carry a data URI, a bare
/// Base64 payload (legacy backend shape), or nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SellerProfile {
    #[serde(deserialize_with = "null_default")]
    pub company_name: String,
    #[serde(deserialize_with = "null_default")]
    pub seller_name: String,
    #[serde(deserialize_with = "null_default")]
    pub email: String,
    #[serde(deserialize_with = "null_default")]
    pub mobile: String,
    #[serde(deserialize_with = "null_default")]
    pub alternate_mobile: String,
    #[serde(deserialize_with = "date_only")]
    pub date_of_establishment: String,
    #[serde(deserialize_with = "business_type")]
    pub business_type: BusinessType,
    #[serde(deserialize_with = "lenient_count")]
    pub number_of_farmers: Option<u32>,
    #[serde(deserialize_with = "null_default")]
    pub business_description: String,
    #[serde(deserialize_with = "seller_status")]
    pub seller_status: String,
    #[serde(deserialize_with = "empty_as_none")]
    pub user_photo: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    pub shop_photo: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    pub company_registration_doc: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    pub gst_certificate: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    pub bank_details_doc: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    pub id_proof_doc: Option<String>,
    #[serde(deserialize_with = "null_default")]
    pub address: Address,
}

/// Only `FPO` is recognised; anything else the backend sends is shown as SME.
fn business_type<'de, D>(deserializer: D) -> Result<BusinessType, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw.as_ref().and_then(serde_json::Value::as_str) {
        Some(value) if value.trim().eq_ignore_ascii_case("FPO") => BusinessType::Fpo,
        _ => BusinessType::Sme,
    })
}

fn seller_status<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let status: String = null_default(deserializer)?;
    Ok(if status.is_empty() {
        default_seller_status()
    } else {
        status
    })
}

impl Default for SellerProfile {
    fn default() -> Self {
        Self {
            company_name: String::new(),
            seller_name: String::new(),
            email: String::new(),
            mobile: String::new(),
            alternate_mobile: String::new(),
            date_of_establishment: String::new(),
            business_type: BusinessType::default(),
            number_of_farmers: None,
            business_description: String::new(),
            seller_status: default_seller_status(),
            user_photo: None,
            shop_photo: None,
            company_registration_doc: None,
            gst_certificate: None,
            bank_details_doc: None,
            id_proof_doc: None,
            address: Address::default(),
        }
    }
}

impl SellerProfile {
    /// Current value of a document field by its JSON name.
    pub fn document(&self, field: &str) -> Option<&str> {
        match field {
            "userPhoto" => self.user_photo.as_deref(),
            "shopPhoto" => self.shop_photo.as_deref(),
            "companyRegistrationDoc" => self.company_registration_doc.as_deref(),
            "gstCertificate" => self.gst_certificate.as_deref(),
            "bankDetailsDoc" => self.bank_details_doc.as_deref(),
            "idProofDoc" => self.id_proof_doc.as_deref(),
            _ => None,
        }
    }

    /// Replace a document field by its JSON name. Returns false for unknown names.
    pub fn set_document(&mut self, field: &str, value: Option<String>) -> bool {
        let slot = match field {
            "userPhoto" => &mut self.user_photo,
            "shopPhoto" => &mut self.shop_photo,
            "companyRegistrationDoc" => &mut self.company_registration_doc,
            "gstCertificate" => &mut self.gst_certificate,
            "bankDetailsDoc" => &mut self.bank_details_doc,
            "idProofDoc" => &mut self.id_proof_doc,
            _ => return false,
        };
        *slot = value;
        true
    }

    /// All document fields keyed by JSON name.
    pub fn documents(&self) -> BTreeMap<String, Option<String>> {
        PROFILE_DOCUMENT_FIELDS
            .iter()
            .map(|field| (field.to_string(), self.document(field).map(str::to_string)))
            .collect()
    }

    /// Copy document values from a snapshot; unknown names are ignored.
    pub fn apply_documents(&mut self, documents: &BTreeMap<String, Option<String>>) {
        for (field, value) in documents {
            self.set_document(field, value.clone());
        }
    }

    /// Profile without document payloads, for logging.
    pub fn redacted(&self) -> SellerProfile {
        let mut copy = self.clone();
        for field in PROFILE_DOCUMENT_FIELDS {
            let present = copy.document(field).is_some();
            copy.set_document(field, present.then(|| "<redacted>".to_string()));
        }
        copy
    }
}

/// Body returned by `PUT sellerprofile`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub seller_profile: SellerProfile,
}
