use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::serde_helpers::null_default;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicketCategory {
    #[serde(rename = "Order Issue")]
    OrderIssue,
    #[serde(rename = "Product Query")]
    ProductQuery,
    #[serde(rename = "Delivery Issue")]
    DeliveryIssue,
    #[serde(rename = "Payment Issue")]
    PaymentIssue,
    #[serde(rename = "Technical Support")]
    TechnicalSupport,
    Feedback,
    Other,
}

impl TicketCategory {
    pub const ALL: [TicketCategory; 7] = [
        TicketCategory::OrderIssue,
        TicketCategory::ProductQuery,
        TicketCategory::DeliveryIssue,
        TicketCategory::PaymentIssue,
        TicketCategory::TechnicalSupport,
        TicketCategory::Feedback,
        TicketCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketCategory::OrderIssue => "Order Issue",
            TicketCategory::ProductQuery => "Product Query",
            TicketCategory::DeliveryIssue => "Delivery Issue",
            TicketCategory::PaymentIssue => "Payment Issue",
            TicketCategory::TechnicalSupport => "Technical Support",
            TicketCategory::Feedback => "Feedback",
            TicketCategory::Other => "Other",
        }
    }

    pub fn parse(value: &str) -> Option<TicketCategory> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketReply {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub message: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportTicket {
    #[serde(rename = "_id")]
    pub id: String,
    /// Human-facing ticket number used in URLs.
    #[serde(default, deserialize_with = "null_default")]
    pub ticket_id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub subject: String,
    #[serde(default, deserialize_with = "null_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_default")]
    pub status: String,
    #[serde(default)]
    pub order_id: Option<String>,
    /// Server-relative path of the uploaded attachment.
    #[serde(default)]
    pub attachment: Option<String>,
    #[serde(default)]
    pub assigned_to_name: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub replies: Vec<TicketReply>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl SupportTicket {
    /// Resolved and closed tickets no longer accept replies.
    pub fn accepts_replies(&self) -> bool {
        self.status != "Resolved" && self.status != "Closed"
    }
}

/// Fields of a new ticket; the attachment travels separately as a multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTicket {
    pub subject: String,
    pub category: Option<TicketCategory>,
    pub description: String,
    pub order_id: Option<String>,
}
