//! Domain methods for the seller backend client.
//!
//! Request and response bodies come from `portal_core::models`; only the small
//! wrapper types the backend uses for acknowledgements are defined here.

use crate::ApiClient;
use portal_core::models::{
    Category, LoginRequest, LoginResponse, NewTicket, Product, ProductDraft,
    ProfileUpdateResponse, SellerProfile, SignupRequest, SupportTicket,
};
use portal_core::validation::validate_new_ticket;
use portal_core::PortalError;
use serde::{Deserialize, Serialize};

/// Acknowledgement body (`{ "message": ... }` or `{ "msg": ... }`); other fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
}

impl MessageResponse {
    pub fn text(&self) -> Option<&str> {
        self.message.as_deref().or(self.msg.as_deref())
    }
}

/// File sent along with a new support ticket.
#[derive(Debug, Clone)]
pub struct TicketAttachment {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

#[derive(Serialize)]
struct ReplyBody<'a> {
    message: &'a str,
}

/// Reject ids that would change the request path.
fn path_id(id: &str) -> Result<&str, PortalError> {
    let id = id.trim();
    if id.is_empty() || id.contains(['/', '?', '#']) || id == ".." {
        return Err(PortalError::InvalidInput(format!("Invalid id: {:?}", id)));
    }
    Ok(id)
}

impl ApiClient {
    /// `POST sellerauth/login`. The caller installs the returned token with
    /// [`ApiClient::with_session`].
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, PortalError> {
        let response: LoginResponse = self.post_json("sellerauth/login", request, false).await?;
        tracing::info!(email = %request.email, "Seller logged in");
        Ok(response)
    }

    /// `POST seller-auth/register`
    pub async fn register(&self, request: &SignupRequest) -> Result<MessageResponse, PortalError> {
        self.post_json("seller-auth/register", request, false).await
    }

    /// `GET sellerprofile`
    pub async fn get_profile(&self) -> Result<SellerProfile, PortalError> {
        self.get("sellerprofile", true).await
    }

    /// `PUT sellerprofile`; returns the profile as the backend stored it.
    pub async fn update_profile(
        &self,
        profile: &SellerProfile,
    ) -> Result<SellerProfile, PortalError> {
        let response: ProfileUpdateResponse = self.put_json("sellerprofile", profile).await?;
        tracing::info!(
            message = response.message.as_deref().unwrap_or_default(),
            "Profile updated"
        );
        Ok(response.seller_profile)
    }

    /// `GET categories` (public)
    pub async fn list_categories(&self) -> Result<Vec<Category>, PortalError> {
        self.get("categories", false).await
    }

    /// `GET products/seller`
    pub async fn list_seller_products(&self) -> Result<Vec<Product>, PortalError> {
        self.get("products/seller", true).await
    }

    pub async fn create_product(
        &self,
        draft: &ProductDraft,
    ) -> Result<MessageResponse, PortalError> {
        let response = self.post_json("products", draft, true).await?;
        tracing::info!(name = %draft.name, "Product created");
        Ok(response)
    }

    pub async fn update_product(
        &self,
        product_id: &str,
        draft: &ProductDraft,
    ) -> Result<MessageResponse, PortalError> {
        let path = format!("products/{}", path_id(product_id)?);
        let response = self.put_json(&path, draft).await?;
        tracing::info!(product_id, "Product updated");
        Ok(response)
    }

    pub async fn delete_product(&self, product_id: &str) -> Result<MessageResponse, PortalError> {
        let path = format!("products/{}", path_id(product_id)?);
        self.delete(&path).await
    }

    /// `GET sellersupport-tickets`
    pub async fn list_tickets(&self) -> Result<Vec<SupportTicket>, PortalError> {
        self.get("sellersupport-tickets", true).await
    }

    /// Ticket by its database id (`_id`).
    pub async fn get_ticket(&self, ticket_id: &str) -> Result<SupportTicket, PortalError> {
        let path = format!("sellersupport-tickets/{}", path_id(ticket_id)?);
        self.get(&path, true).await
    }

    /// `POST sellersupport-tickets` as multipart, with an optional `attachment` part.
    pub async fn create_ticket(
        &self,
        ticket: &NewTicket,
        attachment: Option<TicketAttachment>,
    ) -> Result<MessageResponse, PortalError> {
        validate_new_ticket(ticket).into_result()?;
        let category = ticket
            .category
            .ok_or_else(|| PortalError::InvalidInput("Category is required.".to_string()))?;

        let mut form = reqwest::multipart::Form::new()
            .text("subject", ticket.subject.clone())
            .text("category", category.as_str())
            .text("description", ticket.description.clone());

        if let Some(order_id) = ticket.order_id.as_deref().filter(|id| !id.trim().is_empty()) {
            form = form.text("orderId", order_id.to_string());
        }

        if let Some(attachment) = attachment {
            let part = reqwest::multipart::Part::bytes(attachment.data)
                .file_name(attachment.file_name)
                .mime_str(&attachment.content_type)
                .map_err(|e| PortalError::InvalidInput(format!("Invalid attachment type: {}", e)))?;
            form = form.part("attachment", part);
        }

        let response = self.post_multipart("sellersupport-tickets", form).await?;
        tracing::info!(subject = %ticket.subject, "Support ticket created");
        Ok(response)
    }

    pub async fn delete_ticket(&self, ticket_id: &str) -> Result<MessageResponse, PortalError> {
        let path = format!("sellersupport-tickets/{}", path_id(ticket_id)?);
        self.delete(&path).await
    }

    /// `POST sellersupport-tickets/{id}/reply`; returns the updated ticket.
    pub async fn reply_to_ticket(
        &self,
        ticket_id: &str,
        message: &str,
    ) -> Result<SupportTicket, PortalError> {
        if message.trim().is_empty() {
            return Err(PortalError::InvalidInput(
                "Reply message is required.".to_string(),
            ));
        }
        let path = format!("sellersupport-tickets/{}/reply", path_id(ticket_id)?);
        self.post_json(&path, &ReplyBody { message }, true).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_id() {
        assert_eq!(path_id(" 6650a1 ").unwrap(), "6650a1");
        assert!(path_id("").is_err());
        assert!(path_id("a/b").is_err());
        assert!(path_id("..").is_err());
        assert!(path_id("x?y=1").is_err());
    }

    #[test]
    fn test_message_response_text() {
        let response: MessageResponse =
            serde_json::from_str(r#"{"msg":"Ticket removed","ticket":{"_id":"1"}}"#).unwrap();
        assert_eq!(response.text(), Some("Ticket removed"));
        assert_eq!(MessageResponse::default().text(), None);
    }
}
