use serde::{Deserialize, Serialize};
use validator::Validate;

use super::profile::{Address, BusinessType};

/// Body of `POST sellerauth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format."))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required."))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Signup form state; the confirmation and FPO farmer count are checked client-side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub company_name: String,
    pub seller_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub mobile: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub business_type: BusinessType,
    pub number_of_farmers: String,
}

/// Body of `POST seller-auth/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub company_name: String,
    pub seller_name: String,
    pub email: String,
    pub password: String,
    pub mobile: String,
    pub address: Address,
    pub business_type: BusinessType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_farmers: Option<u32>,
}

impl From<&SignupForm> for SignupRequest {
    fn from(form: &SignupForm) -> Self {
        Self {
            company_name: form.company_name.clone(),
            seller_name: form.seller_name.clone(),
            email: form.email.clone(),
            password: form.password.clone(),
            mobile: form.mobile.clone(),
            address: Address {
                street: form.street.clone(),
                city: form.city.clone(),
                state: form.state.clone(),
                pincode: form.pincode.clone(),
            },
            business_type: form.business_type,
            number_of_farmers: match form.business_type {
                BusinessType::Fpo => form.number_of_farmers.trim().parse().ok(),
                BusinessType::Sme => None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_request_drops_farmers_for_sme() {
        let form = SignupForm {
            business_type: BusinessType::Sme,
            number_of_farmers: "40".into(),
            ..SignupForm::default()
        };
        let request = SignupRequest::from(&form);
        assert_eq!(request.number_of_farmers, None);
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("numberOfFarmers").is_none());
    }

    #[test]
    fn test_signup_request_nests_address() {
        let form = SignupForm {
            street: "12 Market Road".into(),
            city: "Nashik".into(),
            state: "MH".into(),
            pincode: "422001".into(),
            business_type: BusinessType::Fpo,
            number_of_farmers: " 40 ".into(),
            ..SignupForm::default()
        };
        let request = SignupRequest::from(&form);
        assert_eq!(request.number_of_farmers, Some(40));
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["address"]["city"], "Nashik");
        assert_eq!(value["businessType"], "FPO");
    }
}
