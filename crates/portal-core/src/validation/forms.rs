//! Field rules for the signup, login, profile, product and ticket forms.

use regex::Regex;
use std::sync::LazyLock;
use validator::Validate;

use super::FieldErrors;
use crate::models::{
    BusinessType, LoginRequest, NewTicket, ProductDraft, ProductForm, SellerProfile, SignupForm,
};

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"));
static MOBILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("mobile pattern is valid"));
static PINCODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{6}$").expect("pincode pattern is valid"));

const REQUIRED: &str = "This field is required.";

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn require(errors: &mut FieldErrors, field: &str, value: &str, message: &str) {
    if is_blank(value) {
        errors.add(field, message);
    }
}

/// Rules applied before `PUT sellerprofile`.
pub fn validate_profile(profile: &SellerProfile) -> FieldErrors {
    let mut errors = FieldErrors::new();

    require(&mut errors, "companyName", &profile.company_name, REQUIRED);
    require(&mut errors, "sellerName", &profile.seller_name, REQUIRED);

    if !EMAIL.is_match(&profile.email) {
        errors.add("email", "Invalid email format and is required.");
    }
    if !MOBILE.is_match(&profile.mobile) {
        errors.add("mobile", "Mobile number must be 10 digits and is required.");
    }
    if !profile.alternate_mobile.is_empty() && !MOBILE.is_match(&profile.alternate_mobile) {
        errors.add("alternateMobile", "Alternate mobile number must be 10 digits.");
    }

    require(&mut errors, "address.street", &profile.address.street, REQUIRED);
    require(&mut errors, "address.city", &profile.address.city, REQUIRED);
    require(&mut errors, "address.state", &profile.address.state, REQUIRED);
    if !PINCODE.is_match(&profile.address.pincode) {
        errors.add("address.pincode", "Pincode must be 6 digits and is required.");
    }

    if profile.business_type == BusinessType::Fpo
        && !matches!(profile.number_of_farmers, Some(n) if n > 0)
    {
        errors.add(
            "numberOfFarmers",
            "Number of farmers must be a positive number for FPO.",
        );
    }

    errors
}

/// Password strength rule used at signup. Returns the first failing requirement.
pub fn validate_signup_password(password: &str) -> Option<&'static str> {
    if password.chars().count() < 8 {
        Some("Password must be at least 8 characters.")
    } else if !password.chars().any(|c| c.is_ascii_uppercase()) {
        Some("Password must contain an uppercase letter.")
    } else if !password.chars().any(|c| c.is_ascii_lowercase()) {
        Some("Password must contain a lowercase letter.")
    } else if !password.chars().any(|c| c.is_ascii_digit()) {
        Some("Password must contain a number.")
    } else if !password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        Some("Password must contain a special character.")
    } else {
        None
    }
}

/// Rules applied before `POST seller-auth/register`.
pub fn validate_signup(form: &SignupForm) -> FieldErrors {
    let mut errors = FieldErrors::new();

    require(&mut errors, "companyName", &form.company_name, REQUIRED);
    require(&mut errors, "sellerName", &form.seller_name, REQUIRED);
    if !EMAIL.is_match(&form.email) {
        errors.add("email", "Invalid email format.");
    }
    if let Some(message) = validate_signup_password(&form.password) {
        errors.add("password", message);
    }
    if form.confirm_password != form.password {
        errors.add("confirmPassword", "Passwords do not match.");
    }
    if !MOBILE.is_match(&form.mobile) {
        errors.add("mobile", "Mobile number must be 10 digits.");
    }
    require(&mut errors, "street", &form.street, REQUIRED);
    require(&mut errors, "city", &form.city, REQUIRED);
    require(&mut errors, "state", &form.state, REQUIRED);
    require(&mut errors, "pincode", &form.pincode, REQUIRED);

    if form.business_type == BusinessType::Fpo
        && !matches!(form.number_of_farmers.trim().parse::<u32>(), Ok(n) if n > 0)
    {
        errors.add(
            "numberOfFarmers",
            "Number of farmers must be a positive number.",
        );
    }

    errors
}

/// Rules applied before `POST sellerauth/login`.
pub fn validate_login(request: &LoginRequest) -> FieldErrors {
    match request.validate() {
        Ok(()) => FieldErrors::new(),
        Err(errors) => FieldErrors::from(errors),
    }
}

/// Validate the product form and convert it to the request body.
pub fn validate_product(form: &ProductForm) -> Result<ProductDraft, FieldErrors> {
    let mut errors = FieldErrors::new();

    require(&mut errors, "name", &form.name, "Product name is required.");
    require(&mut errors, "description", &form.description, "Description is required.");

    let price = form.price.trim().parse::<f64>().ok().filter(|p| *p > 0.0);
    if price.is_none() {
        errors.add("price", "Price must be a positive number.");
    }

    require(&mut errors, "unit", &form.unit, "Unit is required (e.g., kg, piece).");

    let quantity = form.quantity.trim().parse::<u32>().ok();
    if quantity.is_none() {
        errors.add("quantity", "Quantity must be a non-negative integer.");
    }

    require(&mut errors, "category", &form.category, "Category is required.");
    require(&mut errors, "subCategory", &form.sub_category, "Subcategory is required.");

    if !form.image_url.is_empty()
        && !form.image_url.starts_with("data:image/")
        && !form.image_url.starts_with("http")
    {
        errors.add("imageUrl", "Invalid image format or URL.");
    }

    match (price, quantity) {
        (Some(price), Some(quantity)) if errors.is_empty() => Ok(ProductDraft {
            name: form.name.trim().to_string(),
            description: form.description.trim().to_string(),
            price,
            unit: form.unit.trim().to_string(),
            quantity,
            image_url: form.image_url.clone(),
            category: form.category.clone(),
            sub_category: form.sub_category.trim().to_string(),
            product_type: form.product_type.clone(),
        }),
        _ => Err(errors),
    }
}

/// Rules applied before `POST sellersupport-tickets`.
pub fn validate_new_ticket(ticket: &NewTicket) -> FieldErrors {
    let mut errors = FieldErrors::new();
    require(&mut errors, "subject", &ticket.subject, "Subject is required.");
    if ticket.category.is_none() {
        errors.add("category", "Category is required.");
    }
    require(&mut errors, "description", &ticket.description, "Description is required.");
    errors
}
