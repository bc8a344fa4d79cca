use serde::{Deserialize, Serialize};

use crate::serde_helpers::null_default;

fn default_product_type() -> String {
    "Conventional".to_string()
}

/// Product category with its subcategory names (`GET categories`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub subcategories: Vec<String>,
}

/// Products come back with the category either populated or as a bare id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Populated(Category),
    Id(String),
}

impl CategoryRef {
    pub fn id(&self) -> &str {
        match self {
            CategoryRef::Populated(category) => &category.id,
            CategoryRef::Id(id) => id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            CategoryRef::Populated(category) => Some(&category.name),
            CategoryRef::Id(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_default")]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default, deserialize_with = "null_default")]
    pub unit: String,
    #[serde(default)]
    pub quantity: u32,
    /// Data URI, bare Base64 or an http(s) URL.
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category: Option<CategoryRef>,
    #[serde(default, deserialize_with = "null_default")]
    pub sub_category: String,
    #[serde(rename = "type", default = "default_product_type")]
    pub product_type: String,
}

/// Product form state as typed by the seller; numbers stay text until validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub unit: String,
    pub quantity: String,
    pub image_url: String,
    pub category: String,
    pub sub_category: String,
    pub product_type: String,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: String::new(),
            unit: String::new(),
            quantity: String::new(),
            image_url: String::new(),
            category: String::new(),
            sub_category: String::new(),
            product_type: default_product_type(),
        }
    }
}

impl From<&Product> for ProductForm {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            unit: product.unit.clone(),
            quantity: product.quantity.to_string(),
            image_url: product.image_url.clone().unwrap_or_default(),
            category: product
                .category
                .as_ref()
                .map(|c| c.id().to_string())
                .unwrap_or_default(),
            sub_category: product.sub_category.clone(),
            product_type: if product.product_type.is_empty() {
                default_product_type()
            } else {
                product.product_type.clone()
            },
        }
    }
}

/// Body of `POST products` / `PUT products/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub unit: String,
    pub quantity: u32,
    pub image_url: String,
    pub category: String,
    pub sub_category: String,
    #[serde(rename = "type")]
    pub product_type: String,
}
