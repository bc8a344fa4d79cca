pub mod auth;
pub mod product;
pub mod profile;
pub mod ticket;

pub use auth::{LoginRequest, LoginResponse, SignupForm, SignupRequest};
pub use product::{Category, CategoryRef, Product, ProductDraft, ProductForm};
pub use profile::{
    Address, BusinessType, ProfileUpdateResponse, SellerProfile, PROFILE_DOCUMENT_FIELDS,
};
pub use ticket::{NewTicket, SupportTicket, TicketCategory, TicketReply};
