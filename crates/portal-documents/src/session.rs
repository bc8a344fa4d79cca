//! Edit sessions for the profile and product screens.
//!
//! Both keep the plain form fields next to a [`FieldStateCoordinator`] for the
//! upload slots, and assemble the outbound request from the coordinator's
//! snapshot so previews never reach the wire.

use std::collections::BTreeMap;

use portal_core::models::{Product, ProductDraft, ProductForm, SellerProfile};
use portal_core::validation::{validate_product, validate_profile};
use portal_core::FieldErrors;

use crate::coordinator::{FieldStateCoordinator, SelectionOutcome};
use crate::error::SlotError;
use crate::handles::{DisplayHandle, HandleRegistry};
use crate::slots::{product_slots, profile_slots, PRODUCT_IMAGE_SLOT};
use crate::source::FileSource;

/// Profile screen state: last saved profile, working draft, document slots.
#[derive(Debug)]
pub struct ProfileEditSession {
    saved: SellerProfile,
    draft: SellerProfile,
    editing: bool,
    documents: FieldStateCoordinator,
}

impl ProfileEditSession {
    pub fn new(registry: HandleRegistry, max_upload_bytes: u64) -> Self {
        Self {
            saved: SellerProfile::default(),
            draft: SellerProfile::default(),
            editing: false,
            documents: FieldStateCoordinator::new(profile_slots(max_upload_bytes), registry),
        }
    }

    /// Adopt a freshly fetched profile and rebuild every preview.
    pub fn load(&mut self, profile: SellerProfile) {
        self.documents.initialize(&profile.documents());
        self.saved = profile;
        self.reset_draft();
        self.editing = false;
    }

    fn reset_draft(&mut self) {
        self.draft = self.saved.clone();
        self.draft.apply_documents(&self.documents.snapshot());
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn begin_edit(&mut self) {
        self.editing = true;
    }

    /// Throw away unsaved changes, documents included.
    pub fn cancel_edit(&mut self) {
        self.documents.revert_all(&self.saved.documents());
        self.reset_draft();
        self.editing = false;
        tracing::debug!("Profile edit cancelled");
    }

    pub fn saved(&self) -> &SellerProfile {
        &self.saved
    }

    pub fn draft(&self) -> &SellerProfile {
        &self.draft
    }

    /// Plain profile fields. Document fields are overwritten from the slots on submit.
    pub fn draft_mut(&mut self) -> &mut SellerProfile {
        &mut self.draft
    }

    pub fn documents(&self) -> &FieldStateCoordinator {
        &self.documents
    }

    pub fn document_preview(&self, name: &str) -> Option<&DisplayHandle> {
        self.documents.display_handle(name)
    }

    pub async fn select_document(
        &mut self,
        name: &str,
        file: &dyn FileSource,
    ) -> Result<SelectionOutcome, SlotError> {
        let outcome = self.documents.select_file(name, file).await?;
        self.sync_document(name);
        Ok(outcome)
    }

    pub fn clear_document(&mut self, name: &str) -> Result<(), SlotError> {
        self.documents.clear_slot(name)?;
        self.sync_document(name);
        Ok(())
    }

    fn sync_document(&mut self, name: &str) {
        let value = self.documents.encoded_value(name).map(str::to_string);
        self.draft.set_document(name, value);
    }

    /// Field messages for the form, including per-slot upload messages.
    pub fn messages(&self) -> BTreeMap<String, String> {
        use portal_core::ErrorMetadata;

        let mut messages: BTreeMap<String, String> = validate_profile(&self.draft)
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        for (name, err) in self.documents.errors() {
            messages.insert(name.to_string(), err.client_message());
        }
        messages
    }

    /// Profile to send with `PUT sellerprofile`.
    ///
    /// Only field rules can refuse the update; a slot with an upload error still
    /// submits the last good value it holds.
    pub fn prepare_update(&self) -> Result<SellerProfile, FieldErrors> {
        validate_profile(&self.draft).into_result()?;

        let mut profile = self.draft.clone();
        profile.apply_documents(&self.documents.snapshot());
        tracing::info!(
            company = %profile.company_name,
            documents = profile.documents().values().filter(|v| v.is_some()).count(),
            "Profile ready for update"
        );
        Ok(profile)
    }

    /// Adopt the profile the server returned after a successful save.
    pub fn commit_saved(&mut self, profile: SellerProfile) {
        self.load(profile);
        tracing::info!("Profile saved");
    }
}

/// Product form state with its image slot.
#[derive(Debug)]
pub struct ProductEditSession {
    form: ProductForm,
    editing_id: Option<String>,
    image: FieldStateCoordinator,
}

impl ProductEditSession {
    pub fn new(registry: HandleRegistry, max_upload_bytes: u64) -> Self {
        Self {
            form: ProductForm::default(),
            editing_id: None,
            image: FieldStateCoordinator::new(product_slots(max_upload_bytes), registry),
        }
    }

    /// Blank form for a new product.
    pub fn start_new(&mut self) {
        self.form = ProductForm::default();
        self.editing_id = None;
        self.image.initialize(&BTreeMap::new());
    }

    /// Form prefilled from an existing product.
    pub fn start_edit(&mut self, product: &Product) {
        self.form = ProductForm::from(product);
        self.editing_id = Some(product.id.clone());

        let mut values = BTreeMap::new();
        values.insert(PRODUCT_IMAGE_SLOT.to_string(), product.image_url.clone());
        self.image.initialize(&values);
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing_id.as_deref()
    }

    pub fn form(&self) -> &ProductForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ProductForm {
        &mut self.form
    }

    pub fn image_preview(&self) -> Option<&DisplayHandle> {
        self.image.display_handle(PRODUCT_IMAGE_SLOT)
    }

    pub fn image_error(&self) -> Option<&SlotError> {
        self.image.error(PRODUCT_IMAGE_SLOT)
    }

    pub async fn select_image(
        &mut self,
        file: &dyn FileSource,
    ) -> Result<SelectionOutcome, SlotError> {
        self.image.select_file(PRODUCT_IMAGE_SLOT, file).await
    }

    pub fn clear_image(&mut self) -> Result<(), SlotError> {
        self.image.clear_slot(PRODUCT_IMAGE_SLOT)
    }

    /// Body for `POST products` or `PUT products/{id}`.
    pub fn prepare_submit(&self) -> Result<ProductDraft, FieldErrors> {
        let mut form = self.form.clone();
        form.image_url = self
            .image
            .encoded_value(PRODUCT_IMAGE_SLOT)
            .unwrap_or_default()
            .to_string();
        validate_product(&form)
    }

    /// Back to a blank form once the backend accepted the product.
    pub fn finish(&mut self) {
        tracing::info!(product_id = ?self.editing_id, "Product saved");
        self.start_new();
    }
}
