//! Test helpers: slot coordinators and files for pipeline tests.
//!
//! Run from workspace root: `cargo test -p portal-documents --test pipeline_test`.

pub mod fixtures;

use portal_documents::slots::profile_slots;
use portal_documents::{FieldStateCoordinator, HandleRegistry, InMemoryFile};
use std::collections::BTreeMap;

pub const MAX_UPLOAD_BYTES: u64 = 2 * 1024 * 1024;

/// Profile coordinator plus the registry it reports handles to.
pub fn profile_coordinator() -> (FieldStateCoordinator, HandleRegistry) {
    let registry = HandleRegistry::new();
    let coordinator = FieldStateCoordinator::new(profile_slots(MAX_UPLOAD_BYTES), registry.clone());
    (coordinator, registry)
}

pub fn server_values(values: &[(&str, Option<String>)]) -> BTreeMap<String, Option<String>> {
    values
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

pub fn jpeg_file(name: &str, size: usize) -> InMemoryFile {
    InMemoryFile::new(name, "image/jpeg", fixtures::jpeg_of_size(size))
}

pub fn pdf_file(name: &str, size: usize) -> InMemoryFile {
    InMemoryFile::new(name, "application/pdf", fixtures::pdf_of_size(size))
}
