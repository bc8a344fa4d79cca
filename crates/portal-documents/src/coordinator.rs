//! Field-state coordinator
//!
//! Owns every document slot of one form: its stored value, its preview handle,
//! and the last error recorded against it. All mutation goes through here so a
//! slot never holds more than one live handle.
//!
//! File reads are asynchronous and cannot be cancelled, so a selection is split
//! in two: [`FieldStateCoordinator::begin_selection`] validates and hands out a
//! ticket, [`FieldStateCoordinator::complete_selection`] applies the read only if
//! that ticket is still the newest one for the slot.

use std::collections::BTreeMap;

use crate::codec::{Decoded, DocumentCodec};
use crate::error::SlotError;
use crate::handles::{DisplayHandle, HandleRegistry};
use crate::slots::SlotSpec;
use crate::source::{FileMeta, FileSource};
use crate::validator::UploadValidator;

/// Issued for a validated selection; redeemed once its read finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionTicket {
    slot: String,
    sequence: u64,
}

impl SelectionTicket {
    pub fn slot(&self) -> &str {
        &self.slot
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// The read was stored in the slot.
    Applied,
    /// A newer selection, a clear, or a reset happened meanwhile; the read was dropped.
    Superseded,
}

#[derive(Debug)]
struct SlotState {
    spec: SlotSpec,
    encoded_value: Option<String>,
    display_handle: Option<DisplayHandle>,
    error: Option<SlotError>,
    pending: Option<u64>,
}

impl SlotState {
    fn new(spec: SlotSpec) -> Self {
        Self {
            spec,
            encoded_value: None,
            display_handle: None,
            error: None,
            pending: None,
        }
    }
}

#[derive(Debug)]
pub struct FieldStateCoordinator {
    slots: Vec<SlotState>,
    codec: DocumentCodec,
    next_sequence: u64,
}

impl FieldStateCoordinator {
    pub fn new(specs: impl IntoIterator<Item = SlotSpec>, registry: HandleRegistry) -> Self {
        Self {
            slots: specs.into_iter().map(SlotState::new).collect(),
            codec: DocumentCodec::new(registry),
            next_sequence: 0,
        }
    }

    fn slot(&self, name: &str) -> Result<&SlotState, SlotError> {
        self.slots
            .iter()
            .find(|s| s.spec.name == name)
            .ok_or_else(|| SlotError::UnknownSlot(name.to_string()))
    }

    fn slot_mut(&mut self, name: &str) -> Result<&mut SlotState, SlotError> {
        self.slots
            .iter_mut()
            .find(|s| s.spec.name == name)
            .ok_or_else(|| SlotError::UnknownSlot(name.to_string()))
    }

    /// Seed every slot from a server snapshot and rebuild its preview.
    ///
    /// Missing names and empty strings count as "no file". A value that cannot be
    /// decoded is kept as-is so it is still submitted, with a warning on the slot.
    pub fn initialize(&mut self, server_values: &BTreeMap<String, Option<String>>) {
        let codec = &self.codec;
        for slot in &mut self.slots {
            slot.pending = None;
            slot.error = None;
            codec.release_display_handle(slot.display_handle.take().as_ref());

            let raw = server_values
                .get(slot.spec.name)
                .cloned()
                .flatten()
                .filter(|v| !v.trim().is_empty());

            let Some(raw) = raw else {
                slot.encoded_value = None;
                continue;
            };

            match codec.decode(&raw, slot.spec.kind) {
                Ok(Decoded { value, handle }) => {
                    slot.encoded_value = Some(value);
                    slot.display_handle = handle;
                }
                Err(warning) => {
                    tracing::warn!(
                        slot = slot.spec.name,
                        error = %warning,
                        "Stored document has no preview"
                    );
                    slot.encoded_value = Some(raw);
                    slot.error = Some(SlotError::DecodeWarning(warning));
                }
            }
        }
        tracing::debug!(slots = self.slots.len(), "Document slots initialized");
    }

    /// Validate a picked file. On failure the error is recorded and the slot keeps
    /// its value; on success a ticket for the pending read is returned.
    pub fn begin_selection(
        &mut self,
        name: &str,
        file: &FileMeta,
    ) -> Result<SelectionTicket, SlotError> {
        let sequence = self.next_sequence + 1;
        let slot = self.slot_mut(name)?;

        let validator = UploadValidator::new(slot.spec.kind, slot.spec.max_size_bytes);
        if let Err(err) = validator.validate(file) {
            let err = SlotError::from(err);
            tracing::debug!(
                slot = name,
                file_name = %file.file_name,
                error = %err,
                "File rejected"
            );
            slot.error = Some(err.clone());
            return Err(err);
        }

        slot.error = None;
        slot.pending = Some(sequence);
        self.next_sequence = sequence;

        Ok(SelectionTicket {
            slot: name.to_string(),
            sequence,
        })
    }

    /// Apply the outcome of a read started by [`Self::begin_selection`].
    pub fn complete_selection(
        &mut self,
        ticket: SelectionTicket,
        read: Result<String, SlotError>,
    ) -> Result<SelectionOutcome, SlotError> {
        let codec = self.codec.clone();
        let slot = self.slot_mut(&ticket.slot)?;

        if slot.pending != Some(ticket.sequence) {
            tracing::warn!(slot = %ticket.slot, "Stale file read dropped");
            return Ok(SelectionOutcome::Superseded);
        }
        slot.pending = None;

        let data_uri = match read {
            Ok(data_uri) => data_uri,
            Err(err) => {
                slot.error = Some(err.clone());
                return Err(err);
            }
        };

        codec.release_display_handle(slot.display_handle.take().as_ref());
        match codec.decode(&data_uri, slot.spec.kind) {
            Ok(Decoded { value, handle }) => {
                slot.encoded_value = Some(value);
                slot.display_handle = handle;
            }
            Err(warning) => {
                tracing::warn!(slot = %ticket.slot, error = %warning, "Preview could not be built");
                slot.encoded_value = Some(data_uri);
                slot.error = Some(SlotError::DecodeWarning(warning));
            }
        }

        tracing::debug!(slot = %ticket.slot, "Document slot updated");
        Ok(SelectionOutcome::Applied)
    }

    /// Validate, read, and store a file for a slot.
    pub async fn select_file(
        &mut self,
        name: &str,
        file: &dyn FileSource,
    ) -> Result<SelectionOutcome, SlotError> {
        let ticket = self.begin_selection(name, file.meta())?;
        let read = self.codec.encode_to_data_uri(file).await;
        self.complete_selection(ticket, read)
    }

    pub fn clear_slot(&mut self, name: &str) -> Result<(), SlotError> {
        let codec = self.codec.clone();
        let slot = self.slot_mut(name)?;
        codec.release_display_handle(slot.display_handle.take().as_ref());
        slot.encoded_value = None;
        slot.error = None;
        slot.pending = None;
        tracing::debug!(slot = name, "Document slot cleared");
        Ok(())
    }

    /// Drop every local change and go back to the given server snapshot.
    pub fn revert_all(&mut self, server_values: &BTreeMap<String, Option<String>>) {
        self.teardown();
        self.initialize(server_values);
    }

    /// Current values keyed by slot name; handles are never included.
    pub fn snapshot(&self) -> BTreeMap<String, Option<String>> {
        self.slots
            .iter()
            .map(|s| (s.spec.name.to_string(), s.encoded_value.clone()))
            .collect()
    }

    /// Release every live handle and forget pending reads.
    pub fn teardown(&mut self) {
        let codec = &self.codec;
        for slot in &mut self.slots {
            codec.release_display_handle(slot.display_handle.take().as_ref());
            slot.pending = None;
        }
    }

    pub fn encoded_value(&self, name: &str) -> Option<&str> {
        self.slot(name).ok()?.encoded_value.as_deref()
    }

    pub fn display_handle(&self, name: &str) -> Option<&DisplayHandle> {
        self.slot(name).ok()?.display_handle.as_ref()
    }

    pub fn error(&self, name: &str) -> Option<&SlotError> {
        self.slot(name).ok()?.error.as_ref()
    }

    pub fn errors(&self) -> BTreeMap<&'static str, &SlotError> {
        self.slots
            .iter()
            .filter_map(|s| s.error.as_ref().map(|e| (s.spec.name, e)))
            .collect()
    }

    pub fn has_errors(&self) -> bool {
        self.slots.iter().any(|s| s.error.is_some())
    }

    pub fn slot_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.slots.iter().map(|s| s.spec.name)
    }

    pub fn spec(&self, name: &str) -> Option<&SlotSpec> {
        self.slot(name).ok().map(|s| &s.spec)
    }

    pub fn registry(&self) -> &HandleRegistry {
        self.codec.registry()
    }
}

impl Drop for FieldStateCoordinator {
    fn drop(&mut self) {
        self.teardown();
    }
}
