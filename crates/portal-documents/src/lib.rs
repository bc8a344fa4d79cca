//! Document encoding pipeline
//!
//! Validates files picked for a document slot, turns them into Base64 data URIs
//! for the profile and product requests, and rebuilds local preview handles from
//! whatever payload the backend sends back. The [`FieldStateCoordinator`] owns the
//! slot state; the edit sessions in [`session`] drive it the way the portal
//! screens do.

pub mod codec;
pub mod coordinator;
pub mod error;
pub mod handles;
pub mod session;
pub mod slots;
pub mod source;
pub mod validator;

pub use codec::{DocumentCodec, Payload};
pub use coordinator::{FieldStateCoordinator, SelectionOutcome, SelectionTicket};
pub use error::{DecodeWarning, SlotError};
pub use handles::{Blob, DisplayHandle, HandleRegistry};
pub use session::{ProductEditSession, ProfileEditSession};
pub use slots::{SlotKind, SlotSpec};
pub use source::{FileMeta, FileSource, InMemoryFile, LocalFile};
pub use validator::{UploadValidator, ValidationError};
