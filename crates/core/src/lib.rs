//! # Kogito Core
//!
//! Editing logic behind the Kogito diary and vicious-circle screens.
//!
//! - [`vicious_circle`] and [`sections`]: the five-section document model
//! - [`editor`]: the editor controller (item editor and section overview state)
//! - [`diary`]: the free-text diary entry editor
//! - [`persistence`]: best-effort, non-blocking saving
//! - [`screens`]: navigation lifecycle glue that drives the editors
//!
//! **No transport concerns**: the backend API, the analytics SDK and the app event
//! bus are reached through the traits in [`ports`]. [`memory`] provides in-process
//! implementations.

pub mod config;
pub mod constants;
pub mod diary;
pub mod editor;
pub mod error;
pub mod memory;
pub mod persistence;
pub mod ports;
pub mod screens;
pub mod sections;
pub mod tracking;
pub mod vicious_circle;

pub use config::{CoreConfig, Platform};
pub use editor::{EditTarget, EditorController, OverviewTarget};
pub use error::{KogitoError, KogitoResult};
pub use kogito_types::{EntryId, NonEmptyText, TextError};
pub use persistence::Persistor;
pub use sections::{Section, Sections};
pub use vicious_circle::{Document, SaveViciousCircleInput, ViciousCircleEntry};
