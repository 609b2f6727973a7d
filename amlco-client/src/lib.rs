//! Client for the AMLCO report generator backend
//!
//!     The backend does the heavy lifting (parsing uploads, generating and rendering reports).
//!     This crate talks to it and carries the small amount of client-side state the report
//!     workflow needs between calls.
//!
//! Layers
//!
//!     transport.rs    how bytes get to the backend. [`Transport`] is the seam: the network
//!                     implementation lives in [`HttpTransport`], tests plug in an in-memory one.
//!     api.rs          one method per backend endpoint, typed with the wire structs in types.rs,
//!                     and the error convention (`detail` field, else body text, else a fallback).
//!     store.rs        small key/value state that survives between runs (`excel_id`).
//!     wizard.rs,      the report workflows: uploading inputs, assembling sections, creating a
//!     board.rs,       report, listing and deleting reports, editing and downloading one.
//!     editor.rs
//!
//! Failure model
//!
//!     Every failure ends up as an [`ApiError`] whose `Display` is the message to show next to
//!     the action that failed. Nothing is retried. A failed action leaves its state as it was
//!     before the action started (the report board restores its list after a failed delete).
//!
//!     Calls are synchronous and every action takes `&mut self`, so the same action can never
//!     be in flight twice for one piece of state. No timeouts are configured.

pub mod api;
pub mod board;
pub mod editor;
pub mod error;
pub mod files;
pub mod status;
pub mod store;
pub mod transport;
pub mod types;
pub mod wizard;

pub use api::ApiClient;
pub use board::ReportBoard;
pub use editor::ReportEditor;
pub use error::{ApiError, StoreError};
pub use files::{download_filename, format_bytes, UploadFile, UploadKind};
pub use status::{ReportStatus, StatusInfo};
pub use store::{FileStore, MemoryStore, StateStore, EXCEL_ID_KEY};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, RequestBody, Transport};
pub use wizard::{
    generate_report, QueuedUpload, SectionPlan, SourceSession, UploadQueue, UploadState,
    WizardStep,
};
