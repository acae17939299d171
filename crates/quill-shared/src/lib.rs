//! # Quill Shared
//!
//! Types shared between handlers and views: form DTOs with field-by-field
//! validation, and the flash-message vocabulary.

pub mod flash;
pub mod forms;

pub use flash::Flash;
pub use forms::FieldErrors;
