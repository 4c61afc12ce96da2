//! Domain types and services.
//!
//! Purpose: model the site's content pages, the contact submission pipeline
//! and the ports they rely on, independent of HTTP or any particular content
//! backend.
//!
//! Public surface:
//! - `content` - content envelope and typed page models.
//! - `contact` / `contact_form` - submission validation, sanitisation and the
//!   form state machine.
//! - `media` / `rich_text` - media URL normalisation and rich text blocks.
//! - `page_loader` - caching page loaders.
//! - `ports` - traits implemented by outbound adapters.

pub mod contact;
pub mod contact_form;
pub mod content;
pub mod media;
pub mod page_loader;
pub mod ports;
pub mod rich_text;
pub mod trace_id;

pub use self::contact::{ContactField, ContactSubmission, ContactSubmissionResult, FieldError};
pub use self::contact_form::{ContactForm, FormStatus, SubmitBlocked};
pub use self::content::{PageContent, PageModel};
pub use self::page_loader::{PageBundle, PageLoadError, PageLoader};
pub use self::trace_id::TraceId;
