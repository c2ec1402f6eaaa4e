//! Request-scoped domain types
//!
//! Nothing here is persisted; every value lives for a single submission.

pub mod message;
pub mod submission;

pub use message::{EmailAddress, MessageAttachment, OutboundMessage, SendReceipt};
pub use submission::{RawSubmission, SanitizedSubmission, SubmissionKind, UploadedFile};
