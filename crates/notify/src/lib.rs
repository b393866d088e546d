//! Booking notification delivery for the Cadenza platform.
//!
//! Confirmation and alert emails are strictly best-effort: the submission
//! pipeline dispatches them as detached tasks after the booking row is
//! safely persisted, and delivery trouble is only ever visible in the
//! logs. A booking is never rolled back or failed because of email.

pub mod dispatcher;
pub mod email;
pub mod templates;

pub use dispatcher::Dispatcher;
pub use email::{EmailConfig, EmailError, EmailSender};
