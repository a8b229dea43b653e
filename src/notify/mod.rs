pub mod composer;
pub mod dispatcher;
pub mod gmail;

pub use composer::{fallback_body, Notification, NotificationComposer, Template};
pub use dispatcher::{MailTransport, NotificationDispatcher, OutgoingEmail};
pub use gmail::GmailTransport;
