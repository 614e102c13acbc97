mod email_address;

pub use email_address::{is_valid_email, EmailAddress, INVALID_EMAIL_MESSAGE};
