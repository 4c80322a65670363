pub mod error;

pub use error::{handle_domain_error, handle_domain_error_with, json_error_handler};
