pub mod error;

pub use error::{handle_status, handle_validation_errors, json_error_handler};
