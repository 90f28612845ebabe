//! API module
//!
//! Contains HTTP request handlers for the book catalog endpoints

pub mod books;
pub mod envelope;
pub mod validation;

pub use envelope::Envelope;
