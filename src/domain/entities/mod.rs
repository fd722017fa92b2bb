//! Core domain entities.
//!
//! - [`RedirectRecord`] - A stored token → target URL mapping

pub mod redirect;

pub use redirect::RedirectRecord;
