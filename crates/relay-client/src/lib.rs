//! Form client for the relay gateway.
//!
//! Holds the two form fields, validates them locally, submits one request
//! per action with a 30 second bound, and turns whatever happened into a
//! [`FormOutcome`] that [`render`] can print.

/// Submission and outcome classification.
pub mod client;
/// Form fields and local validation.
pub mod form;
/// Terminal rendering of outcomes.
pub mod render;

pub use client::{FormClient, FormOutcome, DEFAULT_TIMEOUT};
pub use form::{FormState, DEFAULT_BACKEND_URL, INVOKE_PATH, MISSING_URL, MISSING_VALUE};
pub use render::{render, side_by_side, INSTRUCTIONS};
