// src/contact/mod.rs
// =============================================================================
// This module sends contact-form messages.
//
// Submodules:
// - form: the fields the user fills in, validation and truncation
// - submit: the one-request-at-a-time submitter and its result state
// =============================================================================

mod form;
mod submit;

pub use form::ContactForm;
pub use submit::{ContactSubmitter, SubmissionObserver, SubmissionState};
