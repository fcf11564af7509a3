// src/contact/submit.rs
// =============================================================================
// Sends the contact form to a form-processing service and tracks the result.
//
// State machine (one flag, overwritten on every attempt):
//
//   Idle/Succeeded/Failed --submit--> Pending --2xx--------> Succeeded
//                                             --non-2xx----> Failed(reason)
//                                             --no answer--> Failed(reason)
//
// Only one submission may be in flight: submit() takes &mut self and refuses
// to start while the state is Pending. If the submit future is dropped before
// the answer arrives (a timeout, a select!), the state rolls back to Idle.
// There is no retry and no queue; the user resubmits by hand.
// =============================================================================

use reqwest::header::ACCEPT;
use reqwest::Client;
use thiserror::Error;
use url::Url;

use super::form::{ContactForm, ContactSubmission, InvalidForm};
use crate::config::{parse_url, ContactSettings, SettingsError};
use crate::error::error_message_from_body;

pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";
pub const NETWORK_FAILURE: &str = "Failed to send message. Check your internet connection.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// Request sent, waiting for the answer
    Pending,
    /// The service accepted the message
    Succeeded,
    /// The service refused the message, or could not be reached
    Failed(String),
}

impl SubmissionState {
    pub fn is_pending(&self) -> bool {
        matches!(self, SubmissionState::Pending)
    }
}

// Notified on every state change, e.g. to render "Sending..."
pub trait SubmissionObserver: Send + Sync {
    fn on_change(&self, state: &SubmissionState);
}

// Reasons submit() refused to start. These never touch the state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("a message is already being sent")]
    InFlight,
    #[error(transparent)]
    Invalid(#[from] InvalidForm),
}

pub struct ContactSubmitter {
    client: Client,
    endpoint: Url,
    message_limit: Option<usize>,
    state: SubmissionState,
    observer: Option<Box<dyn SubmissionObserver>>,
}

impl ContactSubmitter {
    pub fn new(settings: &ContactSettings) -> Result<Self, SettingsError> {
        let endpoint = settings
            .endpoint
            .as_deref()
            .filter(|e| !e.trim().is_empty())
            .ok_or(SettingsError::Missing("contact.endpoint"))?;
        let endpoint = parse_url("contact.endpoint", endpoint.trim())?;

        // No client-side timeout: the transport's own deadlines apply
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            endpoint,
            message_limit: settings.message_limit,
            state: SubmissionState::Idle,
            observer: None,
        })
    }

    pub fn with_observer(mut self, observer: impl SubmissionObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    // False while a submission is in flight (the "disabled button")
    pub fn can_submit(&self) -> bool {
        !self.state.is_pending()
    }

    // Sends the form once. On success the form is cleared; on failure the
    // fields are left as the user typed them.
    pub async fn submit(&mut self, form: &mut ContactForm) -> Result<SubmissionState, SubmitError> {
        // The "disabled button": nothing starts while a request is out
        if !self.can_submit() {
            return Err(SubmitError::InFlight);
        }
        // Invalid input is refused before the state moves at all
        form.validate()?;

        // Snapshot the fields now; later edits do not change what is sent
        let submission = form.to_submission(self.message_limit);

        // From here until finish(), the state reads Pending
        let guard = PendingGuard::enter(&mut self.state, self.observer.as_deref());

        let next = deliver(&self.client, &self.endpoint, &submission).await;

        // Only a success empties the form
        if next == SubmissionState::Succeeded {
            form.clear();
        }

        guard.finish(next.clone());
        Ok(next)
    }
}

// Sends one request and turns whatever comes back into the final state
async fn deliver(client: &Client, endpoint: &Url, submission: &ContactSubmission) -> SubmissionState {
    let result = client
        .post(endpoint.clone())
        .header(ACCEPT, "application/json")
        .form(submission)
        .send()
        .await;

    match result {
        Ok(response) if response.status().is_success() => {
            tracing::info!(status = %response.status(), "message sent");
            SubmissionState::Succeeded
        }
        Ok(response) => {
            let status = response.status();
            // An unreadable body just means no reason to show
            let body = response.text().await.unwrap_or_default();
            let reason = error_message_from_body(&body)
                .unwrap_or_else(|| GENERIC_FAILURE.to_string());
            tracing::warn!(%status, reason = %reason, "form endpoint refused message");
            SubmissionState::Failed(reason)
        }
        Err(e) => {
            tracing::warn!(error = %e, "could not reach form endpoint");
            SubmissionState::Failed(NETWORK_FAILURE.to_string())
        }
    }
}

// Holds the state at Pending while a request is in flight. Dropped without
// finish(), i.e. the submit future was cancelled, it rolls back to Idle.
struct PendingGuard<'a> {
    state: &'a mut SubmissionState,
    observer: Option<&'a dyn SubmissionObserver>,
    finished: bool,
}

impl<'a> PendingGuard<'a> {
    fn enter(state: &'a mut SubmissionState, observer: Option<&'a dyn SubmissionObserver>) -> Self {
        let mut guard = Self {
            state,
            observer,
            finished: false,
        };
        guard.set(SubmissionState::Pending);
        guard
    }

    fn finish(mut self, next: SubmissionState) {
        self.set(next);
        self.finished = true;
    }

    fn set(&mut self, next: SubmissionState) {
        tracing::debug!(from = ?self.state, to = ?next, "submission state");
        *self.state = next;
        if let Some(observer) = self.observer {
            observer.on_change(self.state);
        }
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            tracing::warn!("submission cancelled before an answer arrived");
            self.set(SubmissionState::Idle);
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does submit() take &mut self?
//    - The borrow checker then forbids a second submit() on the same
//      submitter while the first one is still awaiting
//
// 2. Why a guard struct with Drop?
//    - An async fn can be dropped at any .await; code after that point
//      never runs, but Drop always does
//    - So the rollback to Idle lives in PendingGuard::drop
//
// 3. What is Box<dyn SubmissionObserver>?
//    - A trait object: any type implementing the trait, chosen at runtime
//    - The CLI prints progress with it; tests record every state with it
// -----------------------------------------------------------------------------
