use futures_util::future::{FutureExt, LocalBoxFuture};
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::{cell::Cell, rc::Rc, time::Duration};
use thiserror::Error;

use crate::{notify::Severity, utils::sleep};

pub const SUCCESS_MESSAGE: &str =
    "Terima kasih! Pesan Anda telah terkirim. Kami akan segera menghubungi Anda.";

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));
static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\+62|62|0)[0-9]{9,13}$").expect("valid phone pattern"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Nama lengkap harus diisi!")]
    MissingName,
    #[error("Email/WhatsApp harus diisi!")]
    MissingContact,
    #[error("Pesan harus diisi!")]
    MissingMessage,
    #[error("Format email atau nomor WhatsApp tidak valid!")]
    InvalidContact,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Pesan gagal terkirim: {0}")]
    Rejected(String),
}

/// Field values captured from the contact form at submit time.
///
/// `contact` holds either an email address or an Indonesian WhatsApp number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactSubmission {
    pub name: String,
    pub contact: String,
    pub subject: String,
    pub message: String,
}

impl ContactSubmission {
    /// Trims the free-text fields. The subject comes from a `<select>` and is kept verbatim.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            contact: self.contact.trim().to_string(),
            subject: self.subject,
            message: self.message.trim().to_string(),
        }
    }

    /// Checks the rules in order and reports only the first one that fails.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        if self.contact.is_empty() {
            return Err(ValidationError::MissingContact);
        }
        if self.message.is_empty() {
            return Err(ValidationError::MissingMessage);
        }
        if !is_valid_contact(&self.contact) {
            return Err(ValidationError::InvalidContact);
        }
        Ok(())
    }
}

pub fn is_valid_contact(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value) || PHONE_PATTERN.is_match(value)
}

/// Delivers a validated submission somewhere and reports back asynchronously.
pub trait Submitter {
    fn submit(&self, submission: ContactSubmission) -> LocalBoxFuture<'static, Result<(), SubmitError>>;
}

/// Stands in for a real endpoint: waits a fixed delay, then succeeds.
#[derive(Clone, Copy, Debug)]
pub struct SimulatedSubmitter {
    delay: Duration,
}

impl SimulatedSubmitter {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Submitter for SimulatedSubmitter {
    fn submit(&self, submission: ContactSubmission) -> LocalBoxFuture<'static, Result<(), SubmitError>> {
        let delay = self.delay;
        async move {
            debug!(
                "simulating delivery of contact form (subject: {:?})",
                submission.subject
            );
            sleep(delay).await;
            Ok(())
        }
        .boxed_local()
    }
}

/// The parts of the page the form controller touches.
pub trait FormView {
    fn read(&self) -> ContactSubmission;
    fn set_busy(&self, busy: bool);
    fn reset(&self);
    fn notify(&self, message: &str, severity: Severity);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Submitting,
}

pub struct ContactFormController<V, S> {
    view: V,
    submitter: S,
    phase: Cell<FormPhase>,
}

impl<V, S> ContactFormController<V, S>
where
    V: FormView + 'static,
    S: Submitter + 'static,
{
    pub fn new(view: V, submitter: S) -> Rc<Self> {
        Rc::new(Self {
            view,
            submitter,
            phase: Cell::new(FormPhase::Idle),
        })
    }

    pub fn phase(&self) -> FormPhase {
        self.phase.get()
    }

    /// Handles one submit event.
    ///
    /// Returns the delivery task when the form was accepted; the caller drives it
    /// on whatever executor it has. Rejected or ignored submits return `None`.
    pub fn handle_submit(self: &Rc<Self>) -> Option<LocalBoxFuture<'static, ()>> {
        if self.phase.get() == FormPhase::Submitting {
            debug!("contact form submit ignored while a delivery is pending");
            return None;
        }

        let submission = self.view.read().normalized();
        if let Err(error) = submission.validate() {
            debug!("contact form rejected: {error:?}");
            self.view.notify(&error.to_string(), Severity::Error);
            return None;
        }

        self.phase.set(FormPhase::Submitting);
        self.view.set_busy(true);

        let delivery = self.submitter.submit(submission);
        let controller = Rc::clone(self);

        Some(
            async move {
                let outcome = delivery.await;
                controller.finish(outcome);
            }
            .boxed_local(),
        )
    }

    fn finish(&self, outcome: Result<(), SubmitError>) {
        match outcome {
            Ok(()) => {
                info!("contact form delivered");
                self.view.notify(SUCCESS_MESSAGE, Severity::Success);
                self.view.reset();
            }
            Err(error) => {
                warn!("contact form delivery failed: {error}");
                self.view.notify(&error.to_string(), Severity::Error);
            }
        }

        self.view.set_busy(false);
        self.phase.set(FormPhase::Idle);
    }
}
