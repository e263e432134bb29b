//! Applicant form normalization and submission to the remote scoring service.
//!
//! A submission runs strictly in sequence: bound checks, label normalization, payload assembly,
//! one POST, interpretation of the reply. Nothing is kept between submissions.

pub mod categories;
pub mod client;
pub mod payload;
pub mod profile;
pub mod router;

pub use categories::{
    option_sets, CategoryField, LoanType, LookupFailure, MinimumPayment, Occupation, OptionSet,
    PaymentBehaviour,
};
pub use client::{
    HttpTransport, Palette, PredictionCard, PredictionClient, PredictionError, PredictionResult,
    PredictionTransport, RiskClass, TransportError, TransportReply, PREDICTION_FAILURE_MESSAGE,
};
pub use payload::{PayloadData, PredictionPayload};
pub use profile::{ApplicantForm, ApplicantProfile, NumericAttributes, ProfileError};
pub use router::scoring_router;

use tracing::{error, info};

/// Failure of one submission.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    /// A label outside the option sets reached the normalizer. The selection controls only offer
    /// known labels, so this is a defect rather than bad input.
    #[error("option set inconsistency: {0}")]
    Lookup(#[from] LookupFailure),
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    Prediction(#[from] PredictionError),
}

impl ScoringError {
    /// Text for the user, or `None` for internal errors that must not be presented as validation.
    pub fn user_message(&self) -> Option<String> {
        match self {
            ScoringError::Lookup(_) => None,
            ScoringError::Profile(err) => Some(err.user_message()),
            ScoringError::Prediction(err) => Some(err.user_message().to_string()),
        }
    }

    pub fn is_internal(&self) -> bool {
        self.user_message().is_none()
    }
}

/// Runs the submission workflow against one prediction client.
pub struct ScoringService<T> {
    client: PredictionClient<T>,
}

impl<T> ScoringService<T>
where
    T: PredictionTransport,
{
    pub fn new(client: PredictionClient<T>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &PredictionClient<T> {
        &self.client
    }

    /// Normalize and validate the form without contacting the scoring service.
    pub fn prepare(&self, form: ApplicantForm) -> Result<PredictionPayload, ScoringError> {
        let profile = form.into_profile().map_err(|err| {
            if err.is_internal() {
                error!(error = %err, "applicant form could not be normalized");
            }
            err
        })?;
        Ok(PredictionPayload::assemble(&profile))
    }

    pub async fn submit(&self, form: ApplicantForm) -> Result<PredictionResult, ScoringError> {
        let payload = self.prepare(form)?;

        info!("awaiting credit score prediction");
        let result = self.client.predict(&payload).await?;
        info!(
            class = result.class.label(),
            version = result.version.as_deref().unwrap_or("-"),
            "credit score prediction received"
        );

        Ok(result)
    }
}
