//! Error types for `signalpath-core`.
//!
//! Each error knows the sentence a visitor should read. Store errors are
//! carried for logging but never shown verbatim.

use signalpath_store::StoreError;

use crate::pilot::PilotField;

/// Errors from submitting the pilot application form.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// One or both agreement checkboxes are unchecked.
    #[error("pilot agreements not accepted")]
    MissingAgreement,

    /// A required field is blank.
    #[error("required field '{}' is blank", .field.name())]
    MissingField { field: PilotField },

    /// A submission from this form instance is already in flight.
    #[error("submission already in progress")]
    AlreadySubmitting,

    /// This form instance has already been submitted successfully.
    #[error("application already submitted")]
    AlreadySubmitted,

    /// The email was already used for a pilot application.
    #[error("duplicate pilot application: {0}")]
    DuplicateEmail(StoreError),

    /// Any other store failure.
    #[error("pilot application write failed: {0}")]
    Store(StoreError),
}

impl From<StoreError> for FormError {
    fn from(err: StoreError) -> Self {
        if err.is_duplicate() {
            Self::DuplicateEmail(err)
        } else {
            Self::Store(err)
        }
    }
}

impl FormError {
    /// The inline message shown above the form. `contact` is the address
    /// visitors can write to when the form keeps failing.
    #[must_use]
    pub fn user_message(&self, contact: &str) -> String {
        match self {
            Self::MissingAgreement => {
                "Please agree to the pilot terms and the feedback commitment to continue."
                    .to_owned()
            }
            Self::MissingField { field } => {
                format!("Please fill in the required field: {}.", field.label())
            }
            Self::AlreadySubmitting => {
                "Your application is being submitted. Please wait a moment.".to_owned()
            }
            Self::AlreadySubmitted => "Your application has already been received.".to_owned(),
            Self::DuplicateEmail(_) => format!(
                "This email has already been used for a pilot application. \
                 If you need to update your application, please contact us at {contact}."
            ),
            Self::Store(_) => format!(
                "There was an error submitting your application. \
                 Please try again or contact us at {contact}."
            ),
        }
    }

    /// Whether the failure happened before any store call.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::MissingAgreement | Self::MissingField { .. })
    }
}

/// Errors from the email preference center.
#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
    /// Neither an email nor a token was supplied.
    #[error("no email or token supplied")]
    MissingIdentity,

    /// The token did not match any stored preferences.
    #[error("preference token not found")]
    InvalidLink,

    /// Looking up or creating the preference row failed.
    #[error("failed to load preferences: {0}")]
    Load(StoreError),

    /// Writing the preference row failed.
    #[error("failed to save preferences: {0}")]
    Save(StoreError),
}

impl PreferenceError {
    /// The message shown to the visitor.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::MissingIdentity => "Email address or token is required",
            Self::InvalidLink => "Invalid preference link.",
            Self::Load(_) => "Failed to load your preferences. Please try again later.",
            Self::Save(_) => "Failed to save preferences. Please try again.",
        }
    }

    /// Whether the page load cannot continue. Terminal errors replace the
    /// preference panel; the only way out is the home link.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Save(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_store_error_becomes_duplicate_email() {
        let err = FormError::from(StoreError::DuplicateKey {
            table: "pilot_applications".to_owned(),
            message: "email".to_owned(),
        });
        assert!(matches!(err, FormError::DuplicateEmail(_)));
        assert!(
            err.user_message("pilots@signalpath.io")
                .starts_with("This email has already been used for a pilot application.")
        );
    }

    #[test]
    fn other_store_errors_get_generic_message_with_contact() {
        let err = FormError::from(StoreError::Transient {
            reason: "timeout".to_owned(),
        });
        let msg = err.user_message("pilots@signalpath.io");
        assert!(msg.starts_with("There was an error submitting your application."));
        assert!(msg.contains("pilots@signalpath.io"));
        assert!(!err.is_validation());
    }

    #[test]
    fn save_failure_is_not_terminal() {
        assert!(PreferenceError::MissingIdentity.is_terminal());
        assert!(PreferenceError::InvalidLink.is_terminal());
        assert!(
            !PreferenceError::Save(StoreError::Transient {
                reason: "x".to_owned()
            })
            .is_terminal()
        );
    }
}
