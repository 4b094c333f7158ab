//! Pilot program application form.
//!
//! [`PilotApplicationDraft`] is the typed, in-memory draft of the form;
//! fields are addressed through [`PilotField`], never by free-form keys.
//! [`PilotApplicationForm`] owns a draft and walks it through
//! `Editing → Submitting → Submitted`.

use signalpath_store::{LeadStore, PENDING_STATUS, PilotApplication};

use crate::error::FormError;

/// A single input of the pilot application form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PilotField {
    CompanyName,
    CompanyWebsite,
    CompanySize,
    Industry,
    FirstName,
    LastName,
    Email,
    Phone,
    JobTitle,
    LinkedinUrl,
    CurrentTools,
    MonthlyOutreachVolume,
    PrimaryGoal,
    BiggestChallenge,
    Timeline,
    ReferralSource,
    AgreeToTerms,
    AgreeToFeedback,
}

impl PilotField {
    /// Fields that must be non-blank, in form order.
    pub const REQUIRED: [Self; 10] = [
        Self::CompanyName,
        Self::CompanySize,
        Self::Industry,
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::JobTitle,
        Self::MonthlyOutreachVolume,
        Self::PrimaryGoal,
        Self::Timeline,
    ];

    /// The HTML `name` attribute.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CompanyName => "company_name",
            Self::CompanyWebsite => "company_website",
            Self::CompanySize => "company_size",
            Self::Industry => "industry",
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::JobTitle => "job_title",
            Self::LinkedinUrl => "linkedin_url",
            Self::CurrentTools => "current_tools",
            Self::MonthlyOutreachVolume => "monthly_outreach_volume",
            Self::PrimaryGoal => "primary_goal",
            Self::BiggestChallenge => "biggest_challenge",
            Self::Timeline => "timeline",
            Self::ReferralSource => "referral_source",
            Self::AgreeToTerms => "agree_to_terms",
            Self::AgreeToFeedback => "agree_to_feedback",
        }
    }

    /// Label shown next to the input.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CompanyName => "Company name",
            Self::CompanyWebsite => "Company website",
            Self::CompanySize => "Company size",
            Self::Industry => "Industry",
            Self::FirstName => "First name",
            Self::LastName => "Last name",
            Self::Email => "Work email",
            Self::Phone => "Phone",
            Self::JobTitle => "Job title",
            Self::LinkedinUrl => "LinkedIn profile",
            Self::CurrentTools => "Current outreach tools",
            Self::MonthlyOutreachVolume => "Monthly outreach volume",
            Self::PrimaryGoal => "Primary goal",
            Self::BiggestChallenge => "Biggest challenge",
            Self::Timeline => "When would you like to start?",
            Self::ReferralSource => "How did you hear about us?",
            Self::AgreeToTerms => "I agree to the pilot program terms",
            Self::AgreeToFeedback => "I commit to giving feedback during the pilot",
        }
    }

    /// Whether the input is a checkbox.
    #[must_use]
    pub const fn is_checkbox(self) -> bool {
        matches!(self, Self::AgreeToTerms | Self::AgreeToFeedback)
    }

    /// Whether the field must be non-blank.
    #[must_use]
    pub fn is_required(self) -> bool {
        Self::REQUIRED.contains(&self)
    }
}

impl std::str::FromStr for PilotField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "company_name" => Self::CompanyName,
            "company_website" => Self::CompanyWebsite,
            "company_size" => Self::CompanySize,
            "industry" => Self::Industry,
            "first_name" => Self::FirstName,
            "last_name" => Self::LastName,
            "email" => Self::Email,
            "phone" => Self::Phone,
            "job_title" => Self::JobTitle,
            "linkedin_url" => Self::LinkedinUrl,
            "current_tools" => Self::CurrentTools,
            "monthly_outreach_volume" => Self::MonthlyOutreachVolume,
            "primary_goal" => Self::PrimaryGoal,
            "biggest_challenge" => Self::BiggestChallenge,
            "timeline" => Self::Timeline,
            "referral_source" => Self::ReferralSource,
            "agree_to_terms" => Self::AgreeToTerms,
            "agree_to_feedback" => Self::AgreeToFeedback,
            other => return Err(format!("unknown pilot form field: {other}")),
        })
    }
}

/// The value of one input: the raw text, or the checked state of a checkbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Checked(bool),
}

impl FieldValue {
    /// Build the value an HTML form posts for `field`. Browsers only send
    /// checked checkboxes, so any posted value means checked.
    #[must_use]
    pub fn from_form(field: PilotField, raw: &str) -> Self {
        if field.is_checkbox() {
            Self::Checked(!raw.is_empty())
        } else {
            Self::Text(raw.to_owned())
        }
    }
}

/// In-memory draft of the pilot application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PilotApplicationDraft {
    pub company_name: String,
    pub company_website: String,
    pub company_size: String,
    pub industry: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub job_title: String,
    pub linkedin_url: String,
    pub current_tools: String,
    pub monthly_outreach_volume: String,
    pub primary_goal: String,
    pub biggest_challenge: String,
    pub timeline: String,
    pub referral_source: String,
    pub agree_to_terms: bool,
    pub agree_to_feedback: bool,
}

impl PilotApplicationDraft {
    /// Merge one field into the draft. A text value sent to a checkbox (or
    /// the reverse) is coerced, so the draft never holds a mismatched type.
    pub fn set_field(&mut self, field: PilotField, value: FieldValue) {
        match (field, value) {
            (PilotField::AgreeToTerms, FieldValue::Checked(on)) => self.agree_to_terms = on,
            (PilotField::AgreeToFeedback, FieldValue::Checked(on)) => self.agree_to_feedback = on,
            (PilotField::AgreeToTerms, FieldValue::Text(t)) => self.agree_to_terms = !t.is_empty(),
            (PilotField::AgreeToFeedback, FieldValue::Text(t)) => {
                self.agree_to_feedback = !t.is_empty();
            }
            (_, FieldValue::Checked(on)) => {
                if let Some(slot) = self.text_mut(field) {
                    *slot = if on { "on".to_owned() } else { String::new() };
                }
            }
            (_, FieldValue::Text(text)) => {
                if let Some(slot) = self.text_mut(field) {
                    *slot = text;
                }
            }
        }
    }

    /// Current text of a non-checkbox field.
    #[must_use]
    pub fn text(&self, field: PilotField) -> &str {
        match field {
            PilotField::CompanyName => &self.company_name,
            PilotField::CompanyWebsite => &self.company_website,
            PilotField::CompanySize => &self.company_size,
            PilotField::Industry => &self.industry,
            PilotField::FirstName => &self.first_name,
            PilotField::LastName => &self.last_name,
            PilotField::Email => &self.email,
            PilotField::Phone => &self.phone,
            PilotField::JobTitle => &self.job_title,
            PilotField::LinkedinUrl => &self.linkedin_url,
            PilotField::CurrentTools => &self.current_tools,
            PilotField::MonthlyOutreachVolume => &self.monthly_outreach_volume,
            PilotField::PrimaryGoal => &self.primary_goal,
            PilotField::BiggestChallenge => &self.biggest_challenge,
            PilotField::Timeline => &self.timeline,
            PilotField::ReferralSource => &self.referral_source,
            PilotField::AgreeToTerms | PilotField::AgreeToFeedback => "",
        }
    }

    fn text_mut(&mut self, field: PilotField) -> Option<&mut String> {
        Some(match field {
            PilotField::CompanyName => &mut self.company_name,
            PilotField::CompanyWebsite => &mut self.company_website,
            PilotField::CompanySize => &mut self.company_size,
            PilotField::Industry => &mut self.industry,
            PilotField::FirstName => &mut self.first_name,
            PilotField::LastName => &mut self.last_name,
            PilotField::Email => &mut self.email,
            PilotField::Phone => &mut self.phone,
            PilotField::JobTitle => &mut self.job_title,
            PilotField::LinkedinUrl => &mut self.linkedin_url,
            PilotField::CurrentTools => &mut self.current_tools,
            PilotField::MonthlyOutreachVolume => &mut self.monthly_outreach_volume,
            PilotField::PrimaryGoal => &mut self.primary_goal,
            PilotField::BiggestChallenge => &mut self.biggest_challenge,
            PilotField::Timeline => &mut self.timeline,
            PilotField::ReferralSource => &mut self.referral_source,
            PilotField::AgreeToTerms | PilotField::AgreeToFeedback => return None,
        })
    }

    /// Check the draft before any network call: agreements first, then the
    /// required fields in form order.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::MissingAgreement`] or [`FormError::MissingField`].
    pub fn validate(&self) -> Result<(), FormError> {
        if !self.agree_to_terms || !self.agree_to_feedback {
            return Err(FormError::MissingAgreement);
        }
        if let Some(field) = PilotField::REQUIRED
            .into_iter()
            .find(|f| self.text(*f).trim().is_empty())
        {
            return Err(FormError::MissingField { field });
        }
        Ok(())
    }

    /// Build the record to insert: trimmed text, blanks as `None`, email
    /// lower-cased, status `pending`.
    #[must_use]
    pub fn to_record(&self) -> PilotApplication {
        let req = |s: &str| s.trim().to_owned();
        let opt = |s: &str| Some(s.trim().to_owned()).filter(|s| !s.is_empty());

        PilotApplication {
            company_name: req(&self.company_name),
            company_website: opt(&self.company_website),
            company_size: req(&self.company_size),
            industry: req(&self.industry),
            first_name: req(&self.first_name),
            last_name: req(&self.last_name),
            email: self.email.trim().to_lowercase(),
            phone: opt(&self.phone),
            job_title: req(&self.job_title),
            linkedin_url: opt(&self.linkedin_url),
            current_tools: opt(&self.current_tools),
            monthly_outreach_volume: req(&self.monthly_outreach_volume),
            primary_goal: req(&self.primary_goal),
            biggest_challenge: opt(&self.biggest_challenge),
            timeline: req(&self.timeline),
            referral_source: opt(&self.referral_source),
            agree_to_terms: self.agree_to_terms,
            agree_to_feedback: self.agree_to_feedback,
            status: PENDING_STATUS.to_owned(),
        }
    }
}

/// Where the form is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    /// The form is shown and editable.
    Editing,
    /// A write is in flight; the submit control is disabled.
    Submitting,
    /// The application was stored. Terminal: the confirmation view replaces
    /// the form for the rest of the page's life.
    Submitted,
}

/// Controller for one instance of the pilot application form.
#[derive(Debug, Clone)]
pub struct PilotApplicationForm {
    draft: PilotApplicationDraft,
    phase: FormPhase,
    error: Option<String>,
    contact: String,
}

impl PilotApplicationForm {
    /// A fresh, empty form. `contact` is the address named in failure
    /// messages.
    #[must_use]
    pub fn new(contact: impl Into<String>) -> Self {
        Self::with_draft(PilotApplicationDraft::default(), contact)
    }

    /// A form pre-filled with `draft`.
    #[must_use]
    pub fn with_draft(draft: PilotApplicationDraft, contact: impl Into<String>) -> Self {
        Self {
            draft,
            phase: FormPhase::Editing,
            error: None,
            contact: contact.into(),
        }
    }

    pub fn set_field(&mut self, field: PilotField, value: FieldValue) {
        self.draft.set_field(field, value);
    }

    #[must_use]
    pub const fn draft(&self) -> &PilotApplicationDraft {
        &self.draft
    }

    #[must_use]
    pub const fn phase(&self) -> FormPhase {
        self.phase
    }

    /// The inline error from the last failed submission, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub const fn is_submitted(&self) -> bool {
        matches!(self.phase, FormPhase::Submitted)
    }

    /// Claim the form for a submission. Fails if one is already in flight or
    /// the form is finished.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::AlreadySubmitting`] or [`FormError::AlreadySubmitted`].
    pub fn begin_submit(&mut self) -> Result<PilotApplication, FormError> {
        match self.phase {
            FormPhase::Submitting => return Err(FormError::AlreadySubmitting),
            FormPhase::Submitted => return Err(FormError::AlreadySubmitted),
            FormPhase::Editing => {}
        }
        if let Err(err) = self.draft.validate() {
            self.error = Some(err.user_message(&self.contact));
            return Err(err);
        }
        self.phase = FormPhase::Submitting;
        self.error = None;
        Ok(self.draft.to_record())
    }

    /// Record the outcome of the write started by [`begin_submit`](Self::begin_submit).
    ///
    /// # Errors
    ///
    /// Returns the mapped [`FormError`] when the write failed; the form is
    /// editable again.
    pub fn finish_submit(
        &mut self,
        result: Result<(), signalpath_store::StoreError>,
    ) -> Result<(), FormError> {
        match result {
            Ok(()) => {
                self.phase = FormPhase::Submitted;
                self.error = None;
                Ok(())
            }
            Err(store_err) => {
                let err = FormError::from(store_err);
                self.phase = FormPhase::Editing;
                self.error = Some(err.user_message(&self.contact));
                Err(err)
            }
        }
    }

    /// Validate, normalise, and write the application.
    ///
    /// Validation failures never reach the store. On any failure the form
    /// returns to `Editing` with an inline message so the visitor can
    /// resubmit; there is no automatic retry.
    ///
    /// # Errors
    ///
    /// Returns the [`FormError`] describing why nothing was stored.
    pub async fn submit(&mut self, store: &dyn LeadStore) -> Result<(), FormError> {
        let record = self.begin_submit()?;
        let result = store.insert_pilot_application(&record).await;
        match &result {
            Ok(()) => tracing::info!(company = %record.company_name, "pilot application received"),
            Err(e) if e.is_duplicate() => {
                tracing::info!("pilot application rejected: email already used");
            }
            Err(e) => tracing::warn!(error = %e, "pilot application write failed"),
        }
        self.finish_submit(result)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use signalpath_store::{ConsentEvent, EmailPreference, MemoryStore, StoreError};

    use super::*;

    const CONTACT: &str = "pilots@signalpath.io";

    /// Store that fails every pilot insert with a fixed error and counts calls.
    struct FailingStore {
        error: StoreError,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl LeadStore for FailingStore {
        async fn insert_pilot_application(&self, _: &PilotApplication) -> Result<(), StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(self.error.clone())
        }
        async fn find_preference_by_email(&self, _: &str) -> Result<Option<EmailPreference>, StoreError> {
            Ok(None)
        }
        async fn find_preference_by_token(&self, _: &str) -> Result<Option<EmailPreference>, StoreError> {
            Ok(None)
        }
        async fn insert_preference(&self, p: &EmailPreference) -> Result<EmailPreference, StoreError> {
            Ok(p.clone())
        }
        async fn upsert_preference(&self, p: &EmailPreference) -> Result<EmailPreference, StoreError> {
            Ok(p.clone())
        }
        async fn record_consent(&self, _: &ConsentEvent) -> Result<(), StoreError> {
            Ok(())
        }
    }

    fn filled_form(email: &str) -> PilotApplicationForm {
        let mut form = PilotApplicationForm::new(CONTACT);
        let values = [
            (PilotField::CompanyName, "Acme Robotics"),
            (PilotField::CompanySize, "51-200"),
            (PilotField::Industry, "Manufacturing"),
            (PilotField::FirstName, "Grace"),
            (PilotField::LastName, "Hopper"),
            (PilotField::Email, email),
            (PilotField::JobTitle, "CRO"),
            (PilotField::MonthlyOutreachVolume, "1000-5000"),
            (PilotField::PrimaryGoal, "book-meetings"),
            (PilotField::Timeline, "immediately"),
        ];
        for (field, value) in values {
            form.set_field(field, FieldValue::Text(value.to_owned()));
        }
        form.set_field(PilotField::AgreeToTerms, FieldValue::Checked(true));
        form.set_field(PilotField::AgreeToFeedback, FieldValue::Checked(true));
        form
    }

    #[test]
    fn field_names_round_trip_and_unknown_names_are_rejected() {
        for field in PilotField::REQUIRED {
            assert_eq!(field.name().parse::<PilotField>().unwrap(), field);
        }
        assert!("is_admin".parse::<PilotField>().is_err());
    }

    #[test]
    fn checkbox_form_values_mean_checked() {
        assert_eq!(
            FieldValue::from_form(PilotField::AgreeToTerms, "on"),
            FieldValue::Checked(true)
        );
        assert_eq!(
            FieldValue::from_form(PilotField::Phone, "555"),
            FieldValue::Text("555".to_owned())
        );
    }

    #[test]
    fn set_field_merges_one_field() {
        let mut draft = PilotApplicationDraft::default();
        draft.set_field(PilotField::Industry, FieldValue::Text("Fintech".to_owned()));
        draft.set_field(PilotField::AgreeToFeedback, FieldValue::Checked(true));
        assert_eq!(draft.industry, "Fintech");
        assert!(draft.agree_to_feedback);
        assert!(!draft.agree_to_terms);
        assert!(draft.company_name.is_empty());
    }

    #[tokio::test]
    async fn unchecked_agreement_fails_without_store_call() {
        for (terms, feedback) in [(false, true), (true, false), (false, false)] {
            let calls = Arc::new(AtomicUsize::new(0));
            let store = FailingStore {
                error: StoreError::Transient { reason: "unused".to_owned() },
                calls: Arc::clone(&calls),
            };
            let mut form = filled_form("a@acme.test");
            form.set_field(PilotField::AgreeToTerms, FieldValue::Checked(terms));
            form.set_field(PilotField::AgreeToFeedback, FieldValue::Checked(feedback));

            let err = form.submit(&store).await.unwrap_err();
            assert!(matches!(err, FormError::MissingAgreement));
            assert_eq!(calls.load(Ordering::SeqCst), 0);
            assert!(form.error_message().unwrap().starts_with("Please agree"));
            assert_eq!(form.phase(), FormPhase::Editing);
        }
    }

    #[tokio::test]
    async fn blank_required_field_fails_without_store_call() {
        let calls = Arc::new(AtomicUsize::new(0));
        let store = FailingStore {
            error: StoreError::Transient { reason: "unused".to_owned() },
            calls: Arc::clone(&calls),
        };
        let mut form = filled_form("a@acme.test");
        form.set_field(PilotField::JobTitle, FieldValue::Text("   ".to_owned()));

        let err = form.submit(&store).await.unwrap_err();
        assert!(matches!(err, FormError::MissingField { field: PilotField::JobTitle }));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn successful_submit_is_terminal_and_normalises_email() {
        let store = MemoryStore::new();
        let mut form = filled_form("  Grace@Acme.TEST ");
        form.submit(&store).await.unwrap();

        assert!(form.is_submitted());
        let rows = store.pilot_applications().await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].email, "grace@acme.test");
        assert_eq!(rows[0].status, "pending");
        assert_eq!(rows[0].phone, None);

        let err = form.submit(&store).await.unwrap_err();
        assert!(matches!(err, FormError::AlreadySubmitted));
        assert_eq!(store.pilot_applications().await.len(), 1);
    }

    #[tokio::test]
    async fn duplicate_email_yields_duplicate_message_and_stays_editable() {
        let store = MemoryStore::new();
        filled_form("dup@x.com").submit(&store).await.unwrap();

        let mut again = filled_form("DUP@x.com");
        let err = again.submit(&store).await.unwrap_err();
        assert!(matches!(err, FormError::DuplicateEmail(_)));
        assert!(
            again
                .error_message()
                .unwrap()
                .starts_with("This email has already been used for a pilot application.")
        );
        assert_eq!(again.phase(), FormPhase::Editing);
    }

    #[tokio::test]
    async fn other_failures_yield_generic_message_and_allow_resubmit() {
        let calls = Arc::new(AtomicUsize::new(0));
        let store = FailingStore {
            error: StoreError::Unknown { code: "PGRST204".to_owned(), message: "bad column".to_owned() },
            calls: Arc::clone(&calls),
        };
        let mut form = filled_form("a@acme.test");
        form.submit(&store).await.unwrap_err();
        let msg = form.error_message().unwrap().to_owned();
        assert!(msg.starts_with("There was an error submitting your application."));
        assert!(msg.contains(CONTACT));

        form.submit(&store).await.unwrap_err();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn second_claim_while_submitting_is_rejected() {
        let mut form = filled_form("a@acme.test");
        form.begin_submit().unwrap();
        assert_eq!(form.phase(), FormPhase::Submitting);
        assert!(matches!(form.begin_submit(), Err(FormError::AlreadySubmitting)));

        form.finish_submit(Ok(())).unwrap();
        assert!(form.is_submitted());
    }
}
