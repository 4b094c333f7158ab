//! Email preference center.
//!
//! A visitor arrives with either `?email=` or `?token=`. Email visits lazily
//! create a default row; token visits must match an existing row. Saving is
//! a full overwrite keyed by the lower-cased email, followed by one
//! best-effort consent write.

use std::sync::Arc;
use std::time::{Duration, Instant};

use signalpath_store::{ConsentEvent, EmailPreference, Frequency, LeadStore};

use crate::consent::{ConsentRecorder, PREFERENCE_CENTER_METHOD, UNSUBSCRIBE_METHOD};
use crate::error::PreferenceError;

/// How long the "saved" banner stays up.
pub const FLASH_DISMISS_AFTER: Duration = Duration::from_secs(5);

/// How a visitor identified themselves on the preference link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferenceIdentity {
    /// Lower-cased email address.
    Email(String),
    /// Opaque preference token.
    Token(String),
}

impl PreferenceIdentity {
    /// Pick the identity from the query parameters. Email wins when both are
    /// present; blank values count as absent.
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceError::MissingIdentity`] when neither is usable.
    pub fn from_query(email: Option<&str>, token: Option<&str>) -> Result<Self, PreferenceError> {
        fn present(v: Option<&str>) -> Option<&str> {
            v.map(str::trim).filter(|v| !v.is_empty())
        }

        if let Some(email) = present(email) {
            return Ok(Self::Email(email.to_lowercase()));
        }
        if let Some(token) = present(token) {
            return Ok(Self::Token(token.to_owned()));
        }
        Err(PreferenceError::MissingIdentity)
    }
}

/// A single control on the preference panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceField {
    MarketingEmails,
    ProductUpdates,
    Newsletter,
    EventInvitations,
    PartnerOffers,
    EmailEnabled,
    SmsEnabled,
}

impl PreferenceField {
    /// The category toggles, in panel order.
    pub const CATEGORIES: [Self; 5] = [
        Self::MarketingEmails,
        Self::ProductUpdates,
        Self::Newsletter,
        Self::EventInvitations,
        Self::PartnerOffers,
    ];

    /// The channel toggles, in panel order.
    pub const CHANNELS: [Self; 2] = [Self::EmailEnabled, Self::SmsEnabled];

    /// Look a control up by its HTML `name`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::CATEGORIES
            .into_iter()
            .chain(Self::CHANNELS)
            .find(|field| field.name() == name)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MarketingEmails => "marketing_emails",
            Self::ProductUpdates => "product_updates",
            Self::Newsletter => "newsletter",
            Self::EventInvitations => "event_invitations",
            Self::PartnerOffers => "partner_offers",
            Self::EmailEnabled => "email_enabled",
            Self::SmsEnabled => "sms_enabled",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::MarketingEmails => "Marketing emails",
            Self::ProductUpdates => "Product updates",
            Self::Newsletter => "Newsletter",
            Self::EventInvitations => "Event invitations",
            Self::PartnerOffers => "Partner offers",
            Self::EmailEnabled => "Email",
            Self::SmsEnabled => "SMS",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::MarketingEmails => "Campaigns, launches, and promotions.",
            Self::ProductUpdates => "New features and release notes.",
            Self::Newsletter => "Our regular roundup of outbound playbooks.",
            Self::EventInvitations => "Webinars, meetups, and live demos.",
            Self::PartnerOffers => "Offers from companies we work with.",
            Self::EmailEnabled => "Receive messages by email.",
            Self::SmsEnabled => "Receive messages by text.",
        }
    }
}

/// The editable part of a preference row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceDraft {
    pub marketing_emails: bool,
    pub product_updates: bool,
    pub newsletter: bool,
    pub event_invitations: bool,
    pub partner_offers: bool,
    pub email_enabled: bool,
    pub sms_enabled: bool,
    pub frequency: Frequency,
}

impl PreferenceDraft {
    /// Every toggle off. Start from this when decoding an HTML form, since
    /// browsers omit unchecked boxes.
    #[must_use]
    pub const fn all_off(frequency: Frequency) -> Self {
        Self {
            marketing_emails: false,
            product_updates: false,
            newsletter: false,
            event_invitations: false,
            partner_offers: false,
            email_enabled: false,
            sms_enabled: false,
            frequency,
        }
    }

    pub fn set_field(&mut self, field: PreferenceField, on: bool) {
        *self.flag_mut(field) = on;
    }

    pub fn set_frequency(&mut self, frequency: Frequency) {
        self.frequency = frequency;
    }

    #[must_use]
    pub const fn get(&self, field: PreferenceField) -> bool {
        match field {
            PreferenceField::MarketingEmails => self.marketing_emails,
            PreferenceField::ProductUpdates => self.product_updates,
            PreferenceField::Newsletter => self.newsletter,
            PreferenceField::EventInvitations => self.event_invitations,
            PreferenceField::PartnerOffers => self.partner_offers,
            PreferenceField::EmailEnabled => self.email_enabled,
            PreferenceField::SmsEnabled => self.sms_enabled,
        }
    }

    fn flag_mut(&mut self, field: PreferenceField) -> &mut bool {
        match field {
            PreferenceField::MarketingEmails => &mut self.marketing_emails,
            PreferenceField::ProductUpdates => &mut self.product_updates,
            PreferenceField::Newsletter => &mut self.newsletter,
            PreferenceField::EventInvitations => &mut self.event_invitations,
            PreferenceField::PartnerOffers => &mut self.partner_offers,
            PreferenceField::EmailEnabled => &mut self.email_enabled,
            PreferenceField::SmsEnabled => &mut self.sms_enabled,
        }
    }

    /// Copy every editable value onto `row`; identity fields are untouched.
    pub fn apply_to(&self, row: &mut EmailPreference) {
        row.marketing_emails = self.marketing_emails;
        row.product_updates = self.product_updates;
        row.newsletter = self.newsletter;
        row.event_invitations = self.event_invitations;
        row.partner_offers = self.partner_offers;
        row.email_enabled = self.email_enabled;
        row.sms_enabled = self.sms_enabled;
        row.frequency = self.frequency;
    }
}

impl From<&EmailPreference> for PreferenceDraft {
    fn from(row: &EmailPreference) -> Self {
        Self {
            marketing_emails: row.marketing_emails,
            product_updates: row.product_updates,
            newsletter: row.newsletter,
            event_invitations: row.event_invitations,
            partner_offers: row.partner_offers,
            email_enabled: row.email_enabled,
            sms_enabled: row.sms_enabled,
            frequency: row.frequency,
        }
    }
}

/// Transient "Preferences saved" notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuccessBanner {
    shown_at: Instant,
}

impl SuccessBanner {
    #[must_use]
    pub fn now() -> Self {
        Self::shown_at(Instant::now())
    }

    #[must_use]
    pub const fn shown_at(shown_at: Instant) -> Self {
        Self { shown_at }
    }

    pub const MESSAGE: &'static str = "Your preferences have been saved.";

    #[must_use]
    pub fn is_visible_at(&self, at: Instant) -> bool {
        at.saturating_duration_since(self.shown_at) < FLASH_DISMISS_AFTER
    }
}

/// Result of a successful save.
#[derive(Debug, Clone)]
pub struct SavedPreferences {
    pub preference: EmailPreference,
    pub banner: SuccessBanner,
}

/// Loads and saves preference rows.
#[derive(Clone)]
pub struct PreferenceCenter {
    store: Arc<dyn LeadStore>,
    consent: ConsentRecorder,
}

impl std::fmt::Debug for PreferenceCenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferenceCenter")
            .field("consent", &self.consent)
            .finish_non_exhaustive()
    }
}

impl PreferenceCenter {
    #[must_use]
    pub const fn new(store: Arc<dyn LeadStore>, consent: ConsentRecorder) -> Self {
        Self { store, consent }
    }

    #[must_use]
    pub const fn consent(&self) -> &ConsentRecorder {
        &self.consent
    }

    /// Fetch the row for `identity`, creating defaults for a new email.
    ///
    /// # Errors
    ///
    /// - [`PreferenceError::InvalidLink`] if a token matches nothing
    /// - [`PreferenceError::Load`] if the store fails
    pub async fn load(&self, identity: &PreferenceIdentity) -> Result<EmailPreference, PreferenceError> {
        match identity {
            PreferenceIdentity::Email(email) => {
                let existing = self
                    .store
                    .find_preference_by_email(email)
                    .await
                    .map_err(PreferenceError::Load)?;
                if let Some(row) = existing {
                    return Ok(row);
                }
                tracing::info!("creating default email preferences");
                match self
                    .store
                    .insert_preference(&EmailPreference::with_defaults(email))
                    .await
                {
                    Ok(row) => Ok(row),
                    // Another first visit for this address created the row.
                    Err(e) if e.is_duplicate() => {
                        tracing::debug!("default preferences already created, reloading");
                        self.store
                            .find_preference_by_email(email)
                            .await
                            .map_err(PreferenceError::Load)?
                            .ok_or(PreferenceError::Load(e))
                    }
                    Err(e) => Err(PreferenceError::Load(e)),
                }
            }
            PreferenceIdentity::Token(token) => self
                .store
                .find_preference_by_token(token)
                .await
                .map_err(PreferenceError::Load)?
                .ok_or(PreferenceError::InvalidLink),
        }
    }

    /// Overwrite the row for `email` with `draft` and record the marketing
    /// consent it implies.
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceError::Save`] if the upsert fails. The consent
    /// write never fails the save.
    pub async fn save(
        &self,
        email: &str,
        draft: &PreferenceDraft,
    ) -> Result<SavedPreferences, PreferenceError> {
        let stored = self.write(email, draft).await?;
        self.consent.record(ConsentEvent::email_marketing(
            &stored.email,
            stored.marketing_emails,
            PREFERENCE_CENTER_METHOD,
        ));
        Ok(SavedPreferences {
            preference: stored,
            banner: SuccessBanner::now(),
        })
    }

    /// Turn every category off and set frequency to `never`.
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceError::Save`] if the upsert fails.
    pub async fn unsubscribe(&self, email: &str) -> Result<EmailPreference, PreferenceError> {
        let draft = PreferenceDraft::all_off(Frequency::Never);
        let stored = self.write(email, &draft).await?;
        self.consent.record(ConsentEvent::email_marketing(
            &stored.email,
            false,
            UNSUBSCRIBE_METHOD,
        ));
        tracing::info!("email address unsubscribed");
        Ok(stored)
    }

    async fn write(
        &self,
        email: &str,
        draft: &PreferenceDraft,
    ) -> Result<EmailPreference, PreferenceError> {
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Err(PreferenceError::MissingIdentity);
        }

        // Keep the token already issued for this address.
        let mut row = match self.store.find_preference_by_email(&email).await {
            Ok(Some(row)) => row,
            Ok(None) => EmailPreference::with_defaults(&email),
            Err(e) => return Err(PreferenceError::Save(e)),
        };
        draft.apply_to(&mut row);

        self.store.upsert_preference(&row).await.map_err(|e| {
            tracing::warn!(error = %e, "preference upsert failed");
            PreferenceError::Save(e)
        })
    }
}
