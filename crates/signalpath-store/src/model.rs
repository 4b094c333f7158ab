//! Record types for the two hosted tables and the consent procedure.
//!
//! Field names match the column names in the hosted schema, so the records
//! serialize straight into PostgREST request bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Table holding pilot program applications.
pub const PILOT_APPLICATIONS_TABLE: &str = "pilot_applications";
/// Table holding per-address email preferences.
pub const EMAIL_PREFERENCES_TABLE: &str = "email_preferences";
/// Stored procedure that appends to the consent ledger.
pub const RECORD_CONSENT_PROCEDURE: &str = "record_consent";

/// Status assigned to every new pilot application.
pub const PENDING_STATUS: &str = "pending";

// ── Pilot applications ───────────────────────────────────────────────

/// A submitted pilot program application.
///
/// Insert-only: the site never reads, mutates, or deletes these rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PilotApplication {
    pub company_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_website: Option<String>,
    pub company_size: String,
    pub industry: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub job_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_tools: Option<String>,
    pub monthly_outreach_volume: String,
    pub primary_goal: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub biggest_challenge: Option<String>,
    pub timeline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referral_source: Option<String>,
    pub agree_to_terms: bool,
    pub agree_to_feedback: bool,
    pub status: String,
}

// ── Email preferences ────────────────────────────────────────────────

/// How often a subscriber wants to hear from us.
///
/// Decoding is tolerant: rows written before the five options existed (for
/// example `"normal"`) read as [`Frequency::default`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Realtime,
    Daily,
    #[default]
    Weekly,
    Monthly,
    Never,
}

impl Frequency {
    /// Every option, in the order the preference center lists them.
    pub const ALL: [Self; 5] = [
        Self::Realtime,
        Self::Daily,
        Self::Weekly,
        Self::Monthly,
        Self::Never,
    ];

    /// The wire and form value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Realtime => "realtime",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Never => "never",
        }
    }

    /// Human label for the select box.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Realtime => "As it happens",
            Self::Daily => "Daily digest",
            Self::Weekly => "Weekly digest",
            Self::Monthly => "Monthly roundup",
            Self::Never => "Never",
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "realtime" => Ok(Self::Realtime),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "never" => Ok(Self::Never),
            other => Err(format!("unknown frequency: {other}")),
        }
    }
}

impl<'de> Deserialize<'de> for Frequency {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or_else(|e: String| {
            tracing::warn!(error = %e, "stored frequency not recognised, using default");
            Self::default()
        }))
    }
}

/// Stored email preferences for one address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailPreference {
    /// Lower-cased address; the upsert conflict key.
    pub email: String,
    /// Opaque token embedded in preference links.
    pub preference_token: String,
    pub marketing_emails: bool,
    pub product_updates: bool,
    pub newsletter: bool,
    pub event_invitations: bool,
    pub partner_offers: bool,
    pub frequency: Frequency,
    pub email_enabled: bool,
    pub sms_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl EmailPreference {
    /// Defaults for an address seen for the first time: every flag on and
    /// the canonical [`Frequency::default`].
    #[must_use]
    pub fn with_defaults(email: &str) -> Self {
        Self {
            email: email.trim().to_lowercase(),
            preference_token: uuid::Uuid::new_v4().simple().to_string(),
            marketing_emails: true,
            product_updates: true,
            newsletter: true,
            event_invitations: true,
            partner_offers: true,
            frequency: Frequency::default(),
            email_enabled: true,
            sms_enabled: true,
            updated_at: None,
        }
    }
}

// ── Consent ledger ───────────────────────────────────────────────────

/// Consent category recorded for marketing email.
pub const EMAIL_MARKETING_CONSENT: &str = "email_marketing";

/// One row for the consent ledger, written through `record_consent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentEvent {
    pub email: String,
    pub consent_type: String,
    pub consent_given: bool,
    pub method: String,
}

impl ConsentEvent {
    /// A marketing-email consent event captured through `method`.
    #[must_use]
    pub fn email_marketing(email: &str, consent_given: bool, method: &str) -> Self {
        Self {
            email: email.to_owned(),
            consent_type: EMAIL_MARKETING_CONSENT.to_owned(),
            consent_given,
            method: method.to_owned(),
        }
    }
}
