//! In-memory store for development and tests.
//!
//! Every table lives in a `BTreeMap` behind a `RwLock`. Nothing is persisted;
//! all data is lost when the process exits. Constraint behaviour mirrors the
//! hosted schema: pilot applications are unique by email and preferences are
//! keyed by email.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::model::{EMAIL_PREFERENCES_TABLE, PILOT_APPLICATIONS_TABLE};
use crate::{ConsentEvent, EmailPreference, LeadStore, PilotApplication, StoreError};

#[derive(Debug, Default)]
struct Tables {
    pilot_applications: BTreeMap<String, PilotApplication>,
    preferences: BTreeMap<String, EmailPreference>,
    consent_events: Vec<ConsentEvent>,
}

/// An in-memory [`LeadStore`].
///
/// Clones share the same tables, so a test can hand one clone to the code
/// under test and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All pilot applications, ordered by email.
    pub async fn pilot_applications(&self) -> Vec<PilotApplication> {
        self.tables
            .read()
            .await
            .pilot_applications
            .values()
            .cloned()
            .collect()
    }

    /// All preference rows, ordered by email.
    pub async fn preferences(&self) -> Vec<EmailPreference> {
        self.tables.read().await.preferences.values().cloned().collect()
    }

    /// Consent events in the order they were recorded.
    pub async fn consent_events(&self) -> Vec<ConsentEvent> {
        self.tables.read().await.consent_events.clone()
    }
}

#[async_trait::async_trait]
impl LeadStore for MemoryStore {
    async fn insert_pilot_application(
        &self,
        application: &PilotApplication,
    ) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if tables.pilot_applications.contains_key(&application.email) {
            return Err(StoreError::DuplicateKey {
                table: PILOT_APPLICATIONS_TABLE.to_owned(),
                message: format!("email '{}' already applied", application.email),
            });
        }
        tables
            .pilot_applications
            .insert(application.email.clone(), application.clone());
        Ok(())
    }

    async fn find_preference_by_email(
        &self,
        email: &str,
    ) -> Result<Option<EmailPreference>, StoreError> {
        Ok(self.tables.read().await.preferences.get(email).cloned())
    }

    async fn find_preference_by_token(
        &self,
        token: &str,
    ) -> Result<Option<EmailPreference>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .preferences
            .values()
            .find(|p| p.preference_token == token)
            .cloned())
    }

    async fn insert_preference(
        &self,
        preference: &EmailPreference,
    ) -> Result<EmailPreference, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.preferences.contains_key(&preference.email) {
            return Err(StoreError::DuplicateKey {
                table: EMAIL_PREFERENCES_TABLE.to_owned(),
                message: format!("preferences for '{}' already exist", preference.email),
            });
        }
        let mut stored = preference.clone();
        stored.updated_at = Some(Utc::now());
        tables
            .preferences
            .insert(stored.email.clone(), stored.clone());
        Ok(stored)
    }

    async fn upsert_preference(
        &self,
        preference: &EmailPreference,
    ) -> Result<EmailPreference, StoreError> {
        let mut stored = preference.clone();
        stored.updated_at = Some(Utc::now());
        self.tables
            .write()
            .await
            .preferences
            .insert(stored.email.clone(), stored.clone());
        Ok(stored)
    }

    async fn record_consent(&self, event: &ConsentEvent) -> Result<(), StoreError> {
        self.tables.write().await.consent_events.push(event.clone());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::PENDING_STATUS;

    fn application(email: &str) -> PilotApplication {
        PilotApplication {
            company_name: "Acme".to_owned(),
            company_website: None,
            company_size: "11-50".to_owned(),
            industry: "SaaS".to_owned(),
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            email: email.to_owned(),
            phone: None,
            job_title: "Head of Sales".to_owned(),
            linkedin_url: None,
            current_tools: None,
            monthly_outreach_volume: "1000-5000".to_owned(),
            primary_goal: "book-meetings".to_owned(),
            biggest_challenge: None,
            timeline: "immediately".to_owned(),
            referral_source: None,
            agree_to_terms: true,
            agree_to_feedback: true,
            status: PENDING_STATUS.to_owned(),
        }
    }

    #[tokio::test]
    async fn second_application_with_same_email_is_duplicate() {
        let store = MemoryStore::new();
        store
            .insert_pilot_application(&application("dup@x.com"))
            .await
            .unwrap();
        let err = store
            .insert_pilot_application(&application("dup@x.com"))
            .await
            .unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(store.pilot_applications().await.len(), 1);
    }

    #[tokio::test]
    async fn find_by_email_missing_returns_none() {
        let store = MemoryStore::new();
        let found = store.find_preference_by_email("nobody@x.com").await.unwrap();
        assert_eq!(found, None);
    }

    #[tokio::test]
    async fn insert_then_find_by_token() {
        let store = MemoryStore::new();
        let pref = EmailPreference::with_defaults("user@x.com");
        let stored = store.insert_preference(&pref).await.unwrap();
        assert!(stored.updated_at.is_some());

        let found = store
            .find_preference_by_token(&pref.preference_token)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.email, "user@x.com");
        assert!(store.find_preference_by_token("abc123").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn insert_preference_twice_is_duplicate() {
        let store = MemoryStore::new();
        let pref = EmailPreference::with_defaults("user@x.com");
        store.insert_preference(&pref).await.unwrap();
        let err = store.insert_preference(&pref).await.unwrap_err();
        assert!(err.is_duplicate());
    }

    #[tokio::test]
    async fn upsert_overwrites_single_row() {
        let store = MemoryStore::new();
        let mut pref = EmailPreference::with_defaults("user@x.com");
        store.upsert_preference(&pref).await.unwrap();
        pref.newsletter = false;
        store.upsert_preference(&pref).await.unwrap();

        let rows = store.preferences().await;
        assert_eq!(rows.len(), 1);
        assert!(!rows[0].newsletter);
    }

    #[tokio::test]
    async fn clone_shares_tables() {
        let store = MemoryStore::new();
        let clone = store.clone();
        store
            .record_consent(&ConsentEvent::email_marketing("a@x.com", true, "preference_center"))
            .await
            .unwrap();
        assert_eq!(clone.consent_events().await.len(), 1);
    }
}
