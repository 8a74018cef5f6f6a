use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::models::SlotCatalog;
use crate::services::booking_form::BookingForm;

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: String,
    pub is_new: bool,
}

struct SessionEntry {
    form: BookingForm,
    last_seen: DateTime<Utc>,
}

pub struct SessionStore {
    catalog: Arc<SlotCatalog>,
    idle_ttl: Duration,
    entries: HashMap<String, SessionEntry>,
}

impl SessionStore {
    pub fn new(catalog: Arc<SlotCatalog>, idle_ttl: Duration) -> Self {
        Self {
            catalog,
            idle_ttl,
            entries: HashMap::new(),
        }
    }

    // Missing, unknown and expired ids all get a fresh form under a new id.
    pub fn open(&mut self, id: Option<&str>, now: DateTime<Utc>) -> (Session, &mut BookingForm) {
        self.prune(now);

        let session = match id {
            Some(id) if self.entries.contains_key(id) => Session {
                id: id.to_string(),
                is_new: false,
            },
            _ => Session {
                id: Uuid::new_v4().to_string(),
                is_new: true,
            },
        };

        let catalog = &self.catalog;
        let entry = self
            .entries
            .entry(session.id.clone())
            .or_insert_with(|| SessionEntry {
                form: BookingForm::new(Arc::clone(catalog)),
                last_seen: now,
            });
        entry.last_seen = now;
        (session, &mut entry.form)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn prune(&mut self, now: DateTime<Utc>) {
        let ttl = self.idle_ttl;
        let before = self.entries.len();
        self.entries.retain(|_, entry| now - entry.last_seen < ttl);
        let expired = before - self.entries.len();
        if expired > 0 {
            tracing::debug!(expired, "dropped idle booking sessions");
        }
    }
}
