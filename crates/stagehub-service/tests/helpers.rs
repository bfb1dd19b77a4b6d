//! Shared in-memory fakes for service tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use stagehub_core::AppResult;
use stagehub_core::error::AppError;
use stagehub_core::types::{Language, Version};
use stagehub_entity::agency::{Agency, AgencySnapshot};
use stagehub_entity::content::PublishedContent;
use stagehub_entity::history::NewHistoryRecord;
use stagehub_entity::principal::{Principal, PrincipalRole};
use stagehub_entity::store::{ContentStore, PrincipalStore};

/// A fixed instant used as "now" in tests.
pub fn test_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap()
}

/// In-memory agency store mirroring the transactional semantics of the
/// database-backed store: `persist_rollback` re-checks each entity's
/// stored version before applying anything, and applies all or nothing.
#[derive(Default)]
pub struct MemoryAgencyStore {
    pub agencies: Mutex<HashMap<Uuid, Agency>>,
    pub snapshots: Mutex<Vec<AgencySnapshot>>,
    pub history: Mutex<Vec<NewHistoryRecord>>,
}

impl MemoryAgencyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_agency(&self, agency: Agency) {
        self.agencies.lock().unwrap().insert(agency.id, agency);
    }

    pub fn insert_snapshot(&self, snapshot: AgencySnapshot) {
        self.snapshots.lock().unwrap().push(snapshot);
    }

    pub fn agency(&self, id: Uuid) -> Agency {
        self.agencies.lock().unwrap().get(&id).cloned().unwrap()
    }

    pub fn snapshot_count(&self) -> usize {
        self.snapshots.lock().unwrap().len()
    }

    pub fn history_records(&self) -> Vec<NewHistoryRecord> {
        self.history.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentStore for MemoryAgencyStore {
    type Entity = Agency;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Agency>> {
        Ok(self.agencies.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_translation_set(&self, set_id: Uuid) -> AppResult<Vec<Agency>> {
        let mut variants: Vec<Agency> = self
            .agencies
            .lock()
            .unwrap()
            .values()
            .filter(|a| a.translation_set_id == set_id)
            .cloned()
            .collect();
        variants.sort_by_key(|a| a.language.to_string());
        Ok(variants)
    }

    async fn find_snapshot(
        &self,
        entity_id: Uuid,
        version: Version,
    ) -> AppResult<Option<AgencySnapshot>> {
        Ok(self
            .snapshots
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.agency_id == entity_id && s.version == version)
            .cloned())
    }

    async fn find_snapshots_at(
        &self,
        set_id: Uuid,
        version: Version,
    ) -> AppResult<Vec<AgencySnapshot>> {
        Ok(self
            .snapshots
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.translation_set_id == set_id && s.version == version)
            .cloned()
            .collect())
    }

    async fn find_snapshots_for_entity(&self, entity_id: Uuid) -> AppResult<Vec<AgencySnapshot>> {
        let mut found: Vec<AgencySnapshot> = self
            .snapshots
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.agency_id == entity_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.version.cmp(&a.version));
        Ok(found)
    }

    async fn persist_rollback(
        &self,
        entities: &[Agency],
        snapshots: &[AgencySnapshot],
        records: &[NewHistoryRecord],
    ) -> AppResult<()> {
        let mut agencies = self.agencies.lock().unwrap();

        for entity in entities {
            let stored = agencies
                .get(&entity.id)
                .ok_or_else(|| AppError::not_found("Agency disappeared"))?;
            if stored.version.next() != entity.version {
                return Err(AppError::conflict("Agency was modified concurrently"));
            }
        }

        for entity in entities {
            agencies.insert(entity.id, entity.clone());
        }
        self.snapshots.lock().unwrap().extend_from_slice(snapshots);
        self.history.lock().unwrap().extend_from_slice(records);
        Ok(())
    }
}

/// Store that simulates a concurrent writer racing the rollback: the
/// snapshot load, which happens after the service's validation reads,
/// bumps the stored version of every variant in the set, as if another
/// rollback committed in between.
pub struct RacingAgencyStore {
    pub inner: Arc<MemoryAgencyStore>,
}

#[async_trait]
impl ContentStore for RacingAgencyStore {
    type Entity = Agency;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Agency>> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_translation_set(&self, set_id: Uuid) -> AppResult<Vec<Agency>> {
        self.inner.find_by_translation_set(set_id).await
    }

    async fn find_snapshot(
        &self,
        entity_id: Uuid,
        version: Version,
    ) -> AppResult<Option<AgencySnapshot>> {
        self.inner.find_snapshot(entity_id, version).await
    }

    async fn find_snapshots_at(
        &self,
        set_id: Uuid,
        version: Version,
    ) -> AppResult<Vec<AgencySnapshot>> {
        {
            let mut agencies = self.inner.agencies.lock().unwrap();
            for agency in agencies
                .values_mut()
                .filter(|a| a.translation_set_id == set_id)
            {
                agency.version = agency.version.next();
            }
        }
        self.inner.find_snapshots_at(set_id, version).await
    }

    async fn find_snapshots_for_entity(&self, entity_id: Uuid) -> AppResult<Vec<AgencySnapshot>> {
        self.inner.find_snapshots_for_entity(entity_id).await
    }

    async fn persist_rollback(
        &self,
        entities: &[Agency],
        snapshots: &[AgencySnapshot],
        records: &[NewHistoryRecord],
    ) -> AppResult<()> {
        self.inner.persist_rollback(entities, snapshots, records).await
    }
}

/// In-memory principal lookup.
#[derive(Default)]
pub struct MemoryPrincipalStore {
    principals: Mutex<HashMap<Uuid, Principal>>,
}

impl MemoryPrincipalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, principal: Principal) {
        self.principals
            .lock()
            .unwrap()
            .insert(principal.id, principal);
    }
}

#[async_trait]
impl PrincipalStore for MemoryPrincipalStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Principal>> {
        Ok(self.principals.lock().unwrap().get(&id).cloned())
    }
}

/// Build an agency variant at a given version.
pub fn agency(set_id: Uuid, language: Language, name: &str, version: i32) -> Agency {
    Agency {
        id: Uuid::new_v4(),
        translation_set_id: set_id,
        language,
        name: name.to_string(),
        description: format!("{name} description"),
        founded_on: None,
        website_url: Some("https://example.com".to_string()),
        version: Version::new(version).unwrap(),
        created_at: test_time(),
        updated_at: test_time(),
    }
}

/// Capture a snapshot of `agency` as if it had held `name` at `version`.
pub fn snapshot_of(agency: &Agency, name: &str, version: i32) -> AgencySnapshot {
    let mut past = agency.clone();
    past.name = name.to_string();
    past.description = format!("{name} description");
    past.version = Version::new(version).unwrap();
    past.capture_snapshot(test_time())
}

/// Build a principal with the given role and agency scope.
pub fn principal(role: PrincipalRole, agency_id: Option<Uuid>) -> Principal {
    Principal {
        id: Uuid::new_v4(),
        name: "Test Principal".to_string(),
        role,
        agency_id,
        group_ids: Vec::new(),
        talent_ids: Vec::new(),
        created_at: test_time(),
    }
}
