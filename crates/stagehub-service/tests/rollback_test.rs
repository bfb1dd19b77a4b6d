//! Tests for the rollback service over in-memory stores.

mod helpers;

use std::sync::Arc;

use uuid::Uuid;

use stagehub_auth::policy::ScopedPolicy;
use stagehub_core::clock::FixedClock;
use stagehub_core::error::ErrorKind;
use stagehub_core::types::{Language, Version};
use stagehub_entity::history::HistoryAction;
use stagehub_entity::store::ContentStore;
use stagehub_entity::principal::PrincipalRole;
use stagehub_service::{RequestContext, RollbackService};

use helpers::{
    MemoryAgencyStore, MemoryPrincipalStore, RacingAgencyStore, agency, principal, snapshot_of,
    test_time,
};

fn make_service(
    store: Arc<MemoryAgencyStore>,
    principals: Arc<MemoryPrincipalStore>,
) -> RollbackService<MemoryAgencyStore> {
    RollbackService::new(
        store,
        principals,
        Arc::new(ScopedPolicy::new()),
        Arc::new(FixedClock(test_time())),
    )
}

fn v(n: i32) -> Version {
    Version::new(n).unwrap()
}

#[tokio::test]
async fn test_rollback_restores_earlier_snapshot() {
    let store = Arc::new(MemoryAgencyStore::new());
    let principals = Arc::new(MemoryPrincipalStore::new());

    let set_id = Uuid::new_v4();
    let current = agency(set_id, Language::Ja, "New Name", 5);
    for (name, version) in [("Old Name", 1), ("Old Name", 2), ("Mid Name", 3), ("Mid Name", 4)] {
        store.insert_snapshot(snapshot_of(&current, name, version));
    }
    let entity_id = current.id;
    store.insert_agency(current);

    let admin = principal(PrincipalRole::Admin, None);
    let ctx = RequestContext::new(admin.id);
    principals.insert(admin.clone());

    let service = make_service(Arc::clone(&store), principals);
    let restored = service.rollback(&ctx, entity_id, v(2)).await.unwrap();

    assert_eq!(restored.len(), 1);
    assert_eq!(restored[0].name, "Old Name");
    assert_eq!(restored[0].version, v(6));

    let stored = store.agency(entity_id);
    assert_eq!(stored.name, "Old Name");
    assert_eq!(stored.version, v(6));
    assert_eq!(stored.updated_at, test_time());

    // The restored state is snapshotted under the new version.
    assert_eq!(store.snapshot_count(), 5);
    let new_snapshot = store
        .find_snapshot(entity_id, v(6))
        .await
        .unwrap()
        .expect("snapshot of restored state");
    assert_eq!(new_snapshot.name, "Old Name");

    let records = store.history_records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].action, HistoryAction::Rollback);
    assert_eq!(records[0].editor_id, admin.id);
    assert_eq!(records[0].published_id, Some(entity_id));
    assert_eq!(records[0].from_version, Some(v(5)));
    assert_eq!(records[0].to_version, Some(v(6)));
    assert_eq!(records[0].subject, "Old Name");
}

#[tokio::test]
async fn test_rollback_is_lock_step_across_languages() {
    let store = Arc::new(MemoryAgencyStore::new());
    let principals = Arc::new(MemoryPrincipalStore::new());

    let set_id = Uuid::new_v4();
    let ja = agency(set_id, Language::Ja, "新名称", 3);
    let ko = agency(set_id, Language::Ko, "새 이름", 3);
    let en = agency(set_id, Language::En, "New Name", 3);
    store.insert_snapshot(snapshot_of(&ja, "旧名称", 1));
    store.insert_snapshot(snapshot_of(&ko, "옛 이름", 1));
    store.insert_snapshot(snapshot_of(&en, "Old Name", 1));
    let ja_id = ja.id;
    let ko_id = ko.id;
    let en_id = en.id;
    store.insert_agency(ja);
    store.insert_agency(ko);
    store.insert_agency(en);

    let admin = principal(PrincipalRole::Admin, None);
    let ctx = RequestContext::new(admin.id);
    principals.insert(admin);

    let service = make_service(Arc::clone(&store), principals);
    let restored = service.rollback(&ctx, ja_id, v(1)).await.unwrap();

    // Every sibling moved, not just the requested one.
    assert_eq!(restored.len(), 3);
    for id in [ja_id, ko_id, en_id] {
        assert_eq!(store.agency(id).version, v(4));
    }
    assert_eq!(store.agency(ja_id).name, "旧名称");
    assert_eq!(store.agency(ko_id).name, "옛 이름");
    assert_eq!(store.agency(en_id).name, "Old Name");

    // One history record and one fresh snapshot per variant.
    assert_eq!(store.history_records().len(), 3);
    assert_eq!(store.snapshot_count(), 6);
}

#[tokio::test]
async fn test_rollback_target_must_be_earlier_than_current() {
    let store = Arc::new(MemoryAgencyStore::new());
    let principals = Arc::new(MemoryPrincipalStore::new());

    let set_id = Uuid::new_v4();
    let entity = agency(set_id, Language::Ja, "Name", 3);
    store.insert_snapshot(snapshot_of(&entity, "Name", 1));
    let entity_id = entity.id;
    store.insert_agency(entity);

    let admin = principal(PrincipalRole::Admin, None);
    let ctx = RequestContext::new(admin.id);
    principals.insert(admin);

    let service = make_service(Arc::clone(&store), principals);

    for target in [3, 4] {
        let err = service.rollback(&ctx, entity_id, v(target)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    // Nothing was written.
    assert_eq!(store.agency(entity_id).version, v(3));
    assert_eq!(store.snapshot_count(), 1);
    assert!(store.history_records().is_empty());
}

#[tokio::test]
async fn test_rollback_rejects_diverged_translation_set() {
    let store = Arc::new(MemoryAgencyStore::new());
    let principals = Arc::new(MemoryPrincipalStore::new());

    let set_id = Uuid::new_v4();
    let ja = agency(set_id, Language::Ja, "JA", 2);
    let en = agency(set_id, Language::En, "EN", 2);
    let ko = agency(set_id, Language::Ko, "KO", 3);
    store.insert_snapshot(snapshot_of(&ja, "ja-old", 1));
    store.insert_snapshot(snapshot_of(&en, "en-old", 1));
    store.insert_snapshot(snapshot_of(&ko, "ko-old", 1));
    let ja_id = ja.id;
    store.insert_agency(ja);
    store.insert_agency(en);
    store.insert_agency(ko);

    let admin = principal(PrincipalRole::Admin, None);
    let ctx = RequestContext::new(admin.id);
    principals.insert(admin);

    let service = make_service(Arc::clone(&store), principals);
    let err = service.rollback(&ctx, ja_id, v(1)).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Conflict);
    assert_eq!(store.agency(ja_id).version, v(2));
    assert!(store.history_records().is_empty());
}

#[tokio::test]
async fn test_rollback_requires_snapshot_for_every_variant() {
    let store = Arc::new(MemoryAgencyStore::new());
    let principals = Arc::new(MemoryPrincipalStore::new());

    let set_id = Uuid::new_v4();
    let ja = agency(set_id, Language::Ja, "JA", 3);
    let en = agency(set_id, Language::En, "EN", 3);
    // Only the JA variant has a snapshot at the target version.
    store.insert_snapshot(snapshot_of(&ja, "ja-old", 1));
    let ja_id = ja.id;
    let en_id = en.id;
    store.insert_agency(ja);
    store.insert_agency(en);

    let admin = principal(PrincipalRole::Admin, None);
    let ctx = RequestContext::new(admin.id);
    principals.insert(admin);

    let service = make_service(Arc::clone(&store), principals);
    let err = service.rollback(&ctx, ja_id, v(1)).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(store.agency(ja_id).version, v(3));
    assert_eq!(store.agency(en_id).version, v(3));
    assert_eq!(store.snapshot_count(), 1);
    assert!(store.history_records().is_empty());
}

#[tokio::test]
async fn test_rollback_authorization() {
    let store = Arc::new(MemoryAgencyStore::new());
    let principals = Arc::new(MemoryPrincipalStore::new());

    let set_id = Uuid::new_v4();
    let entity = agency(set_id, Language::Ja, "Name", 2);
    store.insert_snapshot(snapshot_of(&entity, "Old", 1));
    let entity_id = entity.id;
    store.insert_agency(entity);

    let viewer = principal(PrincipalRole::Viewer, None);
    let outsider = principal(PrincipalRole::AgencyStaff, Some(Uuid::new_v4()));
    let staff = principal(PrincipalRole::AgencyStaff, Some(set_id));
    principals.insert(viewer.clone());
    principals.insert(outsider.clone());
    principals.insert(staff.clone());

    let service = make_service(Arc::clone(&store), principals);

    for denied in [&viewer, &outsider] {
        let ctx = RequestContext::new(denied.id);
        let err = service.rollback(&ctx, entity_id, v(1)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }
    assert!(store.history_records().is_empty());

    // Staff scoped to the owning agency succeeds.
    let ctx = RequestContext::new(staff.id);
    let restored = service.rollback(&ctx, entity_id, v(1)).await.unwrap();
    assert_eq!(restored[0].name, "Old");
    assert_eq!(restored[0].version, v(3));
}

#[tokio::test]
async fn test_rollback_unknown_entity_and_principal() {
    let store = Arc::new(MemoryAgencyStore::new());
    let principals = Arc::new(MemoryPrincipalStore::new());

    let set_id = Uuid::new_v4();
    let entity = agency(set_id, Language::Ja, "Name", 2);
    let entity_id = entity.id;
    store.insert_agency(entity);

    let admin = principal(PrincipalRole::Admin, None);
    principals.insert(admin.clone());

    let service = make_service(store, principals);

    let ctx = RequestContext::new(admin.id);
    let err = service.rollback(&ctx, Uuid::new_v4(), v(1)).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);

    let ghost_ctx = RequestContext::new(Uuid::new_v4());
    let err = service.rollback(&ghost_ctx, entity_id, v(1)).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_rollback_conflicts_with_concurrent_writer() {
    let inner = Arc::new(MemoryAgencyStore::new());
    let principals = Arc::new(MemoryPrincipalStore::new());

    let set_id = Uuid::new_v4();
    let entity = agency(set_id, Language::Ja, "Name", 3);
    inner.insert_snapshot(snapshot_of(&entity, "Old", 1));
    let entity_id = entity.id;
    inner.insert_agency(entity);

    let admin = principal(PrincipalRole::Admin, None);
    let ctx = RequestContext::new(admin.id);
    principals.insert(admin);

    // The racing store advances the stored version after the service's
    // validation reads, so the expected-version guard must reject the
    // write instead of double-applying.
    let service = RollbackService::new(
        Arc::new(RacingAgencyStore {
            inner: Arc::clone(&inner),
        }),
        principals,
        Arc::new(ScopedPolicy::new()),
        Arc::new(FixedClock(test_time())),
    );

    let err = service.rollback(&ctx, entity_id, v(1)).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);

    // Only the concurrent bump is visible; nothing from the losing
    // rollback landed.
    assert_eq!(inner.agency(entity_id).version, v(4));
    assert_eq!(inner.agency(entity_id).name, "Name");
    assert_eq!(inner.snapshot_count(), 1);
    assert!(inner.history_records().is_empty());
}

#[tokio::test]
async fn test_rollback_of_a_rollback_restores_same_content() {
    let store = Arc::new(MemoryAgencyStore::new());
    let principals = Arc::new(MemoryPrincipalStore::new());

    let set_id = Uuid::new_v4();
    let entity = agency(set_id, Language::Ja, "Renamed", 3);
    store.insert_snapshot(snapshot_of(&entity, "Original", 1));
    store.insert_snapshot(snapshot_of(&entity, "Original", 2));
    store.insert_snapshot(snapshot_of(&entity, "Renamed", 3));
    let entity_id = entity.id;
    store.insert_agency(entity);

    let admin = principal(PrincipalRole::Admin, None);
    let ctx = RequestContext::new(admin.id);
    principals.insert(admin);

    let service = make_service(Arc::clone(&store), principals);

    let first = service.rollback(&ctx, entity_id, v(1)).await.unwrap();
    assert_eq!(first[0].version, v(4));
    assert_eq!(first[0].name, "Original");

    // Rolling back again still targets the old snapshot and lands on a
    // fresh version with identical content.
    let second = service.rollback(&ctx, entity_id, v(1)).await.unwrap();
    assert_eq!(second[0].version, v(5));
    assert_eq!(second[0].name, "Original");

    assert_eq!(store.history_records().len(), 2);
}

#[tokio::test]
async fn test_versions_lists_snapshots_newest_first() {
    let store = Arc::new(MemoryAgencyStore::new());
    let principals = Arc::new(MemoryPrincipalStore::new());

    let set_id = Uuid::new_v4();
    let entity = agency(set_id, Language::Ja, "Name", 3);
    store.insert_snapshot(snapshot_of(&entity, "v1", 1));
    store.insert_snapshot(snapshot_of(&entity, "v2", 2));
    store.insert_snapshot(snapshot_of(&entity, "v3", 3));
    let entity_id = entity.id;
    store.insert_agency(entity);

    // Viewers may list versions; rollback itself stays staff-only.
    let viewer = principal(PrincipalRole::Viewer, None);
    let ctx = RequestContext::new(viewer.id);
    principals.insert(viewer);

    let service = make_service(store, principals);
    let snapshots = service.versions(&ctx, entity_id).await.unwrap();

    assert_eq!(snapshots.len(), 3);
    assert_eq!(snapshots[0].version, v(3));
    assert_eq!(snapshots[1].version, v(2));
    assert_eq!(snapshots[2].version, v(1));
}

#[tokio::test]
async fn test_versions_denial_names_the_denied_action() {
    let store = Arc::new(MemoryAgencyStore::new());
    let principals = Arc::new(MemoryPrincipalStore::new());

    let set_id = Uuid::new_v4();
    let entity = agency(set_id, Language::Ja, "Name", 2);
    let entity_id = entity.id;
    store.insert_agency(entity);

    // Agency staff of a different agency fails the scope check even for
    // reads.
    let outsider = principal(PrincipalRole::AgencyStaff, Some(Uuid::new_v4()));
    let ctx = RequestContext::new(outsider.id);
    principals.insert(outsider);

    let service = make_service(store, principals);
    let err = service.versions(&ctx, entity_id).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Authorization);
    assert!(err.message.contains("view"));
    assert!(!err.message.contains("roll"));
}
