use flow::domain::PersistResult;
use flow::engine::FlowEngineConfig;
use flow::stubs::{InMemoryArtifactStore, InMemoryFlowRepository};
use flow::{ArtifactStore, FlowEngine, FlowError, FlowRepository};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

#[test]
fn append_assigns_cursors_and_rehydrates_after_snapshot() {
  let repo = Arc::new(InMemoryFlowRepository::new());
  let engine = FlowEngine::new(repo.clone(), FlowEngineConfig::default());
  let id = engine.start_flow(Some("potato".into()), Some("in_training".into()), json!({})).expect("create flow");

  for i in 1..=2 {
    let res = engine.append(id, "step_state:potato-1", json!({"i": i}), json!({}), None, None).expect("append");
    assert!(matches!(res, PersistResult::Ok { .. }));
  }
  engine.save_snapshot(&id, json!({"completed": 2})).expect("snapshot");
  engine.append_or_fail(id, "step_state:potato-3", json!({"i": 3}), json!({}), None).expect("append 3");

  let r = engine.rehydrate(&id).expect("rehydrate");
  assert_eq!(r.snapshot.as_ref().map(|s| s.cursor), Some(2));
  assert_eq!(r.replay.len(), 1);
  assert_eq!(r.replay[0].cursor, 3);
  assert_eq!(r.meta.current_version, 3);
}

#[test]
fn explicit_stale_version_reports_conflict() {
  let repo = Arc::new(InMemoryFlowRepository::new());
  let engine = FlowEngine::new(repo.clone(), FlowEngineConfig { conflict_retries: 0 });
  let id = engine.start_flow(None, None, json!({})).unwrap();
  engine.append(id, "k", json!({}), json!({}), None, Some(0)).unwrap();
  let res = engine.append(id, "k", json!({}), json!({}), None, Some(0)).unwrap();
  assert_eq!(res, PersistResult::Conflict);
  assert_eq!(repo.count_steps(&id).unwrap(), 1);
}

#[test]
fn engine_works_through_trait_objects() {
  let repo: Arc<dyn FlowRepository> = Arc::new(InMemoryFlowRepository::new());
  let engine = FlowEngine::new(repo.clone(), FlowEngineConfig::default());
  let id = engine.start_flow(None, None, json!({})).unwrap();
  let cmd = Some(Uuid::new_v4());
  engine.append_or_fail(id, "k", json!({}), json!({}), cmd).unwrap();
  engine.append_or_fail(id, "k", json!({}), json!({}), cmd).unwrap();
  assert_eq!(repo.count_steps(&id).unwrap(), 1);
  assert_eq!(engine.set_status(&id, "completed").unwrap().status.as_deref(), Some("completed"));
}

#[test]
fn artifact_store_is_content_addressed() {
  let store = InMemoryArtifactStore::new();
  let k1 = store.put(b"foto-1", "image/png").unwrap();
  let k2 = store.put(b"foto-1", "image/png").unwrap();
  let k3 = store.put(b"foto-2", "image/jpeg").unwrap();
  assert_eq!(k1, k2);
  assert_ne!(k1, k3);
  assert!(k1.starts_with("blake3:"));
  assert_eq!(store.len(), 2);
  let (bytes, media) = store.get(&k3).unwrap();
  assert_eq!(bytes, b"foto-2");
  assert_eq!(media, "image/jpeg");
  assert!(store.exists(&k1).unwrap());
  assert!(store.get("blake3:missing").is_err());
}

#[test]
fn delete_flow_removes_records_and_snapshots() {
  let repo = InMemoryFlowRepository::new();
  let keep = repo.create_flow(None, None, json!({})).unwrap();
  let gone = repo.create_flow(None, None, json!({})).unwrap();
  repo.save_snapshot(&gone, 0, json!({"x": 1})).unwrap();

  repo.delete_flow(&gone).unwrap();
  assert_eq!(repo.list_flow_ids().unwrap(), vec![keep]);
  assert_eq!(repo.count_steps(&gone).unwrap(), -1);
  assert!(repo.load_latest_snapshot(&gone).unwrap().is_none());
  assert!(matches!(repo.delete_flow(&gone), Err(FlowError::NotFound(_))));
}
