use chrono::Utc;
use flow::domain::{FlowData, PersistResult};
use flow::stubs::InMemoryFlowRepository;
use flow::FlowRepository;
use serde_json::json;
use uuid::Uuid;

fn record(flow_id: Uuid, cursor: i64, command_id: Option<Uuid>) -> FlowData {
  FlowData { id: Uuid::new_v4(),
             flow_id,
             cursor,
             key: format!("step_state:s{}", cursor),
             payload: json!({"cursor": cursor}),
             metadata: json!({}),
             command_id,
             created_at: Utc::now() }
}

#[test]
fn persist_and_read_in_cursor_order() {
  let repo = InMemoryFlowRepository::new();
  let id = repo.create_flow(Some("run".into()), None, json!({})).unwrap();

  let mut expected_version = 0i64;
  for i in 1..=3 {
    match repo.persist_data(&record(id, i, None), expected_version).unwrap() {
      PersistResult::Ok { new_version } => expected_version = new_version,
      PersistResult::Conflict => panic!("unexpected conflict"),
    }
  }
  assert_eq!(repo.count_steps(&id).unwrap(), 3);
  let items = repo.read_data(&id, 1).unwrap();
  assert_eq!(items.iter().map(|d| d.cursor).collect::<Vec<_>>(), vec![2, 3]);
  assert_eq!(repo.get_flow_meta(&id).unwrap().current_cursor, 3);
}

#[test]
fn stale_version_is_a_conflict() {
  let repo = InMemoryFlowRepository::new();
  let id = repo.create_flow(None, None, json!({})).unwrap();
  assert_eq!(repo.persist_data(&record(id, 1, None), 0).unwrap(), PersistResult::Ok { new_version: 1 });
  assert_eq!(repo.persist_data(&record(id, 2, None), 0).unwrap(), PersistResult::Conflict);
  assert_eq!(repo.count_steps(&id).unwrap(), 1);
}

#[test]
fn repeated_command_id_never_duplicates() {
  let repo = InMemoryFlowRepository::new();
  let id = repo.create_flow(None, None, json!({})).unwrap();
  let cmd = Uuid::new_v4();
  assert_eq!(repo.persist_data(&record(id, 1, Some(cmd)), 0).unwrap(), PersistResult::Ok { new_version: 1 });
  // mismo comando con cursor nuevo: sin efecto, devuelve la versión actual
  assert_eq!(repo.persist_data(&record(id, 2, Some(cmd)), 1).unwrap(), PersistResult::Ok { new_version: 1 });
  assert_eq!(repo.count_steps(&id).unwrap(), 1);
}

#[test]
fn non_monotonic_cursor_is_rejected() {
  let repo = InMemoryFlowRepository::new();
  let id = repo.create_flow(None, None, json!({})).unwrap();
  repo.persist_data(&record(id, 5, None), 0).unwrap();
  assert!(repo.persist_data(&record(id, 5, None), 1).is_err());
}

#[test]
fn count_steps_nonexistent_returns_minus_one() {
  let repo = InMemoryFlowRepository::new();
  assert_eq!(repo.count_steps(&Uuid::new_v4()).unwrap(), -1);
}

#[test]
fn latest_snapshot_wins_and_list_keeps_creation_order() {
  let repo = InMemoryFlowRepository::new();
  let a = repo.create_flow(Some("a".into()), None, json!({})).unwrap();
  let b = repo.create_flow(Some("b".into()), None, json!({})).unwrap();
  assert_eq!(repo.list_flow_ids().unwrap(), vec![a, b]);

  assert!(repo.load_latest_snapshot(&a).unwrap().is_none());
  repo.save_snapshot(&a, 1, json!({"v": 1})).unwrap();
  repo.save_snapshot(&a, 3, json!({"v": 3})).unwrap();
  repo.save_snapshot(&a, 2, json!({"v": 2})).unwrap();
  let snap = repo.load_latest_snapshot(&a).unwrap().expect("snapshot");
  assert_eq!(snap.cursor, 3);
  assert_eq!(snap.state["v"], 3);
  assert!(repo.save_snapshot(&Uuid::new_v4(), 0, json!({})).is_err());
}
