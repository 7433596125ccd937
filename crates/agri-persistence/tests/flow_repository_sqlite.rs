use agri_persistence::DieselFlowRepository;
use chrono::Utc;
use flow::domain::{FlowData, PersistResult};
use flow::repository::FlowRepository;
use serde_json::json;
use uuid::Uuid;

fn setup_repo() -> DieselFlowRepository {
    // Archivo temporal propio por test: evita compartir estado entre hilos.
    let path = std::env::temp_dir().join(format!("agri-flow-{}.db", Uuid::new_v4()));
    DieselFlowRepository::new(&path.to_string_lossy()).expect("open sqlite")
}

fn record(flow_id: Uuid, cursor: i64, command_id: Option<Uuid>) -> FlowData {
    FlowData { id: Uuid::new_v4(),
               flow_id,
               cursor,
               key: format!("step_state:potato-{}", cursor),
               payload: json!({"step_id": format!("potato-{}", cursor)}),
               metadata: json!({"source": "test"}),
               command_id,
               created_at: Utc::now() }
}

#[test]
fn create_persist_and_read_back() {
    let repo = setup_repo();
    let flow_id = repo.create_flow(Some("potato".into()), Some("in_training".into()), json!({"crop": "potato"}))
                      .expect("create");
    for i in 1..=3 {
        match repo.persist_data(&record(flow_id, i, None), i - 1).expect("persist") {
            PersistResult::Ok { new_version } => assert_eq!(new_version, i),
            PersistResult::Conflict => panic!("conflict"),
        }
    }
    let items = repo.read_data(&flow_id, 0).expect("read");
    assert_eq!(items.len(), 3);
    assert_eq!(items[2].payload["step_id"], "potato-3");
    assert_eq!(items[0].metadata["source"], "test");
    assert_eq!(repo.count_steps(&flow_id).expect("count"), 3);
    let meta = repo.get_flow_meta(&flow_id).expect("meta");
    assert_eq!(meta.current_cursor, 3);
    assert_eq!(meta.metadata["crop"], "potato");
}

#[test]
fn conflicts_and_idempotency() {
    let repo = setup_repo();
    let flow_id = repo.create_flow(None, None, json!({})).expect("create");
    let cmd = Uuid::new_v4();
    assert_eq!(repo.persist_data(&record(flow_id, 1, Some(cmd)), 0).unwrap(), PersistResult::Ok { new_version: 1 });
    // comando repetido: sin duplicado
    assert_eq!(repo.persist_data(&record(flow_id, 2, Some(cmd)), 1).unwrap(), PersistResult::Ok { new_version: 1 });
    // versión vieja
    assert_eq!(repo.persist_data(&record(flow_id, 2, None), 0).unwrap(), PersistResult::Conflict);
    assert_eq!(repo.count_steps(&flow_id).unwrap(), 1);
    let items = repo.read_data(&flow_id, 0).unwrap();
    assert_eq!(items[0].command_id, Some(cmd));
}

#[test]
fn snapshots_status_and_meta() {
    let repo = setup_repo();
    let flow_id = repo.create_flow(Some("wheat".into()), Some("in_training".into()), json!({})).expect("create");
    assert!(repo.load_latest_snapshot(&flow_id).unwrap().is_none());
    repo.save_snapshot(&flow_id, 0, json!({"state": "a"})).unwrap();
    repo.save_snapshot(&flow_id, 2, json!({"state": "b"})).unwrap();
    let snap = repo.load_latest_snapshot(&flow_id).unwrap().expect("snapshot");
    assert_eq!(snap.cursor, 2);
    assert_eq!(snap.state["state"], "b");

    let meta = repo.set_flow_status(&flow_id, Some("abandoned".into())).unwrap();
    assert_eq!(meta.status.as_deref(), Some("abandoned"));
    assert!(repo.set_flow_status(&Uuid::new_v4(), None).is_err());

    repo.set_meta(&flow_id, "certificate_id", json!("AGR-1")).unwrap();
    assert_eq!(repo.get_meta(&flow_id, "certificate_id").unwrap(), json!("AGR-1"));
    repo.del_meta(&flow_id, "certificate_id").unwrap();
    assert!(repo.get_meta(&flow_id, "certificate_id").unwrap().is_null());

    assert_eq!(repo.count_steps(&Uuid::new_v4()).unwrap(), -1);
    assert_eq!(repo.list_flow_ids().unwrap(), vec![flow_id]);
}

#[test]
fn delete_flow_clears_every_table() {
    let repo = setup_repo();
    let keep = repo.create_flow(Some("onion".into()), None, json!({})).expect("create");
    let gone = repo.create_flow(Some("wheat".into()), None, json!({})).expect("create");
    repo.persist_data(&record(gone, 1, None), 0).expect("persist");
    repo.save_snapshot(&gone, 1, json!({"state": "x"})).expect("snapshot");

    repo.delete_flow(&gone).expect("delete");
    assert_eq!(repo.count_steps(&gone).unwrap(), -1);
    assert!(repo.read_data(&gone, 0).unwrap().is_empty());
    assert!(repo.load_latest_snapshot(&gone).unwrap().is_none());
    assert_eq!(repo.list_flow_ids().unwrap(), vec![keep]);
    assert!(repo.delete_flow(&gone).is_err());
}
