use flow::repository::FlowRepository;
use flow::stubs::InMemoryFlowRepository;
use serde_json::json;

#[test]
fn test_set_get_del_meta_inmemory() {
  let repo = InMemoryFlowRepository::new();
  let id = repo.create_flow(Some("training-run".into()), Some("in_training".into()), json!({})).expect("create");
  // sin clave todavía
  let v = repo.get_meta(&id, "crop").expect("get_meta");
  assert!(v.is_null(), "expected null for missing key");

  repo.set_meta(&id, "crop", json!("potato")).expect("set_meta");
  let v = repo.get_meta(&id, "crop").expect("get_meta after set");
  assert_eq!(v.as_str(), Some("potato"));

  repo.del_meta(&id, "crop").expect("del_meta");
  let v = repo.get_meta(&id, "crop").expect("get_meta after del");
  assert!(v.is_null(), "expected null after delete");
}

#[test]
fn status_updates_are_visible_in_meta() {
  let repo = InMemoryFlowRepository::new();
  let id = repo.create_flow(None, Some("in_training".into()), json!({"crop": "onion"})).expect("create");
  let meta = repo.set_flow_status(&id, Some("abandoned".into())).expect("set status");
  assert_eq!(meta.status.as_deref(), Some("abandoned"));
  assert_eq!(repo.get_flow_status(&id).expect("status").as_deref(), Some("abandoned"));
  // la metadata original se conserva
  assert_eq!(repo.get_meta(&id, "crop").expect("meta"), json!("onion"));
}

#[test]
fn meta_operations_on_unknown_flow_fail() {
  let repo = InMemoryFlowRepository::new();
  let missing = uuid::Uuid::new_v4();
  assert!(repo.set_meta(&missing, "k", json!(1)).is_err());
  assert!(repo.get_meta(&missing, "k").is_err());
}
