use agri_domain::{InMemorySessionStore, SessionStore};

#[test]
fn set_get_remove() {
  let store = InMemorySessionStore::new();
  assert_eq!(store.get("name").expect("get"), None);
  store.set("name", "Ramesh").expect("set");
  store.set("name", "Ramesh Kumar").expect("overwrite");
  assert_eq!(store.get("name").expect("get").as_deref(), Some("Ramesh Kumar"));
  store.remove("name").expect("remove");
  assert_eq!(store.get("name").expect("get"), None);
}
