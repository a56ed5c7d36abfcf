use std::collections::HashSet;

use chrono::{DateTime, Duration, SubsecRound, Utc};

use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::types::ClientId;
use crate::repository::errors::RepositoryError;
use crate::repository::{ClientReader, ClientWriter, Clock, SlotStorage, SystemClock};

/// Slot key the client collection is persisted under.
pub const DEFAULT_STORAGE_KEY: &str = "crm_clients";

/// Reads the persisted client collection.
///
/// Never fails: a missing slot yields an empty collection, and so does
/// unreadable or unparseable content (after logging the error). Records
/// repeating an already loaded id are dropped.
pub fn load_clients<S>(storage: &S, key: &str) -> Vec<Client>
where
    S: SlotStorage + ?Sized,
{
    let raw = match storage.read_slot(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            log::debug!("No stored clients under {key}");
            return Vec::new();
        }
        Err(err) => {
            log::error!("Error loading clients: {err}");
            return Vec::new();
        }
    };

    let clients: Vec<Client> = match serde_json::from_str(&raw) {
        Ok(clients) => clients,
        Err(err) => {
            log::error!("Error loading clients: {}", RepositoryError::from(err));
            return Vec::new();
        }
    };

    let mut seen = HashSet::with_capacity(clients.len());
    let total = clients.len();
    let clients: Vec<Client> = clients
        .into_iter()
        .filter(|client| seen.insert(client.id.clone()))
        .collect();
    if clients.len() != total {
        log::warn!(
            "Dropped {} stored clients with duplicate ids",
            total - clients.len()
        );
    }

    log::debug!("Loaded {} clients from {key}", clients.len());
    clients
}

/// Writes the whole collection to the slot, replacing previous content.
/// Failures are logged and swallowed.
pub fn save_clients<S>(storage: &S, key: &str, clients: &[Client])
where
    S: SlotStorage + ?Sized,
{
    let result = serde_json::to_string(clients)
        .map_err(RepositoryError::from)
        .and_then(|payload| storage.write_slot(key, &payload));

    if let Err(err) = result {
        log::error!("Error saving clients: {err}");
    }
}

/// Owner of the canonical client collection.
///
/// The collection is loaded once on [`ClientStore::open`] and written back
/// after every mutation that changed it.
pub struct ClientStore<S, C = SystemClock> {
    storage: S,
    clock: C,
    key: String,
    clients: Vec<Client>,
}

impl<S> ClientStore<S, SystemClock>
where
    S: SlotStorage,
{
    /// Opens the store under [`DEFAULT_STORAGE_KEY`] using the wall clock.
    pub fn open(storage: S) -> Self {
        Self::open_with(storage, SystemClock, DEFAULT_STORAGE_KEY)
    }
}

impl<S, C> ClientStore<S, C>
where
    S: SlotStorage,
    C: Clock,
{
    pub fn open_with(storage: S, clock: C, key: impl Into<String>) -> Self {
        let key = key.into();
        let clients = load_clients(&storage, &key);
        Self {
            storage,
            clock,
            key,
            clients,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Persisted timestamps carry milliseconds, so the store never keeps more.
    fn now(&self) -> DateTime<Utc> {
        self.clock.now().trunc_subsecs(3)
    }

    fn persist(&self) {
        save_clients(&self.storage, &self.key, &self.clients);
    }
}

impl<S, C> ClientReader for ClientStore<S, C>
where
    S: SlotStorage,
    C: Clock,
{
    fn get_client(&self, id: &ClientId) -> Option<&Client> {
        self.clients.iter().find(|client| &client.id == id)
    }

    fn list_clients(&self) -> &[Client] {
        &self.clients
    }
}

impl<S, C> ClientWriter for ClientStore<S, C>
where
    S: SlotStorage,
    C: Clock,
{
    fn add_client(&mut self, mut new_client: NewClient) -> Client {
        let id = ClientId::generate();
        debug_assert!(
            self.get_client(&id).is_none(),
            "generated client id {id} collides with an existing client"
        );

        new_client.last_contact = new_client.last_contact.trunc_subsecs(3);
        let client = new_client.into_client(id, self.now());
        self.clients.insert(0, client.clone());
        log::info!("Added client {}", client.id);

        self.persist();
        client
    }

    fn update_client(&mut self, id: &ClientId, updates: &UpdateClient) -> Option<Client> {
        let now = self.now();
        let Some(client) = self.clients.iter_mut().find(|client| &client.id == id) else {
            log::debug!("Skipping update of unknown client {id}");
            return None;
        };

        updates.apply_to(client);
        client.last_contact = client.last_contact.trunc_subsecs(3);
        // Every update moves `updated_at` strictly forward, even on a coarse clock.
        client.updated_at = if now > client.updated_at {
            now
        } else {
            client.updated_at + Duration::milliseconds(1)
        };
        let updated = client.clone();
        log::info!("Updated client {id}");

        self.persist();
        Some(updated)
    }

    fn remove_client(&mut self, id: &ClientId) -> Option<Client> {
        let Some(position) = self.clients.iter().position(|client| &client.id == id) else {
            log::debug!("Skipping removal of unknown client {id}");
            return None;
        };

        let removed = self.clients.remove(position);
        log::info!("Removed client {id}");

        self.persist();
        Some(removed)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::domain::types::{ClientName, ClientStatus};
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockStorage;
    use crate::repository::{ManualClock, MemorySlotStorage};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap()
    }

    fn open_store() -> ClientStore<MemorySlotStorage, ManualClock> {
        ClientStore::open_with(
            MemorySlotStorage::new(),
            ManualClock::new(start()),
            DEFAULT_STORAGE_KEY,
        )
    }

    fn new_client(name: &str) -> NewClient {
        NewClient::new(ClientName::new(name).unwrap(), start() - Duration::days(3))
            .phone("(11) 91234-5678")
            .email("ana@example.com")
            .product("Consultoria")
            .status(ClientStatus::InContact)
            .notes("call back after lunch")
    }

    fn stored(store: &ClientStore<MemorySlotStorage, ManualClock>) -> Vec<Client> {
        let raw = store.storage().slot(DEFAULT_STORAGE_KEY).unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn add_then_get_preserves_fields() {
        let mut store = open_store();
        let fields = new_client("Ana");

        let added = store.add_client(fields.clone());
        let fetched = store.get_client(&added.id).unwrap();

        assert!(!fetched.id.as_str().is_empty());
        assert_eq!(fetched.name, fields.name);
        assert_eq!(fetched.phone, fields.phone);
        assert_eq!(fetched.email, fields.email);
        assert_eq!(fetched.product, fields.product);
        assert_eq!(fetched.status, fields.status);
        assert_eq!(fetched.notes, fields.notes);
        assert_eq!(fetched.last_contact, fields.last_contact);
        assert_eq!(fetched.created_at, fetched.updated_at);
        assert_eq!(fetched.created_at, start());
    }

    #[test]
    fn add_prepends_and_persists() {
        let mut store = open_store();

        let first = store.add_client(new_client("First"));
        let second = store.add_client(new_client("Second"));

        let ids: Vec<_> = store.list_clients().iter().map(|c| c.id.clone()).collect();
        assert_eq!(ids, vec![second.id.clone(), first.id.clone()]);
        assert_eq!(stored(&store), store.list_clients());
    }

    #[test]
    fn update_status_touches_only_status_and_updated_at() {
        let mut store = open_store();
        let added = store.add_client(new_client("Ana"));
        store.clock().advance(Duration::minutes(5));

        let updated = store
            .update_client(&added.id, &UpdateClient::default().status(ClientStatus::Closed))
            .unwrap();

        assert_eq!(updated.status, ClientStatus::Closed);
        assert!(updated.updated_at > added.updated_at);
        assert_eq!(updated.created_at, added.created_at);
        assert_eq!(
            Client {
                status: added.status,
                updated_at: added.updated_at,
                ..updated.clone()
            },
            added
        );
        assert_eq!(stored(&store)[0], updated);
    }

    #[test]
    fn update_moves_updated_at_forward_on_a_frozen_clock() {
        let mut store = open_store();
        let added = store.add_client(new_client("Ana"));

        let once = store
            .update_client(&added.id, &UpdateClient::default().notes("x"))
            .unwrap();
        let twice = store
            .update_client(&added.id, &UpdateClient::default().notes("y"))
            .unwrap();

        assert!(once.updated_at > added.updated_at);
        assert!(twice.updated_at > once.updated_at);
    }

    #[test]
    fn update_keeps_order() {
        let mut store = open_store();
        let older = store.add_client(new_client("Older"));
        let newer = store.add_client(new_client("Newer"));

        store.update_client(&older.id, &UpdateClient::default().product("Plano anual"));

        let list = store.list_clients();
        assert_eq!(list[0].id, newer.id);
        assert_eq!(list[1].id, older.id);
        assert_eq!(list[1].product, "Plano anual");
    }

    #[test]
    fn unknown_ids_are_no_ops() {
        let mut store = open_store();
        store.add_client(new_client("Ana"));
        let before = store.list_clients().to_vec();
        let missing = ClientId::new("missing").unwrap();

        assert!(store.get_client(&missing).is_none());
        assert!(
            store
                .update_client(&missing, &UpdateClient::default().notes("x"))
                .is_none()
        );
        assert!(store.remove_client(&missing).is_none());
        assert_eq!(store.list_clients(), before.as_slice());
    }

    #[test]
    fn remove_then_get_is_absent() {
        let mut store = open_store();
        let keep = store.add_client(new_client("Keep"));
        let drop = store.add_client(new_client("Drop"));

        let removed = store.remove_client(&drop.id).unwrap();

        assert_eq!(removed.id, drop.id);
        assert_eq!(store.len(), 1);
        assert!(store.get_client(&drop.id).is_none());
        assert!(store.get_client(&keep.id).is_some());
        assert_eq!(stored(&store).len(), 1);
    }

    #[test]
    fn reopening_restores_collection() {
        let mut store = open_store();
        let added = store.add_client(new_client("Ana"));
        let raw = store.storage().slot(DEFAULT_STORAGE_KEY).unwrap();

        let reopened = ClientStore::open_with(
            MemorySlotStorage::with_slot(DEFAULT_STORAGE_KEY, raw),
            ManualClock::new(start()),
            DEFAULT_STORAGE_KEY,
        );

        assert_eq!(reopened.list_clients(), [added]);
    }

    #[test]
    fn sub_millisecond_last_contact_matches_persisted_value() {
        let mut store = open_store();
        let precise = start() - Duration::days(1) + Duration::microseconds(1_234_567);
        let mut draft = new_client("Ana");
        draft.last_contact = precise;

        let added = store.add_client(draft);
        assert_eq!(added.last_contact, precise.trunc_subsecs(3));

        let updated = store
            .update_client(&added.id, &UpdateClient::default().last_contact(precise + Duration::microseconds(5)))
            .unwrap();
        assert_eq!(updated.last_contact, precise.trunc_subsecs(3));

        let raw = store.storage().slot(DEFAULT_STORAGE_KEY).unwrap();
        let reopened = ClientStore::open_with(
            MemorySlotStorage::with_slot(DEFAULT_STORAGE_KEY, raw),
            ManualClock::new(start()),
            DEFAULT_STORAGE_KEY,
        );
        assert_eq!(reopened.list_clients(), store.list_clients());
    }

    #[test]
    fn unparseable_slot_loads_empty() {
        let storage = MemorySlotStorage::with_slot(DEFAULT_STORAGE_KEY, "{not json");
        assert!(load_clients(&storage, DEFAULT_STORAGE_KEY).is_empty());

        let storage = MemorySlotStorage::with_slot(DEFAULT_STORAGE_KEY, r#"[{"id":"x"}]"#);
        assert!(load_clients(&storage, DEFAULT_STORAGE_KEY).is_empty());
    }

    #[test]
    fn duplicate_ids_keep_first_record() {
        let mut store = open_store();
        let added = store.add_client(new_client("Ana"));
        let payload = serde_json::to_string(&vec![added.clone(), added.clone()]).unwrap();
        let storage = MemorySlotStorage::with_slot(DEFAULT_STORAGE_KEY, payload);

        assert_eq!(load_clients(&storage, DEFAULT_STORAGE_KEY), vec![added]);
    }

    #[test]
    fn read_failure_loads_empty() {
        let mut storage = MockStorage::new();
        storage
            .expect_read_slot()
            .withf(|key| key == DEFAULT_STORAGE_KEY)
            .returning(|_| Err(RepositoryError::StorageError("disk gone".to_string())));

        let store = ClientStore::open_with(storage, ManualClock::new(start()), DEFAULT_STORAGE_KEY);

        assert!(store.is_empty());
    }

    #[test]
    fn write_failure_does_not_interrupt_mutations() {
        let mut storage = MockStorage::new();
        storage.expect_read_slot().returning(|_| Ok(None));
        storage
            .expect_write_slot()
            .times(2)
            .returning(|_, _| Err(RepositoryError::StorageError("read-only".to_string())));

        let mut store = ClientStore::open_with(storage, ManualClock::new(start()), DEFAULT_STORAGE_KEY);
        let added = store.add_client(new_client("Ana"));
        store.remove_client(&added.id);

        assert!(store.is_empty());
    }

    #[test]
    fn misses_do_not_write() {
        let mut storage = MockStorage::new();
        storage.expect_read_slot().returning(|_| Ok(None));
        storage.expect_write_slot().times(0);

        let mut store = ClientStore::open_with(storage, ManualClock::new(start()), DEFAULT_STORAGE_KEY);
        let missing = ClientId::new("missing").unwrap();
        store.update_client(&missing, &UpdateClient::default());
        store.remove_client(&missing);
    }
}
