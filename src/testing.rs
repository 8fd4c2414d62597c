//! In-memory stores and fixtures for unit tests.

use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Mutex,
};

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    addresses::{Address, AddressPatch, AddressStore, NewAddress, PopulatedAddress},
    users::{PublicUser, User, UserStore},
};

/// Users and addresses kept in insertion order. Counts every store call so
/// tests can assert that nothing reached the database.
#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
    addresses: Mutex<Vec<Address>>,
    calls: AtomicUsize,
    drop_writes: AtomicBool,
}

impl MemoryStore {
    pub fn add_user(&self, email: &str) -> User {
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            created_at: OffsetDateTime::now_utc(),
        };
        self.users.lock().unwrap().push(user.clone());
        user
    }

    pub fn remove_user(&self, id: Uuid) {
        self.users.lock().unwrap().retain(|u| u.id != id);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Makes create/update succeed without returning a row.
    pub fn drop_writes(&self, on: bool) {
        self.drop_writes.store(on, Ordering::SeqCst);
    }

    pub fn address_count(&self) -> usize {
        self.addresses.lock().unwrap().len()
    }

    pub fn get(&self, id: Uuid) -> Option<Address> {
        self.addresses.lock().unwrap().iter().find(|a| a.id == id).cloned()
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

fn apply(address: &mut Address, patch: &AddressPatch) {
    fn set(slot: &mut String, value: &Option<String>) {
        if let Some(v) = value {
            slot.clone_from(v);
        }
    }
    set(&mut address.country_code, &patch.country_code);
    set(&mut address.first_name, &patch.first_name);
    set(&mut address.last_name, &patch.last_name);
    set(&mut address.phone, &patch.phone);
    set(&mut address.address1, &patch.address1);
    if let Some(v) = &patch.address2 {
        address.address2 = Some(v.clone());
    }
    set(&mut address.city, &patch.city);
    set(&mut address.zone, &patch.zone);
    set(&mut address.pin_code, &patch.pin_code);
    address.updated_at = OffsetDateTime::now_utc();
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        self.hit();
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }
}

#[async_trait]
impl AddressStore for MemoryStore {
    async fn create(&self, user_id: Uuid, new: NewAddress) -> anyhow::Result<Option<Address>> {
        self.hit();
        if self.drop_writes.load(Ordering::SeqCst) {
            return Ok(None);
        }
        if !self.users.lock().unwrap().iter().any(|u| u.id == user_id) {
            anyhow::bail!("foreign key violation: user {user_id}");
        }
        let now = OffsetDateTime::now_utc();
        let address = Address {
            id: Uuid::new_v4(),
            country_code: new.country_code,
            first_name: new.first_name,
            last_name: new.last_name,
            phone: new.phone,
            address1: new.address1,
            address2: new.address2,
            city: new.city,
            zone: new.zone,
            pin_code: new.pin_code,
            user_id,
            created_at: now,
            updated_at: now,
        };
        self.addresses.lock().unwrap().push(address.clone());
        Ok(Some(address))
    }

    async fn list_by_user(&self, user_id: Uuid) -> anyhow::Result<Vec<Address>> {
        self.hit();
        Ok(self
            .addresses
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Address>> {
        self.hit();
        Ok(self.get(id))
    }

    async fn find_populated(&self, id: Uuid) -> anyhow::Result<Option<PopulatedAddress>> {
        self.hit();
        let Some(address) = self.get(id) else {
            return Ok(None);
        };
        let user = self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == address.user_id)
            .cloned();
        Ok(user.map(|u| PopulatedAddress::new(address, PublicUser::from(u))))
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        patch: &AddressPatch,
    ) -> anyhow::Result<Option<Address>> {
        self.hit();
        if self.drop_writes.load(Ordering::SeqCst) {
            return Ok(None);
        }
        let mut addresses = self.addresses.lock().unwrap();
        let updated = addresses.iter_mut().find(|a| a.id == id).map(|a| {
            apply(a, patch);
            a.clone()
        });
        Ok(updated)
    }

    async fn delete_by_id(&self, id: Uuid) -> anyhow::Result<Option<Address>> {
        self.hit();
        let mut addresses = self.addresses.lock().unwrap();
        let pos = addresses.iter().position(|a| a.id == id);
        let removed = pos.map(|i| addresses.remove(i));
        Ok(removed)
    }
}

pub fn new_address() -> NewAddress {
    NewAddress {
        country_code: "+91".into(),
        first_name: "Asha".into(),
        last_name: "Rao".into(),
        phone: "9876543210".into(),
        address1: "12 MG Road".into(),
        address2: None,
        city: "Pune".into(),
        zone: "MH".into(),
        pin_code: "411001".into(),
    }
}
