use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::users::PublicUser;

/// Stored address. Serializes with the owner as a bare id under `user`.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub country_code: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub address1: String,
    pub address2: Option<String>,
    pub city: String,
    pub zone: String,
    pub pin_code: String,
    #[serde(rename = "user")]
    pub user_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Address joined with its owner's account row.
#[derive(Debug, FromRow)]
pub struct AddressWithUserRow {
    #[sqlx(flatten)]
    pub address: Address,
    pub user_email: String,
    pub user_created_at: OffsetDateTime,
}

/// Address with `user` resolved to the owner's public record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulatedAddress {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub country_code: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub address1: String,
    pub address2: Option<String>,
    pub city: String,
    pub zone: String,
    pub pin_code: String,
    pub user: PublicUser,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl PopulatedAddress {
    pub fn new(a: Address, user: PublicUser) -> Self {
        Self {
            id: a.id,
            country_code: a.country_code,
            first_name: a.first_name,
            last_name: a.last_name,
            phone: a.phone,
            address1: a.address1,
            address2: a.address2,
            city: a.city,
            zone: a.zone,
            pin_code: a.pin_code,
            user,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

impl From<AddressWithUserRow> for PopulatedAddress {
    fn from(r: AddressWithUserRow) -> Self {
        let user = PublicUser {
            id: r.address.user_id,
            email: r.user_email,
            created_at: r.user_created_at,
        };
        Self::new(r.address, user)
    }
}

/// Validated input for a new address.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAddress {
    pub country_code: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub address1: String,
    pub address2: Option<String>,
    pub city: String,
    pub zone: String,
    pub pin_code: String,
}

/// Sparse update. Only these fields can ever be written by an edit; a `None`
/// slot leaves the stored value alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddressPatch {
    pub country_code: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub zone: Option<String>,
    pub pin_code: Option<String>,
}

impl AddressPatch {
    /// Names of the fields this patch sets, for logging.
    pub fn field_names(&self) -> Vec<&'static str> {
        [
            ("countryCode", self.country_code.is_some()),
            ("firstName", self.first_name.is_some()),
            ("lastName", self.last_name.is_some()),
            ("phone", self.phone.is_some()),
            ("address1", self.address1.is_some()),
            ("address2", self.address2.is_some()),
            ("city", self.city.is_some()),
            ("zone", self.zone.is_some()),
            ("pinCode", self.pin_code.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, set)| set.then_some(name))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.field_names().is_empty()
    }
}
