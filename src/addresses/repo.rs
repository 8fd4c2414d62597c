use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{Address, AddressPatch, AddressWithUserRow, NewAddress, PopulatedAddress};

/// Persistence for addresses. Every method is a single statement and atomic
/// per row; write methods return `None` when no row came back.
#[async_trait]
pub trait AddressStore: Send + Sync {
    async fn create(&self, user_id: Uuid, new: NewAddress) -> anyhow::Result<Option<Address>>;
    async fn list_by_user(&self, user_id: Uuid) -> anyhow::Result<Vec<Address>>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Address>>;
    async fn find_populated(&self, id: Uuid) -> anyhow::Result<Option<PopulatedAddress>>;
    async fn update_by_id(&self, id: Uuid, patch: &AddressPatch)
        -> anyhow::Result<Option<Address>>;
    async fn delete_by_id(&self, id: Uuid) -> anyhow::Result<Option<Address>>;
}

const ADDRESS_COLUMNS: &str = "id, country_code, first_name, last_name, phone, address1, \
     address2, city, zone, pin_code, user_id, created_at, updated_at";

#[derive(Clone)]
pub struct PgAddressStore {
    db: PgPool,
}

impl PgAddressStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AddressStore for PgAddressStore {
    async fn create(&self, user_id: Uuid, new: NewAddress) -> anyhow::Result<Option<Address>> {
        let sql = format!(
            r#"
            INSERT INTO addresses (id, country_code, first_name, last_name, phone,
                                   address1, address2, city, zone, pin_code, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {ADDRESS_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, Address>(&sql)
            .bind(Uuid::new_v4())
            .bind(new.country_code)
            .bind(new.first_name)
            .bind(new.last_name)
            .bind(new.phone)
            .bind(new.address1)
            .bind(new.address2) // Option<String> → NULL allowed
            .bind(new.city)
            .bind(new.zone)
            .bind(new.pin_code)
            .bind(user_id)
            .fetch_optional(&self.db)
            .await
            .context("insert address")?;
        Ok(row)
    }

    async fn list_by_user(&self, user_id: Uuid) -> anyhow::Result<Vec<Address>> {
        let sql = format!(
            r#"
            SELECT {ADDRESS_COLUMNS}
              FROM addresses
             WHERE user_id = $1
             ORDER BY created_at ASC, id ASC
            "#
        );
        let rows = sqlx::query_as::<_, Address>(&sql)
            .bind(user_id)
            .fetch_all(&self.db)
            .await
            .context("list addresses by user")?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Address>> {
        let sql = format!("SELECT {ADDRESS_COLUMNS} FROM addresses WHERE id = $1");
        let row = sqlx::query_as::<_, Address>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .context("find address by id")?;
        Ok(row)
    }

    async fn find_populated(&self, id: Uuid) -> anyhow::Result<Option<PopulatedAddress>> {
        let row = sqlx::query_as::<_, AddressWithUserRow>(
            r#"
            SELECT a.id, a.country_code, a.first_name, a.last_name, a.phone, a.address1,
                   a.address2, a.city, a.zone, a.pin_code, a.user_id, a.created_at,
                   a.updated_at, u.email AS user_email, u.created_at AS user_created_at
              FROM addresses a
              JOIN users u ON u.id = a.user_id
             WHERE a.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("find populated address")?;
        Ok(row.map(PopulatedAddress::from))
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        patch: &AddressPatch,
    ) -> anyhow::Result<Option<Address>> {
        // NULL parameters keep the stored value
        let sql = format!(
            r#"
            UPDATE addresses
               SET country_code = COALESCE($2, country_code),
                   first_name   = COALESCE($3, first_name),
                   last_name    = COALESCE($4, last_name),
                   phone        = COALESCE($5, phone),
                   address1     = COALESCE($6, address1),
                   address2     = COALESCE($7, address2),
                   city         = COALESCE($8, city),
                   zone         = COALESCE($9, zone),
                   pin_code     = COALESCE($10, pin_code),
                   updated_at   = now()
             WHERE id = $1
            RETURNING {ADDRESS_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, Address>(&sql)
            .bind(id)
            .bind(patch.country_code.as_deref())
            .bind(patch.first_name.as_deref())
            .bind(patch.last_name.as_deref())
            .bind(patch.phone.as_deref())
            .bind(patch.address1.as_deref())
            .bind(patch.address2.as_deref())
            .bind(patch.city.as_deref())
            .bind(patch.zone.as_deref())
            .bind(patch.pin_code.as_deref())
            .fetch_optional(&self.db)
            .await
            .context("update address")?;
        Ok(row)
    }

    async fn delete_by_id(&self, id: Uuid) -> anyhow::Result<Option<Address>> {
        let sql = format!("DELETE FROM addresses WHERE id = $1 RETURNING {ADDRESS_COLUMNS}");
        let row = sqlx::query_as::<_, Address>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .context("delete address")?;
        Ok(row)
    }
}
