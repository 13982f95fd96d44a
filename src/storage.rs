use std::{collections::HashMap, sync::Arc};

use chrono::Utc;
use sea_orm::{
    ActiveValue::Set, DatabaseConnection, EntityTrait, sea_query::OnConflict,
};
use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::RwLock;

use crate::{
    entity::storage_entries::{ActiveModel as EntryActive, Column as EntryCol, Entity as StorageEntries},
    error::AppResult,
};

/// Document keys. Each holds one JSON array.
pub mod keys {
    pub const ROOMS: &str = "hotel_rooms";
    pub const RESERVATIONS: &str = "hotel_reservations";
    pub const USERS: &str = "hotel_users";
    pub const REVIEWS: &str = "hotel_reviews";
    pub const MESSAGES: &str = "hotel_messages";
}

/// Key-value document store. Values are whole JSON documents that are
/// replaced wholesale on every save.
#[derive(Clone)]
pub enum Storage {
    Memory(Arc<RwLock<HashMap<String, String>>>),
    Database(DatabaseConnection),
}

impl Storage {
    pub fn memory() -> Self {
        Storage::Memory(Arc::new(RwLock::new(HashMap::new())))
    }

    pub fn database(conn: DatabaseConnection) -> Self {
        Storage::Database(conn)
    }

    pub fn backend(&self) -> &'static str {
        match self {
            Storage::Memory(_) => "memory",
            Storage::Database(_) => "database",
        }
    }

    pub async fn ping(&self) -> AppResult<()> {
        match self {
            Storage::Memory(_) => Ok(()),
            Storage::Database(conn) => Ok(conn.ping().await?),
        }
    }

    pub async fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        match self {
            Storage::Memory(map) => Ok(map.read().await.get(key).cloned()),
            Storage::Database(conn) => {
                let entry = StorageEntries::find_by_id(key.to_owned()).one(conn).await?;
                Ok(entry.map(|model| model.value))
            }
        }
    }

    pub async fn set_item(&self, key: &str, value: String) -> AppResult<()> {
        match self {
            Storage::Memory(map) => {
                map.write().await.insert(key.to_owned(), value);
            }
            Storage::Database(conn) => {
                let entry = EntryActive {
                    storage_key: Set(key.to_owned()),
                    value: Set(value),
                    updated_at: Set(Utc::now().to_rfc3339()),
                };
                StorageEntries::insert(entry)
                    .on_conflict(
                        OnConflict::column(EntryCol::StorageKey)
                            .update_columns([EntryCol::Value, EntryCol::UpdatedAt])
                            .to_owned(),
                    )
                    .exec_without_returning(conn)
                    .await?;
            }
        }
        Ok(())
    }

    pub async fn remove_item(&self, key: &str) -> AppResult<()> {
        match self {
            Storage::Memory(map) => {
                map.write().await.remove(key);
            }
            Storage::Database(conn) => {
                StorageEntries::delete_by_id(key.to_owned()).exec(conn).await?;
            }
        }
        Ok(())
    }

    /// Read a document, treating a missing key as the empty default.
    /// A document that no longer parses is logged and also read as empty.
    pub async fn load<T>(&self, key: &str) -> AppResult<T>
    where
        T: DeserializeOwned + Default,
    {
        let Some(raw) = self.get_item(key).await? else {
            return Ok(T::default());
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(err) => {
                tracing::warn!(key, error = %err, "malformed stored document, reading as empty");
                Ok(T::default())
            }
        }
    }

    pub async fn save<T>(&self, key: &str, value: &T) -> AppResult<()>
    where
        T: Serialize + ?Sized,
    {
        let raw = serde_json::to_string(value)?;
        self.set_item(key, raw).await
    }
}
