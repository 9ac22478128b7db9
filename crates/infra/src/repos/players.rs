use std::sync::Arc;

use serde::Serialize;
use serde_json::json;

use crate::collection::{from_record, record, to_record, Collection, Record};
use crate::db::{JsonStore, Result};
use crate::models::{PlayerRow, Position};

pub const COLLECTION: &str = "players";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlayerData {
    pub email: String,
    pub name: String,
    pub position: Position,
    pub debut: i32,
    pub reports_to: String,
}

/// Fields a player update may touch.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlayerData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debut: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reports_to: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debut: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reports_to: Option<String>,
}

#[derive(Clone, Debug)]
pub struct PlayerRepo {
    collection: Collection,
}

impl PlayerRepo {
    pub fn new(store: &Arc<JsonStore>) -> Self {
        Self {
            collection: store.collection(COLLECTION),
        }
    }

    pub fn list(&self) -> Result<Vec<PlayerRow>> {
        self.list_by(&PlayerFilter::default())
    }

    pub fn list_by(&self, filter: &PlayerFilter) -> Result<Vec<PlayerRow>> {
        self.collection
            .find_many(&to_record(filter)?)
            .into_iter()
            .map(from_record)
            .collect()
    }

    /// Players signed by the given manager.
    pub fn list_by_manager(&self, manager_id: &str) -> Result<Vec<PlayerRow>> {
        self.list_by(&PlayerFilter {
            reports_to: Some(manager_id.to_string()),
            ..Default::default()
        })
    }

    pub fn get_by_id(&self, id: &str) -> Result<Option<PlayerRow>> {
        self.find(record([("id", json!(id))]))
    }

    pub fn find_by_name(&self, name: &str) -> Result<Option<PlayerRow>> {
        self.find(record([("name", json!(name))]))
    }

    pub fn find_record_by_name(&self, name: &str) -> Option<Record> {
        self.collection.find_one(&record([("name", json!(name))]))
    }

    /// Create a player; fails with a duplicate error if the name is taken.
    pub fn create(&self, data: CreatePlayerData) -> Result<PlayerRow> {
        let created = self.collection.create_unique("name", to_record(&data)?)?;
        tracing::debug!(player_id = ?created.get("id"), "player created");
        from_record(created)
    }

    pub fn update(&self, id: &str, data: UpdatePlayerData) -> Result<Option<PlayerRow>> {
        self.collection
            .update(id, to_record(&data)?)?
            .map(from_record)
            .transpose()
    }

    pub fn delete(&self, id: &str) -> Result<Option<String>> {
        self.collection.delete(&record([("id", json!(id))]))
    }

    fn find(&self, filter: Record) -> Result<Option<PlayerRow>> {
        self.collection.find_one(&filter).map(from_record).transpose()
    }
}
