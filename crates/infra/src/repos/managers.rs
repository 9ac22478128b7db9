use std::sync::Arc;

use serde::Serialize;
use serde_json::json;

use crate::collection::{from_record, record, to_record, Collection, Record};
use crate::db::{JsonStore, Result};
use crate::models::ManagerRow;

pub const COLLECTION: &str = "managers";

#[derive(Debug, Clone, Serialize)]
pub struct CreateManagerData {
    pub email: String,
    pub name: String,
}

/// Fields a manager update may touch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateManagerData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ManagerFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ManagerRepo {
    collection: Collection,
}

impl ManagerRepo {
    pub fn new(store: &Arc<JsonStore>) -> Self {
        Self {
            collection: store.collection(COLLECTION),
        }
    }

    pub fn list(&self) -> Result<Vec<ManagerRow>> {
        self.list_by(&ManagerFilter::default())
    }

    pub fn list_by(&self, filter: &ManagerFilter) -> Result<Vec<ManagerRow>> {
        self.collection
            .find_many(&to_record(filter)?)
            .into_iter()
            .map(from_record)
            .collect()
    }

    pub fn get_by_id(&self, id: &str) -> Result<Option<ManagerRow>> {
        self.find(record([("id", json!(id))]))
    }

    pub fn find_by_name(&self, name: &str) -> Result<Option<ManagerRow>> {
        self.find(record([("name", json!(name))]))
    }

    /// Raw record lookup, used where fields are merged across collections.
    pub fn find_record_by_name(&self, name: &str) -> Option<Record> {
        self.collection.find_one(&record([("name", json!(name))]))
    }

    /// Create a manager; fails with a duplicate error if the name is taken.
    pub fn create(&self, data: CreateManagerData) -> Result<ManagerRow> {
        let created = self.collection.create_unique("name", to_record(&data)?)?;
        tracing::debug!(manager_id = ?created.get("id"), "manager created");
        from_record(created)
    }

    pub fn update(&self, id: &str, data: UpdateManagerData) -> Result<Option<ManagerRow>> {
        self.collection
            .update(id, to_record(&data)?)?
            .map(from_record)
            .transpose()
    }

    pub fn delete(&self, id: &str) -> Result<Option<String>> {
        self.collection.delete(&record([("id", json!(id))]))
    }

    fn find(&self, filter: Record) -> Result<Option<ManagerRow>> {
        self.collection.find_one(&filter).map(from_record).transpose()
    }
}
