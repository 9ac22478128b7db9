use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;

use crate::collection::{from_record, record, to_record, Collection, Record};
use crate::db::{JsonStore, Result};
use crate::models::{Role, UserRow};

pub const COLLECTION: &str = "users";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserData {
    pub email: String,
    pub password: String,
    pub role: Role,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct UserRepo {
    collection: Collection,
}

impl UserRepo {
    pub fn new(store: &Arc<JsonStore>) -> Self {
        Self {
            collection: store.collection(COLLECTION),
        }
    }

    pub fn get_by_id(&self, id: &str) -> Result<Option<UserRow>> {
        self.find(record([("id", json!(id))]))
    }

    pub fn find_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        self.find(record([("email", json!(email))]))
    }

    /// Exact email and password match.
    pub fn find_by_credentials(&self, email: &str, password: &str) -> Result<Option<UserRow>> {
        self.find(record([("email", json!(email)), ("password", json!(password))]))
    }

    /// Create a user; fails with a duplicate error if the email is registered.
    pub fn create(&self, data: CreateUserData) -> Result<UserRow> {
        let created = self.collection.create_unique("email", to_record(&data)?)?;
        from_record(created)
    }

    pub fn count(&self) -> usize {
        self.collection.find_many(&Record::new()).len()
    }

    fn find(&self, filter: Record) -> Result<Option<UserRow>> {
        self.collection.find_one(&filter).map(from_record).transpose()
    }
}
