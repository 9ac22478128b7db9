use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::db::{JsonStore, Result, StoreError};

/// A flat record keyed by field name.
pub type Record = Map<String, Value>;

/// Build a record (or filter) from field/value pairs.
pub fn record<const N: usize>(pairs: [(&str, Value); N]) -> Record {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

/// True when every key/value pair of `filter` is present in `record`.
pub fn matches(record: &Record, filter: &Record) -> bool {
    filter.iter().all(|(k, v)| record.get(k) == Some(v))
}

pub fn to_record<T: Serialize>(value: &T) -> Result<Record> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Corrupt(format!(
            "expected an object, got {other}"
        ))),
    }
}

pub fn from_record<T: DeserializeOwned>(record: Record) -> Result<T> {
    Ok(serde_json::from_value(Value::Object(record))?)
}

/// Generic CRUD over one named collection of the document store.
#[derive(Clone, Debug)]
pub struct Collection {
    store: Arc<JsonStore>,
    name: &'static str,
}

impl Collection {
    pub fn new(store: Arc<JsonStore>, name: &'static str) -> Self {
        Self { store, name }
    }

    pub fn find_one(&self, filter: &Record) -> Option<Record> {
        self.store.read(self.name, |records| {
            records.iter().find(|r| matches(r, filter)).cloned()
        })
    }

    /// All matching records in insertion order. An empty filter matches all.
    pub fn find_many(&self, filter: &Record) -> Vec<Record> {
        self.store.read(self.name, |records| {
            records
                .iter()
                .filter(|r| matches(r, filter))
                .cloned()
                .collect()
        })
    }

    /// Append `fields` under a freshly generated id. Any `id` in `fields` is
    /// ignored.
    pub fn create(&self, fields: Record) -> Result<Record> {
        self.store.write(self.name, |records| {
            let record = with_new_id(fields);
            records.push(record.clone());
            Ok(record)
        })
    }

    /// Like [`Collection::create`], but fails with [`StoreError::Duplicate`]
    /// when a record already holds the same value under `key`. The check and
    /// the insert run under a single write lock.
    pub fn create_unique(&self, key: &str, fields: Record) -> Result<Record> {
        self.store.write(self.name, |records| {
            if let Some(value) = fields.get(key) {
                if records.iter().any(|r| r.get(key) == Some(value)) {
                    return Err(StoreError::Duplicate {
                        collection: self.name.to_string(),
                        field: key.to_string(),
                    });
                }
            }

            let record = with_new_id(fields);
            records.push(record.clone());
            Ok(record)
        })
    }

    /// Shallow-merge `fields` into the record with `id`. Returns `None` when
    /// no such record exists.
    pub fn update(&self, id: &str, fields: Record) -> Result<Option<Record>> {
        self.store.write(self.name, |records| {
            let Some(existing) = records
                .iter_mut()
                .find(|r| r.get("id").and_then(Value::as_str) == Some(id))
            else {
                return Ok(None);
            };

            for (k, v) in fields {
                if k != "id" {
                    existing.insert(k, v);
                }
            }

            Ok(Some(existing.clone()))
        })
    }

    /// Remove the first record matching `filter` and return its id.
    pub fn delete(&self, filter: &Record) -> Result<Option<String>> {
        self.store.write(self.name, |records| {
            let Some(pos) = records.iter().position(|r| matches(r, filter)) else {
                return Ok(None);
            };

            let removed = records.remove(pos);
            Ok(removed
                .get("id")
                .and_then(Value::as_str)
                .map(str::to_string))
        })
    }
}

fn with_new_id(fields: Record) -> Record {
    let mut record = Record::new();
    record.insert("id".into(), Value::String(Uuid::new_v4().to_string()));
    record.extend(fields.into_iter().filter(|(k, _)| k != "id"));
    record
}
