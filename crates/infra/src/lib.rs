pub mod collection;
pub mod db;
pub mod models;
pub mod repos;

pub use collection::{record, Collection, Record};
pub use db::{JsonStore, StoreError, COLLECTIONS};
