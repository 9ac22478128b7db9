// Each domain contains: mod.rs, resolvers.rs, types.rs

pub mod auth;
pub mod managers;
pub mod players;
pub mod search;
