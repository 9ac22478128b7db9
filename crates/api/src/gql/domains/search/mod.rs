pub mod resolvers;

pub use resolvers::SearchQuery;
