use async_graphql::MergedObject;

use crate::gql::domains::auth::AuthQuery;
use crate::gql::domains::managers::ManagerQuery;
use crate::gql::domains::players::PlayerQuery;
use crate::gql::domains::search::SearchQuery;

#[derive(MergedObject, Default)]
pub struct QueryRoot(AuthQuery, ManagerQuery, PlayerQuery, SearchQuery);
