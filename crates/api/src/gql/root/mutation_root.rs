use async_graphql::MergedObject;

use crate::gql::domains::auth::AuthMutation;
use crate::gql::domains::managers::ManagerMutation;
use crate::gql::domains::players::PlayerMutation;

#[derive(MergedObject, Default)]
pub struct MutationRoot(AuthMutation, ManagerMutation, PlayerMutation);
