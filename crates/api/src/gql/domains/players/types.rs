use async_graphql::{InputObject, ID};

use crate::gql::domains::managers::types::ManagerInput;
use crate::gql::types::PositionType;

#[derive(InputObject)]
pub struct NewPlayerInput {
    pub email: String,
    pub name: String,
    pub position: PositionType,
    /// Defaults to the current year.
    pub debut: Option<i32>,
    /// Name of the signing manager.
    pub debut_manager: String,
}

#[derive(InputObject)]
pub struct UpdatePlayerInput {
    pub id: ID,
    pub name: Option<String>,
    pub email: Option<String>,
    pub position: Option<PositionType>,
    pub debut: Option<i32>,
    /// Name of the new signing manager.
    pub debut_manager: Option<String>,
}

#[derive(InputObject)]
pub struct PlayerInput {
    pub position: PositionType,
    pub debut: Option<i32>,
    pub manager: Option<ManagerInput>,
}
