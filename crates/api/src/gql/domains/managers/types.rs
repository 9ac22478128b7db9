use async_graphql::{InputObject, ID};

#[derive(InputObject)]
pub struct NewManagerInput {
    pub email: String,
    pub name: String,
}

#[derive(InputObject)]
pub struct UpdateManagerInput {
    pub id: ID,
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Manager criteria used when filtering players.
#[derive(InputObject)]
pub struct ManagerInput {
    pub email: Option<String>,
    pub name: Option<String>,
}
