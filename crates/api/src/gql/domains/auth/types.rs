use async_graphql::InputObject;

use crate::gql::types::Role;

#[derive(InputObject)]
pub struct SignupInput {
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(InputObject)]
pub struct SigninInput {
    pub email: String,
    pub password: String,
}
