use async_graphql::{Context, Object, Result};
use chrono::Utc;

use infra::repos::CreateUserData;
use infra::StoreError;

use crate::auth::permissions::require_authenticated;
use crate::auth::Authenticated;
use crate::gql::error::{GqlError, ResultExt};
use crate::gql::types::{AuthUser, User};
use crate::state::AppState;

use super::types::{SigninInput, SignupInput};

// ── Queries ──────────────────────────────────────────────────────────

#[derive(Default)]
pub struct AuthQuery;

#[Object]
impl AuthQuery {
    /// The user behind the request's token
    #[graphql(guard = "Authenticated")]
    async fn me(&self, ctx: &Context<'_>) -> Result<User> {
        let user = require_authenticated(ctx)?;
        Ok(user.clone().into())
    }
}

// ── Mutations ────────────────────────────────────────────────────────

#[derive(Default)]
pub struct AuthMutation;

#[Object]
impl AuthMutation {
    async fn signup(&self, ctx: &Context<'_>, input: SignupInput) -> Result<AuthUser> {
        let state = ctx.data::<AppState>()?;

        let created = state.users().create(CreateUserData {
            email: input.email,
            password: input.password,
            role: input.role.into(),
            created_at: Utc::now(),
        });

        let user = match created {
            Ok(user) => user,
            Err(StoreError::Duplicate { .. }) => {
                return Err(GqlError::authentication("Invalid User Credentials").into_gql())
            }
            Err(e) => return Err(GqlError::from(e).into_gql()),
        };

        tracing::info!(user_id = %user.id, "user signed up");

        let token = state.jwt_service().create_token(&user)?;
        Ok(AuthUser {
            token,
            user: user.into(),
        })
    }

    async fn signin(&self, ctx: &Context<'_>, input: SigninInput) -> Result<AuthUser> {
        let state = ctx.data::<AppState>()?;

        let user = state
            .users()
            .find_by_credentials(&input.email, &input.password)
            .or_gql()?
            .ok_or_else(|| {
                GqlError::authentication("Invalid Password and Email Combination").into_gql()
            })?;

        let token = state.jwt_service().create_token(&user)?;
        Ok(AuthUser {
            token,
            user: user.into(),
        })
    }
}
