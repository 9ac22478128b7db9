use async_graphql::{Context, GuardExt, Object, Result, ID};

use infra::repos::{CreateManagerData, UpdateManagerData};
use infra::StoreError;

use crate::auth::{Authenticated, RequireRole};
use crate::gql::error::{GqlError, ResultExt};
use crate::gql::types::{Manager, Role};
use crate::state::AppState;

use super::types::{NewManagerInput, UpdateManagerInput};

// ── Queries ──────────────────────────────────────────────────────────

#[derive(Default)]
pub struct ManagerQuery;

#[Object]
impl ManagerQuery {
    #[graphql(guard = "Authenticated")]
    async fn managers(&self, ctx: &Context<'_>) -> Result<Vec<Manager>> {
        let state = ctx.data::<AppState>()?;
        let rows = state.managers().list().or_gql()?;
        Ok(rows.into_iter().map(Manager::from).collect())
    }

    #[graphql(guard = "Authenticated")]
    async fn manager(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Manager>> {
        let state = ctx.data::<AppState>()?;
        let row = state.managers().get_by_id(id.as_str()).or_gql()?;
        Ok(row.map(Manager::from))
    }
}

// ── Mutations ────────────────────────────────────────────────────────

#[derive(Default)]
pub struct ManagerMutation;

#[Object]
impl ManagerMutation {
    #[graphql(guard = "Authenticated.and(RequireRole(Role::Admin))")]
    async fn add_manager(&self, ctx: &Context<'_>, input: NewManagerInput) -> Result<Manager> {
        let state = ctx.data::<AppState>()?;

        let created = state.managers().create(CreateManagerData {
            email: input.email,
            name: input.name,
        });

        match created {
            Ok(row) => {
                tracing::info!(manager_id = %row.id, "manager added");
                Ok(row.into())
            }
            Err(StoreError::Duplicate { .. }) => {
                Err(GqlError::validation("Manager could not be created").into_gql())
            }
            Err(e) => Err(GqlError::from(e).into_gql()),
        }
    }

    #[graphql(guard = "Authenticated.and(RequireRole(Role::Admin))")]
    async fn update_manager(
        &self,
        ctx: &Context<'_>,
        input: UpdateManagerInput,
    ) -> Result<Manager> {
        let state = ctx.data::<AppState>()?;

        let updated = state
            .managers()
            .update(
                input.id.as_str(),
                UpdateManagerData {
                    email: input.email,
                    name: input.name,
                },
            )
            .or_gql()?;

        updated
            .map(Manager::from)
            .ok_or_else(|| GqlError::validation("Manager not found").into_gql())
    }

    /// Players signed by the manager are left untouched.
    #[graphql(guard = "Authenticated.and(RequireRole(Role::Admin))")]
    async fn delete_manager(&self, ctx: &Context<'_>, id: ID) -> Result<ID> {
        let state = ctx.data::<AppState>()?;

        state
            .managers()
            .delete(id.as_str())
            .or_gql()?
            .map(ID::from)
            .ok_or_else(|| GqlError::validation("Manager not found").into_gql())
    }
}
