use std::collections::HashSet;

use async_graphql::{Context, GuardExt, Object, Result, ID};
use chrono::Datelike;

use infra::repos::{CreatePlayerData, ManagerFilter, PlayerFilter, UpdatePlayerData};
use infra::StoreError;

use crate::auth::{Authenticated, RequireRole};
use crate::gql::error::{GqlError, ResultExt};
use crate::gql::types::{Player, Role};
use crate::state::AppState;

use super::types::{NewPlayerInput, PlayerInput, UpdatePlayerInput};

const DUPLICATE_PLAYER: &str = "Player could not be created";

const UNKNOWN_MANAGER: &str =
    "We could not find the right information to set this player up. Please check and try again.";

// ── Queries ──────────────────────────────────────────────────────────

#[derive(Default)]
pub struct PlayerQuery;

#[Object]
impl PlayerQuery {
    #[graphql(guard = "Authenticated")]
    async fn players(&self, ctx: &Context<'_>, input: Option<PlayerInput>) -> Result<Vec<Player>> {
        let state = ctx.data::<AppState>()?;

        let Some(input) = input else {
            let rows = state.players().list().or_gql()?;
            return Ok(rows.into_iter().map(Player::from).collect());
        };

        let filter = PlayerFilter {
            position: Some(input.position.into()),
            debut: input.debut,
            reports_to: None,
        };
        let mut rows = state.players().list_by(&filter).or_gql()?;

        if let Some(manager) = input.manager {
            let manager_ids: HashSet<String> = state
                .managers()
                .list_by(&ManagerFilter {
                    email: manager.email,
                    name: manager.name,
                })
                .or_gql()?
                .into_iter()
                .map(|m| m.id)
                .collect();

            rows.retain(|p| manager_ids.contains(&p.reports_to));
        }

        Ok(rows.into_iter().map(Player::from).collect())
    }

    #[graphql(guard = "Authenticated")]
    async fn player(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Player>> {
        let state = ctx.data::<AppState>()?;
        let row = state.players().get_by_id(id.as_str()).or_gql()?;
        Ok(row.map(Player::from))
    }
}

// ── Mutations ────────────────────────────────────────────────────────

#[derive(Default)]
pub struct PlayerMutation;

#[Object]
impl PlayerMutation {
    /// Pass the manager name for debutManager
    #[graphql(guard = "Authenticated.and(RequireRole(Role::Admin))")]
    async fn add_player(&self, ctx: &Context<'_>, input: NewPlayerInput) -> Result<Player> {
        let state = ctx.data::<AppState>()?;

        // A taken name is reported ahead of an unknown manager
        if state.players().find_by_name(&input.name).or_gql()?.is_some() {
            return Err(GqlError::validation(DUPLICATE_PLAYER).into_gql());
        }

        let manager_id = resolve_manager_id(state, &input.debut_manager)?;

        let created = state.players().create(CreatePlayerData {
            email: input.email,
            name: input.name,
            position: input.position.into(),
            debut: input.debut.unwrap_or_else(|| chrono::Local::now().year()),
            reports_to: manager_id,
        });

        let player = match created {
            Ok(row) => Player::from(row),
            Err(StoreError::Duplicate { .. }) => {
                return Err(GqlError::validation(DUPLICATE_PLAYER).into_gql())
            }
            Err(e) => return Err(GqlError::from(e).into_gql()),
        };

        tracing::info!(player_id = %player.id.as_str(), "player signed");
        state.signings().publish(player.clone());

        Ok(player)
    }

    #[graphql(guard = "Authenticated.and(RequireRole(Role::Admin))")]
    async fn update_player(&self, ctx: &Context<'_>, input: UpdatePlayerInput) -> Result<Player> {
        let state = ctx.data::<AppState>()?;

        let reports_to = input
            .debut_manager
            .as_deref()
            .map(|name| resolve_manager_id(state, name))
            .transpose()?;

        let updated = state
            .players()
            .update(
                input.id.as_str(),
                UpdatePlayerData {
                    email: input.email,
                    name: input.name,
                    position: input.position.map(Into::into),
                    debut: input.debut,
                    reports_to,
                },
            )
            .or_gql()?;

        updated
            .map(Player::from)
            .ok_or_else(|| GqlError::validation("Player not found").into_gql())
    }

    #[graphql(guard = "Authenticated.and(RequireRole(Role::Admin))")]
    async fn delete_player(&self, ctx: &Context<'_>, id: ID) -> Result<ID> {
        let state = ctx.data::<AppState>()?;

        state
            .players()
            .delete(id.as_str())
            .or_gql()?
            .map(ID::from)
            .ok_or_else(|| GqlError::validation("Player not found").into_gql())
    }
}

/// Map a manager name to its id, failing with a validation error when no
/// manager carries that name.
fn resolve_manager_id(state: &AppState, name: &str) -> Result<String> {
    state
        .managers()
        .find_by_name(name)
        .or_gql()?
        .map(|manager| manager.id)
        .ok_or_else(|| GqlError::validation(UNKNOWN_MANAGER).into_gql())
}
