use async_graphql::{Context, Object, Result};

use crate::auth::Authenticated;
use crate::gql::error::ResultExt;
use crate::gql::types::Member;
use crate::state::AppState;

#[derive(Default)]
pub struct SearchQuery;

#[Object]
impl SearchQuery {
    /// Exact-name lookup across managers and players. A name held by both
    /// yields the player, with any manager-only fields folded in.
    #[graphql(guard = "Authenticated")]
    async fn search(&self, ctx: &Context<'_>, name: Option<String>) -> Result<Option<Member>> {
        let Some(name) = name else {
            return Ok(None);
        };

        let state = ctx.data::<AppState>()?;
        let member = infra::repos::search_by_name(&state.store, &name).or_gql()?;
        Ok(member.map(Member::from))
    }
}
