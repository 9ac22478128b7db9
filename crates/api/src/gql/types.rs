use async_graphql::{ComplexObject, Context, Enum, Result, SimpleObject, Union, ID};
use chrono::{DateTime, Utc};

use infra::models::{ManagerRow, MemberRow, PlayerRow, Position, UserRow};

use crate::gql::error::ResultExt;
use crate::gql::format_date::{format_date, DEFAULT_DATE_FORMAT};
use crate::state::AppState;

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
pub enum Role {
    #[graphql(name = "ADMIN")]
    Admin,
    #[graphql(name = "MEMBER")]
    Member,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Member => "MEMBER",
        }
    }
}

impl From<infra::models::Role> for Role {
    fn from(role: infra::models::Role) -> Self {
        match role {
            infra::models::Role::Admin => Role::Admin,
            infra::models::Role::Member => Role::Member,
        }
    }
}

impl From<Role> for infra::models::Role {
    fn from(role: Role) -> Self {
        match role {
            Role::Admin => infra::models::Role::Admin,
            Role::Member => infra::models::Role::Member,
        }
    }
}

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
pub enum PositionType {
    #[graphql(name = "GOALKEEPER")]
    Goalkeeper,
    #[graphql(name = "ATTACKER")]
    Attacker,
    #[graphql(name = "MIDFIELDER")]
    Midfielder,
    #[graphql(name = "DEFENDER")]
    Defender,
}

impl From<Position> for PositionType {
    fn from(position: Position) -> Self {
        match position {
            Position::Goalkeeper => PositionType::Goalkeeper,
            Position::Attacker => PositionType::Attacker,
            Position::Midfielder => PositionType::Midfielder,
            Position::Defender => PositionType::Defender,
        }
    }
}

impl From<PositionType> for Position {
    fn from(position: PositionType) -> Self {
        match position {
            PositionType::Goalkeeper => Position::Goalkeeper,
            PositionType::Attacker => Position::Attacker,
            PositionType::Midfielder => Position::Midfielder,
            PositionType::Defender => Position::Defender,
        }
    }
}

#[derive(SimpleObject, Clone, Debug, PartialEq)]
#[graphql(complex)]
pub struct Manager {
    pub id: ID,
    pub email: String,
    pub name: String,
}

impl From<ManagerRow> for Manager {
    fn from(row: ManagerRow) -> Self {
        Self {
            id: row.id.into(),
            email: row.email,
            name: row.name,
        }
    }
}

#[ComplexObject]
impl Manager {
    /// Players this manager signed.
    async fn debut_players(&self, ctx: &Context<'_>) -> Result<Vec<Player>> {
        let state = ctx.data::<AppState>()?;
        let rows = state.players().list_by_manager(self.id.as_str()).or_gql()?;
        Ok(rows.into_iter().map(Player::from).collect())
    }
}

#[derive(SimpleObject, Clone, Debug, PartialEq)]
#[graphql(complex)]
pub struct Player {
    pub id: ID,
    pub email: String,
    pub name: String,
    pub position: PositionType,
    pub debut: i32,
    #[graphql(skip)]
    pub reports_to: String,
}

impl From<PlayerRow> for Player {
    fn from(row: PlayerRow) -> Self {
        Self {
            id: row.id.into(),
            email: row.email,
            name: row.name,
            position: row.position.into(),
            debut: row.debut,
            reports_to: row.reports_to,
        }
    }
}

#[ComplexObject]
impl Player {
    /// The manager who signed this player.
    async fn debut_manager(&self, ctx: &Context<'_>) -> Result<Option<Manager>> {
        let state = ctx.data::<AppState>()?;
        let row = state.managers().get_by_id(&self.reports_to).or_gql()?;
        Ok(row.map(Manager::from))
    }
}

#[derive(SimpleObject, Clone, Debug)]
#[graphql(complex)]
pub struct User {
    pub id: ID,
    pub email: String,
    pub role: Role,
    #[graphql(skip)]
    pub created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id.into(),
            email: row.email,
            role: row.role.into(),
            created_at: row.created_at,
        }
    }
}

#[ComplexObject]
impl User {
    /// Creation date rendered with a date-fns style pattern.
    async fn created_at(
        &self,
        #[graphql(desc = "Defaults to \"dd MMM yyyy\"")] format: Option<String>,
    ) -> Option<String> {
        let pattern = format.as_deref().unwrap_or(DEFAULT_DATE_FORMAT);
        Some(format_date(&self.created_at, pattern))
    }
}

#[derive(SimpleObject, Clone, Debug)]
pub struct AuthUser {
    pub token: String,
    pub user: User,
}

#[derive(Union, Clone, Debug, PartialEq)]
pub enum Member {
    Manager(Manager),
    Player(Player),
}

impl From<MemberRow> for Member {
    fn from(row: MemberRow) -> Self {
        match row {
            MemberRow::Manager(manager) => Member::Manager(manager.into()),
            MemberRow::Player(player) => Member::Player(player.into()),
        }
    }
}
