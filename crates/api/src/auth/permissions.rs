//! Resolver guards.
//!
//! Guards compose with [`async_graphql::GuardExt::and`]; the left guard runs
//! first and a failing guard stops the chain before the resolver body runs:
//!
//! ```ignore
//! #[graphql(guard = "Authenticated.and(RequireRole(Role::Admin))")]
//! ```

use async_graphql::{Context, Guard, Result};

use infra::models::UserRow;

use crate::auth::Subject;
use crate::gql::error::GqlError;
use crate::gql::types::Role;

/// Fails unless the request carries a resolved subject.
pub struct Authenticated;

impl Guard for Authenticated {
    async fn check(&self, ctx: &Context<'_>) -> Result<()> {
        require_authenticated(ctx).map(|_| ())
    }
}

/// Fails unless the subject holds the given role. Expected to run after
/// [`Authenticated`].
pub struct RequireRole(pub Role);

impl Guard for RequireRole {
    async fn check(&self, ctx: &Context<'_>) -> Result<()> {
        require_role(ctx, self.0).map(|_| ())
    }
}

/// The authenticated user, or an authentication failure.
pub fn require_authenticated<'a>(ctx: &Context<'a>) -> Result<&'a UserRow> {
    ctx.data_opt::<Subject>()
        .map(|subject| &subject.0)
        .ok_or_else(|| GqlError::authentication("Not Authenticated").into_gql())
}

/// The authenticated user if their role matches `required_role`.
pub fn require_role<'a>(ctx: &Context<'a>, required_role: Role) -> Result<&'a UserRow> {
    let user = require_authenticated(ctx)?;

    if Role::from(user.role) != required_role {
        return Err(GqlError::authentication(format!(
            "Incorrect Role: Must be an {}",
            required_role.as_str()
        ))
        .into_gql());
    }

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_graphql::{EmptyMutation, EmptySubscription, GuardExt, Object, Request, Schema};
    use chrono::Utc;
    use infra::models::Role as StoredRole;

    struct Calls(Arc<AtomicUsize>);

    struct Query;

    #[Object]
    impl Query {
        #[graphql(guard = "Authenticated")]
        async fn members_only(&self, ctx: &Context<'_>) -> i32 {
            ctx.data_unchecked::<Calls>().0.fetch_add(1, Ordering::SeqCst);
            1
        }

        #[graphql(guard = "Authenticated.and(RequireRole(Role::Admin))")]
        async fn admins_only(&self, ctx: &Context<'_>) -> i32 {
            ctx.data_unchecked::<Calls>().0.fetch_add(1, Ordering::SeqCst);
            2
        }
    }

    fn subject(role: StoredRole) -> Subject {
        Subject(UserRow {
            id: "user-1".into(),
            email: "user@club.com".into(),
            password: "pw".into(),
            role,
            created_at: Utc::now(),
        })
    }

    async fn run(query: &str, subject: Option<Subject>) -> (async_graphql::Response, usize) {
        let calls = Arc::new(AtomicUsize::new(0));
        let schema = Schema::build(Query, EmptyMutation, EmptySubscription)
            .data(Calls(Arc::clone(&calls)))
            .finish();

        let mut request = Request::new(query);
        if let Some(subject) = subject {
            request = request.data(subject);
        }

        let response = schema.execute(request).await;
        (response, calls.load(Ordering::SeqCst))
    }

    #[tokio::test]
    async fn missing_subject_short_circuits_before_the_resolver() {
        let (response, calls) = run("{ membersOnly }", None).await;

        assert_eq!(calls, 0);
        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].message, "Not Authenticated");
    }

    #[tokio::test]
    async fn outer_guard_reports_first() {
        let (response, calls) = run("{ adminsOnly }", None).await;

        assert_eq!(calls, 0);
        assert_eq!(response.errors[0].message, "Not Authenticated");
    }

    #[tokio::test]
    async fn wrong_role_is_rejected() {
        let (response, calls) = run("{ adminsOnly }", Some(subject(StoredRole::Member))).await;

        assert_eq!(calls, 0);
        assert_eq!(
            response.errors[0].message,
            "Incorrect Role: Must be an ADMIN"
        );
    }

    #[tokio::test]
    async fn matching_role_reaches_the_resolver() {
        let (response, calls) = run(
            "{ membersOnly adminsOnly }",
            Some(subject(StoredRole::Admin)),
        )
        .await;

        assert!(response.errors.is_empty(), "{:?}", response.errors);
        assert_eq!(calls, 2);
    }
}
