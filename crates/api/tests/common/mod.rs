use std::sync::Arc;

use api::auth::{AuthConfig, Subject};
use api::gql::AppSchema;
use api::AppState;
use async_graphql::{Request, Variables};
use chrono::Utc;
use infra::models::{ManagerRow, Role, UserRow};
use infra::repos::{CreateManagerData, CreateUserData};
use infra::{JsonStore, COLLECTIONS};

pub const TEST_SECRET: &str = "test-secret";

/// App state over an in-memory document store.
pub fn setup_test_state() -> AppState {
    state_with_store(Arc::new(JsonStore::in_memory(&COLLECTIONS)))
}

pub fn state_with_store(store: Arc<JsonStore>) -> AppState {
    AppState::new(store, AuthConfig::with_secret(TEST_SECRET))
}

/// Helper function to execute GraphQL queries and mutations
pub async fn execute_graphql(
    schema: &AppSchema,
    query: &str,
    variables: Option<Variables>,
    subject: Option<Subject>,
) -> async_graphql::Response {
    let mut request = Request::new(query);

    if let Some(vars) = variables {
        request = request.variables(vars);
    }

    if let Some(subject) = subject {
        request = request.data(subject);
    }

    schema.execute(request).await
}

/// Create a user directly in the store and return it as a request subject
#[allow(dead_code)]
pub fn create_test_user(state: &AppState, email: &str, role: Role) -> Subject {
    let user: UserRow = state
        .users()
        .create(CreateUserData {
            email: email.to_string(),
            password: "password123".to_string(),
            role,
            created_at: Utc::now(),
        })
        .expect("Failed to create test user");

    Subject(user)
}

#[allow(dead_code)]
pub fn admin(state: &AppState) -> Subject {
    create_test_user(state, "admin@test.com", Role::Admin)
}

#[allow(dead_code)]
pub fn member(state: &AppState) -> Subject {
    create_test_user(state, "member@test.com", Role::Member)
}

/// Create a manager directly in the store
#[allow(dead_code)]
pub fn create_test_manager(state: &AppState, name: &str) -> ManagerRow {
    state
        .managers()
        .create(CreateManagerData {
            email: format!("{}@test.com", name.to_lowercase().replace(' ', ".")),
            name: name.to_string(),
        })
        .expect("Failed to create test manager")
}

/// The `code` extension of the first error, if any
#[allow(dead_code)]
pub fn error_code(response: &async_graphql::Response) -> Option<String> {
    let value = response.errors.first()?.extensions.as_ref()?.get("code")?;
    match value {
        async_graphql::Value::String(code) => Some(code.clone()),
        _ => None,
    }
}
