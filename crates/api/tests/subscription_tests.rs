mod common;

use std::time::Duration;

use api::gql::build_schema;
use async_graphql::{Request, Variables};
use common::*;
use futures_util::StreamExt;
use serde_json::json;

const NEW_SIGNING: &str = "subscription { newSigning { id name position debut } }";

const ADD_PLAYER: &str = r#"
    mutation AddPlayer($input: NewPlayerInput!) {
        addPlayer(input: $input) { id name position debut }
    }
"#;

#[tokio::test]
async fn test_new_signing_reaches_only_earlier_subscribers() {
    let state = setup_test_state();
    let schema = build_schema(state.clone());
    let admin = admin(&state);
    create_test_manager(&state, "Carlo Ancelotti");

    let mut early = Box::pin(schema.execute_stream(Request::new(NEW_SIGNING)));
    // Polling once runs the subscription resolver, which registers the listener
    assert!(
        tokio::time::timeout(Duration::from_millis(50), early.next())
            .await
            .is_err(),
        "No signing has happened yet"
    );
    assert_eq!(state.signings().subscriber_count(), 1);

    let variables = Variables::from_json(json!({
        "input": {
            "email": "modric@real.com",
            "name": "Luka Modric",
            "position": "MIDFIELDER",
            "debut": 2012,
            "debutManager": "Carlo Ancelotti"
        }
    }));
    let response = execute_graphql(&schema, ADD_PLAYER, Some(variables), Some(admin)).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let created = response.data.into_json().unwrap()["addPlayer"].clone();

    let mut late = Box::pin(schema.execute_stream(Request::new(NEW_SIGNING)));

    let event = early.next().await.expect("subscriber should receive the signing");
    assert!(event.errors.is_empty(), "{:?}", event.errors);
    assert_eq!(event.data.into_json().unwrap()["newSigning"], created);

    assert!(
        tokio::time::timeout(Duration::from_millis(50), early.next())
            .await
            .is_err(),
        "Exactly one event per signing"
    );
    assert!(
        tokio::time::timeout(Duration::from_millis(50), late.next())
            .await
            .is_err(),
        "Late subscribers do not see past signings"
    );
}

#[tokio::test]
async fn test_failed_signing_publishes_nothing() {
    let state = setup_test_state();
    let schema = build_schema(state.clone());
    let admin = admin(&state);

    let mut stream = Box::pin(schema.execute_stream(Request::new(NEW_SIGNING)));
    assert!(tokio::time::timeout(Duration::from_millis(50), stream.next())
        .await
        .is_err());

    let variables = Variables::from_json(json!({
        "input": {
            "email": "ghost@test.com",
            "name": "Ghost",
            "position": "GOALKEEPER",
            "debutManager": "Nobody"
        }
    }));
    let response = execute_graphql(&schema, ADD_PLAYER, Some(variables), Some(admin)).await;
    assert_eq!(error_code(&response).as_deref(), Some("BAD_USER_INPUT"));

    assert!(tokio::time::timeout(Duration::from_millis(50), stream.next())
        .await
        .is_err());
}
