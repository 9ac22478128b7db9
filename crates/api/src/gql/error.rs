use async_graphql::ErrorExtensions;
use infra::StoreError;

/// Error categories surfaced to GraphQL clients.
///
/// Each variant maps to a `code` extension on the response error:
///   - `Authentication` → `UNAUTHENTICATED` (missing credential, wrong role,
///     bad sign-in, duplicate sign-up)
///   - `Validation` → `BAD_USER_INPUT` (duplicate names, unknown references)
///   - `Store` → `INTERNAL_SERVER_ERROR`; the detail is logged and a generic
///     message is returned
#[derive(Debug, thiserror::Error)]
pub enum GqlError {
    #[error("{0}")]
    Authentication(String),

    #[error("{0}")]
    Validation(String),

    #[error("Internal store error")]
    Store(#[from] StoreError),
}

impl GqlError {
    pub fn authentication(msg: impl Into<String>) -> Self {
        GqlError::Authentication(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        GqlError::Validation(msg.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            GqlError::Authentication(_) => "UNAUTHENTICATED",
            GqlError::Validation(_) => "BAD_USER_INPUT",
            GqlError::Store(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn into_gql(self) -> async_graphql::Error {
        self.extend()
    }
}

impl ErrorExtensions for GqlError {
    fn extend(&self) -> async_graphql::Error {
        if let GqlError::Store(e) = self {
            // Log the real error server-side; return a generic message to clients
            tracing::error!("Store error: {e}");
        }

        let code = self.code();
        async_graphql::Error::new(self.to_string()).extend_with(|_, ext| ext.set("code", code))
    }
}

/// Converts store results into resolver results.
///
/// Usage: `repo.list().or_gql()?`
pub trait ResultExt<T> {
    fn or_gql(self) -> async_graphql::Result<T>;
}

impl<T, E: Into<GqlError>> ResultExt<T> for std::result::Result<T, E> {
    fn or_gql(self) -> async_graphql::Result<T> {
        self.map_err(|e| e.into().into_gql())
    }
}
