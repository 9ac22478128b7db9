use std::sync::Arc;

use infra::repos::{ManagerRepo, PlayerRepo, UserRepo};
use infra::JsonStore;

use crate::auth::{AuthConfig, JwtService};
use crate::gql::subscriptions::SigningNotifier;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<JsonStore>,
    jwt_service: JwtService,
    signings: SigningNotifier,
}

impl AppState {
    pub fn new(store: Arc<JsonStore>, auth_config: AuthConfig) -> Self {
        let jwt_service = JwtService::new(&auth_config);

        Self {
            store,
            jwt_service,
            signings: SigningNotifier::new(),
        }
    }

    pub fn jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }

    pub fn signings(&self) -> &SigningNotifier {
        &self.signings
    }

    pub fn managers(&self) -> ManagerRepo {
        ManagerRepo::new(&self.store)
    }

    pub fn players(&self) -> PlayerRepo {
        PlayerRepo::new(&self.store)
    }

    pub fn users(&self) -> UserRepo {
        UserRepo::new(&self.store)
    }
}
