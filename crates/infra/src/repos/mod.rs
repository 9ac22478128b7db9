pub mod managers;
pub mod members;
pub mod players;
pub mod users;

pub use managers::{CreateManagerData, ManagerFilter, ManagerRepo, UpdateManagerData};
pub use members::search_by_name;
pub use players::{CreatePlayerData, PlayerFilter, PlayerRepo, UpdatePlayerData};
pub use users::{CreateUserData, UserRepo};
