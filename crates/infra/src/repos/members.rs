use std::sync::Arc;

use crate::collection::from_record;
use crate::db::{JsonStore, Result};
use crate::models::MemberRow;
use crate::repos::{ManagerRepo, PlayerRepo};

/// Look up a manager and a player by exact name.
///
/// When both exist their fields are merged, player fields written last, and
/// the merged record is returned as a player.
pub fn search_by_name(store: &Arc<JsonStore>, name: &str) -> Result<Option<MemberRow>> {
    let manager = ManagerRepo::new(store).find_record_by_name(name);
    let player = PlayerRepo::new(store).find_record_by_name(name);

    let member = match (manager, player) {
        (Some(mut merged), Some(player)) => {
            merged.extend(player);
            Some(MemberRow::Player(from_record(merged)?))
        }
        (None, Some(player)) => Some(MemberRow::Player(from_record(player)?)),
        (Some(manager), None) => Some(MemberRow::Manager(from_record(manager)?)),
        (None, None) => None,
    };

    Ok(member)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::COLLECTIONS;
    use crate::models::Position;
    use crate::repos::{CreateManagerData, CreatePlayerData};

    fn store() -> Arc<JsonStore> {
        Arc::new(JsonStore::in_memory(&COLLECTIONS))
    }

    #[test]
    fn returns_none_when_nobody_matches() {
        assert_eq!(search_by_name(&store(), "Nobody").unwrap(), None);
    }

    #[test]
    fn returns_manager_when_only_manager_matches() {
        let store = store();
        let manager = ManagerRepo::new(&store)
            .create(CreateManagerData {
                email: "arsene@arsenal.com".into(),
                name: "Arsene".into(),
            })
            .unwrap();

        assert_eq!(
            search_by_name(&store, "Arsene").unwrap(),
            Some(MemberRow::Manager(manager))
        );
    }

    #[test]
    fn merges_with_player_fields_winning() {
        let store = store();
        let manager = ManagerRepo::new(&store)
            .create(CreateManagerData {
                email: "manager@club.com".into(),
                name: "Xabi".into(),
            })
            .unwrap();
        let player = PlayerRepo::new(&store)
            .create(CreatePlayerData {
                email: "player@club.com".into(),
                name: "Xabi".into(),
                position: Position::Midfielder,
                debut: 1999,
                reports_to: manager.id.clone(),
            })
            .unwrap();

        let Some(MemberRow::Player(merged)) = search_by_name(&store, "Xabi").unwrap() else {
            panic!("expected a merged player");
        };
        assert_eq!(merged, player);
        assert_eq!(merged.email, "player@club.com");
    }
}
