//! VoteCard command

use super::card_mut;
use crate::error::Result;
use crate::store::{BoardStore, Execute};
use crate::types::EntityId;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vote {
    Up,
    Down,
}

/// Move a card's score by one
#[derive(Debug, Clone, Deserialize)]
pub struct VoteCard {
    pub id: EntityId,
    pub vote: Vote,
}

impl VoteCard {
    pub fn up(id: impl Into<EntityId>) -> Self {
        Self {
            id: id.into(),
            vote: Vote::Up,
        }
    }

    pub fn down(id: impl Into<EntityId>) -> Self {
        Self {
            id: id.into(),
            vote: Vote::Down,
        }
    }
}

impl Execute for VoteCard {
    /// The new score
    type Output = i64;

    fn execute(&self, store: &mut BoardStore) -> Result<i64> {
        let card = card_mut(store, self.id.as_str())?;
        card.score += match self.vote {
            Vote::Up => 1,
            Vote::Down => -1,
        };
        debug!(card = %self.id, score = card.score, "card voted");
        Ok(card.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Board;

    #[test]
    fn test_votes_can_go_negative() {
        let mut store = BoardStore::new(Board::sample()).unwrap();
        assert_eq!(VoteCard::down("card3").execute(&mut store).unwrap(), -1);
        assert_eq!(VoteCard::down("card3").execute(&mut store).unwrap(), -2);
        assert_eq!(VoteCard::up("card3").execute(&mut store).unwrap(), -1);
    }

    #[test]
    fn test_vote_missing_card() {
        let mut store = BoardStore::new(Board::sample()).unwrap();
        assert!(VoteCard::up("ghost")
            .execute(&mut store)
            .unwrap_err()
            .is_stale_reference());
    }
}
