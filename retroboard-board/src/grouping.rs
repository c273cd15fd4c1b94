//! Payloads for the external card-grouping service and mapping its answer
//! back onto card ids.
//!
//! The service sees a column's cards as a numbered list and answers with
//! groups of 1-based card numbers. [`GroupingRequest::resolve`] turns that
//! answer into [`CardGroup`]s that [`crate::column::ApplyGrouping`] lays out.

use crate::error::{BoardError, Result};
use crate::types::{Board, EntityId, Item};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Color tag given to every spacer created from a grouping
pub const GROUP_COLOR: &str = "bg-blue-200";

/// Name of the group collecting cards the service left out
pub const OTHER_ITEMS: &str = "Other Items";

/// One card as sent to the grouping service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupingCard {
    pub id: EntityId,
    pub content: String,
    pub author_name: String,
}

/// Request body for grouping one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupingRequest {
    pub cards: Vec<GroupingCard>,
    pub column_title: String,
}

/// A group as answered by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberedGroup {
    pub name: String,
    pub card_numbers: Vec<usize>,
}

/// A group resolved to card ids, ready to apply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardGroup {
    pub spacer_name: String,
    pub spacer_color: String,
    pub cards: Vec<EntityId>,
}

impl GroupingRequest {
    /// Collect the top-level cards of a column. Stacks and spacers are not sent.
    pub fn for_column(board: &Board, column: &str) -> Result<Self> {
        let col = board
            .find_column(column)
            .ok_or_else(|| BoardError::ColumnNotFound {
                id: column.to_string(),
            })?;
        let cards: Vec<_> = col
            .items
            .iter()
            .filter_map(Item::as_card)
            .map(|card| GroupingCard {
                id: card.id.clone(),
                content: card.content.clone(),
                author_name: card.author_name.clone(),
            })
            .collect();
        if cards.is_empty() {
            return Err(BoardError::invalid_value("cards", "no cards provided for grouping"));
        }
        Ok(Self {
            cards,
            column_title: col.title.clone(),
        })
    }

    /// The cards as the numbered list the service is asked about
    pub fn numbered_cards(&self) -> String {
        self.cards
            .iter()
            .enumerate()
            .map(|(i, card)| format!("{}. \"{}\" (by {})", i + 1, card.content, card.author_name))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Map numbered groups to card ids.
    ///
    /// Numbers outside `1..=cards.len()` are dropped. A card claimed by an
    /// earlier group is not repeated. Cards no group names end up in a
    /// trailing "Other Items" group.
    pub fn resolve(&self, groups: &[NumberedGroup]) -> Vec<CardGroup> {
        let mut claimed = HashSet::new();
        let mut resolved: Vec<CardGroup> = groups
            .iter()
            .map(|group| CardGroup {
                spacer_name: group.name.clone(),
                spacer_color: GROUP_COLOR.to_string(),
                cards: group
                    .card_numbers
                    .iter()
                    .filter_map(|n| n.checked_sub(1).and_then(|i| self.cards.get(i)))
                    .filter(|card| claimed.insert(card.id.clone()))
                    .map(|card| card.id.clone())
                    .collect(),
            })
            .collect();

        let missing: Vec<_> = self
            .cards
            .iter()
            .filter(|card| !claimed.contains(&card.id))
            .map(|card| card.id.clone())
            .collect();
        if !missing.is_empty() {
            resolved.push(CardGroup {
                spacer_name: OTHER_ITEMS.to_string(),
                spacer_color: GROUP_COLOR.to_string(),
                cards: missing,
            });
        }
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> GroupingRequest {
        GroupingRequest::for_column(&Board::sample(), "col2").unwrap()
    }

    #[test]
    fn test_for_column_sends_only_cards() {
        let request = request();
        assert_eq!(request.column_title, "What Didn't Go So Well");
        let ids: Vec<_> = request.cards.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["card3", "card4", "card5"]);
        assert!(request
            .numbered_cards()
            .starts_with("1. \"Unexpected bugs in staging.\" (by Casey L.)"));
    }

    #[test]
    fn test_resolve_drops_bad_numbers_and_collects_leftovers() {
        let groups = request().resolve(&[NumberedGroup {
            name: "Process".into(),
            card_numbers: vec![0, 2, 9, 2],
        }]);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].cards, [EntityId::from("card4")]);
        assert_eq!(groups[1].spacer_name, OTHER_ITEMS);
        assert_eq!(groups[1].cards, [EntityId::from("card3"), EntityId::from("card5")]);
        assert!(groups.iter().all(|g| g.spacer_color == GROUP_COLOR));
    }

    #[test]
    fn test_card_is_only_claimed_once() {
        let groups = request().resolve(&[
            NumberedGroup {
                name: "A".into(),
                card_numbers: vec![1, 2, 3],
            },
            NumberedGroup {
                name: "B".into(),
                card_numbers: vec![1],
            },
        ]);
        assert_eq!(groups.len(), 2);
        assert!(groups[1].cards.is_empty());
    }

    #[test]
    fn test_empty_column_is_rejected() {
        let board = Board::new([crate::types::Column::new("empty", "Empty")]);
        assert!(GroupingRequest::for_column(&board, "empty").is_err());
    }

    #[test]
    fn test_service_answer_parses() {
        let groups: Vec<NumberedGroup> =
            serde_json::from_str(r#"[{"name": "Bugs", "cardNumbers": [1, 3]}]"#).unwrap();
        assert_eq!(groups[0].card_numbers, [1, 3]);
    }
}
