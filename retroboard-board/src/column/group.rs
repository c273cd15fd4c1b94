//! ApplyGrouping command

use crate::error::{BoardError, Result};
use crate::grouping::CardGroup;
use crate::store::{BoardStore, Execute};
use crate::types::{EntityId, Item, Spacer};
use serde::Deserialize;
use std::collections::HashSet;
use tracing::debug;

/// Lay a column out as groups: a spacer per group followed by its cards.
///
/// Ids that are not top-level cards of the column are skipped, and a group
/// with nothing left gets no spacer. Items no group claims keep their order
/// after the groups.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplyGrouping {
    pub column: EntityId,
    pub groups: Vec<CardGroup>,
}

impl ApplyGrouping {
    pub fn new(column: impl Into<EntityId>, groups: Vec<CardGroup>) -> Self {
        Self {
            column: column.into(),
            groups,
        }
    }
}

impl Execute for ApplyGrouping {
    /// Ids of the spacers created
    type Output = Vec<EntityId>;

    fn execute(&self, store: &mut BoardStore) -> Result<Vec<EntityId>> {
        let index = store
            .board()
            .column_index(self.column.as_str())
            .ok_or_else(|| BoardError::ColumnNotFound {
                id: self.column.to_string(),
            })?;
        let column = store
            .board_mut()
            .column_mut(index)
            .ok_or_else(|| BoardError::ColumnNotFound {
                id: self.column.to_string(),
            })?;

        let mut remaining: Vec<Option<Item>> = column.items.drain(..).map(Some).collect();
        let mut laid_out = Vec::with_capacity(remaining.len() + self.groups.len());
        let mut spacers = Vec::new();
        let mut placed = HashSet::new();

        for group in &self.groups {
            let cards: Vec<Item> = group
                .cards
                .iter()
                .filter(|id| placed.insert((*id).clone()))
                .filter_map(|id| {
                    remaining
                        .iter_mut()
                        .find(|slot| matches!(slot, Some(Item::Card(card)) if card.id == *id))
                        .and_then(Option::take)
                })
                .collect();
            if cards.is_empty() {
                continue;
            }

            let spacer = Spacer::new(EntityId::new())
                .with_name(group.spacer_name.clone())
                .with_color(group.spacer_color.clone());
            spacers.push(spacer.id.clone());
            laid_out.push(Item::Spacer(spacer));
            laid_out.extend(cards);
        }
        laid_out.extend(remaining.into_iter().flatten());
        column.items = laid_out;

        debug!(column = %self.column, groups = spacers.len(), "grouping applied");
        Ok(spacers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::{GroupingRequest, NumberedGroup};
    use crate::types::Board;
    use crate::validate::validate;

    #[test]
    fn test_apply_grouping_lays_out_spacers_and_cards() {
        let mut store = BoardStore::new(Board::sample()).unwrap();
        let groups = GroupingRequest::for_column(store.board(), "col2")
            .unwrap()
            .resolve(&[NumberedGroup {
                name: "Quality".into(),
                card_numbers: vec![3, 1],
            }]);

        let spacers = ApplyGrouping::new("col2", groups).execute(&mut store).unwrap();
        assert_eq!(spacers.len(), 2);

        let items = &store.board().find_column("col2").unwrap().items;
        let kinds: Vec<_> = items
            .iter()
            .map(|i| match i {
                Item::Spacer(s) => s.name.clone().unwrap_or_else(|| s.id.to_string()),
                other => other.id().to_string(),
            })
            .collect();
        assert_eq!(
            kinds,
            ["Quality", "card5", "card3", "Other Items", "card4", "spacer2"]
        );
        assert!(validate(store.board()).is_ok());
    }

    #[test]
    fn test_unknown_ids_are_skipped() {
        let mut store = BoardStore::new(Board::sample()).unwrap();
        let before = store.board().find_column("col1").unwrap().items.clone();
        let spacers = ApplyGrouping::new(
            "col1",
            vec![CardGroup {
                spacer_name: "Ghosts".into(),
                spacer_color: "bg-blue-200".into(),
                cards: vec!["card5".into(), "nope".into()],
            }],
        )
        .execute(&mut store)
        .unwrap();

        assert!(spacers.is_empty());
        assert_eq!(store.board().find_column("col1").unwrap().items, before);
    }
}
