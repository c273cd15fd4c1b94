//! AddSpacer command

use super::normalize;
use crate::error::{BoardError, Result};
use crate::store::{BoardStore, Execute};
use crate::types::{EntityId, Item, Spacer};
use serde::Deserialize;
use tracing::debug;

/// Append a section divider to a column
#[derive(Debug, Clone, Deserialize)]
pub struct AddSpacer {
    pub column: EntityId,
    pub name: Option<String>,
    pub color_tag: Option<String>,
}

impl AddSpacer {
    pub fn new(column: impl Into<EntityId>) -> Self {
        Self {
            column: column.into(),
            name: None,
            color_tag: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_color(mut self, color_tag: impl Into<String>) -> Self {
        self.color_tag = Some(color_tag.into());
        self
    }
}

impl Execute for AddSpacer {
    type Output = Spacer;

    fn execute(&self, store: &mut BoardStore) -> Result<Spacer> {
        let index = store
            .board()
            .column_index(self.column.as_str())
            .ok_or_else(|| BoardError::ColumnNotFound {
                id: self.column.to_string(),
            })?;

        let spacer = Spacer {
            id: EntityId::new(),
            name: normalize(self.name.as_deref()),
            color_tag: normalize(self.color_tag.as_deref()),
        };
        if let Some(column) = store.board_mut().column_mut(index) {
            column.items.push(Item::Spacer(spacer.clone()));
        }
        debug!(spacer = %spacer.id, column = %self.column, "spacer added");
        Ok(spacer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Board;

    #[test]
    fn test_blank_name_becomes_none() {
        let mut store = BoardStore::new(Board::sample()).unwrap();
        let spacer = AddSpacer::new("col1")
            .with_name("   ")
            .with_color("bg-green-200")
            .execute(&mut store)
            .unwrap();

        assert_eq!(spacer.name, None);
        assert_eq!(spacer.color_tag.as_deref(), Some("bg-green-200"));
        let last = store.board().column_at(0).unwrap().items.last().unwrap();
        assert_eq!(last, &Item::Spacer(spacer));
    }

    #[test]
    fn test_unknown_column() {
        let mut store = BoardStore::new(Board::sample()).unwrap();
        assert!(AddSpacer::new("nope").execute(&mut store).is_err());
    }
}
