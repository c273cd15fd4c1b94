//! UpdateSpacer command

use super::normalize;
use crate::error::{BoardError, Result};
use crate::locate::locate_item;
use crate::store::{BoardStore, Execute};
use crate::types::{EntityId, Item, Spacer};
use serde::Deserialize;
use tracing::debug;

/// Rename or recolor a spacer
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSpacer {
    pub id: EntityId,
    /// New name (None = don't change, Some("") = clear)
    pub name: Option<String>,
    /// New color tag (None = don't change, Some("") = clear)
    pub color_tag: Option<String>,
}

impl UpdateSpacer {
    pub fn new(id: impl Into<EntityId>) -> Self {
        Self {
            id: id.into(),
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

impl Execute for UpdateSpacer {
    type Output = Spacer;

    fn execute(&self, store: &mut BoardStore) -> Result<Spacer> {
        let id = self.id.as_str();
        let (column, index) =
            locate_item(store.board(), id).ok_or_else(|| BoardError::not_found(id))?;
        let is_spacer = store
            .board()
            .column_at(column)
            .and_then(|col| col.items.get(index))
            .is_some_and(|item| matches!(item, Item::Spacer(_)));
        if !is_spacer {
            return Err(BoardError::wrong_kind(id, "spacer"));
        }

        let Some(Item::Spacer(spacer)) = store
            .board_mut()
            .column_mut(column)
            .and_then(|col| col.items.get_mut(index))
        else {
            return Err(BoardError::wrong_kind(id, "spacer"));
        };

        if let Some(name) = &self.name {
            spacer.name = normalize(Some(name));
        }
        if let Some(color) = &self.color_tag {
            spacer.color_tag = normalize(Some(color));
        }
        debug!(spacer = id, "spacer updated");
        Ok(spacer.clone())
    }
}
