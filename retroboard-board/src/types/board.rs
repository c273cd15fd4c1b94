//! Board-level types: Board and Column

use super::ids::EntityId;
use super::item::{Card, Item, Spacer};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// An ordered container of board items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Column {
    /// Create an empty column
    pub fn new(id: impl Into<EntityId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            items: Vec::new(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append an item
    pub fn with_item(mut self, item: impl Into<Item>) -> Self {
        self.items.push(item.into());
        self
    }

    /// Index of a top-level item
    pub fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }
}

/// The whole board: an ordered sequence of columns.
///
/// Columns are shared handles, so cloning a board is cheap and mutation
/// through [`Board::column_mut`] copies only the column being changed. A
/// snapshot taken before a mutation never observes it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    columns: Vec<Arc<Column>>,
}

impl Board {
    /// Create a board from columns
    pub fn new(columns: impl IntoIterator<Item = Column>) -> Self {
        Self {
            columns: columns.into_iter().map(Arc::new).collect(),
        }
    }

    /// Columns in display order
    pub fn columns(&self) -> impl ExactSizeIterator<Item = &Column> + '_ {
        self.columns.iter().map(|c| c.as_ref())
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if the board has no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column at an index
    pub fn column_at(&self, index: usize) -> Option<&Column> {
        self.columns.get(index).map(|c| c.as_ref())
    }

    /// Find a column by ID
    pub fn find_column(&self, id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == *id).map(|c| c.as_ref())
    }

    /// Index of a column by ID
    pub fn column_index(&self, id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id == *id)
    }

    /// Mutable access to one column, copying it first if a snapshot shares it
    pub fn column_mut(&mut self, index: usize) -> Option<&mut Column> {
        self.columns.get_mut(index).map(Arc::make_mut)
    }

    /// Append a column
    pub fn push_column(&mut self, column: Column) {
        self.columns.push(Arc::new(column));
    }

    /// Move a column from one index to another (remove, then insert)
    pub(crate) fn move_column(&mut self, from: usize, to: usize) -> bool {
        crate::engine::array_move(&mut self.columns, from, to)
    }

    /// Check whether two boards share the storage of the column at `index`
    pub fn shares_column_with(&self, other: &Board, index: usize) -> bool {
        match (self.columns.get(index), other.columns.get(index)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// The three-column retrospective layout with a handful of cards
    pub fn sample() -> Self {
        Self::new([
            Column::new("col1", "What Went Well")
                .with_description("Things that made us happy or productive.")
                .with_item(Card::new("card1", "Alex P.", "Successful feature launch!").with_score(5))
                .with_item(Spacer::new("spacer1").with_name("Team Wins"))
                .with_item(
                    Card::new("card2", "Jamie S.", "Great collaboration on the new API.")
                        .with_score(3),
                ),
            Column::new("col2", "What Didn't Go So Well")
                .with_description("Obstacles or areas for improvement.")
                .with_item(Card::new("card3", "Casey L.", "Unexpected bugs in staging."))
                .with_item(
                    Card::new("card4", "Morgan R.", "Meeting overload this sprint.").with_score(2),
                )
                .with_item(Spacer::new("spacer2").with_color("bg-yellow-200"))
                .with_item(
                    Card::new("card5", "Riley B.", "Documentation needs updating.").with_score(1),
                ),
            Column::new("col3", "How Can We Improve")
                .with_description("Actionable ideas for the next sprint.")
                .with_item(
                    Card::new("card6", "Taylor K.", "Dedicate time for tech debt.").with_score(4),
                )
                .with_item(
                    Spacer::new("spacer3")
                        .with_name("Process Ideas")
                        .with_color("bg-blue-200"),
                )
                .with_item(
                    Card::new("card7", "Jordan M.", "More pair programming sessions.")
                        .with_score(2),
                )
                .with_item(Card::new("card8", "Dev Team", "Improve CI/CD pipeline speed.")),
        ])
    }
}
