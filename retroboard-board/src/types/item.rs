//! Board items: Card, Spacer, Stack and the closed `Item` union over them

use super::ids::EntityId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A retrospective card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: EntityId,
    pub author_name: String,
    /// Free text; may embed `![gif](url)` markers (see [`crate::content`])
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub score: i64,
    /// Emoji reaction counters
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub reactions: BTreeMap<String, u32>,
}

impl Card {
    /// Create a card with a score of zero
    pub fn new(
        id: impl Into<EntityId>,
        author_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            author_name: author_name.into(),
            content: content.into(),
            score: 0,
            reactions: BTreeMap::new(),
        }
    }

    /// Set the starting score
    pub fn with_score(mut self, score: i64) -> Self {
        self.score = score;
        self
    }
}

/// A non-interactive section divider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spacer {
    pub id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Presentation hint, e.g. `bg-yellow-200`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_tag: Option<String>,
}

impl Spacer {
    /// Create an unnamed spacer
    pub fn new(id: impl Into<EntityId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            color_tag: None,
        }
    }

    /// Set the section name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the color tag
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color_tag = Some(color.into());
        self
    }
}

/// Two or more cards merged into one pile.
///
/// `cards[0]` is the card currently displayed on top. A stack never holds
/// fewer than two cards once committed; the operations that shrink a stack
/// hand back a [`Shrunk`] so the caller can replace it with a bare card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stack {
    pub id: EntityId,
    cards: Vec<Card>,
}

/// What is left of a stack after one of its cards is taken out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shrunk {
    /// Still two or more cards
    Stack(Stack),
    /// Exactly one card left; it replaces the stack
    Single(Card),
}

impl Stack {
    /// Create a stack from two cards; `base` is displayed first
    pub fn new(id: impl Into<EntityId>, base: Card, top: Card) -> Self {
        Self {
            id: id.into(),
            cards: vec![base, top],
        }
    }

    /// Cards in display order
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Number of cards in the stack
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Always false for a committed stack
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The card shown on top of the pile
    pub fn displayed(&self) -> Option<&Card> {
        self.cards.first()
    }

    /// Check whether a card with this id lives in the stack
    pub fn contains(&self, id: &str) -> bool {
        self.cards.iter().any(|c| c.id == *id)
    }

    /// Position of a card inside the stack
    pub fn position(&self, id: &str) -> Option<usize> {
        self.cards.iter().position(|c| c.id == *id)
    }

    /// Take the stack apart, preserving display order
    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }

    pub(crate) fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// First card moves to the end
    pub(crate) fn rotate_next(&mut self) {
        if !self.cards.is_empty() {
            self.cards.rotate_left(1);
        }
    }

    /// Last card moves to the front
    pub(crate) fn rotate_prev(&mut self) {
        if !self.cards.is_empty() {
            self.cards.rotate_right(1);
        }
    }

    pub(crate) fn card_mut(&mut self, id: &str) -> Option<&mut Card> {
        self.cards.iter_mut().find(|c| c.id == *id)
    }

    /// Remove the card at `slot`. Returns the removed card and the remainder.
    pub(crate) fn take(mut self, slot: usize) -> Option<(Card, Option<Shrunk>)> {
        if slot >= self.cards.len() {
            return None;
        }
        let removed = self.cards.remove(slot);
        let rest = match self.cards.len() {
            0 => None,
            1 => self.cards.pop().map(Shrunk::Single),
            _ => Some(Shrunk::Stack(self)),
        };
        Some((removed, rest))
    }
}

/// Discriminant of an [`Item`], used for logs and error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Card,
    Spacer,
    Stack,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Spacer => "spacer",
            Self::Stack => "stack",
        }
    }
}

/// Anything that can sit in a column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Item {
    Card(Card),
    Spacer(Spacer),
    Stack(Stack),
}

impl Item {
    /// Get the item's ID
    pub fn id(&self) -> &EntityId {
        match self {
            Self::Card(card) => &card.id,
            Self::Spacer(spacer) => &spacer.id,
            Self::Stack(stack) => &stack.id,
        }
    }

    /// Get the item's kind
    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Card(_) => ItemKind::Card,
            Self::Spacer(_) => ItemKind::Spacer,
            Self::Stack(_) => ItemKind::Stack,
        }
    }

    pub fn as_card(&self) -> Option<&Card> {
        match self {
            Self::Card(card) => Some(card),
            _ => None,
        }
    }

    pub fn as_stack(&self) -> Option<&Stack> {
        match self {
            Self::Stack(stack) => Some(stack),
            _ => None,
        }
    }

    /// Cards, spacers and stacks can all be hovered, but only cards and
    /// stacks accept a card dropped onto them as a stack.
    pub fn accepts_stacking(&self) -> bool {
        matches!(self, Self::Card(_) | Self::Stack(_))
    }
}

impl From<Card> for Item {
    fn from(card: Card) -> Self {
        Self::Card(card)
    }
}

impl From<Spacer> for Item {
    fn from(spacer: Spacer) -> Self {
        Self::Spacer(spacer)
    }
}

impl From<Stack> for Item {
    fn from(stack: Stack) -> Self {
        Self::Stack(stack)
    }
}

impl From<Shrunk> for Item {
    fn from(shrunk: Shrunk) -> Self {
        match shrunk {
            Shrunk::Stack(stack) => Self::Stack(stack),
            Shrunk::Single(card) => Self::Card(card),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str) -> Card {
        Card::new(id, "Alex P.", format!("content of {id}"))
    }

    #[test]
    fn test_item_serializes_with_type_tag() {
        let item = Item::from(card("card1").with_score(5));
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "card");
        assert_eq!(json["authorName"], "Alex P.");
        assert_eq!(json["score"], 5);
        assert!(json.get("reactions").is_none());
    }

    #[test]
    fn test_spacer_reads_camel_case() {
        let json = r#"{"type": "spacer", "id": "spacer2", "colorTag": "bg-yellow-200"}"#;
        let item: Item = serde_json::from_str(json).unwrap();
        let Item::Spacer(spacer) = item else {
            panic!("expected spacer");
        };
        assert_eq!(spacer.name, None);
        assert_eq!(spacer.color_tag.as_deref(), Some("bg-yellow-200"));
    }

    #[test]
    fn test_stack_rotation() {
        let mut stack = Stack::new("s1", card("a"), card("b"));
        stack.push(card("c"));
        stack.rotate_next();
        let ids: Vec<_> = stack.cards().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["b", "c", "a"]);

        stack.rotate_prev();
        stack.rotate_prev();
        let ids: Vec<_> = stack.cards().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["c", "a", "b"]);
    }

    #[test]
    fn test_stack_take_collapses_to_single() {
        let stack = Stack::new("s1", card("a"), card("b"));
        let (removed, rest) = stack.take(0).unwrap();
        assert_eq!(removed.id, "a");
        assert_eq!(rest, Some(Shrunk::Single(card("b"))));
    }

    #[test]
    fn test_stack_take_keeps_stack_of_two() {
        let mut stack = Stack::new("s1", card("a"), card("b"));
        stack.push(card("c"));
        let (_, rest) = stack.take(1).unwrap();
        match rest {
            Some(Shrunk::Stack(s)) => assert_eq!(s.len(), 2),
            other => panic!("expected a stack, got {other:?}"),
        }
    }

    #[test]
    fn test_accepts_stacking() {
        assert!(Item::from(card("a")).accepts_stacking());
        assert!(!Item::from(Spacer::new("sp")).accepts_stacking());
    }
}
