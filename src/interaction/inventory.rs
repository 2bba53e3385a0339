use std::fmt;

use crate::world::ObjectId;

/// Which hand performs the next pick-up or drop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Hand {
    Left,
    #[default]
    Right,
}

impl Hand {
    pub fn other(self) -> Self {
        match self {
            Hand::Left => Hand::Right,
            Hand::Right => Hand::Left,
        }
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hand::Left => write!(f, "LEFT"),
            Hand::Right => write!(f, "RIGHT"),
        }
    }
}

/// The two hand slots plus the currently selected hand.
///
/// An object is held in at most one slot at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandSlots {
    left: Option<ObjectId>,
    right: Option<ObjectId>,
    selected: Hand,
}

impl HandSlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Hand {
        self.selected
    }

    /// Flips the selected hand and returns the new selection
    pub fn switch(&mut self) -> Hand {
        self.selected = self.selected.other();
        self.selected
    }

    pub fn held(&self, hand: Hand) -> Option<ObjectId> {
        match hand {
            Hand::Left => self.left,
            Hand::Right => self.right,
        }
    }

    /// Object in the selected hand, if any
    pub fn selected_item(&self) -> Option<ObjectId> {
        self.held(self.selected)
    }

    pub fn contains(&self, object: ObjectId) -> bool {
        self.left == Some(object) || self.right == Some(object)
    }

    /// Puts `object` into the selected hand.
    ///
    /// Returns the hand used, or `None` when the selected hand is already full
    /// or the object is already held.
    pub fn stow(&mut self, object: ObjectId) -> Option<Hand> {
        if self.selected_item().is_some() || self.contains(object) {
            return None;
        }
        let hand = self.selected;
        *self.slot_mut(hand) = Some(object);
        Some(hand)
    }

    /// Empties the given hand, returning what it held
    pub fn take(&mut self, hand: Hand) -> Option<ObjectId> {
        self.slot_mut(hand).take()
    }

    fn slot_mut(&mut self, hand: Hand) -> &mut Option<ObjectId> {
        match hand {
            Hand::Left => &mut self.left,
            Hand::Right => &mut self.right,
        }
    }
}
