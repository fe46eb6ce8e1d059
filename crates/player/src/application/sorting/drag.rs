//! Drag lifecycle controller
//!
//! One abstraction over the drag interaction, independent of input method:
//! `drag_start` names the source card, `drag_over` tracks whichever target
//! last had positional focus, and `release` resolves to exactly one move (or
//! none, when released outside every target). The view wires pointer or
//! keyboard events to these three calls; the engine never sees the events
//! themselves.

use ethicsbowl_domain::CardId;

use super::interaction::Container;

/// Tracks the single in-flight drag, if any.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    active: Option<CardId>,
    hover: Option<Container>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin dragging a card. Returns false when a drag is already active;
    /// only one drag may be in flight at a time.
    pub fn drag_start(&mut self, card: CardId) -> bool {
        if self.active.is_some() {
            return false;
        }
        self.active = Some(card);
        self.hover = None;
        true
    }

    /// Record the target currently under the pointer. `None` clears the
    /// highlight when the pointer leaves every target.
    pub fn drag_over(&mut self, target: Option<Container>) {
        if self.active.is_some() {
            self.hover = target;
        }
    }

    /// Finish the drag. Returns the resolved move when the release happened
    /// over a target; releasing elsewhere keeps the card where it was.
    pub fn release(&mut self) -> Option<(CardId, Container)> {
        let card = self.active.take()?;
        let target = self.hover.take()?;
        Some((card, target))
    }

    /// Abort the drag without resolving a move.
    pub fn cancel(&mut self) {
        self.active = None;
        self.hover = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_card(&self) -> Option<CardId> {
        self.active
    }

    /// The target that would receive the card if released now. The view
    /// uses this for drop-zone highlighting.
    pub fn hover_target(&self) -> Option<Container> {
        self.hover
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethicsbowl_domain::BucketId;

    #[test]
    fn test_drop_resolves_to_last_hovered_target() {
        let card = CardId::new();
        let b1 = Container::Bucket(BucketId::new());
        let b2 = Container::Bucket(BucketId::new());
        let mut drag = DragController::new();

        assert!(drag.drag_start(card));
        drag.drag_over(Some(b1));
        drag.drag_over(Some(b2));
        assert_eq!(drag.release(), Some((card, b2)));
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_drop_outside_any_target_is_none() {
        let card = CardId::new();
        let mut drag = DragController::new();
        drag.drag_start(card);
        drag.drag_over(Some(Container::Bank));
        drag.drag_over(None);

        assert_eq!(drag.release(), None);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_only_one_drag_at_a_time() {
        let first = CardId::new();
        let second = CardId::new();
        let mut drag = DragController::new();

        assert!(drag.drag_start(first));
        assert!(!drag.drag_start(second));
        assert_eq!(drag.active_card(), Some(first));
    }

    #[test]
    fn test_hover_ignored_without_active_drag() {
        let mut drag = DragController::new();
        drag.drag_over(Some(Container::Bank));
        assert_eq!(drag.hover_target(), None);
        assert_eq!(drag.release(), None);
    }

    #[test]
    fn test_cancel_discards_state() {
        let mut drag = DragController::new();
        drag.drag_start(CardId::new());
        drag.drag_over(Some(Container::Bank));
        drag.cancel();

        assert!(!drag.is_dragging());
        assert_eq!(drag.release(), None);
    }
}
