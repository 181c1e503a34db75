//! Selection capture and restoration across focus loss.
//!
//! Toolbar buttons take focus away from the editing surface before their
//! click handler runs, so the surface's selection is gone by the time a
//! command executes. The tracker saves the selection on every interaction
//! that may precede focus loss and puts it back right before dispatch.

use crate::platform::SelectionPlatform;

/// Saves and re-applies the user's selection on an editing surface.
pub trait SelectionService<S: SelectionPlatform + ?Sized> {
    /// Read the surface's active selection and keep a copy.
    fn capture(&mut self, surface: &S);

    /// Re-apply the most recent capture. Returns whether it succeeded.
    fn restore(&self, surface: &mut S) -> bool;

    /// Whether anything was ever captured.
    fn has_capture(&self) -> bool;

    /// The most recent capture, if any.
    fn captured(&self) -> Option<&S::Range>;
}

/// Default selection service: remembers the last range the platform reported.
#[derive(Debug, Clone)]
pub struct SelectionTracker<R> {
    captured: Option<R>,
}

impl<R> Default for SelectionTracker<R> {
    fn default() -> Self {
        Self { captured: None }
    }
}

impl<R> SelectionTracker<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the capture.
    pub fn clear(&mut self) {
        self.captured = None;
    }
}

impl<S> SelectionService<S> for SelectionTracker<S::Range>
where
    S: SelectionPlatform + ?Sized,
{
    fn capture(&mut self, surface: &S) {
        // No active range (e.g. focus moved outside the document): keep the
        // previous capture rather than wiping it.
        if let Some(range) = surface.current_range() {
            tracing::trace!(target: "webdevmonk::selection", ?range, "captured selection");
            self.captured = Some(range);
        }
    }

    fn restore(&self, surface: &mut S) -> bool {
        let Some(range) = &self.captured else {
            tracing::debug!(target: "webdevmonk::selection", "no captured selection to restore");
            return false;
        };
        match surface.apply_range(range) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(
                    target: "webdevmonk::selection",
                    ?range,
                    error = %e,
                    "captured selection no longer applies"
                );
                false
            }
        }
    }

    fn has_capture(&self) -> bool {
        self.captured.is_some()
    }

    fn captured(&self) -> Option<&S::Range> {
        self.captured.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MarkupDocument;
    use crate::platform::EditingSurface;
    use crate::types::Selection;

    #[test]
    fn restore_without_capture_fails() {
        let mut doc = MarkupDocument::from_markup("<p>hello</p>");
        let tracker = SelectionTracker::<Selection>::new();
        assert!(!SelectionService::<MarkupDocument>::has_capture(&tracker));
        assert!(!tracker.restore(&mut doc));
    }

    #[test]
    fn capture_then_restore_round_trips() {
        let mut doc = MarkupDocument::from_markup("<p>hello world</p>");
        doc.select(Selection::new(9, 3));

        let mut tracker = SelectionTracker::<Selection>::new();
        tracker.capture(&doc);

        doc.select(Selection::collapsed(0));
        assert!(tracker.restore(&mut doc));
        assert_eq!(doc.selection(), Some(Selection::new(9, 3)));
    }

    #[test]
    fn capture_keeps_previous_when_platform_has_none() {
        let mut doc = MarkupDocument::from_markup("<p>hello</p>");
        doc.select(Selection::new(3, 5));

        let mut tracker = SelectionTracker::<Selection>::new();
        tracker.capture(&doc);

        doc.clear_selection();
        tracker.capture(&doc);
        assert_eq!(
            SelectionService::<MarkupDocument>::captured(&tracker),
            Some(&Selection::new(3, 5))
        );
    }

    #[test]
    fn stale_capture_fails_to_restore() {
        let mut doc = MarkupDocument::from_markup("<p>hello world</p>");
        doc.select(Selection::collapsed(16));

        let mut tracker = SelectionTracker::<Selection>::new();
        tracker.capture(&doc);

        doc.set_markup("<p>hi</p>");
        assert!(!tracker.restore(&mut doc));
    }
}
