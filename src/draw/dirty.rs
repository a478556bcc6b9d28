//! Dirty region tracking for incremental repaint.
//!
//! Collects axis-aligned rectangles touched by drawing operations so a host
//! only needs to copy those areas of the bitmap to the screen.

use crate::util::Rect;

/// Rectangles kept before the tracker gives up and marks the whole surface.
pub const MAX_DIRTY_REGIONS: usize = 256;

/// Tracks dirty rectangles accumulated between host repaints.
#[derive(Debug, Default)]
pub struct DirtyTracker {
    regions: Vec<Rect>,
    force_full: bool,
}

impl DirtyTracker {
    /// Creates a new, empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the entire surface as dirty. Clears any accumulated rectangles.
    pub fn mark_full(&mut self) {
        self.force_full = true;
        self.regions.clear();
    }

    /// Adds a dirty rectangle if the tracker is not already full.
    ///
    /// Once more than [`MAX_DIRTY_REGIONS`] rectangles pile up without a
    /// drain, the tracker switches to a full-surface repaint.
    pub fn mark_rect(&mut self, rect: Rect) {
        if !rect.is_valid() || self.force_full {
            return;
        }
        self.regions.push(rect);
        if self.regions.len() > MAX_DIRTY_REGIONS {
            log::debug!(
                "More than {MAX_DIRTY_REGIONS} dirty regions pending, repainting everything"
            );
            self.mark_full();
        }
    }

    /// Adds a dirty rectangle when present.
    pub fn mark_optional_rect(&mut self, rect: Option<Rect>) {
        if let Some(rect) = rect {
            self.mark_rect(rect);
        }
    }

    /// Returns true when nothing has been drawn since the last drain.
    pub fn is_clean(&self) -> bool {
        !self.force_full && self.regions.is_empty()
    }

    /// Drains the dirty regions gathered so far.
    ///
    /// When the full surface is marked, returns a single rectangle covering the
    /// entire surface; otherwise returns accumulated rectangles.
    pub fn take_regions(&mut self, width: i32, height: i32) -> Vec<Rect> {
        if self.force_full {
            self.force_full = false;
            self.regions.clear();
            Rect::new(0, 0, width, height).into_iter().collect()
        } else {
            self.regions.drain(..).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_rect_records_rectangles() {
        let mut tracker = DirtyTracker::new();
        assert!(tracker.is_clean());
        tracker.mark_rect(Rect::new(1, 2, 3, 4).unwrap());
        assert!(!tracker.is_clean());

        let rects = tracker.take_regions(100, 100);
        assert_eq!(rects, vec![Rect::new(1, 2, 3, 4).unwrap()]);
        assert!(tracker.is_clean());
    }

    #[test]
    fn mark_full_takes_precedence() {
        let mut tracker = DirtyTracker::new();
        tracker.mark_rect(Rect::new(5, 5, 10, 10).unwrap());
        tracker.mark_full();
        tracker.mark_optional_rect(Rect::new(20, 20, 15, 15));

        let rects = tracker.take_regions(200, 100);
        assert_eq!(rects.len(), 1);
        assert_eq!(rects[0], Rect::new(0, 0, 200, 100).unwrap());
    }

    #[test]
    fn too_many_regions_collapse_to_full_surface() {
        let mut tracker = DirtyTracker::new();
        for i in 0..MAX_DIRTY_REGIONS as i32 {
            tracker.mark_rect(Rect::new(i % 50, i / 50, 1, 1).unwrap());
        }
        assert_eq!(tracker.take_regions(50, 50).len(), MAX_DIRTY_REGIONS);

        for i in 0..=MAX_DIRTY_REGIONS as i32 {
            tracker.mark_rect(Rect::new(i % 50, i / 50, 1, 1).unwrap());
        }
        assert_eq!(
            tracker.take_regions(50, 50),
            vec![Rect::new(0, 0, 50, 50).unwrap()]
        );
        assert!(tracker.is_clean());
    }

    #[test]
    fn full_mark_on_empty_surface_yields_nothing() {
        let mut tracker = DirtyTracker::new();
        tracker.mark_full();
        assert!(tracker.take_regions(0, 0).is_empty());
        assert!(tracker.is_clean());
    }
}
