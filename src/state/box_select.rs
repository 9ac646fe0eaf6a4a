// Box selection - rubber-band drag over item rectangles
use egui::{Pos2, Rect};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

pub const DEFAULT_DRAG_THRESHOLD: f32 = 5.0;

/// Source of on-screen item rectangles, addressed by slot.
///
/// `generation` must change whenever slots are added, removed or moved so
/// cached hit lists can be invalidated.
pub trait SpatialIndex {
    fn len(&self) -> usize;
    fn entry(&self, slot: usize) -> Option<(&str, Rect)>;
    fn generation(&self) -> u64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Id to rectangle map kept alive across pointer moves and patched
/// incrementally as the layout changes.
#[derive(Debug, Default)]
pub struct RectIndex {
    rects: Vec<(String, Rect)>,
    slots: HashMap<String, usize>,
    generation: u64,
}

impl RectIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert(&mut self, id: &str, rect: Rect) {
        match self.slots.get(id) {
            Some(&slot) => {
                if self.rects[slot].1 == rect {
                    return;
                }
                self.rects[slot].1 = rect;
            }
            None => {
                self.slots.insert(id.to_string(), self.rects.len());
                self.rects.push((id.to_string(), rect));
            }
        }
        self.generation += 1;
    }

    pub fn remove(&mut self, id: &str) -> Option<Rect> {
        let slot = self.slots.remove(id)?;
        let (_, rect) = self.rects.swap_remove(slot);
        if let Some((moved, _)) = self.rects.get(slot) {
            self.slots.insert(moved.clone(), slot);
        }
        self.generation += 1;
        Some(rect)
    }

    pub fn get(&self, id: &str) -> Option<Rect> {
        self.slots.get(id).map(|&slot| self.rects[slot].1)
    }

    pub fn clear(&mut self) {
        if self.rects.is_empty() {
            return;
        }
        self.rects.clear();
        self.slots.clear();
        self.generation += 1;
    }
}

impl SpatialIndex for RectIndex {
    fn len(&self) -> usize {
        self.rects.len()
    }

    fn entry(&self, slot: usize) -> Option<(&str, Rect)> {
        self.rects.get(slot).map(|(id, rect)| (id.as_str(), *rect))
    }

    fn generation(&self) -> u64 {
        self.generation
    }
}

/// Separating-axis test. Rectangles that only share an edge intersect.
pub fn rects_intersect(a: &Rect, b: &Rect) -> bool {
    !(a.max.x < b.min.x || a.min.x > b.max.x || a.max.y < b.min.y || a.min.y > b.max.y)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoxMode {
    /// Drag result overwrites the selection
    Replace,
    /// Drag result is unioned with the selection at drag start (modifier held)
    Add,
}

#[derive(Debug)]
struct Drag {
    origin: Pos2,
    current: Pos2,
    mode: BoxMode,
    base: Arc<HashSet<String>>,
    engaged: bool,
    published: bool,
    index_generation: u64,
}

#[derive(Debug)]
pub struct BoxSelect {
    threshold: f32,
    drag: Option<Drag>,
    hits: Vec<usize>,
    last_hits: Vec<usize>,
}

impl Default for BoxSelect {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_THRESHOLD)
    }
}

impl BoxSelect {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            drag: None,
            hits: Vec::new(),
            last_hits: Vec::new(),
        }
    }

    pub fn begin(&mut self, origin: Pos2, mode: BoxMode, base: Arc<HashSet<String>>) {
        self.hits.clear();
        self.last_hits.clear();
        self.drag = Some(Drag {
            origin,
            current: origin,
            mode,
            base,
            engaged: false,
            published: false,
            index_generation: 0,
        });
    }

    /// Feeds one pointer move. Returns the new selection when it differs
    /// from the last one produced during this drag.
    pub fn update<I: SpatialIndex + ?Sized>(
        &mut self,
        point: Pos2,
        index: &I,
    ) -> Option<Arc<HashSet<String>>> {
        let drag = self.drag.as_mut()?;
        drag.current = point;
        if !drag.engaged {
            if drag.origin.distance(point) < self.threshold {
                return None;
            }
            drag.engaged = true;
        }

        let rect = Rect::from_two_pos(drag.origin, point);
        self.hits.clear();
        for slot in 0..index.len() {
            if let Some((_, item_rect)) = index.entry(slot) {
                if rects_intersect(&rect, &item_rect) {
                    self.hits.push(slot);
                }
            }
        }

        let generation = index.generation();
        if drag.published && drag.index_generation == generation && self.hits == self.last_hits {
            return None;
        }
        drag.published = true;
        drag.index_generation = generation;
        std::mem::swap(&mut self.hits, &mut self.last_hits);
        tracing::trace!(hits = self.last_hits.len(), "box select updated");

        let mut next = match drag.mode {
            BoxMode::Replace => HashSet::with_capacity(self.last_hits.len()),
            BoxMode::Add => (*drag.base).clone(),
        };
        next.extend(
            self.last_hits
                .iter()
                .filter_map(|&slot| index.entry(slot))
                .map(|(id, _)| id.to_string()),
        );
        Some(Arc::new(next))
    }

    /// Ends the drag. Returns true if the drag ever engaged, so the caller
    /// can tell a click from a box selection.
    pub fn end(&mut self) -> bool {
        self.hits.clear();
        self.last_hits.clear();
        self.drag.take().map(|d| d.engaged).unwrap_or(false)
    }

    pub fn is_engaged(&self) -> bool {
        self.drag.as_ref().map(|d| d.engaged).unwrap_or(false)
    }

    /// Normalized marquee rectangle for drawing, once engaged.
    pub fn selection_rect(&self) -> Option<Rect> {
        self.drag
            .as_ref()
            .filter(|d| d.engaged)
            .map(|d| Rect::from_two_pos(d.origin, d.current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn rect(x0: f32, y0: f32, x1: f32, y1: f32) -> Rect {
        Rect::from_min_max(pos2(x0, y0), pos2(x1, y1))
    }

    fn grid() -> RectIndex {
        let mut index = RectIndex::new();
        index.upsert("a", rect(0.0, 0.0, 10.0, 10.0));
        index.upsert("b", rect(20.0, 0.0, 30.0, 10.0));
        index.upsert("c", rect(0.0, 20.0, 10.0, 30.0));
        index
    }

    fn sorted(set: &HashSet<String>) -> Vec<&str> {
        let mut v: Vec<&str> = set.iter().map(String::as_str).collect();
        v.sort();
        v
    }

    #[test]
    fn test_intersection_edges() {
        let r = rect(10.0, 10.0, 20.0, 20.0);
        // Fully containing
        assert!(rects_intersect(&rect(0.0, 0.0, 30.0, 30.0), &r));
        // Overlapping an edge by one unit
        assert!(rects_intersect(&rect(0.0, 0.0, 11.0, 11.0), &r));
        // Strictly outside
        assert!(!rects_intersect(&rect(0.0, 0.0, 9.0, 9.0), &r));
        assert!(!rects_intersect(&rect(21.0, 0.0, 40.0, 40.0), &r));
    }

    #[test]
    fn test_short_drag_does_not_engage() {
        let index = grid();
        let mut bs = BoxSelect::new(5.0);
        bs.begin(pos2(1.0, 1.0), BoxMode::Replace, Arc::default());
        assert!(bs.update(pos2(3.0, 3.0), &index).is_none());
        assert!(!bs.is_engaged());
        assert!(!bs.end());
    }

    #[test]
    fn test_reverse_drag_is_normalized() {
        let index = grid();
        let mut bs = BoxSelect::default();
        bs.begin(pos2(25.0, 25.0), BoxMode::Replace, Arc::default());
        let set = bs.update(pos2(5.0, 5.0), &index).unwrap();
        assert_eq!(sorted(&set), vec!["a", "b", "c"]);
        assert_eq!(bs.selection_rect(), Some(rect(5.0, 5.0, 25.0, 25.0)));
    }

    #[test]
    fn test_unchanged_hits_are_not_republished() {
        let index = grid();
        let mut bs = BoxSelect::default();
        bs.begin(pos2(-5.0, -5.0), BoxMode::Replace, Arc::default());
        let first = bs.update(pos2(12.0, 12.0), &index).unwrap();
        assert_eq!(sorted(&first), vec!["a"]);
        assert!(bs.update(pos2(13.0, 13.0), &index).is_none());
        let grown = bs.update(pos2(25.0, 12.0), &index).unwrap();
        assert_eq!(sorted(&grown), vec!["a", "b"]);
    }

    #[test]
    fn test_add_mode_unions_with_base() {
        let index = grid();
        let base: HashSet<String> = ["z".to_string()].into_iter().collect();
        let mut bs = BoxSelect::default();
        bs.begin(pos2(-5.0, 15.0), BoxMode::Add, Arc::new(base));
        let set = bs.update(pos2(12.0, 35.0), &index).unwrap();
        assert_eq!(sorted(&set), vec!["c", "z"]);
        assert!(bs.end());
    }

    #[test]
    fn test_index_changes_force_recompute() {
        let mut index = grid();
        let mut bs = BoxSelect::default();
        bs.begin(pos2(-5.0, -5.0), BoxMode::Replace, Arc::default());
        assert!(bs.update(pos2(12.0, 12.0), &index).is_some());
        index.remove("a");
        index.upsert("d", rect(1.0, 1.0, 2.0, 2.0));
        let set = bs.update(pos2(12.0, 12.0), &index).unwrap();
        assert_eq!(sorted(&set), vec!["d"]);
    }

    #[test]
    fn test_rect_index_remove_keeps_slots_consistent() {
        let mut index = grid();
        assert_eq!(index.remove("a"), Some(rect(0.0, 0.0, 10.0, 10.0)));
        assert_eq!(index.get("c"), Some(rect(0.0, 20.0, 10.0, 30.0)));
        assert_eq!(index.len(), 2);
        let gen = index.generation();
        index.upsert("b", rect(20.0, 0.0, 30.0, 10.0));
        assert_eq!(index.generation(), gen);
    }
}
