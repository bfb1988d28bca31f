//! Visibility bookkeeping behind reveal-on-scroll.
//!
//! The host reports raw intersection ratios per target; the observer turns
//! them into edge-triggered [`VisibilityEvent`]s according to each target's
//! [`ObserveMode`].

use fnv::FnvHashMap;
use smallvec::SmallVec;

/// Identifies one observed element. The web layer hands these out.
pub type TargetKey = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObserveMode {
    /// Emit `Visible` once, then stop observing (reveal).
    Once,
    /// Emit `Visible`/`Hidden` on every threshold crossing (bob, toggles).
    Repeat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibilityEvent {
    pub target: TargetKey,
    pub visibility: Visibility,
    /// Set when the host should unobserve the target after this event.
    pub unobserve: bool,
}

pub type VisibilityEvents = SmallVec<[VisibilityEvent; 4]>;

#[derive(Clone, Copy, Debug)]
struct Observed {
    threshold: f64,
    mode: ObserveMode,
    visible: bool,
    revealed: bool,
}

#[derive(Default)]
pub struct ViewportObserver {
    targets: FnvHashMap<TargetKey, Observed>,
}

impl ViewportObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start observing `target`. Re-observing replaces the configuration and
    /// clears its state.
    pub fn observe(&mut self, target: TargetKey, threshold: f64, mode: ObserveMode) {
        self.targets.insert(
            target,
            Observed {
                threshold: threshold.clamp(0.0, 1.0),
                mode,
                visible: false,
                revealed: false,
            },
        );
    }

    /// Feed one intersection measurement. Unknown targets are ignored.
    pub fn report(&mut self, target: TargetKey, ratio: f64) -> Option<VisibilityEvent> {
        let entry = self.targets.get_mut(&target)?;
        // a ratio of 0 never counts, even with a zero threshold
        let now_visible = ratio > 0.0 && ratio >= entry.threshold;
        if now_visible == entry.visible {
            return None;
        }
        entry.visible = now_visible;

        match entry.mode {
            ObserveMode::Once => {
                if !now_visible || entry.revealed {
                    return None;
                }
                entry.revealed = true;
                self.targets.remove(&target);
                Some(VisibilityEvent {
                    target,
                    visibility: Visibility::Visible,
                    unobserve: true,
                })
            }
            ObserveMode::Repeat => {
                if now_visible {
                    entry.revealed = true;
                }
                Some(VisibilityEvent {
                    target,
                    visibility: if now_visible {
                        Visibility::Visible
                    } else {
                        Visibility::Hidden
                    },
                    unobserve: false,
                })
            }
        }
    }

    /// Feed a batch of measurements, as one observer callback delivers them.
    pub fn report_all(
        &mut self,
        entries: impl IntoIterator<Item = (TargetKey, f64)>,
    ) -> VisibilityEvents {
        entries
            .into_iter()
            .filter_map(|(target, ratio)| self.report(target, ratio))
            .collect()
    }

    /// Stop observing a target that left the document. Silent if unknown.
    pub fn forget(&mut self, target: TargetKey) {
        self.targets.remove(&target);
    }

    pub fn clear(&mut self) {
        self.targets.clear();
    }

    pub fn is_observing(&self, target: TargetKey) -> bool {
        self.targets.contains_key(&target)
    }

    pub fn is_visible(&self, target: TargetKey) -> bool {
        self.targets.get(&target).is_some_and(|t| t.visible)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_threshold_is_silent() {
        let mut vo = ViewportObserver::new();
        vo.observe(1, 0.25, ObserveMode::Once);
        assert_eq!(vo.report(1, 0.1), None);
        assert_eq!(vo.report(1, 0.24), None);
        assert!(vo.is_observing(1));
    }

    #[test]
    fn zero_threshold_needs_some_intersection() {
        let mut vo = ViewportObserver::new();
        vo.observe(1, 0.0, ObserveMode::Repeat);
        assert_eq!(vo.report(1, 0.0), None);
        assert!(vo.report(1, 0.01).is_some());
    }

    #[test]
    fn repeat_mode_is_edge_triggered() {
        let mut vo = ViewportObserver::new();
        vo.observe(3, 0.5, ObserveMode::Repeat);
        let first = vo.report(3, 0.6).map(|e| e.visibility);
        let again = vo.report(3, 0.9);
        let gone = vo.report(3, 0.1).map(|e| e.visibility);
        assert_eq!(first, Some(Visibility::Visible));
        assert_eq!(again, None);
        assert_eq!(gone, Some(Visibility::Hidden));
        assert!(vo.is_observing(3));
    }

    #[test]
    fn batch_report_skips_unknown_targets() {
        let mut vo = ViewportObserver::new();
        vo.observe(1, 0.2, ObserveMode::Once);
        vo.observe(2, 0.2, ObserveMode::Once);
        let events = vo.report_all([(1, 0.5), (99, 1.0), (2, 0.1)]);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].target, 1);
    }
}
