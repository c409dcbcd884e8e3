use std::collections::{BTreeMap, BTreeSet};

use crate::config::RevealConfig;
use crate::layout::Patch;

/// One intersection-observer record.
#[derive(Debug, Clone, PartialEq)]
pub struct Intersection {
    pub target: String,
    pub ratio: f64,
}

/// Visible fraction of an element, with the viewport's bottom edge pulled
/// up by `bottom_margin`.
pub fn visible_ratio(top: f64, height: f64, viewport_height: f64, bottom_margin: f64) -> f64 {
    if height <= 0.0 {
        return 0.0;
    }
    let bottom_edge = viewport_height - bottom_margin;
    let visible = (top + height).min(bottom_edge) - top.max(0.0);
    (visible / height).clamp(0.0, 1.0)
}

/// Animate-on-scroll markers and lazily loaded images.
#[derive(Debug, Clone)]
pub struct RevealTracker {
    config: RevealConfig,
    waiting: BTreeSet<String>,
    images: BTreeMap<String, String>,
}

impl RevealTracker {
    pub fn new(config: RevealConfig, targets: Vec<String>, images: Vec<(String, String)>) -> Self {
        RevealTracker {
            config,
            waiting: targets.into_iter().collect(),
            images: images.into_iter().collect(),
        }
    }

    pub fn waiting(&self) -> usize {
        self.waiting.len()
    }

    pub fn unloaded_images(&self) -> usize {
        self.images.len()
    }

    pub fn observe(&mut self, entries: &[Intersection]) -> Vec<Patch> {
        let mut patches = Vec::new();
        for entry in entries {
            if entry.ratio <= 0.0 {
                continue;
            }
            // Images load on any overlap; reveal animations need the threshold.
            if entry.ratio >= self.config.threshold && self.waiting.remove(&entry.target) {
                patches.push(Patch::add_class(entry.target.clone(), "aos-animate"));
            }
            if let Some(src) = self.images.remove(&entry.target) {
                patches.push(Patch::attr(entry.target.clone(), "src", src));
                patches.push(Patch::RemoveAttr {
                    el: entry.target.clone(),
                    name: "data-src".into(),
                });
            }
        }
        patches
    }

    /// Hosts without an observer report raw geometry instead.
    pub fn observe_geometry(
        &mut self,
        viewport_height: f64,
        rects: &[(String, f64, f64)],
    ) -> Vec<Patch> {
        let entries: Vec<Intersection> = rects
            .iter()
            .map(|(target, top, height)| Intersection {
                target: target.clone(),
                ratio: visible_ratio(*top, *height, viewport_height, self.config.bottom_margin),
            })
            .collect();
        self.observe(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> RevealTracker {
        RevealTracker::new(
            RevealConfig::default(),
            vec![".card:0".into()],
            vec![(".photo:0".into(), "/img/a.webp".into())],
        )
    }

    #[test]
    fn test_visible_ratio() {
        assert_eq!(visible_ratio(0.0, 100.0, 800.0, 50.0), 1.0);
        assert_eq!(visible_ratio(700.0, 100.0, 800.0, 50.0), 0.5);
        assert_eq!(visible_ratio(900.0, 100.0, 800.0, 50.0), 0.0);
        assert_eq!(visible_ratio(-50.0, 100.0, 800.0, 0.0), 0.5);
    }

    #[test]
    fn test_animates_once() {
        let mut t = tracker();
        let hit = [Intersection { target: ".card:0".into(), ratio: 0.5 }];
        assert_eq!(t.observe(&hit), vec![Patch::add_class(".card:0", "aos-animate")]);
        assert!(t.observe(&hit).is_empty());
    }

    #[test]
    fn test_below_threshold_ignored() {
        let mut t = tracker();
        t.observe(&[Intersection { target: ".card:0".into(), ratio: 0.05 }]);
        assert_eq!(t.waiting(), 1);
    }

    #[test]
    fn test_lazy_image_swaps_src_and_unobserves() {
        let mut t = tracker();
        let patches = t.observe_geometry(800.0, &[(".photo:0".into(), 100.0, 200.0)]);
        assert_eq!(patches[0], Patch::attr(".photo:0", "src", "/img/a.webp"));
        assert_eq!(t.unloaded_images(), 0);
    }
}
