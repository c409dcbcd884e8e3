use log::debug;

use crate::config::NavConfig;
use crate::layout::{sel, Patch, Section};

/// Tracks which section the reader is in and keeps the navbar in step.
#[derive(Debug, Clone)]
pub struct ScrollTracker {
    config: NavConfig,
    links: Vec<String>,
    active: Option<String>,
    scrolled: bool,
    menu_open: bool,
}

/// Section whose band contains `scroll_y`. Later sections win when bands
/// overlap, since the offset pulls every band up by the same amount.
pub fn current_section<'a>(sections: &'a [Section], scroll_y: f64, offset: f64) -> Option<&'a str> {
    let mut current = None;
    for s in sections {
        let top = s.offset_top - offset;
        if scroll_y > top && scroll_y <= top + s.height {
            current = Some(s.id.as_str());
        }
    }
    current
}

impl ScrollTracker {
    pub fn new(config: NavConfig, links: Vec<String>) -> Self {
        ScrollTracker {
            config,
            links,
            active: None,
            scrolled: false,
            menu_open: false,
        }
    }

    pub fn active_link(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn on_scroll(&mut self, scroll_y: f64, sections: &[Section]) -> Vec<Patch> {
        let mut patches = Vec::new();

        let scrolled = scroll_y > self.config.scrolled_threshold;
        if scrolled != self.scrolled {
            self.scrolled = scrolled;
            patches.push(if scrolled {
                Patch::add_class(sel::NAVBAR, "scrolled")
            } else {
                Patch::remove_class(sel::NAVBAR, "scrolled")
            });
        }

        if let Some(id) = current_section(sections, scroll_y, self.config.section_offset) {
            let href = format!("#{}", id);
            // A section without a nav entry clears the highlight.
            let next = self.links.iter().find(|l| **l == href).cloned();
            patches.extend(self.set_active(next));
        }
        patches
    }

    pub fn link_click(&mut self, href: &str) -> Vec<Patch> {
        let mut patches = self.close_menu();
        if self.links.iter().any(|l| l == href) {
            patches.extend(self.set_active(Some(href.to_string())));
        } else {
            debug!("nav click on unregistered link {}", href);
        }
        patches
    }

    pub fn toggle_menu(&mut self) -> Vec<Patch> {
        self.menu_open = !self.menu_open;
        if self.menu_open {
            vec![
                Patch::add_class(sel::HAMBURGER, "active"),
                Patch::add_class(sel::NAV_MENU, "active"),
            ]
        } else {
            vec![
                Patch::remove_class(sel::HAMBURGER, "active"),
                Patch::remove_class(sel::NAV_MENU, "active"),
            ]
        }
    }

    fn close_menu(&mut self) -> Vec<Patch> {
        self.menu_open = false;
        vec![
            Patch::remove_class(sel::HAMBURGER, "active"),
            Patch::remove_class(sel::NAV_MENU, "active"),
        ]
    }

    fn set_active(&mut self, next: Option<String>) -> Vec<Patch> {
        if next == self.active {
            return vec![];
        }
        let mut patches = Vec::new();
        if let Some(prev) = self.active.take() {
            patches.push(Patch::remove_class(sel::nav_link(&prev), "active"));
        }
        if let Some(href) = &next {
            patches.push(Patch::add_class(sel::nav_link(href), "active"));
        }
        self.active = next;
        patches
    }

    /// Scroll target for an in-page anchor, clear of the fixed header.
    pub fn anchor_target(&self, offset_top: f64) -> f64 {
        offset_top - self.config.anchor_offset
    }
}

/// Hero orbs drift at different speeds while the hero is on screen.
pub fn parallax(scroll_y: f64, viewport_height: f64, orbs: usize) -> Vec<Patch> {
    if scroll_y >= viewport_height {
        return vec![];
    }
    (0..orbs)
        .map(|i| {
            let speed = 0.5 + i as f64 * 0.2;
            Patch::style(
                sel::orb(i),
                "transform",
                format!("translateY({}px)", scroll_y * speed),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections() -> Vec<Section> {
        vec![
            Section { id: "home".into(), offset_top: 0.0, height: 800.0 },
            Section { id: "about".into(), offset_top: 800.0, height: 600.0 },
            Section { id: "quote".into(), offset_top: 1400.0, height: 200.0 },
        ]
    }

    fn tracker() -> ScrollTracker {
        ScrollTracker::new(NavConfig::default(), vec!["#home".into(), "#about".into()])
    }

    #[test]
    fn test_current_section_uses_offset() {
        let s = sections();
        assert_eq!(current_section(&s, 10.0, 100.0), Some("home"));
        // 100px before about's top edge, about takes over.
        assert_eq!(current_section(&s, 700.0, 100.0), Some("home"));
        assert_eq!(current_section(&s, 701.0, 100.0), Some("about"));
        assert_eq!(current_section(&s, 5000.0, 100.0), None);
    }

    #[test]
    fn test_navbar_scrolled_threshold() {
        let mut t = tracker();
        assert!(!t.on_scroll(50.0, &[]).contains(&Patch::add_class("#navbar", "scrolled")));
        assert!(t.on_scroll(51.0, &[]).contains(&Patch::add_class("#navbar", "scrolled")));
        assert!(t.is_scrolled());
        assert!(t.on_scroll(0.0, &[]).contains(&Patch::remove_class("#navbar", "scrolled")));
    }

    #[test]
    fn test_scroll_moves_highlight() {
        let mut t = tracker();
        t.on_scroll(10.0, &sections());
        assert_eq!(t.active_link(), Some("#home"));
        let patches = t.on_scroll(900.0, &sections());
        assert_eq!(t.active_link(), Some("#about"));
        assert!(patches.contains(&Patch::remove_class(sel::nav_link("#home"), "active")));
        assert!(patches.contains(&Patch::add_class(sel::nav_link("#about"), "active")));
    }

    #[test]
    fn test_section_without_link_clears_highlight() {
        let mut t = tracker();
        t.on_scroll(10.0, &sections());
        t.on_scroll(1400.0, &sections());
        assert_eq!(t.active_link(), None);
    }

    #[test]
    fn test_no_section_leaves_highlight() {
        let mut t = tracker();
        t.on_scroll(900.0, &sections());
        t.on_scroll(9000.0, &sections());
        assert_eq!(t.active_link(), Some("#about"));
    }

    #[test]
    fn test_link_click_closes_menu() {
        let mut t = tracker();
        t.toggle_menu();
        assert!(t.menu_open());
        t.link_click("#about");
        assert!(!t.menu_open());
        assert_eq!(t.active_link(), Some("#about"));
    }

    #[test]
    fn test_parallax_speeds() {
        let p = parallax(100.0, 800.0, 3);
        assert_eq!(p[0], Patch::style(".gradient-orb:0", "transform", "translateY(50px)"));
        assert_eq!(p[2], Patch::style(".gradient-orb:2", "transform", "translateY(90px)"));
        assert!(parallax(800.0, 800.0, 3).is_empty());
    }

    #[test]
    fn test_anchor_target() {
        assert_eq!(tracker().anchor_target(800.0), 720.0);
    }
}
