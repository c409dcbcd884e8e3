use log::warn;

use crate::layout::{sel, Patch};

/// Community tabs. Exactly one pane (and its button) is active.
#[derive(Debug, Clone)]
pub struct TabSet {
    panes: Vec<String>,
    active: usize,
}

impl TabSet {
    pub fn new(panes: Vec<String>) -> Result<Self, String> {
        if panes.is_empty() {
            return Err("tab set needs at least one pane".into());
        }
        Ok(TabSet { panes, active: 0 })
    }

    pub fn active(&self) -> &str {
        &self.panes[self.active]
    }

    pub fn panes(&self) -> &[String] {
        &self.panes
    }

    /// Pure transition: index of the pane that would be active after
    /// selecting `name`, or `None` if there is no such pane.
    pub fn next(&self, name: &str) -> Option<usize> {
        self.panes.iter().position(|p| p == name)
    }

    /// Patches that put the initial pane on screen.
    pub fn initial_patches(&self) -> Vec<Patch> {
        self.activate_patches(self.active)
    }

    pub fn select(&mut self, name: &str) -> Vec<Patch> {
        let Some(to) = self.next(name) else {
            warn!("tab '{}' has no pane", name);
            return vec![];
        };
        if to == self.active {
            return vec![];
        }
        self.active = to;
        self.activate_patches(to)
    }

    fn activate_patches(&self, to: usize) -> Vec<Patch> {
        let mut patches = Vec::with_capacity(self.panes.len() * 2);
        for (i, pane) in self.panes.iter().enumerate() {
            if i == to {
                patches.push(Patch::add_class(sel::tab_button(pane), "active"));
                patches.push(Patch::add_class(sel::tab_pane(pane), "active"));
            } else {
                patches.push(Patch::remove_class(sel::tab_button(pane), "active"));
                patches.push(Patch::remove_class(sel::tab_pane(pane), "active"));
            }
        }
        patches
    }
}
