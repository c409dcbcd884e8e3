use log::warn;

use crate::layout::{sel, Patch};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrow {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselEvent {
    /// Auto-advance timer fired. Wraps around.
    Tick,
    /// A nav dot was clicked.
    Dot(usize),
    /// Arrow key. Clamps at both ends.
    Key(Arrow),
}

/// Testimonial slider.
#[derive(Debug, Clone)]
pub struct Carousel {
    len: usize,
    index: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Result<Self, String> {
        if len == 0 {
            return Err("carousel needs at least one testimonial".into());
        }
        Ok(Carousel { len, index: 0 })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Pure transition function. `None` for an event that cannot apply
    /// (a dot past the last card).
    pub fn next_index(&self, event: CarouselEvent) -> Option<usize> {
        match event {
            CarouselEvent::Tick => Some((self.index + 1) % self.len),
            CarouselEvent::Dot(i) if i < self.len => Some(i),
            CarouselEvent::Dot(_) => None,
            CarouselEvent::Key(Arrow::Left) => Some(self.index.saturating_sub(1)),
            CarouselEvent::Key(Arrow::Right) => Some((self.index + 1).min(self.len - 1)),
        }
    }

    pub fn handle(&mut self, event: CarouselEvent) -> Vec<Patch> {
        let Some(to) = self.next_index(event) else {
            warn!("testimonial event {:?} out of range (len {})", event, self.len);
            return vec![];
        };
        if to == self.index {
            return vec![];
        }
        let from = self.index;
        self.index = to;
        vec![
            Patch::remove_class(sel::testimonial(from), "active"),
            Patch::remove_class(sel::nav_dot(from), "active"),
            Patch::add_class(sel::testimonial(to), "active"),
            Patch::add_class(sel::nav_dot(to), "active"),
        ]
    }

    pub fn initial_patches(&self) -> Vec<Patch> {
        vec![
            Patch::add_class(sel::testimonial(self.index), "active"),
            Patch::add_class(sel::nav_dot(self.index), "active"),
        ]
    }
}
