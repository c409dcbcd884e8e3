use std::collections::{BTreeSet, HashMap};

use crate::form::FieldSpec;

// ── Selectors ─────────────────────────────────────────

/// Element keys shared between the page and its layout.
/// The layout treats them as opaque identifiers.
pub mod sel {
    pub const BODY: &str = "body";
    pub const NAVBAR: &str = "#navbar";
    pub const HAMBURGER: &str = "#hamburger";
    pub const NAV_MENU: &str = "#navMenu";
    pub const LOGO: &str = ".logo";
    pub const HERO: &str = ".hero-section";
    pub const SUCCESS_MODAL: &str = "#successModal";
    pub const APPOINTMENT_FORM: &str = "#appointmentForm";

    pub fn nav_link(href: &str) -> String {
        format!(".nav-link[href=\"{}\"]", href)
    }

    pub fn tab_button(pane: &str) -> String {
        format!(".tab-btn[data-tab=\"{}\"]", pane)
    }

    pub fn tab_pane(pane: &str) -> String {
        format!("#{}", pane)
    }

    pub fn testimonial(i: usize) -> String {
        format!(".testimonial-card:{}", i)
    }

    pub fn nav_dot(i: usize) -> String {
        format!(".nav-dot:{}", i)
    }

    pub fn field(name: &str) -> String {
        format!("#{}", name)
    }

    pub fn orb(i: usize) -> String {
        format!(".gradient-orb:{}", i)
    }

    pub fn modal(id: u64) -> String {
        format!("#modal-{}", id)
    }

    pub fn reply_input(modal_id: u64) -> String {
        format!("#modal-{} .reply-input", modal_id)
    }

    pub fn reply_button(modal_id: u64) -> String {
        format!("#modal-{} .reply-btn", modal_id)
    }

    pub fn category_card(category_slug: &str) -> String {
        format!(".category-card[data-category=\"{}\"]", category_slug)
    }

    pub fn post_item(i: usize) -> String {
        format!(".post-item:{}", i)
    }

    pub fn read_more(i: usize) -> String {
        format!(".blog-card:{} .read-more", i)
    }

    pub fn join_button(room_slug: &str) -> String {
        format!(".chat-room-card[data-room=\"{}\"] .join-btn", room_slug)
    }

    pub fn ripple(parent: &str, seq: u64) -> String {
        format!("{} .ripple:{}", parent, seq)
    }
}

// ── Types ─────────────────────────────────────────────

/// Geometry of one `section[id]`, read fresh on every scroll event.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: String,
    pub offset_top: f64,
    pub height: f64,
}

/// A single write against the rendered document.
#[derive(Debug, Clone, PartialEq)]
pub enum Patch {
    AddClass { el: String, class: String },
    RemoveClass { el: String, class: String },
    /// `None` clears the inline property.
    SetStyle { el: String, prop: String, value: Option<String> },
    SetText { el: String, text: String },
    SetAttr { el: String, name: String, value: String },
    RemoveAttr { el: String, name: String },
    /// Append a child element with a class and inline styles.
    Spawn { parent: String, el: String, class: String, styles: Vec<(String, String)> },
    Remove { el: String },
    MountModal { el: String, html: String },
    UnmountModal { el: String },
    ScrollTo { top: f64 },
    ScrollIntoView { el: String },
    Focus { el: String },
    /// Body `overflow: hidden` while locked, `auto` otherwise.
    ScrollLock(bool),
}

impl Patch {
    pub fn add_class(el: impl Into<String>, class: &str) -> Self {
        Patch::AddClass { el: el.into(), class: class.to_string() }
    }

    pub fn remove_class(el: impl Into<String>, class: &str) -> Self {
        Patch::RemoveClass { el: el.into(), class: class.to_string() }
    }

    pub fn style(el: impl Into<String>, prop: &str, value: impl Into<String>) -> Self {
        Patch::SetStyle { el: el.into(), prop: prop.to_string(), value: Some(value.into()) }
    }

    pub fn clear_style(el: impl Into<String>, prop: &str) -> Self {
        Patch::SetStyle { el: el.into(), prop: prop.to_string(), value: None }
    }

    pub fn text(el: impl Into<String>, text: impl Into<String>) -> Self {
        Patch::SetText { el: el.into(), text: text.into() }
    }

    pub fn attr(el: impl Into<String>, name: &str, value: impl Into<String>) -> Self {
        Patch::SetAttr { el: el.into(), name: name.to_string(), value: value.into() }
    }
}

/// The rendered document the page reads geometry from and writes patches to.
/// Implementations: `StaticLayout` (in-memory) and whatever DOM shim the host provides.
pub trait Layout {
    // ── Structure ───────────────────────────────────────────────────
    fn has(&self, el: &str) -> bool;
    fn sections(&self) -> Vec<Section>;
    fn nav_links(&self) -> Vec<String>;
    fn tab_panes(&self) -> Vec<String>;
    fn testimonial_count(&self) -> usize;
    fn form_fields(&self) -> Vec<FieldSpec>;
    fn orb_count(&self) -> usize;
    fn reveal_targets(&self) -> Vec<String>;
    /// `(element, data-src)` pairs for images that load on first sight.
    fn lazy_images(&self) -> Vec<(String, String)>;

    // ── Geometry ────────────────────────────────────────────────────
    fn offset_top(&self, el: &str) -> Option<f64>;
    fn viewport_height(&self) -> f64;

    // ── Writes ──────────────────────────────────────────────────────
    fn apply(&mut self, patch: &Patch);
}

// ── StaticLayout ──────────────────────────────────────

/// In-memory document. Structure is declared up front; every applied
/// patch is recorded so the resulting visual state can be inspected.
#[derive(Debug, Default, Clone)]
pub struct StaticLayout {
    pub elements: BTreeSet<String>,
    pub sections: Vec<Section>,
    pub nav_links: Vec<String>,
    pub tab_panes: Vec<String>,
    pub testimonials: usize,
    pub fields: Vec<FieldSpec>,
    pub orbs: usize,
    pub reveal: Vec<String>,
    pub lazy: Vec<(String, String)>,
    pub offsets: HashMap<String, f64>,
    pub viewport: f64,

    pub classes: HashMap<String, BTreeSet<String>>,
    pub styles: HashMap<(String, String), String>,
    pub texts: HashMap<String, String>,
    pub attrs: HashMap<(String, String), String>,
    pub modals: Vec<(String, String)>,
    pub scroll_y: f64,
    pub focused: Option<String>,
    pub scrolled_into_view: Option<String>,
    pub body_locked: bool,
    pub applied: Vec<Patch>,
}

impl StaticLayout {
    pub fn new() -> Self {
        StaticLayout {
            viewport: 800.0,
            ..Default::default()
        }
    }

    /// The Mindful Journey landing page: hero, about, services, community,
    /// testimonials, blog and appointment sections.
    pub fn mindful_journey() -> Self {
        use crate::form::FieldKind;

        let mut layout = StaticLayout::new();
        for el in [
            sel::BODY,
            sel::NAVBAR,
            sel::HAMBURGER,
            sel::NAV_MENU,
            sel::LOGO,
            sel::HERO,
            sel::SUCCESS_MODAL,
            sel::APPOINTMENT_FORM,
        ] {
            layout.elements.insert(el.to_string());
        }

        let mut top = 0.0;
        for (id, height) in [
            ("home", 800.0),
            ("about", 600.0),
            ("services", 700.0),
            ("community", 900.0),
            ("testimonials", 500.0),
            ("blog", 700.0),
            ("appointment", 800.0),
        ] {
            layout = layout.with_section(id, top, height);
            layout.nav_links.push(format!("#{}", id));
            top += height;
        }

        layout.tab_panes = vec!["forums".into(), "chat".into(), "posts".into()];
        for pane in layout.tab_panes.clone() {
            layout.elements.insert(sel::tab_button(&pane));
            layout.elements.insert(sel::tab_pane(&pane));
        }

        layout.testimonials = 3;
        layout.orbs = 3;
        layout.fields = vec![
            FieldSpec::new("name", FieldKind::Text, true),
            FieldSpec::new("email", FieldKind::Email, true),
            FieldSpec::new("phone", FieldKind::Tel, false),
            FieldSpec::new("service", FieldKind::Select, true),
            FieldSpec::new("date", FieldKind::Date, true),
            FieldSpec::new("message", FieldKind::TextArea, false),
        ];
        for f in layout.fields.clone() {
            layout.elements.insert(sel::field(&f.name));
        }
        layout.reveal = vec![
            ".about-card:0".into(),
            ".about-card:1".into(),
            ".service-card:0".into(),
        ];
        layout.lazy = vec![(".team-photo:0".into(), "/img/team-1.webp".into())];
        layout
    }

    pub fn with_section(mut self, id: &str, offset_top: f64, height: f64) -> Self {
        self.elements.insert(format!("#{}", id));
        self.offsets.insert(format!("#{}", id), offset_top);
        self.sections.push(Section {
            id: id.to_string(),
            offset_top,
            height,
        });
        self
    }

    pub fn has_class(&self, el: &str, class: &str) -> bool {
        self.classes
            .get(el)
            .map(|set| set.contains(class))
            .unwrap_or(false)
    }

    /// Every element currently carrying `class`.
    pub fn with_class(&self, class: &str) -> Vec<String> {
        let mut out: Vec<String> = self
            .classes
            .iter()
            .filter(|(_, set)| set.contains(class))
            .map(|(el, _)| el.clone())
            .collect();
        out.sort();
        out
    }

    pub fn style_of(&self, el: &str, prop: &str) -> Option<&str> {
        self.styles
            .get(&(el.to_string(), prop.to_string()))
            .map(|s| s.as_str())
    }

    pub fn attr_of(&self, el: &str, name: &str) -> Option<&str> {
        self.attrs
            .get(&(el.to_string(), name.to_string()))
            .map(|s| s.as_str())
    }
}

impl Layout for StaticLayout {
    fn has(&self, el: &str) -> bool {
        self.elements.contains(el)
            || self
                .modals
                .iter()
                .any(|(id, _)| el == id || el.starts_with(&format!("{} ", id)))
    }

    fn sections(&self) -> Vec<Section> {
        self.sections.clone()
    }

    fn nav_links(&self) -> Vec<String> {
        self.nav_links.clone()
    }

    fn tab_panes(&self) -> Vec<String> {
        self.tab_panes.clone()
    }

    fn testimonial_count(&self) -> usize {
        self.testimonials
    }

    fn form_fields(&self) -> Vec<FieldSpec> {
        self.fields.clone()
    }

    fn orb_count(&self) -> usize {
        self.orbs
    }

    fn reveal_targets(&self) -> Vec<String> {
        self.reveal.clone()
    }

    fn lazy_images(&self) -> Vec<(String, String)> {
        self.lazy.clone()
    }

    fn offset_top(&self, el: &str) -> Option<f64> {
        self.offsets.get(el).copied()
    }

    fn viewport_height(&self) -> f64 {
        self.viewport
    }

    fn apply(&mut self, patch: &Patch) {
        match patch {
            Patch::AddClass { el, class } => {
                self.classes.entry(el.clone()).or_default().insert(class.clone());
            }
            Patch::RemoveClass { el, class } => {
                if let Some(set) = self.classes.get_mut(el) {
                    set.remove(class);
                }
            }
            Patch::SetStyle { el, prop, value } => {
                let key = (el.clone(), prop.clone());
                match value {
                    Some(v) => {
                        self.styles.insert(key, v.clone());
                    }
                    None => {
                        self.styles.remove(&key);
                    }
                }
            }
            Patch::SetText { el, text } => {
                self.texts.insert(el.clone(), text.clone());
            }
            Patch::SetAttr { el, name, value } => {
                self.attrs.insert((el.clone(), name.clone()), value.clone());
            }
            Patch::RemoveAttr { el, name } => {
                self.attrs.remove(&(el.clone(), name.clone()));
            }
            Patch::Spawn { el, class, styles, .. } => {
                self.elements.insert(el.clone());
                self.classes.entry(el.clone()).or_default().insert(class.clone());
                for (prop, value) in styles {
                    self.styles.insert((el.clone(), prop.clone()), value.clone());
                }
            }
            Patch::Remove { el } => {
                self.elements.remove(el);
                self.classes.remove(el);
                self.styles.retain(|(e, _), _| e != el);
            }
            Patch::MountModal { el, html } => {
                self.modals.push((el.clone(), html.clone()));
            }
            Patch::UnmountModal { el } => {
                self.modals.retain(|(id, _)| id != el);
            }
            Patch::ScrollTo { top } => {
                self.scroll_y = *top;
            }
            Patch::ScrollIntoView { el } => {
                self.scrolled_into_view = Some(el.clone());
            }
            Patch::Focus { el } => {
                self.focused = Some(el.clone());
            }
            Patch::ScrollLock(locked) => {
                self.body_locked = *locked;
            }
        }
        self.applied.push(patch.clone());
    }
}
