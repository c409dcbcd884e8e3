//! Page coordinator.
//!
//! `Page` owns every widget on the landing page together with the layout
//! and the submission sink. The host feeds it one `PageEvent` at a time;
//! `dispatch` runs the matching transition, writes the resulting patches to
//! the layout and hands them back. Handlers run to completion, so widgets
//! never observe each other mid-update.

use chrono::NaiveDate;
use log::{debug, error, info, warn};
use std::collections::BTreeSet;

use crate::boot;
use crate::carousel::{Arrow, Carousel, CarouselEvent};
use crate::config::SiteConfig;
use crate::form::{self, FieldKind, Form, SubmitOutcome, INVALID_BORDER};
use crate::layout::{sel, Layout, Patch};
use crate::models::{blog, community, forum};
use crate::nav::{self, ScrollTracker};
use crate::overlay::{CloseReason, ModalHandle, ModalKind, ModalSpec, OverlayManager};
use crate::render::Views;
use crate::reveal::{Intersection, RevealTracker};
use crate::submit::{Submission, SubmissionSink};
use crate::tabs::TabSet;
use crate::timers::{TimerQueue, TimerTask};

pub const JOINED_BACKGROUND: &str = "#10b981";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Other,
}

/// Button geometry at click time, in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    Load,
    Scroll { y: f64 },
    Intersect(Vec<Intersection>),
    NavLinkClick { href: String },
    HamburgerClick,
    LogoClick,
    AnchorClick { href: String },
    TabClick { pane: String },
    DotClick { index: usize },
    Key(Key),
    /// Time passes. The host reports its monotonic clock in milliseconds;
    /// the first reading sets the origin for everything queued so far.
    Tick { now_ms: u64 },
    FieldInput { name: String, value: String },
    FieldBlur { name: String },
    FieldChange { name: String, value: String },
    Submit,
    CloseClick,
    /// Click inside the overlay; `on_backdrop` is false when it landed on content.
    OverlayClick { on_backdrop: bool },
    CategoryClick { category: String },
    /// Post row inside the open forum-category modal.
    ForumPostClick { index: usize },
    ReplyInput { text: String },
    ReplySubmit,
    PostItemClick { index: usize },
    ReadMore { index: usize },
    JoinRoom { room: String },
    ResourceClick { name: String },
    ButtonClick { el: String, x: f64, y: f64, rect: Rect },
}

#[derive(Debug, Default)]
struct ReplyDraft {
    text: String,
    posted: bool,
}

pub struct Page<L: Layout> {
    config: SiteConfig,
    layout: L,
    sink: Box<dyn SubmissionSink>,
    views: Views,
    nav: ScrollTracker,
    reveal: RevealTracker,
    overlay: OverlayManager,
    tabs: TabSet,
    carousel: Carousel,
    form: Form,
    timers: TimerQueue,
    reply: ReplyDraft,
    joining: BTreeSet<String>,
    ripple_seq: u64,
    today: fn() -> NaiveDate,
}

impl<L: Layout> Page<L> {
    pub fn new(config: SiteConfig, layout: L, sink: Box<dyn SubmissionSink>) -> Result<Self, String> {
        let report = boot::check(&layout);
        if !report.passed() {
            return Err(format!("Boot check failed: {}", report.errors.join(", ")));
        }

        let views = Views::new()?;
        let tabs = TabSet::new(layout.tab_panes())?;
        let carousel = Carousel::new(layout.testimonial_count())?;
        let form = Form::new("appointment", &layout.form_fields());
        let nav = ScrollTracker::new(config.nav.clone(), layout.nav_links());
        let reveal = RevealTracker::new(
            config.reveal.clone(),
            layout.reveal_targets(),
            layout.lazy_images(),
        );

        let mut timers = TimerQueue::new();
        timers.every(config.carousel.interval_ms, TimerTask::AdvanceTestimonial);

        let mut page = Page {
            config,
            layout,
            sink,
            views,
            nav,
            reveal,
            overlay: OverlayManager::new(),
            tabs,
            carousel,
            form,
            timers,
            reply: ReplyDraft::default(),
            joining: BTreeSet::new(),
            ripple_seq: 0,
            today: form::today_local,
        };
        page.wire();
        info!("Page ready: {} tab(s), {} testimonial(s)", page.tabs.panes().len(), page.carousel.len());
        Ok(page)
    }

    /// Replace the source of "today" used for date checks.
    pub fn with_today(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self.wire_date_min();
        self
    }

    fn wire(&mut self) {
        let mut patches = self.tabs.initial_patches();
        patches.extend(self.carousel.initial_patches());
        self.apply(&patches);
        self.wire_date_min();
    }

    fn wire_date_min(&mut self) {
        let min = form::date_min_attribute((self.today)());
        let patches: Vec<Patch> = self
            .form
            .fields()
            .iter()
            .filter(|f| f.kind == FieldKind::Date)
            .map(|f| Patch::attr(sel::field(&f.name), "min", min.clone()))
            .collect();
        self.apply(&patches);
    }

    fn apply(&mut self, patches: &[Patch]) {
        for p in patches {
            self.layout.apply(p);
        }
    }

    // ── Accessors ───────────────────────────────────────────────────

    pub fn layout(&self) -> &L {
        &self.layout
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn overlay(&self) -> &OverlayManager {
        &self.overlay
    }

    pub fn scroll_locked(&self) -> bool {
        self.overlay.scroll_locked()
    }

    pub fn tabs(&self) -> &TabSet {
        &self.tabs
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn nav(&self) -> &ScrollTracker {
        &self.nav
    }

    /// Host clock as of the last `Tick`.
    pub fn clock_ms(&self) -> u64 {
        self.timers.now()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    // ── Dispatch ────────────────────────────────────────────────────

    pub fn dispatch(&mut self, event: PageEvent) -> Vec<Patch> {
        let patches = self.update(event);
        self.apply(&patches);
        patches
    }

    fn update(&mut self, event: PageEvent) -> Vec<Patch> {
        match event {
            PageEvent::Load => {
                self.timers.after(self.config.feedback.fade_in_ms, TimerTask::FadeIn);
                vec![Patch::style(sel::BODY, "opacity", "0")]
            }
            PageEvent::Scroll { y } => {
                let sections = self.layout.sections();
                let mut patches = self.nav.on_scroll(y, &sections);
                if self.layout.has(sel::HERO) {
                    patches.extend(nav::parallax(
                        y,
                        self.layout.viewport_height(),
                        self.layout.orb_count(),
                    ));
                }
                patches
            }
            PageEvent::Intersect(entries) => self.reveal.observe(&entries),
            PageEvent::NavLinkClick { href } => {
                let mut patches = self.nav.link_click(&href);
                patches.extend(self.scroll_to_anchor(&href));
                patches
            }
            PageEvent::HamburgerClick => self.nav.toggle_menu(),
            PageEvent::LogoClick => vec![Patch::ScrollTo { top: 0.0 }],
            PageEvent::AnchorClick { href } => self.scroll_to_anchor(&href),
            PageEvent::TabClick { pane } => self.tabs.select(&pane),
            PageEvent::DotClick { index } => self.carousel.handle(CarouselEvent::Dot(index)),
            PageEvent::Key(Key::ArrowLeft) => self.carousel.handle(CarouselEvent::Key(Arrow::Left)),
            PageEvent::Key(Key::ArrowRight) => self.carousel.handle(CarouselEvent::Key(Arrow::Right)),
            PageEvent::Key(Key::Other) => vec![],
            PageEvent::Tick { now_ms } => {
                let mut patches = Vec::new();
                for task in self.timers.advance(now_ms) {
                    patches.extend(self.run_task(task));
                }
                patches
            }
            PageEvent::FieldInput { name, value } => self.form.input(&name, &value),
            PageEvent::FieldBlur { name } => self.form.blur(&name, (self.today)()),
            PageEvent::FieldChange { name, value } => self.form.change(&name, &value, (self.today)()),
            PageEvent::Submit => self.submit_appointment(),
            PageEvent::CloseClick => match self.overlay.current() {
                Some((handle, _)) => self.overlay.close(handle, CloseReason::CloseButton),
                None => vec![],
            },
            PageEvent::OverlayClick { on_backdrop } => match self.overlay.current() {
                Some((handle, _)) => self.overlay.backdrop_click(handle, on_backdrop),
                None => vec![],
            },
            PageEvent::CategoryClick { category } => self.open_category(&category),
            PageEvent::ForumPostClick { index } => self.open_discussion(index),
            PageEvent::ReplyInput { text } => self.reply_input(text),
            PageEvent::ReplySubmit => self.reply_submit(),
            PageEvent::PostItemClick { index } => {
                info!("Opening post");
                self.press(sel::post_item(index), "translateX(5px)", self.config.feedback.post_press_ms)
            }
            PageEvent::ReadMore { index } => self.open_blog(index),
            PageEvent::JoinRoom { room } => self.join_room(&room),
            PageEvent::ResourceClick { name } => {
                if !community::is_resource(&name) {
                    debug!("click on unlisted resource '{}'", name);
                }
                info!("Accessing resource: {}", name);
                vec![]
            }
            PageEvent::ButtonClick { el, x, y, rect } => self.ripple(el, x, y, rect),
        }
    }

    fn run_task(&mut self, task: TimerTask) -> Vec<Patch> {
        match task {
            TimerTask::AdvanceTestimonial => self.carousel.handle(CarouselEvent::Tick),
            TimerTask::ReleasePress { el } => vec![Patch::clear_style(el, "transform")],
            TimerTask::OpenCategory { category } => {
                let html = self.views.forum_category(&category);
                self.open_modal(ModalKind::ForumCategory { category }, html)
            }
            TimerTask::OpenBlog { post } => match blog::find(post) {
                Some(article) => {
                    let html = self.views.blog(article);
                    self.open_modal(ModalKind::Blog { post }, html)
                }
                None => vec![],
            },
            TimerTask::JoinComplete { button, room } => {
                info!("Joining {}", room);
                vec![
                    Patch::text(button.clone(), "Joined ✓"),
                    Patch::style(button, "background", JOINED_BACKGROUND),
                ]
            }
            TimerTask::RemoveRipple { el } => vec![Patch::Remove { el }],
            TimerTask::CloseDiscussion(handle) => self.overlay.close(handle, CloseReason::Completed),
            TimerTask::FadeIn => vec![
                Patch::style(sel::BODY, "transition", "opacity 0.5s ease"),
                Patch::style(sel::BODY, "opacity", "1"),
            ],
        }
    }

    // ── Navigation ──────────────────────────────────────────────────

    fn scroll_to_anchor(&self, href: &str) -> Vec<Patch> {
        match self.layout.offset_top(href) {
            Some(top) => vec![Patch::ScrollTo {
                top: self.nav.anchor_target(top),
            }],
            None => {
                debug!("anchor {} has no target", href);
                vec![]
            }
        }
    }

    // ── Appointment form ────────────────────────────────────────────

    fn submit_appointment(&mut self) -> Vec<Patch> {
        let today = (self.today)();
        let (outcome, mut patches) = self.form.submit(today);
        match outcome {
            SubmitOutcome::Blocked { first_invalid, .. } => {
                info!("Appointment not sent: '{}' needs attention", first_invalid);
                patches
            }
            SubmitOutcome::Accepted(fields) => {
                let submission = Submission::new(&self.form.name, fields);
                if let Err(e) = self.sink.submit(&submission) {
                    error!("Failed to hand off appointment {}: {}", submission.id, e);
                    return patches;
                }
                let (_, opened) = self.overlay.open(ModalSpec::success());
                patches.extend(opened);
                patches.extend(self.form.reset());
                patches
            }
        }
    }

    // ── Community ───────────────────────────────────────────────────

    fn press(&mut self, el: String, transform: &str, release_ms: u64) -> Vec<Patch> {
        self.timers
            .after(release_ms, TimerTask::ReleasePress { el: el.clone() });
        vec![Patch::style(el, "transform", transform)]
    }

    fn open_modal(&mut self, kind: ModalKind, html: Result<String, String>) -> Vec<Patch> {
        match html {
            Ok(html) => {
                self.reply = ReplyDraft::default();
                let (_, patches) = self.overlay.open(ModalSpec::rendered(kind, html));
                patches
            }
            Err(e) => {
                error!("{:?} not shown: {}", kind, e);
                vec![]
            }
        }
    }

    /// Card press first; the forum modal opens once the press is released.
    fn open_category(&mut self, category: &str) -> Vec<Patch> {
        let delay = self.config.feedback.card_press_ms;
        let patches = self.press(sel::category_card(&slug::slugify(category)), "scale(0.95)", delay);
        self.timers.after(
            delay,
            TimerTask::OpenCategory {
                category: category.to_string(),
            },
        );
        patches
    }

    fn open_discussion(&mut self, index: usize) -> Vec<Patch> {
        let category = match self.overlay.current() {
            Some((_, ModalKind::ForumCategory { category })) => category.clone(),
            _ => {
                warn!("forum post {} clicked with no category open", index);
                return vec![];
            }
        };
        let Some(post) = forum::find_post(&category, index) else {
            warn!("category '{}' has no post {}", category, index);
            return vec![];
        };
        let html = self.views.discussion(&category, post, forum::sample_replies());
        self.open_modal(ModalKind::Discussion { category, post: index }, html)
    }

    fn current_discussion(&self) -> Option<ModalHandle> {
        match self.overlay.current() {
            Some((handle, ModalKind::Discussion { .. })) => Some(handle),
            _ => None,
        }
    }

    fn reply_input(&mut self, text: String) -> Vec<Patch> {
        let Some(handle) = self.current_discussion() else {
            return vec![];
        };
        let was_empty = self.reply.text.trim().is_empty();
        self.reply.text = text;
        if was_empty && !self.reply.text.trim().is_empty() {
            return vec![Patch::clear_style(sel::reply_input(handle.id()), "border-color")];
        }
        vec![]
    }

    fn reply_submit(&mut self) -> Vec<Patch> {
        let Some(handle) = self.current_discussion() else {
            warn!("reply submitted with no discussion open");
            return vec![];
        };
        if self.reply.posted {
            return vec![];
        }
        if self.reply.text.trim().is_empty() {
            return vec![Patch::style(
                sel::reply_input(handle.id()),
                "border-color",
                INVALID_BORDER,
            )];
        }

        self.reply.posted = true;
        info!("Reply posted ({} chars)", self.reply.text.trim().chars().count());
        self.timers.after(
            self.config.feedback.reply_close_ms,
            TimerTask::CloseDiscussion(handle),
        );
        vec![
            Patch::text(sel::reply_button(handle.id()), "Reply posted ✓"),
            Patch::attr(sel::reply_button(handle.id()), "disabled", "true"),
            Patch::attr(sel::reply_input(handle.id()), "value", ""),
        ]
    }

    fn open_blog(&mut self, index: usize) -> Vec<Patch> {
        let Some(post) = blog::find(index) else {
            warn!("blog card {} has no article", index);
            return vec![];
        };
        info!("Reading: {}", post.title);
        let delay = self.config.feedback.read_more_ms;
        let patches = self.press(sel::read_more(index), "translateX(10px)", delay);
        self.timers.after(delay, TimerTask::OpenBlog { post: index });
        patches
    }

    fn join_room(&mut self, room: &str) -> Vec<Patch> {
        if !community::is_chat_room(room) {
            warn!("join clicked for unknown room '{}'", room);
            return vec![];
        }
        if !self.joining.insert(room.to_string()) {
            return vec![];
        }
        let button = sel::join_button(&slug::slugify(room));
        self.timers.after(
            self.config.feedback.join_delay_ms,
            TimerTask::JoinComplete {
                button: button.clone(),
                room: room.to_string(),
            },
        );
        vec![
            Patch::text(button.clone(), "Joining..."),
            Patch::attr(button, "disabled", "true"),
        ]
    }

    fn ripple(&mut self, el: String, x: f64, y: f64, rect: Rect) -> Vec<Patch> {
        self.ripple_seq += 1;
        let size = rect.width.max(rect.height);
        let ripple = sel::ripple(&el, self.ripple_seq);
        self.timers.after(
            self.config.feedback.ripple_ms,
            TimerTask::RemoveRipple { el: ripple.clone() },
        );
        vec![Patch::Spawn {
            parent: el,
            el: ripple,
            class: "ripple".into(),
            styles: vec![
                ("width".into(), format!("{}px", size)),
                ("height".into(), format!("{}px", size)),
                ("left".into(), format!("{}px", x - rect.left - size / 2.0)),
                ("top".into(), format!("{}px", y - rect.top - size / 2.0)),
            ],
        }]
    }
}
