#![cfg(test)]

use chrono::{Local, NaiveDate};
use std::cell::RefCell;
use std::rc::Rc;

use crate::config::SiteConfig;
use crate::form::{FieldStatus, INVALID_BORDER, VALID_BORDER};
use crate::layout::{sel, Layout, Patch, StaticLayout};
use crate::models::forum;
use crate::overlay::ModalKind;
use crate::page::{Key, Page, PageEvent, Rect};
use crate::render::EMPTY_CATEGORY;
use crate::submit::Submission;

type Sent = Rc<RefCell<Vec<Submission>>>;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Landing page wired to a sink that records every submission.
/// The host clock has not been read yet.
fn fresh_page() -> (Page<StaticLayout>, Sent) {
    init_logger();
    let sent: Sent = Rc::new(RefCell::new(Vec::new()));
    let recorder = sent.clone();
    let sink = move |s: &Submission| -> Result<(), String> {
        recorder.borrow_mut().push(s.clone());
        Ok(())
    };
    let page = Page::new(
        SiteConfig::default(),
        StaticLayout::mindful_journey(),
        Box::new(sink),
    )
    .expect("landing page should boot");
    (page, sent)
}

/// Same page with its clock started at zero.
fn test_page() -> (Page<StaticLayout>, Sent) {
    let (mut page, sent) = fresh_page();
    page.dispatch(PageEvent::Tick { now_ms: 0 });
    (page, sent)
}

/// Let `ms` pass on the page clock.
fn wait(page: &mut Page<StaticLayout>, ms: u64) -> Vec<Patch> {
    let now_ms = page.clock_ms() + ms;
    page.dispatch(PageEvent::Tick { now_ms })
}

fn open_category(page: &mut Page<StaticLayout>, category: &str) {
    page.dispatch(PageEvent::CategoryClick {
        category: category.into(),
    });
    wait(page, 200);
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn ymd(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

fn input(page: &mut Page<StaticLayout>, name: &str, value: &str) {
    page.dispatch(PageEvent::FieldInput {
        name: name.into(),
        value: value.into(),
    });
}

fn change(page: &mut Page<StaticLayout>, name: &str, value: &str) {
    page.dispatch(PageEvent::FieldChange {
        name: name.into(),
        value: value.into(),
    });
}

fn fill_valid(page: &mut Page<StaticLayout>) {
    input(page, "name", "Ada Lovelace");
    input(page, "email", "ada@example.org");
    input(page, "phone", "555-0100");
    change(page, "service", "individual");
    change(page, "date", "2099-01-01");
    input(page, "message", "Looking forward to it");
}

// ═══════════════════════════════════════════════════════════
// Boot
// ═══════════════════════════════════════════════════════════

#[test]
fn page_refuses_incomplete_layout() {
    init_logger();
    let result = Page::new(
        SiteConfig::default(),
        StaticLayout::new(),
        Box::new(crate::submit::LogSink),
    );
    let err = result.err().expect("empty layout must not boot");
    assert!(err.contains("Boot check failed"));
}

#[test]
fn page_boot_activates_first_tab_and_testimonial() {
    let (page, _) = test_page();
    let l = page.layout();
    assert!(l.has_class(&sel::tab_button("forums"), "active"));
    assert!(l.has_class(&sel::tab_pane("forums"), "active"));
    assert!(l.has_class(&sel::testimonial(0), "active"));
    assert!(l.has_class(&sel::nav_dot(0), "active"));
    assert_eq!(l.attr_of("#date", "min"), Some(ymd(today()).as_str()));
}

#[test]
fn page_date_min_follows_injected_today() {
    let (page, _) = test_page();
    let page = page.with_today(|| NaiveDate::from_ymd_opt(2030, 6, 1).unwrap());
    assert_eq!(page.layout().attr_of("#date", "min"), Some("2030-06-01"));
}

// ═══════════════════════════════════════════════════════════
// Navigation
// ═══════════════════════════════════════════════════════════

#[test]
fn scroll_highlights_current_section() {
    let (mut page, _) = test_page();
    page.dispatch(PageEvent::Scroll { y: 900.0 });
    assert_eq!(page.nav().active_link(), Some("#about"));
    assert!(page.layout().has_class(&sel::nav_link("#about"), "active"));
    assert!(page.layout().has_class(sel::NAVBAR, "scrolled"));

    page.dispatch(PageEvent::Scroll { y: 1500.0 });
    assert!(page.layout().has_class(&sel::nav_link("#services"), "active"));
    assert!(!page.layout().has_class(&sel::nav_link("#about"), "active"));
}

#[test]
fn scroll_drives_parallax_only_inside_hero() {
    let (mut page, _) = test_page();
    page.dispatch(PageEvent::Scroll { y: 100.0 });
    assert_eq!(
        page.layout().style_of(&sel::orb(0), "transform"),
        Some("translateY(50px)")
    );
    let patches = page.dispatch(PageEvent::Scroll { y: 2000.0 });
    assert!(!patches
        .iter()
        .any(|p| matches!(p, Patch::SetStyle { prop, .. } if prop == "transform")));
}

#[test]
fn nav_click_scrolls_below_header_and_closes_menu() {
    let (mut page, _) = test_page();
    page.dispatch(PageEvent::HamburgerClick);
    assert!(page.layout().has_class(sel::NAV_MENU, "active"));

    page.dispatch(PageEvent::NavLinkClick {
        href: "#services".into(),
    });
    assert!(!page.layout().has_class(sel::NAV_MENU, "active"));
    assert!(!page.layout().has_class(sel::HAMBURGER, "active"));
    assert_eq!(page.layout().scroll_y, 1400.0 - 80.0);
    assert!(page.layout().has_class(&sel::nav_link("#services"), "active"));
}

#[test]
fn logo_and_missing_anchor() {
    let (mut page, _) = test_page();
    page.dispatch(PageEvent::AnchorClick { href: "#blog".into() });
    assert_eq!(page.layout().scroll_y, 3500.0 - 80.0);
    assert!(page
        .dispatch(PageEvent::AnchorClick {
            href: "#nowhere".into()
        })
        .is_empty());
    page.dispatch(PageEvent::LogoClick);
    assert_eq!(page.layout().scroll_y, 0.0);
}

// ═══════════════════════════════════════════════════════════
// Tabs & carousel
// ═══════════════════════════════════════════════════════════

#[test]
fn exactly_one_tab_active_after_every_selection() {
    let (mut page, _) = test_page();
    let panes = page.tabs().panes().to_vec();
    for pane in panes.iter().rev().chain(panes.iter()) {
        page.dispatch(PageEvent::TabClick { pane: pane.clone() });
        let active = page.layout().with_class("active");
        let buttons: Vec<_> = active.iter().filter(|e| e.starts_with(".tab-btn")).collect();
        let shown: Vec<_> = active
            .iter()
            .filter(|e| panes.iter().any(|p| **e == sel::tab_pane(p)))
            .collect();
        assert_eq!(buttons, vec![&sel::tab_button(pane)]);
        assert_eq!(shown, vec![&sel::tab_pane(pane)]);
    }
}

#[test]
fn testimonials_auto_advance_and_wrap() {
    let (mut page, _) = test_page();
    page.dispatch(PageEvent::Tick { now_ms: 4999 });
    assert_eq!(page.carousel().index(), 0);
    page.dispatch(PageEvent::Tick { now_ms: 5000 });
    assert_eq!(page.carousel().index(), 1);
    page.dispatch(PageEvent::Tick { now_ms: 10_000 });
    assert_eq!(page.carousel().index(), 2);
    page.dispatch(PageEvent::Tick { now_ms: 15_000 });
    assert_eq!(page.carousel().index(), 0);
    assert!(page.layout().has_class(&sel::testimonial(0), "active"));
    assert!(!page.layout().has_class(&sel::testimonial(2), "active"));
}

#[test]
fn long_idle_advances_testimonial_once() {
    let (mut page, _) = test_page();
    let patches = page.dispatch(PageEvent::Tick { now_ms: 50_000_000 });
    assert_eq!(page.carousel().index(), 1);
    assert!(patches.len() <= 4, "{} patches", patches.len());
    wait(&mut page, 4999);
    assert_eq!(page.carousel().index(), 1);
    wait(&mut page, 1);
    assert_eq!(page.carousel().index(), 2);
}

#[test]
fn clock_starts_at_first_host_reading() {
    let (mut page, _) = fresh_page();
    page.dispatch(PageEvent::Load);
    let start = 1_700_000_000_000;
    assert!(page.dispatch(PageEvent::Tick { now_ms: start }).is_empty());
    assert_eq!(page.carousel().index(), 0);

    page.dispatch(PageEvent::Tick { now_ms: start + 100 });
    assert_eq!(page.layout().style_of(sel::BODY, "opacity"), Some("1"));
    page.dispatch(PageEvent::Tick { now_ms: start + 5000 });
    assert_eq!(page.carousel().index(), 1);
}

#[test]
fn testimonial_arrow_keys_clamp() {
    let (mut page, _) = test_page();
    page.dispatch(PageEvent::Key(Key::ArrowLeft));
    assert_eq!(page.carousel().index(), 0);

    page.dispatch(PageEvent::DotClick { index: 2 });
    page.dispatch(PageEvent::Key(Key::ArrowRight));
    assert_eq!(page.carousel().index(), 2);
    assert!(page.layout().has_class(&sel::nav_dot(2), "active"));

    page.dispatch(PageEvent::Key(Key::ArrowLeft));
    assert_eq!(page.carousel().index(), 1);
    assert!(page.dispatch(PageEvent::Key(Key::Other)).is_empty());
}

// ═══════════════════════════════════════════════════════════
// Appointment form
// ═══════════════════════════════════════════════════════════

#[test]
fn date_field_against_local_today() {
    let (mut page, _) = test_page();
    let status = |page: &Page<StaticLayout>| page.form().field("date").unwrap().status;

    change(&mut page, "date", "2099-01-01");
    assert_eq!(status(&page), FieldStatus::Valid);

    change(&mut page, "date", &ymd(today().pred_opt().unwrap()));
    assert_eq!(status(&page), FieldStatus::Invalid);
    assert_eq!(page.layout().style_of("#date", "border-color"), Some(INVALID_BORDER));

    change(&mut page, "date", &ymd(today()));
    assert_eq!(status(&page), FieldStatus::Valid);
}

#[test]
fn email_field_on_blur() {
    let (mut page, _) = test_page();
    input(&mut page, "email", "a@b.c");
    page.dispatch(PageEvent::FieldBlur { name: "email".into() });
    assert_eq!(page.layout().style_of("#email", "border-color"), Some(VALID_BORDER));

    input(&mut page, "email", "not-an-email");
    assert_eq!(page.layout().style_of("#email", "border-color"), None);
    page.dispatch(PageEvent::FieldBlur { name: "email".into() });
    assert_eq!(page.layout().style_of("#email", "border-color"), Some(INVALID_BORDER));
}

#[test]
fn field_marker_independent_of_form_validity() {
    let (mut page, _) = test_page();
    input(&mut page, "name", "Ada");
    page.dispatch(PageEvent::FieldBlur { name: "name".into() });
    // Rest of the form is empty, name still shows green.
    assert_eq!(page.layout().style_of("#name", "border-color"), Some(VALID_BORDER));
}

#[test]
fn valid_submission_resets_form_and_shows_confirmation() {
    let (mut page, sent) = test_page();
    fill_valid(&mut page);
    page.dispatch(PageEvent::Submit);

    let sent = sent.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].form, "appointment");
    assert_eq!(sent[0].fields["email"], "ada@example.org");
    assert_eq!(sent[0].fields["date"], "2099-01-01");

    assert!(page.form().fields().iter().all(|f| f.value.is_empty()));
    assert!(page.form().fields().iter().all(|f| f.status == FieldStatus::Neutral));
    for f in page.form().fields() {
        assert_eq!(page.layout().style_of(&sel::field(&f.name), "border-color"), None);
    }
    assert!(page.layout().has_class(sel::SUCCESS_MODAL, "active"));
    assert!(page.scroll_locked());
    assert!(page.layout().body_locked);
}

#[test]
fn submission_with_empty_required_field_is_blocked() {
    let (mut page, sent) = test_page();
    fill_valid(&mut page);
    input(&mut page, "name", "   ");
    page.dispatch(PageEvent::Submit);

    assert!(sent.borrow().is_empty());
    assert_eq!(page.form().field("email").unwrap().value, "ada@example.org");
    assert_eq!(page.form().field("name").unwrap().value, "   ");
    assert!(!page.layout().has_class(sel::SUCCESS_MODAL, "active"));
    assert!(!page.scroll_locked());
    assert!(!page.layout().body_locked);
    assert_eq!(page.layout().focused.as_deref(), Some("#name"));
    assert_eq!(page.layout().scrolled_into_view.as_deref(), Some("#name"));
    assert_eq!(page.layout().style_of("#name", "border-color"), Some(INVALID_BORDER));
    assert_eq!(page.layout().style_of("#email", "border-color"), Some(VALID_BORDER));
}

#[test]
fn failed_handoff_keeps_form_intact() {
    init_logger();
    let sink = |_: &Submission| -> Result<(), String> { Err("endpoint down".into()) };
    let mut page = Page::new(
        SiteConfig::default(),
        StaticLayout::mindful_journey(),
        Box::new(sink),
    )
    .unwrap();
    fill_valid(&mut page);
    page.dispatch(PageEvent::Submit);
    assert_eq!(page.form().field("name").unwrap().value, "Ada Lovelace");
    assert!(!page.scroll_locked());
}

#[test]
fn success_modal_closes_by_button_and_backdrop() {
    let (mut page, _) = test_page();
    fill_valid(&mut page);
    page.dispatch(PageEvent::Submit);

    page.dispatch(PageEvent::OverlayClick { on_backdrop: false });
    assert!(page.scroll_locked());
    page.dispatch(PageEvent::OverlayClick { on_backdrop: true });
    assert!(!page.scroll_locked());
    assert!(!page.layout().has_class(sel::SUCCESS_MODAL, "active"));

    fill_valid(&mut page);
    page.dispatch(PageEvent::Submit);
    page.dispatch(PageEvent::CloseClick);
    assert!(!page.layout().body_locked);
}

// ═══════════════════════════════════════════════════════════
// Forum & blog modals
// ═══════════════════════════════════════════════════════════

#[test]
fn discussion_replaces_forum_list() {
    let (mut page, _) = test_page();
    open_category(&mut page, "Anxiety Support");
    assert_eq!(page.layout().modals.len(), 1);
    assert!(page.layout().modals[0].1.contains("forum-modal"));
    assert!(page.scroll_locked());

    page.dispatch(PageEvent::ForumPostClick { index: 1 });
    assert_eq!(page.overlay().depth(), 1);
    assert_eq!(page.layout().modals.len(), 1);
    let (_, html) = &page.layout().modals[0];
    assert!(html.contains("discussion-modal"));
    assert!(html.contains(forum::find_post("Anxiety Support", 1).unwrap().title));
    assert!(page.scroll_locked());
}

#[test]
fn category_press_feedback_is_released() {
    let (mut page, _) = test_page();
    page.dispatch(PageEvent::CategoryClick {
        category: "Relationships".into(),
    });
    let card = sel::category_card("relationships");
    assert_eq!(page.layout().style_of(&card, "transform"), Some("scale(0.95)"));
    // Modal waits for the press to finish.
    assert!(page.layout().modals.is_empty());
    assert!(!page.scroll_locked());

    wait(&mut page, 199);
    assert!(page.layout().modals.is_empty());
    wait(&mut page, 1);
    assert_eq!(page.layout().style_of(&card, "transform"), None);
    assert_eq!(page.layout().modals.len(), 1);
    assert!(page.layout().modals[0].1.contains("Setting boundaries without guilt"));
    assert!(page.scroll_locked());
}

#[test]
fn unknown_category_shows_empty_state() {
    let (mut page, _) = test_page();
    open_category(&mut page, "Gardening");
    assert!(page.layout().modals[0].1.contains(EMPTY_CATEGORY));
    assert!(page.dispatch(PageEvent::ForumPostClick { index: 0 }).is_empty());
}

#[test]
fn reply_posts_then_self_closes() {
    let (mut page, _) = test_page();
    open_category(&mut page, "Mindfulness & Meditation");
    page.dispatch(PageEvent::ForumPostClick { index: 0 });
    let (handle, _) = page.overlay().current().unwrap();

    page.dispatch(PageEvent::ReplySubmit);
    assert_eq!(
        page.layout().style_of(&sel::reply_input(handle.id()), "border-color"),
        Some(INVALID_BORDER)
    );

    page.dispatch(PageEvent::ReplyInput {
        text: "This helped me too".into(),
    });
    page.dispatch(PageEvent::ReplySubmit);
    assert_eq!(
        page.layout().texts.get(&sel::reply_button(handle.id())).map(String::as_str),
        Some("Reply posted ✓")
    );
    assert!(page.overlay().is_open(handle));

    wait(&mut page, 1499);
    assert!(page.overlay().is_open(handle));
    wait(&mut page, 1);
    assert!(!page.overlay().is_open(handle));
    assert!(page.layout().modals.is_empty());
    assert!(!page.scroll_locked());
}

#[test]
fn stale_reply_timer_leaves_newer_modal_alone() {
    let (mut page, _) = test_page();
    open_category(&mut page, "Anxiety Support");
    page.dispatch(PageEvent::ForumPostClick { index: 0 });
    page.dispatch(PageEvent::ReplyInput { text: "Same here".into() });
    page.dispatch(PageEvent::ReplySubmit);
    page.dispatch(PageEvent::CloseClick);
    open_category(&mut page, "Relationships");

    wait(&mut page, 2000);
    assert_eq!(page.overlay().depth(), 1);
    assert!(matches!(
        page.overlay().current(),
        Some((_, ModalKind::ForumCategory { .. }))
    ));
    assert!(page.scroll_locked());
}

#[test]
fn read_more_opens_blog_modal() {
    let (mut page, _) = test_page();
    page.dispatch(PageEvent::ReadMore { index: 2 });
    assert_eq!(
        page.layout().style_of(&sel::read_more(2), "transform"),
        Some("translateX(10px)")
    );
    assert!(page.layout().modals.is_empty());

    wait(&mut page, 300);
    assert_eq!(page.layout().style_of(&sel::read_more(2), "transform"), None);
    assert!(page.layout().modals[0].1.contains("Building Healthy Sleep Habits"));
    assert!(page.dispatch(PageEvent::ReadMore { index: 9 }).is_empty());
}

// ═══════════════════════════════════════════════════════════
// Community effects
// ═══════════════════════════════════════════════════════════

#[test]
fn join_room_shows_progress_then_joined() {
    let (mut page, _) = test_page();
    page.dispatch(PageEvent::JoinRoom {
        room: "Night Owls".into(),
    });
    let btn = sel::join_button("night-owls");
    assert_eq!(page.layout().texts.get(&btn).map(String::as_str), Some("Joining..."));
    assert_eq!(page.layout().attr_of(&btn, "disabled"), Some("true"));
    // Second click while joining does nothing.
    assert!(page
        .dispatch(PageEvent::JoinRoom {
            room: "Night Owls".into()
        })
        .is_empty());

    page.dispatch(PageEvent::Tick { now_ms: 1000 });
    assert_eq!(page.layout().texts.get(&btn).map(String::as_str), Some("Joined ✓"));
    assert_eq!(page.layout().style_of(&btn, "background"), Some("#10b981"));
}

#[test]
fn ripple_spawns_and_expires() {
    let (mut page, _) = test_page();
    let rect = Rect {
        left: 100.0,
        top: 50.0,
        width: 120.0,
        height: 40.0,
    };
    page.dispatch(PageEvent::ButtonClick {
        el: ".btn-primary".into(),
        x: 130.0,
        y: 70.0,
        rect,
    });
    let ripple = sel::ripple(".btn-primary", 1);
    assert!(page.layout().has(&ripple));
    assert_eq!(page.layout().style_of(&ripple, "width"), Some("120px"));
    assert_eq!(page.layout().style_of(&ripple, "left"), Some("-30px"));
    assert_eq!(page.layout().style_of(&ripple, "top"), Some("-40px"));

    page.dispatch(PageEvent::Tick { now_ms: 600 });
    assert!(!page.layout().has(&ripple));
}

#[test]
fn load_fades_body_in() {
    let (mut page, _) = test_page();
    page.dispatch(PageEvent::Load);
    assert_eq!(page.layout().style_of(sel::BODY, "opacity"), Some("0"));
    page.dispatch(PageEvent::Tick { now_ms: 100 });
    assert_eq!(page.layout().style_of(sel::BODY, "opacity"), Some("1"));
    assert_eq!(
        page.layout().style_of(sel::BODY, "transition"),
        Some("opacity 0.5s ease")
    );
}

#[test]
fn reveal_and_lazy_images() {
    use crate::reveal::Intersection;

    let (mut page, _) = test_page();
    page.dispatch(PageEvent::Intersect(vec![
        Intersection {
            target: ".about-card:0".into(),
            ratio: 0.4,
        },
        Intersection {
            target: ".team-photo:0".into(),
            ratio: 0.01,
        },
    ]));
    assert!(page.layout().has_class(".about-card:0", "aos-animate"));
    assert!(!page.layout().has_class(".about-card:1", "aos-animate"));
    assert_eq!(page.layout().attr_of(".team-photo:0", "src"), Some("/img/team-1.webp"));
}
