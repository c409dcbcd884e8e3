use log::{error, info, warn};

use crate::form::FieldKind;
use crate::layout::{sel, Layout};

/// Elements the page cannot be wired without.
const CRITICAL_ELEMENTS: &[&str] = &[
    sel::BODY,
    sel::NAVBAR,
    sel::HAMBURGER,
    sel::NAV_MENU,
    sel::SUCCESS_MODAL,
    sel::APPOINTMENT_FORM,
];

/// Elements whose absence only disables a cosmetic effect.
const OPTIONAL_ELEMENTS: &[&str] = &[sel::LOGO, sel::HERO];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BootReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl BootReport {
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Check the layout exposes the structure the page expects.
/// Call this before wiring a `Page`; errors mean the page must not start.
pub fn check(layout: &dyn Layout) -> BootReport {
    info!("Page boot check starting...");
    let mut report = BootReport::default();

    // ── 1. Critical elements ───────────────────────────
    for el in CRITICAL_ELEMENTS {
        if !layout.has(el) {
            error!("  MISSING critical element: {}", el);
            report.errors.push(format!("missing element {}", el));
        }
    }

    // ── 2. Optional elements ───────────────────────────
    for el in OPTIONAL_ELEMENTS {
        if !layout.has(el) {
            warn!("  Missing element: {} (effect disabled)", el);
            report.warnings.push(format!("missing element {}", el));
        }
    }

    // ── 3. Navigation ──────────────────────────────────
    let sections = layout.sections();
    if sections.is_empty() {
        warn!("  No sections found (nav highlight disabled)");
        report.warnings.push("no sections".into());
    }
    for href in layout.nav_links() {
        let Some(id) = href.strip_prefix('#') else {
            warn!("  Nav link {} is not an in-page anchor", href);
            report.warnings.push(format!("external nav link {}", href));
            continue;
        };
        if !sections.iter().any(|s| s.id == id) {
            warn!("  Nav link {} has no matching section", href);
            report.warnings.push(format!("dangling nav link {}", href));
        }
    }

    // ── 4. Tabs ────────────────────────────────────────
    let panes = layout.tab_panes();
    if panes.is_empty() {
        error!("  No community tab panes declared");
        report.errors.push("no tab panes".into());
    }
    for pane in &panes {
        if !layout.has(&sel::tab_button(pane)) || !layout.has(&sel::tab_pane(pane)) {
            error!("  Tab '{}' is missing its button or pane", pane);
            report.errors.push(format!("incomplete tab {}", pane));
        }
    }

    // ── 5. Testimonials ────────────────────────────────
    if layout.testimonial_count() == 0 {
        error!("  No testimonial cards found");
        report.errors.push("no testimonials".into());
    }

    // ── 6. Appointment form ────────────────────────────
    let fields = layout.form_fields();
    if fields.is_empty() {
        error!("  Appointment form declares no fields");
        report.errors.push("no form fields".into());
    }
    for f in &fields {
        if !layout.has(&sel::field(&f.name)) {
            error!("  Form field '{}' not present", f.name);
            report.errors.push(format!("missing field {}", f.name));
        }
    }
    if !fields.iter().any(|f| f.kind == FieldKind::Date) {
        warn!("  Appointment form has no date field");
        report.warnings.push("no date field".into());
    }

    // ── Summary ────────────────────────────────────────
    if !report.passed() {
        error!(
            "Boot check FAILED: {} error(s), {} warning(s).",
            report.errors.len(),
            report.warnings.len()
        );
    } else if !report.warnings.is_empty() {
        warn!(
            "Boot check passed with {} warning(s). Some effects may not run.",
            report.warnings.len()
        );
    } else {
        info!("Boot check passed. All systems go.");
    }
    report
}
