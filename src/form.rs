use chrono::{Local, NaiveDate};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::layout::{sel, Patch};

pub const VALID_BORDER: &str = "#10b981";
pub const INVALID_BORDER: &str = "#ef4444";

// ── Types ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Date,
    Select,
    TextArea,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStatus {
    Neutral,
    Valid,
    Invalid,
}

/// Declared shape of a form control, as exposed by the layout.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub fn new(name: &str, kind: FieldKind, required: bool) -> Self {
        FieldSpec {
            name: name.to_string(),
            kind,
            required,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
    pub value: String,
    pub status: FieldStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    pub overall: bool,
    pub per_field: Vec<(String, FieldStatus)>,
}

impl Validation {
    pub fn status_of(&self, name: &str) -> Option<FieldStatus> {
        self.per_field
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, s)| *s)
    }

    pub fn first_invalid(&self) -> Option<&str> {
        self.per_field
            .iter()
            .find(|(_, s)| *s == FieldStatus::Invalid)
            .map(|(n, _)| n.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Submission refused; the form keeps its values.
    Blocked { first_invalid: String, validation: Validation },
    /// Every required field checked out; these are the collected values.
    Accepted(BTreeMap<String, String>),
}

// ── Checks ────────────────────────────────────────────

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"))
}

pub fn is_email(value: &str) -> bool {
    email_re().is_match(value)
}

/// Split `YYYY-MM-DD` into its components and build a calendar date.
/// No time zone is involved, so the date the user picked is the date compared.
/// Only the zero-padded digit form is accepted.
pub fn parse_local_date(value: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = value.trim().split('-').collect();
    let [year, month, day] = parts.as_slice() else {
        return None;
    };
    let well_formed = [(year, 4), (month, 2), (day, 2)]
        .iter()
        .all(|(part, len)| part.len() == *len && part.bytes().all(|b| b.is_ascii_digit()));
    if !well_formed {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// Status of a single field, judged on its own value only.
pub fn check_field(kind: FieldKind, required: bool, value: &str, today: NaiveDate) -> FieldStatus {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return if required {
            FieldStatus::Invalid
        } else {
            FieldStatus::Neutral
        };
    }
    match kind {
        FieldKind::Email if !is_email(trimmed) => FieldStatus::Invalid,
        FieldKind::Date => match parse_local_date(trimmed) {
            Some(date) if date >= today => FieldStatus::Valid,
            _ => FieldStatus::Invalid,
        },
        _ => FieldStatus::Valid,
    }
}

fn border_patch(name: &str, status: FieldStatus) -> Patch {
    let el = sel::field(name);
    match status {
        FieldStatus::Valid => Patch::style(el, "border-color", VALID_BORDER),
        FieldStatus::Invalid => Patch::style(el, "border-color", INVALID_BORDER),
        FieldStatus::Neutral => Patch::clear_style(el, "border-color"),
    }
}

// ── Form ──────────────────────────────────────────────

/// The appointment form: values, per-field markers and submission gating.
#[derive(Debug, Clone)]
pub struct Form {
    pub name: String,
    fields: Vec<Field>,
}

impl Form {
    pub fn new(name: &str, specs: &[FieldSpec]) -> Self {
        Form {
            name: name.to_string(),
            fields: specs
                .iter()
                .map(|s| Field {
                    name: s.name.clone(),
                    kind: s.kind,
                    required: s.required,
                    value: String::new(),
                    status: FieldStatus::Neutral,
                })
                .collect(),
        }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    /// Every field checked independently; overall is the AND over required fields.
    pub fn validate(&self, today: NaiveDate) -> Validation {
        let per_field: Vec<(String, FieldStatus)> = self
            .fields
            .iter()
            .map(|f| (f.name.clone(), check_field(f.kind, f.required, &f.value, today)))
            .collect();
        let overall = self
            .fields
            .iter()
            .zip(per_field.iter())
            .filter(|(f, _)| f.required)
            .all(|(_, (_, s))| *s == FieldStatus::Valid);
        Validation { overall, per_field }
    }

    /// Typing. A non-empty value drops any marker back to neutral.
    pub fn input(&mut self, name: &str, value: &str) -> Vec<Patch> {
        let Some(field) = self.field_mut(name) else {
            log::warn!("input for unknown field '{}'", name);
            return vec![];
        };
        field.value = value.to_string();
        if !value.trim().is_empty() && field.status != FieldStatus::Neutral {
            field.status = FieldStatus::Neutral;
            return vec![border_patch(name, FieldStatus::Neutral)];
        }
        vec![]
    }

    /// Leaving a field marks it with its own status.
    pub fn blur(&mut self, name: &str, today: NaiveDate) -> Vec<Patch> {
        let Some(field) = self.field_mut(name) else {
            log::warn!("blur for unknown field '{}'", name);
            return vec![];
        };
        let status = check_field(field.kind, field.required, &field.value, today);
        field.status = status;
        vec![border_patch(name, status)]
    }

    /// Value change, emitted by selects (and date pickers) which have no
    /// per-keystroke input event.
    pub fn change(&mut self, name: &str, value: &str, today: NaiveDate) -> Vec<Patch> {
        match self.field_mut(name) {
            Some(field) => field.value = value.to_string(),
            None => {
                log::warn!("change for unknown field '{}'", name);
                return vec![];
            }
        }
        self.blur(name, today)
    }

    /// Gate a submission. Blocked submissions mark every field with its
    /// own status and leave the values alone.
    pub fn submit(&mut self, today: NaiveDate) -> (SubmitOutcome, Vec<Patch>) {
        let validation = self.validate(today);
        if !validation.overall {
            let mut patches = Vec::new();
            for (field, (_, status)) in self.fields.iter_mut().zip(validation.per_field.iter()) {
                field.status = *status;
                patches.push(border_patch(&field.name, *status));
            }
            // Overall can only fail on a required field, which is then Invalid.
            let first_invalid = validation.first_invalid().unwrap_or_default().to_string();
            if !first_invalid.is_empty() {
                patches.push(Patch::ScrollIntoView { el: sel::field(&first_invalid) });
                patches.push(Patch::Focus { el: sel::field(&first_invalid) });
            }
            return (
                SubmitOutcome::Blocked {
                    first_invalid,
                    validation,
                },
                patches,
            );
        }

        let data = self
            .fields
            .iter()
            .map(|f| (f.name.clone(), f.value.trim().to_string()))
            .collect();
        (SubmitOutcome::Accepted(data), vec![])
    }

    /// Clear every value and every marker.
    pub fn reset(&mut self) -> Vec<Patch> {
        let mut patches = Vec::new();
        for field in &mut self.fields {
            field.value.clear();
            field.status = FieldStatus::Neutral;
            patches.push(Patch::attr(sel::field(&field.name), "value", ""));
            patches.push(border_patch(&field.name, FieldStatus::Neutral));
        }
        patches
    }
}

/// `min` attribute for the date picker: today's local date.
pub fn date_min_attribute(today: NaiveDate) -> String {
    today.format("%Y-%m-%d").to_string()
}
