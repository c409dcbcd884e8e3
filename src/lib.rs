//! Mindful Journey site behaviour: navigation highlighting, modal dialogs,
//! community tabs, the testimonial carousel, the appointment form and the
//! mock forum/blog content, as plain state machines behind a `Page`.

pub mod boot;
pub mod carousel;
pub mod config;
pub mod form;
pub mod layout;
pub mod models;
pub mod nav;
pub mod overlay;
pub mod page;
pub mod render;
pub mod reveal;
pub mod submit;
pub mod tabs;
pub mod timers;

mod tests;

pub use config::SiteConfig;
pub use layout::{Layout, Patch, StaticLayout};
pub use page::{Page, PageEvent};
pub use submit::{Submission, SubmissionSink};
