use std::path::PathBuf;
use std::process::ExitCode;

use mindful_journey::layout::StaticLayout;
use mindful_journey::page::{Page, PageEvent};
use mindful_journey::{submit, SiteConfig};

/// Walk the landing page through a short visit and print every patch.
/// Useful for eyeballing timings and markup without a browser.
fn walkthrough() -> Vec<PageEvent> {
    vec![
        PageEvent::Tick { now_ms: 0 },
        PageEvent::Load,
        PageEvent::Tick { now_ms: 100 },
        PageEvent::Scroll { y: 900.0 },
        PageEvent::TabClick { pane: "chat".into() },
        PageEvent::JoinRoom { room: "Daily Check-in".into() },
        PageEvent::Tick { now_ms: 1100 },
        PageEvent::CategoryClick { category: "Anxiety Support".into() },
        PageEvent::Tick { now_ms: 1300 },
        PageEvent::ForumPostClick { index: 0 },
        PageEvent::CloseClick,
        PageEvent::Submit,
        PageEvent::Tick { now_ms: 5000 },
    ]
}

fn main() -> ExitCode {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("mindful.toml"));

    let config = match SiteConfig::load(&path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let sink = match submit::from_config(&config.submission) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let mut page = match Page::new(config, StaticLayout::mindful_journey(), sink) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    for event in walkthrough() {
        println!("{:?}", event);
        for patch in page.dispatch(event) {
            println!("    {:?}", patch);
        }
    }
    eprintln!("{} timer(s) still pending", page.pending_timers());
    ExitCode::SUCCESS
}
