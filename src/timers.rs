use crate::overlay::ModalHandle;

/// Deferred work. Everything here is cosmetic except the testimonial
/// rotation and the post-reply close.
#[derive(Debug, Clone, PartialEq)]
pub enum TimerTask {
    AdvanceTestimonial,
    ReleasePress { el: String },
    OpenCategory { category: String },
    OpenBlog { post: usize },
    JoinComplete { button: String, room: String },
    RemoveRipple { el: String },
    CloseDiscussion(ModalHandle),
    FadeIn,
}

#[derive(Debug, Clone)]
struct Entry {
    due: u64,
    seq: u64,
    every: Option<u64>,
    task: TimerTask,
}

/// Fire-and-forget timers on a virtual millisecond clock.
/// Nothing is ever cancelled; whoever handles a stale task ignores it.
///
/// The clock is anchored on the first `advance`: work queued before then
/// counts from that first reading of the host clock, whatever its origin.
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: u64,
    started: bool,
    seq: u64,
    entries: Vec<Entry>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last host clock reading, or 0 before the first `advance`.
    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    pub fn after(&mut self, delay_ms: u64, task: TimerTask) {
        self.push(self.now.saturating_add(delay_ms), None, task);
    }

    pub fn every(&mut self, interval_ms: u64, task: TimerTask) {
        let interval = interval_ms.max(1);
        self.push(self.now.saturating_add(interval), Some(interval), task);
    }

    fn push(&mut self, due: u64, every: Option<u64>, task: TimerTask) {
        self.seq += 1;
        self.entries.push(Entry {
            due,
            seq: self.seq,
            every,
            task,
        });
    }

    /// Move the clock to `now_ms` and return every task that came due, in
    /// firing order. A repeating task fires at most once per call and is
    /// rescheduled on its own grid, so missed intervals are dropped.
    pub fn advance(&mut self, now_ms: u64) -> Vec<TimerTask> {
        if !self.started {
            self.started = true;
            for entry in &mut self.entries {
                entry.due = entry.due.saturating_add(now_ms);
            }
            self.now = now_ms;
        }
        if now_ms < self.now {
            return vec![];
        }
        self.now = now_ms;

        let mut fired: Vec<(u64, u64, TimerTask)> = Vec::new();
        let mut keep = Vec::with_capacity(self.entries.len());
        for mut entry in self.entries.drain(..) {
            if entry.due > now_ms {
                keep.push(entry);
                continue;
            }
            match entry.every {
                Some(interval) => {
                    fired.push((entry.due, entry.seq, entry.task.clone()));
                    let missed = (now_ms - entry.due) / interval + 1;
                    entry.due = entry.due.saturating_add(missed.saturating_mul(interval));
                    keep.push(entry);
                }
                None => fired.push((entry.due, entry.seq, entry.task)),
            }
        }
        self.entries = keep;

        fired.sort_by_key(|(due, seq, _)| (*due, *seq));
        fired.into_iter().map(|(_, _, task)| task).collect()
    }
}
