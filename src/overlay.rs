//! Modal lifecycle and the page-level scroll lock.
//!
//! At most one modal is present at any time. Opening a modal while another
//! is showing destroys the showing one first (the discussion modal replaces
//! the forum list it was opened from). The scroll lock is held exactly while
//! a modal is open.

use log::debug;

use crate::layout::{sel, Patch};

#[derive(Debug, Clone, PartialEq)]
pub enum ModalKind {
    /// Appointment confirmation. Lives in the page markup and is toggled.
    Success,
    ForumCategory { category: String },
    Discussion { category: String, post: usize },
    Blog { post: usize },
}

/// What to show. Every kind except `Success` carries rendered markup.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalSpec {
    pub kind: ModalKind,
    pub html: Option<String>,
}

impl ModalSpec {
    pub fn success() -> Self {
        ModalSpec {
            kind: ModalKind::Success,
            html: None,
        }
    }

    pub fn rendered(kind: ModalKind, html: String) -> Self {
        ModalSpec {
            kind,
            html: Some(html),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModalHandle(u64);

impl ModalHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    CloseButton,
    Backdrop,
    Completed,
    Superseded,
}

#[derive(Debug, Clone)]
struct OpenModal {
    handle: ModalHandle,
    kind: ModalKind,
}

#[derive(Debug, Default)]
pub struct OverlayManager {
    open: Option<OpenModal>,
    next_id: u64,
    scroll_locked: bool,
}

impl OverlayManager {
    pub fn new() -> Self {
        OverlayManager {
            open: None,
            next_id: 1,
            scroll_locked: false,
        }
    }

    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    pub fn current(&self) -> Option<(ModalHandle, &ModalKind)> {
        self.open.as_ref().map(|m| (m.handle, &m.kind))
    }

    pub fn is_open(&self, handle: ModalHandle) -> bool {
        self.open.as_ref().map(|m| m.handle == handle).unwrap_or(false)
    }

    /// Number of modals present; never more than one.
    pub fn depth(&self) -> usize {
        usize::from(self.open.is_some())
    }

    pub fn open(&mut self, spec: ModalSpec) -> (ModalHandle, Vec<Patch>) {
        let mut patches = Vec::new();
        if let Some(prev) = self.open.as_ref().map(|m| m.handle) {
            patches.extend(self.teardown(prev, CloseReason::Superseded));
        }

        let handle = ModalHandle(self.next_id);
        self.next_id += 1;

        match (&spec.kind, spec.html) {
            (ModalKind::Success, _) => {
                patches.push(Patch::add_class(sel::SUCCESS_MODAL, "active"));
            }
            (_, Some(html)) => {
                patches.push(Patch::MountModal {
                    el: sel::modal(handle.id()),
                    html,
                });
            }
            (kind, None) => {
                log::warn!("modal {:?} opened without markup", kind);
                patches.push(Patch::MountModal {
                    el: sel::modal(handle.id()),
                    html: String::new(),
                });
            }
        }

        debug!("modal {} opened: {:?}", handle.id(), spec.kind);
        self.open = Some(OpenModal {
            handle,
            kind: spec.kind,
        });
        if !self.scroll_locked {
            self.scroll_locked = true;
            patches.push(Patch::ScrollLock(true));
        }
        (handle, patches)
    }

    /// Close a modal. Stale handles are ignored.
    pub fn close(&mut self, handle: ModalHandle, reason: CloseReason) -> Vec<Patch> {
        if !self.is_open(handle) {
            debug!("close({:?}) for modal {} which is no longer open", reason, handle.id());
            return vec![];
        }
        let mut patches = self.teardown(handle, reason);
        if self.open.is_none() && self.scroll_locked {
            self.scroll_locked = false;
            patches.push(Patch::ScrollLock(false));
        }
        patches
    }

    /// Click on the overlay. Only a click on the backdrop itself closes;
    /// clicks that land on the modal content bubble up here too.
    pub fn backdrop_click(&mut self, handle: ModalHandle, on_backdrop: bool) -> Vec<Patch> {
        if !on_backdrop {
            return vec![];
        }
        self.close(handle, CloseReason::Backdrop)
    }

    fn teardown(&mut self, handle: ModalHandle, reason: CloseReason) -> Vec<Patch> {
        let Some(modal) = self.open.take() else {
            return vec![];
        };
        debug!("modal {} closed ({:?})", handle.id(), reason);
        match modal.kind {
            ModalKind::Success => vec![Patch::remove_class(sel::SUCCESS_MODAL, "active")],
            _ => vec![Patch::UnmountModal {
                el: sel::modal(handle.id()),
            }],
        }
    }
}
