use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
};
use tauri::WebviewWindow;

use crate::{
    content_source::ContentSource, settings_window::SingletonSlot, startup_mode::StartupMode,
    window_reveal::RevealGate,
};

/// Everything the shell owns across windows, managed as Tauri state.
pub(crate) struct ShellState {
    pub(crate) startup_mode: StartupMode,
    pub(crate) settings_window: SingletonSlot<WebviewWindow>,
    pub(crate) is_resolving_content: AtomicBool,
    reveal_gates: Mutex<HashMap<String, Arc<RevealGate>>>,
    content_source: Mutex<Option<ContentSource>>,
    tray_present: AtomicBool,
    is_quitting: AtomicBool,
}

impl ShellState {
    pub(crate) fn new(startup_mode: StartupMode) -> Self {
        Self {
            startup_mode,
            settings_window: SingletonSlot::default(),
            is_resolving_content: AtomicBool::new(false),
            reveal_gates: Mutex::new(HashMap::new()),
            content_source: Mutex::new(None),
            tray_present: AtomicBool::new(false),
            is_quitting: AtomicBool::new(false),
        }
    }

    /// Installs the gate for `label`, replacing the one of any earlier
    /// window with the same label.
    pub(crate) fn install_reveal_gate(&self, label: &str, gate: Arc<RevealGate>) {
        let mut gates = match self.reveal_gates.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        gates.insert(label.to_string(), gate);
    }

    pub(crate) fn reveal_gate(&self, label: &str) -> Option<Arc<RevealGate>> {
        let gates = match self.reveal_gates.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        gates.get(label).cloned()
    }

    pub(crate) fn drop_reveal_gate(&self, label: &str) {
        let mut gates = match self.reveal_gates.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        gates.remove(label);
    }

    pub(crate) fn set_content_source(&self, source: ContentSource) {
        match self.content_source.lock() {
            Ok(mut guard) => *guard = Some(source),
            Err(poisoned) => *poisoned.into_inner() = Some(source),
        }
    }

    pub(crate) fn content_source(&self) -> Option<ContentSource> {
        match self.content_source.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub(crate) fn mark_tray_present(&self) {
        self.tray_present.store(true, Ordering::Release);
    }

    pub(crate) fn mark_tray_removed(&self) {
        self.tray_present.store(false, Ordering::Release);
    }

    pub(crate) fn has_tray(&self) -> bool {
        self.tray_present.load(Ordering::Acquire)
    }

    pub(crate) fn mark_quitting(&self) {
        self.is_quitting.store(true, Ordering::Release);
    }

    pub(crate) fn is_quitting(&self) -> bool {
        self.is_quitting.load(Ordering::Acquire)
    }
}

pub(crate) struct AtomicFlagGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> AtomicFlagGuard<'a> {
    pub(crate) fn try_set(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        Some(Self { flag })
    }
}

impl Drop for AtomicFlagGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
