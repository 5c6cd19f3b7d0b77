use std::sync::{Mutex, TryLockError};

use tauri::{AppHandle, Manager, WebviewUrl, WebviewWindow};

use crate::{
    content_source::ContentSource,
    main_window, startup_resolver,
    window_control::{reveal_and_focus, WindowControl},
    ShellState, SETTINGS_PAGE, SETTINGS_WINDOW_DEFAULT_SIZE, SETTINGS_WINDOW_LABEL,
    SETTINGS_WINDOW_MIN_SIZE, SETTINGS_WINDOW_TITLE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SlotOutcome {
    Created,
    Focused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SlotRelease {
    Released,
    /// The slot was busy; the release is applied by the next slot operation.
    Deferred,
    NotHeld,
}

/// Holds at most one live window. The check and the creation happen under
/// the same lock, so two open requests can never both create. Focusing an
/// existing window happens after the lock is dropped, and `release` never
/// waits on it, so window events on the main thread cannot block behind a
/// bridge call.
#[derive(Debug)]
pub(crate) struct SingletonSlot<W> {
    handle: Mutex<Option<W>>,
    deferred_releases: Mutex<Vec<String>>,
}

impl<W> Default for SingletonSlot<W> {
    fn default() -> Self {
        Self {
            handle: Mutex::new(None),
            deferred_releases: Mutex::new(Vec::new()),
        }
    }
}

impl<W: WindowControl + Clone> SingletonSlot<W> {
    pub(crate) fn open_or_focus<F>(&self, create: F) -> Result<SlotOutcome, String>
    where
        F: FnOnce() -> Result<W, String>,
    {
        let existing = {
            let mut handle = self
                .handle
                .lock()
                .map_err(|_| "Window slot lock is poisoned.".to_string())?;
            self.apply_deferred_releases(&mut handle);
            match handle.as_ref() {
                Some(existing) => existing.clone(),
                None => {
                    let window = create()?;
                    *handle = Some(window);
                    self.apply_deferred_releases(&mut handle);
                    return Ok(SlotOutcome::Created);
                }
            }
        };

        reveal_and_focus(&existing)?;
        Ok(SlotOutcome::Focused)
    }

    /// Clears the slot if it holds the window with `label`.
    pub(crate) fn release(&self, label: &str) -> SlotRelease {
        let mut handle = match self.handle.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
            Err(TryLockError::WouldBlock) => {
                let mut deferred = match self.deferred_releases.lock() {
                    Ok(guard) => guard,
                    Err(poisoned) => poisoned.into_inner(),
                };
                deferred.push(label.to_string());
                return SlotRelease::Deferred;
            }
        };
        if take_if_labelled(&mut handle, label) {
            SlotRelease::Released
        } else {
            SlotRelease::NotHeld
        }
    }

    fn apply_deferred_releases(&self, handle: &mut Option<W>) {
        let labels = match self.deferred_releases.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        };
        for label in labels {
            take_if_labelled(handle, &label);
        }
    }

    #[cfg(test)]
    fn is_occupied(&self) -> bool {
        match self.handle.lock() {
            Ok(mut guard) => {
                self.apply_deferred_releases(&mut guard);
                guard.is_some()
            }
            Err(poisoned) => poisoned.into_inner().is_some(),
        }
    }
}

fn take_if_labelled<W: WindowControl>(handle: &mut Option<W>, label: &str) -> bool {
    let holds_label = handle
        .as_ref()
        .is_some_and(|window| window.window_label() == label);
    if holds_label {
        *handle = None;
    }
    holds_label
}

pub(crate) fn open_settings_window<F>(app_handle: &AppHandle, log: F) -> Result<SlotOutcome, String>
where
    F: Fn(&str) + Copy + Send + 'static,
{
    let state = app_handle.state::<ShellState>();
    let outcome = state
        .settings_window
        .open_or_focus(|| build_settings_window(app_handle, &state, log))?;
    log(match outcome {
        SlotOutcome::Created => "settings window created",
        SlotOutcome::Focused => "settings window already open, focused existing instance",
    });
    Ok(outcome)
}

fn build_settings_window<F>(
    app_handle: &AppHandle,
    state: &ShellState,
    log: F,
) -> Result<WebviewWindow, String>
where
    F: Fn(&str) + Copy + Send + 'static,
{
    let source = match state.content_source() {
        Some(source) => source,
        None => startup_resolver::default_content_source(state.startup_mode)?,
    };
    let url = match source {
        ContentSource::PackagedApp => WebviewUrl::App(format!("{SETTINGS_PAGE}.html").into()),
        ContentSource::DevServer { .. } => WebviewUrl::External(source.page_url(SETTINGS_PAGE)?),
    };
    let gate = main_window::arm_window_reveal(app_handle, SETTINGS_WINDOW_LABEL, log);

    let window = main_window::shell_window_builder(
        app_handle,
        SETTINGS_WINDOW_LABEL,
        url,
    )
    .title(SETTINGS_WINDOW_TITLE)
    .inner_size(SETTINGS_WINDOW_DEFAULT_SIZE.0, SETTINGS_WINDOW_DEFAULT_SIZE.1)
    .min_inner_size(SETTINGS_WINDOW_MIN_SIZE.0, SETTINGS_WINDOW_MIN_SIZE.1)
    .build()
    .map_err(|error| {
        state.drop_reveal_gate(SETTINGS_WINDOW_LABEL);
        format!("Failed to create settings window: {error}")
    })?;

    gate.mark_loading();
    Ok(window)
}
