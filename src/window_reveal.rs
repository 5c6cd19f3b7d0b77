use std::{sync::Mutex, time::Duration};

use tokio::{sync::oneshot, time::Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LoadOutcome {
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RevealTrigger {
    Loaded,
    LoadFailed,
    TimedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WindowPhase {
    Created,
    Loading,
    Shown,
    /// Made visible without a confirmed load: failure or fail-safe timeout.
    FailedVisible,
}

impl WindowPhase {
    pub(crate) fn is_visible(self) -> bool {
        matches!(self, Self::Shown | Self::FailedVisible)
    }
}

/// One-shot visibility gate for a window that starts hidden.
///
/// The load path reports through [`RevealGate::report`]; a watcher races that
/// signal against the fail-safe timeout with [`wait_for_reveal`] and then calls
/// [`RevealGate::settle`]. Only the first settle moves the window to a visible
/// phase, so the window is shown at most once per gate.
#[derive(Debug)]
pub(crate) struct RevealGate {
    phase: Mutex<WindowPhase>,
    signal: Mutex<Option<oneshot::Sender<LoadOutcome>>>,
}

impl RevealGate {
    pub(crate) fn arm() -> (Self, oneshot::Receiver<LoadOutcome>) {
        let (sender, receiver) = oneshot::channel();
        (
            Self {
                phase: Mutex::new(WindowPhase::Created),
                signal: Mutex::new(Some(sender)),
            },
            receiver,
        )
    }

    pub(crate) fn phase(&self) -> WindowPhase {
        match self.phase.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    pub(crate) fn mark_loading(&self) -> bool {
        let mut phase = match self.phase.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if *phase != WindowPhase::Created {
            return false;
        }
        *phase = WindowPhase::Loading;
        true
    }

    /// Delivers the load outcome to the watcher. Returns `false` when an
    /// outcome was already reported or the watcher has stopped listening.
    pub(crate) fn report(&self, outcome: LoadOutcome) -> bool {
        let sender = match self.signal.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        match sender {
            Some(sender) => sender.send(outcome).is_ok(),
            None => false,
        }
    }

    pub(crate) fn settle(&self, trigger: RevealTrigger) -> bool {
        let mut phase = match self.phase.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if phase.is_visible() {
            return false;
        }
        *phase = match trigger {
            RevealTrigger::Loaded => WindowPhase::Shown,
            RevealTrigger::LoadFailed | RevealTrigger::TimedOut => WindowPhase::FailedVisible,
        };
        true
    }
}

pub(crate) async fn wait_for_reveal(
    signal: oneshot::Receiver<LoadOutcome>,
    timeout: Duration,
) -> RevealTrigger {
    let deadline = Instant::now() + timeout;
    match tokio::time::timeout_at(deadline, signal).await {
        Ok(Ok(LoadOutcome::Loaded)) => RevealTrigger::Loaded,
        Ok(Ok(LoadOutcome::Failed(_))) => RevealTrigger::LoadFailed,
        // The reporter went away without an outcome; only the timer is left.
        Ok(Err(_)) => {
            tokio::time::sleep_until(deadline).await;
            RevealTrigger::TimedOut
        }
        Err(_) => RevealTrigger::TimedOut,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[tokio::test(start_paused = true)]
    async fn wait_for_reveal_times_out_without_any_signal() {
        let (gate, signal) = RevealGate::arm();
        let started = Instant::now();

        let trigger = wait_for_reveal(signal, TIMEOUT).await;

        assert_eq!(trigger, RevealTrigger::TimedOut);
        let elapsed = started.elapsed();
        assert!(elapsed >= TIMEOUT);
        assert!(elapsed < TIMEOUT + Duration::from_millis(50));
        assert!(gate.settle(trigger));
        assert_eq!(gate.phase(), WindowPhase::FailedVisible);
    }

    #[tokio::test(start_paused = true)]
    async fn wait_for_reveal_returns_on_load_before_timeout() {
        let (gate, signal) = RevealGate::arm();
        let gate = Arc::new(gate);
        let reporter = Arc::clone(&gate);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(1_200)).await;
            reporter.report(LoadOutcome::Loaded);
        });
        let started = Instant::now();

        let trigger = wait_for_reveal(signal, TIMEOUT).await;

        assert_eq!(trigger, RevealTrigger::Loaded);
        assert!(started.elapsed() < TIMEOUT);
    }

    #[tokio::test(start_paused = true)]
    async fn wait_for_reveal_fails_open_on_load_failure() {
        let (gate, signal) = RevealGate::arm();
        assert!(gate.report(LoadOutcome::Failed("no dev server".to_string())));

        assert_eq!(
            wait_for_reveal(signal, TIMEOUT).await,
            RevealTrigger::LoadFailed
        );
    }

    #[tokio::test(start_paused = true)]
    async fn wait_for_reveal_still_waits_for_deadline_when_reporter_drops() {
        let (gate, signal) = RevealGate::arm();
        drop(gate);
        let started = Instant::now();

        assert_eq!(
            wait_for_reveal(signal, TIMEOUT).await,
            RevealTrigger::TimedOut
        );
        assert!(started.elapsed() >= TIMEOUT);
    }

    #[test]
    fn settle_only_takes_effect_once() {
        let (gate, _signal) = RevealGate::arm();
        assert!(gate.mark_loading());
        assert_eq!(gate.phase(), WindowPhase::Loading);

        assert!(gate.settle(RevealTrigger::Loaded));
        assert!(!gate.settle(RevealTrigger::TimedOut));
        assert_eq!(gate.phase(), WindowPhase::Shown);
        assert!(!gate.mark_loading());
    }

    #[test]
    fn report_delivers_only_the_first_outcome() {
        let (gate, mut signal) = RevealGate::arm();
        assert!(gate.report(LoadOutcome::Loaded));
        assert!(!gate.report(LoadOutcome::Failed("late".to_string())));
        assert_eq!(signal.try_recv(), Ok(LoadOutcome::Loaded));
    }
}
