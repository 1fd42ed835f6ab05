//! Load-once guard for the external widget script.
//!
//! # Responsibility
//! - Inject the widget loader script at most once per [`WidgetLoader`].
//! - Notify every waiter exactly once when the load settles.
//!
//! # Invariants
//! - Phase only moves forward: `Unrequested -> Loading -> Settled`, or
//!   straight to `Settled` when the widget is already present.
//! - A settled outcome is final; there is no retry.
//! - Waiter callbacks run outside the internal lock, so they may call back
//!   into the loader.

use crate::config::MapConfig;
use log::{error, info, warn};
use once_cell::sync::Lazy;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

static GLOBAL_LOADER: Lazy<WidgetLoader> = Lazy::new(WidgetLoader::new);

/// Availability of the external widget capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapabilityState {
    /// Nobody asked for the widget yet.
    Unrequested,
    Loading,
    Ready,
    /// Load failed; the map stays in its placeholder state.
    Unavailable(String),
}

/// Final outcome of a widget load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Ready,
    Failed(String),
}

impl LoadStatus {
    fn capability(&self) -> CapabilityState {
        match self {
            Self::Ready => CapabilityState::Ready,
            Self::Failed(reason) => CapabilityState::Unavailable(reason.clone()),
        }
    }
}

/// Script injection failure reported synchronously by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectError(pub String);

impl Display for InjectError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to inject widget loader: {}", self.0)
    }
}

impl Error for InjectError {}

/// Host hook that starts fetching the widget script.
///
/// Completion is reported later through [`WidgetLoader::complete`].
pub trait ScriptInjector {
    fn inject(&self, script_url: &str) -> Result<(), InjectError>;
}

type SettleCallback = Box<dyn FnOnce(&LoadStatus) + Send>;

enum Phase {
    Unrequested,
    Loading,
    Settled(LoadStatus),
}

struct LoaderState {
    phase: Phase,
    waiters: Vec<SettleCallback>,
}

/// Single-initialization guard with pending-completion notification.
pub struct WidgetLoader {
    state: Mutex<LoaderState>,
    injections: AtomicUsize,
}

impl Default for WidgetLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetLoader {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(LoaderState {
                phase: Phase::Unrequested,
                waiters: Vec::new(),
            }),
            injections: AtomicUsize::new(0),
        }
    }

    /// Process-wide loader shared by every map on the page.
    pub fn global() -> &'static WidgetLoader {
        &GLOBAL_LOADER
    }

    pub fn state(&self) -> CapabilityState {
        match &self.lock().phase {
            Phase::Unrequested => CapabilityState::Unrequested,
            Phase::Loading => CapabilityState::Loading,
            Phase::Settled(status) => status.capability(),
        }
    }

    /// Number of times the loader script was injected.
    pub fn injection_count(&self) -> usize {
        self.injections.load(Ordering::SeqCst)
    }

    /// Records that the widget is already available without injection.
    ///
    /// Ignored once a load is in flight or settled.
    pub fn mark_present(&self) {
        let waiters = {
            let mut state = self.lock();
            if !matches!(state.phase, Phase::Unrequested) {
                return;
            }
            state.phase = Phase::Settled(LoadStatus::Ready);
            std::mem::take(&mut state.waiters)
        };
        info!("event=widget_present module=map status=ok");
        notify(waiters, &LoadStatus::Ready);
    }

    /// Requests the widget, injecting the loader script on first use only.
    ///
    /// Returns `Ready` immediately when already loaded, `Loading` while a
    /// load is in flight, `Unavailable` once a load has failed.
    pub fn ensure_loaded(
        &self,
        injector: &dyn ScriptInjector,
        config: &MapConfig,
    ) -> CapabilityState {
        {
            let mut state = self.lock();
            match &state.phase {
                Phase::Loading => return CapabilityState::Loading,
                Phase::Settled(status) => return status.capability(),
                Phase::Unrequested => {}
            }
            state.phase = Phase::Loading;
        }

        // Lock released: the injector may complete the load synchronously.
        self.injections.fetch_add(1, Ordering::SeqCst);
        match injector.inject(&config.loader_script_url()) {
            Ok(()) => {
                info!("event=widget_inject module=map status=ok");
                self.state()
            }
            Err(err) => {
                error!(
                    "event=widget_inject module=map status=error reason={}",
                    err.0
                );
                self.complete(Err(err.to_string()));
                self.state()
            }
        }
    }

    /// Registers a callback for the settled outcome.
    ///
    /// Runs immediately when the load has already settled; otherwise runs
    /// once, when [`WidgetLoader::complete`] settles the load.
    pub fn on_settled(&self, callback: impl FnOnce(&LoadStatus) + Send + 'static) {
        let mut state = self.lock();
        if let Phase::Settled(status) = &state.phase {
            let status = status.clone();
            drop(state);
            callback(&status);
            return;
        }
        state.waiters.push(Box::new(callback));
    }

    /// Reports the loader script outcome and wakes every waiter once.
    ///
    /// Completions outside the `Loading` phase are ignored.
    pub fn complete(&self, outcome: Result<(), String>) {
        let status = match outcome {
            Ok(()) => LoadStatus::Ready,
            Err(reason) => LoadStatus::Failed(reason),
        };

        let waiters = {
            let mut state = self.lock();
            if !matches!(state.phase, Phase::Loading) {
                warn!("event=widget_complete module=map status=error reason=not_loading");
                return;
            }
            state.phase = Phase::Settled(status.clone());
            std::mem::take(&mut state.waiters)
        };

        match &status {
            LoadStatus::Ready => info!(
                "event=widget_loaded module=map status=ok waiters={}",
                waiters.len()
            ),
            LoadStatus::Failed(reason) => error!(
                "event=widget_loaded module=map status=error waiters={} reason={}",
                waiters.len(),
                reason
            ),
        }
        notify(waiters, &status);
    }

    fn lock(&self) -> MutexGuard<'_, LoaderState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn notify(waiters: Vec<SettleCallback>, status: &LoadStatus) {
    for waiter in waiters {
        waiter(status);
    }
}

#[cfg(test)]
mod tests {
    use super::{CapabilityState, InjectError, LoadStatus, ScriptInjector, WidgetLoader};
    use crate::config::MapConfig;
    use std::sync::{Arc, Mutex};

    struct CountingInjector {
        urls: Mutex<Vec<String>>,
    }

    impl ScriptInjector for CountingInjector {
        fn inject(&self, script_url: &str) -> Result<(), InjectError> {
            self.urls
                .lock()
                .expect("injector lock")
                .push(script_url.to_string());
            Ok(())
        }
    }

    #[test]
    fn mark_present_skips_injection() {
        let loader = WidgetLoader::new();
        loader.mark_present();
        let injector = CountingInjector {
            urls: Mutex::new(Vec::new()),
        };

        let state = loader.ensure_loaded(&injector, &MapConfig::new("key"));
        assert_eq!(state, CapabilityState::Ready);
        assert_eq!(loader.injection_count(), 0);
        assert!(injector.urls.lock().expect("injector lock").is_empty());
    }

    #[test]
    fn waiter_registered_before_request_still_fires_once() {
        let loader = WidgetLoader::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        loader.on_settled(move |status| sink.lock().expect("sink lock").push(status.clone()));
        assert_eq!(loader.state(), CapabilityState::Unrequested);

        let injector = CountingInjector {
            urls: Mutex::new(Vec::new()),
        };
        loader.ensure_loaded(&injector, &MapConfig::new("key"));
        assert!(seen.lock().expect("seen lock").is_empty());

        loader.complete(Ok(()));
        loader.complete(Err("late failure".to_string()));

        assert_eq!(*seen.lock().expect("seen lock"), vec![LoadStatus::Ready]);
        assert_eq!(loader.state(), CapabilityState::Ready);
    }

    #[test]
    fn unsolicited_completion_is_ignored() {
        let loader = WidgetLoader::new();
        loader.complete(Ok(()));
        assert_eq!(loader.state(), CapabilityState::Unrequested);
    }
}
