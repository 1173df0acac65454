use gloo::timers::callback::Interval;
use yew::prelude::*;

use crate::services::logging::Logger;

/// Configuration for periodic refresh behavior
#[derive(Clone, PartialEq)]
pub struct PeriodicRefreshConfig {
    pub interval_ms: u32,
    /// Run once on mount instead of waiting a full interval
    pub run_immediately: bool,
}

impl Default for PeriodicRefreshConfig {
    fn default() -> Self {
        Self {
            interval_ms: 1000,
            run_immediately: true,
        }
    }
}

/// Run `refresh_fn` every `interval_ms` while the component is mounted.
///
/// The interval is owned by the effect and cancelled on unmount or when
/// the config changes. Failures are the callback's business; nothing is
/// retried here.
#[hook]
pub fn use_periodic_refresh(config: PeriodicRefreshConfig, refresh_fn: Callback<()>) {
    use_effect_with(config, move |config| {
        if config.run_immediately {
            refresh_fn.emit(());
        }

        Logger::debug_with_component(
            "periodic-refresh-hook",
            &format!("Starting refresh every {}ms", config.interval_ms),
        );
        let interval = Interval::new(config.interval_ms, move || refresh_fn.emit(()));

        move || {
            drop(interval);
            Logger::debug_with_component("periodic-refresh-hook", "Periodic refresh cleaned up");
        }
    });
}
