use serde::Serialize;
use typed_builder::TypedBuilder;

use convoy_core::bucket::TimeUS;

use crate::error::ConfigError;

/// The simulated-time interval during which one application instance is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LifecycleWindow {
    pub start: TimeUS,
    pub stop: TimeUS,
}

impl LifecycleWindow {
    pub fn duration(&self) -> TimeUS {
        self.stop.checked_sub(self.start).unwrap_or_default()
    }

    pub fn contains(&self, instant: TimeUS) -> bool {
        self.start <= instant && instant <= self.stop
    }
}

/// The start and stop instants of one vehicle's video server and client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionWindows {
    pub vehicle: usize,
    pub server: LifecycleWindow,
    pub client: LifecycleWindow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, TypedBuilder)]
pub struct LifecycleSettings {
    pub horizon: TimeUS,
    pub control_guard: TimeUS,
    pub video_warmup: TimeUS,
    pub session_offset: TimeUS,
}

/// Works out when every application is started and stopped.
///
/// The control applications of all vehicles share `[guard, horizon - guard]`. Each video
/// server runs over `[warmup, horizon]` and its client over `[warmup + offset, horizon]`.
/// Every window is checked once at construction so no window handed out is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleScheduler {
    settings: LifecycleSettings,
}

impl LifecycleScheduler {
    pub fn new(settings: LifecycleSettings) -> Result<Self, ConfigError> {
        let horizon = settings.horizon;
        let guard = settings.control_guard;
        if horizon.is_zero() {
            return Err(ConfigError::NonPositiveHorizon);
        }
        if guard.is_zero() {
            return Err(ConfigError::NonPositiveGuard);
        }
        if guard.as_u64().saturating_mul(2) >= horizon.as_u64() {
            return Err(ConfigError::GuardTooWide { guard, horizon });
        }
        if settings.video_warmup >= horizon {
            return Err(ConfigError::WarmupBeyondHorizon {
                warmup: settings.video_warmup,
                horizon,
            });
        }
        match settings.video_warmup.checked_add(settings.session_offset) {
            Some(start) if start < horizon => {}
            start => {
                return Err(ConfigError::ClientBeyondHorizon {
                    start: start.unwrap_or(TimeUS(u64::MAX)),
                    horizon,
                })
            }
        }
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &LifecycleSettings {
        &self.settings
    }

    pub fn horizon(&self) -> TimeUS {
        self.settings.horizon
    }

    pub fn control_window(&self) -> LifecycleWindow {
        LifecycleWindow {
            start: self.settings.control_guard,
            stop: self.settings.horizon - self.settings.control_guard,
        }
    }

    pub fn server_window(&self) -> LifecycleWindow {
        LifecycleWindow {
            start: self.settings.video_warmup,
            stop: self.settings.horizon,
        }
    }

    pub fn client_window(&self) -> LifecycleWindow {
        LifecycleWindow {
            start: self.settings.video_warmup + self.settings.session_offset,
            stop: self.settings.horizon,
        }
    }

    pub fn session_windows(&self, vehicle_count: usize) -> Vec<SessionWindows> {
        (0..vehicle_count)
            .map(|vehicle| SessionWindows {
                vehicle,
                server: self.server_window(),
                client: self.client_window(),
            })
            .collect()
    }
}
