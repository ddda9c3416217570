use convoy_core::bucket::TimeUS;
use convoy_models::error::ConfigError;
use convoy_models::lifecycle::{LifecycleScheduler, LifecycleSettings, LifecycleWindow};

fn secs(value: f64) -> TimeUS {
    TimeUS::from_secs(value).unwrap()
}

fn settings(horizon: f64, guard: f64, warmup: f64, offset: f64) -> LifecycleSettings {
    LifecycleSettings::builder()
        .horizon(secs(horizon))
        .control_guard(secs(guard))
        .video_warmup(secs(warmup))
        .session_offset(secs(offset))
        .build()
}

#[test]
fn test_stock_windows() {
    let scheduler = LifecycleScheduler::new(settings(40.0, 0.1, 7.0, 1.0)).unwrap();
    assert_eq!(
        scheduler.control_window(),
        LifecycleWindow {
            start: secs(0.1),
            stop: secs(39.9)
        }
    );
    assert_eq!(
        scheduler.server_window(),
        LifecycleWindow {
            start: secs(7.0),
            stop: secs(40.0)
        }
    );
    assert_eq!(
        scheduler.client_window(),
        LifecycleWindow {
            start: secs(8.0),
            stop: secs(40.0)
        }
    );
}

#[test]
fn test_client_starts_one_offset_after_its_server() {
    let scheduler = LifecycleScheduler::new(settings(40.0, 0.1, 7.0, 1.0)).unwrap();
    for session in scheduler.session_windows(4) {
        assert_eq!(session.client.start - session.server.start, secs(1.0));
        assert_eq!(session.client.stop, session.server.stop);
    }
}

#[test]
fn test_zero_offset_shares_the_start() {
    let scheduler = LifecycleScheduler::new(settings(40.0, 0.1, 7.0, 0.0)).unwrap();
    assert_eq!(scheduler.server_window(), scheduler.client_window());
}

#[test]
fn test_degenerate_windows_are_rejected() {
    assert_eq!(
        LifecycleScheduler::new(settings(0.0, 0.1, 7.0, 1.0)),
        Err(ConfigError::NonPositiveHorizon)
    );
    assert_eq!(
        LifecycleScheduler::new(settings(40.0, 0.0, 7.0, 1.0)),
        Err(ConfigError::NonPositiveGuard)
    );
    assert_eq!(
        LifecycleScheduler::new(settings(40.0, 20.0, 7.0, 1.0)),
        Err(ConfigError::GuardTooWide {
            guard: secs(20.0),
            horizon: secs(40.0)
        })
    );
    assert_eq!(
        LifecycleScheduler::new(settings(5.0, 0.1, 7.0, 1.0)),
        Err(ConfigError::WarmupBeyondHorizon {
            warmup: secs(7.0),
            horizon: secs(5.0)
        })
    );
    assert_eq!(
        LifecycleScheduler::new(settings(8.0, 0.1, 7.0, 1.0)),
        Err(ConfigError::ClientBeyondHorizon {
            start: secs(8.0),
            horizon: secs(8.0)
        })
    );
}

#[test]
fn test_window_helpers() {
    let window = LifecycleWindow {
        start: secs(7.0),
        stop: secs(40.0),
    };
    assert_eq!(window.duration(), secs(33.0));
    assert!(window.contains(secs(7.0)));
    assert!(window.contains(secs(40.0)));
    assert!(!window.contains(secs(6.9)));
}
