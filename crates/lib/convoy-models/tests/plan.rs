use convoy_core::bucket::TimeUS;
use convoy_models::error::{CollisionKind, ConfigError, PlanError};
use convoy_models::lifecycle::LifecycleWindow;
use convoy_models::plan::{dump_name, find_collision, AllocationPlan, PlanSettings};

fn secs(value: f64) -> TimeUS {
    TimeUS::from_secs(value).unwrap()
}

fn stock_settings() -> PlanSettings {
    PlanSettings::builder()
        .slot_width(0.001)
        .base_port(2000)
        .port_stride(2000)
        .horizon(40.0)
        .control_guard(0.1)
        .video_warmup(7.0)
        .session_offset(1.0)
        .sender_dump_prefix("resultados/agrup_sd_a01_")
        .receiver_dump_prefix("resultados/agrup_rd_a01_")
        .build()
}

#[test]
fn test_stock_plan() {
    let plan = AllocationPlan::compute(&stock_settings(), 10).unwrap();
    assert_eq!(plan.fleet_size(), 10);
    assert_eq!(plan.horizon, secs(40.0));
    assert_eq!(plan.slot_width, secs(0.001));
    assert_eq!(
        plan.control_window,
        LifecycleWindow {
            start: secs(0.1),
            stop: secs(39.9)
        }
    );

    let first = plan.vehicle(0).unwrap();
    assert_eq!(first.tdma_offset, secs(0.001));
    assert_eq!(first.video_port, 2000);
    assert_eq!(first.sender_dump, "resultados/agrup_sd_a01_0");
    assert_eq!(first.receiver_dump, "resultados/agrup_rd_a01_0");

    let fourth = plan.vehicle(3).unwrap();
    assert_eq!(fourth.tdma_offset, secs(0.004));
    assert_eq!(fourth.video_port, 8000);
    assert_eq!(
        fourth.server_window,
        LifecycleWindow {
            start: secs(7.0),
            stop: secs(40.0)
        }
    );
    assert_eq!(
        fourth.client_window,
        LifecycleWindow {
            start: secs(8.0),
            stop: secs(40.0)
        }
    );
    assert!(plan.vehicle(10).is_none());
}

#[test]
fn test_single_vehicle_plan() {
    let plan = AllocationPlan::compute(&stock_settings(), 1).unwrap();
    assert_eq!(plan.fleet_size(), 1);
    assert_eq!(plan.vehicles[0].tdma_offset, secs(0.001));
    assert_eq!(plan.vehicles[0].video_port, 2000);
}

#[test]
fn test_empty_fleet_still_has_a_control_window() {
    let plan = AllocationPlan::compute(&stock_settings(), 0).unwrap();
    assert_eq!(plan.fleet_size(), 0);
    assert_eq!(plan.control_window.start, secs(0.1));
}

#[test]
fn test_plan_is_repeatable() {
    let settings = stock_settings();
    assert_eq!(
        AllocationPlan::compute(&settings, 10).unwrap(),
        AllocationPlan::compute(&settings, 10).unwrap()
    );
}

#[test]
fn test_zero_slot_width_fails_the_whole_plan() {
    let mut settings = stock_settings();
    settings.slot_width = 0.0;
    assert_eq!(
        AllocationPlan::compute(&settings, 10),
        Err(PlanError::Config(ConfigError::NonPositiveSlotWidth))
    );
}

#[test]
fn test_invalid_seconds_are_rejected() {
    let mut settings = stock_settings();
    settings.horizon = f64::NAN;
    assert!(matches!(
        AllocationPlan::compute(&settings, 10),
        Err(PlanError::Config(ConfigError::InvalidTime { name: "horizon", .. }))
    ));
    settings.horizon = 40.0;
    settings.session_offset = -1.0;
    assert!(matches!(
        AllocationPlan::compute(&settings, 10),
        Err(PlanError::Config(ConfigError::InvalidTime {
            name: "session_offset",
            ..
        }))
    ));
}

#[test]
fn test_sub_microsecond_times_are_rejected() {
    let mut settings = stock_settings();
    settings.slot_width = 4e-7;
    assert_eq!(
        AllocationPlan::compute(&settings, 10),
        Err(PlanError::Config(ConfigError::TimePrecision {
            name: "slot_width",
            value: 4e-7
        }))
    );
    settings.slot_width = 1.5e-6;
    assert_eq!(
        AllocationPlan::compute(&settings, 3),
        Err(PlanError::Config(ConfigError::TimePrecision {
            name: "slot_width",
            value: 1.5e-6
        }))
    );
    settings.slot_width = 0.001;
    settings.control_guard = 3e-7;
    assert!(matches!(
        AllocationPlan::compute(&settings, 10),
        Err(PlanError::Config(ConfigError::TimePrecision {
            name: "control_guard",
            ..
        }))
    ));
}

#[test]
fn test_microsecond_slots_are_exact() {
    let mut settings = stock_settings();
    settings.slot_width = 3e-6;
    let plan = AllocationPlan::compute(&settings, 3).unwrap();
    assert_eq!(plan.slot_width, TimeUS::from(3));
    let offsets: Vec<TimeUS> = plan.vehicles.iter().map(|v| v.tdma_offset).collect();
    assert_eq!(offsets, vec![TimeUS::from(3), TimeUS::from(6), TimeUS::from(9)]);
}

#[test]
fn test_port_overflow_fails_the_whole_plan() {
    assert_eq!(
        AllocationPlan::compute(&stock_settings(), 40),
        Err(PlanError::Config(ConfigError::PortOutOfRange {
            index: 39,
            port: 80000
        }))
    );
}

#[test]
fn test_tampered_plan_reports_collisions() {
    let mut plan = AllocationPlan::compute(&stock_settings(), 4).unwrap();
    assert_eq!(plan.verify(), Ok(()));
    plan.vehicles[2].video_port = plan.vehicles[0].video_port;
    assert_eq!(
        plan.verify(),
        Err(PlanError::Collision {
            kind: CollisionKind::VideoPort,
            value: 2000,
            first: 0,
            second: 2,
        })
    );
    plan.vehicles[3].tdma_offset = plan.vehicles[1].tdma_offset;
    assert!(matches!(
        plan.verify(),
        Err(PlanError::Collision {
            kind: CollisionKind::TdmaOffset,
            first: 1,
            second: 3,
            ..
        })
    ));
}

#[test]
fn test_find_collision() {
    assert_eq!(
        find_collision(CollisionKind::VideoPort, vec![(0, 1), (1, 2), (2, 3)]),
        Ok(())
    );
    assert!(find_collision(CollisionKind::VideoPort, vec![(0, 1), (1, 1)]).is_err());
}

#[test]
fn test_dump_names() {
    assert_eq!(dump_name("agrup_sd_", 7), "agrup_sd_7");
    assert_eq!(dump_name("", 12), "12");
}
