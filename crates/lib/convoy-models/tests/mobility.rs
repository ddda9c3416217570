use convoy_models::error::ConfigError;
use convoy_models::mobility::{LaneGrid, Point3D, Rectangle};

#[test]
fn test_three_lane_grid() {
    let grid = LaneGrid::default();
    assert_eq!(grid.position_of(0), Point3D::new(0.0, 0.0, 0.0));
    assert_eq!(grid.position_of(1), Point3D::new(5.0, 3.0, 0.0));
    assert_eq!(grid.position_of(2), Point3D::new(10.0, 6.0, 0.0));
    assert_eq!(grid.position_of(3), Point3D::new(15.0, 0.0, 0.0));
    assert_eq!(grid.lane_of(7), 1);
}

#[test]
fn test_single_lane_grid() {
    let grid = LaneGrid {
        lanes: 0,
        spacing: 10.0,
        lane_gap: 3.0,
    };
    assert_eq!(grid.position_of(4), Point3D::new(40.0, 0.0, 0.0));
}

#[test]
fn test_bounds() {
    let bounds = Rectangle::default();
    assert_eq!(bounds.validate(), Ok(()));
    assert_eq!(
        bounds.clamp(Point3D::new(12000.0, -2000.0, 1.0)),
        Point3D::new(10000.0, -1000.0, 1.0)
    );
}

#[test]
fn test_inverted_bounds_are_rejected() {
    let bounds = Rectangle {
        x_min: 10.0,
        x_max: 0.0,
        y_min: 0.0,
        y_max: 1.0,
    };
    assert_eq!(bounds.validate(), Err(ConfigError::InvalidBounds));
}
