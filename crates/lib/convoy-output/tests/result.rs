use std::fs;

use tempfile::TempDir;

use convoy_output::result::{OutputSettings, OutputType, Outputs, Results};
use convoy_output::tables::nodes::NodeRow;
use convoy_output::tables::timeline::{TimelineRow, Transition};

fn rsu_row() -> NodeRow {
    NodeRow {
        node_id: 10,
        kind: "RSU".to_string(),
        address: "10.1.1.11".to_string(),
        x: 300.0,
        y: 15.0,
        z: 0.0,
        description: "RSU".to_string(),
        red: 0,
        green: 255,
        blue: 0,
    }
}

#[test]
fn test_stock_outputs() {
    let settings = OutputSettings::default();
    assert_eq!(settings.output_path, "resultados");
    assert_eq!(settings.outputs.len(), 3);
    assert_eq!(settings.outputs[0].output_filename, "agrup_v2x.csv");
}

#[test]
fn test_only_requested_tables_are_written() {
    let temp_dir = TempDir::new().unwrap();
    let settings = OutputSettings {
        output_path: "out".to_string(),
        outputs: vec![Outputs::new(OutputType::Nodes, "nodes.csv")],
    };
    let mut results = Results::new(temp_dir.path(), &settings).unwrap();
    assert!(results.sessions.is_none());
    assert!(results.timeline.is_none());

    results.add_node(rsu_row());
    results.add_transition(TimelineRow {
        time: 7.0,
        app_id: 10,
        node_id: 10,
        app: "VideoServer".to_string(),
        transition: Transition::Start,
    });
    results.close_files().unwrap();

    let nodes = fs::read_to_string(temp_dir.path().join("out").join("nodes.csv")).unwrap();
    let mut lines = nodes.lines();
    assert_eq!(
        lines.next(),
        Some("node_id,kind,address,x,y,z,description,red,green,blue")
    );
    assert_eq!(lines.next(), Some("10,RSU,10.1.1.11,300.0,15.0,0.0,RSU,0,255,0"));
    assert!(!temp_dir.path().join("out").join("agrup_timeline.csv").exists());
}

#[test]
fn test_disabled_results_drop_rows() {
    let mut results = Results::disabled();
    results.add_node(rsu_row());
    results.write_to_file().unwrap();
    results.close_files().unwrap();
}
