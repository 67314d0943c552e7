//! Integration tests running the bundled scenarios.

use zwave_alarm_replay::{run_scenario, ReplayError, ReplayReport, Scenario};

fn run(file: &str) -> ReplayReport {
    let path = format!("{}/scenarios/{}", env!("CARGO_MANIFEST_DIR"), file);
    let scenario = Scenario::load(&path).expect("Failed to load scenario");
    run_scenario(&scenario).expect("Replay failed")
}

fn commands(report: &ReplayReport) -> Vec<&str> {
    report.frames.iter().map(|f| f.command.as_str()).collect()
}

// ============================================================================
// Bundled Scenarios
// ============================================================================

#[test]
fn test_smoke_v3_scenario() {
    let report = run("smoke_v3.yaml");

    assert_eq!(report.name, "smoke detector v3");
    assert_eq!(report.version, 3);
    assert!(report.steps.iter().all(|s| s.accepted));
    assert_eq!(commands(&report), vec!["71 07", "71 01 01", "71 04 00 01 01"]);
    assert_eq!(report.frames[1].queue, "query");
    assert_eq!(report.frames[2].queue, "send");

    let indices: Vec<u16> = report.slots.iter().map(|s| s.index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 4, 7]);

    let smoke = report.slot(1, 4).unwrap();
    assert_eq!(smoke.label, "Smoke");
    assert_eq!(smoke.value, 0);
    assert_eq!(smoke.refreshes, 2);
    assert_eq!(report.slot(1, 7).unwrap().label, "Smoke Replacement Required");

    assert_eq!(report.capabilities.len(), 1);
    let caps = &report.capabilities[0];
    assert_eq!(caps.types, vec!["Smoke".to_string()]);
    assert_eq!(caps.events.get("Smoke"), Some(&vec![0, 1, 4]));
}

#[test]
fn test_flood_v2_scenario() {
    let report = run("flood_v2.yaml");

    assert_eq!(
        commands(&report),
        vec!["71 07", "71 04 00 00", "71 04 00 05"]
    );
    assert_eq!(report.slot(1, 3).unwrap().label, "General");
    assert_eq!(report.slot(1, 8).unwrap().label, "Flood");
    assert_eq!(report.slot(1, 8).unwrap().value, 2);
    assert_eq!(report.slot(1, 2).unwrap().value, 12);
    assert_eq!(report.slot(1, 1).unwrap().value, 0xFF);
    assert_eq!(report.slots.len(), 5);
}

#[test]
fn test_legacy_v1_scenario() {
    let report = run("legacy_v1.yaml");

    assert_eq!(commands(&report), vec!["71 04"]);
    assert_eq!(report.steps[1].frames_sent, 1);
    assert!(report.steps[2].accepted);
    assert!(!report.steps[3].accepted);
    assert_eq!(report.slot(1, 0).unwrap().value, 2);
    assert_eq!(report.slot(1, 1).unwrap().value, 0x50);
    assert!(report.capabilities.is_empty());
}

// ============================================================================
// Output and Errors
// ============================================================================

#[test]
fn test_json_output() {
    let report = run("smoke_v3.yaml");
    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

    assert_eq!(json["node"], 7);
    assert_eq!(json["frames"].as_array().unwrap().len(), 3);
    assert_eq!(json["capabilities"][0]["events"]["Smoke"][2], 4);
}

#[test]
fn test_missing_file() {
    let err = Scenario::load("scenarios/does_not_exist.yaml").unwrap_err();
    assert!(matches!(err, ReplayError::Io { .. }));
}
