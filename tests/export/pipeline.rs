//! Pipeline tests: option selection, failure isolation and written files

use std::fs;

use arxml_export::export::{self, ExportOptions};
use arxml_export::{ErrorKind, ParserConfig};

use crate::common::{BRAKE_SYSTEM, document, fixture_bytes, package, path, two_component_system};

#[test]
fn test_all_options_on_brake_system() {
    let bytes = fixture_bytes(BRAKE_SYSTEM);
    let report = export::run(&bytes, &ParserConfig::new(), &ExportOptions::all()).unwrap();

    assert!(report.failures().is_empty());
    assert_eq!(report.sequence.as_ref().unwrap().as_ref().unwrap().interactions.len(), 3);
    assert_eq!(report.state.as_ref().unwrap().as_ref().unwrap().len(), 1);
    assert_eq!(report.requirements.as_ref().unwrap().len(), 3);
}

#[test]
fn test_unrequested_options_are_skipped() {
    let bytes = fixture_bytes(BRAKE_SYSTEM);
    let options = ExportOptions {
        requirements: true,
        ..ExportOptions::default()
    };
    let report = export::run(&bytes, &ParserConfig::new(), &options).unwrap();
    assert!(report.sequence.is_none());
    assert!(report.state.is_none());
    assert!(report.requirements.is_some());
}

#[test]
fn test_state_failure_does_not_hide_other_artifacts() {
    let report = export::run(
        two_component_system().as_bytes(),
        &ParserConfig::new(),
        &ExportOptions::all(),
    )
    .unwrap();

    let failures = report.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, "state");
    assert_eq!(failures[0].1.kind(), ErrorKind::NoStateMachineFound);

    assert!(matches!(report.sequence, Some(Ok(_))));
    assert!(matches!(report.requirements, Some(ref r) if r.is_empty()));
}

#[test]
fn test_component_restriction() {
    let bytes = fixture_bytes(BRAKE_SYSTEM);
    let options = ExportOptions::all().with_component("/Swc/SpeedSensor");
    let report = export::run(&bytes, &ParserConfig::new(), &options).unwrap();

    let sequence = report.sequence.as_ref().unwrap().as_ref().unwrap();
    assert_eq!(sequence.interactions.len(), 2);
    assert_eq!(sequence.interactions[0].caller, path("/Swc/SpeedSensor"));
    assert_eq!(sequence.interactions[1].callee, path("/Swc/SpeedSensor"));

    let failures = report.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].1.kind(), ErrorKind::NoStateMachineFound);
}

#[test]
fn test_parse_failure_aborts_run() {
    let err = export::run(b"<AUTOSAR>", &ParserConfig::new(), &ExportOptions::all()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedXml);
}

#[test]
fn test_write_report_files() {
    let dir = tempfile::tempdir().unwrap();
    let bytes = fixture_bytes(BRAKE_SYSTEM);
    let report = export::run(&bytes, &ParserConfig::new(), &ExportOptions::all()).unwrap();

    let written = export::write_report(&report, dir.path(), "brake").unwrap();
    let names: Vec<String> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "brake_requirements.xlsx",
            "brake_sequence.puml",
            "brake_state_BrakeController.puml",
        ]
    );

    let state = fs::read_to_string(dir.path().join("brake_state_BrakeController.puml")).unwrap();
    assert!(state.contains("note right of s3 : unreachable"));
}

#[test]
fn test_write_report_skips_failed_options() {
    let dir = tempfile::tempdir().unwrap();
    let report = export::run(
        two_component_system().as_bytes(),
        &ParserConfig::new(),
        &ExportOptions::all(),
    )
    .unwrap();

    let written = export::write_report(&report, dir.path(), "sys").unwrap();
    assert_eq!(written.len(), 2);
    assert!(dir.path().join("sys_requirements.xlsx").exists());
    assert!(dir.path().join("sys_sequence.puml").exists());
}

fn single_state_component(package_name: &str) -> String {
    package(
        package_name,
        r#"<APPLICATION-SW-COMPONENT-TYPE>
             <SHORT-NAME>Ctrl</SHORT-NAME>
             <INTERNAL-BEHAVIORS>
               <SWC-INTERNAL-BEHAVIOR>
                 <SHORT-NAME>Ib</SHORT-NAME>
                 <STATE-MACHINE>
                   <SHORT-NAME>Sm</SHORT-NAME>
                   <STATES><STATE><SHORT-NAME>Only</SHORT-NAME><INITIAL>true</INITIAL></STATE></STATES>
                 </STATE-MACHINE>
               </SWC-INTERNAL-BEHAVIOR>
             </INTERNAL-BEHAVIORS>
           </APPLICATION-SW-COMPONENT-TYPE>"#,
    )
}

#[test]
fn test_write_report_keeps_same_named_components_apart() {
    let doc = document(&[single_state_component("A"), single_state_component("B")].concat());
    let options = ExportOptions {
        state: true,
        ..ExportOptions::default()
    };
    let report = export::run(doc.as_bytes(), &ParserConfig::new(), &options).unwrap();
    assert_eq!(report.state.as_ref().unwrap().as_ref().unwrap().len(), 2);

    let dir = tempfile::tempdir().unwrap();
    let written = export::write_report(&report, dir.path(), "x").unwrap();
    let names: Vec<String> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["x_state_A_Ctrl.puml", "x_state_B_Ctrl.puml"]);

    let first = fs::read_to_string(dir.path().join("x_state_A_Ctrl.puml")).unwrap();
    let second = fs::read_to_string(dir.path().join("x_state_B_Ctrl.puml")).unwrap();
    assert_ne!(first, second);
}
