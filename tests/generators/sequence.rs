//! Sequence diagram generator tests

use arxml_export::diagram::sequence;
use arxml_export::{AccessKind, ErrorKind, Model};

use crate::common::{brake_system, document, package, path, two_component_system};

#[test]
fn test_single_connector_yields_one_interaction() {
    let model = Model::from_bytes(two_component_system().as_bytes()).unwrap();
    let diagram = sequence::generate(&model, None).unwrap();

    assert_eq!(diagram.interactions.len(), 1);
    let step = &diagram.interactions[0];
    assert_eq!(step.index, 0);
    assert_eq!(step.caller, path("/Sys/Caller"));
    assert_eq!(step.callee, path("/Sys/Callee"));
    assert_eq!(step.operation, "Get");
    assert_eq!(step.access_kind, AccessKind::ServerCall);
    assert_eq!(step.runnable, path("/Sys/Caller/Ib/Poll"));
}

#[test]
fn test_targeted_generation() {
    let model = Model::from_bytes(two_component_system().as_bytes()).unwrap();
    let diagram = sequence::generate(&model, Some(&path("/Sys/Caller"))).unwrap();
    assert_eq!(diagram.target, Some(path("/Sys/Caller")));
    assert_eq!(diagram.interactions.len(), 1);

    // The callee initiates nothing but still sees the incoming call
    let incoming = sequence::generate(&model, Some(&path("/Sys/Callee"))).unwrap();
    assert_eq!(incoming.target, Some(path("/Sys/Callee")));
    assert_eq!(incoming.interactions, diagram.interactions);

    let err = sequence::generate(&model, Some(&path("/Sys/Top"))).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoInteractionsFound);
    assert!(err.to_string().contains("/Sys/Top"));
}

#[test]
fn test_unknown_target() {
    let model = Model::from_bytes(two_component_system().as_bytes()).unwrap();
    let err = sequence::generate(&model, Some(&path("/Sys/Ghost"))).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnresolvedReference);
}

#[test]
fn test_brake_system_interactions() {
    let model = brake_system();
    let diagram = sequence::generate(&model, None).unwrap();

    let steps: Vec<(usize, &str, &str, &str, AccessKind)> = diagram
        .interactions
        .iter()
        .map(|i| {
            (
                i.index,
                i.caller.name().unwrap(),
                i.callee.name().unwrap(),
                i.operation.as_str(),
                i.access_kind,
            )
        })
        .collect();
    assert_eq!(
        steps,
        vec![
            (0, "SpeedSensor", "BrakeController", "Speed", AccessKind::DataSend),
            (1, "BrakeController", "SpeedSensor", "Speed", AccessKind::DataReceive),
            (2, "BrakeController", "BrakeActuator", "Apply", AccessKind::ServerCall),
        ]
    );

    let participants: Vec<String> = diagram.participants().iter().map(|p| p.to_string()).collect();
    assert_eq!(
        participants,
        vec!["/Swc/SpeedSensor", "/Swc/BrakeController", "/Swc/BrakeActuator"]
    );
}

#[test]
fn test_generation_is_deterministic() {
    let model = brake_system();
    let first = sequence::generate(&model, None).unwrap();
    let second = sequence::generate(&brake_system(), None).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_unconnected_ports_yield_nothing() {
    let doc = document(&package(
        "Pkg",
        r#"
        <CLIENT-SERVER-INTERFACE>
          <SHORT-NAME>Service</SHORT-NAME>
          <OPERATIONS><CLIENT-SERVER-OPERATION><SHORT-NAME>Get</SHORT-NAME></CLIENT-SERVER-OPERATION></OPERATIONS>
        </CLIENT-SERVER-INTERFACE>
        <APPLICATION-SW-COMPONENT-TYPE>
          <SHORT-NAME>Lonely</SHORT-NAME>
          <PORTS>
            <R-PORT-PROTOTYPE>
              <SHORT-NAME>Client</SHORT-NAME>
              <REQUIRED-INTERFACE-TREF DEST="CLIENT-SERVER-INTERFACE">/Pkg/Service</REQUIRED-INTERFACE-TREF>
            </R-PORT-PROTOTYPE>
          </PORTS>
          <INTERNAL-BEHAVIORS>
            <SWC-INTERNAL-BEHAVIOR>
              <SHORT-NAME>Ib</SHORT-NAME>
              <RUNNABLES>
                <RUNNABLE-ENTITY>
                  <SHORT-NAME>Poll</SHORT-NAME>
                  <SERVER-CALL-POINTS>
                    <SYNCHRONOUS-SERVER-CALL-POINT>
                      <SHORT-NAME>CallGet</SHORT-NAME>
                      <OPERATION-IREF>
                        <CONTEXT-R-PORT-REF DEST="R-PORT-PROTOTYPE">/Pkg/Lonely/Client</CONTEXT-R-PORT-REF>
                        <TARGET-REQUIRED-OPERATION-REF DEST="CLIENT-SERVER-OPERATION">/Pkg/Service/Get</TARGET-REQUIRED-OPERATION-REF>
                      </OPERATION-IREF>
                    </SYNCHRONOUS-SERVER-CALL-POINT>
                  </SERVER-CALL-POINTS>
                </RUNNABLE-ENTITY>
              </RUNNABLES>
            </SWC-INTERNAL-BEHAVIOR>
          </INTERNAL-BEHAVIORS>
        </APPLICATION-SW-COMPONENT-TYPE>"#,
    ));
    let model = Model::from_bytes(doc.as_bytes()).unwrap();
    let err = sequence::generate(&model, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoInteractionsFound);
    assert!(err.to_string().contains("for /"));
}
