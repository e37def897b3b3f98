//! Shared fixtures for integration tests
//!
//! Integration tests load the brake system fixture from `tests/fixtures` or
//! assemble small documents from the builders below.

#![allow(dead_code)]

use std::path::PathBuf;

use arxml_export::{Model, ShortNamePath};

/// Namespace used by every generated document
pub const NAMESPACE: &str = "http://autosar.org/schema/r4.0";

/// Realistic document with sensor, controller, actuator and composition
pub const BRAKE_SYSTEM: &str = "brake_system.arxml";

/// Absolute path of a file in `tests/fixtures`
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Raw bytes of a fixture file
pub fn fixture_bytes(name: &str) -> Vec<u8> {
    std::fs::read(fixture_path(name))
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", name, e))
}

/// The brake system fixture as a model
pub fn brake_system() -> Model {
    Model::from_bytes(&fixture_bytes(BRAKE_SYSTEM)).expect("brake system fixture should parse")
}

/// Shorthand for building paths in assertions
pub fn path(text: &str) -> ShortNamePath {
    ShortNamePath::parse(text)
}

/// Wrap packages into an AUTOSAR document
pub fn document(packages: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<AUTOSAR xmlns="{}">
  <AR-PACKAGES>
{}
  </AR-PACKAGES>
</AUTOSAR>
"#,
        NAMESPACE, packages
    )
}

/// One package holding `elements`
pub fn package(name: &str, elements: &str) -> String {
    format!(
        r#"    <AR-PACKAGE>
      <SHORT-NAME>{}</SHORT-NAME>
      <ELEMENTS>
{}
      </ELEMENTS>
    </AR-PACKAGE>"#,
        name, elements
    )
}

/// Two components joined by one assembly connector
///
/// `/Sys/Caller` calls `Get` on `/Sys/Callee` from runnable `Poll` through
/// the `Link` connector of composition `/Sys/Top`.
pub fn two_component_system() -> String {
    document(&package(
        "Sys",
        r#"
        <CLIENT-SERVER-INTERFACE>
          <SHORT-NAME>Service</SHORT-NAME>
          <OPERATIONS>
            <CLIENT-SERVER-OPERATION><SHORT-NAME>Get</SHORT-NAME></CLIENT-SERVER-OPERATION>
          </OPERATIONS>
        </CLIENT-SERVER-INTERFACE>
        <APPLICATION-SW-COMPONENT-TYPE>
          <SHORT-NAME>Caller</SHORT-NAME>
          <PORTS>
            <R-PORT-PROTOTYPE>
              <SHORT-NAME>Client</SHORT-NAME>
              <REQUIRED-INTERFACE-TREF DEST="CLIENT-SERVER-INTERFACE">/Sys/Service</REQUIRED-INTERFACE-TREF>
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
                        <CONTEXT-R-PORT-REF DEST="R-PORT-PROTOTYPE">/Sys/Caller/Client</CONTEXT-R-PORT-REF>
                        <TARGET-REQUIRED-OPERATION-REF DEST="CLIENT-SERVER-OPERATION">/Sys/Service/Get</TARGET-REQUIRED-OPERATION-REF>
                      </OPERATION-IREF>
                    </SYNCHRONOUS-SERVER-CALL-POINT>
                  </SERVER-CALL-POINTS>
                </RUNNABLE-ENTITY>
              </RUNNABLES>
            </SWC-INTERNAL-BEHAVIOR>
          </INTERNAL-BEHAVIORS>
        </APPLICATION-SW-COMPONENT-TYPE>
        <APPLICATION-SW-COMPONENT-TYPE>
          <SHORT-NAME>Callee</SHORT-NAME>
          <PORTS>
            <P-PORT-PROTOTYPE>
              <SHORT-NAME>Server</SHORT-NAME>
              <PROVIDED-INTERFACE-TREF DEST="CLIENT-SERVER-INTERFACE">/Sys/Service</PROVIDED-INTERFACE-TREF>
            </P-PORT-PROTOTYPE>
          </PORTS>
        </APPLICATION-SW-COMPONENT-TYPE>
        <COMPOSITION-SW-COMPONENT-TYPE>
          <SHORT-NAME>Top</SHORT-NAME>
          <COMPONENTS>
            <SW-COMPONENT-PROTOTYPE>
              <SHORT-NAME>caller</SHORT-NAME>
              <TYPE-TREF DEST="APPLICATION-SW-COMPONENT-TYPE">/Sys/Caller</TYPE-TREF>
            </SW-COMPONENT-PROTOTYPE>
            <SW-COMPONENT-PROTOTYPE>
              <SHORT-NAME>callee</SHORT-NAME>
              <TYPE-TREF DEST="APPLICATION-SW-COMPONENT-TYPE">/Sys/Callee</TYPE-TREF>
            </SW-COMPONENT-PROTOTYPE>
          </COMPONENTS>
          <CONNECTORS>
            <ASSEMBLY-SW-CONNECTOR>
              <SHORT-NAME>Link</SHORT-NAME>
              <PROVIDER-IREF>
                <CONTEXT-COMPONENT-REF DEST="SW-COMPONENT-PROTOTYPE">/Sys/Top/callee</CONTEXT-COMPONENT-REF>
                <TARGET-P-PORT-REF DEST="P-PORT-PROTOTYPE">/Sys/Callee/Server</TARGET-P-PORT-REF>
              </PROVIDER-IREF>
              <REQUESTER-IREF>
                <CONTEXT-COMPONENT-REF DEST="SW-COMPONENT-PROTOTYPE">/Sys/Top/caller</CONTEXT-COMPONENT-REF>
                <TARGET-R-PORT-REF DEST="R-PORT-PROTOTYPE">/Sys/Caller/Client</TARGET-R-PORT-REF>
              </REQUESTER-IREF>
            </ASSEMBLY-SW-CONNECTOR>
          </CONNECTORS>
        </COMPOSITION-SW-COMPONENT-TYPE>"#,
    ))
}

/// Component `/Pkg/Machine` whose behavior holds a state machine `Sm`
///
/// States and transitions are raw XML; state paths live below
/// `/Pkg/Machine/Ib/Sm/`. The behavior declares one timing event `Tick`.
pub fn state_machine_component(states: &str, transitions: &str) -> String {
    document(&package(
        "Pkg",
        &format!(
            r#"
        <APPLICATION-SW-COMPONENT-TYPE>
          <SHORT-NAME>Machine</SHORT-NAME>
          <INTERNAL-BEHAVIORS>
            <SWC-INTERNAL-BEHAVIOR>
              <SHORT-NAME>Ib</SHORT-NAME>
              <EVENTS>
                <TIMING-EVENT><SHORT-NAME>Tick</SHORT-NAME></TIMING-EVENT>
              </EVENTS>
              <STATE-MACHINE>
                <SHORT-NAME>Sm</SHORT-NAME>
                <STATES>{}</STATES>
                <TRANSITIONS>{}</TRANSITIONS>
              </STATE-MACHINE>
            </SWC-INTERNAL-BEHAVIOR>
          </INTERNAL-BEHAVIORS>
        </APPLICATION-SW-COMPONENT-TYPE>"#,
            states, transitions
        ),
    ))
}

/// A `<STATE>` element
pub fn state(name: &str, initial: bool) -> String {
    if initial {
        format!("<STATE><SHORT-NAME>{}</SHORT-NAME><INITIAL>true</INITIAL></STATE>", name)
    } else {
        format!("<STATE><SHORT-NAME>{}</SHORT-NAME></STATE>", name)
    }
}

/// A `<TRANSITION>` between two states of `/Pkg/Machine/Ib/Sm`
pub fn transition(source: &str, target: &str) -> String {
    format!(
        "<TRANSITION>\
         <SOURCE-STATE-REF DEST=\"STATE\">/Pkg/Machine/Ib/Sm/{}</SOURCE-STATE-REF>\
         <TARGET-STATE-REF DEST=\"STATE\">/Pkg/Machine/Ib/Sm/{}</TARGET-STATE-REF>\
         <EVENT-REF DEST=\"TIMING-EVENT\">/Pkg/Machine/Ib/Tick</EVENT-REF>\
         </TRANSITION>",
        source, target
    )
}

/// Put `prefix` on every element tag and bind the AUTOSAR namespace to it
pub fn with_namespace_prefix(document: &str, prefix: &str) -> String {
    let mut out = String::with_capacity(document.len() * 2);
    let mut chars = document.chars().peekable();
    while let Some(c) = chars.next() {
        out.push(c);
        if c != '<' {
            continue;
        }
        match chars.peek() {
            Some('?') | Some('!') => {}
            Some('/') => {
                out.push('/');
                chars.next();
                out.push_str(prefix);
                out.push(':');
            }
            _ => {
                out.push_str(prefix);
                out.push(':');
            }
        }
    }
    out.replace(" xmlns=\"", &format!(" xmlns:{}=\"", prefix))
}

/// Encode text as UTF-16 little endian with a byte order mark
pub fn utf16_le(text: &str) -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xFE];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    bytes
}
