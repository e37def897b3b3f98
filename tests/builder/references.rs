//! Reference resolution tests

use arxml_export::{Error, ErrorKind, Model, ParserConfig};

use crate::common::{document, package, path};

fn component_with_port(interface_ref: &str) -> String {
    format!(
        r#"
        <APPLICATION-SW-COMPONENT-TYPE>
          <SHORT-NAME>Comp</SHORT-NAME>
          <PORTS>
            <R-PORT-PROTOTYPE>
              <SHORT-NAME>In</SHORT-NAME>
              <REQUIRED-INTERFACE-TREF DEST="SENDER-RECEIVER-INTERFACE">{}</REQUIRED-INTERFACE-TREF>
            </R-PORT-PROTOTYPE>
          </PORTS>
        </APPLICATION-SW-COMPONENT-TYPE>"#,
        interface_ref
    )
}

const INTERFACE: &str =
    "<SENDER-RECEIVER-INTERFACE><SHORT-NAME>If</SHORT-NAME></SENDER-RECEIVER-INTERFACE>";

#[test]
fn test_forward_reference_resolves() {
    // The port refers to an interface declared in a later package
    let doc = document(&format!(
        "{}\n{}",
        package("Swc", &component_with_port("/Interfaces/If")),
        package("Interfaces", INTERFACE)
    ));
    let model = Model::from_bytes(doc.as_bytes()).unwrap();
    let component = model.component(&path("/Swc/Comp")).unwrap();
    assert_eq!(component.ports[0].interface, path("/Interfaces/If"));
}

#[test]
fn test_relative_reference_resolves_in_package() {
    let doc = document(&package(
        "Pkg",
        &format!("{}{}", INTERFACE, component_with_port("If")),
    ));
    let model = Model::from_bytes(doc.as_bytes()).unwrap();
    let component = model.component(&path("/Pkg/Comp")).unwrap();
    assert_eq!(component.ports[0].interface, path("/Pkg/If"));
}

#[test]
fn test_unresolved_reference_names_path() {
    let doc = document(&package("Pkg", &component_with_port("/Pkg/Missing")));
    let err = Model::from_bytes(doc.as_bytes()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnresolvedReference);
    match err {
        Error::UnresolvedReference(target) => assert_eq!(target, path("/Pkg/Missing")),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_unresolved_reference_in_unknown_element() {
    // References inside opaque elements must resolve too
    let doc = document(&package(
        "Pkg",
        r#"<SWC-IMPLEMENTATION>
             <SHORT-NAME>Impl</SHORT-NAME>
             <BEHAVIOR-REF DEST="SWC-INTERNAL-BEHAVIOR">/Pkg/Nowhere/Ib</BEHAVIOR-REF>
           </SWC-IMPLEMENTATION>"#,
    ));
    let err = Model::from_bytes(doc.as_bytes()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnresolvedReference);
    assert!(err.to_string().contains("/Pkg/Nowhere/Ib"));
}

#[test]
fn test_external_reference_is_recorded() {
    let doc = document(&package(
        "Pkg",
        &component_with_port("/AUTOSAR_Platform/PortInterfaces/Speed"),
    ));

    let err = Model::from_bytes(doc.as_bytes()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnresolvedReference);

    let config = ParserConfig::new().with_external_prefix("/AUTOSAR_Platform");
    let model = Model::from_bytes_with_config(doc.as_bytes(), &config).unwrap();
    assert_eq!(
        model.external_references,
        vec![path("/AUTOSAR_Platform/PortInterfaces/Speed")]
    );
    let component = model.component(&path("/Pkg/Comp")).unwrap();
    assert_eq!(
        component.ports[0].interface,
        path("/AUTOSAR_Platform/PortInterfaces/Speed")
    );
}

#[test]
fn test_duplicate_short_name_path() {
    let doc = document(&package("Pkg", &format!("{}{}", INTERFACE, INTERFACE)));
    let err = Model::from_bytes(doc.as_bytes()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StructuralViolation);
    assert!(err.to_string().contains("/Pkg/If"));
}

#[test]
fn test_same_short_name_in_different_packages() {
    let doc = document(&format!(
        "{}\n{}",
        package("A", INTERFACE),
        package("B", INTERFACE)
    ));
    let model = Model::from_bytes(doc.as_bytes()).unwrap();
    assert!(model.entity(&path("/A/If")).is_some());
    assert!(model.entity(&path("/B/If")).is_some());
}

#[test]
fn test_reference_to_wrong_kind() {
    let doc = document(&package(
        "Pkg",
        &format!(
            "<IMPLEMENTATION-DATA-TYPE><SHORT-NAME>If</SHORT-NAME></IMPLEMENTATION-DATA-TYPE>{}",
            component_with_port("/Pkg/If")
        ),
    ));
    let err = Model::from_bytes(doc.as_bytes()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StructuralViolation);
    let message = err.to_string();
    assert!(message.contains("REQUIRED-INTERFACE-TREF"), "{}", message);
    assert!(message.contains("a data type"), "{}", message);
}

#[test]
fn test_connector_port_of_wrong_direction() {
    let doc = document(&package(
        "Sys",
        r#"
        <SENDER-RECEIVER-INTERFACE><SHORT-NAME>If</SHORT-NAME></SENDER-RECEIVER-INTERFACE>
        <APPLICATION-SW-COMPONENT-TYPE>
          <SHORT-NAME>A</SHORT-NAME>
          <PORTS>
            <R-PORT-PROTOTYPE>
              <SHORT-NAME>In</SHORT-NAME>
              <REQUIRED-INTERFACE-TREF DEST="SENDER-RECEIVER-INTERFACE">/Sys/If</REQUIRED-INTERFACE-TREF>
            </R-PORT-PROTOTYPE>
          </PORTS>
        </APPLICATION-SW-COMPONENT-TYPE>
        <COMPOSITION-SW-COMPONENT-TYPE>
          <SHORT-NAME>Top</SHORT-NAME>
          <COMPONENTS>
            <SW-COMPONENT-PROTOTYPE>
              <SHORT-NAME>a</SHORT-NAME>
              <TYPE-TREF DEST="APPLICATION-SW-COMPONENT-TYPE">/Sys/A</TYPE-TREF>
            </SW-COMPONENT-PROTOTYPE>
          </COMPONENTS>
          <CONNECTORS>
            <ASSEMBLY-SW-CONNECTOR>
              <SHORT-NAME>Bad</SHORT-NAME>
              <PROVIDER-IREF>
                <CONTEXT-COMPONENT-REF DEST="SW-COMPONENT-PROTOTYPE">/Sys/Top/a</CONTEXT-COMPONENT-REF>
                <TARGET-P-PORT-REF DEST="P-PORT-PROTOTYPE">/Sys/A/In</TARGET-P-PORT-REF>
              </PROVIDER-IREF>
              <REQUESTER-IREF>
                <CONTEXT-COMPONENT-REF DEST="SW-COMPONENT-PROTOTYPE">/Sys/Top/a</CONTEXT-COMPONENT-REF>
                <TARGET-R-PORT-REF DEST="R-PORT-PROTOTYPE">/Sys/A/In</TARGET-R-PORT-REF>
              </REQUESTER-IREF>
            </ASSEMBLY-SW-CONNECTOR>
          </CONNECTORS>
        </COMPOSITION-SW-COMPONENT-TYPE>"#,
    ));
    let err = Model::from_bytes(doc.as_bytes()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StructuralViolation);
    assert!(err.to_string().contains("a provided port"));
}
