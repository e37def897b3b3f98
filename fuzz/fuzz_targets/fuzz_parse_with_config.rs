#![no_main]

use arxml_export::{Model, ParserConfig, RequirementMapping};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Fuzz with external packages and an extended annotation vocabulary
    let config = ParserConfig::new()
        .with_external_prefix("/AUTOSAR_Platform")
        .with_requirement_mapping(RequirementMapping::default().with_tag("SPEC-ITEM"));

    let _ = Model::from_bytes_with_config(data, &config);
});
