#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Element tree construction must reject malformed input without panicking
    if let Ok(root) = arxml_export::xml::parse_document(data) {
        let _ = root.descendants().count();
        let _ = root.collected_text();
    }
});
