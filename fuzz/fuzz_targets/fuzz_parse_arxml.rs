#![no_main]

use arxml_export::diagram::{sequence, state};
use arxml_export::{Model, requirements};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Any model that builds must be safe to hand to every generator
    if let Ok(model) = Model::from_bytes(data) {
        let _ = sequence::generate(&model, None);
        let _ = state::generate_all(&model);
        let _ = requirements::extract(&model);
    }
});
