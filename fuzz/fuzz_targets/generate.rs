#![no_main]

use bridgegen::ast::Document;
use bridgegen::Generator;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Only well-formed documents reach the generator
    if let Ok(doc) = serde_json::from_slice::<Document>(data) {
        // Malformed documents must produce an error, never a panic
        let _ = Generator::default().generate(&doc);
    }
});
