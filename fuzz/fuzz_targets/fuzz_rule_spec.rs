#![no_main]

use fieldbag::Validator;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (String, String)| {
    let (path, spec) = input;

    // Construction must either resolve or fail with a ConfigError, never panic.
    let rules = serde_json::json!({ path: spec });
    if let Ok(mut validation) = Validator::default().make(serde_json::json!({}), &rules) {
        validation.validate();
        let _ = validation.passes();
    }
});
