#![no_main]

use fieldbag::path::{get, has, set};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (String, String, bool)| {
    let (path, value_json, overwrite) = input;

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(&value_json) {
        let mut bag = serde_json::json!({});
        set(&mut bag, &path, value, overwrite);
        let _ = get(&bag, &path);
        let _ = has(&bag, &path);
    }
});
