#![no_main]

use fieldbag::path::{expand_wildcard_path, flatten, get};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // Use the first byte to determine the split point between path and JSON value.
    let split = data[0] as usize % data.len().max(1);
    let (path_bytes, value_bytes) = data.split_at(split.min(data.len()));

    let path = String::from_utf8_lossy(path_bytes);

    if let Ok(bag) = serde_json::from_slice::<serde_json::Value>(value_bytes) {
        let _ = get(&bag, &path);
        let _ = flatten(&bag);
        let _ = expand_wildcard_path(&bag, &path);
    }
});
