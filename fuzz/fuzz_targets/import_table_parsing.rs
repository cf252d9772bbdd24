#![no_main]
use depwalk::imports::BinaryImportExtractor;
use libfuzzer_sys::fuzz_target;
use std::path::Path;

fuzz_target!(|data: &[u8]| {
    // Malformed headers must come back as errors, never panics
    let extractor = BinaryImportExtractor::new();
    let path = Path::new("fuzz.bin");
    if let Ok(info) = extractor.extract_bytes(path, data) {
        let _ = info.strip.is_fully_stripped();
    }

    // Truncated variants of the same input
    for len in [4usize, 64, 512] {
        if data.len() > len {
            let _ = extractor.extract_bytes(path, &data[..len]);
        }
    }
});
