#![no_main]

use libfuzzer_sys::fuzz_target;
use plugtest_core::{Test, TestPath};

fuzz_target!(|data: &[u8]| {
    // Test paths arrive as lossily converted command-line text
    let path = String::from_utf8_lossy(data);
    let root = plugtest_sample::sample_suite();
    if let Ok(resolved) = TestPath::resolve(&root, &path) {
        // A non-empty path always lands on a test named after its last segment
        if let Some(last) = path.rsplit('/').next().filter(|_| !path.is_empty()) {
            assert_eq!(resolved.child_test().name(), last);
        }
    }
});
