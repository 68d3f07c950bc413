#![no_main]

use libfuzzer_sys::fuzz_target;
use librosple::core::{BookProcessor, Workbook};
use librosple::pdt::PdtProcessor;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    // Must not panic: malformed snapshots and missing sheets are errors.
    if let Ok(workbook) = Workbook::from_json(s) {
        let target = std::env::temp_dir().join("librosple-fuzz");
        let _ = PdtProcessor::default().process(&workbook, &target);
    }
});
