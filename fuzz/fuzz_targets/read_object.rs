#![no_main]
use libfuzzer_sys::fuzz_target;
use nifti_canon::{convert_volume, MemorySink};

fuzz_target!(|data: &[u8]| {
    let mut sink = MemorySink::default();
    let _ = convert_volume(data, &mut sink);
});
