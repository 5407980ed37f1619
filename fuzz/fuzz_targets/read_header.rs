#![no_main]
use libfuzzer_sys::fuzz_target;
use nifti_canon::attribute::canonical_attributes;
use nifti_canon::NiftiHeader;

fuzz_target!(|data: &[u8]| {
    if let Ok(header) = NiftiHeader::from_reader(data) {
        let _ = header.shape();
        let _ = header.data_type().and_then(|t| t.descriptor());
        let _ = header.qform();
        let _ = header.sform();
        let _ = header.intent();
        let _ = header.slice_order();
        let _ = canonical_attributes(&header);
    }
});
