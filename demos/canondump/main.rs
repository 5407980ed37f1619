//! An application for printing the canonical form of a NIfTI file.

use nifti_canon::{NiftiHeader, NiftiObject};
use std::env;

fn main() {
    let mut args = env::args().skip(1);
    let filename = args.next().expect("Path to NIfTI file is required");
    let object = NiftiObject::from_file(filename).expect("Failed to read NIfTI file");
    if let NiftiHeader::Nifti1(h) = object.header() {
        match (h.xyzt_units.space(), h.xyzt_units.time()) {
            (Ok(space), Ok(time)) => println!("{:>16}: {:?} / {:?}", "units", space, time),
            _ => println!("{:>16}: invalid", "units"),
        }
    }
    let canonical = object.into_canonical();
    for attribute in &canonical.attributes {
        println!("{:>16}: {}", attribute.name, attribute.value);
    }
    println!(
        "{:>16}: {:?} x{} ({:?})",
        "data",
        canonical.data.shape(),
        canonical.data.channel_count(),
        canonical.data.element_kind()
    );
}
