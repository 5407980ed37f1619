//! Choice of a single affine for a data array that declares several
//! coordinate systems.

use crate::affine::Affine4;
use crate::gifti::DataArray;
use crate::typedef::XForm;
use log::debug;

/// The spaces searched for, best first.
pub const DEFAULT_AFFINE_PRIORITY: [XForm; 4] = [
    XForm::Mni152,
    XForm::Talairach,
    XForm::AlignedAnat,
    XForm::ScannerAnat,
];

/// Resolve the affine of a data array.
///
/// The array's own space is the `data_space` of its first transform. For
/// each space in `priority`, in order: if the array already lives in it,
/// the identity is returned; otherwise the first transform targeting it
/// is used. Without any transform the result is the identity, and when no
/// space of `priority` is found the last declared matrix is returned.
pub fn resolve_affine(array: &DataArray, priority: &[XForm]) -> Affine4 {
    let (first, last) = match (array.transforms.first(), array.transforms.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Affine4::identity(),
    };
    for space in priority {
        let name = space.gifti_name();
        if first.data_space == name {
            debug!("data array already in {}", name);
            return Affine4::identity();
        }
        if let Some(t) = array
            .transforms
            .iter()
            .find(|t| t.transformed_space == name)
        {
            debug!("using transform from {} to {}", t.data_space, name);
            return t.matrix;
        }
    }
    debug!(
        "no preferred space declared, using transform to {}",
        last.transformed_space
    );
    last.matrix
}
