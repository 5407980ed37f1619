//! Interfaces and implementations specific to integration with `ndarray`.
//!
//! This module introduces the trait [`IntoNdArray`], which is implemented for
//! voxel arrays and enables their mapping into an [`Array`] with a dynamic
//! number of dimensions and an arbitrary element type. Values are cast as
//! with `as`. No intensity scaling is applied.
//!
//! Complex and multi-channel arrays gain one trailing axis, indexing the
//! real and imaginary parts or the channels respectively.
//!
//! #### Note on memory order
//!
//! NIfTI volumes are stored in column major order (also called Fortran
//! order). The resulting array is in that memory order as well, with the
//! first declared axis varying fastest.
//!
//! [`IntoNdArray`]: ./trait.IntoNdArray.html
//! [`Array`]: ../../../ndarray/type.Array.html
use crate::error::{NiftiError, Result};
use crate::volume::element::DataElement;
use crate::volume::VoxelArray;
use ndarray::{Array, IxDyn, ShapeBuilder};

/// Trait for values which can be converted to an ndarray.
///
/// Please see the [module-level documentation](index.html) for more details.
pub trait IntoNdArray {
    /// Consume the value into an ndarray with the given target element
    /// type `T`.
    fn into_ndarray<T: DataElement>(self) -> Result<Array<T, IxDyn>>;
}

impl IntoNdArray for VoxelArray {
    fn into_ndarray<T: DataElement>(self) -> Result<Array<T, IxDyn>> {
        let (mut shape, data) = match self {
            VoxelArray::Scalar { shape, data } => (shape, data.cast::<T>()),
            VoxelArray::Complex { shape, real, imag } => {
                let mut data = real.cast::<T>();
                data.extend(imag.cast::<T>());
                let mut shape = shape;
                shape.push(2);
                (shape, data)
            }
            VoxelArray::MultiChannel {
                shape, channels, ..
            } => {
                let mut shape = shape;
                shape.push(channels.len());
                let data = channels
                    .into_iter()
                    .flat_map(|c| c.cast::<T>())
                    .collect();
                (shape, data)
            }
        };
        if shape.is_empty() {
            shape.push(data.len());
        }
        fortran_array(&shape, data)
    }
}

fn fortran_array<T>(shape: &[usize], data: Vec<T>) -> Result<Array<T, IxDyn>> {
    let got = data.len();
    Array::from_shape_vec(IxDyn(shape).f(), data).map_err(|_| NiftiError::MalformedBuffer {
        expected: shape.iter().product(),
        got,
    })
}
