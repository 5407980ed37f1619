//! This module defines the voxel array, the in-memory form of the data
//! following a NIfTI header.
//!
//! Decoding looks up the header's datatype in the datatype table, reads
//! `product(shape) * channels` elements, and regroups them according to
//! the channel layout. The channel index is always the fastest varying
//! one in the source, and the output buffers keep the header's declared
//! axis order: no axis is reversed here.
//!
//! An integration with `ndarray` is available through the
//! `ndarray_volumes` feature.

pub mod element;
#[cfg(feature = "ndarray_volumes")]
pub mod ndarray;

pub use self::element::{DataElement, TypedBuffer};

use crate::error::{NiftiError, Result};
use crate::header::NiftiHeader;
use crate::typedef::{ChannelLayout, ElementKind};
use log::debug;
use num_complex::Complex64;
use rgb::{RGB8, RGBA8};
use std::io::Read;

/// A decoded voxel array, in the header's declared axis order.
#[derive(Debug, Clone, PartialEq)]
pub enum VoxelArray {
    /// One element per voxel.
    Scalar {
        /// Declared extents.
        shape: Vec<usize>,
        /// Voxel values.
        data: TypedBuffer,
    },
    /// Complex voxels, split into real and imaginary parts.
    Complex {
        /// Declared extents.
        shape: Vec<usize>,
        /// Real parts.
        real: TypedBuffer,
        /// Imaginary parts.
        imag: TypedBuffer,
    },
    /// Several same-shaped channels per voxel.
    MultiChannel {
        /// Declared extents.
        shape: Vec<usize>,
        /// What the channels stand for.
        layout: ChannelLayout,
        /// One buffer per channel, in source order.
        channels: Vec<TypedBuffer>,
    },
}

impl VoxelArray {
    /// Decode the voxel data described by `header` from a byte buffer
    /// holding exactly that data.
    ///
    /// # Errors
    ///
    /// - `NiftiError::UnsupportedDataType` if the datatype code has no
    ///   entry in the datatype table.
    /// - `NiftiError::InconsistentDim` if `dim` is not a valid shape.
    /// - `NiftiError::MalformedBuffer` if the byte count does not match the
    ///   declared extents times the voxel size.
    pub fn from_bytes(header: &NiftiHeader, bytes: &[u8]) -> Result<Self> {
        let descriptor = header.data_type()?.descriptor()?;
        let shape = header.shape()?;
        let channels = descriptor.channels();
        let expected = shape
            .iter()
            .try_fold(descriptor.size_of(), |acc, d| acc.checked_mul(*d))
            .unwrap_or(usize::MAX);
        if bytes.len() != expected {
            return Err(NiftiError::MalformedBuffer {
                expected,
                got: bytes.len(),
            });
        }
        debug!(
            "decoding {:?} voxels of {:?} x{} ({:?})",
            shape, descriptor.element, channels, descriptor.layout
        );

        let data = TypedBuffer::decode(descriptor.element, bytes, header.endianness())?;
        let array = match descriptor.layout {
            ChannelLayout::Scalar => VoxelArray::Scalar { shape, data },
            ChannelLayout::Complex => {
                let (real, imag) = data.split_pairs();
                VoxelArray::Complex { shape, real, imag }
            }
            layout => VoxelArray::MultiChannel {
                shape,
                layout,
                channels: data.deinterleave(channels),
            },
        };
        Ok(array)
    }

    /// Read the voxel data described by `header` from the rest of the
    /// given source. The whole source is read into memory first.
    pub fn from_reader<R: Read>(header: &NiftiHeader, mut source: R) -> Result<Self> {
        let mut raw = Vec::new();
        let _ = source.read_to_end(&mut raw)?;
        VoxelArray::from_bytes(header, &raw)
    }

    /// The declared extents.
    pub fn shape(&self) -> &[usize] {
        match self {
            VoxelArray::Scalar { shape, .. }
            | VoxelArray::Complex { shape, .. }
            | VoxelArray::MultiChannel { shape, .. } => shape,
        }
    }

    /// The primitive element kind of every buffer.
    pub fn element_kind(&self) -> ElementKind {
        match self {
            VoxelArray::Scalar { data, .. } => data.kind(),
            VoxelArray::Complex { real, .. } => real.kind(),
            VoxelArray::MultiChannel { channels, .. } => channels
                .first()
                .map(TypedBuffer::kind)
                .unwrap_or(ElementKind::Uint8),
        }
    }

    /// Number of buffers making up the array.
    pub fn channel_count(&self) -> usize {
        match self {
            VoxelArray::Scalar { .. } => 1,
            VoxelArray::Complex { .. } => 2,
            VoxelArray::MultiChannel { channels, .. } => channels.len(),
        }
    }

    /// Pair up real and imaginary parts, if this is a complex array.
    pub fn complex_values(&self) -> Option<Vec<Complex64>> {
        match self {
            VoxelArray::Complex { real, imag, .. } => {
                let re = real.clone().cast::<f64>();
                let im = imag.clone().cast::<f64>();
                Some(
                    re.into_iter()
                        .zip(im)
                        .map(|(re, im)| Complex64::new(re, im))
                        .collect(),
                )
            }
            _ => None,
        }
    }

    /// Gather the channels of an RGB24 array into pixels.
    pub fn rgb_pixels(&self) -> Option<Vec<RGB8>> {
        match self {
            VoxelArray::MultiChannel {
                layout: ChannelLayout::Rgb,
                channels,
                ..
            } => match channels.as_slice() {
                [TypedBuffer::Uint8(r), TypedBuffer::Uint8(g), TypedBuffer::Uint8(b)] => Some(
                    r.iter()
                        .zip(g)
                        .zip(b)
                        .map(|((r, g), b)| RGB8::new(*r, *g, *b))
                        .collect(),
                ),
                _ => None,
            },
            _ => None,
        }
    }

    /// Gather the channels of an RGBA32 array into pixels.
    pub fn rgba_pixels(&self) -> Option<Vec<RGBA8>> {
        match self {
            VoxelArray::MultiChannel {
                layout: ChannelLayout::Rgba,
                channels,
                ..
            } => match channels.as_slice() {
                [TypedBuffer::Uint8(r), TypedBuffer::Uint8(g), TypedBuffer::Uint8(b), TypedBuffer::Uint8(a)] => {
                    Some(
                        r.iter()
                            .zip(g)
                            .zip(b)
                            .zip(a)
                            .map(|(((r, g), b), a)| RGBA8::new(*r, *g, *b, *a))
                            .collect(),
                    )
                }
                _ => None,
            },
            _ => None,
        }
    }
}
