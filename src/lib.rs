//! Rust decoding of the NIfTI-1 and NIfTI-2 file formats, and of GIFTI
//! surface data arrays, into a canonical form.
//!
//! Each volumetric file becomes an ordered list of typed attributes plus a
//! voxel array; each GIFTI data array becomes a canonical mesh record. Both
//! are handed to a [`CanonicalSink`], which owns all container specifics.
//!
//! # Example
//!
//! ```no_run
//! use nifti_canon::{convert_volume, MemorySink};
//! use std::fs::File;
//! # use nifti_canon::Result;
//!
//! # fn run() -> Result<()> {
//! let mut sink = MemorySink::default();
//! convert_volume(File::open("minimal.nii")?, &mut sink)?;
//! for attribute in &sink.volumes[0].attributes {
//!     println!("{} = {}", attribute.name, attribute.value);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! [`CanonicalSink`]: ./sink/trait.CanonicalSink.html
#![deny(missing_debug_implementations)]
#![warn(missing_docs, unused_extern_crates, trivial_casts, unused_results)]

pub mod affine;
pub mod attribute;
pub mod bitfield;
pub mod error;
pub mod gifti;
pub mod header;
pub mod object;
pub mod sink;
pub mod typedef;
mod util;
pub mod volume;

pub use crate::affine::{Affine3, Affine4};
pub use crate::attribute::{AttributeValue, CanonicalAttribute, CanonicalVolume};
pub use crate::error::{NiftiError, Result};
pub use crate::gifti::{CanonicalMeshRecord, GiftiDocument, MeshOptions};
pub use crate::header::{NiftiHeader, NiftiVersion};
pub use crate::object::NiftiObject;
pub use crate::sink::{convert_mesh, convert_volume, CanonicalSink, MemorySink};
pub use crate::typedef::{Intent, NiftiType, SliceOrder, Unit, XForm};
pub use crate::util::Endianness;
#[cfg(feature = "ndarray_volumes")]
pub use crate::volume::ndarray::IntoNdArray;
pub use crate::volume::{TypedBuffer, VoxelArray};
