//! Hand-over of canonical records to a container writer.
//!
//! The `CanonicalSink` trait provides a format-agnostic interface for
//! receiving canonical records. The drivers in this module decode a source
//! and move every record it yields into the sink; sink implementations
//! (HDF5, Zarr, ...) handle the actual storage, including any reversal of
//! axes for their own storage convention.

use crate::attribute::CanonicalVolume;
use crate::error::NiftiError;
use crate::gifti::{canonicalize, CanonicalMeshRecord, GiftiDocument, MeshOptions};
use crate::object::NiftiObject;
use std::io::Read;

/// A consumer of canonical records.
pub trait CanonicalSink {
    /// The sink's error type. Decoding errors are converted into it.
    type Error: From<NiftiError>;

    /// Receive the canonical form of one volumetric file.
    fn write_volume(&mut self, volume: CanonicalVolume) -> Result<(), Self::Error>;

    /// Receive one canonical mesh record.
    fn write_mesh(&mut self, record: CanonicalMeshRecord) -> Result<(), Self::Error>;
}

/// A sink which keeps every record in memory, in arrival order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MemorySink {
    /// Volumes received so far.
    pub volumes: Vec<CanonicalVolume>,
    /// Mesh records received so far.
    pub meshes: Vec<CanonicalMeshRecord>,
}

impl CanonicalSink for MemorySink {
    type Error = NiftiError;

    fn write_volume(&mut self, volume: CanonicalVolume) -> Result<(), Self::Error> {
        self.volumes.push(volume);
        Ok(())
    }

    fn write_mesh(&mut self, record: CanonicalMeshRecord) -> Result<(), Self::Error> {
        self.meshes.push(record);
        Ok(())
    }
}

/// Decode a whole NIfTI stream and pass its canonical form to the sink.
/// Nothing reaches the sink if decoding fails.
pub fn convert_volume<R, S>(source: R, sink: &mut S) -> Result<(), S::Error>
where
    R: Read,
    S: CanonicalSink,
{
    let object = NiftiObject::from_reader(source)?;
    sink.write_volume(object.into_canonical())
}

/// Canonicalize a GIFTI document and pass every record to the sink.
/// Nothing reaches the sink if any data array fails to canonicalize.
pub fn convert_mesh<S>(
    document: &GiftiDocument,
    options: &MeshOptions,
    sink: &mut S,
) -> Result<(), S::Error>
where
    S: CanonicalSink,
{
    for record in canonicalize(document, options)? {
        sink.write_mesh(record)?;
    }
    Ok(())
}
