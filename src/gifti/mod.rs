//! The surface mesh path.
//!
//! GIFTI files are XML documents whose data arrays hold base64, possibly
//! compressed, binary payloads. Parsing that XML is left to the caller:
//! this module starts from a [`GiftiDocument`] whose arrays already carry
//! their raw payload bytes, and turns each logical array into a
//! [`CanonicalMeshRecord`].
//!
//! [`GiftiDocument`]: ./struct.GiftiDocument.html
//! [`CanonicalMeshRecord`]: ./canonical/struct.CanonicalMeshRecord.html

pub mod affine;
pub mod canonical;
pub mod intent;

pub use self::affine::{resolve_affine, DEFAULT_AFFINE_PRIORITY};
pub use self::canonical::{canonicalize, CanonicalMeshRecord, MeshOptions};
pub use self::intent::{resolve_intent, MeshGroup, ResolvedIntent};

use crate::affine::Affine4;
use crate::error::{NiftiError, Result};
use crate::typedef::{ChannelLayout, ElementKind, NiftiType};
use crate::util::Endianness;
use crate::volume::TypedBuffer;

/// A parsed GIFTI document.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct GiftiDocument {
    /// Data arrays, in document order.
    pub data_arrays: Vec<DataArray>,
    /// The document's label table.
    pub labels: Vec<Label>,
    /// Document level metadata, in document order.
    pub metadata: Vec<(String, String)>,
}

/// One `DataArray` element.
#[derive(Debug, Clone, PartialEq)]
pub struct DataArray {
    /// The `Intent` attribute, such as `NIFTI_INTENT_POINTSET`.
    pub intent: String,
    /// The `DataType` attribute, either a `NIFTI_TYPE_*` name or a
    /// decimal code.
    pub data_type: String,
    /// The `Dim0`, `Dim1`, ... attributes.
    pub dims: Vec<usize>,
    /// Byte order of `data`.
    pub endianness: Endianness,
    /// The decoded payload.
    pub data: Vec<u8>,
    /// Declared coordinate systems, in document order.
    pub transforms: Vec<CoordinateTransform>,
    /// Array level metadata, in document order.
    pub metadata: Vec<(String, String)>,
}

impl Default for DataArray {
    fn default() -> Self {
        DataArray {
            intent: String::new(),
            data_type: String::new(),
            dims: Vec::new(),
            endianness: Endianness::Little,
            data: Vec::new(),
            transforms: Vec::new(),
            metadata: Vec::new(),
        }
    }
}

impl DataArray {
    /// The primitive element kind named by `data_type`.
    ///
    /// # Errors
    ///
    /// - `NiftiError::UnknownElementType` if the name or code is not a
    ///   known scalar type.
    pub fn element_kind(&self) -> Result<ElementKind> {
        let unknown = || NiftiError::UnknownElementType(self.data_type.clone());
        let data_type = NiftiType::from_gifti_name(&self.data_type).ok_or_else(unknown)?;
        match data_type.descriptor() {
            Ok(d) if d.layout == ChannelLayout::Scalar => Ok(d.element),
            _ => Err(unknown()),
        }
    }

    /// Decode the payload into typed elements.
    ///
    /// # Errors
    ///
    /// - `NiftiError::UnknownElementType` as in `element_kind`.
    /// - `NiftiError::MalformedBuffer` if the payload length is not the
    ///   product of `dims` times the element width.
    pub fn decode(&self) -> Result<TypedBuffer> {
        let kind = self.element_kind()?;
        let expected = self
            .dims
            .iter()
            .try_fold(kind.size_of(), |acc, d| acc.checked_mul(*d))
            .unwrap_or(usize::MAX);
        if self.data.len() != expected {
            return Err(NiftiError::MalformedBuffer {
                expected,
                got: self.data.len(),
            });
        }
        TypedBuffer::decode(kind, &self.data, self.endianness)
    }
}

/// One `CoordinateSystemTransformMatrix` element.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateTransform {
    /// The `DataSpace`, e.g. `NIFTI_XFORM_SCANNER_ANAT`.
    pub data_space: String,
    /// The `TransformedSpace`.
    pub transformed_space: String,
    /// Maps `data_space` to `transformed_space`.
    pub matrix: Affine4,
}

/// One `Label` of the document's label table.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    /// The integer key used in label arrays.
    pub key: i32,
    /// The label text.
    pub name: String,
    /// RGBA color, if declared.
    pub color: Option<[f32; 4]>,
}
