//! This module contains multiple types defined by the standard.
//! `NiftiType` is the entry point to the datatype table: each code maps
//! to a [`DatatypeDescriptor`] telling how many elements of which
//! primitive kind make up one voxel. The remaining enums give typed
//! views over header codes and over the names used by GIFTI documents.
//!
//! [`DatatypeDescriptor`]: ./struct.DatatypeDescriptor.html

use crate::error::{NiftiError, Result};
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

/// Data type for representing a NIFTI value type in a volume.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, FromPrimitive)]
pub enum NiftiType {
    /// unsigned char.
    // NIFTI_TYPE_UINT8           2
    Uint8 = 2,
    /// signed short.
    // NIFTI_TYPE_INT16           4
    Int16 = 4,
    /// signed int.
    // NIFTI_TYPE_INT32           8
    Int32 = 8,
    /// 32 bit float.
    // NIFTI_TYPE_FLOAT32        16
    Float32 = 16,
    /// 64 bit complex = 2 32 bit floats.
    // NIFTI_TYPE_COMPLEX64      32
    Complex64 = 32,
    /// 64 bit float = double.
    // NIFTI_TYPE_FLOAT64        64
    Float64 = 64,
    /// 3 8 bit bytes.
    // NIFTI_TYPE_RGB24         128
    Rgb24 = 128,
    /// signed char.
    // NIFTI_TYPE_INT8          256
    Int8 = 256,
    /// unsigned short.
    // NIFTI_TYPE_UINT16        512
    Uint16 = 512,
    /// unsigned int.
    // NIFTI_TYPE_UINT32        768
    Uint32 = 768,
    /// signed long long.
    // NIFTI_TYPE_INT64        1024
    Int64 = 1024,
    /// unsigned long long.
    // NIFTI_TYPE_UINT64       1280
    Uint64 = 1280,
    /// 128 bit float = long double.
    // NIFTI_TYPE_FLOAT128     1536
    Float128 = 1536,
    /// 128 bit complex = 2 64 bit floats.
    // NIFTI_TYPE_COMPLEX128   1792
    Complex128 = 1792,
    /// 256 bit complex = 2 128 bit floats
    // NIFTI_TYPE_COMPLEX256   2048
    Complex256 = 2048,
    /// 4 8 bit bytes.
    // NIFTI_TYPE_RGBA32       2304
    Rgba32 = 2304,
}

impl NiftiType {
    /// Validate a raw datatype code.
    ///
    /// # Errors
    ///
    /// - `NiftiError::UnsupportedDataType` if the code is not in the table.
    pub fn from_code(code: i16) -> Result<Self> {
        FromPrimitive::from_i16(code).ok_or(NiftiError::UnsupportedDataType(code))
    }

    /// Retrieve the size of a full voxel of this data type, in bytes.
    pub fn size_of(self) -> usize {
        use NiftiType::*;
        match self {
            Int8 | Uint8 => 1,
            Int16 | Uint16 => 2,
            Rgb24 => 3,
            Int32 | Uint32 | Float32 | Rgba32 => 4,
            Int64 | Uint64 | Float64 | Complex64 => 8,
            Float128 | Complex128 => 16,
            Complex256 => 32,
        }
    }

    /// Look up how a voxel of this type is laid out in memory.
    ///
    /// # Errors
    ///
    /// - `NiftiError::UnsupportedDataType` for types without a native
    ///   element type (128-bit floats and the complex numbers built on them).
    pub fn descriptor(self) -> Result<DatatypeDescriptor> {
        use self::ChannelLayout as L;
        use self::ElementKind as K;
        let (element, layout) = match self {
            NiftiType::Uint8 => (K::Uint8, L::Scalar),
            NiftiType::Int8 => (K::Int8, L::Scalar),
            NiftiType::Uint16 => (K::Uint16, L::Scalar),
            NiftiType::Int16 => (K::Int16, L::Scalar),
            NiftiType::Uint32 => (K::Uint32, L::Scalar),
            NiftiType::Int32 => (K::Int32, L::Scalar),
            NiftiType::Uint64 => (K::Uint64, L::Scalar),
            NiftiType::Int64 => (K::Int64, L::Scalar),
            NiftiType::Float32 => (K::Float32, L::Scalar),
            NiftiType::Float64 => (K::Float64, L::Scalar),
            NiftiType::Complex64 => (K::Float32, L::Complex),
            NiftiType::Complex128 => (K::Float64, L::DoublePair),
            NiftiType::Rgb24 => (K::Uint8, L::Rgb),
            NiftiType::Rgba32 => (K::Uint8, L::Rgba),
            NiftiType::Float128 | NiftiType::Complex256 => {
                return Err(NiftiError::UnsupportedDataType(self as i16))
            }
        };
        Ok(DatatypeDescriptor { element, layout })
    }

    /// The name of this type as written in GIFTI `DataType` attributes.
    pub fn gifti_name(self) -> &'static str {
        use NiftiType::*;
        match self {
            Uint8 => "NIFTI_TYPE_UINT8",
            Int16 => "NIFTI_TYPE_INT16",
            Int32 => "NIFTI_TYPE_INT32",
            Float32 => "NIFTI_TYPE_FLOAT32",
            Complex64 => "NIFTI_TYPE_COMPLEX64",
            Float64 => "NIFTI_TYPE_FLOAT64",
            Rgb24 => "NIFTI_TYPE_RGB24",
            Int8 => "NIFTI_TYPE_INT8",
            Uint16 => "NIFTI_TYPE_UINT16",
            Uint32 => "NIFTI_TYPE_UINT32",
            Int64 => "NIFTI_TYPE_INT64",
            Uint64 => "NIFTI_TYPE_UINT64",
            Float128 => "NIFTI_TYPE_FLOAT128",
            Complex128 => "NIFTI_TYPE_COMPLEX128",
            Complex256 => "NIFTI_TYPE_COMPLEX256",
            Rgba32 => "NIFTI_TYPE_RGBA32",
        }
    }

    /// Parse a GIFTI `DataType` value. Both the symbolic name and the
    /// decimal code are accepted.
    pub fn from_gifti_name(name: &str) -> Option<Self> {
        if let Ok(code) = name.trim().parse::<i16>() {
            return FromPrimitive::from_i16(code);
        }
        NiftiType::ALL
            .iter()
            .copied()
            .find(|t| t.gifti_name() == name.trim())
    }

    const ALL: [NiftiType; 16] = [
        NiftiType::Uint8,
        NiftiType::Int16,
        NiftiType::Int32,
        NiftiType::Float32,
        NiftiType::Complex64,
        NiftiType::Float64,
        NiftiType::Rgb24,
        NiftiType::Int8,
        NiftiType::Uint16,
        NiftiType::Uint32,
        NiftiType::Int64,
        NiftiType::Uint64,
        NiftiType::Float128,
        NiftiType::Complex128,
        NiftiType::Complex256,
        NiftiType::Rgba32,
    ];
}

/// The primitive element of a buffer, after the channel layout
/// has been taken apart.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum ElementKind {
    /// `u8`
    Uint8,
    /// `i8`
    Int8,
    /// `u16`
    Uint16,
    /// `i16`
    Int16,
    /// `u32`
    Uint32,
    /// `i32`
    Int32,
    /// `u64`
    Uint64,
    /// `i64`
    Int64,
    /// `f32`
    Float32,
    /// `f64`
    Float64,
}

impl ElementKind {
    /// Width of a single element in bytes.
    pub fn size_of(self) -> usize {
        use ElementKind::*;
        match self {
            Uint8 | Int8 => 1,
            Uint16 | Int16 => 2,
            Uint32 | Int32 | Float32 => 4,
            Uint64 | Int64 | Float64 => 8,
        }
    }
}

/// How the elements of one voxel are grouped.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum ChannelLayout {
    /// One element per voxel.
    Scalar,
    /// Interleaved real and imaginary parts.
    Complex,
    /// Two interleaved doubles, kept as two separate channels.
    DoublePair,
    /// Red, green and blue bytes.
    Rgb,
    /// Red, green, blue and alpha bytes.
    Rgba,
}

impl ChannelLayout {
    /// Number of elements making up one voxel.
    pub fn channels(self) -> usize {
        match self {
            ChannelLayout::Scalar => 1,
            ChannelLayout::Complex | ChannelLayout::DoublePair => 2,
            ChannelLayout::Rgb => 3,
            ChannelLayout::Rgba => 4,
        }
    }
}

/// An entry of the datatype table.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct DatatypeDescriptor {
    /// Primitive element kind of every channel.
    pub element: ElementKind,
    /// Channel grouping.
    pub layout: ChannelLayout,
}

impl DatatypeDescriptor {
    /// Number of elements making up one voxel.
    pub fn channels(&self) -> usize {
        self.layout.channels()
    }

    /// Size of one voxel in bytes.
    pub fn size_of(&self) -> usize {
        self.element.size_of() * self.channels()
    }
}

/// An enum type which represents a unit type.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, FromPrimitive)]
pub enum Unit {
    /// NIFTI code for unspecified units.
    Unknown = 0,
    /* Space codes are multiples of 1. */
    /// NIFTI code for meters.
    Meter = 1,
    /// NIFTI code for millimeters.
    Mm = 2,
    /// NIFTI code for micrometers.
    Micron = 3,
    /* Time codes are multiples of 8. */
    /// NIFTI code for seconds.
    Sec = 8,
    /// NIFTI code for milliseconds.
    Msec = 16,
    /// NIFTI code for microseconds.
    Usec = 24,
    /* These units are for spectral data: */
    /// NIFTI code for Hertz.
    Hz = 32,
    /// NIFTI code for ppm.
    Ppm = 40,
    /// NIFTI code for radians per second.
    Rads = 48,
}

/// An enum type for representing a NIFTI intent code.
///
/// Statistical intents carry their distribution parameters in
/// `intent_p1..3`; the others describe what a voxel (or a GIFTI data
/// array) holds.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, FromPrimitive)]
#[allow(missing_docs)]
pub enum Intent {
    None = 0,
    Correl = 2,
    Ttest = 3,
    Ftest = 4,
    Zscore = 5,
    Chisq = 6,
    Beta = 7,
    Binom = 8,
    Gamma = 9,
    Poisson = 10,
    Normal = 11,
    FtestNonc = 12,
    ChisqNonc = 13,
    Logistic = 14,
    Laplace = 15,
    Uniform = 16,
    TtestNonc = 17,
    Weibull = 18,
    Chi = 19,
    Invgauss = 20,
    Extval = 21,
    Pval = 22,
    Logpval = 23,
    Log10pval = 24,
    Estimate = 1001,
    Label = 1002,
    Neuroname = 1003,
    Genmatrix = 1004,
    Symmatrix = 1005,
    Dispvect = 1006,
    Vector = 1007,
    /// Vertices of a surface mesh.
    Pointset = 1008,
    /// Triples of vertex indices.
    Triangle = 1009,
    Quaternion = 1010,
    Dimless = 1011,
    /// One time point of a series.
    TimeSeries = 2001,
    /// Indices into a complete surface.
    NodeIndex = 2002,
    RgbVector = 2003,
    RgbaVector = 2004,
    /// Per-vertex shape value, such as curvature.
    Shape = 2005,
}

impl Intent {
    /// Check whether this intent code are used for statistics.
    pub fn is_statcode(&self) -> bool {
        *self as i16 >= 2 && *self as i16 <= 24
    }

    /// The name of this intent as written in GIFTI `Intent` attributes.
    pub fn gifti_name(self) -> &'static str {
        use Intent::*;
        match self {
            None => "NIFTI_INTENT_NONE",
            Correl => "NIFTI_INTENT_CORREL",
            Ttest => "NIFTI_INTENT_TTEST",
            Ftest => "NIFTI_INTENT_FTEST",
            Zscore => "NIFTI_INTENT_ZSCORE",
            Chisq => "NIFTI_INTENT_CHISQ",
            Beta => "NIFTI_INTENT_BETA",
            Binom => "NIFTI_INTENT_BINOM",
            Gamma => "NIFTI_INTENT_GAMMA",
            Poisson => "NIFTI_INTENT_POISSON",
            Normal => "NIFTI_INTENT_NORMAL",
            FtestNonc => "NIFTI_INTENT_FTEST_NONC",
            ChisqNonc => "NIFTI_INTENT_CHISQ_NONC",
            Logistic => "NIFTI_INTENT_LOGISTIC",
            Laplace => "NIFTI_INTENT_LAPLACE",
            Uniform => "NIFTI_INTENT_UNIFORM",
            TtestNonc => "NIFTI_INTENT_TTEST_NONC",
            Weibull => "NIFTI_INTENT_WEIBULL",
            Chi => "NIFTI_INTENT_CHI",
            Invgauss => "NIFTI_INTENT_INVGAUSS",
            Extval => "NIFTI_INTENT_EXTVAL",
            Pval => "NIFTI_INTENT_PVAL",
            Logpval => "NIFTI_INTENT_LOGPVAL",
            Log10pval => "NIFTI_INTENT_LOG10PVAL",
            Estimate => "NIFTI_INTENT_ESTIMATE",
            Label => "NIFTI_INTENT_LABEL",
            Neuroname => "NIFTI_INTENT_NEURONAME",
            Genmatrix => "NIFTI_INTENT_GENMATRIX",
            Symmatrix => "NIFTI_INTENT_SYMMATRIX",
            Dispvect => "NIFTI_INTENT_DISPVECT",
            Vector => "NIFTI_INTENT_VECTOR",
            Pointset => "NIFTI_INTENT_POINTSET",
            Triangle => "NIFTI_INTENT_TRIANGLE",
            Quaternion => "NIFTI_INTENT_QUATERNION",
            Dimless => "NIFTI_INTENT_DIMLESS",
            TimeSeries => "NIFTI_INTENT_TIME_SERIES",
            NodeIndex => "NIFTI_INTENT_NODE_INDEX",
            RgbVector => "NIFTI_INTENT_RGB_VECTOR",
            RgbaVector => "NIFTI_INTENT_RGBA_VECTOR",
            Shape => "NIFTI_INTENT_SHAPE",
        }
    }

    /// Parse a GIFTI `Intent` attribute value.
    pub fn from_gifti_name(name: &str) -> Option<Self> {
        Intent::ALL.iter().copied().find(|i| i.gifti_name() == name)
    }

    const ALL: [Intent; 40] = [
        Intent::None,
        Intent::Correl,
        Intent::Ttest,
        Intent::Ftest,
        Intent::Zscore,
        Intent::Chisq,
        Intent::Beta,
        Intent::Binom,
        Intent::Gamma,
        Intent::Poisson,
        Intent::Normal,
        Intent::FtestNonc,
        Intent::ChisqNonc,
        Intent::Logistic,
        Intent::Laplace,
        Intent::Uniform,
        Intent::TtestNonc,
        Intent::Weibull,
        Intent::Chi,
        Intent::Invgauss,
        Intent::Extval,
        Intent::Pval,
        Intent::Logpval,
        Intent::Log10pval,
        Intent::Estimate,
        Intent::Label,
        Intent::Neuroname,
        Intent::Genmatrix,
        Intent::Symmatrix,
        Intent::Dispvect,
        Intent::Vector,
        Intent::Pointset,
        Intent::Triangle,
        Intent::Quaternion,
        Intent::Dimless,
        Intent::TimeSeries,
        Intent::NodeIndex,
        Intent::RgbVector,
        Intent::RgbaVector,
        Intent::Shape,
    ];
}

/// An enum type for representing a NIFTI XForm.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, FromPrimitive)]
pub enum XForm {
    /// Arbitrary coordinates (Method 1).
    Unknown = 0,
    /// Scanner-based anatomical coordinates
    ScannerAnat = 1,
    /// Coordinates aligned to another file's,
    /// or to anatomical "truth".
    AlignedAnat = 2,
    /// Coordinates aligned to Talairach-Tournoux
    /// Atlas; (0,0,0)=AC, etc.
    Talairach = 3,
    /// MNI 152 normalized coordinates.
    Mni152 = 4,
}

impl XForm {
    /// The name of this space as written in GIFTI `DataSpace` and
    /// `TransformedSpace` elements.
    pub fn gifti_name(self) -> &'static str {
        match self {
            XForm::Unknown => "NIFTI_XFORM_UNKNOWN",
            XForm::ScannerAnat => "NIFTI_XFORM_SCANNER_ANAT",
            XForm::AlignedAnat => "NIFTI_XFORM_ALIGNED_ANAT",
            XForm::Talairach => "NIFTI_XFORM_TALAIRACH",
            XForm::Mni152 => "NIFTI_XFORM_MNI_152",
        }
    }

    /// Parse a GIFTI coordinate space name.
    pub fn from_gifti_name(name: &str) -> Option<Self> {
        [
            XForm::Unknown,
            XForm::ScannerAnat,
            XForm::AlignedAnat,
            XForm::Talairach,
            XForm::Mni152,
        ]
        .iter()
        .copied()
        .find(|x| x.gifti_name() == name.trim())
    }
}

/// An enum type for representing the slice order.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, FromPrimitive)]
pub enum SliceOrder {
    /// NIFTI_SLICE_UNKNOWN
    Unknown = 0,
    /// NIFTI_SLICE_SEQ_INC
    SeqInc = 1,
    /// NIFTI_SLICE_SEQ_DEC
    SeqDec = 2,
    /// NIFTI_SLICE_ALT_INC
    AltInc = 3,
    /// NIFTI_SLICE_ALT_DEC
    AltDec = 4,
    /// NIFTI_SLICE_ALT_INC2
    AltInc2 = 5,
    /// NIFTI_SLICE_ALT_DEC2
    AltDec2 = 6,
}
