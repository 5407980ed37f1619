//! This module defines the `NiftiHeader` type, a version-tagged record
//! holding either a NIfTI-1 or a NIfTI-2 header.
//!
//! The version and byte order of a header are both decided from its first
//! four bytes, `sizeof_hdr`: 348 for NIfTI-1 and 540 for NIfTI-2, read in
//! either byte order. Everything after that is read sequentially, field by
//! field, in the layout of the sniffed version.
//!
//! # Example
//!
//! ```no_run
//! use nifti_canon::{NiftiHeader, NiftiVersion};
//! # use nifti_canon::Result;
//!
//! # fn run() -> Result<()> {
//! let header = NiftiHeader::from_file("0000.nii.gz")?;
//! if header.version() == NiftiVersion::Nifti2 {
//!     println!("64-bit dimensions: {:?}", header.dim());
//! }
//! # Ok(())
//! # }
//! ```

pub mod nifti1;
pub mod nifti2;

pub use self::nifti1::Nifti1Header;
pub use self::nifti2::Nifti2Header;

use crate::affine::Affine4;
use crate::bitfield::DimInfo;
use crate::error::{NiftiError, Result};
use crate::typedef::{Intent, NiftiType, SliceOrder, XForm};
use crate::util::{is_gz_file, Endianness};
use byteordered::ByteOrdered;
use flate2::bufread::GzDecoder;
use log::debug;
use num_traits::FromPrimitive;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Magic code for NIFTI-1 header files (extention ".hdr[.gz]").
pub const MAGIC_CODE_NI1: &[u8; 4] = b"ni1\0";
/// Magic code for full NIFTI-1 files (extention ".nii[.gz]").
pub const MAGIC_CODE_NIP1: &[u8; 4] = b"n+1\0";
/// Magic code for NIFTI-2 header files (extention ".hdr[.gz]").
pub const MAGIC_CODE_NI2: &[u8; 8] = b"ni2\0\r\n\x1a\n";
/// Magic code for full NIFTI-2 files (extention ".nii[.gz]").
pub const MAGIC_CODE_NIP2: &[u8; 8] = b"n+2\0\r\n\x1a\n";

/// `sizeof_hdr` of a little endian NIfTI-1 header.
const SIZEOF_HDR_1_LE: i32 = 348;
/// `sizeof_hdr` of a little endian NIfTI-2 header.
const SIZEOF_HDR_2_LE: i32 = 540;
/// 348, byte swapped.
const SIZEOF_HDR_1_BE: i32 = 1_543_569_408;
/// 540, byte swapped.
const SIZEOF_HDR_2_BE: i32 = 469_893_120;

/// Version of the header layout.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum NiftiVersion {
    /// 348-byte header, 16-bit dimensions, 32-bit floats.
    Nifti1,
    /// 540-byte header, 64-bit dimensions, 64-bit floats.
    Nifti2,
}

impl NiftiVersion {
    /// Size of the fixed header layout in bytes (without the extender).
    pub fn header_size(self) -> usize {
        match self {
            NiftiVersion::Nifti1 => 348,
            NiftiVersion::Nifti2 => 540,
        }
    }

    /// Number of bytes taken by the header and the 4-byte extender.
    pub fn data_start(self) -> u64 {
        self.header_size() as u64 + 4
    }
}

/// Classify a header from its first four bytes.
///
/// # Errors
///
/// - `NiftiError::UnrecognizedMagic` if the value is neither 348 nor 540
///   in any byte order.
pub fn sniff(sizeof_hdr: [u8; 4]) -> Result<(NiftiVersion, Endianness)> {
    match i32::from_le_bytes(sizeof_hdr) {
        SIZEOF_HDR_1_LE => Ok((NiftiVersion::Nifti1, Endianness::Little)),
        SIZEOF_HDR_2_LE => Ok((NiftiVersion::Nifti2, Endianness::Little)),
        SIZEOF_HDR_1_BE => Ok((NiftiVersion::Nifti1, Endianness::Big)),
        SIZEOF_HDR_2_BE => Ok((NiftiVersion::Nifti2, Endianness::Big)),
        other => Err(NiftiError::UnrecognizedMagic(other)),
    }
}

/// A decoded header, tagged by layout version.
#[derive(Debug, Clone, PartialEq)]
pub enum NiftiHeader {
    /// A NIfTI-1 header.
    Nifti1(Nifti1Header),
    /// A NIfTI-2 header.
    Nifti2(Nifti2Header),
}

impl NiftiHeader {
    /// Retrieve a NIfTI header from a file in the file system.
    /// If the file's name ends with ".gz", the file is assumed to need GZip decoding.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<NiftiHeader> {
        let gz = is_gz_file(&path);
        let file = BufReader::new(File::open(path)?);
        if gz {
            NiftiHeader::from_reader(GzDecoder::new(file))
        } else {
            NiftiHeader::from_reader(file)
        }
    }

    /// Read a NIfTI header, of either version, from the given byte source.
    /// The source must be at the start of the header. On success, the
    /// header and its 4-byte extender have been consumed.
    ///
    /// # Errors
    ///
    /// - `NiftiError::UnrecognizedMagic` if the first four bytes do not
    ///   identify a version.
    /// - `NiftiError::UnsupportedExtension` if the extender announces
    ///   header extensions.
    pub fn from_reader<S: Read>(mut input: S) -> Result<NiftiHeader> {
        let mut sizeof_hdr = [0u8; 4];
        input.read_exact(&mut sizeof_hdr)?;
        let (version, endianness) = sniff(sizeof_hdr)?;
        debug!("header is {:?}, {:?} endian", version, endianness);

        let mut input = ByteOrdered::runtime(input, endianness);
        let header = match version {
            NiftiVersion::Nifti1 => {
                NiftiHeader::Nifti1(nifti1::parse_header(&mut input, endianness)?)
            }
            NiftiVersion::Nifti2 => {
                NiftiHeader::Nifti2(nifti2::parse_header(&mut input, endianness)?)
            }
        };

        // extender is optional in header-only files
        let extender = if header.is_header_only() {
            read_extender_optional(&mut input)?
        } else {
            let mut extender = [0u8; 4];
            input.read_exact(&mut extender)?;
            extender
        };
        if extender.iter().any(|b| *b != 0) {
            return Err(NiftiError::UnsupportedExtension(extender));
        }
        Ok(header)
    }

    /// The header layout version.
    pub fn version(&self) -> NiftiVersion {
        match self {
            NiftiHeader::Nifti1(_) => NiftiVersion::Nifti1,
            NiftiHeader::Nifti2(_) => NiftiVersion::Nifti2,
        }
    }

    /// The byte order of the header and of the voxel data that follows.
    pub fn endianness(&self) -> Endianness {
        match self {
            NiftiHeader::Nifti1(h) => h.endianness,
            NiftiHeader::Nifti2(h) => h.endianness,
        }
    }

    /// The raw `dim` field, widened to 64 bits.
    pub fn dim(&self) -> [i64; 8] {
        match self {
            NiftiHeader::Nifti1(h) => {
                let mut dim = [0; 8];
                for (d, v) in dim.iter_mut().zip(&h.dim) {
                    *d = i64::from(*v);
                }
                dim
            }
            NiftiHeader::Nifti2(h) => h.dim,
        }
    }

    /// The declared extents `dim[1..=dim[0]]`, in declared axis order.
    ///
    /// # Errors
    ///
    /// - `NiftiError::InconsistentDim` if `dim[0]` is not between 1 and 7,
    ///   or if one of the extents is not positive.
    pub fn shape(&self) -> Result<Vec<usize>> {
        let dim = self.dim();
        let rank = dim[0];
        if !(1..=7).contains(&rank) {
            return Err(NiftiError::InconsistentDim(0, rank));
        }
        dim[1..=rank as usize]
            .iter()
            .enumerate()
            .map(|(i, d)| {
                if *d > 0 {
                    Ok(*d as usize)
                } else {
                    Err(NiftiError::InconsistentDim(i as u8 + 1, *d))
                }
            })
            .collect()
    }

    /// The raw `datatype` code.
    pub fn datatype(&self) -> i16 {
        match self {
            NiftiHeader::Nifti1(h) => h.datatype,
            NiftiHeader::Nifti2(h) => h.datatype,
        }
    }

    /// Get the data type as a validated enum.
    pub fn data_type(&self) -> Result<NiftiType> {
        NiftiType::from_code(self.datatype())
    }

    /// Offset of the voxel data from the start of the data file.
    /// Negative offsets are clamped to zero.
    pub fn vox_offset(&self) -> u64 {
        match self {
            NiftiHeader::Nifti1(h) => h.vox_offset.max(0.) as u64,
            NiftiHeader::Nifti2(h) => h.vox_offset.max(0) as u64,
        }
    }

    /// Whether the magic code says that the voxel data lives in a
    /// separate ".img" file.
    pub fn is_header_only(&self) -> bool {
        match self {
            NiftiHeader::Nifti1(h) => &h.magic == MAGIC_CODE_NI1,
            NiftiHeader::Nifti2(h) => &h.magic == MAGIC_CODE_NI2,
        }
    }

    /// The decoded `dim_info` field.
    pub fn dim_info(&self) -> DimInfo {
        match self {
            NiftiHeader::Nifti1(h) => h.dim_info,
            NiftiHeader::Nifti2(h) => h.dim_info,
        }
    }

    /// Get the intent as a validated enum.
    pub fn intent(&self) -> Result<Intent> {
        let code = match self {
            NiftiHeader::Nifti1(h) => i32::from(h.intent_code),
            NiftiHeader::Nifti2(h) => h.intent_code,
        };
        FromPrimitive::from_i32(code).ok_or(NiftiError::InvalidCode("intent", i64::from(code)))
    }

    /// Get the qform coordinate mapping method as a validated enum.
    pub fn qform(&self) -> Result<XForm> {
        let code = match self {
            NiftiHeader::Nifti1(h) => i32::from(h.qform_code),
            NiftiHeader::Nifti2(h) => h.qform_code,
        };
        FromPrimitive::from_i32(code).ok_or(NiftiError::InvalidCode("qform", i64::from(code)))
    }

    /// Get the sform coordinate mapping method as a validated enum.
    pub fn sform(&self) -> Result<XForm> {
        let code = match self {
            NiftiHeader::Nifti1(h) => i32::from(h.sform_code),
            NiftiHeader::Nifti2(h) => h.sform_code,
        };
        FromPrimitive::from_i32(code).ok_or(NiftiError::InvalidCode("sform", i64::from(code)))
    }

    /// Get the slice order as a validated enum.
    pub fn slice_order(&self) -> Result<SliceOrder> {
        let code = match self {
            NiftiHeader::Nifti1(h) => i32::from(h.slice_code),
            NiftiHeader::Nifti2(h) => h.slice_code,
        };
        FromPrimitive::from_i32(code)
            .ok_or(NiftiError::InvalidCode("slice order", i64::from(code)))
    }

    /// The affine reconstructed from the quaternion representation.
    pub fn qform_affine(&self) -> Affine4 {
        match self {
            NiftiHeader::Nifti1(h) => h.qform_affine(),
            NiftiHeader::Nifti2(h) => h.qform_affine(),
        }
    }

    /// The affine given by the `srow_*` fields.
    pub fn sform_affine(&self) -> Affine4 {
        match self {
            NiftiHeader::Nifti1(h) => h.sform_affine(),
            NiftiHeader::Nifti2(h) => h.sform_affine(),
        }
    }
}

/// Read the 4-byte extender, or nothing at all if the source ends right
/// after the header.
fn read_extender_optional<S: Read>(input: &mut S) -> Result<[u8; 4]> {
    let mut buf = Vec::with_capacity(4);
    let _ = input.take(4).read_to_end(&mut buf)?;
    match buf.len() {
        0 => Ok([0; 4]),
        4 => Ok([buf[0], buf[1], buf[2], buf[3]]),
        _ => Err(NiftiError::Io(io::ErrorKind::UnexpectedEof.into())),
    }
}

impl From<Nifti1Header> for NiftiHeader {
    fn from(header: Nifti1Header) -> Self {
        NiftiHeader::Nifti1(header)
    }
}

impl From<Nifti2Header> for NiftiHeader {
    fn from(header: Nifti2Header) -> Self {
        NiftiHeader::Nifti2(header)
    }
}
