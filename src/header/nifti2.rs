//! The NIfTI-2 header layout.

use crate::affine::{quaternion_to_affine, srow_affine, Affine4};
use crate::bitfield::{DimInfo, Nifti2Units};
use crate::error::Result;
use crate::header::MAGIC_CODE_NIP2;
use crate::util::Endianness;
use byteordered::ByteOrdered;
use std::io::Read;

/// The NIFTI-2 header data type.
/// Same fields as NIfTI-1 minus the legacy ones, widened to 64 bits and
/// reordered. The 15 trailing unused bytes are consumed but not kept.
#[derive(Debug, Clone, PartialEq)]
pub struct Nifti2Header {
    /// Magic code. Must be `b"ni2\0\r\n\x1a\n"` or `b"n+2\0\r\n\x1a\n"`
    pub magic: [u8; 8],
    /// Defines the data type!
    pub datatype: i16,
    /// Number of bits per voxel
    pub bitpix: i16,
    /// Data array dimensions
    pub dim: [i64; 8],
    /// 1st intent parameter
    pub intent_p1: f64,
    /// 2nd intent parameter
    pub intent_p2: f64,
    /// 3rd intent parameter
    pub intent_p3: f64,
    /// Grid spacings
    pub pixdim: [f64; 8],
    /// Offset into .nii file to reach the volume
    pub vox_offset: i64,
    /// Data scaling: slope
    pub scl_slope: f64,
    /// Data scaling: offset
    pub scl_inter: f64,
    /// Max display intensity
    pub cal_max: f64,
    /// Min display intensity
    pub cal_min: f64,
    /// Time for 1 slice
    pub slice_duration: f64,
    /// Time axis shift
    pub toffset: f64,
    /// First slice index
    pub slice_start: i64,
    /// Last slice index
    pub slice_end: i64,
    /// Any text you like
    pub descrip: Vec<u8>,
    /// Auxiliary filename
    pub aux_file: [u8; 24],
    /// NIFTI_XFORM_* code
    pub qform_code: i32,
    /// NIFTI_XFORM_* code
    pub sform_code: i32,
    /// Quaternion b param
    pub quatern_b: f64,
    /// Quaternion c param
    pub quatern_c: f64,
    /// Quaternion d param
    pub quatern_d: f64,
    /// Quaternion x shift
    pub quatern_x: f64,
    /// Quaternion y shift
    pub quatern_y: f64,
    /// Quaternion z shift
    pub quatern_z: f64,
    /// 1st row affine transform
    pub srow_x: [f64; 4],
    /// 2nd row affine transform
    pub srow_y: [f64; 4],
    /// 3rd row affine transform
    pub srow_z: [f64; 4],
    /// Slice timing order
    pub slice_code: i32,
    /// Units of pixdim[1..4], one byte per axis
    pub xyzt_units: Nifti2Units,
    /// NIFTI_INTENT_* code
    pub intent_code: i32,
    /// 'name' or meaning of data
    pub intent_name: [u8; 16],
    /// MRI slice ordering
    pub dim_info: DimInfo,
    /// Original data Endianness
    pub endianness: Endianness,
}

impl Default for Nifti2Header {
    fn default() -> Nifti2Header {
        Nifti2Header {
            magic: *MAGIC_CODE_NIP2,
            datatype: 0,
            bitpix: 0,
            dim: [1, 0, 0, 0, 0, 0, 0, 0],
            intent_p1: 0.,
            intent_p2: 0.,
            intent_p3: 0.,
            pixdim: [0.; 8],
            vox_offset: 544,
            scl_slope: 0.,
            scl_inter: 0.,
            cal_max: 0.,
            cal_min: 0.,
            slice_duration: 0.,
            toffset: 0.,
            slice_start: 0,
            slice_end: 0,
            descrip: vec![0; 80],
            aux_file: [0; 24],
            qform_code: 0,
            sform_code: 0,
            quatern_b: 0.,
            quatern_c: 0.,
            quatern_d: 0.,
            quatern_x: 0.,
            quatern_y: 0.,
            quatern_z: 0.,
            srow_x: [0.; 4],
            srow_y: [0.; 4],
            srow_z: [0.; 4],
            slice_code: 0,
            xyzt_units: Nifti2Units::default(),
            intent_code: 0,
            intent_name: [0; 16],
            dim_info: DimInfo::default(),
            endianness: Endianness::Little,
        }
    }
}

impl Nifti2Header {
    /// The affine reconstructed from `quatern_*`, `pixdim` and the
    /// quaternion offsets.
    pub fn qform_affine(&self) -> Affine4 {
        quaternion_to_affine(
            [self.quatern_b, self.quatern_c, self.quatern_d],
            [self.pixdim[0], self.pixdim[1], self.pixdim[2], self.pixdim[3]],
            [self.quatern_x, self.quatern_y, self.quatern_z],
        )
    }

    /// The affine given by the `srow_*` rows.
    pub fn sform_affine(&self) -> Affine4 {
        srow_affine(self.srow_x, self.srow_y, self.srow_z)
    }
}

/// Read the remainder of a NIfTI-2 header, right after `sizeof_hdr`.
pub(crate) fn parse_header<S: Read>(
    input: &mut ByteOrdered<S, Endianness>,
    endianness: Endianness,
) -> Result<Nifti2Header> {
    let mut h = Nifti2Header {
        endianness,
        ..Default::default()
    };

    input.read_exact(&mut h.magic)?;
    h.datatype = input.read_i16()?;
    h.bitpix = input.read_i16()?;
    for v in &mut h.dim {
        *v = input.read_i64()?;
    }
    h.intent_p1 = input.read_f64()?;
    h.intent_p2 = input.read_f64()?;
    h.intent_p3 = input.read_f64()?;
    for v in &mut h.pixdim {
        *v = input.read_f64()?;
    }
    h.vox_offset = input.read_i64()?;
    h.scl_slope = input.read_f64()?;
    h.scl_inter = input.read_f64()?;
    h.cal_max = input.read_f64()?;
    h.cal_min = input.read_f64()?;
    h.slice_duration = input.read_f64()?;
    h.toffset = input.read_f64()?;
    h.slice_start = input.read_i64()?;
    h.slice_end = input.read_i64()?;
    input.read_exact(h.descrip.as_mut_slice())?;
    input.read_exact(&mut h.aux_file)?;
    h.qform_code = input.read_i32()?;
    h.sform_code = input.read_i32()?;
    h.quatern_b = input.read_f64()?;
    h.quatern_c = input.read_f64()?;
    h.quatern_d = input.read_f64()?;
    h.quatern_x = input.read_f64()?;
    h.quatern_y = input.read_f64()?;
    h.quatern_z = input.read_f64()?;
    for v in &mut h.srow_x {
        *v = input.read_f64()?;
    }
    for v in &mut h.srow_y {
        *v = input.read_f64()?;
    }
    for v in &mut h.srow_z {
        *v = input.read_f64()?;
    }
    h.slice_code = input.read_i32()?;
    h.xyzt_units = Nifti2Units::from_raw(input.read_i32()?);
    h.intent_code = input.read_i32()?;
    input.read_exact(&mut h.intent_name)?;
    h.dim_info = DimInfo::from_raw(input.read_u8()?);
    let mut unused_str = [0u8; 15];
    input.read_exact(&mut unused_str)?;

    Ok(h)
}
