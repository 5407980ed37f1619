//! The NIfTI-1 header layout.

use crate::affine::{quaternion_to_affine, srow_affine, Affine4};
use crate::bitfield::{DimInfo, Nifti1Units};
use crate::error::Result;
use crate::header::MAGIC_CODE_NIP1;
use crate::util::Endianness;
use byteordered::ByteOrdered;
use std::io::Read;

/// The NIFTI-1 header data type.
/// Fields are named after the standard's header file. Fields that were
/// left unused by NIfTI-1 (`data_type`, `db_name`, `extents`,
/// `session_error`, `regular`, `glmax`, `glmin`) are consumed while
/// reading but not kept, and `sizeof_hdr` is implied by the type.
/// `dim_info` and `xyzt_units` are kept already split into sub-fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Nifti1Header {
    /// MRI slice ordering
    pub dim_info: DimInfo,
    /// Data array dimensions
    pub dim: [u16; 8],
    /// 1st intent parameter
    pub intent_p1: f32,
    /// 2nd intent parameter
    pub intent_p2: f32,
    /// 3rd intent parameter
    pub intent_p3: f32,
    /// NIFTI_INTENT_* code
    pub intent_code: i16,
    /// Defines the data type!
    pub datatype: i16,
    /// Number of bits per voxel
    pub bitpix: i16,
    /// First slice index
    pub slice_start: i16,
    /// Grid spacings
    pub pixdim: [f32; 8],
    /// Offset into .nii file to reach the volume
    pub vox_offset: f32,
    /// Data scaling: slope
    pub scl_slope: f32,
    /// Data scaling: offset
    pub scl_inter: f32,
    /// Last slice index
    pub slice_end: i16,
    /// Slice timing order
    pub slice_code: u8,
    /// Units of pixdim[1..4]
    pub xyzt_units: Nifti1Units,
    /// Max display intensity
    pub cal_max: f32,
    /// Min display intensity
    pub cal_min: f32,
    /// Time for 1 slice
    pub slice_duration: f32,
    /// Time axis shift
    pub toffset: f32,
    /// Any text you like
    pub descrip: Vec<u8>,
    /// Auxiliary filename
    pub aux_file: [u8; 24],
    /// NIFTI_XFORM_* code
    pub qform_code: i16,
    /// NIFTI_XFORM_* code
    pub sform_code: i16,
    /// Quaternion b param
    pub quatern_b: f32,
    /// Quaternion c param
    pub quatern_c: f32,
    /// Quaternion d param
    pub quatern_d: f32,
    /// Quaternion x shift
    pub quatern_x: f32,
    /// Quaternion y shift
    pub quatern_y: f32,
    /// Quaternion z shift
    pub quatern_z: f32,
    /// 1st row affine transform
    pub srow_x: [f32; 4],
    /// 2nd row affine transform
    pub srow_y: [f32; 4],
    /// 3rd row affine transform
    pub srow_z: [f32; 4],
    /// 'name' or meaning of data
    pub intent_name: [u8; 16],
    /// Magic code. Must be `b"ni1\0"` or `b"n+1\0"`
    pub magic: [u8; 4],
    /// Original data Endianness
    pub endianness: Endianness,
}

impl Default for Nifti1Header {
    fn default() -> Nifti1Header {
        Nifti1Header {
            dim_info: DimInfo::default(),
            dim: [1, 0, 0, 0, 0, 0, 0, 0],
            intent_p1: 0.,
            intent_p2: 0.,
            intent_p3: 0.,
            intent_code: 0,
            datatype: 0,
            bitpix: 0,
            slice_start: 0,
            pixdim: [0.; 8],
            vox_offset: 352.,
            scl_slope: 0.,
            scl_inter: 0.,
            slice_end: 0,
            slice_code: 0,
            xyzt_units: Nifti1Units::default(),
            cal_max: 0.,
            cal_min: 0.,
            slice_duration: 0.,
            toffset: 0.,
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
            intent_name: [0; 16],
            magic: *MAGIC_CODE_NIP1,
            endianness: Endianness::Little,
        }
    }
}

impl Nifti1Header {
    /// The affine reconstructed from `quatern_*`, `pixdim` and the
    /// quaternion offsets.
    pub fn qform_affine(&self) -> Affine4 {
        quaternion_to_affine(
            [
                f64::from(self.quatern_b),
                f64::from(self.quatern_c),
                f64::from(self.quatern_d),
            ],
            [
                f64::from(self.pixdim[0]),
                f64::from(self.pixdim[1]),
                f64::from(self.pixdim[2]),
                f64::from(self.pixdim[3]),
            ],
            [
                f64::from(self.quatern_x),
                f64::from(self.quatern_y),
                f64::from(self.quatern_z),
            ],
        )
    }

    /// The affine given by the `srow_*` rows.
    pub fn sform_affine(&self) -> Affine4 {
        srow_affine(
            widen(self.srow_x),
            widen(self.srow_y),
            widen(self.srow_z),
        )
    }
}

fn widen(row: [f32; 4]) -> [f64; 4] {
    [
        f64::from(row[0]),
        f64::from(row[1]),
        f64::from(row[2]),
        f64::from(row[3]),
    ]
}

/// Read the remainder of a NIfTI-1 header, right after `sizeof_hdr`.
pub(crate) fn parse_header<S: Read>(
    input: &mut ByteOrdered<S, Endianness>,
    endianness: Endianness,
) -> Result<Nifti1Header> {
    let mut h = Nifti1Header {
        endianness,
        ..Default::default()
    };

    // unused in NIfTI-1
    let mut data_type = [0u8; 10];
    input.read_exact(&mut data_type)?;
    let mut db_name = [0u8; 18];
    input.read_exact(&mut db_name)?;
    let _extents = input.read_i32()?;
    let _session_error = input.read_i16()?;
    let _regular = input.read_u8()?;

    h.dim_info = DimInfo::from_raw(input.read_u8()?);
    for v in &mut h.dim {
        *v = input.read_u16()?;
    }
    h.intent_p1 = input.read_f32()?;
    h.intent_p2 = input.read_f32()?;
    h.intent_p3 = input.read_f32()?;
    h.intent_code = input.read_i16()?;
    h.datatype = input.read_i16()?;
    h.bitpix = input.read_i16()?;
    h.slice_start = input.read_i16()?;
    for v in &mut h.pixdim {
        *v = input.read_f32()?;
    }
    h.vox_offset = input.read_f32()?;
    h.scl_slope = input.read_f32()?;
    h.scl_inter = input.read_f32()?;
    h.slice_end = input.read_i16()?;
    h.slice_code = input.read_u8()?;
    h.xyzt_units = Nifti1Units::from_raw(input.read_u8()?);
    h.cal_max = input.read_f32()?;
    h.cal_min = input.read_f32()?;
    h.slice_duration = input.read_f32()?;
    h.toffset = input.read_f32()?;
    let _glmax = input.read_i32()?;
    let _glmin = input.read_i32()?;

    // descrip is 80-elem vec already
    input.read_exact(h.descrip.as_mut_slice())?;
    input.read_exact(&mut h.aux_file)?;
    h.qform_code = input.read_i16()?;
    h.sform_code = input.read_i16()?;
    h.quatern_b = input.read_f32()?;
    h.quatern_c = input.read_f32()?;
    h.quatern_d = input.read_f32()?;
    h.quatern_x = input.read_f32()?;
    h.quatern_y = input.read_f32()?;
    h.quatern_z = input.read_f32()?;
    for v in &mut h.srow_x {
        *v = input.read_f32()?;
    }
    for v in &mut h.srow_y {
        *v = input.read_f32()?;
    }
    for v in &mut h.srow_z {
        *v = input.read_f32()?;
    }
    input.read_exact(&mut h.intent_name)?;
    input.read_exact(&mut h.magic)?;

    debug_assert_eq!(h.descrip.len(), 80);
    Ok(h)
}
