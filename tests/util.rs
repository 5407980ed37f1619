//! Synthesis of header bytes, field by field, for the integration tests.
#![allow(dead_code)]

use byteordered::ByteOrdered;
use nifti_canon::header::{Nifti1Header, Nifti2Header};
use nifti_canon::Endianness;
use std::io::{self, Write};

/// Serialize a NIfTI-1 header, with the legacy fields set to non-zero
/// values, followed by a zero extender.
pub fn nifti1_bytes(h: &Nifti1Header) -> Vec<u8> {
    let mut out = Vec::new();
    write_nifti1(&mut out, h).unwrap();
    out.extend_from_slice(&[0; 4]);
    out
}

/// Serialize a NIfTI-2 header followed by a zero extender.
pub fn nifti2_bytes(h: &Nifti2Header) -> Vec<u8> {
    let mut out = Vec::new();
    write_nifti2(&mut out, h).unwrap();
    out.extend_from_slice(&[0; 4]);
    out
}

fn write_nifti1<W: Write>(out: W, h: &Nifti1Header) -> io::Result<()> {
    let mut out = ByteOrdered::runtime(out, h.endianness);
    out.write_i32(348)?;
    let mut data_type = [0u8; 10];
    data_type[..6].copy_from_slice(b"legacy");
    out.write_all(&data_type)?;
    let mut db_name = [0u8; 18];
    db_name[..6].copy_from_slice(b"legacy");
    out.write_all(&db_name)?;
    out.write_i32(16384)?; // extents
    out.write_i16(7)?; // session_error
    out.write_u8(b'r')?;
    out.write_u8(
        h.dim_info.freq_dim | (h.dim_info.phase_dim << 2) | (h.dim_info.slice_dim << 4),
    )?;
    for v in &h.dim {
        out.write_u16(*v)?;
    }
    out.write_f32(h.intent_p1)?;
    out.write_f32(h.intent_p2)?;
    out.write_f32(h.intent_p3)?;
    out.write_i16(h.intent_code)?;
    out.write_i16(h.datatype)?;
    out.write_i16(h.bitpix)?;
    out.write_i16(h.slice_start)?;
    for v in &h.pixdim {
        out.write_f32(*v)?;
    }
    out.write_f32(h.vox_offset)?;
    out.write_f32(h.scl_slope)?;
    out.write_f32(h.scl_inter)?;
    out.write_i16(h.slice_end)?;
    out.write_u8(h.slice_code)?;
    out.write_u8(h.xyzt_units.spatial_units | h.xyzt_units.temporal_units)?;
    out.write_f32(h.cal_max)?;
    out.write_f32(h.cal_min)?;
    out.write_f32(h.slice_duration)?;
    out.write_f32(h.toffset)?;
    out.write_i32(255)?; // glmax
    out.write_i32(-1)?; // glmin
    out.write_all(&h.descrip)?;
    out.write_all(&h.aux_file)?;
    out.write_i16(h.qform_code)?;
    out.write_i16(h.sform_code)?;
    out.write_f32(h.quatern_b)?;
    out.write_f32(h.quatern_c)?;
    out.write_f32(h.quatern_d)?;
    out.write_f32(h.quatern_x)?;
    out.write_f32(h.quatern_y)?;
    out.write_f32(h.quatern_z)?;
    for row in &[h.srow_x, h.srow_y, h.srow_z] {
        for v in row {
            out.write_f32(*v)?;
        }
    }
    out.write_all(&h.intent_name)?;
    out.write_all(&h.magic)?;
    Ok(())
}

fn write_nifti2<W: Write>(out: W, h: &Nifti2Header) -> io::Result<()> {
    let mut out = ByteOrdered::runtime(out, h.endianness);
    out.write_i32(540)?;
    out.write_all(&h.magic)?;
    out.write_i16(h.datatype)?;
    out.write_i16(h.bitpix)?;
    for v in &h.dim {
        out.write_i64(*v)?;
    }
    out.write_f64(h.intent_p1)?;
    out.write_f64(h.intent_p2)?;
    out.write_f64(h.intent_p3)?;
    for v in &h.pixdim {
        out.write_f64(*v)?;
    }
    out.write_i64(h.vox_offset)?;
    out.write_f64(h.scl_slope)?;
    out.write_f64(h.scl_inter)?;
    out.write_f64(h.cal_max)?;
    out.write_f64(h.cal_min)?;
    out.write_f64(h.slice_duration)?;
    out.write_f64(h.toffset)?;
    out.write_i64(h.slice_start)?;
    out.write_i64(h.slice_end)?;
    out.write_all(&h.descrip)?;
    out.write_all(&h.aux_file)?;
    out.write_i32(h.qform_code)?;
    out.write_i32(h.sform_code)?;
    out.write_f64(h.quatern_b)?;
    out.write_f64(h.quatern_c)?;
    out.write_f64(h.quatern_d)?;
    out.write_f64(h.quatern_x)?;
    out.write_f64(h.quatern_y)?;
    out.write_f64(h.quatern_z)?;
    for row in &[h.srow_x, h.srow_y, h.srow_z] {
        for v in row {
            out.write_f64(*v)?;
        }
    }
    out.write_i32(h.slice_code)?;
    let u = h.xyzt_units;
    out.write_i32(i32::from_le_bytes([u.x_units, u.y_units, u.z_units, u.t_units]))?;
    out.write_i32(h.intent_code)?;
    out.write_all(&h.intent_name)?;
    out.write_u8(
        h.dim_info.freq_dim | (h.dim_info.phase_dim << 2) | (h.dim_info.slice_dim << 4),
    )?;
    out.write_all(&[0; 15])?;
    Ok(())
}

/// Fixed-size text field.
pub fn text<const N: usize>(s: &str) -> [u8; N] {
    let mut out = [0u8; N];
    out[..s.len()].copy_from_slice(s.as_bytes());
    out
}

/// 80-byte description field.
pub fn descrip(s: &str) -> Vec<u8> {
    let mut out = s.as_bytes().to_vec();
    out.resize(80, 0);
    out
}

/// Elements in the given byte order.
pub fn f32_bytes(values: &[f32], endianness: Endianness) -> Vec<u8> {
    values
        .iter()
        .flat_map(|v| match endianness {
            Endianness::Little => v.to_le_bytes(),
            Endianness::Big => v.to_be_bytes(),
        })
        .collect()
}
