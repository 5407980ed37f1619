//! An application for writing a small NIfTI-1 file from scratch.
//!
//! The volume is 8x8x4 `i16` voxels in little endian order, holding the
//! linear index of each voxel.

use byteordered::{ByteOrdered, Endianness};
use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};

const DIM: [u16; 3] = [8, 8, 4];

fn write_header<W: Write>(out: W) -> io::Result<()> {
    let mut out = ByteOrdered::runtime(out, Endianness::Little);
    out.write_i32(348)?;
    out.write_all(&[0; 10 + 18])?; // data_type, db_name
    out.write_i32(0)?; // extents
    out.write_i16(0)?; // session_error
    out.write_u8(b'r')?; // regular
    out.write_u8(0)?; // dim_info
    for d in &[3, DIM[0], DIM[1], DIM[2], 1, 1, 1, 1] {
        out.write_u16(*d)?;
    }
    for _ in 0..3 {
        out.write_f32(0.)?; // intent_p*
    }
    out.write_i16(0)?; // intent_code
    out.write_i16(4)?; // datatype: INT16
    out.write_i16(16)?; // bitpix
    out.write_i16(0)?; // slice_start
    for p in &[1f32, 2., 2., 3., 1., 1., 1., 1.] {
        out.write_f32(*p)?;
    }
    out.write_f32(352.)?; // vox_offset
    out.write_f32(1.)?; // scl_slope
    out.write_f32(0.)?; // scl_inter
    out.write_i16(0)?; // slice_end
    out.write_u8(0)?; // slice_code
    out.write_u8(0x0A)?; // xyzt_units: mm, sec
    for _ in 0..4 {
        out.write_f32(0.)?; // cal_max, cal_min, slice_duration, toffset
    }
    out.write_i32(0)?; // glmax
    out.write_i32(0)?; // glmin
    let mut descrip = [0u8; 80];
    descrip[..15].copy_from_slice(b"gen_volume demo");
    out.write_all(&descrip)?;
    out.write_all(&[0; 24])?; // aux_file
    out.write_i16(1)?; // qform_code
    out.write_i16(1)?; // sform_code
    for q in &[0f32, 0., 0., -8., -8., -6.] {
        out.write_f32(*q)?; // quatern_*, qoffset_*
    }
    for row in &[
        [2f32, 0., 0., -8.],
        [0., 2., 0., -8.],
        [0., 0., 3., -6.],
    ] {
        for v in row {
            out.write_f32(*v)?;
        }
    }
    out.write_all(&[0; 16])?; // intent_name
    out.write_all(b"n+1\0")?;
    out.write_all(&[0; 4])?; // extender
    Ok(())
}

fn main() -> io::Result<()> {
    let mut args = env::args().skip(1);
    let filename = args.next().expect("Path to NIfTI file is required");
    let mut file = BufWriter::new(File::create(filename)?);
    write_header(&mut file)?;
    let mut out = ByteOrdered::runtime(&mut file, Endianness::Little);
    let count = DIM.iter().map(|d| usize::from(*d)).product::<usize>();
    for i in 0..count {
        out.write_i16(i as i16)?;
    }
    file.flush()
}
