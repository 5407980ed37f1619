//! Module for handling and retrieving complete NIfTI objects.
//!
//! An object is a header together with its decoded voxel array. Both are
//! read into memory in full.

use crate::attribute::{canonical_attributes, CanonicalVolume};
use crate::error::{NiftiError, Result};
use crate::header::NiftiHeader;
use crate::util::{is_gz_file, into_img_file_gz};
use crate::volume::VoxelArray;
use flate2::bufread::GzDecoder;
use log::trace;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Data type for a NIfTI object that is fully contained in memory.
#[derive(Debug, PartialEq, Clone)]
pub struct NiftiObject {
    header: NiftiHeader,
    volume: VoxelArray,
}

impl NiftiObject {
    /// Retrieve the full contents of a NIfTI object.
    /// The given file system path is used as reference.
    /// If the file only contains the header, this method will
    /// look for the corresponding file with the extension ".img.gz",
    /// or ".img" if the former wasn't found.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use nifti_canon::NiftiObject;
    /// # use nifti_canon::Result;
    ///
    /// # fn run() -> Result<()> {
    /// let obj = NiftiObject::from_file("minimal.nii.gz")?;
    /// println!("{:?}", obj.volume().shape());
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<NiftiObject> {
        let gz = is_gz_file(&path);
        let file = BufReader::new(File::open(&path)?);
        if gz {
            Self::from_file_2(path, GzDecoder::new(file))
        } else {
            Self::from_file_2(path, file)
        }
    }

    fn from_file_2<P: AsRef<Path>, S: Read>(path: P, mut stream: S) -> Result<NiftiObject> {
        let header = NiftiHeader::from_reader(&mut stream)?;
        if !header.is_header_only() {
            return Self::from_header_and_stream(header, stream);
        }

        // volume is in another file
        let mut img_path = into_img_file_gz(path.as_ref().to_path_buf());
        let volume = read_image_file(&img_path, &header)
            .or_else(|e| match e {
                NiftiError::Io(ref io_e) if io_e.kind() == io::ErrorKind::NotFound => {
                    // try .img file instead (remove .gz extension)
                    let _ = img_path.set_extension("");
                    read_image_file(&img_path, &header)
                }
                e => Err(e),
            })
            .map_err(|e| match e {
                NiftiError::Io(io_e) => NiftiError::MissingVolumeFile(io_e),
                e => e,
            })?;
        Ok(NiftiObject { header, volume })
    }

    /// Retrieve a NIfTI object as separate header and volume files.
    /// This method is useful when file names are not conventional for a
    /// NIfTI file pair.
    pub fn from_file_pair<P, Q>(hdr_path: P, vol_path: Q) -> Result<NiftiObject>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let gz = is_gz_file(&hdr_path);
        let file = BufReader::new(File::open(&hdr_path)?);
        let header = if gz {
            NiftiHeader::from_reader(GzDecoder::new(file))?
        } else {
            NiftiHeader::from_reader(file)?
        };
        let volume = read_image_file(vol_path, &header)?;
        Ok(NiftiObject { header, volume })
    }

    /// Retrieve a NIfTI object from a stream of data, positioned at the
    /// start of the header.
    ///
    /// # Errors
    ///
    /// - `NiftiError::NoVolumeData` if the source only contains (or claims to contain)
    /// a header.
    pub fn from_reader<R: Read>(mut source: R) -> Result<NiftiObject> {
        let header = NiftiHeader::from_reader(&mut source)?;
        if header.is_header_only() {
            return Err(NiftiError::NoVolumeData);
        }
        Self::from_header_and_stream(header, source)
    }

    fn from_header_and_stream<R: Read>(header: NiftiHeader, mut source: R) -> Result<NiftiObject> {
        let padding = header
            .vox_offset()
            .saturating_sub(header.version().data_start());
        skip_bytes(&mut source, padding)?;
        let volume = VoxelArray::from_reader(&header, source)?;
        Ok(NiftiObject { header, volume })
    }

    /// Obtain a reference to the header.
    pub fn header(&self) -> &NiftiHeader {
        &self.header
    }

    /// Obtain a reference to the voxel array.
    pub fn volume(&self) -> &VoxelArray {
        &self.volume
    }

    /// Move the volume out of the object, discarding the header.
    pub fn into_volume(self) -> VoxelArray {
        self.volume
    }

    /// Split the object into its header and voxel array.
    pub fn into_parts(self) -> (NiftiHeader, VoxelArray) {
        (self.header, self.volume)
    }

    /// Build the canonical attribute list from the header and hand it over
    /// together with the voxel array.
    pub fn into_canonical(self) -> CanonicalVolume {
        CanonicalVolume {
            attributes: canonical_attributes(&self.header),
            data: self.volume,
        }
    }
}

/// Read the voxel array from a separate image file. The data starts at
/// `vox_offset` bytes into that file.
fn read_image_file<P: AsRef<Path>>(path: P, header: &NiftiHeader) -> Result<VoxelArray> {
    let gz = is_gz_file(&path);
    let file = BufReader::new(File::open(path)?);
    if gz {
        read_image_stream(GzDecoder::new(file), header)
    } else {
        read_image_stream(file, header)
    }
}

fn read_image_stream<R: Read>(mut source: R, header: &NiftiHeader) -> Result<VoxelArray> {
    skip_bytes(&mut source, header.vox_offset())?;
    VoxelArray::from_reader(header, source)
}

fn skip_bytes<R: Read>(source: &mut R, len: u64) -> Result<()> {
    if len == 0 {
        return Ok(());
    }
    trace!("skipping {} bytes before the voxel data", len);
    let skipped = io::copy(&mut source.by_ref().take(len), &mut io::sink())?;
    if skipped < len {
        return Err(NiftiError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "source ended before the voxel data",
        )));
    }
    Ok(())
}
