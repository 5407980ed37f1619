//! Private utility module
use std::borrow::Cow;
use std::path::{Path, PathBuf};

pub use byteordered::Endianness;

/// Check whether the file name ends with ".gz".
pub fn is_gz_file<P>(path: P) -> bool
where
    P: AsRef<Path>,
{
    path.as_ref()
        .file_name()
        .map(|a| a.to_string_lossy().ends_with(".gz"))
        .unwrap_or(false)
}

/// Convert a file path to a header file (.hdr or .hdr.gz) to
/// the respective volume file with GZip compression (.img.gz).
///
/// # Panics
/// Can panic if the given file path is not a valid path to a header file.
/// If it doesn't panic in this case, the result might still not be correct.
pub fn into_img_file_gz(mut path: PathBuf) -> PathBuf {
    if is_gz_file(&path) {
        // leave only the first extension (.hdr)
        let _ = path.set_extension("");
    }
    let _ = path.set_extension("img.gz");
    path
}

/// Decode a fixed-size text field, stopping at the first NUL byte.
pub fn trim_nul_str(raw: &[u8]) -> Cow<'_, str> {
    let end = raw.iter().position(|b| *b == 0).unwrap_or(raw.len());
    String::from_utf8_lossy(&raw[..end])
}
