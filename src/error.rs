//! Types for error handling go here.
use quick_error::quick_error;
use std::io::Error as IOError;

quick_error! {
    /// Error type for all error variants originated by this crate.
    #[derive(Debug)]
    #[non_exhaustive]
    pub enum NiftiError {
        /// The first four bytes of the header are neither 348 nor 540
        /// in any byte order.
        UnrecognizedMagic(value: i32) {
            display("Unrecognized header size/magic: {}", value)
        }
        /// The extender code following the header announces extensions,
        /// which are not supported.
        UnsupportedExtension(extender: [u8; 4]) {
            display("Unsupported header extension: {:?}", extender)
        }
        /// The header's datatype code does not map to a decodable element.
        UnsupportedDataType(code: i16) {
            display("Unsupported datatype: {}", code)
        }
        /// A mesh data array declares an intent outside of the known table.
        UnknownIntent(intent: String) {
            display("Unknown intent `{}`", intent)
        }
        /// A mesh data array declares an element type outside of the known table.
        UnknownElementType(data_type: String) {
            display("Unknown element type `{}`", data_type)
        }
        /// The number of bytes available does not match the declared
        /// extents times the element width.
        MalformedBuffer { expected: usize, got: usize } {
            display("Malformed buffer: expected {} bytes, got {}", expected, got)
        }
        /// A header code does not match any known value of its enum.
        InvalidCode(field: &'static str, code: i64) {
            display("invalid code `{}` for header field {}", code, field)
        }
        /// The `dim` field is not a valid volume shape.
        InconsistentDim(axis: u8, value: i64) {
            display("Inconsistent value `{}` in header field dim[{}]", value, axis)
        }
        /// A time series sibling does not share the shape or element type
        /// of the first time point.
        InconsistentTimeSeries(index: usize) {
            display("Data array #{} is not consistent with the first time point", index)
        }
        /// The source only contains (or claims to contain) a header.
        NoVolumeData {
            display("No volume data")
        }
        /// Header-only file whose image file could not be opened.
        MissingVolumeFile(err: IOError) {
            source(err)
            display("Volume file not found: {}", err)
        }
        /// I/O Error
        Io(err: IOError) {
            from()
            source(err)
            display("I/O error: {}", err)
        }
    }
}

/// Alias type for results originated from this crate.
pub type Result<T> = ::std::result::Result<T, NiftiError>;
