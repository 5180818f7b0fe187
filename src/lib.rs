//! A crate for converting images to and from raw pixel dumps.
//!
//! A raw file is nothing but pixel bytes: rows top to bottom, each row exactly
//! `width * bytes_per_pixel` bytes, no header and no padding. The file name
//! says how to read it, see [`file_name`](crate::file_name).
//!
//! * [`unpack`](fn@unpack) copies the rows of a decoded [`StridedBitmap`] into a raw
//!   buffer, dropping any row padding.
//! * [`pack`](fn@pack) goes the other way, making a bitmap that the encoder can take.
//! * [`FORMAT_TABLE`] lists the supported formats and how they line up with
//!   the codec's pixel formats.
//! * [`convert_file`] does a whole file, in either direction.
//!
//! All actual BMP / JPEG / PNG handling is done by the `image` crate.

pub mod raw_format;
pub use raw_format::*;

pub mod dimensions;
pub use dimensions::*;

pub mod error;
pub use error::*;

pub mod bitmap;
pub use bitmap::*;

pub mod unpack;
pub use unpack::*;

pub mod pack;
pub use pack::*;

pub mod file_name;
pub use file_name::*;

pub mod codec;
pub use codec::*;

pub mod convert;
pub use convert::*;
