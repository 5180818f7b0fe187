use std::{
  collections::TryReserveError,
  fmt,
  path::{Path, PathBuf},
};

use image::{ColorType, ImageError};

use crate::RawFormat;

/// An error from the byte-level side of `rawpack`.
///
/// None of these involve the file system, so they're all cheap to compare in
/// tests.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RawError {
  /// The decoded image uses a pixel layout that isn't in the format table.
  UnsupportedPixelFormat(ColorType),

  /// The raw format tag is known by name but isn't in the format table.
  UnsupportedRawFormat(RawFormat),

  /// The raw byte count doesn't match `width * height * bytes_per_pixel`.
  SizeMismatch { actual: usize, expected: usize },

  /// The file name doesn't follow `<base>.<format>-<width>x<height>.raw`.
  MalformedRawFilename { file_name: String },

  /// The declared width and/or height is 0.
  WidthOrHeightZero,

  /// The byte size of the image doesn't fit in `usize`.
  DimensionsTooLarge,

  /// A stride smaller than one row of pixels.
  BadStride { stride: usize, line_bytes: usize },

  /// A pixel buffer whose length isn't `stride * height`.
  BadBufferLength { actual: usize, expected: usize },

  /// The allocator couldn't give us enough space.
  Alloc,
}
impl From<TryReserveError> for RawError {
  #[inline]
  fn from(_: TryReserveError) -> Self {
    Self::Alloc
  }
}
impl fmt::Display for RawError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::UnsupportedPixelFormat(color) => write!(f, "unsupported pixel format {color:?}"),
      Self::UnsupportedRawFormat(format) => write!(f, "unsupported raw format {format}"),
      Self::SizeMismatch { actual, expected } => {
        write!(f, "wrong raw file size {actual}, should be {expected} bytes")
      }
      Self::MalformedRawFilename { file_name } => write!(
        f,
        "raw file name {file_name:?} has wrong format, expected <name>.<format>-<width>x<height>.raw"
      ),
      Self::WidthOrHeightZero => f.write_str("image width and height must be non-zero"),
      Self::DimensionsTooLarge => f.write_str("image dimensions are too large"),
      Self::BadStride { stride, line_bytes } => {
        write!(f, "stride {stride} is smaller than the row size of {line_bytes} bytes")
      }
      Self::BadBufferLength { actual, expected } => {
        write!(f, "pixel buffer holds {actual} bytes, expected {expected}")
      }
      Self::Alloc => f.write_str("allocation failed"),
    }
  }
}
impl std::error::Error for RawError {}

/// An error from converting a file, tagged with the path it happened on.
#[derive(Debug)]
pub enum ConvertError {
  Raw { path: PathBuf, source: RawError },
  Io { path: PathBuf, source: std::io::Error },
  Image { path: PathBuf, source: ImageError },
}
impl ConvertError {
  /// The file this error is about.
  #[inline]
  #[must_use]
  pub fn path(&self) -> &Path {
    match self {
      Self::Raw { path, .. } | Self::Io { path, .. } | Self::Image { path, .. } => path,
    }
  }

  /// The byte-level cause, if there is one.
  #[inline]
  #[must_use]
  pub fn raw_error(&self) -> Option<&RawError> {
    match self {
      Self::Raw { source, .. } => Some(source),
      _ => None,
    }
  }

  pub(crate) fn raw(path: &Path) -> impl FnOnce(RawError) -> Self + '_ {
    move |source| Self::Raw { path: path.to_path_buf(), source }
  }

  pub(crate) fn io(path: &Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
    move |source| Self::Io { path: path.to_path_buf(), source }
  }

  pub(crate) fn image(path: &Path) -> impl FnOnce(ImageError) -> Self + '_ {
    move |source| Self::Image { path: path.to_path_buf(), source }
  }
}
impl fmt::Display for ConvertError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Raw { path, source } => write!(f, "{}: {source}", path.display()),
      Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
      Self::Image { path, source } => write!(f, "{}: {source}", path.display()),
    }
  }
}
impl std::error::Error for ConvertError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Raw { source, .. } => Some(source),
      Self::Io { source, .. } => Some(source),
      Self::Image { source, .. } => Some(source),
    }
  }
}

/// Short hand for results with a [`RawError`].
pub type RawResult<T> = Result<T, RawError>;
