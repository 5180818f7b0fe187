#![forbid(unsafe_code)]

//! Strips the row padding out of a bitmap, giving the raw bytes.

use crate::{
  lookup_by_pixel_format, Dimensions, FormatLink, RawError, RawFormat, RawResult, StridedBitmap,
};

/// Tightly packed pixel bytes, plus what you need to know to read them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImage {
  pub format: RawFormat,
  pub dimensions: Dimensions,
  /// Exactly `height * width * bytes_per_pixel` bytes.
  pub bytes: Vec<u8>,
}

/// Copies the pixel rows of `bitmap` into a new buffer with no padding.
///
/// `link` has to be the table entry for the bitmap's pixel format.
///
/// ## Failure
/// * [`RawError::UnsupportedPixelFormat`] if the bitmap's pixel format isn't
///   the one `link` describes. Nothing is copied in this case.
/// * Allocation failure.
pub fn unpack(bitmap: &StridedBitmap, link: &FormatLink) -> RawResult<RawImage> {
  if bitmap.pixel_format() != link.pixel {
    return Err(RawError::UnsupportedPixelFormat(bitmap.pixel_format()));
  }
  let dimensions = bitmap.dimensions();
  let line_bytes = link.line_bytes(dimensions.width()).ok_or(RawError::DimensionsTooLarge)?;
  let total = dimensions.raw_len(link)?;
  let stride = bitmap.stride();
  let src = bitmap.as_bytes();
  debug_assert!(stride >= line_bytes);

  let mut bytes: Vec<u8> = Vec::new();
  bytes.try_reserve_exact(total)?;
  bytes.resize(total, 0);
  for (y, dst) in bytes.chunks_exact_mut(line_bytes).enumerate() {
    let start = y * stride;
    dst.copy_from_slice(&src[start..start + line_bytes]);
  }
  log::trace!("unpacked {dimensions} {}: stride {stride}, {line_bytes} bytes per row", link.raw);

  Ok(RawImage { format: link.raw, dimensions, bytes })
}

/// Looks up the bitmap's pixel format in the format table, then [`unpack`]s.
///
/// ## Failure
/// * [`RawError::UnsupportedPixelFormat`] if the table has no entry for the
///   bitmap's pixel format.
pub fn unpack_bitmap(bitmap: &StridedBitmap) -> RawResult<RawImage> {
  let link = lookup_by_pixel_format(bitmap.pixel_format())
    .ok_or(RawError::UnsupportedPixelFormat(bitmap.pixel_format()))?;
  unpack(bitmap, link)
}
