#![forbid(unsafe_code)]

//! Puts raw bytes back into a row-padded bitmap that an encoder can take.

use crate::{
  gray_ramp_palette, lookup_by_raw_format, Dimensions, FormatLink, RawError, RawFormat, RawResult,
  StridedBitmap,
};

/// Copies tightly packed `raw` bytes into a newly allocated bitmap.
///
/// The new bitmap picks its own stride. Gray bitmaps also get the
/// [gray ramp](gray_ramp_palette) palette, so encoders that go through the
/// palette still output gray.
///
/// ## Failure
/// * [`RawError::SizeMismatch`] if `raw.len()` isn't exactly
///   `height * width * bytes_per_pixel`. This is checked before the bitmap is
///   allocated.
/// * The byte size overflows, or allocation fails.
pub fn pack(raw: &[u8], dimensions: Dimensions, link: &FormatLink) -> RawResult<StridedBitmap> {
  let expected = dimensions.raw_len(link)?;
  if raw.len() != expected {
    return Err(RawError::SizeMismatch { actual: raw.len(), expected });
  }
  let line_bytes = link.line_bytes(dimensions.width()).ok_or(RawError::DimensionsTooLarge)?;

  let mut bitmap = StridedBitmap::try_new(dimensions, link.pixel)?;
  for (src, dst) in raw.chunks_exact(line_bytes).zip(bitmap.rows_mut()) {
    dst.copy_from_slice(src);
  }
  if link.raw == RawFormat::Gray {
    bitmap.set_palette(gray_ramp_palette());
  }
  log::trace!(
    "packed {dimensions} {}: {line_bytes} bytes per row, stride {}",
    link.raw,
    bitmap.stride()
  );

  Ok(bitmap)
}

/// Looks up `format` in the format table, then [`pack`]s.
///
/// ## Failure
/// * [`RawError::UnsupportedRawFormat`] if the table has no entry for
///   `format`.
pub fn pack_raw(raw: &[u8], dimensions: Dimensions, format: RawFormat) -> RawResult<StridedBitmap> {
  let link = lookup_by_raw_format(format).ok_or(RawError::UnsupportedRawFormat(format))?;
  pack(raw, dimensions, link)
}
