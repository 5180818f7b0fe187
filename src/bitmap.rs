#![forbid(unsafe_code)]

//! Provides the row-padded pixel buffer that sits between the codec and the
//! raw byte packing.

use image::ColorType;
use pixel_formats::r8g8b8a8_Srgb;

use crate::{Dimensions, RawError, RawResult};

/// Row alignment used when we pick the stride ourselves.
///
/// Same as the row padding of BMP files.
pub const ROW_ALIGN: usize = 4;

/// Rounds `line_bytes` up to the next multiple of [`ROW_ALIGN`].
///
/// `None` on overflow.
#[inline]
#[must_use]
pub const fn aligned_stride(line_bytes: usize) -> Option<usize> {
  match line_bytes.checked_add(ROW_ALIGN - 1) {
    Some(n) => Some(n & !(ROW_ALIGN - 1)),
    None => None,
  }
}

/// The 256 entry palette that maps each index `i` to opaque `(i, i, i)`.
#[must_use]
pub fn gray_ramp_palette() -> Vec<r8g8b8a8_Srgb> {
  (0..=u8::MAX).map(|i| r8g8b8a8_Srgb { r: i, g: i, b: i, a: 0xFF }).collect()
}

/// Checks if a palette is exactly [`gray_ramp_palette`].
#[must_use]
pub fn is_gray_ramp(palette: &[r8g8b8a8_Srgb]) -> bool {
  palette.len() == 256
    && palette.iter().zip(0..=u8::MAX).all(|(c, i)| c.r == i && c.g == i && c.b == i && c.a == 0xFF)
}

/// An image in memory, stored row by row with a stride that can be larger
/// than the pixel bytes of a row.
///
/// * Rows are top to bottom, each starts `stride` bytes after the previous one.
/// * The first `width * bytes_per_pixel` bytes of a row are pixel data, the
///   rest is padding with no meaning.
/// * The palette is empty unless someone attached one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StridedBitmap {
  dimensions: Dimensions,
  stride: usize,
  pixel_format: ColorType,
  bytes: Vec<u8>,
  palette: Vec<r8g8b8a8_Srgb>,
}
impl StridedBitmap {
  /// Allocates a zeroed bitmap, with the stride rounded up to [`ROW_ALIGN`].
  ///
  /// ## Failure
  /// * The byte size overflows.
  /// * Allocation failure.
  pub fn try_new(dimensions: Dimensions, pixel_format: ColorType) -> RawResult<Self> {
    let line_bytes = line_bytes_of(dimensions, pixel_format)?;
    let stride = aligned_stride(line_bytes).ok_or(RawError::DimensionsTooLarge)?;
    let total =
      stride.checked_mul(dimensions.height() as usize).ok_or(RawError::DimensionsTooLarge)?;
    let mut bytes: Vec<u8> = Vec::new();
    bytes.try_reserve_exact(total)?;
    bytes.resize(total, 0);
    Ok(Self { dimensions, stride, pixel_format, bytes, palette: Vec::new() })
  }

  /// Wraps bytes that are already laid out with the stride given.
  ///
  /// ## Failure
  /// * The stride is less than one row of pixels.
  /// * `bytes.len()` isn't `stride * height`.
  pub fn from_parts(
    dimensions: Dimensions, stride: usize, pixel_format: ColorType, bytes: Vec<u8>,
  ) -> RawResult<Self> {
    let line_bytes = line_bytes_of(dimensions, pixel_format)?;
    if stride < line_bytes {
      return Err(RawError::BadStride { stride, line_bytes });
    }
    let expected =
      stride.checked_mul(dimensions.height() as usize).ok_or(RawError::DimensionsTooLarge)?;
    if bytes.len() != expected {
      return Err(RawError::BadBufferLength { actual: bytes.len(), expected });
    }
    Ok(Self { dimensions, stride, pixel_format, bytes, palette: Vec::new() })
  }

  #[inline]
  #[must_use]
  pub const fn dimensions(&self) -> Dimensions {
    self.dimensions
  }
  #[inline]
  #[must_use]
  pub const fn width(&self) -> u32 {
    self.dimensions.width()
  }
  #[inline]
  #[must_use]
  pub const fn height(&self) -> u32 {
    self.dimensions.height()
  }
  #[inline]
  #[must_use]
  pub const fn stride(&self) -> usize {
    self.stride
  }
  #[inline]
  #[must_use]
  pub const fn pixel_format(&self) -> ColorType {
    self.pixel_format
  }

  /// Bytes of pixel data per row, not counting padding.
  #[inline]
  #[must_use]
  pub fn line_bytes(&self) -> usize {
    // can't overflow, it was checked when the bitmap was made.
    usize::from(self.pixel_format.bytes_per_pixel()) * self.width() as usize
  }

  /// All the bytes, padding included.
  #[inline]
  #[must_use]
  pub fn as_bytes(&self) -> &[u8] {
    &self.bytes
  }

  /// The pixel data of each row, top to bottom, without the padding.
  #[inline]
  pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
    let line_bytes = self.line_bytes();
    self.bytes.chunks_exact(self.stride).map(move |row| &row[..line_bytes])
  }

  /// Mutable version of [`rows`](Self::rows).
  #[inline]
  pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [u8]> + '_ {
    let line_bytes = self.line_bytes();
    self.bytes.chunks_exact_mut(self.stride).map(move |row| &mut row[..line_bytes])
  }

  #[inline]
  #[must_use]
  pub fn palette(&self) -> &[r8g8b8a8_Srgb] {
    &self.palette
  }

  /// Attaches a color table, replacing any previous one.
  #[inline]
  pub fn set_palette(&mut self, palette: Vec<r8g8b8a8_Srgb>) {
    self.palette = palette;
  }
}

fn line_bytes_of(dimensions: Dimensions, pixel_format: ColorType) -> RawResult<usize> {
  usize::from(pixel_format.bytes_per_pixel())
    .checked_mul(dimensions.width() as usize)
    .ok_or(RawError::DimensionsTooLarge)
}
