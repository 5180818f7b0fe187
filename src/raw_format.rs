#![forbid(unsafe_code)]

//! The raw formats this crate knows about, and how they line up with the pixel
//! formats of the image codec.
//!
//! A raw file carries no header at all. The only things that say how to read
//! the bytes are the format name in the file name, and the entry of that
//! format in [`FORMAT_TABLE`].

use core::{fmt, str::FromStr};

use image::ColorType;

/// Pixel layout tag of a raw file.
///
/// The names (as given by `Display`) are the ones used in raw file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RawFormat {
  /// Not a real layout. It has no table entry, so it can't be packed or
  /// unpacked.
  Undefined,
  /// 8-bit intensity, one byte per pixel.
  Gray,
  /// 8-bit red, green, blue, three bytes per pixel.
  Rgb,
}
impl RawFormat {
  /// Every variant, in declaration order.
  pub const ALL: [RawFormat; 3] = [RawFormat::Undefined, RawFormat::Gray, RawFormat::Rgb];

  /// The name used in raw file names.
  #[inline]
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      RawFormat::Undefined => "Undefined",
      RawFormat::Gray => "Gray",
      RawFormat::Rgb => "RGB",
    }
  }
}
impl fmt::Display for RawFormat {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// The name given isn't the name of any [`RawFormat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownRawFormat;

impl FromStr for RawFormat {
  type Err = UnknownRawFormat;

  /// Names match without regard to ASCII case.
  #[inline]
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    RawFormat::ALL.into_iter().find(|f| f.name().eq_ignore_ascii_case(s)).ok_or(UnknownRawFormat)
  }
}

/// Links a raw format to the codec's pixel format with the same byte layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormatLink {
  pub raw: RawFormat,
  pub pixel: ColorType,
  pub bytes_per_pixel: usize,
}
impl FormatLink {
  /// Bytes in one tightly packed row of `width` pixels.
  ///
  /// `None` on overflow.
  #[inline]
  #[must_use]
  pub const fn line_bytes(&self, width: u32) -> Option<usize> {
    self.bytes_per_pixel.checked_mul(width as usize)
  }
}

/// All supported formats.
///
/// Each raw format and each pixel format shows up at most once, so lookups in
/// either direction have at most one answer.
pub static FORMAT_TABLE: [FormatLink; 2] = [
  FormatLink { raw: RawFormat::Gray, pixel: ColorType::L8, bytes_per_pixel: 1 },
  FormatLink { raw: RawFormat::Rgb, pixel: ColorType::Rgb8, bytes_per_pixel: 3 },
];

/// Finds the table entry for a codec pixel format.
#[inline]
#[must_use]
pub fn lookup_by_pixel_format(pixel: ColorType) -> Option<&'static FormatLink> {
  FORMAT_TABLE.iter().find(|link| link.pixel == pixel)
}

/// Finds the table entry for a raw format.
#[inline]
#[must_use]
pub fn lookup_by_raw_format(raw: RawFormat) -> Option<&'static FormatLink> {
  FORMAT_TABLE.iter().find(|link| link.raw == raw)
}
