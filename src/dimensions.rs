#![forbid(unsafe_code)]

use core::fmt;

use crate::{FormatLink, RawError, RawResult};

/// Width and height of an image, both non-zero.
///
/// There's no way to change one of the values after the fact, you make a new
/// value instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
  width: u32,
  height: u32,
}
impl Dimensions {
  /// Makes a new size, or `None` if either value is 0.
  #[inline]
  #[must_use]
  pub const fn new(width: u32, height: u32) -> Option<Self> {
    if width == 0 || height == 0 {
      None
    } else {
      Some(Self { width, height })
    }
  }

  /// As [`Dimensions::new`], with the matching error.
  #[inline]
  pub fn try_new(width: u32, height: u32) -> RawResult<Self> {
    match Self::new(width, height) {
      Some(d) => Ok(d),
      None => Err(RawError::WidthOrHeightZero),
    }
  }

  #[inline]
  #[must_use]
  pub const fn width(self) -> u32 {
    self.width
  }

  #[inline]
  #[must_use]
  pub const fn height(self) -> u32 {
    self.height
  }

  /// Exact byte count of a raw buffer of this size in the format given.
  ///
  /// ## Failure
  /// * [`RawError::DimensionsTooLarge`] if the count doesn't fit in `usize`.
  #[inline]
  pub fn raw_len(self, link: &FormatLink) -> RawResult<usize> {
    link
      .line_bytes(self.width)
      .and_then(|line| line.checked_mul(self.height as usize))
      .ok_or(RawError::DimensionsTooLarge)
  }
}
impl fmt::Display for Dimensions {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}x{}", self.width, self.height)
  }
}
