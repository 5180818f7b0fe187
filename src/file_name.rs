#![forbid(unsafe_code)]

//! Raw files have no header, so the file name carries the format and size.
//!
//! The pattern is `<base>.<format>-<width>x<height>.raw`, for example
//! `photo.Gray-640x480.raw` or `photo.RGB-1920x1080.raw`.
//!
//! * `base` is anything non-empty.
//! * `format` is one or more word characters (ASCII letters, digits, `_`) and
//!   must be the name of a [`RawFormat`], compared without ASCII case.
//! * `width` and `height` are ASCII digits giving non-zero `u32` values.
//!
//! The whole name has to match. There's no partial matching. The `.raw`
//! extension itself is matched without ASCII case, so `photo.Gray-1x1.RAW`
//! is a raw file name too.
//!
//! Only the file name has to be UTF-8. The directory it sits in is kept as a
//! path, whatever its encoding.

use std::path::{Path, PathBuf};

use crate::{Dimensions, RawError, RawFormat, RawResult};

/// The extension every raw file ends with.
pub const RAW_EXTENSION: &str = "raw";

/// What a raw file name says about its contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFileName {
  /// The directory the file is in, if the name came with one.
  pub parent: Option<PathBuf>,
  /// The file name with the `.<format>-<width>x<height>.raw` suffix removed.
  pub base: String,
  pub format: RawFormat,
  pub dimensions: Dimensions,
}
impl RawFileName {
  /// `<base>.<extension>`, in the same directory as the raw file.
  #[must_use]
  pub fn sibling(&self, extension: &str) -> PathBuf {
    let file_name = format!("{}.{extension}", self.base);
    match &self.parent {
      Some(parent) => parent.join(file_name),
      None => PathBuf::from(file_name),
    }
  }
}

/// Formats the `<format>-<width>x<height>.raw` suffix.
#[must_use]
pub fn raw_suffix(format: RawFormat, dimensions: Dimensions) -> String {
  format!("{format}-{dimensions}.{RAW_EXTENSION}")
}

/// The raw file name for an image at `source`: its extension is replaced by
/// the raw suffix, or the suffix is appended if there's no extension.
#[must_use]
pub fn raw_path_for(source: &Path, format: RawFormat, dimensions: Dimensions) -> PathBuf {
  source.with_extension(raw_suffix(format, dimensions))
}

/// Parses just the file name part of a path (no directories).
///
/// ## Failure
/// * [`RawError::MalformedRawFilename`] if any part of the pattern doesn't
///   match.
pub fn parse_raw_file_name(file_name: &str) -> RawResult<RawFileName> {
  let malformed = || RawError::MalformedRawFilename { file_name: file_name.to_string() };

  let stem = strip_suffix_ignore_ascii_case(file_name, ".raw").ok_or_else(malformed)?;
  let (base, tag) = stem.rsplit_once('.').ok_or_else(malformed)?;
  if base.is_empty() {
    return Err(malformed());
  }
  let (format_name, size) = tag.split_once('-').ok_or_else(malformed)?;
  if format_name.is_empty() || !format_name.bytes().all(is_word_byte) {
    return Err(malformed());
  }
  let format: RawFormat = format_name.parse().map_err(|_| malformed())?;
  let (width, height) = size.split_once('x').ok_or_else(malformed)?;
  let width = parse_ascii_u32(width).ok_or_else(malformed)?;
  let height = parse_ascii_u32(height).ok_or_else(malformed)?;
  let dimensions = Dimensions::new(width, height).ok_or_else(malformed)?;

  Ok(RawFileName { parent: None, base: base.to_string(), format, dimensions })
}

/// Parses the file name of `path`, keeping its directory as the `parent`.
///
/// ## Failure
/// * [`RawError::MalformedRawFilename`] if the path has no file name, the name
///   isn't UTF-8, or the pattern doesn't match.
pub fn parse_raw_path(path: &Path) -> RawResult<RawFileName> {
  let file_name = path
    .file_name()
    .and_then(|name| name.to_str())
    .ok_or_else(|| RawError::MalformedRawFilename { file_name: path.display().to_string() })?;
  let parent = path.parent().filter(|parent| !parent.as_os_str().is_empty());
  Ok(RawFileName { parent: parent.map(Path::to_path_buf), ..parse_raw_file_name(file_name)? })
}

/// Checks if `path` has the raw extension, without regard to ASCII case.
#[inline]
#[must_use]
pub fn has_raw_extension(path: &Path) -> bool {
  path.extension().map_or(false, |ext| ext.eq_ignore_ascii_case(RAW_EXTENSION))
}

#[inline]
fn strip_suffix_ignore_ascii_case<'s>(s: &'s str, suffix: &str) -> Option<&'s str> {
  let split = s.len().checked_sub(suffix.len())?;
  if s.is_char_boundary(split) && s[split..].eq_ignore_ascii_case(suffix) {
    Some(&s[..split])
  } else {
    None
  }
}

#[inline]
#[must_use]
const fn is_word_byte(u: u8) -> bool {
  u.is_ascii_alphanumeric() || u == b'_'
}

#[inline]
fn parse_ascii_u32(digits: &str) -> Option<u32> {
  // `str::parse` alone would also take a leading `+`.
  if digits.is_empty() || !digits.bytes().all(|u| u.is_ascii_digit()) {
    return None;
  }
  digits.parse().ok()
}
