#![forbid(unsafe_code)]

//! File to file conversion in both directions.
//!
//! * **Decode:** image file in, `<name>.<format>-<width>x<height>.raw` out.
//! * **Encode:** raw file in, `<name>.png` (or `.jpg`) out.
//!
//! Output files are only written once the whole output buffer is ready, so a
//! failed conversion never leaves a partial file behind.

use std::path::{Path, PathBuf};

use crate::{
  has_raw_extension, pack_raw, parse_raw_path, raw_path_for, read_bitmap, unpack_bitmap,
  write_bitmap, ContainerFormat, ConvertError,
};

/// Which way a file gets converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
  /// Image file to raw file.
  Decode,
  /// Raw file to image file.
  Encode,
}
impl Direction {
  /// Files with the `raw` extension (any case) are encoded, everything else is
  /// decoded.
  #[inline]
  #[must_use]
  pub fn from_path(path: &Path) -> Self {
    if has_raw_extension(path) {
      Direction::Encode
    } else {
      Direction::Decode
    }
  }

  /// `"Decoded"` or `"Encoded"`.
  #[inline]
  #[must_use]
  pub const fn past_tense(self) -> &'static str {
    match self {
      Direction::Decode => "Decoded",
      Direction::Encode => "Encoded",
    }
  }
}

/// Settings for a conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertOptions {
  /// Container written when encoding a raw file.
  pub container: ContainerFormat,
}

/// A finished conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
  pub direction: Direction,
  pub input: PathBuf,
  pub output: PathBuf,
}

/// Converts `path` in whatever direction its extension calls for.
pub fn convert_file(path: &Path, options: &ConvertOptions) -> Result<Conversion, ConvertError> {
  let direction = Direction::from_path(path);
  let output = match direction {
    Direction::Decode => decode_file(path)?,
    Direction::Encode => encode_file(path, options)?,
  };
  Ok(Conversion { direction, input: path.to_path_buf(), output })
}

/// Decodes the image at `path` and writes its pixels as a raw file next to
/// it.
///
/// Returns the path of the raw file.
///
/// ## Failure
/// * The image can't be read or decoded.
/// * The image's pixel format isn't in the format table.
/// * The raw file can't be written.
pub fn decode_file(path: &Path) -> Result<PathBuf, ConvertError> {
  let raw = {
    let bitmap = read_bitmap(path)?;
    unpack_bitmap(&bitmap).map_err(ConvertError::raw(path))?
  };
  let raw_path = raw_path_for(path, raw.format, raw.dimensions);
  log::debug!("writing {} bytes to {}", raw.bytes.len(), raw_path.display());
  std::fs::write(&raw_path, &raw.bytes).map_err(ConvertError::io(&raw_path))?;
  Ok(raw_path)
}

/// Reads the raw file at `path`, and encodes it as an image file next to it.
///
/// The format and size come from the raw file's name. Returns the path of the
/// image file.
///
/// ## Failure
/// * The name doesn't follow the raw file name pattern, or names a format
///   that's not in the format table.
/// * The file's length doesn't match the format and size in its name.
/// * The raw file can't be read, or the image can't be encoded or written.
pub fn encode_file(path: &Path, options: &ConvertOptions) -> Result<PathBuf, ConvertError> {
  let name = parse_raw_path(path).map_err(ConvertError::raw(path))?;
  let image_path = name.sibling(options.container.extension());
  let bytes = std::fs::read(path).map_err(ConvertError::io(path))?;
  log::debug!(
    "read {} bytes from {} as {} {}",
    bytes.len(),
    path.display(),
    name.format,
    name.dimensions
  );
  let bitmap = pack_raw(&bytes, name.dimensions, name.format).map_err(ConvertError::raw(path))?;
  write_bitmap(&bitmap, &image_path, options.container)?;
  Ok(image_path)
}
