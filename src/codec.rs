#![forbid(unsafe_code)]

//! Glue to the `image` crate, which does all of the actual BMP / JPEG / PNG
//! work.
//!
//! Decoding gives a [`StridedBitmap`] with the codec's own (tight) stride.
//! An uncompressed 8 bit palette BMP decodes to its palette indexes (8-bit
//! gray), with the BMP palette attached, rather than to RGB colors.
//! Encoding takes any stride, and renders through the palette when one is
//! attached.

use std::{
  io::{BufRead, Read, Seek},
  path::Path,
};

use bytemuck::cast_slice;
use image::{codecs::bmp::BmpDecoder, ColorType, DynamicImage, ImageFormat, ImageResult};
use pixel_formats::r8g8b8a8_Srgb;

use crate::{is_gray_ramp, ConvertError, Dimensions, RawError, StridedBitmap};

/// Container formats we can write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ContainerFormat {
  /// Lossless.
  #[default]
  Png,
  /// Lossy, at the encoder's default quality.
  Jpeg,
}
impl ContainerFormat {
  /// File extension, without the dot.
  #[inline]
  #[must_use]
  pub const fn extension(self) -> &'static str {
    match self {
      ContainerFormat::Png => "png",
      ContainerFormat::Jpeg => "jpg",
    }
  }

  #[inline]
  #[must_use]
  pub const fn image_format(self) -> ImageFormat {
    match self {
      ContainerFormat::Png => ImageFormat::Png,
      ContainerFormat::Jpeg => ImageFormat::Jpeg,
    }
  }
}

/// Turns a decoded image into a bitmap, without copying the pixels.
///
/// ## Failure
/// * [`RawError::WidthOrHeightZero`] for an empty image.
pub fn bitmap_from_image(image: DynamicImage) -> Result<StridedBitmap, RawError> {
  let dimensions = Dimensions::try_new(image.width(), image.height())?;
  let pixel_format = image.color();
  let stride = usize::from(pixel_format.bytes_per_pixel())
    .checked_mul(dimensions.width() as usize)
    .ok_or(RawError::DimensionsTooLarge)?;
  StridedBitmap::from_parts(dimensions, stride, pixel_format, image.into_bytes())
}

/// Reads and decodes the image file at `path`.
///
/// The container is picked from the file's contents, falling back to its
/// extension.
pub fn read_bitmap(path: &Path) -> Result<StridedBitmap, ConvertError> {
  let reader = image::io::Reader::open(path)
    .map_err(ConvertError::io(path))?
    .with_guessed_format()
    .map_err(ConvertError::io(path))?;
  let (image, palette) = if reader.format() == Some(ImageFormat::Bmp) {
    let mut file = reader.into_inner();
    let indexed = is_8bit_indexed_bmp(file.fill_buf().map_err(ConvertError::io(path))?);
    decode_bmp(file, indexed).map_err(ConvertError::image(path))?
  } else {
    (reader.decode().map_err(ConvertError::image(path))?, Vec::new())
  };
  log::debug!(
    "decoded {}: {}x{} {:?}, {} palette entries",
    path.display(),
    image.width(),
    image.height(),
    image.color(),
    palette.len()
  );
  let mut bitmap = bitmap_from_image(image).map_err(ConvertError::raw(path))?;
  bitmap.set_palette(palette);
  Ok(bitmap)
}

/// Checks the start of a BMP file for 8 bits per pixel and no compression.
///
/// The codec only hands out one index byte per pixel for that layout, so
/// any other BMP is decoded to colors as usual.
fn is_8bit_indexed_bmp(bytes: &[u8]) -> bool {
  let u16_at = |i: usize| bytes.get(i..i + 2).map(|b| u16::from_le_bytes([b[0], b[1]]));
  let u32_at =
    |i: usize| bytes.get(i..i + 4).map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]));
  // the DIB header starts after the 14 byte file header, with its own size.
  match u32_at(14) {
    Some(12) => u16_at(24) == Some(8),
    Some(_) => u16_at(28) == Some(8) && u32_at(30) == Some(0),
    None => false,
  }
}

fn decode_bmp<R: Read + Seek>(
  reader: R, indexed: bool,
) -> ImageResult<(DynamicImage, Vec<r8g8b8a8_Srgb>)> {
  let mut decoder = BmpDecoder::new(reader)?;
  let mut palette = Vec::new();
  if indexed {
    if let Some(colors) = decoder.get_palette() {
      palette = colors.iter().map(|&[r, g, b]| r8g8b8a8_Srgb { r, g, b, a: 0xFF }).collect();
    }
    decoder.set_indexed_color(!palette.is_empty());
  }
  Ok((DynamicImage::from_decoder(decoder)?, palette))
}

/// Encodes `bitmap` into a `container` file at `path`.
///
/// The row padding is dropped on the way out. A bitmap with a palette other
/// than the gray ramp is written as RGB, each index replaced by its palette
/// color.
pub fn write_bitmap(
  bitmap: &StridedBitmap, path: &Path, container: ContainerFormat,
) -> Result<(), ConvertError> {
  let (pixels, color) = encoder_pixels(bitmap).map_err(ConvertError::raw(path))?;
  log::debug!(
    "encoding {}: {}x{} {color:?} as {container:?}",
    path.display(),
    bitmap.width(),
    bitmap.height()
  );
  image::save_buffer_with_format(
    path,
    &pixels,
    bitmap.width(),
    bitmap.height(),
    color,
    container.image_format(),
  )
  .map_err(ConvertError::image(path))
}

/// The tightly packed pixels to hand to an encoder, and their format.
fn encoder_pixels(bitmap: &StridedBitmap) -> Result<(Vec<u8>, ColorType), RawError> {
  let palette = bitmap.palette();
  let indexed = bitmap.pixel_format() == ColorType::L8 && !palette.is_empty();
  if indexed && !is_gray_ramp(palette) {
    let pixel_count = (bitmap.width() as usize)
      .checked_mul(bitmap.height() as usize)
      .ok_or(RawError::DimensionsTooLarge)?;
    let mut rgb: Vec<[u8; 3]> = Vec::new();
    rgb.try_reserve_exact(pixel_count)?;
    for row in bitmap.rows() {
      rgb.extend(row.iter().map(|&i| {
        // indexes past the end of a short palette show as black.
        palette.get(usize::from(i)).map_or([0, 0, 0], |c| [c.r, c.g, c.b])
      }));
    }
    return Ok((cast_slice(rgb.as_slice()).to_vec(), ColorType::Rgb8));
  }

  let mut tight: Vec<u8> = Vec::new();
  tight.try_reserve_exact(bitmap.line_bytes() * bitmap.height() as usize)?;
  bitmap.rows().for_each(|row| tight.extend_from_slice(row));
  Ok((tight, bitmap.pixel_format()))
}
