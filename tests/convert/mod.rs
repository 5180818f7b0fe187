use image::{codecs::bmp::BmpEncoder, ColorType, GrayImage, ImageFormat, RgbImage, RgbaImage};
use rawpack::{
  convert_file, decode_file, encode_file, ContainerFormat, ConvertError, ConvertOptions, Direction,
  RawError, RawFormat,
};

use tempfile::tempdir;

#[test]
fn test_gray_png_to_raw_and_back() {
  let dir = tempdir().unwrap();
  let pixels = super::rand_bytes(5 * 3);
  let png = dir.path().join("pic.png");
  GrayImage::from_raw(5, 3, pixels.clone()).unwrap().save(&png).unwrap();

  let raw_path = decode_file(&png).unwrap();
  assert_eq!(raw_path, dir.path().join("pic.Gray-5x3.raw"));
  assert_eq!(std::fs::read(&raw_path).unwrap(), pixels);

  std::fs::remove_file(&png).unwrap();
  let png_again = encode_file(&raw_path, &ConvertOptions::default()).unwrap();
  assert_eq!(png_again, png);
  let decoded = image::open(&png_again).unwrap();
  assert_eq!(decoded.color(), ColorType::L8);
  assert_eq!(decoded.into_bytes(), pixels);
}

#[test]
fn test_rgb_bmp_to_raw_keeps_channel_order() {
  let dir = tempdir().unwrap();
  // 3 pixels wide makes 9 byte rows, so the BMP pads every row.
  #[rustfmt::skip]
  let pixels = vec![
    255, 0, 0,   0, 255, 0,   0, 0, 255,
    1, 2, 3,     4, 5, 6,     7, 8, 9,
  ];
  let bmp = dir.path().join("flag.bmp");
  let image = RgbImage::from_raw(3, 2, pixels.clone()).unwrap();
  image.save_with_format(&bmp, ImageFormat::Bmp).unwrap();

  let raw_path = decode_file(&bmp).unwrap();
  assert_eq!(raw_path, dir.path().join("flag.RGB-3x2.raw"));
  assert_eq!(std::fs::read(&raw_path).unwrap(), pixels);

  let png = encode_file(&raw_path, &ConvertOptions::default()).unwrap();
  assert_eq!(png, dir.path().join("flag.png"));
  let decoded = image::open(&png).unwrap();
  assert_eq!(decoded.color(), ColorType::Rgb8);
  assert_eq!(decoded.into_bytes(), pixels);
}

#[test]
fn test_gray_bmp_to_gray_raw() {
  let dir = tempdir().unwrap();
  let pixels = vec![1, 2, 3, 4, 5, 6];
  let bmp = dir.path().join("g.bmp");
  let image = GrayImage::from_raw(3, 2, pixels.clone()).unwrap();
  image.save_with_format(&bmp, ImageFormat::Bmp).unwrap();

  let raw_path = decode_file(&bmp).unwrap();
  assert_eq!(raw_path, dir.path().join("g.Gray-3x2.raw"));
  assert_eq!(std::fs::read(&raw_path).unwrap(), pixels);
}

#[test]
fn test_palette_bmp_dumps_the_indexes() {
  let dir = tempdir().unwrap();
  let bmp = dir.path().join("pal.bmp");
  let palette = [[255, 0, 0], [0, 255, 0], [0, 0, 255]];
  let indexes = [0, 1, 2, 2, 1, 0, 1, 1];
  let mut file = std::fs::File::create(&bmp).unwrap();
  BmpEncoder::new(&mut file)
    .encode_with_palette(&indexes, 4, 2, ColorType::L8, Some(&palette))
    .unwrap();
  drop(file);

  let raw_path = decode_file(&bmp).unwrap();
  assert_eq!(raw_path, dir.path().join("pal.Gray-4x2.raw"));
  assert_eq!(std::fs::read(&raw_path).unwrap(), indexes);
}

#[test]
#[cfg(unix)]
fn test_encode_in_non_utf8_directory() {
  use std::{ffi::OsStr, os::unix::ffi::OsStrExt};
  let dir = tempdir().unwrap();
  let sub = dir.path().join(OsStr::from_bytes(b"d\xff"));
  std::fs::create_dir(&sub).unwrap();
  let raw_path = sub.join("a.Gray-2x2.raw");
  std::fs::write(&raw_path, [1, 2, 3, 4]).unwrap();

  let png = encode_file(&raw_path, &ConvertOptions::default()).unwrap();
  assert_eq!(png, sub.join("a.png"));
  assert_eq!(super::file_names(&sub), ["a.Gray-2x2.raw", "a.png"]);
}

#[test]
fn test_encode_to_jpeg() {
  let dir = tempdir().unwrap();
  let raw_path = dir.path().join("scan.Gray-16x8.raw");
  std::fs::write(&raw_path, vec![0x80; 16 * 8]).unwrap();

  let options = ConvertOptions { container: ContainerFormat::Jpeg };
  let jpg = encode_file(&raw_path, &options).unwrap();
  assert_eq!(jpg, dir.path().join("scan.jpg"));
  let decoded = image::open(&jpg).unwrap();
  assert_eq!((decoded.width(), decoded.height()), (16, 8));
  assert_eq!(decoded.color(), ColorType::L8);
}

#[test]
fn test_convert_file_picks_direction() {
  let dir = tempdir().unwrap();
  let png = dir.path().join("a.png");
  GrayImage::from_raw(2, 2, vec![1, 2, 3, 4]).unwrap().save(&png).unwrap();

  let done = convert_file(&png, &ConvertOptions::default()).unwrap();
  assert_eq!(done.direction, Direction::Decode);
  assert_eq!(done.input, png);
  assert_eq!(done.output, dir.path().join("a.Gray-2x2.raw"));

  let done = convert_file(&done.output, &ConvertOptions::default()).unwrap();
  assert_eq!(done.direction, Direction::Encode);
  assert_eq!(done.output, png);
}

#[test]
fn test_wrong_raw_size_writes_nothing() {
  let dir = tempdir().unwrap();
  let raw_path = dir.path().join("bad.Gray-4x4.raw");
  std::fs::write(&raw_path, [0_u8; 15]).unwrap();

  let err = encode_file(&raw_path, &ConvertOptions::default()).unwrap_err();
  assert_eq!(err.raw_error(), Some(&RawError::SizeMismatch { actual: 15, expected: 16 }));
  assert_eq!(err.path(), raw_path);
  assert!(err.to_string().contains("wrong raw file size 15, should be 16 bytes"));
  assert_eq!(super::file_names(dir.path()), ["bad.Gray-4x4.raw"]);
}

#[test]
fn test_malformed_raw_names() {
  let dir = tempdir().unwrap();
  for name in ["foo.raw", "foo.Gray-640.raw", "foo.Purple-640x480.raw"] {
    let raw_path = dir.path().join(name);
    std::fs::write(&raw_path, [0_u8; 4]).unwrap();
    let err = encode_file(&raw_path, &ConvertOptions::default()).unwrap_err();
    assert_eq!(
      err.raw_error(),
      Some(&RawError::MalformedRawFilename { file_name: name.to_string() }),
      "failed name: {name}"
    );
  }
}

#[test]
fn test_undefined_raw_format() {
  let dir = tempdir().unwrap();
  let raw_path = dir.path().join("foo.Undefined-2x2.raw");
  std::fs::write(&raw_path, [0_u8; 4]).unwrap();
  let err = encode_file(&raw_path, &ConvertOptions::default()).unwrap_err();
  assert_eq!(err.raw_error(), Some(&RawError::UnsupportedRawFormat(RawFormat::Undefined)));
}

#[test]
fn test_unsupported_pixel_format_writes_nothing() {
  let dir = tempdir().unwrap();
  let png = dir.path().join("alpha.png");
  RgbaImage::from_raw(2, 2, super::rand_bytes(16)).unwrap().save(&png).unwrap();

  let err = decode_file(&png).unwrap_err();
  assert_eq!(err.raw_error(), Some(&RawError::UnsupportedPixelFormat(ColorType::Rgba8)));
  assert_eq!(super::file_names(dir.path()), ["alpha.png"]);
}

#[test]
fn test_missing_files_are_io_errors() {
  let dir = tempdir().unwrap();
  let err = decode_file(&dir.path().join("nope.png")).unwrap_err();
  assert!(matches!(err, ConvertError::Io { .. }), "{err:?}");
  let raw_path = dir.path().join("nope.Gray-2x2.raw");
  let err = encode_file(&raw_path, &ConvertOptions::default()).unwrap_err();
  assert!(matches!(err, ConvertError::Io { .. }), "{err:?}");
}

#[test]
fn test_not_an_image() {
  let dir = tempdir().unwrap();
  let path = dir.path().join("notes.txt");
  std::fs::write(&path, b"just some text").unwrap();
  let err = decode_file(&path).unwrap_err();
  assert!(matches!(err, ConvertError::Image { .. }), "{err:?}");
}
