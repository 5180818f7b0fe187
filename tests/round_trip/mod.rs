use rawpack::{pack, unpack, Dimensions, StridedBitmap, FORMAT_TABLE};

#[test]
fn test_unpack_then_pack_keeps_every_pixel() {
  for link in &FORMAT_TABLE {
    for width in 1..=9_u32 {
      for height in 1..=5_u32 {
        let dimensions = Dimensions::new(width, height).unwrap();
        let line_bytes = link.bytes_per_pixel * width as usize;
        for padding in [0, 1, 3, 8] {
          let stride = line_bytes + padding;
          let bytes = super::rand_bytes(stride * height as usize);
          let original = StridedBitmap::from_parts(dimensions, stride, link.pixel, bytes).unwrap();

          let raw = unpack(&original, link).unwrap();
          assert_eq!(raw.format, link.raw);
          assert_eq!(raw.dimensions, dimensions);
          assert_eq!(raw.bytes.len(), line_bytes * height as usize);

          let packed = pack(&raw.bytes, raw.dimensions, link).unwrap();
          assert_eq!(packed.pixel_format(), original.pixel_format());
          assert_eq!(packed.dimensions(), dimensions);
          assert!(
            original.rows().eq(packed.rows()),
            "failed {} {dimensions} stride: {stride}",
            link.raw
          );
        }
      }
    }
  }
}

#[test]
fn test_pack_then_unpack_gives_back_the_raw_bytes() {
  for link in &FORMAT_TABLE {
    for (width, height) in [(1, 1), (1, 7), (7, 1), (13, 11), (64, 3)] {
      let dimensions = Dimensions::new(width, height).unwrap();
      let raw = super::rand_bytes(dimensions.raw_len(link).unwrap());
      let bitmap = pack(&raw, dimensions, link).unwrap();
      assert_eq!(bitmap.stride() % rawpack::ROW_ALIGN, 0);
      let again = unpack(&bitmap, link).unwrap();
      assert_eq!(again.bytes, raw, "failed {} {dimensions}", link.raw);
    }
  }
}

#[test]
fn test_random_lengths_never_pack_wrongly() {
  // any length but the exact one has to be refused, never cut or padded.
  for link in &FORMAT_TABLE {
    let dimensions = Dimensions::new(5, 4).unwrap();
    let expected = dimensions.raw_len(link).unwrap();
    for len in 0..expected * 2 {
      let raw = super::rand_bytes(len);
      match pack(&raw, dimensions, link) {
        Ok(_) => assert_eq!(len, expected),
        Err(e) => {
          assert_ne!(len, expected);
          assert_eq!(e, rawpack::RawError::SizeMismatch { actual: len, expected });
        }
      }
    }
  }
}
