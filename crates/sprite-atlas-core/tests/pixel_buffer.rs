use image::{Rgba, RgbaImage};
use sprite_atlas_core::error::AtlasError;
use sprite_atlas_core::{PixelBuffer, Rect};

#[test]
fn get_and_set_are_bounds_checked() {
    let mut buf = PixelBuffer::new(3, 2);
    buf.set(2, 1, [1, 2, 3, 4]).unwrap();
    assert_eq!(buf.get(2, 1), Some([1, 2, 3, 4]));
    assert_eq!(buf.get(3, 0), None);
    assert_eq!(buf.get(0, 2), None);
    assert!(matches!(
        buf.set(3, 1, [0; 4]),
        Err(AtlasError::PixelOutOfBounds { width: 3, height: 2, .. })
    ));
}

#[test]
fn strided_rows_skip_padding_bytes() {
    // 2x2 with 4 bytes of padding per row.
    let data = vec![
        1, 1, 1, 1, 2, 2, 2, 2, 99, 99, 99, 99, //
        3, 3, 3, 3, 4, 4, 4, 4, 99, 99, 99, 99,
    ];
    let buf = PixelBuffer::from_raw_with_stride(2, 2, 12, data).unwrap();
    assert_eq!(buf.stride(), 12);
    assert_eq!(buf.get(1, 1), Some([4, 4, 4, 4]));
    assert_eq!(buf.row(0), Some(&[1, 1, 1, 1, 2, 2, 2, 2][..]));
    assert_eq!(buf.to_packed_vec(), vec![1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4]);
}

#[test]
fn crop_copies_region_and_rejects_outside() {
    let mut buf = PixelBuffer::new(4, 4);
    buf.set(2, 3, [9, 9, 9, 9]).unwrap();
    let part = buf.crop(Rect::new(1, 2, 3, 2)).unwrap();
    assert_eq!(part.dimensions(), (3, 2));
    assert_eq!(part.get(1, 1), Some([9, 9, 9, 9]));
    assert!(buf.crop(Rect::new(2, 2, 3, 1)).is_none());
    assert!(buf.crop(Rect::new(0, 0, 0, 1)).is_none());
}

#[test]
fn blit_overwrites_without_blending() {
    let mut canvas = PixelBuffer::filled(4, 4, [10, 20, 30, 255]);
    let src = PixelBuffer::filled(2, 1, [0, 0, 0, 0]);
    let region = canvas.blit(&src, 1, 3).unwrap();
    assert_eq!(region, Rect::new(1, 3, 2, 1));
    assert_eq!(canvas.get(1, 3), Some([0, 0, 0, 0]));
    assert_eq!(canvas.get(0, 3), Some([10, 20, 30, 255]));
    assert_eq!(canvas.get(3, 3), Some([10, 20, 30, 255]));
}

#[test]
fn blit_out_of_bounds_writes_nothing() {
    let mut canvas = PixelBuffer::filled(4, 4, [1, 1, 1, 1]);
    let before = canvas.clone();
    let src = PixelBuffer::filled(3, 3, [2, 2, 2, 2]);
    assert!(canvas.blit(&src, 2, 2).is_err());
    assert_eq!(canvas, before);
}

#[test]
fn converts_to_and_from_rgba_image() {
    let mut img = RgbaImage::new(3, 2);
    img.put_pixel(2, 1, Rgba([5, 6, 7, 8]));
    let buf = PixelBuffer::from(img.clone());
    assert_eq!(buf.get(2, 1), Some([5, 6, 7, 8]));
    assert_eq!(buf.to_rgba_image(), img);
}
