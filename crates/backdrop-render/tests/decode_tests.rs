// Host-side tests for image decoding.

use backdrop_render::LoadedImage;
use std::io::Cursor;

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x * 10) as u8, (y * 10) as u8, 0, 255])
    });
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

#[test]
fn decodes_png_to_rgba() {
    let decoded = LoadedImage::decode(&png_bytes(4, 2)).unwrap();
    assert_eq!((decoded.width, decoded.height), (4, 2));
    assert_eq!(decoded.rgba.len(), 4 * 2 * 4);
    assert_eq!(decoded.aspect(), 2.0);
    // texel (3, 1)
    let i = (4 + 3) * 4;
    assert_eq!(&decoded.rgba[i..i + 4], &[30, 10, 0, 255]);
}

#[test]
fn garbage_is_an_error() {
    assert!(LoadedImage::decode(b"not an image").is_err());
    assert!(LoadedImage::decode(&[]).is_err());
}

#[test]
fn blank_is_transparent() {
    let blank = LoadedImage::blank();
    assert_eq!((blank.width, blank.height), (1, 1));
    assert_eq!(blank.rgba, vec![0, 0, 0, 0]);
}

#[test]
fn oversized_image_is_downscaled_to_limit() {
    let decoded = LoadedImage::decode(&png_bytes(90, 2)).unwrap();
    let fitted = decoded.fit_within(30);
    assert_eq!((fitted.width, fitted.height), (30, 1));
    assert_eq!(fitted.rgba.len(), 30 * 4);

    let tall = LoadedImage::decode(&png_bytes(10, 40)).unwrap().fit_within(20);
    assert_eq!((tall.width, tall.height), (5, 20));
}

#[test]
fn image_within_limit_is_untouched() {
    let decoded = LoadedImage::decode(&png_bytes(8, 8)).unwrap();
    let rgba = decoded.rgba.clone();
    let fitted = decoded.fit_within(8);
    assert_eq!((fitted.width, fitted.height), (8, 8));
    assert_eq!(fitted.rgba, rgba);
}
