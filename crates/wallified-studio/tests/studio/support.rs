use image::{ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use wallified_studio::intake::DecodedImage;
use wallified_studio::{ImageId, ImageSource, Resolution, Studio, UploadedFile};

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    RgbImage::new(width, height)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

/// PNG with varied pixels, so the compressed body is far larger than the header
pub fn noisy_png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 7 + y * 3) as u8, (x ^ y) as u8, (x * y) as u8])
    })
    .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
    .unwrap();
    bytes
}

pub fn png_file(name: &str, width: u32, height: u32) -> UploadedFile {
    UploadedFile::new(name, png_bytes(width, height))
}

/// A decoded photo claiming `width` x `height` without encoding that many pixels
pub fn decoded(width: u32, height: u32) -> DecodedImage {
    let file = png_file("tiny.png", 2, 2);
    let mut image = wallified_studio::decode_file(&file).unwrap();
    image.name = format!("{}x{}.png", width, height);
    image.resolution = Resolution::new(width, height);
    image
}

pub fn studio_with(sizes: &[(u32, u32)]) -> (Studio, Vec<ImageId>) {
    let mut studio = Studio::default();
    let report = studio
        .add_images(sizes.iter().map(|&(w, h)| decoded(w, h)).collect())
        .unwrap();
    (studio, report.added)
}

pub fn remote_source() -> ImageSource {
    ImageSource::new("https://cdn.example.com/p/1.jpg")
}
