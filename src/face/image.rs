use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use derive_more::Display;
use image::{ImageFormat, ImageReader};
use std::io::Cursor;

#[derive(Debug, Display)]
pub enum ImageError {
    #[display(fmt = "image payload is empty")]
    Empty,
    #[display(fmt = "image is not valid base64: {}", _0)]
    Base64(base64::DecodeError),
    #[display(fmt = "image could not be decoded: {}", _0)]
    Decode(image::ImageError),
    #[display(fmt = "unsupported image format")]
    UnknownFormat,
}

impl std::error::Error for ImageError {}

/// A captured frame that has been validated as a decodable image.
#[derive(Debug, Clone)]
pub struct CapturedImage {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
}

impl CapturedImage {
    pub fn mime_type(&self) -> &'static str {
        self.format.to_mime_type()
    }
}

/// Decodes a browser capture: `data:image/jpeg;base64,<payload>` or a bare
/// base64 payload.
pub fn decode_data_url(input: &str) -> Result<CapturedImage, ImageError> {
    let payload = match input.split_once(',') {
        Some((_, payload)) => payload,
        None => input,
    }
    .trim();

    if payload.is_empty() {
        return Err(ImageError::Empty);
    }

    let bytes = STANDARD.decode(payload).map_err(ImageError::Base64)?;
    decode_bytes(bytes)
}

pub fn decode_bytes(bytes: Vec<u8>) -> Result<CapturedImage, ImageError> {
    let reader = ImageReader::new(Cursor::new(&bytes))
        .with_guessed_format()
        .map_err(|e| ImageError::Decode(image::ImageError::IoError(e)))?;
    let format = reader.format().ok_or(ImageError::UnknownFormat)?;
    let decoded = reader.decode().map_err(ImageError::Decode)?;

    Ok(CapturedImage {
        width: decoded.width(),
        height: decoded.height(),
        format,
        bytes,
    })
}

#[cfg(test)]
pub(crate) fn png_data_url(width: u32, height: u32) -> String {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([200, 150, 100]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).unwrap();
    format!("data:image/png;base64,{}", STANDARD.encode(buf.into_inner()))
}
