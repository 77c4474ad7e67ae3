//! QR codes that send a phone to a room's mobile controller page.

use std::io::Cursor;

use image::{ImageFormat, Luma};
use qrcode::QrCode;

/// Minimum edge length of the rendered PNG, in pixels.
pub const QR_MIN_SIZE: u32 = 256;

#[derive(Debug, thiserror::Error)]
pub enum QrError {
    #[error("QR encoding failed: {0}")]
    Encode(#[from] qrcode::types::QrError),

    #[error("PNG encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

/// Render `data` as a black-on-white PNG at least [`QR_MIN_SIZE`] pixels wide.
pub fn render_png(data: &str) -> Result<Vec<u8>, QrError> {
    let code = QrCode::new(data.as_bytes())?;
    let image = code
        .render::<Luma<u8>>()
        .min_dimensions(QR_MIN_SIZE, QR_MIN_SIZE)
        .build();

    let mut png = Cursor::new(Vec::new());
    image.write_to(&mut png, ImageFormat::Png)?;
    Ok(png.into_inner())
}
