use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::ImageFormat;

use crate::color::{color_frame_from_rgb, color_frame_to_rgb};
use crate::enhance::EnhancedPage;
use crate::error::Result;
use crate::frame::ColorFrame;
use crate::scoring::CandidatePage;

/// Load any supported image file as a color frame.
pub fn load_frame(path: &Path) -> Result<ColorFrame> {
    let img = image::open(path)?;
    Ok(color_frame_from_rgb(&img.to_rgb8()))
}

/// Save a color frame as 8-bit RGB PNG.
pub fn save_color_png(color: &ColorFrame, path: &Path) -> Result<()> {
    color_frame_to_rgb(color).save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Save an enhanced page, choosing format from file extension.
///
/// JPEG output uses the quality of the page's tier; anything that is not
/// `.jpg`/`.jpeg` is written as PNG.
pub fn save_page(page: &EnhancedPage, path: &Path) -> Result<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg") => {
            let mut writer = BufWriter::new(File::create(path)?);
            JpegEncoder::new_with_quality(&mut writer, page.quality_tier.jpeg_quality())
                .encode_image(&page.image)?;
            writer.flush()?;
            Ok(())
        }
        _ => {
            page.image.save_with_format(path, ImageFormat::Png)?;
            Ok(())
        }
    }
}

/// Save a candidate's thumbnail as PNG.
pub fn save_thumbnail(candidate: &CandidatePage, path: &Path) -> Result<()> {
    candidate
        .thumbnail
        .save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
