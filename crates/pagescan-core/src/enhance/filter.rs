use crate::color::{gray_to_color, luminance};
use crate::consts::{
    BLACK_WHITE_BRIGHTNESS, BLACK_WHITE_CONTRAST, DOCUMENT_BRIGHTNESS, DOCUMENT_CONTRAST,
    DOCUMENT_SHARPEN_AMOUNT, DOCUMENT_SHARPEN_RADIUS,
};
use crate::filters::histogram::luminance_stretch;
use crate::filters::levels::{brightness_contrast, brightness_contrast_color};
use crate::filters::unsharp_mask::unsharp_mask_color;
use crate::frame::ColorFrame;

use super::edit::PageFilter;

/// Stage 2 of enhancement: the page filter.
///
/// `Original` hands the frame back untouched.
pub fn apply_page_filter(image: ColorFrame, filter: PageFilter) -> ColorFrame {
    match filter {
        PageFilter::Original => image,
        PageFilter::Document => document(&image),
        PageFilter::BlackWhite => black_white(&image),
    }
}

fn document(image: &ColorFrame) -> ColorFrame {
    let stretched = luminance_stretch(image);
    let boosted =
        brightness_contrast_color(&stretched, DOCUMENT_BRIGHTNESS, DOCUMENT_CONTRAST);
    unsharp_mask_color(&boosted, DOCUMENT_SHARPEN_RADIUS, DOCUMENT_SHARPEN_AMOUNT)
}

fn black_white(image: &ColorFrame) -> ColorFrame {
    let gray = luminance(image);
    let pushed = brightness_contrast(&gray, BLACK_WHITE_BRIGHTNESS, BLACK_WHITE_CONTRAST);
    gray_to_color(&pushed)
}
