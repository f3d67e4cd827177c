pub mod gaussian_blur;
pub mod histogram;
pub mod levels;
pub mod unsharp_mask;
