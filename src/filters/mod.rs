//! Filter modules for image processing effects.
//!
//! ## Supported Formats
//!
//! | Format | Shape | Type | Description |
//! |--------|-------|------|-------------|
//! | Grayscale8 | (H, W, 1) | u8 | Single luminance channel, 0-255 |
//! | BGR8 | (H, W, 3) | u8 | Blue, green, red, 0-255 |
//!
//! ## Architecture
//!
//! All filters follow these principles:
//! - **Read-only input** - Each filter reads an `ArrayView3` and allocates a new output
//! - **Byte output** - Float intermediates are clamped to 0-255 and truncated
//! - **Grayscale first** - Threshold and edge filters read channel 0 only;
//!   Gaussian blur is the one filter that works per channel on colour input
//!
//! ## Filter Categories
//!
//! - **Color**: grayscale reduction (BT.601 luma)
//! - **Stylize**: threshold
//! - **Edge detection**: 3x3 convolution, Sobel magnitude, Laplacian
//! - **Blur**: Gaussian with mirrored borders

pub mod blur;
pub mod core;
pub mod edge;
pub mod grayscale;
pub mod stylize;
