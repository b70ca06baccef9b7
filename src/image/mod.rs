//! Owned pixel buffers and the codec boundary.
//!
//! Two concrete buffer types cover the whole pipeline: 8-bit single-channel
//! [`GrayImage`] for the geometric stages and 8-bit 3-channel [`RgbImage`]
//! for input, overlay and composite. Both are row-major with `stride == w`;
//! each stage produces a new buffer and reads its input immutably.

pub mod gray;
pub mod io;
pub mod rgb;

pub use self::gray::GrayImage;
pub use self::rgb::RgbImage;
