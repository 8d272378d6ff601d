//! Image module: owned pixel buffers and utilities.
//!
//! Components
//! - `u8`: owned `ImageU8` buffer for 8-bit grayscale data.
//! - `f32`: owned `ImageF32` buffer for float data.
//! - `pixel`: the `MedianPixel` scalar contract (rank ordering and
//!   even-window averaging).
//! - `io`: helpers for loading/saving grayscale images and writing JSON.
//!
//! Both buffers are row-major with `stride == width`, enforced by their
//! constructors; the filter relies on that to treat `data` as `w * h`
//! contiguous pixels. The input image is never mutated, output goes into a
//! fresh `same_shape` buffer.
pub mod f32;
pub mod io;
pub mod pixel;
pub mod u8;

pub use self::f32::ImageF32;
pub use self::pixel::MedianPixel;
pub use self::u8::ImageU8;
