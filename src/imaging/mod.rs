//! Image processing, pure Rust.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Thumbnail** | Lanczos3 resize to a fixed width, re-encoded in the source format |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::calculate_width_constrained;
pub use operations::{ThumbnailConfig, create_thumbnail, plan_thumbnail};
pub use params::{Quality, ResizeParams};
pub use rust_backend::{RustBackend, is_supported_extension, supported_input_extensions};
