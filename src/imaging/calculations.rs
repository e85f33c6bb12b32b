//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Output dimensions for a resize to a fixed width, keeping the aspect ratio.
///
/// Narrower sources are scaled up to `width`. The height is rounded and never
/// drops below one pixel, so extreme panoramas still produce a valid image.
///
/// # Examples
/// ```
/// # use astro_gallery::imaging::calculate_width_constrained;
/// // 3:2 landscape → 400x267
/// assert_eq!(calculate_width_constrained((6000, 4000), 400), (400, 267));
///
/// // Portrait keeps its taller shape
/// assert_eq!(calculate_width_constrained((3000, 4500), 400), (400, 600));
/// ```
pub fn calculate_width_constrained(source: (u32, u32), width: u32) -> (u32, u32) {
    let (src_w, src_h) = source;
    if src_w == 0 || src_h == 0 {
        return (width, width);
    }
    let h = (width as f64 * src_h as f64 / src_w as f64).round() as u32;
    (width, h.max(1))
}
