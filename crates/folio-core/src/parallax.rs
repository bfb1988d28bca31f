use crate::constants::PARALLAX_FACTOR;

/// Vertical translation (px) for a parallax layer.
///
/// `element_center` is the layer's center in document coordinates. The layer
/// sits at its natural position when its center crosses the viewport center
/// and drifts by `factor` of the distance otherwise.
#[inline]
pub fn offset(scroll_y: f64, element_center: f64, viewport_height: f64, factor: f64) -> f64 {
    let viewport_center = scroll_y + viewport_height * 0.5;
    (viewport_center - element_center) * factor
}

/// Parse a `data-parallax` value. Empty or invalid input gives the default
/// factor; values are clamped to a sane range.
pub fn parse_factor(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|f| f.is_finite())
        .map(|f| f.clamp(-1.0, 1.0))
        .unwrap_or(PARALLAX_FACTOR)
}
