//! Rescale the density field to a requested superpixel count.
use super::field::FeatureField;
use log::debug;

/// Scale every density so the field sums to `target_count`.
///
/// `target_count == 0` leaves the field untouched (the count then follows
/// from the physical radius). A field with zero total density is also left
/// untouched. Returns the applied scale factor, if any.
pub fn normalize_density(field: &mut FeatureField, target_count: usize) -> Option<f32> {
    if target_count == 0 {
        return None;
    }
    let total = field.total_density();
    if total <= 0.0 {
        debug!("normalize_density skipped: total density is zero");
        return None;
    }
    let scale = target_count as f32 / total;
    for q in &mut field.pixels {
        q.density *= scale;
    }
    debug!(
        "normalize_density total={:.3} target={} scale={:.4}",
        total, target_count, scale
    );
    Some(scale)
}
