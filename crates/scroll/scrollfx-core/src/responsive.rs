//! Geometry-dependent recomputation math used on resize.

use crate::error::{Result, ScrollFxError};
use crate::host::Host;
use crate::ids::NodeId;

pub const FILLER_CLASS: &str = "block-with-balls-and-info__circle";

/// Minimum number of filler balls appended.
pub const MIN_FILLERS: usize = 3;

/// Outer width of a ball: measured width plus spacing on both sides.
#[inline]
pub fn unit_width(measured: f64, spacing: f64) -> f64 {
    measured + 2.0 * spacing
}

/// Number of empty filler balls needed to span `viewport_width` around two
/// empty balls and one filled ball. Never below `min`, always odd so the
/// filled ball can sit at dead center.
pub fn filler_count(viewport_width: f64, empty_unit: f64, filled_unit: f64, min: usize) -> Result<usize> {
    if empty_unit <= 0.0 || filled_unit <= 0.0 || !empty_unit.is_finite() {
        return Err(ScrollFxError::geometry("ball unit width"));
    }
    let initial = 2.0 * empty_unit + filled_unit;
    let remaining = viewport_width - initial;
    let additional = (remaining / empty_unit).ceil();
    let mut count = if additional > 0.0 { additional as usize } else { 0 };
    count = count.max(min);
    if count % 2 == 0 {
        count += 1;
    }
    Ok(count)
}

/// Append `count` filler balls to each container, identically.
pub fn append_fillers<H: Host + ?Sized>(host: &mut H, containers: &[NodeId], count: usize) -> usize {
    let mut appended = 0;
    for &container in containers {
        for _ in 0..count {
            if host.append_element(container, FILLER_CLASS).is_some() {
                appended += 1;
            }
        }
    }
    appended
}
