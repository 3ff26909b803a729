// ============================================================================
// CURVE BUILDER — frequency array → closed, orientation-mapped silhouette
// ============================================================================
//
// Pure geometry. A frequency array becomes a sequence of points in unit
// space [0,1]×[0,1], which is then mapped into a target rectangle according
// to the device orientation and closed down to the baseline edge so the
// result can be filled as well as stroked.
// ============================================================================

use egui::{Pos2, Rect, pos2};

/// Device rotation state governing how unit-space curve coordinates map onto
/// the target rectangle. The face-up/face-down/unknown states have no usable
/// rotation and take the portrait branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    PortraitUpsideDown,
    LandscapeLeft,
    LandscapeRight,
    FaceUp,
    FaceDown,
    Unknown,
}

/// The two polyline styles for rendering bin values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurveStyle {
    /// One point per bin; straight segments interpolate between bin heights.
    #[default]
    Smooth,
    /// Two points per bin sharing its height: flat-topped bars, each top
    /// spanning the bin's full width `[i/N, (i+1)/N]`.
    Stepped,
}

/// Curve points in unit space, top-left origin: `x = i/N` across the array,
/// `y = 1 - (count/maximum) * scale` so tall bins rise toward `y = 0`.
///
/// An empty or all-zero array produces a curve pinned to the baseline
/// (`y = 1`); the maximum-count ratio is treated as 0 rather than dividing
/// by zero.
pub fn interpolation_points(data: &[u64], scale: f32, style: CurveStyle) -> Vec<Pos2> {
    let n = data.len();
    if n == 0 {
        return Vec::new();
    }
    let maximum = data.iter().copied().max().unwrap_or(0);

    let height = |count: u64| {
        let ratio = if maximum == 0 {
            0.0
        } else {
            count as f32 / maximum as f32
        };
        1.0 - ratio * scale
    };

    match style {
        CurveStyle::Smooth => data
            .iter()
            .enumerate()
            .map(|(i, &count)| pos2(i as f32 / n as f32, height(count)))
            .collect(),
        CurveStyle::Stepped => data
            .iter()
            .enumerate()
            .flat_map(|(i, &count)| {
                let y = height(count);
                [pos2(i as f32 / n as f32, y), pos2((i + 1) as f32 / n as f32, y)]
            })
            .collect(),
    }
}

/// Build the closed silhouette for one channel inside `rect`: a baseline
/// corner at the leading edge, the orientation-mapped curve points, then a
/// baseline corner at the trailing edge (closure back to the start is
/// implied). An empty frequency array yields an empty, zero-area polygon.
pub fn channel_polygon(
    data: &[u64],
    scale: f32,
    orientation: Orientation,
    style: CurveStyle,
    rect: Rect,
) -> Vec<Pos2> {
    let points = interpolation_points(data, scale, style);
    if points.is_empty() {
        return Vec::new();
    }

    let w = rect.width();
    let h = rect.height();
    let at = |x: f32, y: f32| pos2(rect.min.x + x, rect.min.y + y);

    let (start, end, map): (Pos2, Pos2, fn(Pos2, f32, f32) -> Pos2) = match orientation {
        Orientation::PortraitUpsideDown => (
            at(w, 0.0),
            at(0.0, 0.0),
            |p, w, h| pos2(w - p.x * w, h - p.y * h),
        ),
        Orientation::LandscapeLeft => (
            at(w, h),
            at(w, 0.0),
            |p, w, h| pos2(p.y * w, (1.0 - p.x) * h),
        ),
        Orientation::LandscapeRight => (
            at(0.0, 0.0),
            at(0.0, h),
            |p, w, h| pos2(w - p.y * w, h - (1.0 - p.x) * h),
        ),
        // Portrait, plus the device-ambiguous states.
        _ => (at(0.0, h), at(w, h), |p, w, h| pos2(p.x * w, p.y * h)),
    };

    let mut polygon = Vec::with_capacity(points.len() + 2);
    polygon.push(start);
    polygon.extend(points.into_iter().map(|p| {
        let m = map(p, w, h);
        at(m.x, m.y)
    }));
    polygon.push(end);
    polygon
}

/// Projection of a mapped curve point onto the baseline edge for the given
/// orientation. Used to close per-segment fill quads down to the anchored
/// edge of `rect`.
pub(crate) fn baseline_anchor(orientation: Orientation, rect: Rect, p: Pos2) -> Pos2 {
    match orientation {
        Orientation::PortraitUpsideDown => pos2(p.x, rect.min.y),
        Orientation::LandscapeLeft => pos2(rect.max.x, p.y),
        Orientation::LandscapeRight => pos2(rect.min.x, p.y),
        _ => pos2(p.x, rect.max.y),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const UNIT: Rect = Rect {
        min: Pos2::ZERO,
        max: Pos2 { x: 1.0, y: 1.0 },
    };

    fn approx(a: Pos2, b: Pos2) -> bool {
        (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6
    }

    #[test]
    fn all_zero_array_collapses_onto_baseline() {
        let polygon = channel_polygon(&[0; 8], 1.0, Orientation::Portrait, CurveStyle::Smooth, UNIT);
        assert!(!polygon.is_empty());
        assert!(polygon.iter().all(|p| (p.y - 1.0).abs() < 1e-6));
    }

    #[test]
    fn empty_array_yields_degenerate_polygon() {
        let polygon =
            channel_polygon(&[], 1.0, Orientation::Portrait, CurveStyle::Smooth, UNIT);
        assert!(polygon.is_empty());
    }

    #[test]
    fn curve_rises_from_baseline_to_top() {
        // [0, max] at scale 1: baseline at bin 0, full height at bin 1.
        let points = interpolation_points(&[0, 10], 1.0, CurveStyle::Smooth);
        assert_eq!(points.len(), 2);
        assert!(approx(points[0], pos2(0.0, 1.0)));
        assert!(approx(points[1], pos2(0.5, 0.0)));
    }

    #[test]
    fn scale_damps_curve_height() {
        let points = interpolation_points(&[10], 0.5, CurveStyle::Smooth);
        assert!(approx(points[0], pos2(0.0, 0.5)));
    }

    #[test]
    fn stepped_style_emits_flat_tops() {
        let points = interpolation_points(&[10, 5], 1.0, CurveStyle::Stepped);
        assert_eq!(points.len(), 4);
        // Bin 0 top spans [0, 0.5] at y = 0.
        assert!(approx(points[0], pos2(0.0, 0.0)));
        assert!(approx(points[1], pos2(0.5, 0.0)));
        // Bin 1 top spans [0.5, 1.0] at y = 0.5.
        assert!(approx(points[2], pos2(0.5, 0.5)));
        assert!(approx(points[3], pos2(1.0, 0.5)));
    }

    #[test]
    fn portrait_polygon_is_anchored_to_bottom() {
        let polygon =
            channel_polygon(&[0, 10], 1.0, Orientation::Portrait, CurveStyle::Smooth, UNIT);
        assert!(approx(polygon[0], pos2(0.0, 1.0)));
        assert!(approx(polygon[1], pos2(0.0, 1.0)));
        assert!(approx(polygon[2], pos2(0.5, 0.0)));
        assert!(approx(*polygon.last().unwrap(), pos2(1.0, 1.0)));
    }

    #[test]
    fn upside_down_is_point_mirror_of_portrait() {
        let data = [3, 0, 7, 1];
        let portrait =
            channel_polygon(&data, 1.0, Orientation::Portrait, CurveStyle::Smooth, UNIT);
        let flipped = channel_polygon(
            &data,
            1.0,
            Orientation::PortraitUpsideDown,
            CurveStyle::Smooth,
            UNIT,
        );
        // Interior (curve) points mirror through the rect center; the
        // baseline corners move from the bottom edge to the top edge.
        for (p, f) in portrait[1..portrait.len() - 1]
            .iter()
            .zip(&flipped[1..flipped.len() - 1])
        {
            assert!(approx(*f, pos2(1.0 - p.x, 1.0 - p.y)));
        }
        assert!(approx(flipped[0], pos2(1.0, 0.0)));
        assert!(approx(*flipped.last().unwrap(), pos2(0.0, 0.0)));
    }

    #[test]
    fn upside_down_mapping_twice_is_identity() {
        let mirror = |p: Pos2| pos2(1.0 - p.x, 1.0 - p.y);
        for p in [pos2(0.0, 1.0), pos2(0.25, 0.5), pos2(1.0, 0.0)] {
            assert!(approx(mirror(mirror(p)), p));
        }
    }

    #[test]
    fn landscape_left_swaps_axes_with_baseline_at_right() {
        let polygon = channel_polygon(
            &[0, 10],
            1.0,
            Orientation::LandscapeLeft,
            CurveStyle::Smooth,
            UNIT,
        );
        // Unit point (x, y) → (y, 1 - x).
        assert!(approx(polygon[0], pos2(1.0, 1.0)));
        assert!(approx(polygon[1], pos2(1.0, 1.0)));
        assert!(approx(polygon[2], pos2(0.0, 0.5)));
        assert!(approx(*polygon.last().unwrap(), pos2(1.0, 0.0)));
    }

    #[test]
    fn landscape_right_swaps_axes_with_baseline_at_left() {
        let polygon = channel_polygon(
            &[0, 10],
            1.0,
            Orientation::LandscapeRight,
            CurveStyle::Smooth,
            UNIT,
        );
        // Unit point (x, y) → (1 - y, x).
        assert!(approx(polygon[0], pos2(0.0, 0.0)));
        assert!(approx(polygon[1], pos2(0.0, 0.0)));
        assert!(approx(polygon[2], pos2(1.0, 0.5)));
        assert!(approx(*polygon.last().unwrap(), pos2(0.0, 1.0)));
    }

    #[test]
    fn ambiguous_states_fall_back_to_portrait() {
        let data = [1, 2, 3];
        let portrait =
            channel_polygon(&data, 1.0, Orientation::Portrait, CurveStyle::Smooth, UNIT);
        for o in [
            Orientation::FaceUp,
            Orientation::FaceDown,
            Orientation::Unknown,
        ] {
            assert_eq!(
                channel_polygon(&data, 1.0, o, CurveStyle::Smooth, UNIT),
                portrait
            );
        }
    }

    #[test]
    fn polygon_respects_rect_offset() {
        let rect = Rect::from_min_max(pos2(10.0, 20.0), pos2(30.0, 60.0));
        let polygon =
            channel_polygon(&[10], 1.0, Orientation::Portrait, CurveStyle::Smooth, rect);
        assert!(approx(polygon[0], pos2(10.0, 60.0)));
        assert!(approx(polygon[1], pos2(10.0, 20.0)));
        assert!(approx(*polygon.last().unwrap(), pos2(30.0, 60.0)));
    }
}
