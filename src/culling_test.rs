use super::*;

// =============================================================
// Helpers
// =============================================================

fn lp(time: f64, price: f64) -> LogicalPoint {
    LogicalPoint::new(time, price)
}

fn view() -> Viewport {
    Viewport { time_min: 0.0, time_max: 100.0, price_min: 0.0, price_max: 100.0 }
}

fn pair(extend: ExtendFlags) -> Vec<SubSegment> {
    vec![SubSegment::new(vec![0, 1], extend)]
}

fn right() -> ExtendFlags {
    ExtendFlags { left: false, right: true }
}

fn left() -> ExtendFlags {
    ExtendFlags { left: true, right: false }
}

// =============================================================
// Single segment
// =============================================================

#[test]
fn segment_inside_is_visible() {
    let pts = [lp(10.0, 10.0), lp(20.0, 20.0)];
    assert_eq!(classify(&pts, &pair(ExtendFlags::NONE), &view()), Visibility::Visible);
}

#[test]
fn segment_crossing_viewport_is_visible() {
    let pts = [lp(-50.0, 50.0), lp(150.0, 50.0)];
    assert_eq!(classify(&pts, &pair(ExtendFlags::NONE), &view()), Visibility::Visible);
}

#[test]
fn segment_left_of_view_is_off_left() {
    let pts = [lp(-30.0, 10.0), lp(-20.0, 20.0)];
    assert_eq!(classify(&pts, &pair(ExtendFlags::NONE), &view()), Visibility::OffScreenLeft);
}

#[test]
fn segment_right_of_view_is_off_right() {
    let pts = [lp(130.0, 10.0), lp(120.0, 20.0)];
    assert_eq!(classify(&pts, &pair(ExtendFlags::NONE), &view()), Visibility::OffScreenRight);
}

#[test]
fn right_extension_rescues_off_left() {
    let pts = [lp(-30.0, 10.0), lp(-20.0, 20.0)];
    assert_eq!(classify(&pts, &pair(right()), &view()), Visibility::Visible);
}

#[test]
fn left_extension_does_not_rescue_off_left() {
    let pts = [lp(-30.0, 10.0), lp(-20.0, 20.0)];
    assert_eq!(classify(&pts, &pair(left()), &view()), Visibility::OffScreenLeft);
}

#[test]
fn left_extension_rescues_off_right() {
    let pts = [lp(130.0, 10.0), lp(120.0, 20.0)];
    assert_eq!(classify(&pts, &pair(left()), &view()), Visibility::Visible);
}

#[test]
fn price_miss_is_never_rescued_by_extension() {
    let both = ExtendFlags { left: true, right: true };
    let above = [lp(10.0, 150.0), lp(20.0, 160.0)];
    let below = [lp(10.0, -50.0), lp(20.0, -40.0)];
    assert_eq!(classify(&above, &pair(both), &view()), Visibility::OffScreenTop);
    assert_eq!(classify(&below, &pair(both), &view()), Visibility::OffScreenBottom);
}

#[test]
fn price_miss_takes_precedence_over_time_miss() {
    let pts = [lp(-30.0, 150.0), lp(-20.0, 160.0)];
    assert_eq!(classify(&pts, &pair(ExtendFlags::NONE), &view()), Visibility::OffScreenTop);
}

#[test]
fn segment_touching_edge_is_visible() {
    let pts = [lp(-10.0, 100.0), lp(0.0, 120.0)];
    assert_eq!(classify(&pts, &pair(ExtendFlags::NONE), &view()), Visibility::Visible);
}

#[test]
fn out_of_range_indices_are_ignored() {
    let pts = [lp(10.0, 10.0)];
    let segs = vec![SubSegment::finite(vec![0, 7])];
    assert_eq!(classify(&pts, &segs, &view()), Visibility::Visible);
}

#[test]
fn segment_without_points_is_fully_off() {
    let segs = vec![SubSegment::finite(vec![3, 4])];
    assert_eq!(classify(&[], &segs, &view()), Visibility::FullyOffScreen);
}

// =============================================================
// Aggregation
// =============================================================

#[test]
fn no_segments_is_fully_off() {
    assert_eq!(classify(&[lp(1.0, 1.0)], &[], &view()), Visibility::FullyOffScreen);
}

#[test]
fn any_visible_segment_makes_tool_visible() {
    let pts = [lp(-30.0, 10.0), lp(-20.0, 20.0), lp(10.0, 10.0), lp(20.0, 20.0)];
    let segs = vec![SubSegment::finite(vec![0, 1]), SubSegment::finite(vec![2, 3])];
    assert_eq!(classify(&pts, &segs, &view()), Visibility::Visible);
}

#[test]
fn agreeing_misses_report_direction() {
    let pts = [lp(-30.0, 10.0), lp(-20.0, 20.0), lp(-60.0, 50.0), lp(-40.0, 60.0)];
    let segs = vec![SubSegment::finite(vec![0, 1]), SubSegment::finite(vec![2, 3])];
    assert_eq!(classify(&pts, &segs, &view()), Visibility::OffScreenLeft);
}

#[test]
fn disagreeing_misses_are_fully_off() {
    let pts = [lp(-30.0, 10.0), lp(-20.0, 20.0), lp(10.0, 150.0), lp(20.0, 160.0)];
    let segs = vec![SubSegment::finite(vec![0, 1]), SubSegment::finite(vec![2, 3])];
    assert_eq!(classify(&pts, &segs, &view()), Visibility::FullyOffScreen);
}

#[test]
fn culling_info_classify_delegates() {
    let info = CullingInfo { points: vec![lp(10.0, 10.0), lp(20.0, 20.0)], segments: pair(ExtendFlags::NONE) };
    assert!(info.classify(&view()).is_visible());
}
