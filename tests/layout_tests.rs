use chart_pipeline::core::{ChartLayout, LayoutConfig, Viewport};

#[test]
fn default_layout_derives_height_and_margins_from_width() {
    let layout = ChartLayout::from_container_width(800.0, LayoutConfig::default());

    assert_eq!(layout.width, 800.0);
    assert_eq!(layout.height, 480.0);
    assert_eq!(layout.margins.left, 80.0);
    assert_eq!(layout.margins.right, 40.0);
    assert_eq!(layout.margins.top, 48.0);
    assert_eq!(layout.margins.bottom, 72.0);
    assert_eq!(layout.inner_width, 680.0);
    assert_eq!(layout.inner_height, 360.0);
    assert!(!layout.degenerate);
}

#[test]
fn ranges_and_view_box_follow_layout() {
    let layout = ChartLayout::from_container_width(800.0, LayoutConfig::default());

    assert_eq!(layout.x_range(), (0.0, 680.0));
    assert_eq!(layout.y_range(), (360.0, 0.0));
    assert_eq!(layout.viewport(), Viewport::new(800, 480));
    assert_eq!(layout.view_box(), "0 0 800 480");
}

#[test]
fn zero_width_container_is_clamped_and_flagged() {
    let layout = ChartLayout::from_container_width(0.0, LayoutConfig::default());

    assert!(layout.degenerate);
    assert_eq!(layout.inner_width, 1.0);
    assert_eq!(layout.inner_height, 1.0);
    assert!(layout.viewport().is_valid());
}

#[test]
fn non_finite_width_never_fails() {
    let layout = ChartLayout::from_container_width(f64::NAN, LayoutConfig::default());
    assert!(layout.degenerate);
    assert_eq!(layout.width, 0.0);
}

#[test]
fn outer_coordinates_convert_to_inner_area() {
    let layout = ChartLayout::from_container_width(800.0, LayoutConfig::default());

    let (x, y) = layout.to_inner(80.0, 48.0);
    assert_eq!((x, y), (0.0, 0.0));
    assert!(layout.contains_inner(x, y));

    let (x, y) = layout.to_inner(10.0, 10.0);
    assert!(!layout.contains_inner(x, y));
    assert!(!layout.contains_inner(f64::NAN, 5.0));
}

#[test]
fn custom_aspect_ratio_and_margins_apply() {
    let config = LayoutConfig::default()
        .with_aspect_ratio(0.5)
        .with_margins(0.0, 0.0, 0.0, 0.0);
    let layout = ChartLayout::from_container_width(600.0, config);

    assert_eq!(layout.height, 300.0);
    assert_eq!(layout.inner_width, 600.0);
    assert_eq!(layout.inner_height, 300.0);
}

#[test]
fn invalid_layout_config_is_rejected() {
    assert!(LayoutConfig::default().with_aspect_ratio(0.0).validate().is_err());
    assert!(
        LayoutConfig::default()
            .with_margins(0.1, 0.5, 0.1, 0.5)
            .validate()
            .is_err()
    );
    assert!(
        LayoutConfig::default()
            .with_margins(-0.1, 0.0, 0.0, 0.0)
            .validate()
            .is_err()
    );
    assert!(LayoutConfig::default().validate().is_ok());
}

#[test]
fn layout_config_json_fills_defaults() {
    let config: LayoutConfig =
        serde_json::from_str(r#"{"aspect_ratio": 0.75}"#).expect("parse layout config");

    assert_eq!(config.aspect_ratio, 0.75);
    assert_eq!(config.margin_left_ratio, 0.1);
    assert_eq!(config.margin_bottom_ratio, 0.15);
}
