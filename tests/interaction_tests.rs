use chart_pipeline::core::{
    BandScale, DataTable, LinearScale, Measure, PointGeometry, RowKey, StackConfig, TimeScale,
    XScale, stack,
};
use chart_pipeline::interaction::{
    HoverTarget, InteractionState, TooltipContent, TooltipLine, place_tooltip, resolve_band_row,
    resolve_grouped_slot, resolve_nearest_point, resolve_nearest_row, resolve_row_by_year,
    resolve_stack_layer,
};
use indexmap::IndexSet;

fn sparse_years() -> DataTable {
    // 2002 has no row.
    DataTable::new("year", ["value"])
        .expect("table")
        .with_row(RowKey::year(2000).expect("year"), vec![Measure::new(1.0)])
        .expect("row")
        .with_row(RowKey::year(2001).expect("year"), vec![Measure::new(2.0)])
        .expect("row")
        .with_row(RowKey::year(2003).expect("year"), vec![Measure::new(4.0)])
        .expect("row")
}

fn year_scale(table: &DataTable) -> TimeScale {
    TimeScale::from_times(
        table.rows().iter().filter_map(|row| row.key.as_time()),
        (0.0, 300.0),
    )
    .expect("time scale")
}

fn pixel_for_year(scale: &TimeScale, year: i32) -> f64 {
    let key = RowKey::year(year).expect("year");
    scale.map(key.as_time().expect("time key")).expect("map")
}

#[test]
fn exact_year_match_finds_row() {
    let table = sparse_years();
    let scale = year_scale(&table);

    let px = pixel_for_year(&scale, 2001);
    assert_eq!(resolve_row_by_year(&table, &scale, px), Some(1));
    assert_eq!(resolve_row_by_year(&table, &scale, px + 10.0), Some(1));
    assert_eq!(
        resolve_row_by_year(&table, &scale, pixel_for_year(&scale, 2003)),
        Some(2)
    );
}

#[test]
fn pointer_between_plotted_years_matches_nothing() {
    let table = sparse_years();
    let scale = year_scale(&table);

    let px = pixel_for_year(&scale, 2002);
    assert_eq!(resolve_row_by_year(&table, &scale, px), None);
}

#[test]
fn nearest_mode_falls_back_to_closest_row() {
    let table = sparse_years();
    let scale = year_scale(&table);
    let x_scale = XScale::Time(scale);

    let px = pixel_for_year(&scale, 2002) + 5.0;
    assert_eq!(resolve_nearest_row(&table, &x_scale, px, "%Y"), Some(2));
    assert_eq!(resolve_nearest_row(&table, &x_scale, f64::NAN, "%Y"), None);
}

#[test]
fn band_rows_resolve_by_label() {
    let table = DataTable::new("region", ["value"])
        .expect("table")
        .with_row(RowKey::category("North"), vec![Measure::new(1.0)])
        .expect("row")
        .with_row(RowKey::category("South"), vec![Measure::new(2.0)])
        .expect("row");
    let names: IndexSet<String> = ["North", "South"].iter().map(|s| (*s).to_owned()).collect();
    let band = BandScale::with_padding(names, (0.0, 250.0), 0.2, 0.0).expect("band scale");

    let south_center = band.center_at(1).expect("center");
    assert_eq!(resolve_band_row(&table, &band, south_center, "%Y"), Some(1));
    let gap = band.position_at(1).expect("left") - 1.0;
    assert_eq!(resolve_band_row(&table, &band, gap, "%Y"), None);
}

#[test]
fn grouped_slot_splits_band() {
    let names: IndexSet<String> = ["a", "b"].iter().map(|s| (*s).to_owned()).collect();
    let band = BandScale::new(names, (0.0, 200.0)).expect("band scale");

    assert_eq!(resolve_grouped_slot(&band, 1, 2, 110.0), Some(0));
    assert_eq!(resolve_grouped_slot(&band, 1, 2, 190.0), Some(1));
    assert_eq!(resolve_grouped_slot(&band, 1, 2, 50.0), None);
}

#[test]
fn stack_layer_under_pointer() {
    let table = DataTable::new("region", ["A", "B", "C"])
        .expect("table")
        .with_row(
            RowKey::category("North"),
            vec![Measure::new(10.0), Measure::new(20.0), Measure::new(5.0)],
        )
        .expect("row");
    let fields: Vec<String> = ["A", "B", "C"].iter().map(|s| (*s).to_owned()).collect();
    let layers = stack(&table, &fields, StackConfig::default()).expect("stack");
    let y_scale = LinearScale::new((0.0, 40.0), (400.0, 0.0)).expect("y scale");

    let at_15 = y_scale.map(15.0).expect("map");
    assert_eq!(resolve_stack_layer(&layers, 0, &y_scale, at_15), Some(1));
    let above = y_scale.map(38.0).expect("map");
    assert_eq!(resolve_stack_layer(&layers, 0, &y_scale, above), None);
}

#[test]
fn nearest_point_within_radius() {
    let points = vec![
        PointGeometry {
            row: 0,
            cx: 10.0,
            cy: 10.0,
            radius: 4.0,
        },
        PointGeometry {
            row: 1,
            cx: 40.0,
            cy: 10.0,
            radius: 20.0,
        },
    ];

    assert_eq!(resolve_nearest_point(&points, 12.0, 10.0, 5.0), Some(0));
    assert_eq!(resolve_nearest_point(&points, 25.0, 10.0, 5.0), Some(1));
    assert_eq!(resolve_nearest_point(&points, 10.0, 90.0, 5.0), None);
}

#[test]
fn tooltip_flips_at_viewport_edges() {
    assert_eq!(
        place_tooltip((100.0, 100.0), (50.0, 30.0), (400.0, 300.0), 10.0),
        (110.0, 110.0)
    );
    assert_eq!(
        place_tooltip((380.0, 290.0), (50.0, 30.0), (400.0, 300.0), 10.0),
        (320.0, 250.0)
    );
    assert_eq!(
        place_tooltip((20.0, 5.0), (500.0, 30.0), (400.0, 300.0), 10.0),
        (0.0, 15.0)
    );
}

#[test]
fn tooltip_size_grows_with_content() {
    let short = TooltipContent::new("2001");
    let long = TooltipContent::new("2001")
        .with_line(TooltipLine::new("Population", "5,425,270"))
        .with_line(TooltipLine::new("Total", "9"));

    let (short_w, short_h) = short.estimated_size(12.0, 6.0);
    let (long_w, long_h) = long.estimated_size(12.0, 6.0);
    assert!(long_w > short_w);
    assert!(long_h > short_h);
}

#[test]
fn interaction_state_highlights_hovered_series_only() {
    let mut state = InteractionState::default();
    assert!(!state.has_highlight());

    state.on_pointer_move(5.0, 6.0);
    state.show(
        HoverTarget {
            row: 2,
            series: Some(1),
            anchor_x: 0.0,
            anchor_y: 0.0,
        },
        TooltipContent::new("x"),
        (15.0, 16.0),
    );

    assert!(state.tooltip().visible);
    assert_eq!((state.tooltip().x, state.tooltip().y), (15.0, 16.0));
    assert!(state.is_highlighted(2, Some(1)));
    assert!(!state.is_highlighted(2, Some(0)));
    assert!(!state.is_highlighted(1, Some(1)));

    state.on_pointer_leave();
    assert!(!state.tooltip().visible);
    assert!(state.tooltip().content.is_none());
    assert!(!state.has_highlight());
    assert_eq!(state.cursor(), None);
}
