use chart_pipeline::core::{
    BandScale, BubbleSize, DataTable, LinearScale, Measure, RowKey, SqrtScale, StackConfig,
    TimeScale, XScale, project_bars, project_grouped_bars, project_line, project_points,
    project_stacked_areas, project_stacked_columns, stack,
};
use indexmap::IndexSet;

fn band(names: &[&str], width: f64) -> BandScale {
    let categories: IndexSet<String> = names.iter().map(|n| (*n).to_owned()).collect();
    BandScale::new(categories, (0.0, width)).expect("band scale")
}

fn strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| (*n).to_owned()).collect()
}

#[test]
fn bars_grow_from_baseline_and_skip_missing() {
    let table = DataTable::new("region", ["v"])
        .expect("table")
        .with_row(RowKey::category("A"), vec![Measure::new(10.0)])
        .expect("row")
        .with_row(RowKey::category("B"), vec![Measure::Missing])
        .expect("row")
        .with_row(RowKey::category("C"), vec![Measure::new(-5.0)])
        .expect("row");
    let y_scale = LinearScale::new((-10.0, 10.0), (100.0, 0.0)).expect("y scale");

    let bars = project_bars(&table, "v", &band(&["A", "B", "C"], 300.0), &y_scale, "%Y")
        .expect("bars");
    assert_eq!(bars.len(), 2);

    assert_eq!((bars[0].x_left, bars[0].width()), (0.0, 100.0));
    assert_eq!((bars[0].y_top, bars[0].y_bottom), (0.0, 50.0));
    assert_eq!(bars[1].row, 2);
    assert_eq!((bars[1].y_top, bars[1].y_bottom), (50.0, 75.0));
}

#[test]
fn grouped_bars_split_band_per_field() {
    let table = DataTable::new("region", ["a", "b"])
        .expect("table")
        .with_row(RowKey::category("A"), vec![Measure::new(1.0), Measure::Missing])
        .expect("row")
        .with_row(RowKey::category("B"), vec![Measure::new(2.0), Measure::new(0.0)])
        .expect("row");
    let y_scale = LinearScale::new((0.0, 2.0), (100.0, 0.0)).expect("y scale");

    let bars = project_grouped_bars(
        &table,
        &strings(&["a", "b"]),
        &band(&["A", "B"], 200.0),
        &y_scale,
        "%Y",
    )
    .expect("bars");

    assert_eq!(bars.len(), 3);
    assert_eq!((bars[1].x_left, bars[1].x_right), (100.0, 150.0));
    assert_eq!((bars[2].x_left, bars[2].x_right), (150.0, 200.0));
    // A zero keeps its (flat) bar; only the missing cell is dropped.
    assert_eq!(bars[2].height(), 0.0);
    assert!(project_grouped_bars(&table, &[], &band(&["A"], 10.0), &y_scale, "%Y").is_err());
}

#[test]
fn stacked_columns_follow_layers() {
    let table = DataTable::new("region", ["a", "b"])
        .expect("table")
        .with_row(RowKey::category("A"), vec![Measure::new(1.0), Measure::new(3.0)])
        .expect("row");
    let layers = stack(&table, &strings(&["a", "b"]), StackConfig::default()).expect("stack");
    let y_scale = LinearScale::new((0.0, 4.0), (400.0, 0.0)).expect("y scale");

    let bars = project_stacked_columns(&table, &layers, &band(&["A"], 100.0), &y_scale, "%Y")
        .expect("columns");
    assert_eq!(bars.len(), 2);
    assert_eq!((bars[0].y_top, bars[0].y_bottom), (300.0, 400.0));
    assert_eq!((bars[1].y_top, bars[1].y_bottom), (0.0, 300.0));
    assert_eq!(bars[1].series, 1);
}

#[test]
fn stacked_areas_close_their_outline() {
    let table = DataTable::new("year", ["a", "b"])
        .expect("table")
        .with_row(
            RowKey::year(2000).expect("year"),
            vec![Measure::new(1.0), Measure::new(1.0)],
        )
        .expect("row")
        .with_row(
            RowKey::year(2001).expect("year"),
            vec![Measure::new(2.0), Measure::Missing],
        )
        .expect("row");
    let layers = stack(&table, &strings(&["a", "b"]), StackConfig::default()).expect("stack");
    let x_scale = XScale::Time(
        TimeScale::from_times(
            table.rows().iter().filter_map(|row| row.key.as_time()),
            (0.0, 100.0),
        )
        .expect("time scale"),
    );
    let y_scale = LinearScale::new((0.0, 2.0), (100.0, 0.0)).expect("y scale");

    let areas = project_stacked_areas(&table, &layers, &x_scale, &y_scale, "%Y").expect("areas");
    assert_eq!(areas.len(), 2);

    let top = &areas[1];
    assert_eq!(top.polygon.len(), 5);
    assert_eq!(top.polygon.first(), top.polygon.last());
    let upper: Vec<(f64, f64)> = top.upper_edge().iter().map(|v| (v.x, v.y)).collect();
    // The missing 2001 cell pinches the band to zero height.
    assert_eq!(upper, vec![(0.0, 0.0), (100.0, 0.0)]);
    assert_eq!(top.polygon[2].y, 0.0);
}

#[test]
fn lines_break_at_missing_values() {
    let table = DataTable::new("x", ["v"])
        .expect("table")
        .with_row(RowKey::Number(0.0), vec![Measure::new(1.0)])
        .expect("row")
        .with_row(RowKey::Number(1.0), vec![Measure::new(2.0)])
        .expect("row")
        .with_row(RowKey::Number(2.0), vec![Measure::Missing])
        .expect("row")
        .with_row(RowKey::Number(3.0), vec![Measure::new(0.0)])
        .expect("row");
    let x_scale = XScale::Linear(LinearScale::new((0.0, 3.0), (0.0, 300.0)).expect("x scale"));
    let y_scale = LinearScale::new((0.0, 2.0), (100.0, 0.0)).expect("y scale");

    let line = project_line(&table, "v", &x_scale, &y_scale, "%Y").expect("line");
    let lengths: Vec<usize> = line.segments.iter().map(Vec::len).collect();
    assert_eq!(lengths, vec![2, 1]);
    assert_eq!((line.segments[1][0].x, line.segments[1][0].y), (300.0, 100.0));
}

#[test]
fn bubble_radius_tracks_area_and_defaults_when_missing() {
    let table = DataTable::new("id", ["x", "y", "size"])
        .expect("table")
        .with_row(
            RowKey::category("a"),
            vec![Measure::new(0.0), Measure::new(0.0), Measure::new(100.0)],
        )
        .expect("row")
        .with_row(
            RowKey::category("b"),
            vec![Measure::new(1.0), Measure::new(1.0), Measure::new(25.0)],
        )
        .expect("row")
        .with_row(
            RowKey::category("c"),
            vec![Measure::new(1.0), Measure::new(0.5), Measure::Missing],
        )
        .expect("row");
    let x_scale = LinearScale::new((0.0, 1.0), (0.0, 100.0)).expect("x scale");
    let y_scale = LinearScale::new((0.0, 1.0), (100.0, 0.0)).expect("y scale");
    let size = BubbleSize {
        field: "size",
        scale: SqrtScale::new(100.0, 30.0).expect("sqrt scale"),
    };

    let points = project_points(&table, "x", "y", &x_scale, &y_scale, Some(size), 4.0)
        .expect("points");
    let radii: Vec<f64> = points.iter().map(|p| p.radius).collect();
    assert_eq!(radii, vec![30.0, 15.0, 4.0]);
    assert_eq!((points[1].cx, points[1].cy), (100.0, 0.0));

    assert!(project_points(&table, "x", "y", &x_scale, &y_scale, None, 0.0).is_err());
}
