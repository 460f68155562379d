use chart_pipeline::ChartError;
use chart_pipeline::core::{DataTable, Measure, Row, RowKey};
use chart_pipeline::extensions::{ChoroplethConfig, SEQUENTIAL_BLUES, join_regions};
use chart_pipeline::render::Color;

fn countries() -> DataTable {
    DataTable::new("country", ["rate"])
        .expect("table")
        .with_row(RowKey::category("Norway"), vec![Measure::new(0.0)])
        .expect("row")
        .with_row(RowKey::category("Chad"), vec![Measure::new(100.0)])
        .expect("row")
        .with_row(RowKey::category("Peru"), vec![Measure::Missing])
        .expect("row")
        .with_row(RowKey::category("chad"), vec![Measure::new(50.0)])
        .expect("row")
}

#[test]
fn regions_join_case_insensitively_and_quantize() {
    let config = ChoroplethConfig::new("rate");
    let join = join_regions(&countries(), ["norway", "CHAD", "Peru", "Fiji"], &config)
        .expect("join");

    let ids: Vec<&str> = join.fills.keys().map(String::as_str).collect();
    assert_eq!(ids, vec!["norway", "CHAD", "Peru", "Fiji"]);

    let norway = join.fills["norway"];
    assert_eq!(norway.row, Some(0));
    assert_eq!(norway.bucket, Some(0));
    assert_eq!(norway.color, Color::from_hex(SEQUENTIAL_BLUES[0]).expect("hex"));

    // First matching row wins over the later "chad" duplicate.
    let chad = join.fills["CHAD"];
    assert_eq!(chad.row, Some(1));
    assert_eq!(chad.bucket, Some(4));
}

#[test]
fn missing_values_and_unknown_regions_use_no_data_color() {
    let config = ChoroplethConfig::new("rate").with_no_data_color("#000000");
    let join = join_regions(&countries(), ["Peru", "Fiji"], &config).expect("join");
    let no_data = Color::from_hex("#000000").expect("hex");

    let peru = join.fills["Peru"];
    assert_eq!(peru.row, Some(2));
    assert!(peru.value.is_missing());
    assert_eq!(peru.color, no_data);

    let fiji = join.fills["Fiji"];
    assert_eq!(fiji.row, None);
    assert_eq!(fiji.color, no_data);

    let unmatched: Vec<&str> = join.unmatched().collect();
    assert_eq!(unmatched, vec!["Peru", "Fiji"]);
}

#[test]
fn legend_covers_value_extent() {
    let config = ChoroplethConfig::new("rate").with_palette(["#ffffff", "#000000"]);
    let join = join_regions(&countries(), ["Norway"], &config).expect("join");

    let legend = join.legend();
    assert_eq!(legend.len(), 2);
    assert_eq!((legend[0].0, legend[0].1), (0.0, 50.0));
    assert_eq!((legend[1].0, legend[1].1), (50.0, 100.0));
    assert_eq!(legend[1].2, Color::rgb(0.0, 0.0, 0.0));
}

#[test]
fn region_ids_can_come_from_a_text_field() {
    let mut table = DataTable::new("country", ["rate"])
        .expect("table")
        .with_text_fields(["iso"])
        .expect("text fields");
    table
        .push_row(
            Row::new(RowKey::category("Norway"), vec![Measure::new(3.0)])
                .with_texts(vec![Some("NOR".to_owned())]),
        )
        .expect("row");

    let config = ChoroplethConfig::new("rate").with_region_field("iso");
    let join = join_regions(&table, ["nor"], &config).expect("join");
    assert_eq!(join.fills["nor"].row, Some(0));

    let unknown = ChoroplethConfig::new("rate").with_region_field("code");
    assert!(matches!(
        join_regions(&table, ["nor"], &unknown),
        Err(ChartError::Schema(_))
    ));
}

#[test]
fn all_missing_values_have_no_scale() {
    let table = DataTable::new("country", ["rate"])
        .expect("table")
        .with_row(RowKey::category("Peru"), vec![Measure::Missing])
        .expect("row");
    let join = join_regions(&table, ["Peru"], &ChoroplethConfig::new("rate")).expect("join");

    assert!(join.scale.is_none());
    assert!(join.legend().is_empty());
    assert_eq!(join.fills["Peru"].bucket, None);
}
