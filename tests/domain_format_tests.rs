use chart_pipeline::core::{
    CategoryOrder, DataTable, Measure, RowKey, category_domain, measure_extent, measure_max,
    time_extent,
};
use chart_pipeline::format::{
    MISSING_LABEL, ValueStyle, format_measure, format_percent, format_thousands, format_value,
};

#[test]
fn extent_skips_missing_cells() {
    let values = [
        Measure::Missing,
        Measure::new(4.0),
        Measure::new(-2.5),
        Measure::Missing,
        Measure::new(0.0),
    ];
    assert_eq!(measure_extent(values), Some((-2.5, 4.0)));
    assert_eq!(measure_max([Measure::Missing, Measure::Missing]), None);
    assert_eq!(measure_extent(Vec::<Measure>::new()), None);
}

#[test]
fn category_domain_keeps_first_seen_or_sorts() {
    let table = DataTable::new("country", ["value"])
        .expect("table")
        .with_row(RowKey::category("Peru"), vec![Measure::new(1.0)])
        .expect("row")
        .with_row(RowKey::category("Chad"), vec![Measure::new(2.0)])
        .expect("row")
        .with_row(RowKey::category("Peru"), vec![Measure::new(3.0)])
        .expect("row");

    let first_seen = category_domain(table.rows(), CategoryOrder::FirstSeen, "%Y");
    let names: Vec<&str> = first_seen.iter().map(String::as_str).collect();
    assert_eq!(names, vec!["Peru", "Chad"]);

    let sorted = category_domain(table.rows(), CategoryOrder::Sorted, "%Y");
    let names: Vec<&str> = sorted.iter().map(String::as_str).collect();
    assert_eq!(names, vec!["Chad", "Peru"]);
}

#[test]
fn time_extent_ignores_order() {
    let table = DataTable::new("year", ["value"])
        .expect("table")
        .with_row(RowKey::year(2005).expect("year"), vec![Measure::new(1.0)])
        .expect("row")
        .with_row(RowKey::year(1999).expect("year"), vec![Measure::Missing])
        .expect("row");

    let (start, end) = time_extent(table.rows()).expect("extent");
    assert_eq!(RowKey::Time(start).calendar_year(), Some(1999));
    assert_eq!(RowKey::Time(end).calendar_year(), Some(2005));
}

#[test]
fn thousands_grouping() {
    assert_eq!(format_thousands(1_234_567.891, 2), "1,234,567.89");
    assert_eq!(format_thousands(999.0, 0), "999");
    assert_eq!(format_thousands(-12_000.0, 0), "-12,000");
    assert_eq!(format_thousands(-0.4, 0), "0");
    assert_eq!(format_thousands(f64::NAN, 0), "nan");
}

#[test]
fn percent_and_fixed_styles() {
    assert_eq!(format_percent(0.125, 1), "12.5%");
    assert_eq!(format_value(0.5, ValueStyle::Percent { decimals: 0 }), "50%");
    assert_eq!(format_value(1234.5, ValueStyle::Fixed { decimals: 1 }), "1234.5");
    assert_eq!(format_value(1234.6, ValueStyle::default()), "1,235");
}

#[test]
fn missing_formats_as_no_data_and_zero_as_zero() {
    assert_eq!(format_measure(Measure::Missing, ValueStyle::default()), MISSING_LABEL);
    assert_eq!(format_measure(Measure::new(0.0), ValueStyle::default()), "0");
    assert_eq!(
        format_measure(Measure::new(1200.0), ValueStyle::default()),
        "1,200"
    );
}
