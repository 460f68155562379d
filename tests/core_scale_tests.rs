use approx::assert_abs_diff_eq;
use chart_pipeline::core::{
    BandScale, LinearScale, SqrtScale, TimeScale, TimeUnit, nice_domain, nice_upper_bound,
    tick_increment, tick_step, ticks,
};
use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexSet;

fn date(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .expect("valid date")
}

fn categories(names: &[&str]) -> IndexSet<String> {
    names.iter().map(|name| (*name).to_owned()).collect()
}

#[test]
fn linear_scale_round_trip_within_tolerance() {
    let scale = LinearScale::new((10.0, 110.0), (0.0, 1000.0)).expect("valid scale");

    let px = scale.map(42.5).expect("to pixel");
    let recovered = scale.invert(px).expect("from pixel");

    assert!((px - 325.0).abs() <= 1e-9);
    assert!((recovered - 42.5).abs() <= 1e-9);
}

#[test]
fn inverted_range_plots_larger_values_higher() {
    let scale = LinearScale::new((0.0, 100.0), (400.0, 0.0)).expect("valid scale");
    assert_eq!(scale.map(0.0).expect("map"), 400.0);
    assert_eq!(scale.map(100.0).expect("map"), 0.0);
    assert_eq!(scale.map(25.0).expect("map"), 300.0);
}

#[test]
fn zero_width_domain_is_widened() {
    let scale = LinearScale::new((5.0, 5.0), (0.0, 100.0)).expect("valid scale");
    assert_eq!(scale.domain(), (4.5, 5.5));
    assert_eq!(scale.map(5.0).expect("map"), 50.0);
}

#[test]
fn invalid_domains_and_ranges_are_rejected() {
    assert!(LinearScale::new((f64::NAN, 1.0), (0.0, 1.0)).is_err());
    assert!(LinearScale::new((0.0, 1.0), (0.0, f64::INFINITY)).is_err());

    let flat = LinearScale::new((0.0, 1.0), (10.0, 10.0)).expect("valid scale");
    assert!(flat.invert(10.0).is_err());
    assert!(flat.map(f64::NAN).is_err());
}

#[test]
fn clamped_scale_stays_inside_range() {
    let scale = LinearScale::new((0.0, 10.0), (0.0, 100.0))
        .expect("valid scale")
        .with_clamp(true);
    assert_eq!(scale.map(-5.0).expect("map"), 0.0);
    assert_eq!(scale.map(50.0).expect("map"), 100.0);
}

#[test]
fn tick_increment_uses_one_two_five_steps() {
    assert_eq!(tick_increment(0.0, 10.0, 10), 1.0);
    assert_eq!(tick_increment(0.0, 100.0, 10), 10.0);
    assert_eq!(tick_increment(0.0, 30.0, 10), 2.0);
    assert_eq!(tick_increment(0.0, 1.0, 10), -10.0);
    assert_eq!(tick_step(0.0, 1.0, 10), 0.1);
    assert_eq!(tick_step(10.0, 0.0, 10), 1.0);
}

#[test]
fn ticks_follow_input_direction() {
    assert_eq!(ticks(0.0, 1.0, 5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    assert_eq!(ticks(10.0, 0.0, 2), vec![10.0, 5.0, 0.0]);
    assert_eq!(ticks(3.0, 3.0, 10), vec![3.0]);
    assert!(ticks(0.0, 1.0, 0).is_empty());
}

#[test]
fn nice_domain_extends_to_round_values() {
    assert_eq!(nice_domain(0.0, 0.96, 10), (0.0, 1.0));
    assert_eq!(nice_domain(1.1, 10.9, 10), (1.0, 11.0));
    assert_eq!(nice_domain(10.9, 1.1, 10), (11.0, 1.0));
    assert_eq!(nice_upper_bound(123.0, 10), 130.0);
    assert_eq!(nice_upper_bound(0.0, 10), 0.0);
    assert_eq!(nice_upper_bound(-4.0, 10), 0.0);
}

#[test]
fn nice_scale_keeps_range() {
    let scale = LinearScale::new((0.0, 96.0), (300.0, 0.0))
        .expect("valid scale")
        .nice(10);
    assert_eq!(scale.domain(), (0.0, 100.0));
    assert_eq!(scale.range(), (300.0, 0.0));
}

#[test]
fn time_scale_maps_decade_midpoint_to_middle_pixel() {
    let scale =
        TimeScale::new(date(2000, 1, 1), date(2020, 1, 1), (0.0, 400.0)).expect("valid scale");

    let px = scale.map(date(2010, 1, 1)).expect("to pixel");
    assert_eq!(px.round(), 200.0);

    let recovered = scale
        .invert_rounded(200.0, TimeUnit::Day)
        .expect("from pixel");
    assert_eq!(recovered, date(2010, 1, 1));
}

#[test]
fn time_scale_rounds_to_nearest_year() {
    let scale =
        TimeScale::new(date(2000, 1, 1), date(2010, 1, 1), (0.0, 1000.0)).expect("valid scale");

    let near_2003 = scale.map(date(2003, 3, 1)).expect("to pixel");
    assert_eq!(
        scale.invert_rounded(near_2003, TimeUnit::Year).expect("year"),
        date(2003, 1, 1)
    );

    let near_2004 = scale.map(date(2003, 11, 1)).expect("to pixel");
    assert_eq!(
        scale.invert_rounded(near_2004, TimeUnit::Year).expect("year"),
        date(2004, 1, 1)
    );
}

#[test]
fn time_scale_from_times_fits_extent() {
    let scale = TimeScale::from_times(
        [date(2005, 1, 1), date(2001, 1, 1), date(2003, 1, 1)],
        (0.0, 100.0),
    )
    .expect("valid scale");
    assert_eq!(scale.domain(), (date(2001, 1, 1), date(2005, 1, 1)));
    assert!(TimeScale::from_times(Vec::new(), (0.0, 100.0)).is_err());
}

#[test]
fn year_ticks_are_thinned_to_max_count() {
    let scale =
        TimeScale::new(date(2000, 1, 1), date(2020, 1, 1), (0.0, 400.0)).expect("valid scale");

    let every = scale.year_ticks(50).expect("ticks");
    assert_eq!(every.len(), 21);

    let thinned = scale.year_ticks(5).expect("ticks");
    assert!(thinned.len() <= 5);
    assert_eq!(thinned[0], date(2000, 1, 1));
}

#[test]
fn band_scale_without_padding_tiles_range() {
    let scale =
        BandScale::new(categories(&["a", "b", "c"]), (0.0, 300.0)).expect("valid band scale");

    assert_eq!(scale.step(), 100.0);
    assert_eq!(scale.bandwidth(), 100.0);
    assert_eq!(scale.position("b"), Some(100.0));
    assert_eq!(scale.center_at(2), Some(250.0));
    assert_eq!(scale.position("z"), None);
}

#[test]
fn band_scale_padding_leaves_gaps_that_resolve_to_nothing() {
    let scale = BandScale::with_padding(categories(&["a", "b", "c"]), (0.0, 300.0), 0.5, 0.0)
        .expect("valid band scale");

    assert_abs_diff_eq!(scale.step(), 120.0, epsilon = 1e-9);
    assert_abs_diff_eq!(scale.bandwidth(), 60.0, epsilon = 1e-9);
    assert_eq!(scale.band_at(30.0), Some(0));
    assert_eq!(scale.band_at(90.0), None);
    assert_eq!(scale.band_at(150.0), Some(1));
    assert_eq!(scale.nearest_band(90.0), Some(0));
    assert_eq!(scale.nearest_band(100.0), Some(1));
}

#[test]
fn band_scale_sub_bands_split_bandwidth() {
    let scale =
        BandScale::new(categories(&["a", "b"]), (0.0, 200.0)).expect("valid band scale");

    assert_eq!(scale.sub_band(1, 0, 4).expect("slot"), (100.0, 125.0));
    assert_eq!(scale.sub_band(1, 3, 4).expect("slot"), (175.0, 200.0));
    assert!(scale.sub_band(1, 4, 4).is_err());
    assert!(scale.sub_band(5, 0, 4).is_err());
}

#[test]
fn band_scale_rejects_bad_padding() {
    assert!(BandScale::with_padding(categories(&["a"]), (0.0, 10.0), 1.0, 0.0).is_err());
    assert!(BandScale::with_padding(categories(&["a"]), (0.0, 10.0), 0.1, -1.0).is_err());
}

#[test]
fn sqrt_scale_tracks_area() {
    let scale = SqrtScale::new(100.0, 30.0).expect("valid sqrt scale");
    assert_eq!(scale.map(100.0).expect("map"), 30.0);
    assert_eq!(scale.map(25.0).expect("map"), 15.0);
    assert_eq!(scale.map(-4.0).expect("map"), 0.0);
    assert!(SqrtScale::new(-1.0, 30.0).is_err());
}
