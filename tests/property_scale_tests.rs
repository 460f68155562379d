use chart_pipeline::core::{LinearScale, TimeScale, nice_domain, tick_increment, ticks};
use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

proptest! {
    #[test]
    fn linear_round_trip_recovers_value(
        d0 in -1_000_000.0f64..1_000_000.0,
        width in 0.001f64..1_000_000.0,
        r1 in 1.0f64..5_000.0,
        t in 0.0f64..1.0
    ) {
        let d1 = d0 + width;
        let scale = LinearScale::new((d0, d1), (0.0, r1)).expect("valid scale");
        let value = d0 + width * t;

        let px = scale.map(value).expect("to pixel");
        let recovered = scale.invert(px).expect("from pixel");
        let tolerance = 1e-9 * d0.abs().max(d1.abs()).max(1.0);
        prop_assert!((recovered - value).abs() <= tolerance);
    }

    #[test]
    fn time_round_trip_within_a_millisecond(
        start_days in 0i64..40_000,
        span_days in 1i64..20_000,
        offset in 0.0f64..1.0,
        width in 100.0f64..4_000.0
    ) {
        let base = NaiveDate::from_ymd_opt(1900, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .expect("valid base date");
        let start = base + Duration::days(start_days);
        let end = start + Duration::days(span_days);
        let scale = TimeScale::new(start, end, (0.0, width)).expect("valid scale");

        let millis = (span_days as f64 * 86_400_000.0 * offset).round() as i64;
        let time = start + Duration::milliseconds(millis);
        let px = scale.map(time).expect("to pixel");
        let recovered = scale.invert(px).expect("from pixel");
        prop_assert!((recovered - time).num_milliseconds().abs() <= 1);
    }

    #[test]
    fn nice_domain_is_deterministic_and_idempotent(
        max in 10.0f64..1_000_000.0,
        count in 2usize..=10
    ) {
        let first = nice_domain(0.0, max, count);
        prop_assert_eq!(first, nice_domain(0.0, max, count));
        prop_assert!(first.0 <= 0.0 && first.1 >= max);
        prop_assert_eq!(nice_domain(first.0, first.1, count), first);
    }

    #[test]
    fn ticks_lie_inside_domain(
        start in -10_000.0f64..10_000.0,
        width in 0.01f64..10_000.0,
        count in 1usize..30
    ) {
        let stop = start + width;
        prop_assert!(tick_increment(start, stop, count).is_finite());
        let values = ticks(start, stop, count);
        let slack = width * 1e-9;
        for pair in values.windows(2) {
            prop_assert!(pair[1] > pair[0]);
        }
        for value in values {
            prop_assert!(value >= start - slack && value <= stop + slack);
        }
    }
}
