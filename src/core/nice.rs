//! "Nice" tick steps and domain rounding.
//!
//! Steps are 1, 2 or 5 times a power of ten. A negative increment `-k` encodes
//! a fractional step of `1 / k`, which keeps small steps exact in floating
//! point.

const E10: f64 = 7.071_067_811_865_476; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

const NICE_MAX_ITERATIONS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
struct TickSpec {
    first: f64,
    last: f64,
    increment: f64,
}

fn tick_spec(start: f64, stop: f64, count: f64) -> TickSpec {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut first, mut last, increment);
    if power < 0.0 {
        let inc = 10f64.powf(-power) / factor;
        first = (start * inc).round();
        last = (stop * inc).round();
        if first / inc < start {
            first += 1.0;
        }
        if last / inc > stop {
            last -= 1.0;
        }
        increment = -inc;
    } else {
        let inc = 10f64.powf(power) * factor;
        first = (start / inc).round();
        last = (stop / inc).round();
        if first * inc < start {
            first += 1.0;
        }
        if last * inc > stop {
            last -= 1.0;
        }
        increment = inc;
    }

    if last < first && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }

    TickSpec {
        first,
        last,
        increment,
    }
}

/// Tick increment for roughly `count` ticks across `[start, stop]`.
///
/// Positive results are the step itself; negative results `-k` mean `1 / k`.
/// Returns `0.0` or a non-finite value for degenerate input.
#[must_use]
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    tick_spec(start, stop, count as f64).increment
}

/// Absolute tick step for roughly `count` ticks across the span.
#[must_use]
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let (lo, hi) = if stop < start {
        (stop, start)
    } else {
        (start, stop)
    };
    let increment = tick_increment(lo, hi, count);
    if increment < 0.0 {
        -1.0 / increment
    } else {
        increment
    }
}

/// Evenly spaced round values inside `[start, stop]`, in the input direction.
#[must_use]
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let spec = tick_spec(lo, hi, count as f64);
    if spec.first.is_nan()
        || spec.last.is_nan()
        || spec.last < spec.first
        || !spec.increment.is_finite()
        || spec.increment == 0.0
    {
        return Vec::new();
    }

    let n = (spec.last - spec.first + 1.0) as usize;
    let mut values: Vec<f64> = (0..n)
        .map(|i| {
            let index = spec.first + i as f64;
            if spec.increment < 0.0 {
                index / -spec.increment
            } else {
                index * spec.increment
            }
        })
        .collect();
    if reverse {
        values.reverse();
    }
    values
}

/// Extends `[start, stop]` outward so both ends land on tick steps.
///
/// The result is a pure function of the inputs. Non-finite or empty spans are
/// returned unchanged.
#[must_use]
pub fn nice_domain(start: f64, stop: f64, count: usize) -> (f64, f64) {
    if !start.is_finite() || !stop.is_finite() || start == stop || count == 0 {
        return (start, stop);
    }

    let reverse = stop < start;
    let (mut lo, mut hi) = if reverse { (stop, start) } else { (start, stop) };
    let mut previous_step: Option<f64> = None;

    for _ in 0..NICE_MAX_ITERATIONS {
        let step = tick_increment(lo, hi, count);
        if previous_step == Some(step) {
            break;
        }
        if step > 0.0 {
            lo = (lo / step).floor() * step;
            hi = (hi / step).ceil() * step;
        } else if step < 0.0 {
            lo = (lo * step).ceil() / step;
            hi = (hi * step).floor() / step;
        } else {
            break;
        }
        previous_step = Some(step);
    }

    if reverse { (hi, lo) } else { (lo, hi) }
}

/// Upper bound of the nice domain spanning zero and `max`.
///
/// Used for bar and stacked charts whose value axis starts at zero.
#[must_use]
pub fn nice_upper_bound(max: f64, count: usize) -> f64 {
    if !max.is_finite() || max <= 0.0 {
        return 0.0;
    }
    nice_domain(0.0, max, count).1
}
