//! Gradient Mapper: linear remapping of a scalar into a visual attribute
//! range (hue, alpha, size, stroke weight).

/// Linearly remaps `value` from `[in_min, in_max]` to `[out_min, out_max]`.
///
/// The result is not clamped, so values outside the input range extrapolate.
/// A collapsed input range (`in_min == in_max`) maps every value to
/// `out_min` instead of dividing by zero.
pub fn lerp(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    let span = in_max - in_min;
    if span == 0.0 {
        return out_min;
    }
    out_min + (value - in_min) / span * (out_max - out_min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_midpoint() {
        assert!((lerp(5.0, 0.0, 10.0, 0.0, 100.0) - 50.0).abs() < 1e-12);
    }

    #[test]
    fn lerp_endpoints() {
        assert!((lerp(0.0, 0.0, 10.0, 50.0, 255.0) - 50.0).abs() < 1e-12);
        assert!((lerp(10.0, 0.0, 10.0, 50.0, 255.0) - 255.0).abs() < 1e-12);
    }

    #[test]
    fn lerp_reversed_output_range() {
        assert!((lerp(2.5, 0.0, 10.0, 100.0, 0.0) - 75.0).abs() < 1e-12);
    }

    #[test]
    fn lerp_extrapolates_outside_input_range() {
        assert!((lerp(-1.0, -1.0, 1.0, 2.0, 8.0) - 2.0).abs() < 1e-12);
        assert!((lerp(2.0, 0.0, 1.0, 0.0, 10.0) - 20.0).abs() < 1e-12);
    }

    #[test]
    fn lerp_degenerate_range_returns_out_min() {
        assert!((lerp(3.0, 1.0, 1.0, 7.0, 9.0) - 7.0).abs() < f64::EPSILON);
        assert!((lerp(1.0, 1.0, 1.0, 7.0, 9.0) - 7.0).abs() < f64::EPSILON);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn degenerate_range_never_nan(
                x in -1e9_f64..1e9,
                a in -1e9_f64..1e9,
                o0 in -1e9_f64..1e9,
                o1 in -1e9_f64..1e9,
            ) {
                let v = lerp(x, a, a, o0, o1);
                prop_assert_eq!(v.to_bits(), o0.to_bits());
            }

            #[test]
            fn result_within_output_range_for_inputs_in_range(
                t in 0.0_f64..=1.0,
                o0 in -1e3_f64..1e3,
                o1 in -1e3_f64..1e3,
            ) {
                let v = lerp(t, 0.0, 1.0, o0, o1);
                let (lo, hi) = if o0 <= o1 { (o0, o1) } else { (o1, o0) };
                prop_assert!(v >= lo - 1e-9 && v <= hi + 1e-9, "{v} not in [{lo}, {hi}]");
            }
        }
    }
}
