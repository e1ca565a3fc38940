//! Conversions from raw analog / pixel values into the console's fixed-point ranges.

use crate::constants::{CPAD_BOUND, CPAD_CENTER, TOUCH_RANGE};

/// Zero out analog values whose magnitude is below `threshold`.
///
/// `i16::MIN` is nudged to `-i16::MAX` first so the result can always be negated.
#[inline]
pub fn apply_deadzone(raw: i16, threshold: i16) -> i16 {
    let v = if raw == i16::MIN { raw + 1 } else { raw };
    if v.unsigned_abs() < threshold.unsigned_abs() {
        0
    } else {
        v
    }
}

/// Map a signed 16-bit stick component onto the 12-bit circle pad range centered on 2048.
#[inline]
pub fn scale_stick(component: i16) -> u32 {
    let fixed = (i32::from(component) * CPAD_BOUND) / 32768 + CPAD_CENTER;
    // |component * BOUND / 32768| <= 0x5D0 keeps this inside 0..0x1000
    fixed as u32
}

/// Map a pixel coordinate in `[0, extent)` onto the touch panel range `[0, 4096)`.
/// A zero extent maps everything to 0.
#[inline]
pub fn scale_touch(pixel: u16, extent: u16) -> u32 {
    (u32::from(pixel) * TOUCH_RANGE)
        .checked_div(u32::from(extent))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn deadzone_zeroes_small_values() {
        assert_eq!(apply_deadzone(1699, 1700), 0);
        assert_eq!(apply_deadzone(-1699, 1700), 0);
        assert_eq!(apply_deadzone(1700, 1700), 1700);
        assert_eq!(apply_deadzone(-20000, 1700), -20000);
    }

    #[test]
    fn deadzone_nudges_most_negative_value() {
        assert_eq!(apply_deadzone(i16::MIN, 1700), -32767);
        assert_eq!(apply_deadzone(i16::MIN, 0), -32767);
    }

    #[test]
    fn stick_center_and_extremes() {
        assert_eq!(scale_stick(0), 2048);
        assert_eq!(scale_stick(16384), 2048 + 744);
        assert_eq!(scale_stick(32767), 2048 + 1487);
        assert_eq!(scale_stick(-32767), 2048 - 1487);
        assert_eq!(scale_stick(i16::MIN), 2048 - 1488);
    }

    #[test]
    fn touch_scales_window_center() {
        assert_eq!(scale_touch(320, 640), 2048);
        assert_eq!(scale_touch(240, 480), 2048);
        assert_eq!(scale_touch(0, 640), 0);
        assert_eq!(scale_touch(639, 640), 4089);
    }

    #[test]
    fn touch_with_empty_window_is_zero() {
        assert_eq!(scale_touch(10, 0), 0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn prop_stick_monotonic(a in any::<i16>(), b in any::<i16>()) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(scale_stick(lo) <= scale_stick(hi),
                "scale_stick({lo})={} > scale_stick({hi})={}", scale_stick(lo), scale_stick(hi));
        }

        #[test]
        fn prop_stick_fits_twelve_bits(v in any::<i16>()) {
            prop_assert!(scale_stick(v) < 0x1000);
        }

        #[test]
        fn prop_touch_in_range(
            (extent, pixel) in (1u16..=u16::MAX).prop_flat_map(|e| (Just(e), 0..e))
        ) {
            prop_assert!(scale_touch(pixel, extent) < TOUCH_RANGE);
        }

        #[test]
        fn prop_deadzone_threshold(v in any::<i16>(), t in 0i16..=i16::MAX) {
            let nudged = if v == i16::MIN { -32767 } else { v };
            let out = apply_deadzone(v, t);
            if nudged.unsigned_abs() < t.unsigned_abs() {
                prop_assert_eq!(out, 0);
            } else {
                prop_assert_eq!(out, nudged);
            }
        }
    }
}
