//! Type definitions of Float and the crate-wide result, otherwise
//! constants and functions which can be used almost everywhere else in
//! the code.

// std
use std::ops::{BitAnd, Sub};
// viewpoints
use crate::core::error::ViewpointsError;

pub type Float = f32;

pub type Result<T> = std::result::Result<T, ViewpointsError>;

/// Grid side used by the spectrum when the viewport is too small to
/// hold a single cell.
pub const DEFAULT_GRID_SIZE: usize = 512;

/// Largest grid side the spectrum is computed on, 1 GiB of complex
/// cells.
pub const MAX_GRID_SIZE: usize = 8192;

/// Brightness the mean spectral magnitude is mapped to.
pub const TARGET_BRIGHTNESS: f64 = 64.0;

/// Clamp the given value *val* to lie between the values *low* and *high*.
pub fn clamp_t<T>(val: T, low: T, high: T) -> T
where
    T: PartialOrd,
{
    let r: T;
    if val < low {
        r = low;
    } else if val > high {
        r = high;
    } else {
        r = val;
    }
    r
}

/// Determine if a given integer is an exact power of 2.
pub fn is_power_of_2<T>(v: T) -> bool
where
    T: num::Zero + num::One + Copy + PartialOrd + BitAnd<T, Output = T> + Sub<T, Output = T>,
{
    (v > num::Zero::zero()) && !((v & (v - num::One::one())) > num::Zero::zero())
}

/// Round an integer down to the previous lower (or equal) power of 2.
/// Anything below one has no such power and maps to zero.
pub fn prev_power_of_two(v: i64) -> i64 {
    if v < 1_i64 {
        return 0_i64;
    }
    let mut ret: i64 = v; // copy value
    ret |= ret >> 1;
    ret |= ret >> 2;
    ret |= ret >> 4;
    ret |= ret >> 8;
    ret |= ret >> 16;
    ret |= ret >> 32;
    // all bits below the highest one are set now
    (ret >> 1) + 1
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn prev_power_of_two_small_values() {
        assert_eq!(prev_power_of_two(-3), 0);
        assert_eq!(prev_power_of_two(0), 0);
        assert_eq!(prev_power_of_two(1), 1);
        assert_eq!(prev_power_of_two(2), 2);
        assert_eq!(prev_power_of_two(3), 2);
        assert_eq!(prev_power_of_two(5), 4);
    }

    #[test]
    fn prev_power_of_two_around_1024() {
        assert_eq!(prev_power_of_two(1023), 512);
        assert_eq!(prev_power_of_two(1024), 1024);
        assert_eq!(prev_power_of_two(1025), 1024);
    }

    #[test]
    fn prev_power_of_two_large_values() {
        assert_eq!(prev_power_of_two(u32::MAX as i64), 1_i64 << 31);
        assert_eq!(prev_power_of_two(i64::MAX), 1_i64 << 62);
    }

    #[test]
    fn prev_power_of_two_is_power_of_2() {
        for v in 1_i64..5000 {
            let p = prev_power_of_two(v);
            assert!(is_power_of_2(p));
            assert!(p <= v && v < 2 * p);
        }
    }

    #[test]
    fn clamp_to_byte_range() {
        assert_eq!(clamp_t(-4.0, 0.0, 255.0), 0.0);
        assert_eq!(clamp_t(300.0, 0.0, 255.0), 255.0);
        assert_eq!(clamp_t(17.5, 0.0, 255.0), 17.5);
    }
}
