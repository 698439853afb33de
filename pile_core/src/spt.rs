//! SPT blow-count correction.
//!
//! Field N values above the threshold are damped: only half of the excess
//! over 15 blows is counted.

/// Blow count above which the field value is damped
pub const SPT_CAP_THRESHOLD: f64 = 15.0;

/// Fraction of the excess over the threshold that is retained
pub const SPT_EXCESS_FACTOR: f64 = 0.5;

/// Corrected N value for a raw field blow count.
///
/// ```rust
/// use pile_core::spt::correct_spt;
///
/// assert_eq!(correct_spt(10.0), 10.0);
/// assert_eq!(correct_spt(30.0), 22.5);
/// ```
pub fn correct_spt(field_spt: f64) -> f64 {
    if field_spt > SPT_CAP_THRESHOLD {
        SPT_CAP_THRESHOLD + SPT_EXCESS_FACTOR * (field_spt - SPT_CAP_THRESHOLD)
    } else {
        field_spt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_up_to_threshold() {
        for n in [0.0, 1.0, 7.5, 14.0, 15.0] {
            assert_eq!(correct_spt(n), n);
        }
    }

    #[test]
    fn test_damped_above_threshold() {
        assert_eq!(correct_spt(20.0), 17.5);
        assert_eq!(correct_spt(30.0), 15.0 + 0.5 * 15.0);
        assert_eq!(correct_spt(50.0), 32.5);
    }

    #[test]
    fn test_sublinear_and_monotonic() {
        let mut previous = correct_spt(15.0);
        for n in 16..=100 {
            let corrected = correct_spt(n as f64);
            assert!(corrected < n as f64);
            assert!(corrected > previous);
            previous = corrected;
        }
    }
}
