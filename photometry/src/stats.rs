//! Order statistics over pixel samples.

use crate::error::StatsError;

/// Median of a sample of pixel values.
///
/// Averages the two central elements for even-length input. The slice is
/// copied and partially sorted; NaN values are pushed to the end of the
/// ordering rather than poisoning the comparison.
///
/// # Errors
///
/// [`StatsError::EmptyInput`] for an empty slice.
pub fn median(values: &[f64]) -> Result<f64, StatsError> {
    if values.is_empty() {
        return Err(StatsError::EmptyInput);
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Less));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Ok(sorted[mid])
    } else {
        Ok(0.5 * (sorted[mid - 1] + sorted[mid]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_median_odd_length() {
        assert_relative_eq!(median(&[3.0, 1.0, 2.0]).unwrap(), 2.0);
    }

    #[test]
    fn test_median_even_length() {
        assert_relative_eq!(median(&[4.0, 1.0, 3.0, 2.0]).unwrap(), 2.5);
    }

    #[test]
    fn test_median_single_value() {
        assert_relative_eq!(median(&[7.5]).unwrap(), 7.5);
    }

    #[test]
    fn test_median_empty_is_error() {
        assert_eq!(median(&[]), Err(StatsError::EmptyInput));
    }

    #[test]
    fn test_median_constant_sample() {
        assert_relative_eq!(median(&[5.0; 10]).unwrap(), 5.0);
    }
}
