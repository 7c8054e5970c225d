//! Year ranges and sub-range splitting.

use serde::{Deserialize, Serialize};

use crate::YearRangeError;

/// A closed range of years `[start, end]` for data retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct YearRange {
    /// Start year (inclusive).
    pub start: i32,
    /// End year (inclusive).
    pub end: i32,
}

impl YearRange {
    /// Creates a new year range, validating that start <= end.
    ///
    /// # Errors
    ///
    /// Returns an error if start > end.
    pub const fn new(start: i32, end: i32) -> Result<Self, YearRangeError> {
        if start > end {
            return Err(YearRangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates a range covering a single year.
    #[must_use]
    pub const fn single_year(year: i32) -> Self {
        Self {
            start: year,
            end: year,
        }
    }

    /// Returns the number of years in the range, bounds included.
    #[must_use]
    pub const fn span(&self) -> u32 {
        self.end.abs_diff(self.start) + 1
    }

    /// Returns true if the range contains the given year.
    #[must_use]
    pub const fn contains(&self, year: i32) -> bool {
        year >= self.start && year <= self.end
    }

    /// Returns an iterator over consecutive sub-ranges of at most `max_span` years.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_span` is zero.
    pub const fn chunks(&self, max_span: u32) -> Result<SubRanges, YearRangeError> {
        if max_span == 0 {
            return Err(YearRangeError::InvalidSpan(max_span));
        }
        Ok(SubRanges {
            next_start: Some(self.start),
            end: self.end,
            max_span,
        })
    }

    /// Splits the range into consecutive sub-ranges of at most `max_span` years.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_span` is zero.
    pub fn split(&self, max_span: u32) -> Result<Vec<Self>, YearRangeError> {
        Ok(self.chunks(max_span)?.collect())
    }
}

impl std::fmt::Display for YearRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Splits `[min_year, max_year]` into ascending, non-overlapping chunks of at
/// most `max_span` years whose union is exactly the input range.
///
/// The last chunk holds the remainder when the span does not divide evenly.
///
/// # Example
///
/// ```
/// use laborstat_types::{YearRange, split_years};
///
/// let chunks = split_years(1982, 2022, 20).unwrap();
/// assert_eq!(
///     chunks,
///     vec![
///         YearRange::new(1982, 2001).unwrap(),
///         YearRange::new(2002, 2021).unwrap(),
///         YearRange::single_year(2022),
///     ]
/// );
/// ```
///
/// # Errors
///
/// Returns an error if `min_year > max_year` or `max_span` is zero.
pub fn split_years(
    min_year: i32,
    max_year: i32,
    max_span: u32,
) -> Result<Vec<YearRange>, YearRangeError> {
    YearRange::new(min_year, max_year)?.split(max_span)
}

/// Iterator over the sub-ranges of a [`YearRange`].
#[derive(Debug, Clone)]
pub struct SubRanges {
    next_start: Option<i32>,
    end: i32,
    max_span: u32,
}

impl Iterator for SubRanges {
    type Item = YearRange;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.next_start?;
        // i64 so `start + max_span` cannot overflow near i32::MAX
        let last = i64::from(start) + i64::from(self.max_span) - 1;
        let chunk_end = last.min(i64::from(self.end)) as i32;

        self.next_start = if chunk_end < self.end {
            Some(chunk_end + 1)
        } else {
            None
        };

        Some(YearRange {
            start,
            end: chunk_end,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let Some(start) = self.next_start else {
            return (0, Some(0));
        };
        let remaining = u64::from(self.end.abs_diff(start)) + 1;
        let chunks = remaining.div_ceil(u64::from(self.max_span)) as usize;
        (chunks, Some(chunks))
    }
}

impl ExactSizeIterator for SubRanges {}

impl std::iter::FusedIterator for SubRanges {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn range(start: i32, end: i32) -> YearRange {
        YearRange::new(start, end).unwrap()
    }

    #[test]
    fn test_year_range_new() {
        let r = range(1982, 2022);
        assert_eq!(r.start, 1982);
        assert_eq!(r.end, 2022);
        assert_eq!(r.span(), 41);
    }

    #[test]
    fn test_year_range_invalid() {
        assert_eq!(
            YearRange::new(2022, 1982),
            Err(YearRangeError::InvalidRange {
                start: 2022,
                end: 1982
            })
        );
    }

    #[test]
    fn test_split_single_chunk() {
        assert_eq!(split_years(2002, 2021, 20).unwrap(), vec![range(2002, 2021)]);
    }

    #[test]
    fn test_split_exact_multiple() {
        assert_eq!(
            split_years(1982, 2021, 20).unwrap(),
            vec![range(1982, 2001), range(2002, 2021)]
        );
    }

    #[test]
    fn test_split_remainder_chunk() {
        assert_eq!(
            split_years(1982, 2022, 20).unwrap(),
            vec![range(1982, 2001), range(2002, 2021), range(2022, 2022)]
        );
    }

    #[test]
    fn test_split_single_year() {
        assert_eq!(split_years(2024, 2024, 20).unwrap(), vec![range(2024, 2024)]);
        assert_eq!(split_years(2020, 2022, 1).unwrap().len(), 3);
    }

    #[test]
    fn test_split_rejects_bad_input() {
        assert!(matches!(
            split_years(2022, 2021, 20),
            Err(YearRangeError::InvalidRange { .. })
        ));
        assert_eq!(
            split_years(2000, 2021, 0),
            Err(YearRangeError::InvalidSpan(0))
        );
    }

    #[test]
    fn test_chunks_exact_size() {
        let chunks = range(1982, 2022).chunks(20).unwrap();
        assert_eq!(chunks.len(), 3);
    }

    #[test]
    fn test_split_near_i32_max() {
        let chunks = split_years(i32::MAX - 2, i32::MAX, 20).unwrap();
        assert_eq!(chunks, vec![range(i32::MAX - 2, i32::MAX)]);
    }

    proptest! {
        #[test]
        fn split_covers_range_without_gaps(
            start in 1800i32..2100,
            len in 0i32..300,
            max_span in 1u32..50,
        ) {
            let end = start + len;
            let chunks = split_years(start, end, max_span).unwrap();

            prop_assert_eq!(chunks.first().map(|c| c.start), Some(start));
            prop_assert_eq!(chunks.last().map(|c| c.end), Some(end));
            for chunk in &chunks {
                prop_assert!(chunk.start <= chunk.end);
                prop_assert!(chunk.span() <= max_span);
            }
            for pair in chunks.windows(2) {
                prop_assert_eq!(pair[0].end + 1, pair[1].start);
            }
            let total: u32 = chunks.iter().map(YearRange::span).sum();
            prop_assert_eq!(total, range(start, end).span());
        }

        #[test]
        fn all_but_last_chunk_are_full(
            start in 1800i32..2100,
            len in 0i32..300,
            max_span in 1u32..50,
        ) {
            let chunks = split_years(start, start + len, max_span).unwrap();
            let (_, full) = chunks.split_last().unwrap();
            prop_assert!(full.iter().all(|c| c.span() == max_span));
        }
    }
}
