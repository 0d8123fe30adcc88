//! Derived figures computed from the review and like ledgers.

use super::Review;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Outcome of a like toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LikeAction {
    /// The membership was inserted.
    Liked,
    /// The membership was removed.
    Unliked,
}

impl LikeAction {
    /// Returns the canonical action name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Liked => "liked",
            Self::Unliked => "unliked",
        }
    }
}

impl fmt::Display for LikeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of flipping one `(user, task)` like membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeToggle {
    /// Which way the membership flipped.
    pub action: LikeAction,
    /// Like count right after the flip.
    pub count: u64,
}

/// Exact mean of a task's review ratings.
///
/// Kept as a sum and a count so equality is exact; [`Self::value`] gives the
/// floating-point mean. With no reviews the mean is exactly zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct AverageRating {
    sum: u32,
    count: u32,
}

impl AverageRating {
    /// Average of no reviews.
    pub const NONE: Self = Self { sum: 0, count: 0 };

    /// Computes the mean over every review, admin or not.
    #[must_use]
    pub fn from_reviews<'a>(reviews: impl IntoIterator<Item = &'a Review>) -> Self {
        reviews.into_iter().fold(Self::NONE, |acc, review| Self {
            sum: acc.sum.saturating_add(u32::from(review.rating().value())),
            count: acc.count.saturating_add(1),
        })
    }

    /// Creates an average representing a whole-number mean.
    #[must_use]
    pub const fn whole(value: u32) -> Self {
        Self {
            sum: value,
            count: 1,
        }
    }

    /// Creates an average from a rating sum and a review count.
    #[must_use]
    pub const fn from_parts(sum: u32, count: u32) -> Self {
        Self { sum, count }
    }

    /// Returns the number of reviews contributing to the mean.
    #[must_use]
    pub const fn review_count(self) -> u32 {
        self.count
    }

    /// Returns the sum of all ratings.
    #[must_use]
    pub const fn rating_sum(self) -> u32 {
        self.sum
    }

    /// Returns the mean, or `0.0` when there are no reviews.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "the mean is presented as a floating-point figure"
    )]
    pub fn value(self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        f64::from(self.sum) / f64::from(self.count)
    }

    /// Cross-multiplied numerators used for exact comparison.
    fn scaled(self, other: Self) -> (u64, u64) {
        let (left_sum, left_count) = self.normalised();
        let (right_sum, right_count) = other.normalised();
        (
            left_sum.saturating_mul(right_count),
            right_sum.saturating_mul(left_count),
        )
    }

    /// An empty average compares as `0 / 1`.
    fn normalised(self) -> (u64, u64) {
        if self.count == 0 {
            (0, 1)
        } else {
            (u64::from(self.sum), u64::from(self.count))
        }
    }
}

impl PartialEq for AverageRating {
    fn eq(&self, other: &Self) -> bool {
        let (left, right) = self.scaled(*other);
        left == right
    }
}

impl Eq for AverageRating {}

impl PartialOrd for AverageRating {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AverageRating {
    fn cmp(&self, other: &Self) -> Ordering {
        let (left, right) = self.scaled(*other);
        left.cmp(&right)
    }
}

impl fmt::Display for AverageRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.value())
    }
}

impl Serialize for AverageRating {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value())
    }
}
