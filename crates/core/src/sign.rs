use std::fmt;

/// The sign class of a zero-crossing value.
///
/// A state event is triggered only by a strict flip between
/// [`Sign::Negative`] and [`Sign::Positive`]. Touching zero is a sign class
/// of its own so that it can be reported without counting as a crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    /// Value is strictly negative.
    Negative,
    /// Value is exactly zero (or not a number).
    Zero,
    /// Value is strictly positive.
    Positive,
}

impl Sign {
    /// Returns the sign class of a value.
    ///
    /// `NaN` compares neither above nor below zero and maps to [`Sign::Zero`].
    #[must_use]
    pub fn of(value: f64) -> Self {
        if value > 0.0 {
            Sign::Positive
        } else if value < 0.0 {
            Sign::Negative
        } else {
            Sign::Zero
        }
    }

    /// Returns true if `self` and `other` are strictly opposite.
    #[must_use]
    pub fn is_flip(self, other: Sign) -> bool {
        matches!(
            (self, other),
            (Sign::Negative, Sign::Positive) | (Sign::Positive, Sign::Negative)
        )
    }

    /// Returns the conventional integer value: `-1`, `0` or `+1`.
    #[must_use]
    pub fn as_i8(self) -> i8 {
        match self {
            Sign::Negative => -1,
            Sign::Zero => 0,
            Sign::Positive => 1,
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sign::Negative => f.write_str("-1"),
            Sign::Zero => f.write_str("0"),
            Sign::Positive => f.write_str("+1"),
        }
    }
}
