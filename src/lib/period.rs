//! An inclusive range of dates

use std::fmt;

use crate::lib::date::{self, Date};

/// `Between(a, b)` is the range from `a` to `b` inclusive
///
/// A range whose start is after its end is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Between<T>(pub T, pub T);

impl<T> Between<T>
where
    T: Ord,
{
    pub fn contains(&self, item: &T) -> bool {
        &self.0 <= item && item <= &self.1
    }

    pub fn is_empty(&self) -> bool {
        self.0 > self.1
    }
}

impl Between<Date> {
    /// Monday to Sunday window that contains `date`
    pub fn week_of(date: Date) -> Self {
        Self(date::start_of_week(date), date::end_of_week(date))
    }
}

impl fmt::Display for Between<Date> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_empty() {
            write!(f, "()")
        } else if self.0 == self.1 {
            write!(f, "{}", date::format_date(self.0))
        } else {
            write!(
                f,
                "{}..{}",
                date::format_date(self.0),
                date::format_date(self.1)
            )
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    macro_rules! dt {
        ( $y:tt - $m:tt - $d:tt ) => {
            Date::from_ymd_opt($y, $m, $d).unwrap()
        };
    }

    #[test]
    fn inclusive_bounds() {
        let week = Between::week_of(dt!(2024-3-6));
        assert_eq!(week, Between(dt!(2024-3-4), dt!(2024-3-10)));
        assert!(week.contains(&dt!(2024-3-4)));
        assert!(week.contains(&dt!(2024-3-10)));
        assert!(!week.contains(&dt!(2024-3-3)));
        assert!(!week.contains(&dt!(2024-3-11)));
    }

    #[test]
    fn emptiness() {
        assert!(!Between(4, 4).is_empty());
        assert!(Between(5, 4).is_empty());
        assert!(!Between(5, 4).contains(&4));
    }

    #[test]
    fn display() {
        assert_eq!(
            Between::week_of(dt!(2024-3-6)).to_string(),
            "2024-03-04..2024-03-10"
        );
        assert_eq!(Between(dt!(2024-3-6), dt!(2024-3-6)).to_string(), "2024-03-06");
        assert_eq!(Between(dt!(2024-3-6), dt!(2024-3-5)).to_string(), "()");
    }
}
