//! Which years the date picker lets the user pick from.

use std::{collections::BTreeSet, ops::RangeInclusive};

/// How many years either side of today are offered without explicit bounds.
const DEFAULT_YEAR_SPAN: i32 = 10;

/// How many years either side of the displayed year are kept in the year
/// selector while navigating.
const NAVIGATION_YEAR_SPAN: i32 = 2;

/// Limits on the years the date picker offers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Restrictions {
    /// The earliest year offered.
    pub min_year: Option<i32>,
    /// The latest year offered.
    pub max_year: Option<i32>,
    /// Only offer the current year, whatever the other bounds say.
    pub current_year_only: bool,
}

/// A partial [Restrictions]. Fields left as `None` keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestrictionsUpdate {
    /// The new earliest year, `Some(None)` to remove the bound.
    pub min_year: Option<Option<i32>>,
    /// The new latest year, `Some(None)` to remove the bound.
    pub max_year: Option<Option<i32>>,
    /// The new current-year-only flag.
    pub current_year_only: Option<bool>,
}

impl RestrictionsUpdate {
    /// An update that changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the earliest year.
    pub fn min_year(mut self, year: i32) -> Self {
        self.min_year = Some(Some(year));
        self
    }

    /// Set the latest year.
    pub fn max_year(mut self, year: i32) -> Self {
        self.max_year = Some(Some(year));
        self
    }

    /// Remove both year bounds.
    pub fn clear_year_bounds(mut self) -> Self {
        self.min_year = Some(None);
        self.max_year = Some(None);
        self
    }

    /// Set the current-year-only flag.
    pub fn current_year_only(mut self, current_year_only: bool) -> Self {
        self.current_year_only = Some(current_year_only);
        self
    }
}

impl Restrictions {
    /// Only the year `this_year`.
    pub fn current_year(this_year: i32) -> Self {
        Self {
            min_year: Some(this_year),
            max_year: Some(this_year),
            current_year_only: true,
        }
    }

    /// Overwrite the fields that `update` sets.
    pub fn merge(&mut self, update: RestrictionsUpdate) {
        if let Some(min_year) = update.min_year {
            self.min_year = min_year;
        }
        if let Some(max_year) = update.max_year {
            self.max_year = max_year;
        }
        if let Some(current_year_only) = update.current_year_only {
            self.current_year_only = current_year_only;
        }
    }

    /// The years the year selector starts out with.
    pub fn initial_years(&self, this_year: i32) -> RangeInclusive<i32> {
        if self.current_year_only {
            return this_year..=this_year;
        }

        let start = self.min_year.unwrap_or(this_year - DEFAULT_YEAR_SPAN);
        let end = self.max_year.unwrap_or(this_year + DEFAULT_YEAR_SPAN);

        start..=end
    }

    /// Whether `year` may be displayed or selected.
    pub fn allows(&self, year: i32, this_year: i32) -> bool {
        if self.current_year_only {
            return year == this_year;
        }

        self.min_year.is_none_or(|min_year| year >= min_year)
            && self.max_year.is_none_or(|max_year| year <= max_year)
    }

    /// The year closest to `year` that may be displayed.
    pub fn clamp(&self, year: i32, this_year: i32) -> i32 {
        if self.current_year_only {
            return this_year;
        }

        let year = self.min_year.map_or(year, |min_year| year.max(min_year));
        self.max_year.map_or(year, |max_year| year.min(max_year))
    }
}

/// The years listed in the year selector, ascending and without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YearOptions {
    years: BTreeSet<i32>,
}

impl YearOptions {
    /// Replace the options with the years of `range`.
    pub fn populate(&mut self, range: RangeInclusive<i32>) {
        self.years = range.collect();
    }

    /// Add the years within two of `year`, skipping any that `restrictions`
    /// do not allow.
    pub fn expand_around(&mut self, year: i32, restrictions: &Restrictions, this_year: i32) {
        let nearby = (year - NAVIGATION_YEAR_SPAN)..=(year + NAVIGATION_YEAR_SPAN);

        self.years.extend(
            nearby.filter(|candidate| restrictions.allows(*candidate, this_year)),
        );
    }

    /// The options in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.years.iter().copied()
    }

    /// The options in ascending order.
    pub fn to_vec(&self) -> Vec<i32> {
        self.iter().collect()
    }
}
