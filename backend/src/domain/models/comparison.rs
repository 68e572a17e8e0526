use super::aggregate::PeriodAggregate;
use super::expense::{Field, MONTHLY_CATEGORIES};
use super::period::Period;

/// Which side of a comparison holds the larger amount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoreIn {
    First,
    Second,
    Equal,
}

/// Absolute change of one amount between the earlier and the later period
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Delta {
    pub first: f64,
    pub second: f64,
    pub difference: f64,
    pub more_in: MoreIn,
}

impl Delta {
    pub fn between(first: f64, second: f64) -> Self {
        let more_in = if first == second {
            MoreIn::Equal
        } else if first > second {
            MoreIn::First
        } else {
            MoreIn::Second
        };
        Self {
            first,
            second,
            difference: (first - second).abs(),
            more_in,
        }
    }
}

/// The category with the largest absolute change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spike {
    Category(Field),
    /// Every category delta was zero
    None,
}

impl Spike {
    /// Largest strictly-greater delta wins; on ties the earlier category stays.
    pub fn detect(deltas: &[(Field, Delta)]) -> Self {
        let mut max_difference = 0.0;
        let mut spike = Spike::None;

        for (field, delta) in deltas {
            if delta.difference > max_difference {
                max_difference = delta.difference;
                spike = Spike::Category(*field);
            }
        }

        spike
    }

    pub fn reason(&self) -> String {
        match self {
            Spike::Category(field) => format!("Major difference was in {}", field.label()),
            Spike::None => "No significant spike".to_string(),
        }
    }
}

/// Two months of bills, in chronological order, with their differences
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodComparison {
    pub first: PeriodAggregate,
    pub second: PeriodAggregate,
    /// One entry per bill category, in [`MONTHLY_CATEGORIES`] order
    pub categories: Vec<(Field, Delta)>,
    pub total: Delta,
    pub spike: Spike,
}

impl PeriodComparison {
    /// Build from two aggregates given in any order
    pub fn new(a: PeriodAggregate, b: PeriodAggregate) -> Self {
        let (first, second) = if a.period <= b.period { (a, b) } else { (b, a) };

        let categories: Vec<(Field, Delta)> = MONTHLY_CATEGORIES
            .iter()
            .map(|field| {
                (
                    *field,
                    Delta::between(first.totals.get(*field), second.totals.get(*field)),
                )
            })
            .collect();
        let total = Delta::between(first.totals.total(), second.totals.total());
        let spike = Spike::detect(&categories);

        Self {
            first,
            second,
            categories,
            total,
            spike,
        }
    }

    pub fn delta(&self, field: Field) -> Option<&Delta> {
        self.categories
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, delta)| delta)
    }

    /// Label of the dominant period, or "Equal"
    pub fn more_in_label(&self, delta: &Delta) -> String {
        match delta.more_in {
            MoreIn::First => self.first.period.label(),
            MoreIn::Second => self.second.period.label(),
            MoreIn::Equal => "Equal".to_string(),
        }
    }

    pub fn periods(&self) -> (Period, Period) {
        (self.first.period, self.second.period)
    }
}
