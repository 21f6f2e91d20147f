use std::{fmt, iter::Sum, ops::Add, str::FromStr};

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Monetary amount represented as **integer cents**.
///
/// Use this type for every amount the client holds (list entries, totals,
/// form drafts) to avoid floating-point drift in sums.
///
/// The wire format of the expenses service is a JSON decimal number in major
/// units, so serialization converts at the boundary: `Amount::new(1250)`
/// serializes as `12.5` and `40` deserializes as `Amount::new(4000)`.
///
/// # Examples
///
/// ```rust
/// use api_types::Amount;
///
/// let amount: Amount = "12,50".parse().unwrap();
/// assert_eq!(amount.cents(), 1250);
/// assert_eq!(amount.to_string(), "12.50€");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Amount(i64);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("empty amount")]
    Empty,
    #[error("invalid amount")]
    Invalid,
    #[error("too many decimals")]
    TooManyDecimals,
    #[error("amount too large")]
    Overflow,
}

impl Amount {
    pub const ZERO: Amount = Amount(0);

    /// Creates a new amount from integer cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is strictly positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Converts a major-unit decimal (the wire representation) into cents,
    /// rounding to the nearest cent.
    pub fn from_major(value: f64) -> Result<Self, AmountError> {
        if !value.is_finite() {
            return Err(AmountError::Invalid);
        }
        let cents = (value * 100.0).round();
        if cents < i64::MIN as f64 || cents > i64::MAX as f64 {
            return Err(AmountError::Overflow);
        }
        Ok(Self(cents as i64))
    }

    /// Returns the major-unit decimal used on the wire.
    #[must_use]
    pub fn to_major(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}€", abs / 100, abs % 100)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    /// Parses a user-entered decimal string into cents.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading `+`.
    /// Rejects empty strings, more than two fractional digits and anything
    /// that is not a plain decimal. Expenses are entered as positive
    /// quantities, so a leading `-` is rejected too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AmountError::Empty);
        }

        let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
        if digits.is_empty() {
            return Err(AmountError::Empty);
        }

        let normalized = digits.replace(',', ".");
        let (major_str, frac_str) = match normalized.split_once('.') {
            Some((major, frac)) => (major, frac),
            None => (normalized.as_str(), ""),
        };

        if major_str.is_empty() || !major_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AmountError::Invalid);
        }
        if !frac_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AmountError::Invalid);
        }

        let cents: i64 = match frac_str.len() {
            0 => 0,
            1 => frac_str.parse::<i64>().map_err(|_| AmountError::Invalid)? * 10,
            2 => frac_str.parse::<i64>().map_err(|_| AmountError::Invalid)?,
            _ => return Err(AmountError::TooManyDecimals),
        };

        let major: i64 = major_str.parse().map_err(|_| AmountError::Overflow)?;
        major
            .checked_mul(100)
            .and_then(|v| v.checked_add(cents))
            .map(Amount)
            .ok_or(AmountError::Overflow)
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Self::Output {
        Amount(self.0 + rhs.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_major())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Amount::from_major(value).map_err(serde::de::Error::custom)
    }
}

/// The closed set of expense classifications.
///
/// The wire keeps categories as plain strings (a record fetched from the
/// server may carry a value outside this set and must still render); this
/// enum models the fixed choices offered by the form picker and the filter
/// bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transportation,
    Entertainment,
    Shopping,
    Bills,
    Health,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Self::Food,
        Self::Transportation,
        Self::Entertainment,
        Self::Shopping,
        Self::Bills,
        Self::Health,
        Self::Other,
    ];

    /// Returns the canonical category string used on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transportation => "Transportation",
            Self::Entertainment => "Entertainment",
            Self::Shopping => "Shopping",
            Self::Bills => "Bills",
            Self::Health => "Health",
            Self::Other => "Other",
        }
    }

    /// Looks up a category by its wire string. Unknown values stay `None`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Category> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub mod expense {
    use super::*;

    /// Server-assigned expense identifier.
    ///
    /// The contract treats ids as opaque; deployed backends answer with
    /// either JSON numbers or JSON strings, so both shapes deserialize.
    /// Ids are only compared for equality and rendered into the DELETE
    /// path.
    #[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum ExpenseId {
        Number(i64),
        Text(String),
    }

    impl fmt::Display for ExpenseId {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Self::Number(n) => write!(f, "{n}"),
                Self::Text(s) => f.write_str(s),
            }
        }
    }

    /// One tracked transaction, as returned by `GET /expenses`.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct Expense {
        pub id: ExpenseId,
        pub amount: Amount,
        pub description: String,
        pub category: String,
        /// RFC3339 timestamp with the submitter's local offset.
        pub date: DateTime<FixedOffset>,
    }

    /// Request body for `POST /expenses`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub amount: Amount,
        pub description: String,
        pub category: Category,
        /// RFC3339 timestamp, generated client-side at submission time.
        pub date: DateTime<FixedOffset>,
    }
}

#[cfg(test)]
mod tests {
    use super::expense::{Expense, ExpenseId};
    use super::*;

    #[test]
    fn display_formats_cents() {
        assert_eq!(Amount::new(0).to_string(), "0.00€");
        assert_eq!(Amount::new(5).to_string(), "0.05€");
        assert_eq!(Amount::new(1250).to_string(), "12.50€");
        assert_eq!(Amount::new(-1250).to_string(), "-12.50€");
    }

    #[test]
    fn parse_accepts_dot_or_comma() {
        assert_eq!("20".parse::<Amount>().unwrap().cents(), 2000);
        assert_eq!("12.5".parse::<Amount>().unwrap().cents(), 1250);
        assert_eq!("12,50".parse::<Amount>().unwrap().cents(), 1250);
        assert_eq!("+3.99".parse::<Amount>().unwrap().cents(), 399);
        assert_eq!("  7.30 ".parse::<Amount>().unwrap().cents(), 730);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!("".parse::<Amount>(), Err(AmountError::Empty));
        assert_eq!("   ".parse::<Amount>(), Err(AmountError::Empty));
        assert_eq!("abc".parse::<Amount>(), Err(AmountError::Invalid));
        assert_eq!("12.3.4".parse::<Amount>(), Err(AmountError::Invalid));
        assert_eq!("-5".parse::<Amount>(), Err(AmountError::Invalid));
        assert_eq!("1e3".parse::<Amount>(), Err(AmountError::Invalid));
    }

    #[test]
    fn parse_rejects_more_than_two_decimals() {
        assert_eq!("12.345".parse::<Amount>(), Err(AmountError::TooManyDecimals));
        assert_eq!("0.001".parse::<Amount>(), Err(AmountError::TooManyDecimals));
    }

    #[test]
    fn amount_serializes_as_major_units() {
        assert_eq!(serde_json::to_string(&Amount::new(1250)).unwrap(), "12.5");
        assert_eq!(
            serde_json::from_str::<Amount>("12.5").unwrap(),
            Amount::new(1250)
        );
        // Integer wire values are valid decimals too.
        assert_eq!(
            serde_json::from_str::<Amount>("40").unwrap(),
            Amount::new(4000)
        );
    }

    #[test]
    fn amounts_sum_in_cents() {
        let total: Amount = [Amount::new(1250), Amount::new(4000)].into_iter().sum();
        assert_eq!(total, Amount::new(5250));
    }

    #[test]
    fn expense_id_accepts_numbers_and_strings() {
        let numeric: ExpenseId = serde_json::from_str("1").unwrap();
        assert_eq!(numeric, ExpenseId::Number(1));
        assert_eq!(numeric.to_string(), "1");

        let text: ExpenseId = serde_json::from_str("\"a1b2\"").unwrap();
        assert_eq!(text, ExpenseId::Text("a1b2".to_string()));
        assert_eq!(text.to_string(), "a1b2");
    }

    #[test]
    fn category_wire_names_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_name(category.as_str()), Some(category));
        }
        assert_eq!(Category::from_name("Gadgets"), None);
        assert_eq!(
            serde_json::to_string(&Category::Transportation).unwrap(),
            "\"Transportation\""
        );
    }

    #[test]
    fn expense_deserializes_unknown_categories() {
        let raw = r#"{
            "id": 7,
            "amount": 12.5,
            "description": "Pranzo",
            "category": "Gadgets",
            "date": "2026-08-05T12:30:00+02:00"
        }"#;
        let expense: Expense = serde_json::from_str(raw).unwrap();
        assert_eq!(expense.amount, Amount::new(1250));
        assert_eq!(expense.category, "Gadgets");
    }
}
