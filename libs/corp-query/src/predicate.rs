//! Predicate tree produced by the compiler.
//!
//! The tree is independent of any query library. The server lowers it to SQL;
//! [`Predicate::matches`] evaluates it directly against an in-memory record.

use crate::error::QueryError;
use crate::like::escape_like;
#[cfg(feature = "regex")]
use crate::like::ilike;
use crate::registry::Field;
use chrono::NaiveDate;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Comparison operator named by a clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Contains,
    Exact,
    StartsWith,
    EndsWith,
    Wildcard,
    Excludes,
}

impl Operator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Contains => "contains",
            Self::Exact => "exact",
            Self::StartsWith => "startswith",
            Self::EndsWith => "endswith",
            Self::Wildcard => "wildcard",
            Self::Excludes => "excludes",
        }
    }

    /// `excludes` is the only operator that negates its match.
    pub fn is_negated(self) -> bool {
        matches!(self, Self::Excludes)
    }

    /// Build the `LIKE` pattern for an already lower-cased value.
    pub fn pattern(self, value: &str) -> String {
        match self {
            Self::Contains => format!("%{}%", escape_like(value)),
            Self::Exact | Self::Excludes => escape_like(value),
            Self::StartsWith => format!("{}%", escape_like(value)),
            Self::EndsWith => format!("%{}", escape_like(value)),
            // Users may type `*` or `%`; the engine only knows `%`.
            Self::Wildcard => {
                let mut pattern = value.replace('*', "%");
                // A pattern may not end in an unpaired escape.
                let trailing = pattern.chars().rev().take_while(|c| *c == '\\').count();
                if trailing % 2 == 1 {
                    pattern.push('\\');
                }
                pattern
            }
        }
    }
}

impl FromStr for Operator {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "contains" => Ok(Self::Contains),
            "exact" => Ok(Self::Exact),
            "startswith" => Ok(Self::StartsWith),
            "endswith" => Ok(Self::EndsWith),
            "wildcard" => Ok(Self::Wildcard),
            "excludes" => Ok(Self::Excludes),
            other => Err(QueryError::InvalidOperator(other.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One field compared against one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub field: Field,
    pub op: Operator,
    /// Lower-cased comparison value, before pattern construction.
    pub value: String,
}

impl Comparison {
    pub fn new(field: Field, op: Operator, value: &str) -> Self {
        Self {
            field,
            op,
            value: value.to_lowercase(),
        }
    }

    pub fn pattern(&self) -> String {
        self.op.pattern(&self.value)
    }

    /// Test a single column value. A missing value never matches, negated or
    /// not (SQL NULL semantics).
    #[cfg(feature = "regex")]
    pub fn matches_value(&self, value: Option<&FieldValue<'_>>) -> bool {
        let Some(value) = value else {
            return false;
        };
        let hit = ilike(&value.to_text(), &self.pattern());
        hit != self.op.is_negated()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Compare(Comparison),
    And(Box<Predicate>, Box<Predicate>),
    Or(Box<Predicate>, Box<Predicate>),
}

impl Predicate {
    pub fn compare(field: Field, op: Operator, value: &str) -> Self {
        Self::Compare(Comparison::new(field, op, value))
    }

    pub fn and(self, other: Predicate) -> Self {
        Self::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Predicate) -> Self {
        Self::Or(Box::new(self), Box::new(other))
    }

    #[cfg(feature = "regex")]
    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        self.evaluate(&mut |c: &Comparison| c.matches_value(record.value(c.field).as_ref()))
    }

    /// Evaluate the tree with a caller-supplied leaf test, short-circuiting
    /// like SQL `AND`/`OR`.
    pub fn evaluate<F>(&self, leaf: &mut F) -> bool
    where
        F: FnMut(&Comparison) -> bool,
    {
        match self {
            Self::Compare(c) => leaf(c),
            Self::And(a, b) => a.evaluate(leaf) && b.evaluate(leaf),
            Self::Or(a, b) => a.evaluate(leaf) || b.evaluate(leaf),
        }
    }

    /// Leaf comparisons in left-to-right order.
    pub fn comparisons(&self) -> Vec<&Comparison> {
        let mut out = Vec::new();
        self.collect_comparisons(&mut out);
        out
    }

    fn collect_comparisons<'a>(&'a self, out: &mut Vec<&'a Comparison>) {
        match self {
            Self::Compare(c) => out.push(c),
            Self::And(a, b) | Self::Or(a, b) => {
                a.collect_comparisons(out);
                b.collect_comparisons(out);
            }
        }
    }
}

/// A typed column value read from a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Date(NaiveDate),
    Integer(i64),
}

impl FieldValue<'_> {
    /// Text rendering used for comparisons (matches Postgres `::text` output).
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(s) => Cow::Borrowed(s),
            Self::Date(d) => Cow::Owned(d.format("%Y-%m-%d").to_string()),
            Self::Integer(i) => Cow::Owned(i.to_string()),
        }
    }

    /// Ordering between values of the same column. Text orders by its
    /// lower-cased form first, close to a case-insensitive database collation.
    pub fn cmp_same(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Integer(a), Self::Integer(b)) => a.cmp(b),
            _ => self.to_text().cmp(&other.to_text()),
        }
    }
}

/// A joined row that can be filtered and sorted by registry fields.
pub trait Record {
    /// Value of `field`, or `None` when the column is NULL or not joined.
    fn value(&self, field: Field) -> Option<FieldValue<'_>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct Row(HashMap<Field, &'static str>);

    impl Record for Row {
        fn value(&self, field: Field) -> Option<FieldValue<'_>> {
            self.0.get(&field).map(|v| FieldValue::Text(*v))
        }
    }

    fn row(pairs: &[(Field, &'static str)]) -> Row {
        Row(pairs.iter().copied().collect())
    }

    #[test]
    fn parses_operator_tokens() {
        for op in [
            Operator::Contains,
            Operator::Exact,
            Operator::StartsWith,
            Operator::EndsWith,
            Operator::Wildcard,
            Operator::Excludes,
        ] {
            assert_eq!(op.as_str().parse::<Operator>(), Ok(op));
        }
        assert_eq!(
            "Contains".parse::<Operator>(),
            Err(QueryError::InvalidOperator("Contains".to_string()))
        );
        assert!("like".parse::<Operator>().is_err());
    }

    #[test]
    fn builds_patterns() {
        assert_eq!(Operator::Contains.pattern("sky"), "%sky%");
        assert_eq!(Operator::Exact.pattern("sky"), "sky");
        assert_eq!(Operator::StartsWith.pattern("sky"), "sky%");
        assert_eq!(Operator::EndsWith.pattern("sky"), "%sky");
        assert_eq!(Operator::Wildcard.pattern("s*y%r"), "s%y%r");
        assert_eq!(Operator::Excludes.pattern("act"), "act");
        assert_eq!(Operator::Contains.pattern("5%"), "%5\\%%");
    }

    #[test]
    fn wildcard_pairs_a_trailing_escape() {
        assert_eq!(Operator::Wildcard.pattern("sky\\"), "sky\\\\");
        assert_eq!(Operator::Wildcard.pattern("sky\\\\"), "sky\\\\");
        assert_eq!(Operator::Wildcard.pattern("s\\_y*"), "s\\_y%");
    }

    #[test]
    #[cfg(feature = "regex")]
    fn wildcard_trailing_escape_matches_a_backslash() {
        let p = Predicate::compare(Field::LastName, Operator::Wildcard, "sky\\");
        assert!(!p.matches(&row(&[(Field::LastName, "Skywalker")])));
        assert!(p.matches(&row(&[(Field::LastName, "Sky\\")])));
    }

    #[test]
    fn text_orders_case_insensitively() {
        let (lower, upper) = (FieldValue::Text("dmitri"), FieldValue::Text("Lena"));
        assert_eq!(lower.cmp_same(&upper), Ordering::Less);
        assert_eq!(
            FieldValue::Text("Reyes").cmp_same(&FieldValue::Text("reyes")),
            Ordering::Less
        );
    }

    #[test]
    fn comparison_lowercases_value() {
        let c = Comparison::new(Field::LastName, Operator::StartsWith, "SKY");
        assert_eq!(c.value, "sky");
        assert_eq!(c.pattern(), "sky%");
    }

    #[test]
    #[cfg(feature = "regex")]
    fn operators_match_records() {
        let r = row(&[(Field::LastName, "Skywalker")]);
        let cases = [
            (Operator::Contains, "WALK", true),
            (Operator::Contains, "vader", false),
            (Operator::Exact, "skywalker", true),
            (Operator::Exact, "sky", false),
            (Operator::StartsWith, "sky", true),
            (Operator::StartsWith, "walker", false),
            (Operator::EndsWith, "walker", true),
            (Operator::EndsWith, "sky", false),
            (Operator::Wildcard, "s*w*r", true),
            (Operator::Wildcard, "s_y%", true),
            (Operator::Wildcard, "x*", false),
            (Operator::Excludes, "skywalker", false),
            (Operator::Excludes, "solo", true),
        ];
        for (op, value, expected) in cases {
            assert_eq!(
                Predicate::compare(Field::LastName, op, value).matches(&r),
                expected,
                "{op} {value}"
            );
        }
    }

    #[test]
    #[cfg(feature = "regex")]
    fn missing_value_never_matches() {
        let r = row(&[(Field::FirstName, "Luke")]);
        assert!(!Predicate::compare(Field::MiddleName, Operator::Contains, "").matches(&r));
        assert!(!Predicate::compare(Field::MiddleName, Operator::Excludes, "x").matches(&r));
    }

    #[test]
    #[cfg(feature = "regex")]
    fn dates_and_integers_compare_as_text() {
        struct Typed;
        impl Record for Typed {
            fn value(&self, field: Field) -> Option<FieldValue<'_>> {
                match field {
                    Field::AppointmentDate => {
                        NaiveDate::from_ymd_opt(2019, 3, 7).map(FieldValue::Date)
                    }
                    Field::CorpPartyId => Some(FieldValue::Integer(104_233)),
                    _ => None,
                }
            }
        }
        assert!(Predicate::compare(Field::AppointmentDate, Operator::StartsWith, "2019-03")
            .matches(&Typed));
        assert!(Predicate::compare(Field::CorpPartyId, Operator::Exact, "104233").matches(&Typed));
    }

    #[test]
    fn evaluate_uses_leaf_test() {
        let p = Predicate::compare(Field::FirstName, Operator::Exact, "a")
            .or(Predicate::compare(Field::LastName, Operator::Exact, "b"));
        let mut seen = Vec::new();
        let hit = p.evaluate(&mut |c: &Comparison| {
            seen.push(c.field);
            c.field == Field::FirstName
        });
        assert!(hit);
        assert_eq!(seen, vec![Field::FirstName]);
    }

    #[test]
    fn collects_leaves_in_order() {
        let p = Predicate::compare(Field::FirstName, Operator::Exact, "a")
            .or(Predicate::compare(Field::LastName, Operator::Exact, "b"))
            .and(Predicate::compare(Field::City, Operator::Exact, "c"));
        let fields: Vec<Field> = p.comparisons().iter().map(|c| c.field).collect();
        assert_eq!(fields, vec![Field::FirstName, Field::LastName, Field::City]);
    }
}
