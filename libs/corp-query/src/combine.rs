//! Folding compiled clauses into a single predicate.

use crate::predicate::Predicate;

/// How multiple clauses are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Every clause must hold (`mode=ALL`).
    All,
    /// At least one clause must hold. Used for any other or missing token.
    #[default]
    Any,
}

impl Mode {
    pub fn from_token(token: Option<&str>) -> Self {
        match token {
            Some("ALL") => Self::All,
            _ => Self::Any,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Any => "any",
        }
    }
}

/// Left fold of `predicates` seeded with the first one.
///
/// A single predicate is returned unchanged. Returns `None` for an empty list;
/// callers reject requests without clauses before getting here.
pub fn combine(predicates: Vec<Predicate>, mode: Mode) -> Option<Predicate> {
    let mut iter = predicates.into_iter();
    let first = iter.next()?;
    Some(iter.fold(first, |acc, next| match mode {
        Mode::All => acc.and(next),
        Mode::Any => acc.or(next),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::Operator;
    use crate::registry::Field;

    fn p(field: Field) -> Predicate {
        Predicate::compare(field, Operator::Exact, "x")
    }

    #[test]
    fn mode_token_is_case_sensitive() {
        assert_eq!(Mode::from_token(Some("ALL")), Mode::All);
        assert_eq!(Mode::from_token(Some("all")), Mode::Any);
        assert_eq!(Mode::from_token(Some("ANY")), Mode::Any);
        assert_eq!(Mode::from_token(None), Mode::Any);
    }

    #[test]
    fn all_folds_left_with_and() {
        let combined = combine(
            vec![p(Field::FirstName), p(Field::LastName), p(Field::City)],
            Mode::All,
        );
        let expected = p(Field::FirstName).and(p(Field::LastName)).and(p(Field::City));
        assert_eq!(combined, Some(expected));
    }

    #[test]
    fn any_folds_left_with_or() {
        let combined = combine(
            vec![p(Field::FirstName), p(Field::LastName), p(Field::City)],
            Mode::Any,
        );
        let expected = p(Field::FirstName).or(p(Field::LastName)).or(p(Field::City));
        assert_eq!(combined, Some(expected));
    }

    #[test]
    fn single_predicate_is_unchanged() {
        assert_eq!(combine(vec![p(Field::City)], Mode::All), Some(p(Field::City)));
        assert_eq!(combine(vec![p(Field::City)], Mode::Any), Some(p(Field::City)));
    }

    #[test]
    fn empty_list_has_no_predicate() {
        assert_eq!(combine(Vec::new(), Mode::All), None);
    }
}
