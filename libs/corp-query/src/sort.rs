//! Sort resolution with deterministic defaults.

use crate::error::{QueryError, Result};
use crate::predicate::Record;
use crate::registry::{Entity, Field};
use std::cmp::Ordering;

/// Which search endpoint a request targets. Each target has a fixed join.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTarget {
    /// One row per corporation.
    Corporations,
    /// One row per corporate party.
    Parties,
}

impl SearchTarget {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Corporations => "corporation",
            Self::Parties => "person",
        }
    }

    /// Entities whose columns may be used as sort keys for this target.
    pub fn sortable_entities(self) -> &'static [Entity] {
        match self {
            Self::Corporations => &[
                Entity::Corporation,
                Entity::CorpName,
                Entity::CorpOpState,
                Entity::Address,
            ],
            Self::Parties => &[
                Entity::CorpParty,
                Entity::Corporation,
                Entity::CorpName,
                Entity::CorpOpState,
                Entity::Address,
            ],
        }
    }

    /// Unique per row; appended to every ordering so pages are stable.
    pub fn tiebreaker(self) -> Field {
        match self {
            Self::Corporations => Field::CorpNum,
            Self::Parties => Field::CorpPartyId,
        }
    }

    pub fn default_order(self) -> Vec<OrderKey> {
        match self {
            Self::Corporations => vec![
                OrderKey::asc(Field::CorpName),
                OrderKey::asc(Field::CorpNum),
            ],
            Self::Parties => vec![
                OrderKey::asc(Field::LastName),
                OrderKey::asc(Field::CorpNum),
                OrderKey::asc(Field::CorpPartyId),
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    /// `desc` sorts descending; anything else, including nothing, ascending.
    pub fn from_token(token: Option<&str>) -> Self {
        match token {
            Some("desc") => Self::Desc,
            _ => Self::Asc,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderKey {
    pub field: Field,
    pub direction: Direction,
}

impl OrderKey {
    pub fn asc(field: Field) -> Self {
        Self {
            field,
            direction: Direction::Asc,
        }
    }

    pub fn desc(field: Field) -> Self {
        Self {
            field,
            direction: Direction::Desc,
        }
    }
}

/// Resolve `sort_value` / `sort_type` into order keys for `target`.
///
/// Without a sort field the target's default order applies and the direction
/// token is ignored.
pub fn resolve_sort(
    target: SearchTarget,
    sort_value: Option<&str>,
    sort_type: Option<&str>,
) -> Result<Vec<OrderKey>> {
    let Some(token) = sort_value.filter(|s| !s.is_empty()) else {
        return Ok(target.default_order());
    };

    let field = Field::resolve(token)?;
    if !target.sortable_entities().contains(&field.entity()) {
        return Err(QueryError::InvalidField(format!(
            "{token} is not sortable for {} search",
            target.as_str()
        )));
    }

    let mut keys = vec![OrderKey {
        field,
        direction: Direction::from_token(sort_type),
    }];
    if field != target.tiebreaker() {
        keys.push(OrderKey::asc(target.tiebreaker()));
    }
    Ok(keys)
}

/// Compare two records under `keys`. NULLs sort last in either direction.
pub fn compare_records<R: Record + ?Sized>(a: &R, b: &R, keys: &[OrderKey]) -> Ordering {
    for key in keys {
        let ord = match (a.value(key.field), b.value(key.field)) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(x), Some(y)) => match key.direction {
                Direction::Asc => x.cmp_same(&y),
                Direction::Desc => y.cmp_same(&x),
            },
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}
