//! Clause compilation: one (field, operator, value) triple to one predicate.

use crate::error::Result;
use crate::predicate::{Operator, Predicate};
use crate::registry::Field;

/// Synthetic field expanding to every part of a person's name.
pub const ANY_NAME: &str = "any_name";
const ANY_NAME_ALIAS: &str = "any_nme";
/// Synthetic field expanding to every address line.
pub const ANY_ADDRESS: &str = "addr";

/// Operating state code of an active corporation.
pub const STATE_ACTIVE: &str = "ACT";

const NAME_FIELDS: [Field; 3] = [Field::FirstName, Field::MiddleName, Field::LastName];
const ADDRESS_FIELDS: [Field; 3] = [Field::AddrLine1, Field::AddrLine2, Field::AddrLine3];

/// A raw search condition as supplied by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Clause {
    pub field: String,
    pub operator: String,
    pub value: String,
}

impl Clause {
    pub fn new(field: impl Into<String>, operator: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            value: value.into(),
        }
    }
}

/// Compile a clause against the field registry.
///
/// The operator is parsed before the field is resolved, so a clause with both
/// wrong reports the operator.
pub fn compile_clause(clause: &Clause) -> Result<Predicate> {
    let op: Operator = clause.operator.parse()?;
    let value = clause.value.as_str();

    match clause.field.as_str() {
        ANY_NAME | ANY_NAME_ALIAS => Ok(any_of(NAME_FIELDS, op, value)),
        ANY_ADDRESS => Ok(any_of(ADDRESS_FIELDS, op, value)),
        token => {
            let field = Field::resolve(token)?;
            if field == Field::StateType {
                return Ok(status_predicate(value));
            }
            Ok(Predicate::compare(field, op, value))
        }
    }
}

/// OR group over `fields`, all compared with the same operator and value.
fn any_of(fields: [Field; 3], op: Operator, value: &str) -> Predicate {
    let [first, rest @ ..] = fields;
    rest.into_iter()
        .fold(Predicate::compare(first, op, value), |acc, field| {
            acc.or(Predicate::compare(field, op, value))
        })
}

/// The status field only distinguishes active from everything else. The client
/// operator is ignored: the active code compiles to an exact match and any
/// other value to "not active", since non-active codes are open-ended.
fn status_predicate(value: &str) -> Predicate {
    if value.trim().eq_ignore_ascii_case(STATE_ACTIVE) {
        Predicate::compare(Field::StateType, Operator::Exact, STATE_ACTIVE)
    } else {
        Predicate::compare(Field::StateType, Operator::Excludes, STATE_ACTIVE)
    }
}
