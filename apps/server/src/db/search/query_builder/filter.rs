//! Lowering of predicate trees to SQL `WHERE` fragments.

use corpsearch_query::{Comparison, Entity, Field, Predicate, SearchTarget, ValueType};

use super::bind::push_text;
use super::BindValue;

/// Table alias of an entity inside a target's join.
///
/// `None` means the entity is not joined and is reached through a correlated
/// `EXISTS` instead (parties of a corporation).
pub(crate) fn alias(target: SearchTarget, entity: Entity) -> Option<&'static str> {
    match (target, entity) {
        (SearchTarget::Corporations, Entity::CorpParty) => None,
        (_, Entity::CorpParty) => Some("cp"),
        (_, Entity::Corporation) => Some("c"),
        (_, Entity::CorpName) => Some("cn"),
        (_, Entity::Address) => Some("a"),
        (_, Entity::CorpOpState) => Some("cos"),
    }
}

/// Column reference compared as text.
fn text_expr(table_alias: &str, field: Field) -> String {
    match field.value_type() {
        ValueType::Text => format!("{table_alias}.{}", field.column()),
        ValueType::Date | ValueType::Integer => format!("{table_alias}.{}::text", field.column()),
    }
}

pub(crate) fn build_filter_sql(
    predicate: &Predicate,
    target: SearchTarget,
    bind_params: &mut Vec<BindValue>,
) -> String {
    match predicate {
        Predicate::Compare(c) => build_comparison_sql(c, target, bind_params),
        Predicate::And(a, b) => format!(
            "({} AND {})",
            build_filter_sql(a, target, bind_params),
            build_filter_sql(b, target, bind_params)
        ),
        Predicate::Or(a, b) => format!(
            "({} OR {})",
            build_filter_sql(a, target, bind_params),
            build_filter_sql(b, target, bind_params)
        ),
    }
}

fn build_comparison_sql(
    comparison: &Comparison,
    target: SearchTarget,
    bind_params: &mut Vec<BindValue>,
) -> String {
    match alias(target, comparison.field.entity()) {
        Some(table_alias) => build_like_sql(comparison, table_alias, bind_params),
        None => format!(
            "EXISTS (SELECT 1 FROM corp_party pf WHERE pf.corp_num = c.corp_num AND {})",
            build_like_sql(comparison, "pf", bind_params)
        ),
    }
}

fn build_like_sql(
    comparison: &Comparison,
    table_alias: &str,
    bind_params: &mut Vec<BindValue>,
) -> String {
    let idx = push_text(bind_params, comparison.pattern());
    let like = format!(
        "{} ILIKE ${idx} ESCAPE '\\'",
        text_expr(table_alias, comparison.field)
    );
    if comparison.op.is_negated() {
        format!("NOT ({like})")
    } else {
        like
    }
}
