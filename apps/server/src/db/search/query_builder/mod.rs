//! SQL query builder for registry searches.
//!
//! Every target has a fixed join. Only current name and state rows take part,
//! and each is reduced to one row per corporation so a party or corporation is
//! never repeated. Predicates are lowered with positional binds.

use corpsearch_query::{OrderKey, Predicate, SearchTarget};

mod bind;
mod filter;

use bind::push_int;
pub(crate) use filter::{alias, build_filter_sql};

/// Bind values for `sqlx` queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindValue {
    Text(String),
    Int(i64),
}

const CURRENT_NAME_AND_STATE: &str = r#"
LEFT JOIN LATERAL (
    SELECT n.corp_nme FROM corp_name n
    WHERE n.corp_num = c.corp_num AND n.end_event_id IS NULL
    ORDER BY n.corp_name_seq_num NULLS LAST
    LIMIT 1
) cn ON TRUE
LEFT JOIN LATERAL (
    SELECT s.state_typ_cd FROM corp_state s
    WHERE s.corp_num = c.corp_num AND s.end_event_id IS NULL
    ORDER BY s.start_event_id DESC NULLS LAST
    LIMIT 1
) cs ON TRUE
LEFT JOIN corp_op_state cos ON cos.state_typ_cd = cs.state_typ_cd"#;

const PARTY_COLUMNS: &str = "cp.corp_party_id, cp.first_nme, cp.middle_nme, cp.last_nme, \
     cp.appointment_dt, cp.cessation_dt, cp.corp_num, cp.party_typ_cd, cn.corp_nme, \
     a.addr_line_1, a.addr_line_2, a.addr_line_3, a.postal_cd, a.city, a.province, \
     cos.state_typ_cd";

const CORPORATION_COLUMNS: &str = "cn.corp_nme, c.corp_num, c.corp_typ_cd, c.recognition_dts, \
     cos.state_typ_cd, a.addr_line_1, a.addr_line_2, a.addr_line_3, a.postal_cd";

fn from_clause(target: SearchTarget) -> String {
    match target {
        SearchTarget::Parties => format!(
            "FROM corp_party cp\nJOIN corporation c ON c.corp_num = cp.corp_num{CURRENT_NAME_AND_STATE}\n\
             LEFT JOIN address a ON a.addr_id = cp.mailing_addr_id"
        ),
        // The registered office address stands for the corporation.
        SearchTarget::Corporations => format!(
            "FROM corporation c{CURRENT_NAME_AND_STATE}\n\
             LEFT JOIN LATERAL (\n    \
                 SELECT ad.addr_line_1, ad.addr_line_2, ad.addr_line_3, ad.postal_cd\n    \
                 FROM office o JOIN address ad ON ad.addr_id = o.mailing_addr_id\n    \
                 WHERE o.corp_num = c.corp_num AND o.end_event_id IS NULL\n    \
                 ORDER BY (o.office_typ_cd = 'RG') DESC, o.office_typ_cd\n    \
                 LIMIT 1\n\
             ) a ON TRUE"
        ),
    }
}

fn columns(target: SearchTarget) -> &'static str {
    match target {
        SearchTarget::Parties => PARTY_COLUMNS,
        SearchTarget::Corporations => CORPORATION_COLUMNS,
    }
}

/// Builds the page query and the matching count query for one search.
#[derive(Debug, Clone)]
pub struct QueryBuilder<'a> {
    target: SearchTarget,
    predicate: &'a Predicate,
    order: &'a [OrderKey],
    limit: i64,
    offset: i64,
}

impl<'a> QueryBuilder<'a> {
    pub fn new(
        target: SearchTarget,
        predicate: &'a Predicate,
        order: &'a [OrderKey],
        limit: i64,
        offset: i64,
    ) -> Self {
        Self {
            target,
            predicate,
            order,
            limit,
            offset,
        }
    }

    pub fn build_sql(&self) -> (String, Vec<BindValue>) {
        let mut bind_params = Vec::new();
        let filter = build_filter_sql(self.predicate, self.target, &mut bind_params);
        let order = self.build_order_by();
        let limit_idx = push_int(&mut bind_params, self.limit);
        let offset_idx = push_int(&mut bind_params, self.offset);

        let sql = format!(
            "SELECT {}\n{}\nWHERE {filter}\nORDER BY {order}\nLIMIT ${limit_idx} OFFSET ${offset_idx}",
            columns(self.target),
            from_clause(self.target),
        );
        (sql, bind_params)
    }

    pub fn build_count_sql(&self) -> (String, Vec<BindValue>) {
        let mut bind_params = Vec::new();
        let filter = build_filter_sql(self.predicate, self.target, &mut bind_params);
        let sql = format!(
            "SELECT COUNT(*)\n{}\nWHERE {filter}",
            from_clause(self.target)
        );
        (sql, bind_params)
    }

    fn build_order_by(&self) -> String {
        self.order
            .iter()
            .filter_map(|key| {
                // Unjoined entities are rejected by sort resolution.
                let table_alias = alias(self.target, key.field.entity())?;
                Some(format!(
                    "{table_alias}.{} {} NULLS LAST",
                    key.field.column(),
                    key.direction.as_sql()
                ))
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}
