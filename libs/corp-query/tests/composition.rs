//! End-to-end composition: clauses → predicate → filter and order rows.

#![cfg(feature = "regex")]

use corpsearch_query::{
    combine, compare_records, compile_clause, resolve_sort, Clause, Field, FieldValue, Mode,
    Predicate, QueryError, Record, SearchTarget,
};

#[derive(Debug, Clone)]
struct Party {
    id: i64,
    first: &'static str,
    middle: Option<&'static str>,
    last: &'static str,
    corp_num: &'static str,
    state: &'static str,
    addr_line_1: Option<&'static str>,
}

impl Record for Party {
    fn value(&self, field: Field) -> Option<FieldValue<'_>> {
        match field {
            Field::CorpPartyId => Some(FieldValue::Integer(self.id)),
            Field::FirstName => Some(FieldValue::Text(self.first)),
            Field::MiddleName => self.middle.map(FieldValue::Text),
            Field::LastName => Some(FieldValue::Text(self.last)),
            Field::CorpNum => Some(FieldValue::Text(self.corp_num)),
            Field::StateType => Some(FieldValue::Text(self.state)),
            Field::AddrLine1 => self.addr_line_1.map(FieldValue::Text),
            _ => None,
        }
    }
}

fn party(id: i64, first: &'static str, last: &'static str, corp_num: &'static str) -> Party {
    Party {
        id,
        first,
        middle: None,
        last,
        corp_num,
        state: "ACT",
        addr_line_1: None,
    }
}

fn compile_all(clauses: &[Clause], mode: Mode) -> Result<Predicate, QueryError> {
    let predicates = clauses
        .iter()
        .map(compile_clause)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(combine(predicates, mode).expect("at least one clause"))
}

fn ids(rows: &[Party], predicate: &Predicate) -> Vec<i64> {
    rows.iter()
        .filter(|r| predicate.matches(*r))
        .map(|r| r.id)
        .collect()
}

#[test]
fn any_name_startswith_matches_any_name_part() {
    let mut rocco = party(3, "Anna", "Bell", "BC0000003");
    rocco.middle = Some("Rocco");
    let mut middle = party(4, "Jo", "Ng", "BC0000004");
    middle.middle = Some("Skye");
    let rows = vec![
        party(1, "Skyler", "Smith", "BC0000001"),
        party(2, "Luke", "Skywalker", "BC0000002"),
        rocco,
        middle,
        party(5, "Han", "Solo", "BC0000005"),
    ];

    let p = compile_all(&[Clause::new("any_name", "startswith", "SKY")], Mode::Any).unwrap();
    assert_eq!(ids(&rows, &p), vec![1, 2, 4]);
}

#[test]
fn historical_status_selects_everything_but_active() {
    let mut dissolved = party(1, "A", "A", "BC0000001");
    dissolved.state = "DIS";
    let active = party(2, "B", "B", "BC0000002");
    let rows = vec![dissolved, active];

    let his = compile_all(&[Clause::new("state_type_code", "exact", "HIS")], Mode::Any).unwrap();
    assert_eq!(ids(&rows, &his), vec![1]);

    let act = compile_all(&[Clause::new("state_type_code", "contains", "act")], Mode::Any).unwrap();
    assert_eq!(ids(&rows, &act), vec![2]);
}

#[test]
fn mode_all_intersects_and_any_unions() {
    let rows = vec![
        party(1, "Ann", "Little", "BC0000001"),
        party(2, "Ann", "Big", "BC0000002"),
        party(3, "Bob", "Little", "BC0000003"),
    ];
    let clauses = [
        Clause::new("first_nme", "exact", "ann"),
        Clause::new("last_nme", "exact", "little"),
    ];

    let all = compile_all(&clauses, Mode::from_token(Some("ALL"))).unwrap();
    assert_eq!(ids(&rows, &all), vec![1]);

    let any = compile_all(&clauses, Mode::from_token(Some("whatever"))).unwrap();
    assert_eq!(ids(&rows, &any), vec![1, 2, 3]);
}

#[test]
fn addr_searches_every_address_line() {
    let mut a = party(1, "A", "A", "BC0000001");
    a.addr_line_1 = Some("1200 Main St");
    let b = party(2, "B", "B", "BC0000002");
    let rows = vec![a, b];

    let p = compile_all(&[Clause::new("addr", "contains", "main")], Mode::Any).unwrap();
    assert_eq!(ids(&rows, &p), vec![1]);
}

#[test]
fn first_invalid_clause_fails_the_whole_request() {
    let err = compile_all(
        &[
            Clause::new("last_nme", "exact", "x"),
            Clause::new("password", "exact", "x"),
            Clause::new("city", "similar", "x"),
        ],
        Mode::All,
    )
    .unwrap_err();
    assert_eq!(err, QueryError::InvalidField("password".to_string()));
}

#[test]
fn default_party_order_is_stable_on_equal_last_names() {
    let mut rows = vec![
        party(7, "C", "Little", "BC0000009"),
        party(5, "A", "Little", "BC0000001"),
        party(6, "B", "Adams", "BC0000005"),
        party(4, "D", "Little", "BC0000001"),
    ];
    let keys = resolve_sort(SearchTarget::Parties, None, None).unwrap();
    rows.sort_by(|a, b| compare_records(a, b, &keys));
    let order: Vec<i64> = rows.iter().map(|r| r.id).collect();
    assert_eq!(order, vec![6, 4, 5, 7]);
}

#[test]
fn explicit_descending_sort_keeps_tiebreaker_ascending() {
    let mut rows = vec![
        party(2, "Ann", "X", "BC1"),
        party(1, "Ann", "Y", "BC2"),
        party(3, "Zed", "Z", "BC3"),
    ];
    let keys = resolve_sort(SearchTarget::Parties, Some("first_nme"), Some("desc")).unwrap();
    rows.sort_by(|a, b| compare_records(a, b, &keys));
    let order: Vec<i64> = rows.iter().map(|r| r.id).collect();
    assert_eq!(order, vec![3, 1, 2]);
}
