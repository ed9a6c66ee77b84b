//! In-memory registry store.
//!
//! Mirrors the joins and filtering of the PostgreSQL store over fixture rows.
//! Used by tests and by the server's `--fixtures` mode.

use anyhow::Context;
use async_trait::async_trait;
use corpsearch_query::{
    compare_records, escape_like, ilike, Comparison, Entity, Field, FieldValue, Predicate, Record,
    SearchTarget,
};
use serde::Deserialize;
use std::path::Path;

use crate::db::search::SearchQuery;
use crate::db::traits::SearchStore;
use crate::models::{
    Address, CorpName, CorpOpState, CorpParty, CorpState, Corporation, CorporationRow,
    CorporationSummary, Event, Filing, FilingType, FilingView, Office, OfficeHeld, OfficerType,
    OfficesHeld, PartyRow, PartySummary, RelatedParty, ResultPage, StateView,
};
use crate::Result;

/// Raw registry tables.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Fixtures {
    pub corporation: Vec<Corporation>,
    pub corp_name: Vec<CorpName>,
    pub corp_party: Vec<CorpParty>,
    pub address: Vec<Address>,
    pub corp_state: Vec<CorpState>,
    pub corp_op_state: Vec<CorpOpState>,
    pub office: Vec<Office>,
    pub offices_held: Vec<OfficesHeld>,
    pub officer_type: Vec<OfficerType>,
    pub event: Vec<Event>,
    pub filing: Vec<Filing>,
    pub filing_type: Vec<FilingType>,
}

impl Fixtures {
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading fixtures from {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("parsing fixtures from {}", path.display()))
    }

    pub fn with_corporation(mut self, corporation: Corporation) -> Self {
        self.corporation.push(corporation);
        self
    }

    pub fn with_name(mut self, name: CorpName) -> Self {
        self.corp_name.push(name);
        self
    }

    pub fn with_party(mut self, party: CorpParty) -> Self {
        self.corp_party.push(party);
        self
    }

    pub fn with_address(mut self, address: Address) -> Self {
        self.address.push(address);
        self
    }

    pub fn with_state(mut self, state: CorpState) -> Self {
        self.corp_state.push(state);
        self
    }

    pub fn with_op_state(mut self, op_state: CorpOpState) -> Self {
        self.corp_op_state.push(op_state);
        self
    }

    pub fn with_office(mut self, office: Office) -> Self {
        self.office.push(office);
        self
    }

    pub fn with_office_held(mut self, held: OfficesHeld) -> Self {
        self.offices_held.push(held);
        self
    }

    pub fn with_officer_type(mut self, officer_type: OfficerType) -> Self {
        self.officer_type.push(officer_type);
        self
    }

    pub fn with_event(mut self, event: Event) -> Self {
        self.event.push(event);
        self
    }

    pub fn with_filing(mut self, filing: Filing) -> Self {
        self.filing.push(filing);
        self
    }

    pub fn with_filing_type(mut self, filing_type: FilingType) -> Self {
        self.filing_type.push(filing_type);
        self
    }
}

pub struct MemoryStore {
    data: Fixtures,
}

fn text(v: &Option<String>) -> Option<FieldValue<'_>> {
    v.as_deref().map(FieldValue::Text)
}

fn party_value(party: &CorpParty, field: Field) -> Option<FieldValue<'_>> {
    match field {
        Field::FirstName => text(&party.first_nme),
        Field::MiddleName => text(&party.middle_nme),
        Field::LastName => text(&party.last_nme),
        Field::BusinessName => text(&party.business_nme),
        Field::PartyType => text(&party.party_typ_cd),
        Field::AppointmentDate => party.appointment_dt.map(FieldValue::Date),
        Field::CessationDate => party.cessation_dt.map(FieldValue::Date),
        Field::CorpPartyId => Some(FieldValue::Integer(i64::from(party.corp_party_id))),
        _ => None,
    }
}

/// Columns shared by both joins: corporation, current name, state, address.
struct CorpColumns<'a> {
    corp: &'a Corporation,
    name: Option<&'a str>,
    op_state: Option<&'a CorpOpState>,
    address: Option<&'a Address>,
}

impl CorpColumns<'_> {
    fn value(&self, field: Field) -> Option<FieldValue<'_>> {
        match field {
            Field::CorpNum => Some(FieldValue::Text(&self.corp.corp_num)),
            Field::CorpType => text(&self.corp.corp_typ_cd),
            Field::RecognitionDate => self.corp.recognition_dts.map(FieldValue::Date),
            Field::CorpName => self.name.map(FieldValue::Text),
            Field::StateType => self.op_state.map(|s| FieldValue::Text(&s.state_typ_cd)),
            Field::AddrLine1 => self.address.and_then(|a| text(&a.addr_line_1)),
            Field::AddrLine2 => self.address.and_then(|a| text(&a.addr_line_2)),
            Field::AddrLine3 => self.address.and_then(|a| text(&a.addr_line_3)),
            Field::PostalCode => self.address.and_then(|a| text(&a.postal_cd)),
            Field::City => self.address.and_then(|a| text(&a.city)),
            Field::Province => self.address.and_then(|a| text(&a.province)),
            _ => None,
        }
    }
}

struct PartyView<'a> {
    party: &'a CorpParty,
    corp: CorpColumns<'a>,
}

impl Record for PartyView<'_> {
    fn value(&self, field: Field) -> Option<FieldValue<'_>> {
        match field.entity() {
            Entity::CorpParty => party_value(self.party, field),
            _ => self.corp.value(field),
        }
    }
}

impl PartyView<'_> {
    fn to_row(&self) -> PartyRow {
        let address = self.corp.address;
        PartyRow {
            corp_party_id: self.party.corp_party_id,
            first_nme: self.party.first_nme.clone(),
            middle_nme: self.party.middle_nme.clone(),
            last_nme: self.party.last_nme.clone(),
            appointment_dt: self.party.appointment_dt,
            cessation_dt: self.party.cessation_dt,
            corp_num: self.party.corp_num.clone(),
            party_typ_cd: self.party.party_typ_cd.clone(),
            corp_nme: self.corp.name.map(str::to_string),
            addr_line_1: address.and_then(|a| a.addr_line_1.clone()),
            addr_line_2: address.and_then(|a| a.addr_line_2.clone()),
            addr_line_3: address.and_then(|a| a.addr_line_3.clone()),
            postal_cd: address.and_then(|a| a.postal_cd.clone()),
            city: address.and_then(|a| a.city.clone()),
            province: address.and_then(|a| a.province.clone()),
            state_typ_cd: self.corp.op_state.map(|s| s.state_typ_cd.clone()),
        }
    }
}

struct CorporationView<'a> {
    corp: CorpColumns<'a>,
    parties: Vec<&'a CorpParty>,
}

impl Record for CorporationView<'_> {
    fn value(&self, field: Field) -> Option<FieldValue<'_>> {
        self.corp.value(field)
    }
}

impl CorporationView<'_> {
    /// Party columns match when any party of the corporation matches.
    fn matches(&self, predicate: &Predicate) -> bool {
        predicate.evaluate(&mut |c: &Comparison| match c.field.entity() {
            Entity::CorpParty => self
                .parties
                .iter()
                .any(|p| c.matches_value(party_value(p, c.field).as_ref())),
            _ => c.matches_value(self.corp.value(c.field).as_ref()),
        })
    }

    fn to_row(&self) -> CorporationRow {
        let address = self.corp.address;
        CorporationRow {
            corp_nme: self.corp.name.map(str::to_string),
            corp_num: self.corp.corp.corp_num.clone(),
            corp_typ_cd: self.corp.corp.corp_typ_cd.clone(),
            recognition_dts: self.corp.corp.recognition_dts,
            state_typ_cd: self.corp.op_state.map(|s| s.state_typ_cd.clone()),
            addr_line_1: address.and_then(|a| a.addr_line_1.clone()),
            addr_line_2: address.and_then(|a| a.addr_line_2.clone()),
            addr_line_3: address.and_then(|a| a.addr_line_3.clone()),
            postal_cd: address.and_then(|a| a.postal_cd.clone()),
        }
    }
}

fn paginate<T>(mut rows: Vec<T>, query: &SearchQuery) -> ResultPage<T> {
    let total = rows.len() as i64;
    let offset = usize::try_from(query.offset()).unwrap_or(usize::MAX);
    let results = if offset >= rows.len() {
        Vec::new()
    } else {
        rows.drain(offset..)
            .take(query.page_size as usize)
            .collect()
    };
    ResultPage {
        results,
        total,
        page: query.page,
        page_size: query.page_size,
    }
}

impl MemoryStore {
    pub fn new(data: Fixtures) -> Self {
        Self { data }
    }

    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        Ok(Self::new(Fixtures::from_json_file(path)?))
    }

    fn find_corporation(&self, corp_num: &str) -> Option<&Corporation> {
        self.data.corporation.iter().find(|c| c.corp_num == corp_num)
    }

    fn find_address(&self, addr_id: Option<i32>) -> Option<&Address> {
        let addr_id = addr_id?;
        self.data.address.iter().find(|a| a.addr_id == addr_id)
    }

    /// Current name with the lowest sequence number.
    fn current_name(&self, corp_num: &str) -> Option<&str> {
        self.data
            .corp_name
            .iter()
            .filter(|n| n.corp_num == corp_num && n.end_event_id.is_none())
            .min_by_key(|n| (n.corp_name_seq_num.is_none(), n.corp_name_seq_num))
            .and_then(|n| n.corp_nme.as_deref())
    }

    /// Most recently started current state.
    fn current_state(&self, corp_num: &str) -> Option<&CorpState> {
        self.data
            .corp_state
            .iter()
            .filter(|s| s.corp_num == corp_num && s.end_event_id.is_none())
            .max_by_key(|s| (s.start_event_id.is_some(), s.start_event_id))
    }

    fn op_state(&self, state_typ_cd: Option<&str>) -> Option<&CorpOpState> {
        let code = state_typ_cd?;
        self.data
            .corp_op_state
            .iter()
            .find(|s| s.state_typ_cd == code)
    }

    /// Mailing address of the current office, registered office first.
    fn office_address(&self, corp_num: &str) -> Option<&Address> {
        let mut offices: Vec<&Office> = self
            .data
            .office
            .iter()
            .filter(|o| o.corp_num == corp_num && o.end_event_id.is_none())
            .collect();
        offices.sort_by(|a, b| {
            (a.office_typ_cd != "RG", &a.office_typ_cd)
                .cmp(&(b.office_typ_cd != "RG", &b.office_typ_cd))
        });
        offices
            .into_iter()
            .find_map(|o| self.find_address(o.mailing_addr_id))
    }

    fn find_party(&self, corp_party_id: i32) -> Option<&CorpParty> {
        self.data
            .corp_party
            .iter()
            .find(|p| p.corp_party_id == corp_party_id)
    }

    fn find_event(&self, event_id: Option<i32>) -> Option<&Event> {
        let event_id = event_id?;
        self.data.event.iter().find(|e| e.event_id == event_id)
    }

    fn related(&self, party: &CorpParty) -> RelatedParty {
        RelatedParty {
            corp_party_id: party.corp_party_id,
            first_nme: party.first_nme.clone(),
            middle_nme: party.middle_nme.clone(),
            last_nme: party.last_nme.clone(),
            corp_num: party.corp_num.clone(),
            party_typ_cd: party.party_typ_cd.clone(),
            appointment_dt: party.appointment_dt,
            cessation_dt: party.cessation_dt,
            event_timestmp: self
                .find_event(party.start_event_id)
                .and_then(|e| e.event_timestmp),
        }
    }

    fn related_where(&self, keep: impl Fn(&CorpParty) -> bool) -> Vec<RelatedParty> {
        let mut parties: Vec<&CorpParty> =
            self.data.corp_party.iter().filter(|p| keep(p)).collect();
        parties.sort_by_key(|p| p.corp_party_id);
        parties.into_iter().map(|p| self.related(p)).collect()
    }

    fn corp_columns<'a>(&'a self, corp: &'a Corporation) -> CorpColumns<'a> {
        let state = self.current_state(&corp.corp_num);
        CorpColumns {
            corp,
            name: self.current_name(&corp.corp_num),
            op_state: self.op_state(state.and_then(|s| s.state_typ_cd.as_deref())),
            address: self.office_address(&corp.corp_num),
        }
    }

    fn party_views(&self) -> Vec<PartyView<'_>> {
        self.data
            .corp_party
            .iter()
            .filter_map(|party| {
                let corp = self.find_corporation(party.corp_num.as_deref()?)?;
                let mut columns = self.corp_columns(corp);
                columns.address = self.find_address(party.mailing_addr_id);
                Some(PartyView {
                    party,
                    corp: columns,
                })
            })
            .collect()
    }

    fn corporation_views(&self) -> Vec<CorporationView<'_>> {
        self.data
            .corporation
            .iter()
            .map(|corp| CorporationView {
                corp: self.corp_columns(corp),
                parties: self
                    .data
                    .corp_party
                    .iter()
                    .filter(|p| p.corp_num.as_deref() == Some(corp.corp_num.as_str()))
                    .collect(),
            })
            .collect()
    }
}

#[async_trait]
impl SearchStore for MemoryStore {
    async fn search_corporations(
        &self,
        query: &SearchQuery,
    ) -> Result<ResultPage<CorporationSummary>> {
        debug_assert_eq!(query.target, SearchTarget::Corporations);
        let mut views: Vec<_> = self
            .corporation_views()
            .into_iter()
            .filter(|v| v.matches(&query.predicate))
            .collect();
        views.sort_by(|a, b| compare_records(a, b, &query.order));
        Ok(paginate(views, query).map(|v| CorporationSummary::from(v.to_row())))
    }

    async fn search_parties(&self, query: &SearchQuery) -> Result<ResultPage<PartySummary>> {
        debug_assert_eq!(query.target, SearchTarget::Parties);
        let mut views: Vec<_> = self
            .party_views()
            .into_iter()
            .filter(|v| query.predicate.matches(v))
            .collect();
        views.sort_by(|a, b| compare_records(a, b, &query.order));
        Ok(paginate(views, query).map(|v| PartySummary::from(v.to_row())))
    }

    async fn corporation(&self, corp_num: &str) -> Result<Option<Corporation>> {
        Ok(self.find_corporation(corp_num).cloned())
    }

    async fn corp_names(&self, corp_num: &str) -> Result<Vec<CorpName>> {
        let mut names: Vec<CorpName> = self
            .data
            .corp_name
            .iter()
            .filter(|n| n.corp_num == corp_num)
            .cloned()
            .collect();
        // Current (open) names first, then by most recent end event.
        names.sort_by(|a, b| {
            let end = |n: &CorpName| std::cmp::Reverse((n.end_event_id.is_none(), n.end_event_id));
            (end(a), a.corp_name_seq_num).cmp(&(end(b), b.corp_name_seq_num))
        });
        Ok(names)
    }

    async fn corp_state(&self, corp_num: &str) -> Result<Option<StateView>> {
        Ok(self.current_state(corp_num).map(|state| {
            let op = self.op_state(state.state_typ_cd.as_deref());
            StateView {
                state_typ_cd: state.state_typ_cd.clone(),
                op_state_typ_cd: op.and_then(|o| o.op_state_typ_cd.clone()),
                short_desc: op.and_then(|o| o.short_desc.clone()),
                full_desc: op.and_then(|o| o.full_desc.clone()),
            }
        }))
    }

    async fn offices(&self, corp_num: &str) -> Result<Vec<Office>> {
        let mut offices: Vec<Office> = self
            .data
            .office
            .iter()
            .filter(|o| o.corp_num == corp_num && o.end_event_id.is_none())
            .cloned()
            .collect();
        offices.sort_by(|a, b| a.office_typ_cd.cmp(&b.office_typ_cd));
        Ok(offices)
    }

    async fn address(&self, addr_id: i32) -> Result<Option<Address>> {
        Ok(self.find_address(Some(addr_id)).cloned())
    }

    async fn corp_party(&self, corp_party_id: i32) -> Result<Option<CorpParty>> {
        Ok(self.find_party(corp_party_id).cloned())
    }

    async fn offices_held(&self, corp_party_id: i32) -> Result<Vec<OfficeHeld>> {
        let Some(party) = self.find_party(corp_party_id) else {
            return Ok(Vec::new());
        };
        let event_timestmp = self
            .find_event(party.start_event_id)
            .and_then(|e| e.event_timestmp);
        let addr_line_1 = self
            .find_address(party.mailing_addr_id)
            .and_then(|a| a.addr_line_1.clone());
        let mut held: Vec<OfficeHeld> = self
            .data
            .offices_held
            .iter()
            .filter(|h| h.corp_party_id == corp_party_id)
            .map(|h| OfficeHeld {
                corp_party_id,
                officer_typ_cd: h.officer_typ_cd.clone(),
                short_desc: self
                    .data
                    .officer_type
                    .iter()
                    .find(|t| t.officer_typ_cd == h.officer_typ_cd)
                    .and_then(|t| t.short_desc.clone()),
                appointment_dt: party.appointment_dt,
                event_timestmp,
                addr_line_1: addr_line_1.clone(),
            })
            .collect();
        held.sort_by(|a, b| a.officer_typ_cd.cmp(&b.officer_typ_cd));
        Ok(held)
    }

    async fn parties_at_addresses(
        &self,
        mailing_addr_id: Option<i32>,
        delivery_addr_id: Option<i32>,
    ) -> Result<Vec<RelatedParty>> {
        let same = |a: Option<i32>, b: Option<i32>| a.is_some() && a == b;
        Ok(self.related_where(|p| {
            same(p.mailing_addr_id, mailing_addr_id) || same(p.delivery_addr_id, delivery_addr_id)
        }))
    }

    async fn parties_with_name(
        &self,
        first_nme: Option<&str>,
        last_nme: Option<&str>,
        corp_num: Option<&str>,
    ) -> Result<Vec<RelatedParty>> {
        // Unset criteria pass; a NULL column never equals a set one.
        let equal = |column: &Option<String>, wanted: Option<&str>| match wanted {
            None => true,
            Some(wanted) => column
                .as_deref()
                .is_some_and(|value| ilike(value, &escape_like(wanted))),
        };
        Ok(self.related_where(|p| {
            equal(&p.first_nme, first_nme)
                && equal(&p.last_nme, last_nme)
                && equal(&p.corp_num, corp_num)
        }))
    }

    async fn party_filings(&self, corp_party_id: i32) -> Result<Vec<FilingView>> {
        let Some(event) = self
            .find_party(corp_party_id)
            .and_then(|p| self.find_event(p.start_event_id))
        else {
            return Ok(Vec::new());
        };
        let mut filings: Vec<FilingView> = self
            .data
            .filing
            .iter()
            .filter(|f| f.event_id == event.event_id)
            .map(|f| FilingView {
                event_id: f.event_id,
                event_timestmp: event.event_timestmp,
                filing_typ_cd: f.filing_typ_cd.clone(),
                full_desc: self
                    .data
                    .filing_type
                    .iter()
                    .find(|t| f.filing_typ_cd.as_deref() == Some(t.filing_typ_cd.as_str()))
                    .and_then(|t| t.full_desc.clone()),
                effective_dt: f.effective_dt,
            })
            .collect();
        filings.sort_by(|a, b| a.filing_typ_cd.cmp(&b.filing_typ_cd));
        Ok(filings)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
