//! Search result projections.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::legacy::join_parts;

/// One corporation in a corporation search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorporationSummary {
    pub corp_nme: Option<String>,
    pub corp_num: String,
    pub corp_typ_cd: Option<String>,
    pub recognition_dts: Option<NaiveDate>,
    pub state_typ_cd: Option<String>,
    /// Office address lines 1 to 3 joined with ", ".
    pub addr: Option<String>,
    pub postal_cd: Option<String>,
}

/// One corporate party in a person search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartySummary {
    pub corp_party_id: i32,
    pub first_nme: Option<String>,
    pub middle_nme: Option<String>,
    pub last_nme: Option<String>,
    pub appointment_dt: Option<NaiveDate>,
    pub cessation_dt: Option<NaiveDate>,
    pub corp_num: Option<String>,
    pub party_typ_cd: Option<String>,
    pub corp_nme: Option<String>,
    /// Mailing address lines 1 to 3 joined with ", ".
    pub addr: Option<String>,
    pub postal_cd: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub state_typ_cd: Option<String>,
}

/// Flat row of the corporation search join, before address lines are merged.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CorporationRow {
    pub corp_nme: Option<String>,
    pub corp_num: String,
    pub corp_typ_cd: Option<String>,
    pub recognition_dts: Option<NaiveDate>,
    pub state_typ_cd: Option<String>,
    pub addr_line_1: Option<String>,
    pub addr_line_2: Option<String>,
    pub addr_line_3: Option<String>,
    pub postal_cd: Option<String>,
}

impl From<CorporationRow> for CorporationSummary {
    fn from(row: CorporationRow) -> Self {
        Self {
            addr: join_parts([&row.addr_line_1, &row.addr_line_2, &row.addr_line_3]),
            corp_nme: row.corp_nme,
            corp_num: row.corp_num,
            corp_typ_cd: row.corp_typ_cd,
            recognition_dts: row.recognition_dts,
            state_typ_cd: row.state_typ_cd,
            postal_cd: row.postal_cd,
        }
    }
}

/// Flat row of the party search join, before address lines are merged.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PartyRow {
    pub corp_party_id: i32,
    pub first_nme: Option<String>,
    pub middle_nme: Option<String>,
    pub last_nme: Option<String>,
    pub appointment_dt: Option<NaiveDate>,
    pub cessation_dt: Option<NaiveDate>,
    pub corp_num: Option<String>,
    pub party_typ_cd: Option<String>,
    pub corp_nme: Option<String>,
    pub addr_line_1: Option<String>,
    pub addr_line_2: Option<String>,
    pub addr_line_3: Option<String>,
    pub postal_cd: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub state_typ_cd: Option<String>,
}

impl From<PartyRow> for PartySummary {
    fn from(row: PartyRow) -> Self {
        Self {
            addr: join_parts([&row.addr_line_1, &row.addr_line_2, &row.addr_line_3]),
            corp_party_id: row.corp_party_id,
            first_nme: row.first_nme,
            middle_nme: row.middle_nme,
            last_nme: row.last_nme,
            appointment_dt: row.appointment_dt,
            cessation_dt: row.cessation_dt,
            corp_num: row.corp_num,
            party_typ_cd: row.party_typ_cd,
            corp_nme: row.corp_nme,
            postal_cd: row.postal_cd,
            city: row.city,
            province: row.province,
            state_typ_cd: row.state_typ_cd,
        }
    }
}

/// One page of search results.
///
/// `total` counts every row matching the predicate, not just this page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultPage<T> {
    pub results: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub page_size: u32,
}

impl<T> ResultPage<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> ResultPage<U> {
        ResultPage {
            results: self.results.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
        }
    }
}
