//! Detail views served by the lookup endpoints.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::legacy::{CorpName, CorpParty};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorporationDetail {
    pub corp_num: String,
    pub corp_typ_cd: Option<String>,
    pub recognition_dts: Option<NaiveDate>,
    pub last_ar_filed_dt: Option<NaiveDate>,
    pub transition_dt: Option<NaiveDate>,
    pub bn_9: Option<String>,
    pub bn_15: Option<String>,
    pub admin_email: Option<String>,
    /// Current name first, then historical names newest first.
    pub names: Vec<CorpName>,
    pub state: Option<StateView>,
    pub offices: Vec<OfficeView>,
}

/// Current operating state with its description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct StateView {
    pub state_typ_cd: Option<String>,
    pub op_state_typ_cd: Option<String>,
    pub short_desc: Option<String>,
    pub full_desc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfficeView {
    pub office_typ_cd: String,
    /// Display label, e.g. "Registered". `None` for codes without one.
    pub office_type: Option<String>,
    pub mailing_addr: String,
    pub delivery_addr: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyDetail {
    #[serde(flatten)]
    pub party: CorpParty,
    pub corp_nme: Option<String>,
    pub corp_typ_cd: Option<String>,
    pub admin_email: Option<String>,
    pub mailing_addr: String,
    pub delivery_addr: String,
}

/// One office held by a party, with the officer type description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct OfficeHeld {
    pub corp_party_id: i32,
    pub officer_typ_cd: String,
    pub short_desc: Option<String>,
    pub appointment_dt: Option<NaiveDate>,
    /// Time of the event that started the appointment.
    pub event_timestmp: Option<NaiveDateTime>,
    /// First line of the party's mailing address.
    pub addr_line_1: Option<String>,
}

/// Another party row linked to the one being viewed, by address or by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct RelatedParty {
    pub corp_party_id: i32,
    pub first_nme: Option<String>,
    pub middle_nme: Option<String>,
    pub last_nme: Option<String>,
    pub corp_num: Option<String>,
    pub party_typ_cd: Option<String>,
    pub appointment_dt: Option<NaiveDate>,
    pub cessation_dt: Option<NaiveDate>,
    pub event_timestmp: Option<NaiveDateTime>,
}

/// Filing behind the event that started a party's appointment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct FilingView {
    pub event_id: i32,
    pub event_timestmp: Option<NaiveDateTime>,
    pub filing_typ_cd: Option<String>,
    pub full_desc: Option<String>,
    pub effective_dt: Option<NaiveDate>,
}
