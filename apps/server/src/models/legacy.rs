//! Row types for the externally owned registry schema.
//!
//! Field names and nullability follow the tables exactly; nothing here is
//! normalized. Event ids mark validity: a row whose `end_event_id` is NULL is
//! the current one.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Corporation {
    pub corp_num: String,
    #[serde(default)]
    pub corp_typ_cd: Option<String>,
    #[serde(default)]
    pub recognition_dts: Option<NaiveDate>,
    #[serde(default)]
    pub last_ar_filed_dt: Option<NaiveDate>,
    #[serde(default)]
    pub transition_dt: Option<NaiveDate>,
    #[serde(default)]
    pub bn_9: Option<String>,
    #[serde(default)]
    pub bn_15: Option<String>,
    #[serde(default)]
    pub admin_email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CorpName {
    pub corp_num: String,
    #[serde(default)]
    pub corp_name_seq_num: Option<i32>,
    #[serde(default)]
    pub corp_name_typ_cd: Option<String>,
    #[serde(default)]
    pub start_event_id: Option<i32>,
    #[serde(default)]
    pub end_event_id: Option<i32>,
    #[serde(default)]
    pub srch_nme: Option<String>,
    #[serde(default)]
    pub corp_nme: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CorpParty {
    pub corp_party_id: i32,
    #[serde(default)]
    pub mailing_addr_id: Option<i32>,
    #[serde(default)]
    pub delivery_addr_id: Option<i32>,
    #[serde(default)]
    pub corp_num: Option<String>,
    #[serde(default)]
    pub party_typ_cd: Option<String>,
    #[serde(default)]
    pub start_event_id: Option<i32>,
    #[serde(default)]
    pub end_event_id: Option<i32>,
    #[serde(default)]
    pub appointment_dt: Option<NaiveDate>,
    #[serde(default)]
    pub cessation_dt: Option<NaiveDate>,
    #[serde(default)]
    pub last_nme: Option<String>,
    #[serde(default)]
    pub middle_nme: Option<String>,
    #[serde(default)]
    pub first_nme: Option<String>,
    #[serde(default)]
    pub business_nme: Option<String>,
    #[serde(default)]
    pub bus_company_num: Option<String>,
    #[serde(default)]
    pub email_address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Address {
    pub addr_id: i32,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub country_typ_cd: Option<String>,
    #[serde(default)]
    pub postal_cd: Option<String>,
    #[serde(default)]
    pub addr_line_1: Option<String>,
    #[serde(default)]
    pub addr_line_2: Option<String>,
    #[serde(default)]
    pub addr_line_3: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

impl Address {
    /// Lines 1 to 3 joined with ", ", skipping empty lines.
    pub fn street(&self) -> Option<String> {
        join_parts([&self.addr_line_1, &self.addr_line_2, &self.addr_line_3])
    }

    /// Street lines, city, province and country joined with ", ".
    pub fn full(&self) -> String {
        join_parts([
            &self.addr_line_1,
            &self.addr_line_2,
            &self.addr_line_3,
            &self.city,
            &self.province,
            &self.country_typ_cd,
        ])
        .unwrap_or_default()
    }
}

/// Join the non-empty parts with ", "; `None` when every part is empty.
pub fn join_parts<'a>(parts: impl IntoIterator<Item = &'a Option<String>>) -> Option<String> {
    let joined = parts
        .into_iter()
        .filter_map(|p| p.as_deref())
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    (!joined.is_empty()).then_some(joined)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CorpState {
    pub corp_num: String,
    #[serde(default)]
    pub start_event_id: Option<i32>,
    #[serde(default)]
    pub end_event_id: Option<i32>,
    #[serde(default)]
    pub state_typ_cd: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CorpOpState {
    pub state_typ_cd: String,
    #[serde(default)]
    pub op_state_typ_cd: Option<String>,
    #[serde(default)]
    pub short_desc: Option<String>,
    #[serde(default)]
    pub full_desc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Office {
    pub corp_num: String,
    pub office_typ_cd: String,
    #[serde(default)]
    pub start_event_id: Option<i32>,
    #[serde(default)]
    pub end_event_id: Option<i32>,
    #[serde(default)]
    pub mailing_addr_id: Option<i32>,
    #[serde(default)]
    pub delivery_addr_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct OfficesHeld {
    pub corp_party_id: i32,
    pub officer_typ_cd: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct OfficerType {
    pub officer_typ_cd: String,
    #[serde(default)]
    pub short_desc: Option<String>,
    #[serde(default)]
    pub full_desc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Event {
    pub event_id: i32,
    #[serde(default)]
    pub corp_num: Option<String>,
    #[serde(default)]
    pub event_typ_cd: Option<String>,
    #[serde(default)]
    pub event_timestmp: Option<NaiveDateTime>,
}

/// Filing recorded against an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Filing {
    pub event_id: i32,
    #[serde(default)]
    pub filing_typ_cd: Option<String>,
    #[serde(default)]
    pub effective_dt: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct FilingType {
    pub filing_typ_cd: String,
    #[serde(default)]
    pub short_desc: Option<String>,
    #[serde(default)]
    pub full_desc: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(lines: [Option<&str>; 3]) -> Address {
        Address {
            addr_id: 1,
            province: Some("BC".to_string()),
            country_typ_cd: Some("CA".to_string()),
            postal_cd: Some("V8W 1A1".to_string()),
            addr_line_1: lines[0].map(String::from),
            addr_line_2: lines[1].map(String::from),
            addr_line_3: lines[2].map(String::from),
            city: Some("Victoria".to_string()),
        }
    }

    #[test]
    fn street_skips_missing_lines() {
        let a = address([Some("1200 Main St"), None, Some("Unit 4")]);
        assert_eq!(a.street().as_deref(), Some("1200 Main St, Unit 4"));
        assert_eq!(address([None, Some(" "), None]).street(), None);
    }

    #[test]
    fn full_address_includes_city_and_country() {
        let a = address([Some("1200 Main St"), Some(""), None]);
        assert_eq!(a.full(), "1200 Main St, Victoria, BC, CA");
    }
}
