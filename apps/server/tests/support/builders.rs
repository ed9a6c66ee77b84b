use chrono::{NaiveDate, NaiveDateTime};
use corpsearch::db::Fixtures;
use corpsearch::models::{
    Address, CorpName, CorpOpState, CorpParty, CorpState, Corporation, Event, Filing, FilingType,
    Office, OfficerType, OfficesHeld,
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn timestamp(y: i32, m: u32, d: u32, hour: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(hour, 0, 0).expect("valid time")
}

pub fn corporation(corp_num: &str) -> Corporation {
    Corporation {
        corp_num: corp_num.to_string(),
        corp_typ_cd: Some("BC".to_string()),
        recognition_dts: None,
        last_ar_filed_dt: None,
        transition_dt: None,
        bn_9: None,
        bn_15: None,
        admin_email: None,
    }
}

pub fn name(corp_num: &str, corp_nme: &str) -> CorpName {
    CorpName {
        corp_num: corp_num.to_string(),
        corp_name_seq_num: Some(0),
        corp_name_typ_cd: Some("CO".to_string()),
        start_event_id: Some(1),
        end_event_id: None,
        srch_nme: Some(corp_nme.to_uppercase()),
        corp_nme: Some(corp_nme.to_string()),
    }
}

pub fn state(corp_num: &str, state_typ_cd: &str) -> CorpState {
    CorpState {
        corp_num: corp_num.to_string(),
        start_event_id: Some(1),
        end_event_id: None,
        state_typ_cd: Some(state_typ_cd.to_string()),
    }
}

pub fn op_state(state_typ_cd: &str, op_state_typ_cd: &str, short_desc: &str) -> CorpOpState {
    CorpOpState {
        state_typ_cd: state_typ_cd.to_string(),
        op_state_typ_cd: Some(op_state_typ_cd.to_string()),
        short_desc: Some(short_desc.to_string()),
        full_desc: Some(short_desc.to_string()),
    }
}

pub fn address(addr_id: i32, line_1: &str, city: &str) -> Address {
    Address {
        addr_id,
        province: Some("BC".to_string()),
        country_typ_cd: Some("CA".to_string()),
        postal_cd: Some("V8W 1A1".to_string()),
        addr_line_1: Some(line_1.to_string()),
        addr_line_2: None,
        addr_line_3: None,
        city: Some(city.to_string()),
    }
}

pub fn office(corp_num: &str, office_typ_cd: &str, mailing_addr_id: i32) -> Office {
    Office {
        corp_num: corp_num.to_string(),
        office_typ_cd: office_typ_cd.to_string(),
        start_event_id: Some(1),
        end_event_id: None,
        mailing_addr_id: Some(mailing_addr_id),
        delivery_addr_id: Some(mailing_addr_id),
    }
}

pub fn officer_type(code: &str, short_desc: &str) -> OfficerType {
    OfficerType {
        officer_typ_cd: code.to_string(),
        short_desc: Some(short_desc.to_string()),
        full_desc: None,
    }
}

pub fn office_held(corp_party_id: i32, code: &str) -> OfficesHeld {
    OfficesHeld {
        corp_party_id,
        officer_typ_cd: code.to_string(),
    }
}

pub fn event(event_id: i32, corp_num: &str, event_timestmp: NaiveDateTime) -> Event {
    Event {
        event_id,
        corp_num: Some(corp_num.to_string()),
        event_typ_cd: Some("FILE".to_string()),
        event_timestmp: Some(event_timestmp),
    }
}

pub fn filing(event_id: i32, filing_typ_cd: &str) -> Filing {
    Filing {
        event_id,
        filing_typ_cd: Some(filing_typ_cd.to_string()),
        effective_dt: None,
    }
}

pub fn filing_type(code: &str, full_desc: &str) -> FilingType {
    FilingType {
        filing_typ_cd: code.to_string(),
        short_desc: None,
        full_desc: Some(full_desc.to_string()),
    }
}

/// Builder for corporate party rows
pub struct PartyBuilder {
    party: CorpParty,
}

impl PartyBuilder {
    pub fn new(corp_party_id: i32, corp_num: &str) -> Self {
        Self {
            party: CorpParty {
                corp_party_id,
                mailing_addr_id: None,
                delivery_addr_id: None,
                corp_num: Some(corp_num.to_string()),
                party_typ_cd: Some("DIR".to_string()),
                start_event_id: Some(1),
                end_event_id: None,
                appointment_dt: None,
                cessation_dt: None,
                last_nme: None,
                middle_nme: None,
                first_nme: None,
                business_nme: None,
                bus_company_num: None,
                email_address: None,
            },
        }
    }

    pub fn first(mut self, first: &str) -> Self {
        self.party.first_nme = Some(first.to_string());
        self
    }

    pub fn middle(mut self, middle: &str) -> Self {
        self.party.middle_nme = Some(middle.to_string());
        self
    }

    pub fn last(mut self, last: &str) -> Self {
        self.party.last_nme = Some(last.to_string());
        self
    }

    pub fn mailing(mut self, addr_id: i32) -> Self {
        self.party.mailing_addr_id = Some(addr_id);
        self
    }

    pub fn delivery(mut self, addr_id: i32) -> Self {
        self.party.delivery_addr_id = Some(addr_id);
        self
    }

    pub fn started(mut self, event_id: i32) -> Self {
        self.party.start_event_id = Some(event_id);
        self
    }

    pub fn appointed(mut self, appointment_dt: chrono::NaiveDate) -> Self {
        self.party.appointment_dt = Some(appointment_dt);
        self
    }

    pub fn build(self) -> CorpParty {
        self.party
    }
}

/// An active and a dissolved corporation with their lookup rows.
pub fn registry() -> Fixtures {
    Fixtures::default()
        .with_op_state(op_state("ACT", "ACT", "Active"))
        .with_op_state(op_state("D1A", "HIS", "Dissolved"))
        .with_corporation(corporation("BC0460007"))
        .with_name(name("BC0460007", "Skyline Holdings Ltd"))
        .with_state(state("BC0460007", "ACT"))
        .with_corporation(corporation("BC0200001"))
        .with_name(name("BC0200001", "Harbour Freight Inc"))
        .with_state(state("BC0200001", "D1A"))
}
