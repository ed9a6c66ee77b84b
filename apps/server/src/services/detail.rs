//! Detail lookups for a single corporation or party.

use std::sync::Arc;

use crate::{
    db::SearchStore,
    models::{
        CorpParty, CorporationDetail, FilingView, OfficeHeld, OfficeView, PartyDetail,
        RelatedParty,
    },
    Error, Result,
};

/// Display label of an office type code.
pub fn format_office_type(office_typ_cd: &str) -> Option<&'static str> {
    match office_typ_cd {
        "RG" => Some("Registered"),
        "RC" => Some("Records"),
        _ => None,
    }
}

pub struct DetailService {
    store: Arc<dyn SearchStore>,
}

impl DetailService {
    pub fn new(store: Arc<dyn SearchStore>) -> Self {
        Self { store }
    }

    async fn formatted_address(&self, addr_id: Option<i32>) -> Result<String> {
        let Some(addr_id) = addr_id else {
            return Ok(String::new());
        };
        Ok(self
            .store
            .address(addr_id)
            .await?
            .map(|a| a.full())
            .unwrap_or_default())
    }

    pub async fn corporation(&self, corp_num: &str) -> Result<CorporationDetail> {
        let corp = self
            .store
            .corporation(corp_num)
            .await?
            .ok_or_else(|| Error::NotFound(format!("corporation {corp_num} not found")))?;

        let names = self.store.corp_names(corp_num).await?;
        let state = self.store.corp_state(corp_num).await?;

        let mut offices = Vec::new();
        for office in self.store.offices(corp_num).await? {
            offices.push(OfficeView {
                office_type: format_office_type(&office.office_typ_cd).map(str::to_string),
                mailing_addr: self.formatted_address(office.mailing_addr_id).await?,
                delivery_addr: self.formatted_address(office.delivery_addr_id).await?,
                office_typ_cd: office.office_typ_cd,
            });
        }

        Ok(CorporationDetail {
            corp_num: corp.corp_num,
            corp_typ_cd: corp.corp_typ_cd,
            recognition_dts: corp.recognition_dts,
            last_ar_filed_dt: corp.last_ar_filed_dt,
            transition_dt: corp.transition_dt,
            bn_9: corp.bn_9,
            bn_15: corp.bn_15,
            admin_email: corp.admin_email,
            names,
            state,
            offices,
        })
    }

    async fn find_party(&self, corp_party_id: i32) -> Result<CorpParty> {
        self.store
            .corp_party(corp_party_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("person {corp_party_id} not found")))
    }

    pub async fn party(&self, corp_party_id: i32) -> Result<PartyDetail> {
        let party = self.find_party(corp_party_id).await?;

        let (corp_nme, corporation) = match party.corp_num.as_deref() {
            Some(corp_num) => (
                self.store
                    .corp_names(corp_num)
                    .await?
                    .into_iter()
                    .find(|n| n.end_event_id.is_none())
                    .and_then(|n| n.corp_nme),
                self.store.corporation(corp_num).await?,
            ),
            None => (None, None),
        };
        let (corp_typ_cd, admin_email) = corporation
            .map(|c| (c.corp_typ_cd, c.admin_email))
            .unwrap_or_default();

        Ok(PartyDetail {
            mailing_addr: self.formatted_address(party.mailing_addr_id).await?,
            delivery_addr: self.formatted_address(party.delivery_addr_id).await?,
            corp_nme,
            corp_typ_cd,
            admin_email,
            party,
        })
    }

    /// Parties sharing the mailing or the delivery address of a party,
    /// the party itself included.
    pub async fn same_address(&self, corp_party_id: i32) -> Result<Vec<RelatedParty>> {
        let party = self.find_party(corp_party_id).await?;
        if party.mailing_addr_id.is_none() && party.delivery_addr_id.is_none() {
            return Ok(Vec::new());
        }
        self.store
            .parties_at_addresses(party.mailing_addr_id, party.delivery_addr_id)
            .await
    }

    /// Parties with the same first and last name in the same corporation.
    pub async fn same_name(&self, corp_party_id: i32) -> Result<Vec<RelatedParty>> {
        let party = self.find_party(corp_party_id).await?;
        let criteria = (
            party.first_nme.as_deref(),
            party.last_nme.as_deref(),
            party.corp_num.as_deref(),
        );
        if criteria == (None, None, None) {
            return Ok(Vec::new());
        }
        self.store
            .parties_with_name(criteria.0, criteria.1, criteria.2)
            .await
    }

    pub async fn filings(&self, corp_party_id: i32) -> Result<Vec<FilingView>> {
        self.store.party_filings(corp_party_id).await
    }

    pub async fn offices_held(&self, corp_party_id: i32) -> Result<Vec<OfficeHeld>> {
        self.store.offices_held(corp_party_id).await
    }
}
