//! Storage trait for the read-only registry

use crate::{
    db::search::SearchQuery,
    models::{
        Address, CorpName, CorpParty, Corporation, CorporationSummary, FilingView, Office,
        OfficeHeld, PartySummary, RelatedParty, ResultPage, StateView,
    },
    Result,
};
use async_trait::async_trait;

/// Data access needed by the search and lookup endpoints.
///
/// Implementations never write. Each search method runs the filtered, ordered
/// page query and a count over the same predicate, and returns both.
#[async_trait]
pub trait SearchStore: Send + Sync {
    async fn search_corporations(
        &self,
        query: &SearchQuery,
    ) -> Result<ResultPage<CorporationSummary>>;

    async fn search_parties(&self, query: &SearchQuery) -> Result<ResultPage<PartySummary>>;

    async fn corporation(&self, corp_num: &str) -> Result<Option<Corporation>>;

    /// Every name of a corporation, current first, then newest first.
    async fn corp_names(&self, corp_num: &str) -> Result<Vec<CorpName>>;

    /// Current operating state of a corporation.
    async fn corp_state(&self, corp_num: &str) -> Result<Option<StateView>>;

    /// Current offices of a corporation.
    async fn offices(&self, corp_num: &str) -> Result<Vec<Office>>;

    async fn address(&self, addr_id: i32) -> Result<Option<Address>>;

    async fn corp_party(&self, corp_party_id: i32) -> Result<Option<CorpParty>>;

    async fn offices_held(&self, corp_party_id: i32) -> Result<Vec<OfficeHeld>>;

    /// Parties whose mailing address is `mailing_addr_id` or whose delivery
    /// address is `delivery_addr_id`. A `None` id matches nothing.
    async fn parties_at_addresses(
        &self,
        mailing_addr_id: Option<i32>,
        delivery_addr_id: Option<i32>,
    ) -> Result<Vec<RelatedParty>>;

    /// Parties whose first name, last name and corporation number each equal
    /// the given value, ignoring case. A `None` criterion is not applied.
    async fn parties_with_name(
        &self,
        first_nme: Option<&str>,
        last_nme: Option<&str>,
        corp_num: Option<&str>,
    ) -> Result<Vec<RelatedParty>>;

    /// Filings of the event that started a party's appointment.
    async fn party_filings(&self, corp_party_id: i32) -> Result<Vec<FilingView>>;

    /// Cheap round trip proving the backing store answers queries.
    async fn ping(&self) -> Result<()>;

    /// Connection pool occupancy, for stores that hold a pool.
    fn pool_status(&self) -> Option<PoolStatus> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStatus {
    pub size: u32,
    pub idle: usize,
}
