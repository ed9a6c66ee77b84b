//! Domain models for the search service

pub mod detail;
pub mod legacy;
pub mod search;

pub use detail::{
    CorporationDetail, FilingView, OfficeHeld, OfficeView, PartyDetail, RelatedParty, StateView,
};
pub use legacy::{
    Address, CorpName, CorpOpState, CorpParty, CorpState, Corporation, Event, Filing, FilingType,
    Office, OfficerType, OfficesHeld,
};
pub use search::{CorporationRow, CorporationSummary, PartyRow, PartySummary, ResultPage};
