//! Closed registry of searchable fields.
//!
//! Every field a client may filter or sort on is listed here by hand and bound
//! to the legacy table that owns it. Nothing outside this table can reach a
//! predicate, so arbitrary schema columns are never exposed.

use crate::error::{QueryError, Result};
use std::fmt;

/// Legacy tables that take part in a search join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Corporation,
    CorpName,
    CorpParty,
    Address,
    CorpOpState,
}

/// Storage type of a column. Comparisons are always case-insensitive text
/// comparisons; non-text values are compared through their text rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Text,
    Date,
    Integer,
}

/// A whitelisted, searchable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FirstName,
    MiddleName,
    LastName,
    BusinessName,
    PartyType,
    AppointmentDate,
    CessationDate,
    CorpPartyId,
    CorpNum,
    CorpType,
    RecognitionDate,
    CorpName,
    AddrLine1,
    AddrLine2,
    AddrLine3,
    PostalCode,
    City,
    Province,
    StateType,
}

impl Field {
    pub const ALL: [Field; 19] = [
        Field::FirstName,
        Field::MiddleName,
        Field::LastName,
        Field::BusinessName,
        Field::PartyType,
        Field::AppointmentDate,
        Field::CessationDate,
        Field::CorpPartyId,
        Field::CorpNum,
        Field::CorpType,
        Field::RecognitionDate,
        Field::CorpName,
        Field::AddrLine1,
        Field::AddrLine2,
        Field::AddrLine3,
        Field::PostalCode,
        Field::City,
        Field::Province,
        Field::StateType,
    ];

    /// Resolve a client-supplied token. Tokens are case-sensitive.
    pub fn resolve(token: &str) -> Result<Self> {
        let field = match token {
            "first_nme" => Self::FirstName,
            "middle_nme" => Self::MiddleName,
            "last_nme" => Self::LastName,
            "business_nme" => Self::BusinessName,
            "party_typ_cd" => Self::PartyType,
            "appointment_dt" => Self::AppointmentDate,
            "cessation_dt" => Self::CessationDate,
            "corp_party_id" => Self::CorpPartyId,
            "corp_num" => Self::CorpNum,
            "corp_typ_cd" => Self::CorpType,
            "recognition_dts" => Self::RecognitionDate,
            "corp_nme" => Self::CorpName,
            "addr_line_1" => Self::AddrLine1,
            "addr_line_2" => Self::AddrLine2,
            "addr_line_3" => Self::AddrLine3,
            "postal_cd" => Self::PostalCode,
            "city" => Self::City,
            "province" => Self::Province,
            "state_type_code" | "state_typ_cd" => Self::StateType,
            _ => return Err(QueryError::InvalidField(token.to_string())),
        };
        Ok(field)
    }

    pub fn entity(self) -> Entity {
        match self {
            Self::FirstName
            | Self::MiddleName
            | Self::LastName
            | Self::BusinessName
            | Self::PartyType
            | Self::AppointmentDate
            | Self::CessationDate
            | Self::CorpPartyId => Entity::CorpParty,
            Self::CorpNum | Self::CorpType | Self::RecognitionDate => Entity::Corporation,
            Self::CorpName => Entity::CorpName,
            Self::AddrLine1
            | Self::AddrLine2
            | Self::AddrLine3
            | Self::PostalCode
            | Self::City
            | Self::Province => Entity::Address,
            Self::StateType => Entity::CorpOpState,
        }
    }

    /// Column name in the owning table.
    pub fn column(self) -> &'static str {
        match self {
            Self::StateType => "state_typ_cd",
            other => other.token(),
        }
    }

    pub fn value_type(self) -> ValueType {
        match self {
            Self::AppointmentDate | Self::CessationDate | Self::RecognitionDate => ValueType::Date,
            Self::CorpPartyId => ValueType::Integer,
            _ => ValueType::Text,
        }
    }

    /// Canonical client-facing token.
    pub fn token(self) -> &'static str {
        match self {
            Self::FirstName => "first_nme",
            Self::MiddleName => "middle_nme",
            Self::LastName => "last_nme",
            Self::BusinessName => "business_nme",
            Self::PartyType => "party_typ_cd",
            Self::AppointmentDate => "appointment_dt",
            Self::CessationDate => "cessation_dt",
            Self::CorpPartyId => "corp_party_id",
            Self::CorpNum => "corp_num",
            Self::CorpType => "corp_typ_cd",
            Self::RecognitionDate => "recognition_dts",
            Self::CorpName => "corp_nme",
            Self::AddrLine1 => "addr_line_1",
            Self::AddrLine2 => "addr_line_2",
            Self::AddrLine3 => "addr_line_3",
            Self::PostalCode => "postal_cd",
            Self::City => "city",
            Self::Province => "province",
            Self::StateType => "state_type_code",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
