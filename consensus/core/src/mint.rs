//!
//! Records produced for accepted mints.
//!

use crate::{
    atomical_id::{AtomicalId, Location},
    bitwork::Bitwork,
    payload::PayloadMap,
    tx::TransactionId,
};
use atomicals_core::hex::ToHex;
use atomicals_hashes::{Hash, HashX};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::{fmt::Display, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AtomicalType {
    Nft,
    Ft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FtSubtype {
    Direct,
    Decentralized,
}

/// How a subrealm claim is paid for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimType {
    /// Minted by the owner of the parent realm
    Direct,
    /// Minted by anyone paying according to the parent realm rules
    Rule,
}

impl FromStr for ClaimType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "direct" => Ok(ClaimType::Direct),
            "rule" => Ok(ClaimType::Rule),
            _ => Err(format!("unknown claim type '{s}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NameType {
    Realm,
    Subrealm,
    Container,
    Ticker,
}

impl NameType {
    pub const ALL: [NameType; 4] = [NameType::Realm, NameType::Subrealm, NameType::Container, NameType::Ticker];

    pub const fn as_str(&self) -> &'static str {
        match self {
            NameType::Realm => "realm",
            NameType::Subrealm => "subrealm",
            NameType::Container => "container",
            NameType::Ticker => "ticker",
        }
    }

    /// The `args` key under which a mint requests a name of this type
    pub const fn request_key(&self) -> &'static str {
        match self {
            NameType::Realm => "request_realm",
            NameType::Subrealm => "request_subrealm",
            NameType::Container => "request_container",
            NameType::Ticker => "request_ticker",
        }
    }

    /// Name claims of these types must carry a commit bitwork
    pub const fn requires_bitwork(&self) -> bool {
        !matches!(self, NameType::Subrealm)
    }
}

impl Display for NameType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NameRequest {
    Realm { name: String },
    Subrealm { name: String, parent_realm: AtomicalId, claim_type: ClaimType },
    Container { name: String },
    Ticker { name: String },
}

impl NameRequest {
    pub fn name(&self) -> &str {
        match self {
            NameRequest::Realm { name }
            | NameRequest::Subrealm { name, .. }
            | NameRequest::Container { name }
            | NameRequest::Ticker { name } => name,
        }
    }

    pub fn name_type(&self) -> NameType {
        match self {
            NameRequest::Realm { .. } => NameType::Realm,
            NameRequest::Subrealm { .. } => NameType::Subrealm,
            NameRequest::Container { .. } => NameType::Container,
            NameRequest::Ticker { .. } => NameType::Ticker,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BitworkCommitments {
    /// Requirement on the commit transaction id
    pub bitworkc: Option<Bitwork>,
    /// Requirement on the reveal transaction id
    pub bitworkr: Option<Bitwork>,
}

impl BitworkCommitments {
    pub fn is_empty(&self) -> bool {
        self.bitworkc.is_none() && self.bitworkr.is_none()
    }
}

/// Deployment parameters of a decentralized fungible token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecentralizedMint {
    pub mint_height: u64,
    pub mint_amount: u64,
    pub max_mints: u64,
    /// Checked against each individual claim, not the deployment
    pub mint_bitworkc: Option<Bitwork>,
    pub mint_bitworkr: Option<Bitwork>,
}

fn serialize_hex<S: Serializer, T: AsRef<[u8]>>(bytes: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&bytes.as_ref().to_hex())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MintInfo {
    pub atomical_id: AtomicalId,
    /// Display-only reference, see [`crate::atomical_ref`]
    pub atomical_ref: String,
    pub atomical_type: AtomicalType,
    pub subtype: Option<FtSubtype>,

    pub commit_txid: TransactionId,
    pub commit_index: u32,
    pub commit_location: Location,

    pub reveal_location_txid: TransactionId,
    pub reveal_location_index: u32,
    pub reveal_location: Location,
    pub reveal_location_scripthash: Hash,
    #[serde(serialize_with = "serialize_hex")]
    pub reveal_location_hash_x: HashX,
    pub reveal_location_value: u64,
    #[serde(serialize_with = "serialize_hex")]
    pub reveal_location_script: Vec<u8>,

    pub args: PayloadMap,
    pub meta: PayloadMap,
    pub ctx: PayloadMap,
    pub init: PayloadMap,

    pub bitwork: BitworkCommitments,
    pub request: Option<NameRequest>,
    /// Parent atomicals with the minimum value each must have been spent with
    pub parents: Option<IndexMap<AtomicalId, u64>>,
    pub dmint: Option<DecentralizedMint>,
}

impl MintInfo {
    pub fn is_nft(&self) -> bool {
        self.atomical_type == AtomicalType::Nft
    }

    pub fn is_ft(&self) -> bool {
        self.atomical_type == AtomicalType::Ft
    }

    pub fn requested_name(&self) -> Option<(NameType, &str)> {
        self.request.as_ref().map(|request| (request.name_type(), request.name()))
    }
}
