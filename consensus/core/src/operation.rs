use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// The operation kinds an envelope can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpType {
    /// Mint a non-fungible token
    #[serde(rename = "nft")]
    Nft,
    /// Mint a directly issued fungible token
    #[serde(rename = "ft")]
    Ft,
    /// Deploy a decentralized fungible token
    #[serde(rename = "dft")]
    Dft,
    /// Modify an atomical
    #[serde(rename = "mod")]
    Mod,
    /// Emit an event
    #[serde(rename = "evt")]
    Evt,
    /// Decentralized mint against a deployed ticker
    #[serde(rename = "dmt")]
    Dmt,
    /// Store data
    #[serde(rename = "dat")]
    Dat,
    /// Extract an atomical to the first output
    #[serde(rename = "x")]
    Extract,
    /// Skip the first outputs when coloring fungible tokens
    #[serde(rename = "y")]
    Skip,
    /// Seal an atomical
    #[serde(rename = "sl")]
    Seal,
}

impl OpType {
    pub const ALL: [OpType; 10] = [
        OpType::Nft,
        OpType::Ft,
        OpType::Dft,
        OpType::Mod,
        OpType::Evt,
        OpType::Dmt,
        OpType::Dat,
        OpType::Extract,
        OpType::Skip,
        OpType::Seal,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            OpType::Nft => "nft",
            OpType::Ft => "ft",
            OpType::Dft => "dft",
            OpType::Mod => "mod",
            OpType::Evt => "evt",
            OpType::Dmt => "dmt",
            OpType::Dat => "dat",
            OpType::Extract => "x",
            OpType::Skip => "y",
            OpType::Seal => "sl",
        }
    }

    /// Operations which create a new atomical when found at input 0
    pub const fn is_mint(&self) -> bool {
        matches!(self, OpType::Nft | OpType::Ft | OpType::Dft)
    }
}

impl Display for OpType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OpType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OpType::ALL.into_iter().find(|op| op.as_str() == s).ok_or_else(|| format!("unknown operation '{s}'"))
    }
}
