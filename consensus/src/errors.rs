use atomicals_consensus_core::{
    AtomicalId, OpType,
    errors::{atomical_id::AtomicalIdError, bitwork::BitworkError},
    mint::NameType,
    tx::TransactionId,
};
use thiserror::Error;

/// Reasons a located operation does not produce a mint
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MintError {
    #[error("operation {0} does not mint")]
    NotAMintOperation(OpType),

    #[error("mint operations must be at input 0 but found at input {0}")]
    NotAtFirstInput(usize),

    #[error("mint transaction has no outputs")]
    NoOutputs,

    #[error("payload field '{0}' must be a map")]
    FieldNotAMap(&'static str),

    #[error("{0} must be a bitwork string")]
    BitworkNotText(&'static str),

    #[error("invalid {0}: {1}")]
    InvalidBitwork(&'static str, BitworkError),

    #[error("{0} '{1}' is not satisfied by transaction {2}")]
    BitworkUnsatisfied(&'static str, String, TransactionId),

    #[error("mint requests {0} names while at most one is allowed")]
    MultipleNameRequests(usize),

    #[error("{0} name claims require a bitworkc")]
    MissingNameBitwork(NameType),

    #[error("{0} name claims require a bitworkc prefix of at least {2} chars but got {1}")]
    NameBitworkTooShort(NameType, usize, usize),

    #[error("parents must be a map of compact atomical ids to minimum values")]
    ParentsNotAMap,

    #[error("parents are required but no atomicals were spent")]
    ParentsWithoutSpentAtomicals,

    #[error("invalid parent id '{0}': {1}")]
    InvalidParentId(String, AtomicalIdError),

    #[error("parent {0} minimum value must be a non-negative integer")]
    InvalidParentMinimum(AtomicalId),

    #[error("parent {0} was not spent in the mint transaction")]
    MissingParent(AtomicalId),

    #[error("parent {0} was spent with a total value of {1} while the minimum is {2}")]
    InsufficientParentValue(AtomicalId, u128, u64),

    #[error("invalid {0} name '{1}'")]
    InvalidName(NameType, String),

    #[error("{0} name must be a non-empty string")]
    NameNotText(NameType),

    #[error("subrealm claim_type must be 'direct' or 'rule'")]
    InvalidClaimType,

    #[error("subrealm parent_realm must be a compact atomical id")]
    InvalidParentRealm,

    #[error("{0} must be an integer in [{1}, {2}]")]
    DftParamOutOfRange(&'static str, u64, u64),
}

pub type MintResult<T> = std::result::Result<T, MintError>;

/// Reasons a `dmt` operation is not a well-formed decentralized mint claim
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DmtError {
    #[error("operation {0} is not a decentralized mint claim")]
    NotADmtOperation(OpType),

    #[error("decentralized mint claims must be at input 0 but found at input {0}")]
    NotAtFirstInput(usize),

    #[error("payload field '{0}' must be a map")]
    FieldNotAMap(&'static str),

    #[error("mint_ticker is missing or not a valid ticker")]
    InvalidTicker,
}

pub type DmtResult<T> = std::result::Result<T, DmtError>;

/// Reasons the effective subrealm rule set is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleSetError {
    #[error("rule history is out of order: (height {0}, tx_num {1}) follows (height {2}, tx_num {3})")]
    HistoryOutOfOrder(u64, u64, u64, u64),

    #[error("rule record data is empty or not a map")]
    DataNotAMap,

    #[error("rule record path is missing or not '{0}'")]
    WrongPath(String),

    #[error("rules must be a non-empty list")]
    RulesNotAList,

    #[error("rules serialize to {0} bytes while the maximum is {1}")]
    RulesTooLarge(usize, usize),

    #[error("rules could not be serialized: {0}")]
    RulesNotSerializable(String),

    #[error("rule {0} must be a map with 'p' and 'o' entries")]
    MalformedRule(usize),

    #[error("rule {0} pattern must be a string or a number")]
    PatternNotScalar(usize),

    #[error("rule {0} pattern does not compile: {1}")]
    InvalidPattern(usize, String),

    #[error("rule {0} outputs must be a non-empty map")]
    InvalidOutputs(usize),

    #[error("rule {0} output '{1}' must pay at least the minimum payment")]
    InvalidOutputValue(usize, String),

    #[error("rule {0} output script '{1}' is not hex")]
    InvalidOutputScript(usize, String),
}

pub type RuleSetResult<T> = std::result::Result<T, RuleSetError>;
