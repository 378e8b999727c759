//!
//! Subrealm mint rules of a parent realm.
//!
//! The owner of a realm publishes pricing rules under the `/subrealms` mod path. Each rule maps
//! a name pattern to the outputs a claimant has to pay. Updates take effect a few blocks after
//! the height they were recorded at, and only the last update within a block counts.
//!

use crate::errors::{RuleSetError, RuleSetResult};
use atomicals_consensus_core::{
    AtomicalId,
    config::params::Params,
    payload::{PayloadMap, PayloadValue},
    tx::{Transaction, TransactionId},
};
use atomicals_core::{debug, hex::ToHex, warn};
use atomicals_txscript::payment_marker_atomical_id;
use fancy_regex::Regex;
use serde::Serialize;
use std::{borrow::Cow, collections::BTreeMap};

/// A rule update recorded for the rules path of a parent realm
#[derive(Debug, Clone, PartialEq)]
pub struct RuleRecord {
    pub txid: TransactionId,
    pub height: u64,
    /// Global transaction sequence number, orders updates within a block
    pub tx_num: u64,
    pub data: PayloadValue,
}

/// An output a claimant must create to pay for a subrealm
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleOutput {
    /// Hex of the output script as written in the rule. Only lowercase even-length hex can
    /// ever be paid.
    pub script_hex: String,
    pub min_value: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubrealmRule {
    pub pattern: String,
    #[serde(skip)]
    regex: Regex,
    pub outputs: Vec<RuleOutput>,
}

impl SubrealmRule {
    /// Whether the pattern matches the whole name
    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name).unwrap_or_else(|err| {
            debug!("subrealm rule pattern '{}' gave up on '{name}': {err}", self.pattern);
            false
        })
    }

    /// Whether `tx` pays every rule output, each with an output of the exact script and at
    /// least the minimum value
    pub fn is_paid_by(&self, tx: &Transaction) -> bool {
        let paid: Vec<(String, u64)> = tx.outputs.iter().map(|output| (output.script_public_key.to_hex(), output.value)).collect();
        self.outputs
            .iter()
            .all(|expected| paid.iter().any(|(script_hex, value)| *script_hex == expected.script_hex && *value >= expected.min_value))
    }
}

impl PartialEq for SubrealmRule {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern && self.outputs == other.outputs
    }
}

/// The rules in effect at some height
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubrealmRuleSet {
    pub rule_set_txid: TransactionId,
    pub rule_set_height: u64,
    pub rule_valid_from_height: u64,
    pub rules: Vec<SubrealmRule>,
}

impl SubrealmRuleSet {
    /// The first rule whose pattern matches `name`
    pub fn find_applicable_rule(&self, name: &str) -> Option<&SubrealmRule> {
        self.rules.iter().find(|rule| rule.matches(name))
    }
}

/// Keeps the last update of each height. `history` must be ordered by height and then by
/// `tx_num`, both descending; anything else is rejected.
pub fn collapse_rule_history(history: &[RuleRecord]) -> RuleSetResult<BTreeMap<u64, &RuleRecord>> {
    let mut collapsed = BTreeMap::new();
    let mut prev: Option<&RuleRecord> = None;
    for record in history {
        if let Some(prev) = prev.filter(|prev| record.height > prev.height || record.tx_num >= prev.tx_num) {
            return Err(RuleSetError::HistoryOutOfOrder(record.height, record.tx_num, prev.height, prev.tx_num));
        }
        collapsed.entry(record.height).or_insert(record);
        prev = Some(record);
    }
    Ok(collapsed)
}

/// Whether `value` parses as a base 16 integer: surrounding whitespace, a sign, a `0x`
/// prefix and single underscores between digits are allowed
fn is_hex_number(value: &str) -> bool {
    let digits = value.trim();
    let digits = digits.strip_prefix(['+', '-']).unwrap_or(digits);
    let digits = match digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        Some(rest) => rest.strip_prefix('_').unwrap_or(rest),
        None => digits,
    };
    !digits.is_empty() && digits.split('_').all(|group| !group.is_empty() && group.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Text form of a scalar pattern. Numbers and booleans read as `12`, `1.5`, `1e+16`, `True`.
fn pattern_text(pattern: &PayloadValue) -> Option<Cow<'_, str>> {
    match pattern {
        PayloadValue::Text(text) => Some(Cow::Borrowed(text)),
        PayloadValue::Integer(value) => Some(Cow::Owned(value.to_string())),
        PayloadValue::Bool(true) => Some(Cow::Borrowed("True")),
        PayloadValue::Bool(false) => Some(Cow::Borrowed("False")),
        PayloadValue::Float(value) => Some(Cow::Owned(float_text(*value))),
        _ => None,
    }
}

fn float_text(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_owned();
    }
    let text = format!("{value:?}");
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = exponent.strip_prefix('-').map_or(("+", exponent), |digits| ("-", digits));
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => text,
    }
}

#[derive(Clone)]
pub struct SubrealmRuleEvaluator {
    params: Params,
}

impl SubrealmRuleEvaluator {
    pub fn new(params: Params) -> Self {
        Self { params }
    }

    /// The rule set in effect at `height`. The most recent update which is already effective
    /// decides: if it is malformed there are no rules, older updates are not consulted.
    pub fn evaluate(&self, height: u64, history: &[RuleRecord]) -> Option<SubrealmRuleSet> {
        let collapsed = match collapse_rule_history(history) {
            Ok(collapsed) => collapsed,
            Err(err) => {
                warn!("subrealm rules are disabled: {err}");
                return None;
            }
        };
        let record = collapsed.values().rev().find(|record| height >= self.valid_from_height(record))?;
        match self.validate_rule_set(record) {
            Ok(rule_set) => Some(rule_set),
            Err(err) => {
                debug!("subrealm rules recorded by tx {} at height {} are disabled: {err}", record.txid, record.height);
                None
            }
        }
    }

    fn valid_from_height(&self, record: &RuleRecord) -> u64 {
        record.height + self.params.subrealm_rules_effective_delay_blocks
    }

    pub fn validate_rule_set(&self, record: &RuleRecord) -> RuleSetResult<SubrealmRuleSet> {
        let data = record.data.as_map().filter(|data| !data.is_empty()).ok_or(RuleSetError::DataNotAMap)?;
        self.check_path(data)?;

        let rules = data.get("rules").filter(|rules| !rules.is_blank()).ok_or(RuleSetError::RulesNotAList)?;
        let rules_list = rules.as_sequence().ok_or(RuleSetError::RulesNotAList)?;
        let size = rules.to_cbor_bytes().map_err(|err| RuleSetError::RulesNotSerializable(err.to_string()))?.len();
        if size > self.params.max_subrealm_rule_size_bytes {
            return Err(RuleSetError::RulesTooLarge(size, self.params.max_subrealm_rule_size_bytes));
        }

        let rules = rules_list.iter().enumerate().map(|(i, rule)| self.check_rule(i, rule)).collect::<RuleSetResult<_>>()?;
        Ok(SubrealmRuleSet {
            rule_set_txid: record.txid,
            rule_set_height: record.height,
            rule_valid_from_height: self.valid_from_height(record),
            rules,
        })
    }

    fn check_path(&self, data: &PayloadMap) -> RuleSetResult<()> {
        match data.get("$path").and_then(PayloadValue::as_text) {
            Some(path) if path == self.params.subrealm_mint_path => Ok(()),
            _ => Err(RuleSetError::WrongPath(self.params.subrealm_mint_path.to_string())),
        }
    }

    fn check_rule(&self, i: usize, rule: &PayloadValue) -> RuleSetResult<SubrealmRule> {
        let rule = rule.as_map().ok_or(RuleSetError::MalformedRule(i))?;
        let (pattern, outputs) = match (rule.get("p"), rule.get("o")) {
            (Some(pattern), Some(outputs)) if *pattern != PayloadValue::Null && *outputs != PayloadValue::Null => (pattern, outputs),
            _ => return Err(RuleSetError::MalformedRule(i)),
        };

        let outputs = outputs.as_map().filter(|outputs| !outputs.is_empty()).ok_or(RuleSetError::InvalidOutputs(i))?;
        let outputs = outputs.iter().map(|(script_hex, min_value)| self.check_output(i, script_hex, min_value)).collect::<RuleSetResult<_>>()?;

        let pattern = pattern_text(pattern).ok_or(RuleSetError::PatternNotScalar(i))?;
        let regex = Regex::new(&format!("^(?:{pattern})$")).map_err(|err| RuleSetError::InvalidPattern(i, err.to_string()))?;
        Ok(SubrealmRule { pattern: pattern.into_owned(), regex, outputs })
    }

    fn check_output(&self, i: usize, script_hex: &str, min_value: &PayloadValue) -> RuleSetResult<RuleOutput> {
        let min_value = min_value
            .as_int()
            .and_then(|value| u64::try_from(value).ok())
            .filter(|value| *value >= self.params.subrealm_min_payment)
            .ok_or_else(|| RuleSetError::InvalidOutputValue(i, script_hex.to_owned()))?;
        if !is_hex_number(script_hex) {
            return Err(RuleSetError::InvalidOutputScript(i, script_hex.to_owned()));
        }
        Ok(RuleOutput { script_hex: script_hex.to_owned(), min_value })
    }
}

/// The atomical a transaction declares to pay for, read from the first payment marker output
pub fn find_payment_marker(tx: &Transaction) -> Option<AtomicalId> {
    tx.outputs.iter().find_map(|output| payment_marker_atomical_id(&output.script_public_key))
}
