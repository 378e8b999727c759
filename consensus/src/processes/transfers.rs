//!
//! Output assignment of atomicals spent by a transaction.
//!
//! An NFT moves to the output with the same index as the input it was spent at. Fungible
//! tokens color outputs in order for as long as the remaining value covers the whole output;
//! whatever cannot be assigned is burned.
//!

use super::operations::OperationFound;
use atomicals_consensus_core::{AtomicalId, OpType, tx::Transaction};
use atomicals_txscript::is_unspendable;

/// Outputs colored by a fungible token transfer
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FtColoring {
    /// Indexes of the colored outputs, ascending
    pub output_indexes: Vec<usize>,
    /// Token value left uncolored, which is burned
    pub remaining_value: u64,
}

/// The amount of `atomical_id` to skip before coloring, requested by a `y` operation at input 0
/// whose payload maps the compact id to a non-negative integer
pub fn skip_amount(op: Option<&OperationFound>, atomical_id: &AtomicalId) -> u64 {
    let Some(op) = op.filter(|op| op.is_at_first_input(OpType::Skip)) else {
        return 0;
    };
    op.payload
        .get(&atomical_id.to_compact())
        .and_then(|value| value.as_int())
        .filter(|amount| *amount >= 0)
        .map(|amount| u64::try_from(amount).unwrap_or(u64::MAX))
        .unwrap_or_default()
}

/// Colors outputs with `value` token units. Outputs are first skipped while the skipped total is
/// below `skip_amount`; after that each output is colored while its value fits in the remaining
/// value. The first output that does not fit stops the coloring.
pub fn color_ft_outputs(value: u64, skip_amount: u64, output_values: impl IntoIterator<Item = u64>) -> FtColoring {
    let mut coloring = FtColoring { output_indexes: Vec::new(), remaining_value: value };
    let mut skipped = 0u64;
    for (index, output_value) in output_values.into_iter().enumerate() {
        if skipped < skip_amount {
            skipped = skipped.saturating_add(output_value);
            continue;
        }
        if output_value > coloring.remaining_value {
            break;
        }
        coloring.output_indexes.push(index);
        coloring.remaining_value -= output_value;
    }
    coloring
}

/// Expected outputs of a fungible atomical spent with a total of `value` by `tx`
pub fn expected_output_indexes_of_ft(atomical_id: &AtomicalId, value: u64, tx: &Transaction, op: Option<&OperationFound>) -> FtColoring {
    color_ft_outputs(value, skip_amount(op, atomical_id), tx.output_values())
}

/// Expected output of an NFT spent at `input_indexes` of `tx`. Falls back to output 0 when the
/// matching output does not exist or is unspendable so the NFT is never burned.
///
/// Panics if the NFT was not spent at exactly one input, which means the index is corrupted.
pub fn expected_output_index_of_nft(atomical_id: &AtomicalId, input_indexes: &[usize], tx: &Transaction) -> usize {
    assert_eq!(input_indexes.len(), 1, "nft {atomical_id} of tx {} must be spent at exactly one input: {input_indexes:?}", tx.id());
    let index = input_indexes[0];
    match tx.outputs.get(index) {
        Some(output) if !is_unspendable(&output.script_public_key) => index,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        processes::operations::find_operation,
        test_helpers::{TxBuilder, cbor, hash},
    };
    use atomicals_consensus_core::{payload::PayloadMap, payload_map};

    const P2TR: [u8; 2] = [0x51, 0x20];

    #[test]
    fn test_color_ft_outputs() {
        let coloring = color_ft_outputs(1000, 0, [400, 400, 300]);
        assert_eq!(coloring, FtColoring { output_indexes: vec![0, 1], remaining_value: 200 });

        // The burned output stops the coloring even if a later output would fit
        let coloring = color_ft_outputs(1000, 0, [400, 700, 100]);
        assert_eq!(coloring, FtColoring { output_indexes: vec![0], remaining_value: 600 });

        let coloring = color_ft_outputs(1000, 500, [300, 300, 500, 200]);
        assert_eq!(coloring, FtColoring { output_indexes: vec![2, 3], remaining_value: 300 });

        assert_eq!(color_ft_outputs(1000, 0, []), FtColoring { output_indexes: vec![], remaining_value: 1000 });
        assert_eq!(color_ft_outputs(0, 0, [0, 1]), FtColoring { output_indexes: vec![0], remaining_value: 0 });
        assert_eq!(color_ft_outputs(1000, u64::MAX, [300, 300]).output_indexes, Vec::<usize>::new());
    }

    fn ft_transfer(first: OpType, payload: &PayloadMap) -> Transaction {
        TxBuilder::new()
            .reveal_input(first, &cbor(payload))
            .input()
            .output(300, P2TR.to_vec())
            .output(300, P2TR.to_vec())
            .output(500, P2TR.to_vec())
            .output(200, P2TR.to_vec())
            .build()
    }

    #[test]
    fn test_skip_operation() {
        let atomical_id = AtomicalId::new(hash(0x42), 0);
        let other_id = AtomicalId::new(hash(0x43), 0);

        let tx = ft_transfer(OpType::Skip, &payload_map! {atomical_id.to_compact() => 500u64});
        let op = find_operation(&tx);
        assert_eq!(skip_amount(op.as_ref(), &atomical_id), 500);
        assert_eq!(skip_amount(op.as_ref(), &other_id), 0);
        assert_eq!(skip_amount(None, &atomical_id), 0);
        assert_eq!(
            expected_output_indexes_of_ft(&atomical_id, 1000, &tx, op.as_ref()),
            FtColoring { output_indexes: vec![2, 3], remaining_value: 300 }
        );
        assert_eq!(expected_output_indexes_of_ft(&other_id, 1000, &tx, op.as_ref()).output_indexes, vec![0, 1]);

        let tx = ft_transfer(OpType::Skip, &payload_map! {atomical_id.to_compact() => -1i64});
        assert_eq!(skip_amount(find_operation(&tx).as_ref(), &atomical_id), 0);
        let tx = ft_transfer(OpType::Skip, &payload_map! {atomical_id.to_compact() => "500"});
        assert_eq!(skip_amount(find_operation(&tx).as_ref(), &atomical_id), 0);

        // Only a skip operation counts
        let tx = ft_transfer(OpType::Extract, &payload_map! {atomical_id.to_compact() => 500u64});
        assert_eq!(skip_amount(find_operation(&tx).as_ref(), &atomical_id), 0);

        // The skip operation must be at input 0
        let tx = TxBuilder::new()
            .input()
            .reveal_input(OpType::Skip, &cbor(&payload_map! {atomical_id.to_compact() => 500u64}))
            .output(300, P2TR.to_vec())
            .build();
        assert_eq!(skip_amount(find_operation(&tx).as_ref(), &atomical_id), 0);
    }

    #[test]
    fn test_nft_placement() {
        let atomical_id = AtomicalId::new(hash(0x42), 0);
        let tx = TxBuilder::new().input().input().input().output(546, P2TR.to_vec()).output(546, vec![0x6a, 0x01, 0x00]).output(546, P2TR.to_vec()).build();
        assert_eq!(expected_output_index_of_nft(&atomical_id, &[0], &tx), 0);
        assert_eq!(expected_output_index_of_nft(&atomical_id, &[2], &tx), 2);
        // Unspendable output
        assert_eq!(expected_output_index_of_nft(&atomical_id, &[1], &tx), 0);
        // Missing output
        assert_eq!(expected_output_index_of_nft(&atomical_id, &[5], &tx), 0);
    }

    #[test]
    #[should_panic]
    fn test_nft_spent_at_multiple_inputs() {
        let atomical_id = AtomicalId::new(hash(0x42), 0);
        let tx = TxBuilder::new().input().input().output(546, P2TR.to_vec()).output(546, P2TR.to_vec()).build();
        expected_output_index_of_nft(&atomical_id, &[0, 1], &tx);
    }
}
