use atomicals_consensus::{
    processes::{mint_validator::MintValidator, operations::find_operation, transfers::color_ft_outputs},
    test_helpers::{TxBuilder, cbor, hash_with_display_prefix},
};
use atomicals_consensus_core::{
    OpType, config::params::MAINNET_PARAMS, payload::PayloadValue, payload_map, spent::AtomicalsSpentAtInputs, tx::TransactionOutpoint,
};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn dft_deploy_payload(image_len: usize) -> Vec<u8> {
    cbor(&payload_map! {
        "args" => payload_map! {
            "request_ticker" => "bench",
            "bitworkc" => "abcd",
            "mint_height" => 840_000u64,
            "mint_amount" => 1000u64,
            "max_mints" => 21_000u64,
        },
        "meta" => payload_map! {"name" => "bench token", "description" => "x".repeat(256)},
        "init" => payload_map! {"image" => PayloadValue::Bytes(vec![0x5a; image_len])},
    })
}

/// Witness scanning and payload decoding of a reveal carrying a payload of growing size
pub fn find_operation_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_operation");
    for image_len in [0, 4_000, 100_000] {
        let tx = TxBuilder::new().input().reveal_input(OpType::Dft, &dft_deploy_payload(image_len)).output(546, vec![0x51]).build();
        group.bench_function(format!("image_len={image_len}"), |b| b.iter(|| find_operation(black_box(&tx))));
    }
    group.finish();
}

/// Full mint validation of an already located `dft` deployment
pub fn validate_mint_benchmark(c: &mut Criterion) {
    let commit = TransactionOutpoint::new(hash_with_display_prefix("abcd", 0x01), 0);
    let tx = TxBuilder::new().reveal_input_from(commit, OpType::Dft, &dft_deploy_payload(4_000)).output(546, vec![0x51]).build();
    let op = find_operation(&tx).unwrap();
    let validator = MintValidator::new(MAINNET_PARAMS);
    let spent = AtomicalsSpentAtInputs::new();
    c.bench_function("validate_mint (dft)", |b| b.iter(|| validator.validate_mint(black_box(&op), black_box(&tx), &spent)));
}

pub fn color_ft_outputs_benchmark(c: &mut Criterion) {
    let output_values: Vec<u64> = (0..2_000).map(|i| 546 + i % 100).collect();
    c.bench_function("color_ft_outputs (2000 outputs)", |b| {
        b.iter(|| color_ft_outputs(black_box(u64::MAX), black_box(10_000), output_values.iter().copied()))
    });
}

criterion_group!(benches, find_operation_benchmark, validate_mint_benchmark, color_ft_outputs_benchmark);
criterion_main!(benches);
