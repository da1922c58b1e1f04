use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ll_core::{ComponentMap, Decomposition, DivisionTable, FreqMap, WordEntry};
use ll_encoder::{build_full_code_list, EncoderInputs, EncoderPipeline};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

const KEYS: &[u8] = b"qwertyuiopasdfghjklzxcvbnm";

fn generate_inputs(chars: usize, words: usize) -> EncoderInputs {
    let mut rng = StdRng::seed_from_u64(7);

    let mut mappings = ComponentMap::new();
    for i in 0..200 {
        let len = rng.gen_range(1..=3);
        let code: String = (0..len).map(|_| KEYS[rng.gen_range(0..KEYS.len())] as char).collect();
        mappings.insert(format!("c{i}"), code);
    }

    let mut divisions = DivisionTable::new();
    let mut freqs = FreqMap::new();
    let mut names = Vec::with_capacity(chars);
    for i in 0..chars {
        let Some(c) = char::from_u32(0x4E00 + i as u32) else { continue };
        let name = c.to_string();
        let arity = rng.gen_range(1..=4);
        let comps = (0..arity).map(|_| format!("c{}", rng.gen_range(0..200))).collect();
        divisions.insert(name.clone(), vec![Arc::new(Decomposition::new(name.clone(), comps))]);
        freqs.insert(name.clone(), rng.gen_range(0..100_000));
        names.push(name);
    }

    let words = (0..words)
        .map(|_| {
            let len = rng.gen_range(2..=5);
            let word: String = (0..len).map(|_| names[rng.gen_range(0..names.len())].as_str()).collect();
            WordEntry::new(word, rng.gen_range(0..10_000).to_string())
        })
        .collect();

    EncoderInputs {
        divisions,
        mappings,
        freqs,
        words,
        lexicon: None,
    }
}

fn bench_full_codes(c: &mut Criterion) {
    let inputs = generate_inputs(20_000, 0);
    c.bench_function("full_codes_20k", |b| {
        b.iter(|| black_box(build_full_code_list(&inputs.divisions, &inputs.mappings, &inputs.freqs)))
    });
}

fn bench_pipeline(c: &mut Criterion) {
    let pipeline = EncoderPipeline::default();
    for &(name, chars, words) in &[("small", 2_000, 5_000), ("large", 20_000, 50_000)] {
        let inputs = generate_inputs(chars, words);
        c.bench_function(&format!("encode_{name}"), |b| {
            b.iter(|| black_box(pipeline.encode(black_box(&inputs))))
        });
        let out = match pipeline.encode(&inputs) {
            Ok(out) => out,
            Err(_) => continue,
        };
        c.bench_function(&format!("merge_{name}"), |b| {
            b.iter(|| black_box(pipeline.merge_candidates(black_box(&out), &[], false)))
        });
    }
}

criterion_group!(benches, bench_full_codes, bench_pipeline);
criterion_main!(benches);
