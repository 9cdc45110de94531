use std::collections::HashSet;

use anyhow::{Result, bail};
use indicatif::ProgressBar;
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::info;

use entrank::SequenceCodec;

const MAX_REPORTED_FAILURES: usize = 5;

pub(crate) fn run_verify(
    codec: SequenceCodec,
    samples: u64,
    seed: Option<u64>,
    exhaustive_limit: u64,
) -> Result<()> {
    let total = codec.total();
    println!(
        "Verifying length {} over {} symbols ({:?} order, {} sequences)",
        codec.len(),
        codec.alphabet(),
        codec.order(),
        total
    );

    let failures = match total.to_u64().filter(|&t| t <= exhaustive_limit) {
        Some(total) => verify_exhaustive(&codec, total)?,
        None => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            verify_sampled(&codec, samples, &mut rng)?
        }
    };

    if failures > 0 {
        bail!("{failures} round trips failed");
    }
    println!("All round trips succeeded.");
    Ok(())
}

fn distinct(seq: &[usize]) -> usize {
    seq.iter().collect::<HashSet<_>>().len()
}

/// Unrank every rank in order, checking the round trip and that the distinct
/// symbol count never decreases.
fn verify_exhaustive(codec: &SequenceCodec, total: u64) -> Result<usize> {
    info!(total, "checking every rank");
    let bar = ProgressBar::new(total);
    let mut failures = 0usize;
    let mut last_symbols = 0;
    for r in 0..total {
        let rank = BigUint::from(r);
        let seq = codec.unrank(&rank)?;
        let back = codec.rank(&seq)?;
        let symbols = distinct(&seq);
        if back != rank || symbols < last_symbols {
            failures += 1;
            if failures <= MAX_REPORTED_FAILURES {
                bar.println(format!("Mismatch: rank {rank} -> {seq:?} -> {back}"));
            }
        }
        last_symbols = symbols;
        bar.inc(1);
    }
    bar.finish_and_clear();
    println!("Checked {total} ranks.");
    Ok(failures)
}

fn verify_sampled(codec: &SequenceCodec, samples: u64, rng: &mut StdRng) -> Result<usize> {
    info!(samples, "checking random sequences");
    let bar = ProgressBar::new(samples);
    let total = codec.total();
    let mut failures = 0usize;
    for _ in 0..samples {
        let seq: Vec<usize> = (0..codec.len())
            .map(|_| rng.gen_range(0..codec.alphabet()))
            .collect();
        let rank = codec.rank(&seq)?;
        let back = codec.unrank(&rank)?;
        if rank >= total || back != seq {
            failures += 1;
            if failures <= MAX_REPORTED_FAILURES {
                bar.println(format!("Mismatch: {seq:?} -> rank {rank} -> {back:?}"));
            }
        }
        bar.inc(1);
    }
    bar.finish_and_clear();
    println!("Checked {samples} random sequences.");
    Ok(failures)
}
