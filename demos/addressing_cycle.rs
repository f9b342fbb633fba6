//! Addressing cycle demo
//!
//! Stores a few random patterns by walking a head across the memory, then
//! recalls one of them from a noisy key.
//!
//! Run with: cargo run --example addressing_cycle

use anyhow::Result;
use ndarray::Array1;
use ntm_memory::memory::expand_shift;
use ntm_memory::{setup_logging, AddressingHead, HeadParams, MemoryBank, MemoryConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

fn main() -> Result<()> {
    let config = MemoryConfig {
        locations: 16,
        width: 8,
        ..MemoryConfig::load_or_default("ntm-memory.toml")
    };
    config.validate()?;
    setup_logging(&config.logging.level)?;

    let mut rng = StdRng::seed_from_u64(2016);
    let mut bank = MemoryBank::from_config(&config);

    let mut start = Array1::<f64>::zeros(config.locations);
    start[config.locations - 1] = 1.0;
    let mut head = AddressingHead::from_weighting(start);

    // move one location forward per step
    let step = HeadParams {
        key: Array1::ones(config.width),
        key_strength: 1.0,
        gate: 0.0,
        shift: expand_shift(config.locations, &Array1::from(vec![0.0, 0.0, 1.0]))?,
        gamma: 1.0,
    };

    let patterns: Vec<Array1<f64>> = (0..5)
        .map(|_| Array1::from_shape_fn(config.width, |_| rng.gen_range(-1.0..1.0)))
        .collect();

    for (i, pattern) in patterns.iter().enumerate() {
        let w = head.write(&mut bank, &step, &Array1::ones(config.width), pattern)?;
        info!(pattern = i, location = argmax(&w), "stored pattern");
    }

    let target = 3;
    let noisy_key = patterns[target].mapv(|x| x + rng.gen_range(-0.1..0.1));
    let recall = HeadParams {
        key: noisy_key,
        key_strength: 30.0,
        gate: 1.0,
        shift: expand_shift(config.locations, &Array1::from(vec![0.0, 1.0, 0.0]))?,
        gamma: 2.0,
    };

    let value = head.read(&bank, &recall)?;
    let error = (&value - &patterns[target]).mapv(f64::abs).sum() / config.width as f64;
    info!(
        location = argmax(head.previous()),
        peak = head.previous()[argmax(head.previous())],
        mean_abs_error = error,
        "recalled pattern {}",
        target
    );

    Ok(())
}

fn argmax(w: &Array1<f64>) -> usize {
    w.iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |best, (i, &x)| if x > best.1 { (i, x) } else { best })
        .0
}
