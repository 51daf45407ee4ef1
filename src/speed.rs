//! ALFA AEAD - Throughput benchmark
//!
//! Seals fixed-size blocks with each algorithm for a minimum duration and
//! reports MB/s, similar to `openssl speed`.

use std::time::{Duration, Instant};

use rand::RngCore;
use serde::Serialize;

use crate::config::SpeedConfig;
use crate::crypto::{seal, Algorithm, KEY_LEN, TAG_LEN};
use crate::error::AeadResult;

/// Throughput of one algorithm
#[derive(Debug, Clone, Serialize)]
pub struct SpeedResult {
    pub algorithm: Algorithm,
    pub block_size: usize,
    pub iterations: u64,
    pub elapsed: Duration,
    pub mb_per_sec: f64,
    /// Highest measured throughput of this run
    pub fastest: bool,
}

/// Run the benchmark for every algorithm in `config`
pub fn run(config: &SpeedConfig) -> AeadResult<Vec<SpeedResult>> {
    config.validate()?;

    let mut results: Vec<SpeedResult> = config
        .algorithms
        .iter()
        .map(|&algorithm| measure(algorithm, config))
        .collect();

    let best = results
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.mb_per_sec.total_cmp(&b.1.mb_per_sec))
        .map(|(i, _)| i);
    if let Some(i) = best {
        results[i].fastest = true;
    }

    Ok(results)
}

fn measure(algorithm: Algorithm, config: &SpeedConfig) -> SpeedResult {
    let mut rng = rand::thread_rng();
    let mut key = [0u8; KEY_LEN];
    rng.fill_bytes(&mut key);
    let mut nonce = vec![0u8; algorithm.nonce_len()];
    rng.fill_bytes(&mut nonce);
    let mut aad = vec![0u8; config.aad_size];
    rng.fill_bytes(&mut aad);

    let input = vec![0u8; config.block_size];
    let mut dest = vec![0u8; config.block_size + TAG_LEN];
    let budget = Duration::from_millis(config.duration_ms);

    let start = Instant::now();
    let mut iterations = 0u64;
    loop {
        seal(algorithm, &input, &aad, &key, &nonce, &mut dest);
        iterations += 1;
        if start.elapsed() >= budget {
            break;
        }
    }
    let elapsed = start.elapsed();

    let mb_per_sec = mb_per_sec(config.block_size, iterations, elapsed);
    log::info!(
        "{}: {} x {} bytes in {:?} ({:.2} MB/s)",
        algorithm,
        iterations,
        config.block_size,
        elapsed,
        mb_per_sec
    );

    SpeedResult {
        algorithm,
        block_size: config.block_size,
        iterations,
        elapsed,
        mb_per_sec,
        fastest: false,
    }
}

fn mb_per_sec(block_size: usize, iterations: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if block_size == 0 || iterations == 0 || secs <= 0.0 {
        return 0.0;
    }
    (block_size as f64 * iterations as f64 / 1e6) / secs
}
