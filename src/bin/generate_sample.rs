use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

/// Write a synthetic benchmark results CSV.
#[derive(Parser, Debug)]
#[command(name = "generate_sample", about)]
struct Args {
    /// Output CSV path.
    #[arg(long, short = 'o', default_value = "performance_results.csv")]
    output: PathBuf,

    /// PRNG seed; the same seed always yields the same file.
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

#[derive(Debug, Serialize)]
struct Row {
    #[serde(rename = "Size_Bytes")]
    size_bytes: u64,
    #[serde(rename = "Alpha_Percent")]
    alpha_percent: u32,
    #[serde(rename = "Aligned")]
    aligned: u8,
    #[serde(rename = "Time_Serial_ms")]
    time_serial_ms: f64,
    #[serde(rename = "Time_CUDA_ms")]
    time_cuda_ms: f64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Multiplicative jitter in `[1 - amount, 1 + amount)`.
    fn jitter(&mut self, amount: f64) -> f64 {
        1.0 + amount * (2.0 * self.next_f64() - 1.0)
    }
}

/// Serial cost grows linearly with size; alphabetic characters take the
/// slower branch of the conversion loop.
fn serial_ms(size: u64, alpha: u32) -> f64 {
    let per_byte_ns = 1.2 + 0.8 * alpha as f64 / 100.0;
    size as f64 * per_byte_ns / 1e6
}

/// Fixed launch + transfer overhead, then bandwidth bound. Unaligned access
/// splits transactions and costs extra per byte.
fn cuda_ms(size: u64, aligned: bool) -> f64 {
    let launch_ms = 0.05;
    let per_byte_ns = if aligned { 0.09 } else { 0.14 };
    launch_ms + size as f64 * per_byte_ns / 1e6
}

fn generate(seed: u64) -> Vec<Row> {
    let mut rng = SimpleRng::new(seed);

    // 1 KiB → 64 MiB in powers of four
    let sizes: Vec<u64> = (0..9).map(|i| 1024u64 << (2 * i)).collect();
    let alphas = [0u32, 25, 50, 75, 100];

    let mut rows = Vec::with_capacity(sizes.len() * alphas.len() * 2);
    for &size in &sizes {
        for &alpha in &alphas {
            let serial = serial_ms(size, alpha);
            for aligned in [1u8, 0] {
                rows.push(Row {
                    size_bytes: size,
                    alpha_percent: alpha,
                    aligned,
                    time_serial_ms: serial * rng.jitter(0.03),
                    time_cuda_ms: cuda_ms(size, aligned == 1) * rng.jitter(0.05),
                });
            }
        }
    }
    rows
}

fn main() -> Result<()> {
    let args = Args::parse();
    let rows = generate(args.seed);

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating '{}'", args.output.display()))?;
    for row in &rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {} measurements to {}", rows.len(), args.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_every_size_alpha_and_alignment() {
        let rows = generate(7);
        assert_eq!(rows.len(), 9 * 5 * 2);
        assert_eq!(rows.first().map(|r| r.size_bytes), Some(1024));
        assert_eq!(rows.last().map(|r| r.size_bytes), Some(64 * 1024 * 1024));
        assert!(rows.iter().all(|r| r.time_cuda_ms > 0.0 && r.time_serial_ms > 0.0));
    }

    #[test]
    fn same_seed_same_rows() {
        let a: Vec<f64> = generate(42).iter().map(|r| r.time_cuda_ms).collect();
        let b: Vec<f64> = generate(42).iter().map(|r| r.time_cuda_ms).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn header_matches_loader_columns() {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.serialize(&generate(1)[0]).unwrap();
        let bytes = writer.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("Size_Bytes,Alpha_Percent,Aligned,Time_Serial_ms,Time_CUDA_ms\n"));
    }
}
