//! Throughput benchmark for SM3 and length-extension forgery.

use std::time::{Duration, Instant};

use sm3ext_crypto::lext::forge;
use sm3ext_crypto::sm3::Sm3;

const BLOCK_LEN: usize = 8192;

pub fn run(seconds: u64) -> Result<(), Box<dyn std::error::Error>> {
    if seconds == 0 {
        return Err("--seconds must be at least 1".into());
    }
    let duration = Duration::from_secs(seconds);

    bench_bytes("SM3", duration, |data| Sm3::digest(data).map(|_| ()))?;

    let leaked = Sm3::digest(b"SECRET_KEYuser_data=123456")?;
    bench_bytes("SM3 length extension", duration, |data| {
        forge(&leaked, 26, data).map(|_| ())
    })?;
    Ok(())
}

fn bench_bytes<F, E>(name: &str, duration: Duration, mut op: F) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnMut(&[u8]) -> Result<(), E>,
    E: std::error::Error + 'static,
{
    let block = vec![0u8; BLOCK_LEN];

    let start = Instant::now();
    let mut total_bytes: u64 = 0;
    let mut ops: u64 = 0;

    while start.elapsed() < duration {
        op(&block)?;
        total_bytes += block.len() as u64;
        ops += 1;
    }

    let elapsed = start.elapsed().as_secs_f64();
    let mb_per_sec = total_bytes as f64 / (1024.0 * 1024.0) / elapsed;
    println!("{name:24} {mb_per_sec:10.2} MB/s  ({ops} ops in {elapsed:.2}s)");
    Ok(())
}
