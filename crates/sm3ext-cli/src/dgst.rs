//! Hash/digest command implementation.

use std::fs::File;
use std::io::{self, Read};

use sm3ext_crypto::sm3::{Sm3, SM3_OUTPUT_SIZE};

pub fn run(file: &str) -> Result<(), Box<dyn std::error::Error>> {
    let digest = if file == "-" {
        hash_reader(io::stdin().lock())?
    } else {
        hash_reader(File::open(file)?)?
    };

    let hex = sm3ext_utils::hex::encode(&digest);
    if file == "-" {
        println!("SM3(stdin)= {hex}");
    } else {
        println!("SM3({file})= {hex}");
    }
    Ok(())
}

/// Feed `reader` through the streaming engine in 8 KiB reads.
fn hash_reader<R: Read>(mut reader: R) -> Result<[u8; SM3_OUTPUT_SIZE], Box<dyn std::error::Error>> {
    let mut ctx = Sm3::new();
    let mut buf = [0u8; 8192];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        ctx.update(&buf[..n])?;
    }
    Ok(ctx.finish()?)
}
