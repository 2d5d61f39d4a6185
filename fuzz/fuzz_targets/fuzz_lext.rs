#![no_main]
use libfuzzer_sys::fuzz_target;

use sm3ext_crypto::lext::forge;
use sm3ext_crypto::sm3::{md_padding, Sm3};

// First byte splits the input into prefix and suffix.
fuzz_target!(|data: &[u8]| {
    let Some((&split, rest)) = data.split_first() else {
        return;
    };
    let (prefix, suffix) = rest.split_at((split as usize).min(rest.len()));

    let leaked = Sm3::digest(prefix).unwrap();
    let forged = forge(&leaked, prefix.len() as u64, suffix).unwrap();

    let mut full = prefix.to_vec();
    full.extend_from_slice(&md_padding(prefix.len() as u64));
    full.extend_from_slice(suffix);
    assert_eq!(forged, Sm3::digest(&full).unwrap());
});
