#![no_main]
use libfuzzer_sys::fuzz_target;

use sm3ext_crypto::sm3::Sm3;

// First byte picks the chunk size; streaming must agree with one-shot.
fuzz_target!(|data: &[u8]| {
    let Some((&split, msg)) = data.split_first() else {
        return;
    };
    let chunk = split as usize + 1;

    let mut ctx = Sm3::new();
    for piece in msg.chunks(chunk) {
        ctx.update(piece).unwrap();
    }
    assert_eq!(ctx.processed_len(), msg.len() as u64);
    assert_eq!(ctx.finish().unwrap(), Sm3::digest(msg).unwrap());
});
