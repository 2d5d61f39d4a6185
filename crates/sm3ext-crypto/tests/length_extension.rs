//! End-to-end length-extension properties through the public API.

use proptest::prelude::*;

use sm3ext_crypto::hash::{Digest, HashAlgorithm, Sm3Algorithm};
use sm3ext_crypto::lext::{forge, LengthExtension};
use sm3ext_crypto::sm3::{md_padding, Sm3};

fn direct(secret: &[u8], submitted: &[u8]) -> [u8; 32] {
    let mut ctx = Sm3::new();
    ctx.update(secret).unwrap();
    ctx.update(submitted).unwrap();
    ctx.finish().unwrap()
}

#[test]
fn forged_message_verifies_under_secret_prefix() {
    let secret = b"SECRET_KEY";
    let known = b"user_data=123456";
    let prefix = [&secret[..], &known[..]].concat();

    let leaked = Sm3Algorithm.hash(&prefix).unwrap();
    let leaked: [u8; 32] = leaked.as_slice().try_into().unwrap();

    let forgery = LengthExtension::new(leaked, prefix.len() as u64)
        .extend(b"&admin=true")
        .unwrap();
    let submitted = forgery.forged_message(known);

    assert_eq!(direct(secret, &submitted), forgery.digest);
}

#[test]
fn forge_through_digest_trait_object() {
    let prefix = b"key||payload";
    let mut boxed: Box<dyn Digest> = Sm3Algorithm.new_digest();
    boxed.update(prefix).unwrap();
    let mut leaked = [0u8; 32];
    boxed.finish(&mut leaked).unwrap();

    let forged = forge(&leaked, prefix.len() as u64, b"&more").unwrap();

    let mut full = prefix.to_vec();
    full.extend_from_slice(&md_padding(prefix.len() as u64));
    full.extend_from_slice(b"&more");
    assert_eq!(forged, Sm3::digest(&full).unwrap());
}

proptest! {
    #[test]
    fn forge_equals_direct_hash(
        prefix in proptest::collection::vec(any::<u8>(), 0..300),
        suffix in proptest::collection::vec(any::<u8>(), 0..300),
    ) {
        let leaked = Sm3::digest(&prefix).unwrap();
        let forged = forge(&leaked, prefix.len() as u64, &suffix).unwrap();

        let mut full = prefix.clone();
        full.extend_from_slice(&md_padding(prefix.len() as u64));
        full.extend_from_slice(&suffix);
        prop_assert_eq!(forged, Sm3::digest(&full).unwrap());
    }

    #[test]
    fn resume_from_digest_continues_padded_message(
        msg in proptest::collection::vec(any::<u8>(), 0..200),
        tail in proptest::collection::vec(any::<u8>(), 0..200),
    ) {
        let padded_len = msg.len() as u64 + md_padding(msg.len() as u64).len() as u64;
        prop_assert_eq!(padded_len % 64, 0);

        let mut resumed = Sm3::resume(&Sm3::digest(&msg).unwrap(), padded_len).unwrap();
        prop_assert_eq!(resumed.processed_len(), padded_len);
        resumed.update(&tail).unwrap();

        let mut full = msg.clone();
        full.extend_from_slice(&md_padding(msg.len() as u64));
        full.extend_from_slice(&tail);
        prop_assert_eq!(resumed.finish().unwrap(), Sm3::digest(&full).unwrap());
    }
}
