//! Length-extension forgery command.

use sm3ext_crypto::lext::{Forgery, LengthExtension};
use sm3ext_crypto::sm3::SM3_OUTPUT_SIZE;
use sm3ext_utils::hex;

pub fn run(
    digest: &str,
    prefix_len: u64,
    suffix: Option<&str>,
    suffix_hex: Option<&str>,
    known: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let suffix = parse_suffix(suffix, suffix_hex)?;
    let forgery = forge_from_hex(digest, prefix_len, &suffix)?;

    println!("forged digest:  {}", hex::encode(&forgery.digest));
    println!("glue padding:   {}", hex::encode(&forgery.glue_padding));
    println!("extended len:   {}", forgery.extended_len(prefix_len));
    if let Some(known) = known {
        println!(
            "forged message: {}",
            hex::encode(&forgery.forged_message(known.as_bytes()))
        );
    }
    Ok(())
}

fn parse_suffix(
    text: Option<&str>,
    hex_text: Option<&str>,
) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    match (text, hex_text) {
        (Some(t), None) => Ok(t.as_bytes().to_vec()),
        (None, Some(h)) => Ok(hex::decode(h)?),
        _ => Err("exactly one of --suffix or --suffix-hex is required".into()),
    }
}

fn forge_from_hex(
    digest: &str,
    prefix_len: u64,
    suffix: &[u8],
) -> Result<Forgery, Box<dyn std::error::Error>> {
    let leaked: [u8; SM3_OUTPUT_SIZE] = hex::decode_array(digest)
        .map_err(|e| format!("invalid --digest (expected {} hex digits): {e}", SM3_OUTPUT_SIZE * 2))?;
    Ok(LengthExtension::new(leaked, prefix_len).extend(suffix)?)
}
