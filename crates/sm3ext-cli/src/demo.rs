//! Self-check: standard vectors plus a worked length-extension forgery.

use sm3ext_crypto::lext::LengthExtension;
use sm3ext_crypto::sm3::Sm3;
use sm3ext_utils::hex;

/// GB/T 32905-2016 examples plus the empty message.
const VECTORS: &[(&str, &[u8], &str)] = &[
    (
        "\"\"",
        b"",
        "1ab21d8355cfa17f8e61194831e81a8f22bec8c728fefb747ed035eb5082aa2b",
    ),
    (
        "\"abc\"",
        b"abc",
        "66c7f0f462eeedd9d1f2d46bdc10e4e24167c4875cf2f7a2297da02b8f4ba8e0",
    ),
    (
        "\"abcd\" x16",
        b"abcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcd",
        "debe9ff92275b8a138604889c18e5a4d6fdb70e5387e5765293dcba39c0c5732",
    ),
];

const SECRET: &str = "SECRET_KEY";
const KNOWN: &str = "user_data=123456";
const EXTRA: &str = "&admin=true";

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut failures = 0usize;

    println!("== SM3 test vectors ==");
    for (label, input, expected) in VECTORS {
        let got = hex::encode(&Sm3::digest(input)?);
        let ok = got == *expected;
        println!("{label:12} {got}  {}", verdict(ok));
        if !ok {
            println!("{:12} expected {expected}", "");
            failures += 1;
        }
    }

    println!();
    println!("== Length extension ==");
    let report = length_extension()?;
    println!("secret:         {SECRET}");
    println!("known:          {KNOWN}");
    println!("leaked digest:  {}", hex::encode(&report.leaked));
    println!("appended:       {EXTRA}");
    println!("forged digest:  {}", hex::encode(&report.forged));
    println!("honest digest:  {}", hex::encode(&report.honest));
    println!("forged message: {}", hex::encode(&report.forged_message));
    let ok = report.forged == report.honest;
    println!("result:         {}", verdict(ok));
    if !ok {
        failures += 1;
    }

    if failures > 0 {
        return Err(format!("{failures} check(s) failed").into());
    }
    Ok(())
}

struct Report {
    leaked: [u8; 32],
    forged: [u8; 32],
    honest: [u8; 32],
    forged_message: Vec<u8>,
}

/// Forge from the leaked digest, then let the verifier hash the secret in
/// front of the submitted message.
fn length_extension() -> Result<Report, Box<dyn std::error::Error>> {
    let prefix = format!("{SECRET}{KNOWN}");
    let leaked = Sm3::digest(prefix.as_bytes())?;

    let forgery = LengthExtension::new(leaked, prefix.len() as u64).extend(EXTRA.as_bytes())?;
    let forged_message = forgery.forged_message(KNOWN.as_bytes());

    let mut verifier = Sm3::new();
    verifier.update(SECRET.as_bytes())?;
    verifier.update(&forged_message)?;
    let honest = verifier.finish()?;

    Ok(Report {
        leaked,
        forged: forgery.digest,
        honest,
        forged_message,
    })
}

fn verdict(ok: bool) -> &'static str {
    if ok {
        "OK"
    } else {
        "MISMATCH"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vectors_hold() {
        for (label, input, expected) in VECTORS {
            assert_eq!(hex::encode(&Sm3::digest(input).unwrap()), *expected, "{label}");
        }
    }

    #[test]
    fn test_length_extension_verifies() {
        let report = length_extension().unwrap();
        assert_eq!(report.forged, report.honest);
        assert!(report.forged_message.starts_with(KNOWN.as_bytes()));
        assert!(report.forged_message.ends_with(EXTRA.as_bytes()));
        // 26-byte prefix: 38 bytes of glue.
        assert_eq!(report.forged_message.len(), KNOWN.len() + 38 + EXTRA.len());
    }

    #[test]
    fn test_run_succeeds() {
        assert!(run().is_ok());
    }
}
