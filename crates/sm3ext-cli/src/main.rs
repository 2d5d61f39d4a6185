use clap::{ArgGroup, Parser, Subcommand};

mod demo;
mod dgst;
mod forge;
mod speed;

/// SM3 hashing and length-extension forgery tool.
#[derive(Parser)]
#[command(name = "sm3ext")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the SM3 digest of a file.
    Dgst {
        /// Input file (use - for stdin).
        file: String,
    },
    /// Forge SM3(prefix || glue || suffix) from a leaked SM3(prefix).
    #[command(group(ArgGroup::new("extension").required(true).args(["suffix", "suffix_hex"])))]
    Forge {
        /// Leaked digest, 64 hex digits.
        #[arg(short, long)]
        digest: String,
        /// Assumed byte length of the original message, secret included.
        #[arg(short, long)]
        prefix_len: u64,
        /// Data to append, as text.
        #[arg(short, long)]
        suffix: Option<String>,
        /// Data to append, as hex.
        #[arg(long)]
        suffix_hex: Option<String>,
        /// Public part of the original message; prints the full forged message.
        #[arg(short, long)]
        known: Option<String>,
    },
    /// Run the built-in vectors and a length-extension walkthrough.
    Demo,
    /// Measure SM3 throughput.
    Speed {
        /// Duration in seconds.
        #[arg(long, default_value = "3")]
        seconds: u64,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let result = match &cli.command {
        Commands::Dgst { file } => dgst::run(file),
        Commands::Forge {
            digest,
            prefix_len,
            suffix,
            suffix_hex,
            known,
        } => forge::run(
            digest,
            *prefix_len,
            suffix.as_deref(),
            suffix_hex.as_deref(),
            known.as_deref(),
        ),
        Commands::Demo => demo::run(),
        Commands::Speed { seconds } => speed::run(*seconds),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_forge_requires_extension() {
        let args = ["sm3ext", "forge", "--digest", "00", "--prefix-len", "26"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_parse_forge_rejects_both_suffix_forms() {
        let args = [
            "sm3ext",
            "forge",
            "--digest",
            "00",
            "--prefix-len",
            "26",
            "--suffix",
            "x",
            "--suffix-hex",
            "78",
        ];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_parse_forge_with_known() {
        let args = [
            "sm3ext",
            "-v",
            "forge",
            "-d",
            "ab",
            "-p",
            "26",
            "-s",
            "&admin=true",
            "-k",
            "user_data=123456",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Forge {
                prefix_len,
                suffix,
                known,
                suffix_hex,
                ..
            } => {
                assert_eq!(prefix_len, 26);
                assert_eq!(suffix.as_deref(), Some("&admin=true"));
                assert_eq!(known.as_deref(), Some("user_data=123456"));
                assert!(suffix_hex.is_none());
            }
            _ => panic!("expected forge"),
        }
    }

    #[test]
    fn test_parse_speed_default_seconds() {
        let cli = Cli::try_parse_from(["sm3ext", "speed"]).unwrap();
        assert!(matches!(cli.command, Commands::Speed { seconds: 3 }));
    }
}
