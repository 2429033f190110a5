use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use std::io;
use tracing::Level;

mod address;
mod replace;

#[derive(Parser)]
#[command(name = "addrconv")]
#[command(about = "Migrate Namada addresses and keys to the new address format", long_about = None)]
#[command(version)]
#[command(disable_help_subcommand = true)]
struct Cli {
    /// Log every converted address and skipped file to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show this help message
    #[command(visible_aliases = ["usage", "h", "u"])]
    Help,
    /// Convert from the old to the new address format, printing the new address to stdout
    #[command(visible_alias = "c")]
    Convert {
        /// The legacy address or key
        old_address: String,
    },
    /// Get an implicit address from a public key in the new format
    #[command(name = "implicit-address", visible_alias = "i")]
    ImplicitAddress {
        /// The bech32m encoded public key
        public_key: String,
    },
    /// Replace occurrences of old addresses with the new address format in all files present in the given path
    #[command(visible_alias = "r")]
    Replace(replace::ReplaceArgs),
}

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return usage_error(err),
    };

    init_tracing(cli.verbose);

    match cli.command {
        Commands::Help => {
            Cli::command().write_long_help(&mut io::stdout())?;
            Ok(())
        }
        Commands::Convert { old_address } => address::convert(&old_address),
        Commands::ImplicitAddress { public_key } => address::implicit_address(&public_key),
        Commands::Replace(args) => replace::handle_command(args),
    }
}

/// `--help` and `--version` print to stdout and succeed; any other parse error
/// is followed by the full usage on stderr.
fn usage_error(err: clap::Error) -> Result<()> {
    if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        err.print()?;
        return Ok(());
    }
    err.print()?;
    eprintln!();
    Cli::command().write_long_help(&mut io::stderr())?;
    anyhow::bail!("invalid cli arguments detected")
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_help_aliases() {
        for alias in ["help", "usage", "h", "u"] {
            let cli = Cli::try_parse_from(["addrconv", alias]).unwrap();
            assert!(matches!(cli.command, Commands::Help));
        }
    }

    #[test]
    fn test_convert_aliases() {
        for alias in ["convert", "c"] {
            let cli = Cli::try_parse_from(["addrconv", alias, "atest1abc"]).unwrap();
            match cli.command {
                Commands::Convert { old_address } => assert_eq!(old_address, "atest1abc"),
                _ => panic!("expected convert"),
            }
        }
    }

    #[test]
    fn test_implicit_address_aliases() {
        for alias in ["implicit-address", "i"] {
            let cli = Cli::try_parse_from(["addrconv", alias, "tpknam1abc"]).unwrap();
            assert!(matches!(cli.command, Commands::ImplicitAddress { .. }));
        }
    }

    #[test]
    fn test_replace_aliases() {
        for alias in ["replace", "r"] {
            let cli = Cli::try_parse_from(["addrconv", alias, "some/dir"]).unwrap();
            assert!(matches!(cli.command, Commands::Replace(_)));
        }
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(Cli::try_parse_from(["addrconv"]).is_err());
        assert!(Cli::try_parse_from(["addrconv", "convert"]).is_err());
        assert!(Cli::try_parse_from(["addrconv", "convert", "a", "b"]).is_err());
        assert!(Cli::try_parse_from(["addrconv", "frobnicate"]).is_err());
    }

    #[test]
    fn test_usage_error_fails() {
        let err = Cli::try_parse_from(["addrconv"]).err().unwrap();
        assert!(usage_error(err).is_err());
    }

    #[test]
    fn test_help_flag_succeeds() {
        let err = Cli::try_parse_from(["addrconv", "--help"]).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }
}
