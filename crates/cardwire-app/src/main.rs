use std::path::PathBuf;

use cardwire_app::cmd::{self, Command};
use cardwire_app::logging::{apply_level, init_logging};
use cardwire_core::config::load_config;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "cardwire", version, about = "vCard decoder and encoder")]
struct Cli {
    /// Configuration file (default: cardwire.toml).
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Log filter for stderr, overrides `logging.level`.
    #[arg(long, value_name = "LEVEL", global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let filter_handle = init_logging(cli.log_level.as_deref().unwrap_or("info"));

    let config = load_config(cli.config.as_deref())?;

    tracing::debug!(config = ?config, "Configuration loaded");

    if cli.log_level.is_none() {
        apply_level(&filter_handle, &config.logging.level);
    }

    cmd::run(cli.command, &config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fmt_subcommand() {
        let cli = Cli::try_parse_from(["cardwire", "fmt", "cards.vcf", "--upgrade", "-o", "out.vcf"])
            .expect("fmt args should parse");

        let Command::Fmt(args) = cli.command else {
            panic!("expected fmt");
        };
        assert!(args.upgrade);
        assert_eq!(args.io.input, PathBuf::from("cards.vcf"));
        assert_eq!(args.io.output, Some(PathBuf::from("out.vcf")));
    }

    #[test]
    fn input_defaults_to_stdin() {
        let cli = Cli::try_parse_from(["cardwire", "show", "--json"]).expect("show args should parse");
        let Command::Show(args) = cli.command else {
            panic!("expected show");
        };
        assert!(args.json);
        assert_eq!(args.io.input, PathBuf::from("-"));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["cardwire", "upgrade", "--log-level", "debug", "--config", "x.toml"])
            .expect("upgrade args should parse");
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
        assert!(matches!(cli.command, Command::Upgrade(_)));
    }

    #[test]
    fn rejects_unknown_subcommand() {
        let err = Cli::try_parse_from(["cardwire", "explode"]).expect_err("unknown command should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidSubcommand);
    }
}
