use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Your AI Council MCP server.
#[derive(Debug, Clone, Parser)]
#[command(name = "council-server", version, about)]
pub struct Cli {
    /// Address to bind the HTTP listener to.
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = 8001)]
    pub port: u16,

    /// Directory holding the built widget bundles (your-ai-council-*.css / *.js).
    #[arg(long, default_value = "assets")]
    pub assets_dir: PathBuf,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Plain,
    Json,
}

impl Cli {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Default filter directive when `RUST_LOG` is not set.
    pub fn default_log_filter(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "info"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_bind_all_interfaces_on_8001() {
        let cli = Cli::parse_from(["council-server"]);
        assert_eq!(cli.bind_addr(), "0.0.0.0:8001");
        assert_eq!(cli.assets_dir, PathBuf::from("assets"));
        assert_eq!(cli.log_format, LogFormat::Plain);
        assert_eq!(cli.default_log_filter(), "info");
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "council-server",
            "--host",
            "127.0.0.1",
            "-p",
            "9000",
            "--debug",
            "--log-format",
            "json",
        ]);
        assert_eq!(cli.bind_addr(), "127.0.0.1:9000");
        assert_eq!(cli.default_log_filter(), "debug");
        assert_eq!(cli.log_format, LogFormat::Json);
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
