//! CLI definitions for the `chatrelay` binary.
//!
//! Uses clap derive macros for argument parsing. With no subcommand the
//! binary starts the relay server; the serve flags (and their `CHATRELAY_*`
//! environment fallbacks) are accepted on the bare command too.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use chatrelay_observe::tracing_setup::LogFormat;

/// Default bind address.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listen port.
pub const DEFAULT_PORT: u16 = 5006;

/// Default configuration file path.
pub const DEFAULT_CONFIG: &str = "chatrelay.toml";

/// Relay chat messages from a web client to Google Gemini.
#[derive(Parser)]
#[command(name = "chatrelay", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log output format (text or json).
    #[arg(long, global = true, default_value_t = LogFormat::Text, env = "CHATRELAY_LOG_FORMAT")]
    pub log_format: LogFormat,

    /// Export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    /// Serve settings used when no subcommand is given.
    #[command(flatten)]
    pub serve: ServeArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the relay server (default).
    Serve(ServeArgs),
}

/// Arguments for `chatrelay serve`.
#[derive(clap::Args, Debug, Clone)]
pub struct ServeArgs {
    /// Host to bind to.
    #[arg(long, default_value = DEFAULT_HOST, env = "CHATRELAY_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "CHATRELAY_PORT")]
    pub port: u16,

    /// Path to the relay configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG, env = "CHATRELAY_CONFIG")]
    pub config: PathBuf,
}

impl Cli {
    /// Filter directives for the requested verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "info",
            1 => "info,chatrelay=debug,chatrelay_core=debug,chatrelay_infra=debug",
            _ => "trace",
        }
    }

    /// Serve arguments of the subcommand, or of the bare command.
    pub fn serve_args(&self) -> ServeArgs {
        match &self.command {
            Some(Commands::Serve(args)) => args.clone(),
            None => self.serve.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Serializes tests that read or write `CHATRELAY_PORT`.
    static PORT_ENV: Mutex<()> = Mutex::new(());

    #[test]
    fn no_subcommand_serves_with_defaults() {
        let _guard = PORT_ENV.lock().unwrap_or_else(|e| e.into_inner());
        let cli = Cli::try_parse_from(["chatrelay"]).unwrap();
        let args = cli.serve_args();
        assert_eq!(args.host, "0.0.0.0");
        assert_eq!(args.port, 5006);
        assert_eq!(args.config, PathBuf::from("chatrelay.toml"));
        assert_eq!(cli.log_filter(), "info");
    }

    #[test]
    fn no_subcommand_reads_env_fallbacks() {
        let _guard = PORT_ENV.lock().unwrap_or_else(|e| e.into_inner());
        // SAFETY: every test touching this variable holds PORT_ENV.
        unsafe { std::env::set_var("CHATRELAY_PORT", "8080") };

        let bare = Cli::try_parse_from(["chatrelay"]).map(|cli| cli.serve_args().port);
        let serve = Cli::try_parse_from(["chatrelay", "serve"]).map(|cli| cli.serve_args().port);

        // SAFETY: as above.
        unsafe { std::env::remove_var("CHATRELAY_PORT") };

        assert_eq!(bare.unwrap(), 8080);
        assert_eq!(serve.unwrap(), 8080);
    }

    #[test]
    fn bare_command_accepts_serve_flags() {
        let cli = Cli::try_parse_from(["chatrelay", "--host", "127.0.0.1", "-p", "9000"]).unwrap();
        let args = cli.serve_args();
        assert_eq!(args.host, "127.0.0.1");
        assert_eq!(args.port, 9000);
    }

    #[test]
    fn serve_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "chatrelay",
            "serve",
            "--host",
            "127.0.0.1",
            "--port",
            "8080",
            "--config",
            "/etc/chatrelay.toml",
        ])
        .unwrap();
        let args = cli.serve_args();
        assert_eq!(args.host, "127.0.0.1");
        assert_eq!(args.port, 8080);
        assert_eq!(args.config, PathBuf::from("/etc/chatrelay.toml"));
    }

    #[test]
    fn verbosity_selects_filter() {
        let quiet = Cli::try_parse_from(["chatrelay", "--quiet"]).unwrap();
        assert_eq!(quiet.log_filter(), "error");

        let trace = Cli::try_parse_from(["chatrelay", "-vv"]).unwrap();
        assert_eq!(trace.log_filter(), "trace");
    }

    #[test]
    fn log_format_parses() {
        let cli = Cli::try_parse_from(["chatrelay", "--log-format", "json"]).unwrap();
        assert_eq!(cli.log_format, LogFormat::Json);
        assert!(Cli::try_parse_from(["chatrelay", "--log-format", "xml"]).is_err());
    }
}
