//! CLI argument definitions using clap derive

use crate::config::Config;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// aossession - ArubaOS 8 REST session client
///
/// Logs in to a controller or mobility conductor, caches the session
/// token between runs, and sends configuration API requests.
#[derive(Parser, Debug)]
#[command(name = "aossession")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "AOSSESSION_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

/// Connection overrides, applied on top of config file and environment
#[derive(Args, Debug, Default)]
pub struct ConnectionArgs {
    /// Controller hostname or IP
    #[arg(short = 'H', long, global = true)]
    pub host: Option<String>,

    /// Controller REST API port
    #[arg(long, global = true)]
    pub port: Option<u16>,

    /// API username
    #[arg(short, long, global = true)]
    pub username: Option<String>,

    /// API password (prefer AOS_PASSWORD)
    #[arg(long, global = true)]
    pub password: Option<String>,

    /// Session cache directory
    #[arg(long, global = true)]
    pub cache_dir: Option<PathBuf>,

    /// Do not read or write the session cache
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Verify the controller's TLS certificate
    #[arg(long, global = true)]
    pub verify_tls: bool,
}

impl ConnectionArgs {
    /// Overlay the flags that were given onto `config`
    pub fn apply(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.controller.host = host.clone();
        }
        if let Some(port) = self.port {
            config.controller.port = port;
        }
        if let Some(username) = &self.username {
            config.controller.username = username.clone();
        }
        if let Some(password) = &self.password {
            config.controller.password = password.clone();
        }
        if let Some(dir) = &self.cache_dir {
            config.cache.dir = Some(dir.clone());
        }
        if self.no_cache {
            config.cache.enabled = false;
        }
        if self.verify_tls {
            config.controller.verify_tls = true;
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Establish a session, reusing a cached token when fresh
    Login(LoginArgs),

    /// Terminate the cached session
    Logout,

    /// Run a show command (e.g. show version)
    Show(ShowArgs),

    /// GET a configuration endpoint
    Get(RequestArgs),

    /// POST to a configuration endpoint
    Post(PayloadArgs),

    /// PUT to a configuration endpoint
    Put(PayloadArgs),

    /// Save the running configuration (write memory)
    Write,

    /// Inspect or clear the session cache
    Cache(CacheArgs),

    /// Show or edit configuration
    Config(ConfigArgs),
}

/// Arguments for the login command
#[derive(Parser, Debug)]
pub struct LoginArgs {
    /// Log in even if a fresh cached session exists
    #[arg(short, long)]
    pub force: bool,

    /// Print the session summary as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the show command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Show command words, e.g. `show ap database`
    #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
    pub command: Vec<String>,
}

impl ShowArgs {
    /// Command text as typed on the controller CLI
    pub fn command_line(&self) -> String {
        self.command.join(" ")
    }
}

/// Arguments shared by configuration requests
#[derive(Parser, Debug)]
pub struct RequestArgs {
    /// Endpoint below /v1/configuration/, e.g. object/ap_group
    pub command: String,

    /// Extra query parameter (KEY=VALUE, repeatable)
    #[arg(short, long = "param", value_parser = parse_key_value)]
    pub params: Vec<(String, String)>,

    /// Configuration node to apply the request to, e.g. /md
    #[arg(long)]
    pub config_path: Option<String>,
}

impl RequestArgs {
    /// Borrowed view suitable for `Session` calls
    pub fn param_pairs(&self) -> Vec<(&str, &str)> {
        self.params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }
}

/// Arguments for requests carrying a JSON body
#[derive(Parser, Debug)]
pub struct PayloadArgs {
    #[command(flatten)]
    pub request: RequestArgs,

    /// JSON payload
    #[arg(short, long, conflicts_with = "data_file")]
    pub data: Option<String>,

    /// Read the JSON payload from a file
    #[arg(long)]
    pub data_file: Option<PathBuf>,
}

/// Arguments for the cache command
#[derive(Parser, Debug)]
pub struct CacheArgs {
    /// Subcommand for cache
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// Show the cached session for the configured host
    Status,

    /// Forget the cached session without contacting the controller
    Clear,

    /// Show the cache file path for the configured host
    Path,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., controller.host)
        key: String,

        /// Value to set
        value: String,
    },
}

/// Parse a query parameter in KEY=VALUE format
fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid KEY=VALUE format: no '=' found in '{s}'"))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_key_value_valid() {
        let (k, v) = parse_key_value("filter=ap_name=ap1").unwrap();
        assert_eq!(k, "filter");
        assert_eq!(v, "ap_name=ap1");
    }

    #[test]
    fn parse_key_value_invalid() {
        assert!(parse_key_value("filter").is_err());
    }

    #[test]
    fn cli_parses_show() {
        let cli = Cli::parse_from(["aossession", "show", "show", "ap", "database"]);
        match cli.command {
            Commands::Show(args) => assert_eq!(args.command_line(), "show ap database"),
            _ => panic!("expected Show command"),
        }
    }

    #[test]
    fn cli_parses_get_with_params() {
        let cli = Cli::parse_from([
            "aossession",
            "get",
            "object/ap_group",
            "-p",
            "count=10",
            "--config-path",
            "/md",
        ]);
        match cli.command {
            Commands::Get(args) => {
                assert_eq!(args.command, "object/ap_group");
                assert_eq!(args.param_pairs(), vec![("count", "10")]);
                assert_eq!(args.config_path.as_deref(), Some("/md"));
            }
            _ => panic!("expected Get command"),
        }
    }

    #[test]
    fn cli_rejects_both_payload_sources() {
        let result = Cli::try_parse_from([
            "aossession",
            "post",
            "object/x",
            "--data",
            "{}",
            "--data-file",
            "x.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn connection_flags_override_config() {
        let cli = Cli::parse_from([
            "aossession",
            "--host",
            "ctrl",
            "--port",
            "8443",
            "--no-cache",
            "write",
        ]);
        let mut config = Config::default();
        cli.connection.apply(&mut config);

        assert_eq!(config.controller.host, "ctrl");
        assert_eq!(config.controller.port, 8443);
        assert!(!config.cache.enabled);
        assert!(matches!(cli.command, Commands::Write));
    }
}
