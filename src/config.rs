//! Configuration resolution for zoneedit-ddns.
//!
//! Settings are merged from three sources with fixed precedence:
//! CLI flags, then `ZONEEDIT_*` environment variables, then an optional
//! TOML file. Scalar fields take the first non-empty value in that order;
//! the host list is the deduplicated union of all three sources.

use crate::error::{DdnsError, Result};
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Update ZoneEdit Dynamic DNS records for one or more hosts.
#[derive(Debug, Parser)]
#[command(name = "zoneedit-ddns")]
#[command(about = "Update ZoneEdit Dynamic DNS records")]
#[command(version)]
pub struct Cli {
    /// ZoneEdit username
    #[arg(long)]
    pub user: Option<String>,

    /// ZoneEdit dynamic DNS token (not the account password)
    #[arg(long)]
    pub token: Option<String>,

    /// Hostname to update (repeat for multiple)
    #[arg(long = "host")]
    pub hosts: Vec<String>,

    /// Use this IP instead of auto-detecting
    #[arg(long)]
    pub ip: Option<String>,

    /// Path to TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = 10.0)]
    pub timeout: f64,

    /// Do not auto-detect IP if --ip is missing (error instead)
    #[arg(long = "no-detect")]
    pub no_detect: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

/// Environment-sourced configuration values.
///
/// Captured once by [`EnvConfig::from_env`] and passed by value into
/// resolution, so tests can build fixtures without touching process env.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub user: Option<String>,
    pub token: Option<String>,
    /// Comma-separated host list.
    pub hosts: Option<String>,
}

impl EnvConfig {
    /// Capture `ZONEEDIT_USER`, `ZONEEDIT_TOKEN` and `ZONEEDIT_HOSTS`.
    pub fn from_env() -> Self {
        Self {
            user: std::env::var("ZONEEDIT_USER").ok(),
            token: std::env::var("ZONEEDIT_TOKEN").ok(),
            hosts: std::env::var("ZONEEDIT_HOSTS").ok(),
        }
    }
}

/// File-sourced configuration values.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct FileConfig {
    pub user: Option<String>,
    pub token: Option<String>,
    pub hosts: Option<Vec<String>>,
}

/// Outcome of loading the config file.
///
/// `Missing` and `Invalid` both degrade to an empty configuration; the
/// distinction exists so call sites and tests can see which happened.
#[derive(Debug)]
pub enum FileSource {
    Loaded(FileConfig),
    Missing,
    Invalid(String),
}

impl FileSource {
    /// Degrade to a usable config, warning when the file was unreadable
    /// or unparseable.
    pub fn into_config(self) -> FileConfig {
        match self {
            FileSource::Loaded(config) => config,
            FileSource::Missing => FileConfig::default(),
            FileSource::Invalid(reason) => {
                tracing::warn!("Ignoring config file: {}", reason);
                FileConfig::default()
            }
        }
    }
}

/// Read the config file at `path`.
///
/// A missing file is not an error, and neither is one that fails to read
/// or parse; both map to variants the caller folds into empty config.
pub fn read_file_config(path: &Path) -> FileSource {
    if !path.exists() {
        return FileSource::Missing;
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => return FileSource::Invalid(format!("{}: {}", path.display(), e)),
    };

    match toml::from_str(&content) {
        Ok(config) => FileSource::Loaded(config),
        Err(e) => FileSource::Invalid(format!("{}: {}", path.display(), e)),
    }
}

/// Get the default config file path.
pub fn default_config_path() -> PathBuf {
    let candidates = [
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|d| d.join("config/zoneedit.toml"))),
        dirs::config_dir().map(|p| p.join("zoneedit-ddns/config.toml")),
        Some(PathBuf::from("config/zoneedit.toml")),
    ];

    for candidate in candidates.into_iter().flatten() {
        if candidate.exists() {
            return candidate;
        }
    }

    PathBuf::from("config/zoneedit.toml")
}

/// Fully merged run settings, built once and immutable thereafter.
#[derive(Debug, Clone)]
pub struct Settings {
    pub user: String,
    pub token: String,
    pub hosts: Vec<String>,
    pub ip: Option<String>,
    pub timeout: Duration,
    pub verbose: bool,
    pub quiet: bool,
}

impl Settings {
    /// Merge CLI, env and file sources into final settings.
    ///
    /// `user` and `token` take the first non-empty value in CLI > env >
    /// file order. `hosts` is a union, not an override: values are
    /// appended in that same source order and deduplicated keeping the
    /// first occurrence.
    pub fn resolve(cli: &Cli, env: EnvConfig, file: FileConfig) -> Self {
        let user = first_non_empty([cli.user.as_deref(), env.user.as_deref(), file.user.as_deref()]);
        let token = first_non_empty([
            cli.token.as_deref(),
            env.token.as_deref(),
            file.token.as_deref(),
        ]);

        let mut hosts: Vec<String> = Vec::new();
        let mut push_host = |h: &str| {
            let h = h.trim();
            if !h.is_empty() && !hosts.iter().any(|seen| seen == h) {
                hosts.push(h.to_string());
            }
        };
        for host in &cli.hosts {
            push_host(host);
        }
        if let Some(env_hosts) = &env.hosts {
            for host in env_hosts.split(',') {
                push_host(host);
            }
        }
        for host in file.hosts.unwrap_or_default() {
            push_host(&host);
        }

        Self {
            user,
            token,
            hosts,
            ip: cli.ip.clone(),
            timeout: Duration::from_secs_f64(cli.timeout),
            verbose: cli.verbose,
            quiet: cli.quiet,
        }
    }

    /// Check that credentials and at least one host are present.
    pub fn validate(&self) -> Result<()> {
        if self.user.is_empty() || self.token.is_empty() {
            return Err(DdnsError::Config(
                "ZoneEdit user and token are required (via flags, environment, or config file)"
                    .to_string(),
            ));
        }
        if self.hosts.is_empty() {
            return Err(DdnsError::Config(
                "at least one host is required (via --host, ZONEEDIT_HOSTS, or config file)"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

fn first_non_empty(candidates: [Option<&str>; 3]) -> String {
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("zoneedit-ddns").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_wins_for_user_and_token() {
        let cli = parse(&["--user", "cli-user", "--token", "cli-token"]);
        let env = EnvConfig {
            user: Some("env-user".to_string()),
            token: Some("env-token".to_string()),
            hosts: None,
        };
        let file = FileConfig {
            user: Some("file-user".to_string()),
            token: Some("file-token".to_string()),
            hosts: None,
        };

        let settings = Settings::resolve(&cli, env, file);
        assert_eq!(settings.user, "cli-user");
        assert_eq!(settings.token, "cli-token");
    }

    #[test]
    fn test_env_beats_file() {
        let cli = parse(&[]);
        let env = EnvConfig {
            user: Some("env-user".to_string()),
            token: None,
            hosts: None,
        };
        let file = FileConfig {
            user: Some("file-user".to_string()),
            token: Some("file-token".to_string()),
            hosts: None,
        };

        let settings = Settings::resolve(&cli, env, file);
        assert_eq!(settings.user, "env-user");
        assert_eq!(settings.token, "file-token");
    }

    #[test]
    fn test_empty_values_fall_through() {
        let cli = parse(&["--user", ""]);
        let env = EnvConfig {
            user: Some(String::new()),
            token: None,
            hosts: None,
        };
        let file = FileConfig {
            user: Some("file-user".to_string()),
            token: None,
            hosts: None,
        };

        let settings = Settings::resolve(&cli, env, file);
        assert_eq!(settings.user, "file-user");
        assert_eq!(settings.token, "");
    }

    #[test]
    fn test_hosts_union_preserves_first_seen_order() {
        let cli = parse(&["--host", "a.example.com", "--host", "b.example.com"]);
        let env = EnvConfig {
            user: None,
            token: None,
            hosts: Some("b.example.com, c.example.com".to_string()),
        };
        let file = FileConfig {
            user: None,
            token: None,
            hosts: Some(vec![
                "a.example.com".to_string(),
                "d.example.com".to_string(),
            ]),
        };

        let settings = Settings::resolve(&cli, env, file);
        assert_eq!(
            settings.hosts,
            vec!["a.example.com", "b.example.com", "c.example.com", "d.example.com"]
        );
    }

    #[test]
    fn test_env_hosts_trimmed_and_empties_dropped() {
        let cli = parse(&[]);
        let env = EnvConfig {
            user: None,
            token: None,
            hosts: Some(" a.example.com ,, b.example.com,".to_string()),
        };

        let settings = Settings::resolve(&cli, env, FileConfig::default());
        assert_eq!(settings.hosts, vec!["a.example.com", "b.example.com"]);
    }

    #[test]
    fn test_timeout_default_and_override() {
        let cli = parse(&[]);
        let settings = Settings::resolve(&cli, EnvConfig::default(), FileConfig::default());
        assert_eq!(settings.timeout, Duration::from_secs_f64(10.0));

        let cli = parse(&["--timeout", "2.5"]);
        let settings = Settings::resolve(&cli, EnvConfig::default(), FileConfig::default());
        assert_eq!(settings.timeout, Duration::from_secs_f64(2.5));
    }

    #[test]
    fn test_ip_comes_only_from_cli() {
        let cli = parse(&["--ip", "203.0.113.10"]);
        let settings = Settings::resolve(&cli, EnvConfig::default(), FileConfig::default());
        assert_eq!(settings.ip.as_deref(), Some("203.0.113.10"));
    }

    #[test]
    fn test_missing_file_is_empty_config() {
        let source = read_file_config(Path::new("/nonexistent/zoneedit.toml"));
        assert!(matches!(source, FileSource::Missing));

        let config = source.into_config();
        assert!(config.user.is_none());
        assert!(config.hosts.is_none());
    }

    #[test]
    fn test_unparseable_file_is_empty_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "this is not a toml mapping").unwrap();

        let source = read_file_config(file.path());
        assert!(matches!(source, FileSource::Invalid(_)));

        let config = source.into_config();
        assert!(config.user.is_none());
        assert!(config.token.is_none());
        assert!(config.hosts.is_none());
    }

    #[test]
    fn test_file_values_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "user = \"file-user\"\ntoken = \"file-token\"\nhosts = [\"home.example.com\"]"
        )
        .unwrap();

        let source = read_file_config(file.path());
        let config = match source {
            FileSource::Loaded(config) => config,
            other => panic!("expected Loaded, got {:?}", other),
        };
        assert_eq!(config.user.as_deref(), Some("file-user"));
        assert_eq!(config.token.as_deref(), Some("file-token"));
        assert_eq!(config.hosts, Some(vec!["home.example.com".to_string()]));
    }

    #[test]
    fn test_validate_requires_credentials_then_hosts() {
        let cli = parse(&["--host", "home.example.com"]);
        let settings = Settings::resolve(&cli, EnvConfig::default(), FileConfig::default());
        assert!(settings.validate().is_err());

        let cli = parse(&["--user", "u", "--token", "t"]);
        let settings = Settings::resolve(&cli, EnvConfig::default(), FileConfig::default());
        assert!(settings.validate().is_err());

        let cli = parse(&["--user", "u", "--token", "t", "--host", "home.example.com"]);
        let settings = Settings::resolve(&cli, EnvConfig::default(), FileConfig::default());
        assert!(settings.validate().is_ok());
    }
}
