//! zoneedit-ddns - ZoneEdit Dynamic DNS updater.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use zoneedit_ddns::config::{self, Cli, EnvConfig, Settings};
use zoneedit_ddns::detector::IpDetector;
use zoneedit_ddns::error::DdnsError;
use zoneedit_ddns::zoneedit::ZoneEditClient;

/// All hosts updated successfully.
const EXIT_SUCCESS: i32 = 0;
/// At least one host update failed.
const EXIT_UPDATE_FAILED: i32 = 1;
/// Missing credentials/hosts/IP, or detection failed.
const EXIT_CONFIG_ERROR: i32 = 2;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let code = run(cli, EnvConfig::from_env()).await;
    std::process::exit(code);
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "zoneedit_ddns=debug" } else { "warn" };

    // Diagnostics go to stderr; stdout carries only result lines.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli, env: EnvConfig) -> i32 {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(config::default_config_path);
    let file = config::read_file_config(&config_path).into_config();
    let settings = Settings::resolve(&cli, env, file);

    if let Err(e) = settings.validate() {
        eprintln!("{}", e);
        return EXIT_CONFIG_ERROR;
    }

    let ip = match &settings.ip {
        Some(ip) => ip.clone(),
        None => {
            if cli.no_detect {
                let e = DdnsError::Config("--ip not provided and --no-detect set".to_string());
                eprintln!("{}", e);
                return EXIT_CONFIG_ERROR;
            }

            let detector = IpDetector::new(settings.timeout);
            match detector.detect_ipv4().await {
                Ok(ip) => {
                    if settings.verbose && !settings.quiet {
                        println!("Detected public IP: {}", ip);
                    }
                    ip
                }
                Err(e) => {
                    eprintln!("{}", e);
                    return EXIT_CONFIG_ERROR;
                }
            }
        }
    };

    let client = ZoneEditClient::new(
        settings.user.clone(),
        settings.token.clone(),
        settings.timeout,
    );

    update_hosts(&client, &settings, &ip).await
}

/// Update every host in order, one attempt each, and compute the exit code.
async fn update_hosts(client: &ZoneEditClient, settings: &Settings, ip: &str) -> i32 {
    let mut failed = 0usize;
    for host in &settings.hosts {
        let result = client.update(host, ip).await;

        if !settings.quiet {
            let tag = if result.success { "OK" } else { "FAIL" };
            println!(
                "[{}] host={} ip={} http={} body={}",
                tag,
                result.host,
                ip,
                result.http_status,
                result.body.trim()
            );
        }

        if !result.success {
            failed += 1;
        }
    }

    if failed > 0 {
        EXIT_UPDATE_FAILED
    } else {
        EXIT_SUCCESS
    }
}
