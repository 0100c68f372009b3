use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use objadm_cli::commands::AdminCommands;
use objadm_cli::connection::{AdminEnv, ConnectionOptions};
use objadm_cli::output::{OutputFormat, Printer};
use objadm_cli::style::Theme;
use objadm_logging::LogConfig;

/// objadm administration tool
///
/// Manages identity providers and policy associations of an object-storage
/// cluster. Targets are aliases from the configuration file; `play`, `play/`
/// and `play/bucket` all address the alias `play`.
#[derive(Parser, Debug)]
#[command(name = "objadm", version, about)]
struct Cli {
    /// Connection options.
    #[command(flatten)]
    connection: ConnectionOptions,

    /// Output format (table or json).
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Disable colored output.
    #[arg(long, global = true, default_value_t = false)]
    no_color: bool,

    /// Enable verbose logging.
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    /// Also write logs to daily-rotated files in this directory.
    #[arg(long, global = true, env = "OBJADM_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// Emit logs as JSON.
    #[arg(long, global = true, default_value_t = false)]
    log_json: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    command: AdminCommands,
}

/// Exit code for a failed argument parse: 0 when clap printed help or
/// version to stdout, 1 for a genuine usage error.
fn parse_exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() {
        1
    } else {
        0
    }
}

/// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = parse_exit_code(&e);
            e.print()?;
            std::process::exit(code);
        }
    };

    let log_config = LogConfig {
        level: if cli.verbose { "debug" } else { "warn" }.to_string(),
        log_dir: cli.log_dir.clone(),
        json_format: cli.log_json,
        ..Default::default()
    };
    let guard = objadm_logging::init_logging(&log_config).context("failed to initialize logging")?;

    let theme = Theme::new(!cli.no_color && std::io::stdout().is_terminal());
    let mut printer = Printer::stdio(cli.format, theme);
    let env = AdminEnv::new(cli.connection);

    if let Err(e) = cli.command.run_until(&env, &mut printer, ctrl_c()).await {
        // process::exit skips destructors; flush file logs first.
        drop(guard);
        std::process::exit(e.exit_code());
    }
    Ok(())
}
