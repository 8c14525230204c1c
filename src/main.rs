//! linecmd - Interactive Command REPL
//!
//! This is the main entry point for the linecmd REPL.
//! It reads lines from stdin, executes commands and writes replies to stdout.
//! Logs go to stderr.

use anyhow::{bail, Context};
use linecmd::commands::CommandHandler;
use linecmd::parser::{ParserOptions, DEFAULT_INDICATOR};
use linecmd::session::Session;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// REPL configuration
struct Config {
    /// Prefix that marks a line as a command
    indicator: String,
    /// Compare command words literally
    case_sensitive: bool,
    /// Treat everything after the indicator as the command word
    whole_line: bool,
    /// Extra commands to know from the start
    commands: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indicator: DEFAULT_INDICATOR.to_string(),
            case_sensitive: false,
            whole_line: false,
            commands: Vec::new(),
        }
    }
}

impl Config {
    /// Parse configuration from command-line arguments
    fn from_args() -> anyhow::Result<Self> {
        let mut config = Config::default();
        let mut args = std::env::args().skip(1);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--indicator" | "-i" => {
                    config.indicator = args.next().context("--indicator requires a value")?;
                }
                "--command" | "-c" => {
                    config
                        .commands
                        .push(args.next().context("--command requires a value")?);
                }
                "--case-sensitive" => config.case_sensitive = true,
                "--whole-line" => config.whole_line = true,
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                "--version" | "-v" => {
                    println!("linecmd version {}", linecmd::VERSION);
                    std::process::exit(0);
                }
                other => {
                    print_help();
                    bail!("unknown argument: {}", other);
                }
            }
        }

        Ok(config)
    }

    /// Warning shown when the chosen options disable some built-in commands
    fn startup_warning(&self) -> Option<&'static str> {
        self.whole_line.then_some(
            "--whole-line is set: commands that take arguments (learn, known, tokenize, \
             count, repeat, ping <message>) will be reported as unknown",
        )
    }

    /// Builds the parser options for the command handler
    fn parser_options(&self) -> ParserOptions {
        ParserOptions {
            indicator: self.indicator.clone(),
            case_sensitive: self.case_sensitive,
            known_commands: self.commands.clone(),
            split_on_first_space: !self.whole_line,
        }
    }
}

fn print_help() {
    println!(
        r#"
linecmd - Interactive command REPL

USAGE:
    linecmd [OPTIONS]

OPTIONS:
    -i, --indicator <PREFIX>  Command prefix (default: !)
    -c, --command <NAME>      Extra known command (repeatable)
        --case-sensitive      Compare command words literally
        --whole-line          Treat everything after the prefix as the command.
                              Commands that take arguments (learn, known,
                              tokenize, count, repeat) become unreachable.
    -v, --version             Print version information
    -h, --help                Print this help message

EXAMPLES:
    linecmd                          # Commands start with !
    linecmd --indicator /            # Commands start with /
    linecmd -c roll -c flip          # Also know 'roll' and 'flip'

SESSION:
    > !help
    > !tokenize a "b c" d
    1) a
    2) b c
    3) d
    > !repeat hi x2
    1) hi
    2) hi
    > !quit
    bye
"#
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command-line arguments
    let config = Config::from_args()?;

    // Set up logging (stdout belongs to the session)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    if let Some(warning) = config.startup_warning() {
        warn!("{}", warning);
    }

    let handler = CommandHandler::new(config.parser_options());
    info!(
        version = linecmd::VERSION,
        indicator = %config.indicator,
        case_sensitive = config.case_sensitive,
        whole_line = config.whole_line,
        "linecmd ready"
    );

    let session = Session::new(tokio::io::stdin(), tokio::io::stdout(), handler);

    // Set up graceful shutdown
    let shutdown = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Shutdown signal received, stopping session...");
    };

    tokio::select! {
        result = session.run() => {
            let stats = result?;
            info!(
                lines = stats.lines_read,
                commands = stats.commands_executed,
                ignored = stats.lines_ignored,
                errors = stats.errors,
                "Session stats"
            );
        }
        _ = shutdown => {}
    }

    info!("Shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_no_warning() {
        let config = Config::default();
        assert!(config.startup_warning().is_none());
        assert!(config.parser_options().split_on_first_space);
    }

    #[test]
    fn test_whole_line_warns_about_argument_commands() {
        let config = Config {
            whole_line: true,
            ..Default::default()
        };
        let warning = config.startup_warning().unwrap();
        assert!(warning.contains("--whole-line"));
        assert!(warning.contains("learn"));

        // The warning matches what the handler actually does in this mode
        let mut handler = CommandHandler::new(config.parser_options());
        assert!(handler.execute("!learn foo").is_some_and(|r| r.is_error()));
        assert!(handler.execute("!help").is_some_and(|r| !r.is_error()));
    }
}
