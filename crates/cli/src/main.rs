use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use payline_mcp::config::{load_config, load_config_from_path};
use payline_mcp::{McpHttpServer, PaylineConfig, ToolRegistry, build_context, build_core, resolve_bind_address, serve_stdio};
use payline_types::OutputFormat;
use serde_json::{Map, Value};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "payline", version, about = "MCP server for the Payline payment API")]
struct Cli {
    /// Configuration file (defaults to $PAYLINE_CONFIG_PATH or <config dir>/payline/config.json).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve MCP over stdio (default) or streamable HTTP.
    Serve(ServeArgs),
    /// Print the tool catalog as JSON.
    Tools,
    /// Invoke one tool and print its content envelope.
    Call(CallArgs),
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum Transport {
    #[default]
    Stdio,
    Http,
}

#[derive(Debug, Default, Args)]
struct ServeArgs {
    #[arg(long, value_enum, default_value_t = Transport::Stdio)]
    transport: Transport,
    /// Loopback address for the HTTP transport.
    #[arg(long)]
    bind: Option<String>,
    /// text or object
    #[arg(long)]
    output_format: Option<OutputFormat>,
}

#[derive(Debug, Args)]
struct CallArgs {
    /// Tool name, e.g. customerCreate.
    tool: String,
    /// Tool arguments as a JSON object.
    #[arg(long)]
    args: Option<String>,
    #[arg(long)]
    output_format: Option<OutputFormat>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve(ServeArgs::default())) {
        Command::Serve(args) => {
            let config = read_config(cli.config.as_ref())?;
            serve(&config, args).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Tools => {
            let catalog: Vec<Value> = ToolRegistry::default().descriptors().iter().map(|tool| tool.summary()).collect();
            println!("{}", serde_json::to_string_pretty(&catalog)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Call(args) => {
            let config = read_config(cli.config.as_ref())?;
            call(&config, args).await
        }
    }
}

/// Logs go to stderr; stdout carries the stdio MCP channel.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn read_config(path: Option<&PathBuf>) -> Result<PaylineConfig> {
    let config = match path {
        Some(path) => load_config_from_path(path).with_context(|| format!("load configuration from {}", path.display()))?,
        None => load_config().context("load configuration")?,
    };
    Ok(config)
}

async fn serve(config: &PaylineConfig, args: ServeArgs) -> Result<()> {
    let core = build_core(config, args.output_format)?;
    match args.transport {
        Transport::Stdio => serve_stdio(core).await,
        Transport::Http => {
            let bind = args.bind.as_deref().or(config.http_server.bind_address.as_deref());
            let address = resolve_bind_address(bind)?;
            let running = McpHttpServer::new(address, core).start().await?;
            info!(address = %running.bound_address(), "press Ctrl-C to stop");
            tokio::signal::ctrl_c().await.context("wait for Ctrl-C")?;
            info!(clients = running.connected_clients(), "shutting down MCP HTTP server");
            running.stop().await
        }
    }
}

async fn call(config: &PaylineConfig, args: CallArgs) -> Result<ExitCode> {
    let arguments = parse_arguments(args.args.as_deref())?;
    let context = build_context(config, args.output_format)?;
    let registry = ToolRegistry::default();

    match registry.dispatch(&context, &args.tool, arguments).await {
        Ok(envelope) => {
            println!("{}", serde_json::to_string_pretty(&envelope)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => match error.envelope() {
            Some(envelope) => {
                println!("{}", serde_json::to_string_pretty(&envelope)?);
                Ok(ExitCode::FAILURE)
            }
            None => {
                for violation in error.violations_json() {
                    eprintln!("{violation}");
                }
                Err(error.into())
            }
        },
    }
}

fn parse_arguments(raw: Option<&str>) -> Result<Option<Map<String, Value>>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    match serde_json::from_str::<Value>(raw).context("--args must be valid JSON")? {
        Value::Object(map) => Ok(Some(map)),
        other => bail!("--args must be a JSON object, got {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_parses() {
        let cli = Cli::try_parse_from(["payline"]).expect("parse");
        assert!(cli.command.is_none());
    }

    #[test]
    fn serve_accepts_http_transport_and_output_format() {
        let cli = Cli::try_parse_from(["payline", "serve", "--transport", "http", "--bind", "127.0.0.1:7000", "--output-format", "object"])
            .expect("parse");
        let Some(Command::Serve(args)) = cli.command else {
            panic!("expected serve");
        };
        assert!(matches!(args.transport, Transport::Http));
        assert_eq!(args.output_format, Some(OutputFormat::Object));
    }

    #[test]
    fn invalid_output_format_is_rejected() {
        assert!(Cli::try_parse_from(["payline", "serve", "--output-format", "yaml"]).is_err());
    }

    #[test]
    fn call_arguments_must_be_an_object() {
        assert!(parse_arguments(Some(r#"{"customerId": "x"}"#)).expect("object").is_some());
        assert!(parse_arguments(Some("[1, 2]")).is_err());
        assert!(parse_arguments(Some("{")).is_err());
        assert!(parse_arguments(None).expect("none").is_none());
    }
}
