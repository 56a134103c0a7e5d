use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use slackdown_webhook::WebhookConfig;

#[derive(Parser)]
#[command(name = "slackdown")]
#[command(about = "Render Markdown for Slack and post it to incoming webhooks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render Markdown to stdout without sending anything.
    Render {
        /// Markdown file; reads stdin when omitted.
        input: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = Format::Blockkit)]
        format: Format,
        /// Wrap mrkdwn prose at this many columns.
        #[arg(long, value_name = "COLUMNS")]
        width: Option<usize>,
    },
    /// Render Markdown and post it to a configured webhook.
    Send {
        /// Markdown file; reads stdin when omitted.
        input: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = Format::Blockkit)]
        format: Format,
        /// Channel name from the webhook table; defaults to the first entry.
        #[arg(long)]
        channel: Option<String>,
    },
    /// List the channel names configured in the webhook table.
    Channels,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Blockkit,
    Mrkdwn,
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Render {
            input,
            format,
            width,
        } => handle_render(input, format, width),
        Command::Send {
            input,
            format,
            channel,
        } => handle_send(input, format, channel.as_deref()),
        Command::Channels => handle_channels(),
    }
}

fn handle_render(input: Option<PathBuf>, format: Format, width: Option<usize>) -> Result<()> {
    let document = slackdown_document::parse(&read_input(input)?);
    match format {
        Format::Blockkit => {
            let blocks = slackdown_blockkit::render(&document);
            println!("{}", serde_json::to_string_pretty(&blocks)?);
        }
        Format::Mrkdwn => {
            println!("{}", slackdown_mrkdwn::render_with_width(&document, width));
        }
    }
    Ok(())
}

fn handle_send(input: Option<PathBuf>, format: Format, channel: Option<&str>) -> Result<()> {
    let config = WebhookConfig::from_env()?;
    let document = slackdown_document::parse(&read_input(input)?);
    match format {
        Format::Blockkit => {
            let blocks = slackdown_blockkit::render(&document);
            slackdown_webhook::send_blocks(&config, channel, &blocks)?;
        }
        Format::Mrkdwn => {
            let text = slackdown_mrkdwn::render(&document);
            slackdown_webhook::send_text(&config, channel, &text)?;
        }
    }
    eprintln!("message sent");
    Ok(())
}

fn handle_channels() -> Result<()> {
    let config = WebhookConfig::from_env()?;
    for channel in config.channels() {
        if channel.is_empty() {
            println!("(default)");
        } else {
            println!("{channel}");
        }
    }
    Ok(())
}

fn read_input(input: Option<PathBuf>) -> Result<String> {
    match input {
        Some(path) => {
            fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("read stdin")?;
            Ok(buf)
        }
    }
}
