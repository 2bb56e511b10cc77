// Readable view CLI
//
// `translate` prints the readable text of a saved page.
// `serve` answers toggle requests (JSON lines on stdin) for one page.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kodegen_tools_readable::{
    ReadableConfig, ReadableConfigBuilder, ReadableView, page_channel, translate_html_async,
};
use std::io::Read;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

#[derive(Parser)]
#[command(
    name = "kodegen-readable",
    about = "Flatten web pages into readable markdown-like text"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a saved HTML page and print the readable view
    Translate {
        /// HTML file to read, or `-` for stdin
        input: PathBuf,
        /// Location the page was loaded from (resolves links)
        #[arg(short, long)]
        url: Option<String>,
        /// JSON configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Mark section boundaries in the output
        #[arg(long)]
        dividers: bool,
    },
    /// Answer toggle requests for a page, one JSON object per line
    Serve {
        /// HTML file to read; stdin carries the control requests
        input: PathBuf,
        /// Location the page was loaded from (resolves links)
        #[arg(short, long)]
        url: Option<String>,
        /// JSON configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Write the displayed page to stderr after every request
        #[arg(long)]
        print_view: bool,
    },
}

fn load_config(path: Option<&Path>, url: Option<String>, dividers: bool) -> Result<ReadableConfig> {
    let base = match path {
        Some(path) => ReadableConfig::from_json_file(path)?,
        None => ReadableConfig::default(),
    };

    let mut builder = ReadableConfigBuilder::from(base);
    if let Some(url) = url {
        builder = builder.base_url(url);
    }
    if dividers {
        builder = builder.section_dividers(true);
    }
    builder.build()
}

fn read_input(input: &Path) -> Result<String> {
    if input == Path::new("-") {
        let mut html = String::new();
        std::io::stdin()
            .read_to_string(&mut html)
            .context("Failed to read HTML from stdin")?;
        Ok(html)
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read {}", input.display()))
    }
}

async fn serve(html: String, config: ReadableConfig, print_view: bool) -> Result<()> {
    let (_page_tx, page_rx) = page_channel(html, true);
    let mut view = ReadableView::new(page_rx, config);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await.context("Failed to read control request")? {
        if line.trim().is_empty() {
            continue;
        }

        let reply = view.handle_message(&line).await;
        stdout.write_all(reply.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;

        if print_view {
            eprintln!("{}", view.displayed());
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Translate {
            input,
            url,
            config,
            dividers,
        } => {
            let config = load_config(config.as_deref(), url, dividers)?;
            let html = read_input(&input)?;
            let text = translate_html_async(&html, &config).await?;
            println!("{text}");
            Ok(())
        }
        Commands::Serve {
            input,
            url,
            config,
            print_view,
        } => {
            if input == Path::new("-") {
                anyhow::bail!("serve reads control requests from stdin; pass the page as a file");
            }
            let config = load_config(config.as_deref(), url, false)?;
            let html = read_input(&input)?;
            serve(html, config, print_view).await
        }
    }
}
