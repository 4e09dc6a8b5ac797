use std::path::PathBuf;

use clap::Parser;
use log::{error, info};

use relog::{Compiler, Config, ErrorKind, OutputFormat};

#[derive(Parser)]
#[command(name = "relog")]
#[command(about = "Compile a repository's release notes into a changelog")]
struct Cli {
    /// Output format: markdown, text, json or rtf
    #[arg(short, long, default_value = "markdown")]
    format: String,

    /// Repository as owner/name, overrides GITHUB_REPOSITORY
    #[arg(short, long)]
    repo: Option<String>,

    /// Output file, defaults to the format's conventional name
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the document to standard output instead of writing a file
    #[arg(long, action)]
    stdout: bool,
}

#[tokio::main]
async fn main() {
    // Log everything in debug builds, keep release builds at info.
    if cfg!(debug_assertions) {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::max())
            .init();
    } else {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    let cli = Cli::parse();
    std::process::exit(run(cli).await);
}

async fn run(cli: Cli) -> i32 {
    let format = match cli.format.parse::<OutputFormat>() {
        Ok(format) => format,
        Err(message) => {
            error!("{}", message);
            return 2;
        }
    };

    let config = match Config::resolve(cli.repo.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            error!("{}", err);
            return 2;
        }
    };

    info!("Compiling {} changelog for {}", format, config.repo);
    let compiler = Compiler::new(config);
    let content = match compiler.compile(format).await {
        Ok(content) => content,
        Err(err) => {
            error!("{}", err);
            return exit_code(err.kind);
        }
    };

    if cli.stdout {
        print!("{}", content);
        return 0;
    }

    let path = cli
        .output
        .unwrap_or_else(|| PathBuf::from(format.default_output_path()));
    match compiler.write_output(&content, &path).await {
        Ok(()) => 0,
        Err(err) => {
            error!("{}", err);
            exit_code(err.kind)
        }
    }
}

fn exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Configuration => 2,
        ErrorKind::RateLimit => 3,
        _ => 1,
    }
}
