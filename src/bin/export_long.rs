use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use padiprice::{config::Variant, export, process, Policy};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Parquet,
    Csv,
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Normalize the wide price file and write it out in long format"
)]
struct Args {
    #[arg(long, default_value = "datahargapadijawa.csv")]
    data: PathBuf,
    #[arg(long, default_value_t = Variant::A)]
    variant: Variant,
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(short, long)]
    out: PathBuf,
    #[arg(long, value_enum, default_value_t = Format::Parquet)]
    format: Format,
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let args = Args::parse();
    let start = Instant::now();

    let policy = match &args.config {
        Some(path) => Policy::from_yaml_file(path)
            .with_context(|| format!("loading policy {}", path.display()))?,
        None => args.variant.policy(),
    };

    let raw = process::load(&args.data)
        .with_context(|| format!("loading {}", args.data.display()))?;
    let dataset = process::normalize(&raw, &policy);

    let rows = match args.format {
        Format::Parquet => export::write_parquet(&dataset, &args.out),
        Format::Csv => export::write_csv(&dataset, &args.out),
    }
    .with_context(|| format!("writing {}", args.out.display()))?;

    info!(rows, out = %args.out.display(), elapsed = ?start.elapsed(), "export finished");
    Ok(())
}
