use anyhow::{bail, Context, Result};
use clap::Parser;
use padiprice::{config::Variant, report, DatasetCache, Policy, Province};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Daily rice prices per province on Java, by month"
)]
struct Args {
    /// Semicolon-separated wide price file (Tanggal;Banten;...)
    #[arg(long, default_value = "datahargapadijawa.csv")]
    data: PathBuf,
    /// Preset policy: a (English months, drop zeros) or b (Indonesian, null zeros, 2021-2024)
    #[arg(long, default_value_t = Variant::A)]
    variant: Variant,
    /// YAML policy file; overrides --variant
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(short, long)]
    month: Option<String>,
    #[arg(short, long)]
    province: Option<Province>,
    /// Print the available months and provinces
    #[arg(long)]
    list: bool,
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // ─── 2) policy ───────────────────────────────────────────────────
    let policy = match &args.config {
        Some(path) => Policy::from_yaml_file(path)
            .with_context(|| format!("loading policy {}", path.display()))?,
        None => args.variant.policy(),
    };
    info!(zero = ?policy.zero, locale = ?policy.locale, years = ?policy.years, "policy");

    // ─── 3) load + normalize once ────────────────────────────────────
    let cache = DatasetCache::new(&args.data, policy);
    let dataset = cache
        .get()
        .with_context(|| format!("loading {}", cache.path().display()))?;

    let (month, province) = match (&args.month, args.province) {
        _ if args.list => {
            print_options(&dataset.months(), dataset.provinces());
            return Ok(());
        }
        (None, None) => {
            print_options(&dataset.months(), dataset.provinces());
            return Ok(());
        }
        (Some(m), Some(p)) => (m, p),
        _ => bail!("--month and --province must be given together"),
    };

    // ─── 4) query ────────────────────────────────────────────────────
    let locale = dataset.policy().locale;
    let Some(month) = locale.canonical(month) else {
        bail!("{:?} is not a month name for {:?} locale", month, locale);
    };
    let outcome = dataset.select(month, province);

    if args.json {
        println!("{}", report::render_json(&outcome)?);
    } else {
        println!("{}", report::render_text(&outcome).trim_end());
    }
    Ok(())
}

fn print_options(months: &[&str], provinces: &[Province]) {
    println!("Bulan: {}", months.join(", "));
    let names: Vec<&str> = provinces.iter().map(Province::as_str).collect();
    println!("Provinsi: {}", names.join(", "));
}
