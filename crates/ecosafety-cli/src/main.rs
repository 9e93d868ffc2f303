use anyhow::{Context, Result};
use clap::Parser;
use ecosafety_cli::{certify, load_nodes_path, CertificationReport};
use ecosafety_core::CertificationConfig;
use prometheus::{Encoder, Registry, TextEncoder};
use prometheus_bridge::{reject_if_gate_failed, EcoSafetyMetrics};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ecosafety", about = "CEIM/CPVM eco-safety certification batch driver")]
struct Args {
    /// Node-row CSV export (header line + one row per node/contaminant).
    #[arg(long)]
    nodes: PathBuf,

    /// Certification config (JSON). Defaults to the daily Phoenix run.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overrides the config's window length.
    #[arg(long)]
    window_seconds: Option<f64>,

    #[arg(long, default_value = "phoenix")]
    site_id: String,

    /// Writes the JSON certification report here.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Prints the Prometheus text exposition after the run.
    #[arg(long)]
    metrics: bool,

    #[arg(long)]
    json_logs: bool,
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config(args: &Args) -> Result<CertificationConfig> {
    let mut cfg = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            CertificationConfig::from_json(&raw)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => CertificationConfig::default(),
    };
    if let Some(window) = args.window_seconds {
        cfg.window_seconds = window;
    }
    Ok(cfg)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.json_logs);

    let cfg = load_config(&args)?;
    let loaded = load_nodes_path(&args.nodes)
        .with_context(|| format!("loading nodes from {}", args.nodes.display()))?;

    let outcome = certify(&loaded.rows, &cfg)?;

    println!("{} CEIM Kn estimates:", args.site_id);
    for r in &outcome.impacts {
        println!(
            "{},{},Kn={},Kn_sigma={}",
            r.node_id, r.contaminant, r.kn, r.kn_sigma
        );
    }
    println!(
        "CPVM final mass={} risk={}",
        outcome.state.state_mass, outcome.state.state_risk
    );

    let registry = Registry::new();
    let metrics = EcoSafetyMetrics::register(&registry)?;
    metrics.observe_impacts(&outcome.impacts);
    metrics.observe_state(&args.site_id, &outcome.state);
    if reject_if_gate_failed(
        &metrics,
        &args.site_id,
        &outcome.conservation,
        &outcome.stability,
    ) {
        warn!(site_id = %args.site_id, "safety state not certified");
    } else {
        info!(site_id = %args.site_id, "safety state certified");
    }

    if let Some(path) = &args.report {
        let report = CertificationReport::from_outcome(
            &args.site_id,
            cfg.window_seconds,
            loaded.skipped,
            &outcome,
        );
        fs::write(path, report.to_json_pretty()?)
            .with_context(|| format!("writing report {}", path.display()))?;
        info!(path = %path.display(), "certification report written");
    }

    if args.metrics {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&registry.gather(), &mut buf)?;
        print!("{}", String::from_utf8(buf)?);
    }

    Ok(())
}
