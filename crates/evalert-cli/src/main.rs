//! CLI for evalert.
//!
//! Generates sample events and alerts, recomputes fingerprints, normalizes
//! resources, submits alerts to the ingest API and publishes records to the
//! event bus.

mod api;
#[cfg_attr(not(feature = "kafka"), allow(dead_code))]
mod bus;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use evalert_core::{fingerprint, EvAlert, EvResource};
use evalert_topology::Vertex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print random sample records, one JSON document per line
    Generate {
        kind: RecordKind,

        /// Number of records to print
        #[arg(long, default_value = "1")]
        count: usize,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Recompute the deduplication fingerprint of an alert or event
    Fingerprint {
        /// Input file (stdin if omitted)
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Decode a resource object and print its normalized wire form
    Resource {
        /// Input file (stdin if omitted)
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Submit a JSON payload to the ingest API
    Send {
        /// Input file (stdin if omitted)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Request path below EVALERT_API_URL
        #[arg(long, default_value = api::DEFAULT_ALERTS_PATH)]
        path: String,

        /// Skip TLS certificate verification
        #[arg(long)]
        insecure: bool,
    },
    /// Publish a JSON payload to an event bus topic
    Publish {
        #[arg(long)]
        topic: String,

        /// Input file (stdin if omitted)
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Build a topology vertex and print it
    Vertex {
        name: String,

        /// Unique id of the vertex (defaults to the name)
        #[arg(long)]
        unique_id: Option<String>,

        /// Outgoing edge as `<uniqueId>:<edgeType>`
        #[arg(long = "to")]
        to: Vec<String>,

        /// Incoming edge as `<uniqueId>:<edgeType>`
        #[arg(long = "from")]
        from: Vec<String>,

        #[arg(long = "entity-type")]
        entity_types: Vec<String>,

        #[arg(long = "tag")]
        tags: Vec<String>,

        #[arg(long)]
        provider: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum RecordKind {
    Alert,
    Event,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { kind, count, seed } => generate(kind, count, seed),
        Commands::Fingerprint { file } => print_fingerprint(file.as_deref()),
        Commands::Resource { file } => normalize_resource(file.as_deref()),
        Commands::Send {
            file,
            path,
            insecure,
        } => send(file.as_deref(), &path, insecure),
        Commands::Publish { topic, file } => publish(&topic, file.as_deref()),
        Commands::Vertex {
            name,
            unique_id,
            to,
            from,
            entity_types,
            tags,
            provider,
        } => {
            let mut builder = Vertex::builder(&name)
                .unique_id(unique_id.unwrap_or_else(|| name.clone()))
                .entity_types(entity_types)
                .tags(tags);
            if let Some(provider) = provider {
                builder = builder.provider(provider);
            }
            for edge in &to {
                let (id, edge_type) = split_edge(edge)?;
                builder = builder.to_reference(id, edge_type);
            }
            for edge in &from {
                let (id, edge_type) = split_edge(edge)?;
                builder = builder.from_reference(id, edge_type);
            }
            let vertex = builder.build()?;
            println!("{}", serde_json::to_string_pretty(&vertex)?);
            Ok(())
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(file: Option<&Path>) -> Result<Vec<u8>> {
    match file {
        Some(path) => {
            fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
        }
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn read_json_payload(file: Option<&Path>) -> Result<Vec<u8>> {
    let payload = read_input(file)?;
    serde_json::from_slice::<serde_json::Value>(&payload).context("Payload is not valid JSON")?;
    Ok(payload)
}

fn split_edge(arg: &str) -> Result<(&str, &str)> {
    match arg.rsplit_once(':') {
        Some((id, edge_type)) if !id.is_empty() && !edge_type.is_empty() => Ok((id, edge_type)),
        _ => bail!("Edge must look like <uniqueId>:<edgeType>, got '{arg}'"),
    }
}

fn generate(kind: RecordKind, count: usize, seed: Option<u64>) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    for _ in 0..count {
        let line = match kind {
            RecordKind::Alert => serde_json::to_string(&evalert_fixtures::random_alert(&mut rng))?,
            RecordKind::Event => serde_json::to_string(&evalert_fixtures::random_event(&mut rng))?,
        };
        println!("{line}");
    }
    Ok(())
}

fn print_fingerprint(file: Option<&Path>) -> Result<()> {
    let alert = EvAlert::from_slice(&read_input(file)?).context("Failed to decode alert")?;
    let fp = fingerprint(alert.resource(), alert.kind());
    if !alert.deduplication_key().is_empty() && alert.deduplication_key() != fp {
        warn!(
            wire = alert.deduplication_key(),
            computed = %fp,
            "deduplicationKey differs from the recomputed fingerprint"
        );
    }
    println!("{fp}");
    Ok(())
}

fn normalize_resource(file: Option<&Path>) -> Result<()> {
    let resource: EvResource =
        serde_json::from_slice(&read_input(file)?).context("Failed to decode resource")?;
    println!("{}", serde_json::to_string_pretty(&resource)?);
    Ok(())
}

fn send(file: Option<&Path>, path: &str, insecure: bool) -> Result<()> {
    let config = api::ApiConfig::from_env(insecure)?;
    if insecure {
        warn!("TLS certificate verification is disabled");
    }
    let payload = read_json_payload(file)?;
    let client = api::IngestApi::new(&config)?;
    let body = client.submit(path, payload)?;
    info!(path, "payload accepted");
    if !body.is_empty() {
        println!("{body}");
    }
    Ok(())
}

#[cfg(feature = "kafka")]
fn publish(topic: &str, file: Option<&Path>) -> Result<()> {
    let config = bus::BusConfig::from_env()?;
    let payload = read_json_payload(file)?;
    let bus = bus::EventBus::connect(&config)?;
    let (partition, offset) = bus.publish(topic, &payload)?;
    println!("{topic}/{partition}@{offset}");
    Ok(())
}

#[cfg(not(feature = "kafka"))]
fn publish(topic: &str, _file: Option<&Path>) -> Result<()> {
    bail!("Cannot publish to '{topic}': event bus support is not compiled in (enable the `kafka` feature)")
}
