//! Event bus producer (Kafka, SASL/SCRAM-SHA-512 over TLS).
//!
//! The configuration and CA check are always compiled; the producer itself
//! needs the `kafka` feature.

use anyhow::{bail, Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct BusConfig {
    /// Comma-separated `host:port` list.
    pub brokers: String,
    pub user: String,
    pub password: String,
    /// PEM file with the root CA that signs the broker certificates.
    pub ca_cert: PathBuf,
}

impl BusConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            brokers: env::var("EVALERT_KAFKA_BROKERS")
                .context("EVALERT_KAFKA_BROKERS env var is required")?,
            user: env::var("EVALERT_KAFKA_USER").context("EVALERT_KAFKA_USER env var is required")?,
            password: env::var("EVALERT_KAFKA_PASSWORD")
                .context("EVALERT_KAFKA_PASSWORD env var is required")?,
            ca_cert: env::var("EVALERT_KAFKA_CA_CERT")
                .context("EVALERT_KAFKA_CA_CERT env var is required")?
                .into(),
        })
    }
}

/// Fails unless `path` is a readable PEM file with at least one certificate.
pub fn check_ca_cert(path: &Path) -> Result<()> {
    let pem = fs::read_to_string(path)
        .with_context(|| format!("Failed to read CA certificate {}", path.display()))?;
    if !pem.contains("-----BEGIN CERTIFICATE-----") {
        bail!("No PEM certificate found in {}", path.display());
    }
    Ok(())
}

#[cfg(feature = "kafka")]
pub use producer::EventBus;

#[cfg(feature = "kafka")]
mod producer {
    use super::{check_ca_cert, BusConfig};
    use anyhow::{anyhow, Context, Result};
    use rdkafka::config::ClientConfig;
    use rdkafka::producer::{FutureProducer, FutureRecord};
    use std::time::Duration;
    use tracing::info;

    const QUEUE_TIMEOUT: Duration = Duration::from_secs(10);

    pub struct EventBus {
        producer: FutureProducer,
        runtime: tokio::runtime::Runtime,
    }

    impl EventBus {
        pub fn connect(config: &BusConfig) -> Result<Self> {
            check_ca_cert(&config.ca_cert)?;
            let runtime = tokio::runtime::Runtime::new().context("Failed to start runtime")?;
            let producer: FutureProducer = ClientConfig::new()
                .set("bootstrap.servers", &config.brokers)
                .set("security.protocol", "SASL_SSL")
                .set("sasl.mechanisms", "SCRAM-SHA-512")
                .set("sasl.username", &config.user)
                .set("sasl.password", &config.password)
                .set("ssl.ca.location", config.ca_cert.to_string_lossy().into_owned())
                .create()
                .context("Failed to create Kafka producer")?;
            Ok(Self { producer, runtime })
        }

        /// Publishes one record and waits for the broker acknowledgement.
        pub fn publish(&self, topic: &str, payload: &[u8]) -> Result<(i32, i64)> {
            let record = FutureRecord::<(), [u8]>::to(topic).payload(payload);
            let (partition, offset) = self
                .runtime
                .block_on(self.producer.send(record, QUEUE_TIMEOUT))
                .map_err(|(e, _)| anyhow!("Kafka delivery to {topic} failed: {e}"))?;
            info!(topic, partition, offset, "published to event bus");
            Ok((partition, offset))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ca_check_rejects_missing_and_non_pem_files() {
        let dir = std::env::temp_dir().join(format!("evalert_ca_{}", std::process::id()));
        let _ = fs::create_dir_all(&dir);

        assert!(check_ca_cert(&dir.join("missing.pem")).is_err());

        let junk = dir.join("junk.pem");
        fs::write(&junk, "not a certificate").unwrap();
        let err = check_ca_cert(&junk).unwrap_err();
        assert!(err.to_string().contains("No PEM certificate"));

        let pem = dir.join("ca.pem");
        fs::write(
            &pem,
            "-----BEGIN CERTIFICATE-----\nMIIB\n-----END CERTIFICATE-----\n",
        )
        .unwrap();
        assert!(check_ca_cert(&pem).is_ok());

        let _ = fs::remove_dir_all(&dir);
    }
}
