use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub stream: StreamConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
}

/// Per-stream tuning knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamConfig {
    /// How far ahead of the next expected sequence number an audio chunk may
    /// be buffered before the oldest gap is declared unrecoverable.
    pub reorder_window: usize,

    /// Capacity of the per-stream inbound/outbound channels.
    pub channel_capacity: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            reorder_window: 32,
            channel_capacity: 64,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                name: "meeting-stream".to_string(),
            },
            stream: StreamConfig::default(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("service.name", "meeting-stream")?
            .set_default("stream.reorder_window", 32i64)?
            .set_default("stream.channel_capacity", 64i64)?
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
