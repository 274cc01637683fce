//! Scenario files: a sink ring and the sources mixed into it.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use giztoy_mixer::{FrameFormat, Gain, MixoutSink, RingSource, dispatch};
use serde::{Deserialize, Serialize};
use tracing::info;

/// A mixing scenario loaded from YAML or JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    /// Sample format shared by the sink and every source.
    pub format: FrameFormat,
    /// Sink ring size in samples.
    pub capacity: usize,
    /// Ring position the sink starts at.
    #[serde(default)]
    pub base: usize,
    /// Sources, mixed in the order listed.
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
}

/// One source run.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub name: String,
    /// Source ring contents.
    pub samples: Vec<i32>,
    /// Ring position the source is read from.
    #[serde(default)]
    pub base: usize,
    /// Offset into the sink, relative to its base.
    #[serde(default)]
    pub start: usize,
    /// Samples to mix (default: the whole source ring).
    #[serde(default)]
    pub count: Option<usize>,
    /// Linear gain; 1.0 or more means unity.
    #[serde(default)]
    pub gain: Option<f32>,
}

/// Result of running a scenario.
#[derive(Debug, Serialize)]
pub struct Report {
    pub format: FrameFormat,
    pub capacity: usize,
    pub mixed_samples: usize,
    /// Raw ring contents in physical order.
    pub ring: Vec<i32>,
    /// Pending mixed samples in playback order.
    pub mixed: Vec<i32>,
    /// Samples drained after the run, if requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drained: Option<Vec<i32>>,
}

/// A registered frame format.
#[derive(Debug, Serialize)]
pub struct FormatInfo {
    pub name: &'static str,
    pub id: u32,
    pub stride: usize,
    pub depth: u32,
}

impl Scenario {
    /// Loads a scenario file. JSON files parse as YAML.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("read scenario {}", path.display()))?;
        Self::from_yaml(&data).with_context(|| format!("parse scenario {}", path.display()))
    }

    pub fn from_yaml(data: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(data)?)
    }

    /// Mixes every source into a fresh sink.
    pub fn run(&self, drain: bool) -> Result<Report> {
        let mut sink = MixoutSink::with_base(self.format, self.capacity, self.base)?;

        for (i, entry) in self.sources.iter().enumerate() {
            let name = if entry.name.is_empty() {
                format!("#{i}")
            } else {
                entry.name.clone()
            };
            if entry.samples.is_empty() {
                bail!("source {name}: no samples");
            }

            let data = self.format.encode(&entry.samples);
            let source = RingSource::try_new(self.format, &data, entry.base)
                .with_context(|| format!("source {name}"))?;
            let count = entry.count.unwrap_or(entry.samples.len());
            let gain = match entry.gain {
                Some(ratio) => Gain::from_ratio(ratio).with_context(|| format!("source {name}"))?,
                None => Gain::UNITY,
            };

            sink.mix_source(entry.start, &source, count, gain)
                .with_context(|| format!("source {name}"))?;
            info!(source = %name, start = entry.start, count, %gain, mixed = sink.mixed_samples(), "mixed");
        }

        let ring = self.format.decode(sink.as_bytes());
        let mixed = sink.samples();
        let drained = if drain {
            let mut bytes = Vec::new();
            sink.read_to_end(&mut bytes)?;
            Some(self.format.decode(&bytes))
        } else {
            None
        };

        Ok(Report {
            format: self.format,
            capacity: self.capacity,
            mixed_samples: mixed.len(),
            ring,
            mixed,
            drained,
        })
    }
}

/// Lists the formats registered in the dispatch table.
pub fn formats() -> Vec<FormatInfo> {
    dispatch::formats()
        .map(|f| FormatInfo {
            name: f.name(),
            id: f.id(),
            stride: f.stride(),
            depth: f.depth(),
        })
        .collect()
}
