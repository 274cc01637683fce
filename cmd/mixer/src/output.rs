//! Report output.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use serde::Serialize;

/// Where and how reports are written.
pub struct Output {
    json: bool,
    file: Option<PathBuf>,
}

impl Output {
    pub fn new(json: bool, file: Option<PathBuf>) -> Self {
        Self { json, file }
    }

    /// Serializes `value` as YAML (default) or JSON to the file or stdout.
    pub fn write<T: Serialize>(&self, value: &T) -> anyhow::Result<()> {
        let text = if self.json {
            serde_json::to_string_pretty(value)?
        } else {
            serde_yaml::to_string(value)?
        };

        match &self.file {
            Some(path) => {
                let mut file = File::create(path)
                    .with_context(|| format!("create {}", path.display()))?;
                file.write_all(text.as_bytes())?;
            }
            None => println!("{}", text),
        }
        Ok(())
    }
}
