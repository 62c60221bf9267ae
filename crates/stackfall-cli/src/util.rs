use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use stackfall_engine::SessionConfig;

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::from_output_path(output_path)?;
        output.write_json(value)
    }

    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, &value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }

    pub fn write_text(&mut self, text: &str) -> anyhow::Result<()> {
        writeln!(&mut *self, "{text}")
            .with_context(|| format!("Failed to write to {}", self.display_path()))?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Session configuration options shared by the subcommands.
///
/// Values come from `--config` when given, otherwise from the defaults;
/// the individual flags override either.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SessionConfigArg {
    /// JSON file with the session configuration
    #[arg(long)]
    config: Option<PathBuf>,
    /// Board width in cells
    #[arg(long)]
    width: Option<usize>,
    /// Board height in cells
    #[arg(long)]
    height: Option<usize>,
    /// Gravity drop interval in milliseconds
    #[arg(long)]
    drop_interval_ms: Option<u64>,
    /// Points for the first row of a sweep
    #[arg(long)]
    score_base: Option<u64>,
}

impl SessionConfigArg {
    pub(crate) fn resolve(&self) -> anyhow::Result<SessionConfig> {
        let mut config = match &self.config {
            Some(path) => read_json_file("config", path)?,
            None => SessionConfig::default(),
        };
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(drop_interval_ms) = self.drop_interval_ms {
            config.drop_interval_ms = drop_interval_ms;
        }
        if let Some(score_base) = self.score_base {
            config.score_base = score_base;
        }
        config
            .validate()
            .context("Invalid session configuration")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults() {
        let config = SessionConfigArg::default().resolve().unwrap();
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn test_flags_override_defaults() {
        let arg = SessionConfigArg {
            width: Some(10),
            drop_interval_ms: Some(250),
            ..SessionConfigArg::default()
        };
        let config = arg.resolve().unwrap();
        assert_eq!(config.width, 10);
        assert_eq!(config.height, 20);
        assert_eq!(config.drop_interval_ms, 250);
    }

    #[test]
    fn test_invalid_override_is_reported() {
        let arg = SessionConfigArg {
            height: Some(0),
            ..SessionConfigArg::default()
        };
        let err = arg.resolve().unwrap_err();
        assert!(format!("{err:#}").contains("board height must be at least 1"));
    }

    #[test]
    fn test_missing_config_file_is_reported() {
        let arg = SessionConfigArg {
            config: Some(PathBuf::from("/nonexistent/stackfall-config.json")),
            ..SessionConfigArg::default()
        };
        let err = arg.resolve().unwrap_err();
        assert!(err.to_string().contains("Failed to open config file"));
    }
}
