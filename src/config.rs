//! Server and negotiation configuration
//!
//! Loaded from YAML (`NEGOTIATOR_CONFIG`), with `LISTEN` overriding the
//! listen address. Every section has defaults, so an empty file is valid.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::negotiation::{
    JsonProcessor, Negotiator, Processors, ResponseProcessor, TextProcessor,
};

pub const CONFIG_ENV: &str = "NEGOTIATOR_CONFIG";
pub const LISTEN_ENV: &str = "LISTEN";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("negotiation.processors must list at least one processor")]
    NoProcessors,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub negotiation: NegotiationConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// Message carried by the model every response renders
    pub greeting: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            greeting: "Hello from negotiator".to_string(),
        }
    }
}

/// Built-in processor kinds that can be listed in the config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessorKind {
    Json,
    Text,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NegotiationConfig {
    /// Registration order; the first entry answers wildcard and missing
    /// `Accept` headers.
    pub processors: Vec<ProcessorKind>,
    /// Indent for pretty JSON; dense JSON when unset.
    pub json_indent: Option<String>,
    /// Processor that answers Ajax requests ahead of negotiation.
    pub ajax_responder: Option<ProcessorKind>,
}

impl Default for NegotiationConfig {
    fn default() -> Self {
        Self {
            processors: vec![ProcessorKind::Json, ProcessorKind::Text],
            json_indent: None,
            ajax_responder: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Defaults, overlaid by the file named in `NEGOTIATOR_CONFIG`, then by `LISTEN`.
    pub fn load() -> Result<Self, ConfigError> {
        let mut cfg = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };

        if let Ok(listen_addr) = std::env::var(LISTEN_ENV) {
            cfg.server.listen_addr = listen_addr;
        }

        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        // serde_yaml rejects an empty document
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Builds a negotiator from `negotiation.processors`, in order.
    pub fn build_negotiator<M>(&self) -> Result<Negotiator<M>, ConfigError>
    where
        M: Serialize + Display + ?Sized,
    {
        let negotiation = &self.negotiation;
        if negotiation.processors.is_empty() {
            return Err(ConfigError::NoProcessors);
        }

        let processors: Processors<M> = negotiation
            .processors
            .iter()
            .map(|&kind| {
                let ajax = negotiation.ajax_responder == Some(kind);
                let processor: Box<dyn ResponseProcessor<M>> = match kind {
                    ProcessorKind::Json => {
                        let json = match &negotiation.json_indent {
                            Some(indent) => JsonProcessor::indented(indent.clone()),
                            None => JsonProcessor::new(),
                        };
                        Box::new(json.ajax_responder(ajax))
                    }
                    ProcessorKind::Text => Box::new(TextProcessor::new().ajax_responder(ajax)),
                };
                processor
            })
            .collect();

        Ok(Negotiator::new(processors))
    }
}
