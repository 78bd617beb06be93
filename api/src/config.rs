use anyhow::{anyhow, Context, Result};
use std::env;
use std::net::SocketAddr;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_OCR_LANGUAGE: &str = "eng";

/// Runtime settings read from the environment (after `.env` is loaded).
/// The knowledge base and model are fixed in `kb_assist` and not configurable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub enable_ocr: bool,
    pub ocr_language: String,
    pub tessdata_prefix: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse()
            .with_context(|| format!("BIND_ADDR is not a socket address: {}", bind_addr))?;

        let enable_ocr = match lookup("ENABLE_OCR") {
            Some(value) => parse_bool("ENABLE_OCR", &value)?,
            None => cfg!(feature = "ocr"),
        };

        let ocr_language = lookup("OCR_LANGUAGE")
            .filter(|lang| !lang.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_OCR_LANGUAGE.to_string());

        let tessdata_prefix = lookup("TESSDATA_PREFIX").filter(|path| !path.trim().is_empty());

        Ok(Self {
            bind_addr,
            enable_ocr,
            ocr_language,
            tessdata_prefix,
        })
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow!("{} must be a boolean, got '{}'", key, other)),
    }
}
