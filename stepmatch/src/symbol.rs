use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;

use crate::constant::DataError;
use crate::pip::digits_from_tick_size;

/// Instrument metadata consumed read-only by the converter and the matchers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Symbol {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub exchange: String,
    #[serde(default)]
    pub asset_type: String,
    pub tick_size: f64,
    #[serde(default)]
    pub price_precision: Option<u32>,
}

impl Symbol {
    pub fn with_tick_size(code: impl Into<String>, tick_size: f64) -> Self {
        Self {
            code: code.into(),
            name: String::new(),
            exchange: String::new(),
            asset_type: String::new(),
            tick_size,
            price_precision: Some(digits_from_tick_size(tick_size)),
        }
    }

    /// Explicit precision from the symbol file, else the tick size's digit count.
    pub fn precision(&self) -> u32 {
        self.price_precision
            .unwrap_or_else(|| digits_from_tick_size(self.tick_size))
    }

    pub fn has_valid_tick(&self) -> bool {
        self.tick_size.is_finite() && self.tick_size > 0.0
    }
}

pub struct SymbolLoader;

impl SymbolLoader {
    /// Loads a `code -> Symbol` table. Entries without a `code` take their key.
    pub fn load(path: impl AsRef<Path>) -> Result<HashMap<String, Symbol>, DataError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;

        let items: HashMap<String, Symbol> = match path.extension().and_then(|x| x.to_str()) {
            Some("json") => {
                let value: JsonValue = serde_json::from_str(&text)?;
                serde_json::from_value(value)?
            }
            Some("yaml") | Some("yml") => {
                let value: YamlValue = serde_yaml::from_str(&text)?;
                serde_yaml::from_value(value)?
            }
            _ => return Err(DataError::UnsupportedFormat(path.display().to_string())),
        };

        Ok(items
            .into_iter()
            .map(|(key, mut symbol)| {
                if symbol.code.is_empty() {
                    symbol.code = key.clone();
                }
                (key, symbol)
            })
            .collect())
    }
}
