use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PriceError, Result};
use crate::models::Role;

/// Accepted header texts per canonical role.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SynonymTable {
    #[serde(default = "default_product_synonyms")]
    pub product: Vec<String>,
    #[serde(default = "default_price_synonyms")]
    pub price: Vec<String>,
    #[serde(default = "default_weight_synonyms")]
    pub weight: Vec<String>,
}

impl SynonymTable {
    pub fn for_role(&self, role: Role) -> &[String] {
        match role {
            Role::Product => &self.product,
            Role::Price => &self.price,
            Role::Weight => &self.weight,
        }
    }
}

impl Default for SynonymTable {
    fn default() -> Self {
        Self {
            product: default_product_synonyms(),
            price: default_price_synonyms(),
            weight: default_weight_synonyms(),
        }
    }
}

fn to_strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn default_product_synonyms() -> Vec<String> {
    to_strings(&["товар", "название", "наименование", "продукт"])
}

fn default_price_synonyms() -> Vec<String> {
    to_strings(&["розница", "цена"])
}

fn default_weight_synonyms() -> Vec<String> {
    to_strings(&["вес", "масса", "фасовка"])
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_source_dir")]
    pub source_dir: String,
    #[serde(default = "default_report_path")]
    pub report_path: String,
    #[serde(default = "default_file_pattern")]
    pub file_pattern: String,
    /// `contains` or `regex`
    #[serde(default = "default_match_type")]
    pub match_type: String,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    #[serde(default)]
    pub allow_zero_price: bool,
    #[serde(default)]
    pub synonyms: SynonymTable,
}

fn default_source_dir() -> String {
    "docs".to_string()
}

fn default_report_path() -> String {
    "output.html".to_string()
}

fn default_file_pattern() -> String {
    "price".to_string()
}

fn default_match_type() -> String {
    "contains".to_string()
}

fn default_delimiter() -> char {
    ','
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            report_path: default_report_path(),
            file_pattern: default_file_pattern(),
            match_type: default_match_type(),
            delimiter: default_delimiter(),
            allow_zero_price: false,
            synonyms: SynonymTable::default(),
        }
    }
}

impl Settings {
    /// The csv reader only takes single-byte delimiters.
    pub fn delimiter_byte(&self) -> Result<u8> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(|b| b.is_ascii())
            .ok_or_else(|| {
                PriceError::Settings(format!(
                    "delimiter must be a single ASCII character, got '{}'",
                    self.delimiter
                ))
            })
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("pricelist")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

/// Missing file means defaults; a file that does not parse is an error.
pub fn load_settings(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| PriceError::Settings(format!("{}: {e}", path.display())))
}

pub fn save_settings(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| PriceError::Settings(e.to_string()))?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}
