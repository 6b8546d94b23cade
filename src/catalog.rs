//! Theme catalog loading.
//!
//! A catalog is a JSON array of single-key objects mapping a theme name to its
//! color tokens:
//!
//! ```json
//! [
//!   { "theme-ocean": { "manerty-primary-200": "#bae6fd", "manerty-primary-600": "#0284c7", "manerty-primary-900": "#0c4a6e" } }
//! ]
//! ```
//!
//! Only the three gradient tokens are read; everything else in a theme is ignored.

use crate::{
    color::{Color, Palette},
    error::ThemeError,
};
use serde_json::{Map, Value};
use std::{collections::HashSet, path::Path};

pub const DEFAULT_TOKEN_PREFIX: &str = "manerty-primary";

/// Names of the tokens used as the low, mid and high gradient stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenKeys {
    pub low: String,
    pub mid: String,
    pub high: String,
}

impl TokenKeys {
    /// `<prefix>-200`, `<prefix>-600` and `<prefix>-900`.
    pub fn with_prefix(prefix: &str) -> Self {
        TokenKeys {
            low: format!("{prefix}-200"),
            mid: format!("{prefix}-600"),
            high: format!("{prefix}-900"),
        }
    }
}

impl Default for TokenKeys {
    fn default() -> Self {
        Self::with_prefix(DEFAULT_TOKEN_PREFIX)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    pub palette: Palette,
}

/// Ordered list of themes, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub themes: Vec<Theme>,
}

impl Catalog {
    pub fn from_file(path: &Path, keys: &TokenKeys) -> Result<Self, ThemeError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            ThemeError::catalog(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::parse(&json, keys)
    }

    pub fn parse(json: &str, keys: &TokenKeys) -> Result<Self, ThemeError> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| ThemeError::catalog(e.to_string()))?;
        let entries = value
            .as_array()
            .ok_or_else(|| ThemeError::catalog("catalog must be a JSON array of themes"))?;

        let mut seen = HashSet::new();
        let mut themes = Vec::with_capacity(entries.len());

        for (index, entry) in entries.iter().enumerate() {
            let theme = parse_entry(index, entry, keys)?;
            if !seen.insert(theme.name.clone()) {
                return Err(ThemeError::catalog(format!(
                    "duplicate theme name '{}'",
                    theme.name
                )));
            }
            themes.push(theme);
        }

        Ok(Catalog { themes })
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

fn parse_entry(index: usize, entry: &Value, keys: &TokenKeys) -> Result<Theme, ThemeError> {
    let object = entry
        .as_object()
        .ok_or_else(|| ThemeError::catalog(format!("entry {index} is not an object")))?;

    let mut fields = object.iter();
    let (name, tokens) = match (fields.next(), fields.next()) {
        (Some(only), None) => only,
        _ => {
            return Err(ThemeError::catalog(format!(
                "entry {index} must contain exactly one theme, found {} keys",
                object.len()
            )))
        }
    };

    validate_name(name)?;

    let tokens = tokens.as_object().ok_or_else(|| {
        ThemeError::catalog(format!("theme '{name}' must map to an object of color tokens"))
    })?;

    Ok(Theme {
        name: name.clone(),
        palette: Palette::new(
            token_color(name, tokens, &keys.low)?,
            token_color(name, tokens, &keys.mid)?,
            token_color(name, tokens, &keys.high)?,
        ),
    })
}

/// Theme names become directory names, so they must be a single path component.
fn validate_name(name: &str) -> Result<(), ThemeError> {
    let invalid = name.trim().is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\']);
    if invalid {
        return Err(ThemeError::catalog(format!(
            "invalid theme name '{name}': must be a plain directory name"
        )));
    }
    Ok(())
}

fn token_color(theme: &str, tokens: &Map<String, Value>, key: &str) -> Result<Color, ThemeError> {
    let raw = tokens
        .get(key)
        .ok_or_else(|| ThemeError::catalog(format!("theme '{theme}' is missing token '{key}'")))?;
    let raw = raw.as_str().ok_or_else(|| {
        ThemeError::catalog(format!("theme '{theme}': token '{key}' must be a string"))
    })?;
    Color::parse(raw).ok_or_else(|| {
        ThemeError::catalog(format!(
            "theme '{theme}': token '{key}' has invalid color '{raw}'"
        ))
    })
}
