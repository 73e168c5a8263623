use super::value_type::SUPPORTED_TOOLS;
use crate::error::{CobbmapError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Largest accepted display precision; `f64` carries about 15 significant digits
pub const MAX_PRECISION: u32 = 15;

/// Configuration of the measurement mapping
///
/// # Example
///
/// ```
/// use cobbmap_core::{DisplayUnits, MappingConfig};
///
/// let config = MappingConfig::default()
///     .with_supported_tools(["CobbAngle"])
///     .with_precision(1)
///     .with_display_units(DisplayUnits::default().with_mapping("°", "deg"));
///
/// assert!(config.is_supported_tool("CobbAngle"));
/// assert!(!config.is_supported_tool("Length"));
/// assert_eq!(config.display_units.display("°"), "deg");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MappingConfig {
    /// Tool names accepted by the mapper (allow-list)
    pub supported_tools: Vec<String>,

    /// Unit symbol to display string lookup
    pub display_units: DisplayUnits,

    /// Decimal places of the displayed angle
    pub precision: u32,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            supported_tools: SUPPORTED_TOOLS.iter().map(|s| s.to_string()).collect(),
            display_units: DisplayUnits::default(),
            precision: 2,
        }
    }
}

impl MappingConfig {
    /// Loads a configuration from JSON; missing fields take default values
    ///
    /// # Errors
    ///
    /// Returns `JsonError` for malformed JSON and `InvalidValue` if the
    /// precision exceeds [`MAX_PRECISION`]
    pub fn from_json(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the configured values
    pub fn validate(&self) -> Result<()> {
        if self.precision > MAX_PRECISION {
            return Err(CobbmapError::InvalidValue(format!(
                "precision {} exceeds the maximum of {}",
                self.precision, MAX_PRECISION
            )));
        }
        Ok(())
    }

    /// Builder: replace the supported-tool allow-list
    pub fn with_supported_tools<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supported_tools = tools.into_iter().map(Into::into).collect();
        self
    }

    /// Builder: set the display unit lookup
    pub fn with_display_units(mut self, display_units: DisplayUnits) -> Self {
        self.display_units = display_units;
        self
    }

    /// Builder: set the displayed precision, capped at [`MAX_PRECISION`]
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision.min(MAX_PRECISION);
        self
    }

    /// Checks a tool name against the allow-list
    pub fn is_supported_tool(&self, tool_name: &str) -> bool {
        self.supported_tools.iter().any(|t| t == tool_name)
    }
}

/// Lookup from a unit symbol to the text shown to the user
///
/// Host mappings win; otherwise `^2` is rewritten to a superscript two and the
/// unit is shown as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayUnits {
    mappings: HashMap<String, String>,
}

impl DisplayUnits {
    /// Builder: add a host mapping
    pub fn with_mapping(mut self, unit: impl Into<String>, display: impl Into<String>) -> Self {
        self.mappings.insert(unit.into(), display.into());
        self
    }

    /// Returns the display form of a unit symbol
    pub fn display(&self, unit: &str) -> String {
        match self.mappings.get(unit) {
            Some(display) => display.clone(),
            None => unit.replace("^2", "\u{00B2}"),
        }
    }
}
