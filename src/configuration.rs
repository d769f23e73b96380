use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::configurationerror::ConfigurationError;
use crate::math::integration::integrationerror::IntegrationError;
use crate::math::integration::midpointintegrator::{
    MidpointIntegrator,
    MidpointSettings
};

pub const DEFAULT_TOLERANCE: f64 = 1e-8;

fn default_tolerance() -> f64 { DEFAULT_TOLERANCE }

/// JSON 設定檔。
///
/// ```json
/// {
///     "tolerance": 1e-8,
///     "midpoint": { "max_level": 24, "initial_estimate": "SingleMidpoint", "log_interval": 0 }
/// }
/// ```
///
/// 所有欄位皆可省略，省略時使用預設值。
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Configuration {
    #[serde(default = "default_tolerance")]
    tolerance: f64,
    #[serde(default)]
    midpoint: MidpointSettings,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            tolerance: DEFAULT_TOLERANCE,
            midpoint: MidpointSettings::default(),
        }
    }
}

impl Configuration {
    pub fn new() -> Configuration {
        Configuration::default()
    }

    pub fn from_reader<P: AsRef<Path>>(file_path: P) -> Result<Configuration, ConfigurationError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let configuration: Configuration = serde_json::from_reader(reader)?;
        configuration.validate()?;
        Ok(configuration)
    }

    pub fn from_json_str(json: &str) -> Result<Configuration, ConfigurationError> {
        let configuration: Configuration = serde_json::from_str(json)?;
        configuration.validate()?;
        Ok(configuration)
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn midpoint_settings(&self) -> &MidpointSettings {
        &self.midpoint
    }

    pub fn integrator(&self) -> Result<MidpointIntegrator, IntegrationError> {
        MidpointIntegrator::new(self.midpoint.clone())
    }

    fn validate(&self) -> Result<(), IntegrationError> {
        if !(self.tolerance > 0.0 && self.tolerance.is_finite()) {
            return Err(IntegrationError::InvalidTolerance(self.tolerance));
        }
        self.midpoint.validate()
    }
}
