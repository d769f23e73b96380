use thiserror::Error;

use crate::math::integration::integrationerror::IntegrationError;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("{0}")]
    IOError(#[from] std::io::Error),

    #[error("{0}")]
    JsonParseError(#[from] serde_json::Error),

    /// 設定檔格式正確但數值不合法，例如 `max_level` 超出範圍或 `tolerance <= 0`。
    #[error("invalid setting: {0}")]
    InvalidSetting(#[from] IntegrationError),
}
