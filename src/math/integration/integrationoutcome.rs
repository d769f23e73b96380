use serde::Serialize;

use crate::math::integration::integrationerror::IntegrationError;

/// 積分結果。
///
/// - `Converged`：`|Q_curr - Q_prev| < eps` 首次成立；`iterations` 即當時的 level，
///   `estimate` 為該 level 的 midpoint 估計值本身（不做外插或修正）。
/// - `NotConverged`：跑到 `max_level` 仍未收斂；`last_estimate` 為最後一個 level 的估計值。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum IntegrationOutcome {
    Converged {
        estimate: f64,
        iterations: u32,
    },
    NotConverged {
        last_estimate: f64,
        iterations_tried: u32,
    },
}

impl IntegrationOutcome {
    pub fn estimate(&self) -> f64 {
        match self {
            IntegrationOutcome::Converged { estimate, .. } => *estimate,
            IntegrationOutcome::NotConverged { last_estimate, .. } => *last_estimate,
        }
    }

    pub fn iterations(&self) -> u32 {
        match self {
            IntegrationOutcome::Converged { iterations, .. } => *iterations,
            IntegrationOutcome::NotConverged { iterations_tried, .. } => *iterations_tried,
        }
    }

    pub fn is_converged(&self) -> bool {
        matches!(self, IntegrationOutcome::Converged { .. })
    }

    /// 回傳 `(estimate, iterations)`；未收斂時轉為 `IntegrationError::NotConverged`。
    pub fn into_result(self) -> Result<(f64, u32), IntegrationError> {
        match self {
            IntegrationOutcome::Converged { estimate, iterations } => Ok((estimate, iterations)),
            IntegrationOutcome::NotConverged {
                last_estimate,
                iterations_tried,
            } => Err(IntegrationError::NotConverged {
                last_estimate,
                iterations_tried,
            }),
        }
    }
}
