use log::{debug, info, warn};
use nalgebra::DVector;
use serde::Deserialize;

use crate::math::integration::batchfunction::BatchFunction;
use crate::math::integration::integrationerror::IntegrationError;
use crate::math::integration::integrationoutcome::IntegrationOutcome;
use crate::math::integration::midpointgrid::MidpointGrid;

/// 迴圈的第一個 refinement level（`2^2 = 4` 個子區間）。
pub const FIRST_LEVEL: u32 = 2;

pub const DEFAULT_MAX_LEVEL: u32 = 24;

// ─────────────────────────────────────────────────────────────────────────────
// MidpointSettings
// ─────────────────────────────────────────────────────────────────────────────

/// 與 `FIRST_LEVEL` 的估計值比較的基準估計。
///
/// - `SingleMidpoint`：`f((a + b) / 2) * (b - a)`，一個區間、一個 midpoint。
/// - `LevelOne`：2 個子區間的 composite estimate，與後續 level 同屬一個幾何序列。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum InitialEstimate {
    #[default]
    SingleMidpoint,
    LevelOne,
}

/// # 欄位說明
///
/// - `max_level`：最高嘗試到的 level，點數上限即 `2^max_level`。若省略，預設 24。
/// - `initial_estimate`：基準估計方式。若省略，預設 `SingleMidpoint`。
/// - `log_interval`：每 N 個 level 以 `info!` 輸出一次進度，0 表示不輸出。
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MidpointSettings {
    pub max_level: u32,
    pub initial_estimate: InitialEstimate,
    pub log_interval: u32,
}

impl Default for MidpointSettings {
    fn default() -> Self {
        MidpointSettings {
            max_level: DEFAULT_MAX_LEVEL,
            initial_estimate: InitialEstimate::SingleMidpoint,
            log_interval: 0,
        }
    }
}

impl MidpointSettings {
    /// 節點 buffer 為 `(2^level + 1)` 個 `f64`，位元組數不得超過 `isize::MAX`。
    pub fn max_allowed_level() -> u32 {
        (isize::MAX as usize / std::mem::size_of::<f64>()).ilog2() - 1
    }

    pub fn validate(&self) -> Result<(), IntegrationError> {
        let max = Self::max_allowed_level();
        if self.max_level < FIRST_LEVEL || self.max_level > max {
            return Err(IntegrationError::InvalidMaxLevel {
                max_level: self.max_level,
                min: FIRST_LEVEL,
                max,
            });
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// MidpointIntegrator
// ─────────────────────────────────────────────────────────────────────────────
//
// 以 composite midpoint rule 估計 ∫_a^b f(x) dx，每個 level 子區間數加倍：
//
//   Q_prev = 基準估計
//   for i in 2..=max_level:
//       Q_curr = h_i · Σ f(m_k),  h_i = (b - a) / 2^i
//       if |Q_curr - Q_prev| < eps: return Converged(Q_curr, i)
//       Q_prev = Q_curr
//   return NotConverged(Q_prev, max_level)
//
// 不做 adaptive subdivision，也不估計誤差上界；收斂判準只有相鄰兩個 level 的差。
// 積分器本身無狀態，可跨執行緒同時呼叫（前提是 f 本身可以）。

#[derive(Debug, Clone, Default)]
pub struct MidpointIntegrator {
    settings: MidpointSettings,
}

impl MidpointIntegrator {
    pub fn new(settings: MidpointSettings) -> Result<MidpointIntegrator, IntegrationError> {
        settings.validate()?;
        Ok(MidpointIntegrator { settings })
    }

    pub fn settings(&self) -> &MidpointSettings {
        &self.settings
    }

    pub fn integrate<F>(&self, f: &F, a: f64, b: f64, eps: f64) -> Result<IntegrationOutcome, IntegrationError>
    where
        F: BatchFunction + ?Sized,
    {
        if !(eps > 0.0 && eps.is_finite()) {
            return Err(IntegrationError::InvalidTolerance(eps));
        }
        check_bounds(a, b)?;

        let mut q_prev = self.baseline(f, a, b)?;
        for level in FIRST_LEVEL..=self.settings.max_level {
            let q_curr = composite_estimate(f, &MidpointGrid::new(a, b, level))?;
            let change = (q_curr - q_prev).abs();
            debug!("midpoint level {}: estimate = {:.15e}, change = {:.3e}", level, q_curr, change);
            if self.settings.log_interval > 0 && level % self.settings.log_interval == 0 {
                info!("midpoint level {}: {} sub-intervals, change = {:.3e}", level, 1usize << level, change);
            }
            if change < eps {
                return Ok(IntegrationOutcome::Converged {
                    estimate: q_curr,
                    iterations: level,
                });
            }
            q_prev = q_curr;
        }

        warn!(
            "midpoint rule did not converge to eps = {:e} within {} levels on [{}, {}]",
            eps, self.settings.max_level, a, b
        );
        Ok(IntegrationOutcome::NotConverged {
            last_estimate: q_prev,
            iterations_tried: self.settings.max_level,
        })
    }

    /// 以 `2^level` 個子區間計算的 composite estimate，與迴圈在該 level 的計算完全相同。
    pub fn estimate_at_level<F>(&self, f: &F, a: f64, b: f64, level: u32) -> Result<f64, IntegrationError>
    where
        F: BatchFunction + ?Sized,
    {
        check_bounds(a, b)?;
        if level > MidpointSettings::max_allowed_level() {
            return Err(IntegrationError::InvalidMaxLevel {
                max_level: level,
                min: 0,
                max: MidpointSettings::max_allowed_level(),
            });
        }
        composite_estimate(f, &MidpointGrid::new(a, b, level))
    }

    pub fn initial_estimate<F>(&self, f: &F, a: f64, b: f64) -> Result<f64, IntegrationError>
    where
        F: BatchFunction + ?Sized,
    {
        check_bounds(a, b)?;
        self.baseline(f, a, b)
    }

    fn baseline<F>(&self, f: &F, a: f64, b: f64) -> Result<f64, IntegrationError>
    where
        F: BatchFunction + ?Sized,
    {
        match self.settings.initial_estimate {
            InitialEstimate::SingleMidpoint => {
                let x = a / 2.0 + b / 2.0;
                let value = f.evaluate(x);
                if !value.is_finite() {
                    return Err(IntegrationError::EvaluationError { x, value });
                }
                check_estimate(value * (b - a), 0)
            }
            InitialEstimate::LevelOne => composite_estimate(f, &MidpointGrid::new(a, b, 1)),
        }
    }
}

/// 以預設設定積分，回傳 `(estimate, iterations)`；未收斂視為錯誤。
pub fn integrate<F>(f: F, a: f64, b: f64, eps: f64) -> Result<(f64, u32), IntegrationError>
where
    F: BatchFunction,
{
    MidpointIntegrator::default().integrate(&f, a, b, eps)?.into_result()
}

fn check_bounds(a: f64, b: f64) -> Result<(), IntegrationError> {
    if !(a.is_finite() && b.is_finite()) {
        return Err(IntegrationError::NonFiniteBound { a, b });
    }
    if !(b - a).is_finite() {
        return Err(IntegrationError::IntervalOverflow { a, b });
    }
    Ok(())
}

fn check_estimate(estimate: f64, level: u32) -> Result<f64, IntegrationError> {
    if estimate.is_finite() {
        Ok(estimate)
    } else {
        Err(IntegrationError::NonFiniteEstimate { level, estimate })
    }
}

fn composite_estimate<F>(f: &F, grid: &MidpointGrid) -> Result<f64, IntegrationError>
where
    F: BatchFunction + ?Sized,
{
    let values = f.evaluate_batch(grid.midpoints());
    if values.len() != grid.interval_count() {
        return Err(IntegrationError::BatchLengthMismatch {
            expected: grid.interval_count(),
            actual: values.len(),
        });
    }
    check_finite(grid.midpoints(), &values)?;
    check_estimate(grid.width() * values.sum(), grid.level())
}

fn check_finite(points: &DVector<f64>, values: &DVector<f64>) -> Result<(), IntegrationError> {
    match points.iter().zip(values.iter()).find(|(_, value)| !value.is_finite()) {
        Some((&x, &value)) => Err(IntegrationError::EvaluationError { x, value }),
        None => Ok(()),
    }
}
