use thiserror::Error;

// ─────────────────────────────────────────────────────────────────────────────
// IntegrationError
// ─────────────────────────────────────────────────────────────────────────────

/// 積分過程中所有可能的錯誤。
///
/// 錯誤只屬於單次呼叫，不做任何重試；是否換參數重跑由呼叫方決定。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntegrationError {
    /// `eps` 必須是有限且大於 0 的數。
    #[error("tolerance must be finite and positive, got {0}")]
    InvalidTolerance(f64),

    /// 不支援無窮積分上下限（improper integral）。
    #[error("integration bounds must be finite, got [{a}, {b}]")]
    NonFiniteBound { a: f64, b: f64 },

    /// 上下限皆有限，但 `b - a` 溢位為 ±∞。
    #[error("interval width overflows for bounds [{a}, {b}]")]
    IntervalOverflow { a: f64, b: f64 },

    #[error("max_level must lie in [{min}, {max}], got {max_level}")]
    InvalidMaxLevel { max_level: u32, min: u32, max: u32 },

    /// `f` 在某個取樣點回傳 NaN 或 ±∞。
    #[error("function returned non-finite value {value} at x = {x}")]
    EvaluationError { x: f64, value: f64 },

    /// `f` 的值皆有限，但 `h · Σ f(m_k)` 溢位。level 0 為單一 midpoint 的基準估計。
    #[error("estimate at level {level} is non-finite ({estimate})")]
    NonFiniteEstimate { level: u32, estimate: f64 },

    /// batch evaluation 的輸出長度與輸入不符。
    #[error("batch evaluation returned {actual} values for {expected} points")]
    BatchLengthMismatch { expected: usize, actual: usize },

    #[error("no convergence after {iterations_tried} refinement levels (last estimate {last_estimate})")]
    NotConverged { last_estimate: f64, iterations_tried: u32 },
}
