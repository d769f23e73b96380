use nalgebra::DVector;

// ─────────────────────────────────────────────────────────────────────────────
// BatchFunction
// ─────────────────────────────────────────────────────────────────────────────
//
// 積分器對被積函數唯一的要求：
//
//   - evaluate(x)：單點求值（只用在初始的單一 midpoint 估計）
//   - evaluate_batch(xs)：逐點求值，輸出長度必須等於輸入長度
//
// 任何 `Fn(f64) -> f64` 都自動實作此 trait，batch 版本就是逐點 map。
// 已經向量化的函數（一次吃整個 DVector）用 `VectorizedFunction` 包起來。

pub trait BatchFunction {
    fn evaluate(&self, x: f64) -> f64;

    fn evaluate_batch(&self, points: &DVector<f64>) -> DVector<f64> {
        points.map(|x| self.evaluate(x))
    }
}

impl<F> BatchFunction for F
where
    F: Fn(f64) -> f64,
{
    fn evaluate(&self, x: f64) -> f64 {
        self(x)
    }
}

/// 包裝原生向量化的函數 `Fn(&DVector<f64>) -> DVector<f64>`。
///
/// 單點求值時以長度 1 的向量呼叫；若函數回傳空向量則視為 NaN，
/// 交由積分器回報 `EvaluationError`。
pub struct VectorizedFunction<F> {
    function: F,
}

impl<F> VectorizedFunction<F>
where
    F: Fn(&DVector<f64>) -> DVector<f64>,
{
    pub fn new(function: F) -> VectorizedFunction<F> {
        VectorizedFunction { function }
    }
}

impl<F> BatchFunction for VectorizedFunction<F>
where
    F: Fn(&DVector<f64>) -> DVector<f64>,
{
    fn evaluate(&self, x: f64) -> f64 {
        let values = (self.function)(&DVector::from_element(1, x));
        values.get(0).copied().unwrap_or(f64::NAN)
    }

    fn evaluate_batch(&self, points: &DVector<f64>) -> DVector<f64> {
        (self.function)(points)
    }
}
