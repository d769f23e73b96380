use nalgebra::DVector;

/// 某一 refinement level 的取樣網格。
///
/// 在 `[a, b]` 上產生 `2^level + 1` 個等距節點（含兩端點），
/// 相鄰節點取平均得到 `2^level` 個 midpoints，子區間寬度 `h = (b - a) / 2^level`。
///
/// `a > b` 時 `h` 為負、節點遞減，估計值自然帶上定積分的正負號。
/// 網格只活在單一 level，進入下一個 level 時即被釋放。
pub struct MidpointGrid {
    level: u32,
    nodes: DVector<f64>,
    midpoints: DVector<f64>,
    width: f64,
}

impl MidpointGrid {
    /// 呼叫方須保證 `2^level` 不溢位 `usize`（由 `MidpointSettings` 驗證）。
    pub fn new(a: f64, b: f64, level: u32) -> MidpointGrid {
        let interval_count = 1usize << level;
        let width = (b - a) / interval_count as f64;
        let nodes = DVector::from_fn(interval_count + 1, |k, _| {
            if k == interval_count {
                b
            } else {
                a + k as f64 * width
            }
        });
        let midpoints = DVector::from_fn(interval_count, |k, _| (nodes[k] + nodes[k + 1]) / 2.0);
        MidpointGrid {
            level,
            nodes,
            midpoints,
            width,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn nodes(&self) -> &DVector<f64> {
        &self.nodes
    }

    pub fn midpoints(&self) -> &DVector<f64> {
        &self.midpoints
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn interval_count(&self) -> usize {
        self.midpoints.len()
    }
}
