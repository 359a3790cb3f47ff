use ndarray::{Array2, Axis};

/// Columns holding a single distinct value become all zeros.
pub fn min_max_normalize(features: &mut Array2<f32>) {
    for mut column in features.axis_iter_mut(Axis(1)) {
        let (min, max) = column
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v as f64), hi.max(v as f64))
            });

        // f32 extremes overflow when subtracted, so scale in f64.
        let range = max - min;
        if range > 0.0 {
            column.mapv_inplace(|v| ((v as f64 - min) / range) as f32);
        } else {
            column.fill(0.0);
        }
    }
}
