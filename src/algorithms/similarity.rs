use ndarray::{Array1, Array2, Axis};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    product_ids: Vec<String>,
    index: HashMap<String, usize>,
    values: Array2<f32>,
}

impl SimilarityMatrix {
    pub fn compute(product_ids: Vec<String>, features: &Array2<f32>) -> Self {
        debug_assert_eq!(
            product_ids.len(),
            features.nrows(),
            "one feature row per product"
        );

        let n = product_ids.len();
        let norms: Array1<f32> = features.map_axis(Axis(1), |row| row.dot(&row).sqrt());
        let dots = features.dot(&features.t());
        let mut values = Array2::<f32>::zeros((n, n));

        for i in 0..n {
            values[[i, i]] = 1.0;
            for j in (i + 1)..n {
                let denom = norms[i] * norms[j];
                let sim = if denom > 0.0 {
                    (dots[[i, j]] / denom).clamp(-1.0, 1.0)
                } else {
                    0.0
                };
                values[[i, j]] = sim;
                values[[j, i]] = sim;
            }
        }

        let index = product_ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();

        Self {
            product_ids,
            index,
            values,
        }
    }

    pub fn get(&self, a: &str, b: &str) -> Option<f32> {
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        Some(self.values[[i, j]])
    }

    pub fn index_of(&self, product_id: &str) -> Option<usize> {
        self.index.get(product_id).copied()
    }

    pub fn product_ids(&self) -> &[String] {
        &self.product_ids
    }

    pub fn values(&self) -> &Array2<f32> {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.product_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.product_ids.is_empty()
    }
}
