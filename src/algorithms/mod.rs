pub mod encoder;
pub mod normalizer;
pub mod similarity;

use crate::error::{RecommenderError, Result};
use crate::models::*;
use crate::utils::top_k_indices_excluding;
use encoder::CategoricalEncoders;
use ndarray::Array2;
use similarity::SimilarityMatrix;
use std::collections::HashSet;
use tracing::debug;

pub trait RecommendationAlgorithm {
    fn recommend_products(&self, product_id: &str, n: usize) -> Result<Vec<ScoredProduct>>;

    fn recommend_products_for_customer(&self, customer_id: &str, n: usize) -> Result<CustomerRecommendations>;
}

#[derive(Debug, Clone)]
pub struct ItemBasedRecommender {
    encoders: CategoricalEncoders,
    transactions: Vec<CustomerTransaction>,
    products: Vec<ProductRecord>,
    features: Array2<f32>,
    similarity: SimilarityMatrix,
}

impl ItemBasedRecommender {
    pub const FEATURE_DIM: usize = 1 + ProductRecord::NUMERIC_FEATURES;

    pub fn fit(records: &[TransactionRecord]) -> Result<Self> {
        if records.is_empty() {
            return Err(RecommenderError::EmptyCatalog);
        }

        let encoders = CategoricalEncoders::fit(records);
        let transactions = Self::encode_transactions(&encoders, records);
        let products = Self::build_catalog(records);

        let mut features = Array2::<f32>::zeros((products.len(), Self::FEATURE_DIM));
        for (i, product) in products.iter().enumerate() {
            let category_code = encoders
                .encode(CategoricalColumn::ProductCategory, &product.category)
                .unwrap_or_default();
            features[[i, 0]] = category_code as f32;
            for (j, value) in product.numeric_features().into_iter().enumerate() {
                features[[i, j + 1]] = value;
            }
        }
        normalizer::min_max_normalize(&mut features);

        let product_ids = products.iter().map(|p| p.product_id.clone()).collect();
        let similarity = SimilarityMatrix::compute(product_ids, &features);

        debug!(
            "Fitted item similarity over {} products from {} transactions",
            products.len(),
            transactions.len()
        );

        Ok(Self {
            encoders,
            transactions,
            products,
            features,
            similarity,
        })
    }

    fn encode_transactions(encoders: &CategoricalEncoders, records: &[TransactionRecord]) -> Vec<CustomerTransaction> {
        let code = |column: CategoricalColumn, record: &TransactionRecord| {
            encoders.encode(column, column.value(record)).unwrap_or_default()
        };

        records
            .iter()
            .map(|record| CustomerTransaction {
                customer_id: record.customer_id.clone(),
                product_id: record.product_id.clone(),
                city: code(CategoricalColumn::City, record),
                age_group: code(CategoricalColumn::AgeGroup, record),
                loyalty_tier: code(CategoricalColumn::LoyaltyTier, record),
                payment_method: code(CategoricalColumn::PaymentMethod, record),
                gender: code(CategoricalColumn::Gender, record),
            })
            .collect()
    }

    // First occurrence of each product id wins.
    fn build_catalog(records: &[TransactionRecord]) -> Vec<ProductRecord> {
        let mut seen = HashSet::new();
        records
            .iter()
            .filter(|record| seen.insert(record.product_id.as_str()))
            .map(ProductRecord::from)
            .collect()
    }

    fn scored(&self, index: usize, score: f32) -> ScoredProduct {
        let product = &self.products[index];
        ScoredProduct {
            product_id: product.product_id.clone(),
            category: product.category.clone(),
            score,
        }
    }

    pub fn product(&self, product_id: &str) -> Option<&ProductRecord> {
        self.similarity.index_of(product_id).map(|i| &self.products[i])
    }

    pub fn products(&self) -> &[ProductRecord] {
        &self.products
    }

    pub fn transactions(&self) -> &[CustomerTransaction] {
        &self.transactions
    }

    pub fn encoders(&self) -> &CategoricalEncoders {
        &self.encoders
    }

    pub fn features(&self) -> &Array2<f32> {
        &self.features
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    pub fn summary(&self) -> CatalogSummary {
        let customers: HashSet<&str> = self
            .transactions
            .iter()
            .map(|t| t.customer_id.as_str())
            .collect();

        CatalogSummary {
            transactions: self.transactions.len(),
            customers: customers.len(),
            products: self.products.len(),
            categories: self
                .encoders
                .encoder(CategoricalColumn::ProductCategory)
                .map_or(0, |e| e.len()),
        }
    }
}

impl RecommendationAlgorithm for ItemBasedRecommender {
    fn recommend_products(&self, product_id: &str, n: usize) -> Result<Vec<ScoredProduct>> {
        let index = self
            .similarity
            .index_of(product_id)
            .ok_or_else(|| RecommenderError::UnknownProduct(product_id.to_string()))?;

        let scores = self.similarity.values().row(index).to_vec();
        let ranked = top_k_indices_excluding(&scores, n, Some(index));

        Ok(ranked
            .into_iter()
            .map(|i| self.scored(i, scores[i]))
            .collect())
    }

    fn recommend_products_for_customer(&self, customer_id: &str, n: usize) -> Result<CustomerRecommendations> {
        let history: Vec<&CustomerTransaction> = self
            .transactions
            .iter()
            .filter(|t| t.customer_id == customer_id)
            .collect();

        let Some(first) = history.first() else {
            return Ok(CustomerRecommendations::unknown(customer_id));
        };

        let decode = |column: CategoricalColumn, code: u32| {
            self.encoders
                .decode(column, code)
                .unwrap_or(UNKNOWN)
                .to_string()
        };
        let city = decode(CategoricalColumn::City, first.city);
        let age_group = decode(CategoricalColumn::AgeGroup, first.age_group);

        let mut queried = HashSet::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut products: Vec<ScoredProduct> = Vec::new();

        for transaction in &history {
            if !queried.insert(transaction.product_id.as_str()) {
                continue;
            }
            for candidate in self.recommend_products(&transaction.product_id, n)? {
                if seen.insert(candidate.product_id.clone()) {
                    products.push(candidate);
                }
            }
        }
        products.truncate(n);

        debug!(
            "Customer {} has {} purchases, {} recommendations",
            customer_id,
            history.len(),
            products.len()
        );

        Ok(CustomerRecommendations {
            customer_id: customer_id.to_string(),
            city,
            age_group,
            products,
        })
    }
}
