use crate::algorithms::{ItemBasedRecommender, RecommendationAlgorithm};
use crate::config::Config;
use crate::data::{self, LoadStats};
use crate::error::Result;
use crate::models::*;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Session-scoped front door to the recommender: owns the fitted model and
/// applies configured defaults.
pub struct RecommendationService {
    recommender: ItemBasedRecommender,
    config: Arc<Config>,
    load_stats: LoadStats,
}

impl RecommendationService {
    /// Loads the configured dataset and fits the similarity model once.
    pub fn from_config(config: Arc<Config>) -> Result<Self> {
        let dataset = data::load_transactions(&config.data.path)?;
        Self::from_records(&dataset.records, dataset.stats, config)
    }

    pub fn from_records(records: &[TransactionRecord], load_stats: LoadStats, config: Arc<Config>) -> Result<Self> {
        let start_time = Instant::now();
        let recommender = ItemBasedRecommender::fit(records)?;
        let summary = recommender.summary();

        info!(
            "Built similarity matrix for {} products ({} categories, {} customers) in {}ms",
            summary.products,
            summary.categories,
            summary.customers,
            start_time.elapsed().as_millis()
        );

        Ok(Self {
            recommender,
            config,
            load_stats,
        })
    }

    pub fn recommend_for_customer(&self, customer_id: &str, num_recommendations: Option<usize>) -> Result<RecommendationResponse> {
        let n = num_recommendations.unwrap_or(self.config.recommendation.num_recommendations);
        let result = self.recommender.recommend_products_for_customer(customer_id, n)?;

        if result.is_empty() {
            warn!("No recommendations found for customer {}", customer_id);
        } else {
            info!(
                "Recommended {} products for customer {}",
                result.products.len(),
                customer_id
            );
        }

        Ok(result.into())
    }

    pub fn similar_products(&self, product_id: &str, num_recommendations: Option<usize>) -> Result<Vec<ScoredProduct>> {
        let n = num_recommendations.unwrap_or(self.config.recommendation.num_recommendations);
        self.recommender.recommend_products(product_id, n)
    }

    pub fn catalog_summary(&self) -> CatalogSummary {
        self.recommender.summary()
    }

    pub fn load_stats(&self) -> LoadStats {
        self.load_stats
    }

    pub fn recommender(&self) -> &ItemBasedRecommender {
        &self.recommender
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecommenderError;
    use crate::utils::validation::sanitize_identifier;

    fn record(customer: &str, product: &str, city: &str, price: f32) -> TransactionRecord {
        TransactionRecord {
            customer_id: customer.to_string(),
            product_id: product.to_string(),
            city: city.to_string(),
            age_group: "25-34".to_string(),
            loyalty_tier: "Silver".to_string(),
            payment_method: "Card".to_string(),
            gender: "Male".to_string(),
            product_category: (if price > 50.0 { "Electronics" } else { "Grocery" }).to_string(),
            price,
            competitor_price: price + 5.0,
            ad_click_through_rate: price / 100.0,
            browsing_time_mins: 3.0,
            voice_search_count: 0.0,
            visual_search_count: price / 10.0,
        }
    }

    fn service(num_recommendations: usize) -> RecommendationService {
        let mut config = Config::default();
        config.recommendation.num_recommendations = num_recommendations;
        let records: Vec<_> = (0..8)
            .map(|i| record(&format!("C{}", i % 3), &format!("P{}", i), "Mumbai", 10.0 + i as f32 * 12.0))
            .collect();
        RecommendationService::from_records(&records, LoadStats::default(), Arc::new(config)).unwrap()
    }

    #[test]
    fn test_uses_configured_default_count() {
        let service = service(2);
        let response = service.recommend_for_customer("C0", None).unwrap();
        assert!(response.found);
        assert_eq!(response.recommendations.len(), 2);
        assert_eq!(response.city, "Mumbai");

        let response = service.recommend_for_customer("C0", Some(4)).unwrap();
        assert_eq!(response.recommendations.len(), 4);
    }

    #[test]
    fn test_unknown_customer_response() {
        let service = service(5);
        let response = service.recommend_for_customer("ZP_CUST0000", None).unwrap();
        assert!(!response.found);
        assert!(response.recommendations.is_empty());
        assert_eq!(response.city, UNKNOWN);
        assert_eq!(response.age_group, UNKNOWN);
    }

    #[test]
    fn test_single_product_catalog_is_not_found() {
        let records = vec![record("C1", "P1", "Pune", 20.0), record("C2", "P1", "Pune", 20.0)];
        let service =
            RecommendationService::from_records(&records, LoadStats::default(), Arc::new(Config::default())).unwrap();

        let response = service.recommend_for_customer("C1", None).unwrap();
        assert!(!response.found);
        assert!(response.recommendations.is_empty());
        assert_eq!(response.city, "Pune");
    }

    #[test]
    fn test_identifiers_match_exactly() {
        let long_id = "A".repeat(64);
        let records = vec![record(&long_id, "P1", "Pune", 20.0), record(&long_id, "P2", "Pune", 80.0)];
        let service =
            RecommendationService::from_records(&records, LoadStats::default(), Arc::new(Config::default())).unwrap();

        let response = service.recommend_for_customer(sanitize_identifier(&long_id), None).unwrap();
        assert!(response.found);

        let input = format!("  {}B ", long_id);
        let response = service.recommend_for_customer(sanitize_identifier(&input), None).unwrap();
        assert!(!response.found);
        assert_eq!(response.customer_id, format!("{}B", long_id));
        assert_eq!(response.city, UNKNOWN);
        assert!(response.recommendations.is_empty());
    }

    #[test]
    fn test_similar_products() {
        let service = service(3);
        let similar = service.similar_products("P0", None).unwrap();
        assert_eq!(similar.len(), 3);
        assert!(similar.iter().all(|p| p.product_id != "P0"));

        assert!(matches!(
            service.similar_products("nope", None),
            Err(RecommenderError::UnknownProduct(_))
        ));
    }

    #[test]
    fn test_catalog_summary() {
        let service = service(5);
        let summary = service.catalog_summary();
        assert_eq!(summary.transactions, 8);
        assert_eq!(summary.customers, 3);
        assert_eq!(summary.products, 8);
        assert_eq!(summary.categories, 2);
    }
}
