use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// Sentinel reported for city and age group when a customer is not found.
pub const UNKNOWN: &str = "Unknown";

/// One complete row of the purchase/browsing dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(rename = "Customer_ID")]
    pub customer_id: String,
    #[serde(rename = "Product_ID")]
    pub product_id: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Age_Group")]
    pub age_group: String,
    #[serde(rename = "Loyalty_Tier")]
    pub loyalty_tier: String,
    #[serde(rename = "Payment_Method")]
    pub payment_method: String,
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "Product_Category")]
    pub product_category: String,
    #[serde(rename = "Price")]
    pub price: f32,
    #[serde(rename = "Competitor_Price")]
    pub competitor_price: f32,
    #[serde(rename = "Ad_Click_Through_Rate")]
    pub ad_click_through_rate: f32,
    #[serde(rename = "Browsing_Time_mins")]
    pub browsing_time_mins: f32,
    #[serde(rename = "Voice_Search_Count")]
    pub voice_search_count: f32,
    #[serde(rename = "Visual_Search_Count")]
    pub visual_search_count: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CategoricalColumn {
    Gender,
    City,
    ProductCategory,
    PaymentMethod,
    AgeGroup,
    LoyaltyTier,
}

impl CategoricalColumn {
    pub const ALL: [CategoricalColumn; 6] = [
        CategoricalColumn::Gender,
        CategoricalColumn::City,
        CategoricalColumn::ProductCategory,
        CategoricalColumn::PaymentMethod,
        CategoricalColumn::AgeGroup,
        CategoricalColumn::LoyaltyTier,
    ];

    pub fn value<'a>(&self, record: &'a TransactionRecord) -> &'a str {
        match self {
            CategoricalColumn::Gender => &record.gender,
            CategoricalColumn::City => &record.city,
            CategoricalColumn::ProductCategory => &record.product_category,
            CategoricalColumn::PaymentMethod => &record.payment_method,
            CategoricalColumn::AgeGroup => &record.age_group,
            CategoricalColumn::LoyaltyTier => &record.loyalty_tier,
        }
    }
}

/// Per-product attributes, taken from the first row a product appears in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub product_id: String,
    pub category: String,
    pub price: f32,
    pub competitor_price: f32,
    pub ad_click_through_rate: f32,
    pub browsing_time_mins: f32,
    pub voice_search_count: f32,
    pub visual_search_count: f32,
}

impl ProductRecord {
    /// Number of numeric attributes appended after the category code.
    pub const NUMERIC_FEATURES: usize = 6;

    pub fn numeric_features(&self) -> [f32; Self::NUMERIC_FEATURES] {
        [
            self.price,
            self.competitor_price,
            self.ad_click_through_rate,
            self.browsing_time_mins,
            self.voice_search_count,
            self.visual_search_count,
        ]
    }
}

impl From<&TransactionRecord> for ProductRecord {
    fn from(record: &TransactionRecord) -> Self {
        Self {
            product_id: record.product_id.clone(),
            category: record.product_category.clone(),
            price: record.price,
            competitor_price: record.competitor_price,
            ad_click_through_rate: record.ad_click_through_rate,
            browsing_time_mins: record.browsing_time_mins,
            voice_search_count: record.voice_search_count,
            visual_search_count: record.visual_search_count,
        }
    }
}

/// Customer-side columns of a transaction with categoricals as integer codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerTransaction {
    pub customer_id: String,
    pub product_id: String,
    pub city: u32,
    pub age_group: u32,
    pub loyalty_tier: u32,
    pub payment_method: u32,
    pub gender: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredProduct {
    pub product_id: String,
    pub category: String,
    pub score: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecommendations {
    pub customer_id: String,
    pub city: String,
    pub age_group: String,
    pub products: Vec<ScoredProduct>,
}

impl CustomerRecommendations {
    pub fn unknown(customer_id: &str) -> Self {
        Self {
            customer_id: customer_id.to_string(),
            city: UNKNOWN.to_string(),
            age_group: UNKNOWN.to_string(),
            products: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub customer_id: String,
    pub found: bool,
    pub city: String,
    pub age_group: String,
    pub recommendations: Vec<ScoredProduct>,
    pub generated_at: DateTime<Utc>,
}

impl From<CustomerRecommendations> for RecommendationResponse {
    fn from(result: CustomerRecommendations) -> Self {
        Self {
            found: !result.products.is_empty(),
            customer_id: result.customer_id,
            city: result.city,
            age_group: result.age_group,
            recommendations: result.products,
            generated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSummary {
    pub transactions: usize,
    pub customers: usize,
    pub products: usize,
    pub categories: usize,
}
