use crate::data::RawTransaction;
use crate::models::TransactionRecord;
use anyhow::{anyhow, Result};

// Cell values read as "no value", matching the usual NA spellings of
// spreadsheet and dataframe exports.
pub const MISSING_TOKENS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub fn is_missing(value: &str) -> bool {
    MISSING_TOKENS.contains(&value.trim())
}

fn required_text(value: &Option<String>, column: &str) -> Result<String> {
    match value.as_deref().map(str::trim) {
        Some(text) if !is_missing(text) => Ok(text.to_string()),
        _ => Err(anyhow!("{} is missing", column)),
    }
}

fn required_number(value: &Option<String>, column: &str) -> Result<f32> {
    let text = required_text(value, column)?;
    let number: f32 = text
        .parse()
        .map_err(|_| anyhow!("{} is not a number: {:?}", column, text))?;

    // NaN and infinities count as missing
    if !number.is_finite() {
        return Err(anyhow!("{} is not finite: {:?}", column, text));
    }

    Ok(number)
}

pub fn validate_transaction(raw: &RawTransaction) -> Result<TransactionRecord> {
    Ok(TransactionRecord {
        customer_id: required_text(&raw.customer_id, "Customer_ID")?,
        product_id: required_text(&raw.product_id, "Product_ID")?,
        city: required_text(&raw.city, "City")?,
        age_group: required_text(&raw.age_group, "Age_Group")?,
        loyalty_tier: required_text(&raw.loyalty_tier, "Loyalty_Tier")?,
        payment_method: required_text(&raw.payment_method, "Payment_Method")?,
        gender: required_text(&raw.gender, "Gender")?,
        product_category: required_text(&raw.product_category, "Product_Category")?,
        price: required_number(&raw.price, "Price")?,
        competitor_price: required_number(&raw.competitor_price, "Competitor_Price")?,
        ad_click_through_rate: required_number(&raw.ad_click_through_rate, "Ad_Click_Through_Rate")?,
        browsing_time_mins: required_number(&raw.browsing_time_mins, "Browsing_Time_mins")?,
        voice_search_count: required_number(&raw.voice_search_count, "Voice_Search_Count")?,
        visual_search_count: required_number(&raw.visual_search_count, "Visual_Search_Count")?,
    })
}

/// Identifiers are matched exactly after trimming surrounding whitespace.
pub fn sanitize_identifier(input: &str) -> &str {
    input.trim()
}
