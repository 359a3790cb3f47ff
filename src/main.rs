use shoprec::services::recommendation::RecommendationService;
use shoprec::utils::validation::sanitize_identifier;
use shoprec::{init_tracing, Config, RecommendationResponse, ScoredProduct};
use anyhow::Result;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

const NOT_FOUND_NOTICE: &str = "No recommendations found for this customer ID. Please check the ID and try again.";

#[derive(Parser, Debug)]
#[command(author, version, about = "Customer product recommender", long_about = None)]
struct Args {
    #[arg(short, long, default_value = "config/default.toml")]
    config: String,

    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Dataset CSV, overriding the configured path
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Recommend for one customer and exit
    #[arg(long, conflicts_with = "product")]
    customer: Option<String>,

    /// List products similar to this product and exit
    #[arg(long)]
    product: Option<String>,

    #[arg(short, long, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    num_recommendations: Option<usize>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

fn print_customer(response: &RecommendationResponse, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(response)?);
        return Ok(());
    }

    if !response.found {
        println!("{}", NOT_FOUND_NOTICE);
        return Ok(());
    }

    println!("Customer Details");
    println!("  Customer ID:        {}", response.customer_id);
    println!("  Customer City:      {}", response.city);
    println!("  Customer Age Group: {}", response.age_group);
    println!("Recommended Products");
    for product in &response.recommendations {
        println!("  - Product ID: {} (Category: {})", product.product_id, product.category);
    }
    Ok(())
}

fn print_similar(product_id: &str, similar: &[ScoredProduct], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(similar)?);
        return Ok(());
    }

    println!("Products similar to {}", product_id);
    for product in similar {
        println!(
            "  - Product ID: {} (Category: {}, similarity {:.3})",
            product.product_id, product.category, product.score
        );
    }
    Ok(())
}

fn run_interactive(service: &RecommendationService, num_recommendations: Option<usize>, json: bool) -> Result<()> {
    let default_customer = service.config().recommendation.default_customer_id.clone();
    let summary = service.catalog_summary();
    println!("Customer Product Recommender");
    println!(
        "{} products across {} categories, {} customers",
        summary.products, summary.categories, summary.customers
    );

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("Enter Customer ID [{}] (or 'quit'): ", default_customer);
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let input = sanitize_identifier(&line);

        let customer_id = match input {
            "quit" | "exit" => break,
            "" => default_customer.as_str(),
            id => id,
        };

        let response = service.recommend_for_customer(customer_id, num_recommendations)?;
        print_customer(&response, json)?;
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    std::env::set_var("RUST_LOG", &args.log_level);
    init_tracing();

    let mut config = Config::load_or_default(&args.config)?;
    if let Some(data) = args.data {
        config.data.path = data;
    }
    info!("Loading dataset from {}", config.data.path.display());

    let service = RecommendationService::from_config(Arc::new(config))?;
    let stats = service.load_stats();
    info!("Read {} rows, dropped {}", stats.rows_read, stats.rows_dropped);

    if let Some(customer) = args.customer {
        let customer_id = sanitize_identifier(&customer);
        let response = service.recommend_for_customer(customer_id, args.num_recommendations)?;
        print_customer(&response, args.json)?;
    } else if let Some(product) = args.product {
        let product_id = sanitize_identifier(&product);
        let similar = service.similar_products(product_id, args.num_recommendations)?;
        print_similar(product_id, &similar, args.json)?;
    } else {
        run_interactive(&service, args.num_recommendations, args.json)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_recommendations_rejected() {
        assert!(Args::try_parse_from(["shoprec", "--customer", "C1", "-n", "0"]).is_err());

        let args = Args::try_parse_from(["shoprec", "--customer", "C1", "-n", "3"]).unwrap();
        assert_eq!(args.num_recommendations, Some(3));
    }
}
