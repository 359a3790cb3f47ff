use shoprec::{init_tracing, ProductRecord, TransactionRecord};
use anyhow::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use tracing::info;

const CITIES: [&str; 6] = ["Delhi", "Mumbai", "Bangalore", "Chennai", "Kolkata", "Hyderabad"];
const AGE_GROUPS: [&str; 5] = ["18-24", "25-34", "35-44", "45-54", "55+"];
const LOYALTY_TIERS: [&str; 3] = ["Bronze", "Silver", "Gold"];
const PAYMENT_METHODS: [&str; 4] = ["Card", "UPI", "Net Banking", "Cash on Delivery"];
const GENDERS: [&str; 3] = ["Male", "Female", "Other"];
const CATEGORIES: [&str; 6] = ["Electronics", "Clothing", "Books", "Home", "Beauty", "Sports"];

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate a synthetic retail transaction dataset", long_about = None)]
struct Args {
    #[arg(short, long, default_value = "data/updated_dataset.csv")]
    output: PathBuf,

    #[arg(long, default_value_t = 500)]
    customers: usize,

    #[arg(long, default_value_t = 200)]
    products: usize,

    #[arg(long, default_value_t = 5000)]
    transactions: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    #[arg(short, long, default_value = "info")]
    log_level: String,
}

struct Customer {
    id: String,
    city: &'static str,
    age_group: &'static str,
    loyalty_tier: &'static str,
    payment_method: &'static str,
    gender: &'static str,
}

fn pick(rng: &mut StdRng, values: &[&'static str]) -> &'static str {
    values.choose(rng).copied().unwrap_or_default()
}

fn generate_customers(rng: &mut StdRng, count: usize) -> Vec<Customer> {
    (0..count)
        .map(|i| Customer {
            id: format!("ZP_CUST{:04}", 4000 + i),
            city: pick(rng, &CITIES),
            age_group: pick(rng, &AGE_GROUPS),
            loyalty_tier: pick(rng, &LOYALTY_TIERS),
            payment_method: pick(rng, &PAYMENT_METHODS),
            gender: pick(rng, &GENDERS),
        })
        .collect()
}

fn generate_products(rng: &mut StdRng, count: usize) -> Vec<ProductRecord> {
    (0..count)
        .map(|i| {
            let price: f32 = rng.gen_range(5.0..2000.0);
            ProductRecord {
                product_id: format!("ZP_PROD{:04}", 1000 + i),
                category: pick(rng, &CATEGORIES).to_string(),
                price,
                competitor_price: price * rng.gen_range(0.8..1.2),
                ad_click_through_rate: rng.gen_range(0.01..0.3),
                browsing_time_mins: rng.gen_range(0.5..60.0),
                voice_search_count: rng.gen_range(0..20) as f32,
                visual_search_count: rng.gen_range(0..30) as f32,
            }
        })
        .collect()
}

fn main() -> Result<()> {
    let args = Args::parse();

    std::env::set_var("RUST_LOG", &args.log_level);
    init_tracing();

    if args.customers == 0 || args.products == 0 {
        return Err(anyhow::anyhow!("customers and products must be non-zero"));
    }

    let mut rng = StdRng::seed_from_u64(args.seed);
    let customers = generate_customers(&mut rng, args.customers);
    let products = generate_products(&mut rng, args.products);

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut writer = csv::Writer::from_path(&args.output)?;

    for _ in 0..args.transactions {
        let customer = &customers[rng.gen_range(0..customers.len())];
        let product = &products[rng.gen_range(0..products.len())];

        writer.serialize(TransactionRecord {
            customer_id: customer.id.clone(),
            product_id: product.product_id.clone(),
            city: customer.city.to_string(),
            age_group: customer.age_group.to_string(),
            loyalty_tier: customer.loyalty_tier.to_string(),
            payment_method: customer.payment_method.to_string(),
            gender: customer.gender.to_string(),
            product_category: product.category.clone(),
            price: product.price,
            competitor_price: product.competitor_price,
            ad_click_through_rate: product.ad_click_through_rate,
            browsing_time_mins: product.browsing_time_mins,
            voice_search_count: product.voice_search_count,
            visual_search_count: product.visual_search_count,
        })?;
    }
    writer.flush()?;

    info!(
        "Wrote {} transactions ({} customers, {} products) to {}",
        args.transactions,
        args.customers,
        args.products,
        args.output.display()
    );

    Ok(())
}
