use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    pub recommendation: RecommendationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationConfig {
    pub num_recommendations: usize,
    pub default_customer_id: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig {
                path: PathBuf::from("data/updated_dataset.csv"),
            },
            recommendation: RecommendationConfig {
                num_recommendations: 5,
                default_customer_id: "ZP_CUST4000".to_string(),
            },
        }
    }
}

impl Config {
    /// Layers a TOML file and `SHOPREC__SECTION__KEY` environment variables
    /// over the defaults.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let defaults = Config::default();
        let settings = config::Config::builder()
            .set_default("data.path", defaults.data.path.display().to_string())?
            .set_default(
                "recommendation.num_recommendations",
                defaults.recommendation.num_recommendations as u64,
            )?
            .set_default(
                "recommendation.default_customer_id",
                defaults.recommendation.default_customer_id,
            )?
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("SHOPREC").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.recommendation.num_recommendations == 0 {
            anyhow::bail!("recommendation.num_recommendations must be at least 1");
        }
        Ok(())
    }

    /// Uses `path` when it exists, the defaults otherwise.
    pub fn load_or_default(path: &str) -> anyhow::Result<Self> {
        if std::path::Path::new(path).exists() {
            Self::from_file(path)
        } else {
            tracing::info!("Config file {} not found, using default configuration", path);
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.recommendation.num_recommendations, 5);
        assert_eq!(config.recommendation.default_customer_id, "ZP_CUST4000");
    }

    #[test]
    fn test_from_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[recommendation]\nnum_recommendations = 3").unwrap();

        let config = Config::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.recommendation.num_recommendations, 3);
        assert_eq!(config.recommendation.default_customer_id, "ZP_CUST4000");
        assert_eq!(config.data.path, PathBuf::from("data/updated_dataset.csv"));
    }

    #[test]
    fn test_zero_recommendations_rejected() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[recommendation]\nnum_recommendations = 0").unwrap();

        assert!(Config::from_file(file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = Config::load_or_default("does/not/exist.toml").unwrap();
        assert_eq!(config.recommendation.num_recommendations, 5);
    }
}
