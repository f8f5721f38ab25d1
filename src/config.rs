use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub schema: SchemaConfig,
    pub scoring: ScoringConfig,
    pub payment: PaymentConfig,
    pub output: OutputConfig,
}

/// Maps the survey export's columns onto the fields the processor needs.
///
/// Columns can be addressed by header name (preferred; the load fails fast if
/// a named column is missing or was reordered out of the sheet) or by position
/// as a fallback matching the upstream export layout.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SchemaConfig {
    pub feedback_code_column: Option<String>,
    pub account_column: Option<String>,
    pub text_columns: Vec<String>,

    pub feedback_code_index: usize,
    pub account_index: usize,
    pub text_indices: Vec<usize>,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            feedback_code_column: None,
            account_column: None,
            text_columns: Vec::new(),
            // Upstream export: feedback code in column 1, payment account in
            // column 2, the four free-text answers in columns 4-7.
            feedback_code_index: 1,
            account_index: 2,
            text_indices: vec![4, 5, 6, 7],
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ScoringConfig {
    /// Character count a text answer must exceed to earn a length point.
    pub min_text_len: usize,
    /// Keywords (matched against the lowercased concatenated answers) that
    /// mark a response as containing constructive suggestions.
    pub keywords: Vec<String>,
    /// Minimum score for a response to qualify for payment.
    pub threshold: u8,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            min_text_len: 10,
            keywords: [
                "建议", "希望", "应该", "可以", "改进", "优化", "suggest", "hope",
                "should", "could", "improve", "optimize",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            threshold: 3,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PaymentConfig {
    pub amount: f64,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self { amount: 3.00 }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: ".".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from an optional TOML file layered with
    /// `SURVEY_`-prefixed environment variables. Every field has a default
    /// reproducing the upstream tool's behavior, so the file may be absent.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("SURVEY").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
