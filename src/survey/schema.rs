use tracing::debug;

use crate::{
    config::SchemaConfig,
    error::{PayoutError, Result},
};

/// Column positions for the fields the processor reads, resolved against an
/// actual header row.
///
/// Named columns are looked up in the header and fail fast when missing, so a
/// reordered or truncated export aborts with a descriptive error instead of
/// silently paying out against the wrong columns.
#[derive(Debug, Clone)]
pub struct ResolvedSchema {
    pub feedback_code: usize,
    pub alipay_account: usize,
    pub text_fields: Vec<usize>,
}

impl ResolvedSchema {
    pub fn resolve(headers: &[String], cfg: &SchemaConfig) -> Result<Self> {
        let feedback_code = match &cfg.feedback_code_column {
            Some(name) => find_column(headers, name, "feedback code")?,
            None => check_index(headers, cfg.feedback_code_index, "feedback code")?,
        };

        let alipay_account = match &cfg.account_column {
            Some(name) => find_column(headers, name, "payment account")?,
            None => check_index(headers, cfg.account_index, "payment account")?,
        };

        let text_fields = if cfg.text_columns.is_empty() {
            if cfg.text_indices.is_empty() {
                return Err(PayoutError::Config(
                    "no feedback text columns configured".to_string(),
                ));
            }
            cfg.text_indices
                .iter()
                .map(|&idx| check_index(headers, idx, "feedback text"))
                .collect::<Result<Vec<_>>>()?
        } else {
            cfg.text_columns
                .iter()
                .map(|name| find_column(headers, name, "feedback text"))
                .collect::<Result<Vec<_>>>()?
        };

        let schema = Self {
            feedback_code,
            alipay_account,
            text_fields,
        };
        debug!("Resolved column schema: {:?}", schema);
        Ok(schema)
    }
}

fn find_column(headers: &[String], name: &str, what: &str) -> Result<usize> {
    headers.iter().position(|h| h == name).ok_or_else(|| {
        PayoutError::Schema(format!(
            "{} column '{}' not found in header (columns: {})",
            what,
            name,
            headers.join(", ")
        ))
    })
}

fn check_index(headers: &[String], idx: usize, what: &str) -> Result<usize> {
    if idx < headers.len() {
        Ok(idx)
    } else {
        Err(PayoutError::Schema(format!(
            "{} column expected at index {} but the header has only {} columns",
            what,
            idx,
            headers.len()
        )))
    }
}
