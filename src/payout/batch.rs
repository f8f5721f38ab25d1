use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::Local;
use tracing::{debug, info};

use crate::{
    config::Config,
    error::Result,
    payout::{PaymentRecord, QualityScorer},
    survey::{ResolvedSchema, SurveyTable},
};

/// Batch processor turning a survey export into a pending payment list.
///
/// Rows are processed strictly sequentially in file order; any row-level
/// failure aborts the whole run. One output file per invocation.
pub struct BatchProcessor {
    config: Config,
    scorer: QualityScorer,
}

impl BatchProcessor {
    pub fn new(config: Config) -> Self {
        let scorer = QualityScorer::new(&config.scoring);
        Self { config, scorer }
    }

    /// Full run: load, score, filter, and (unless `dry_run`) write the
    /// payment list file.
    pub fn run(&self, input: &Path, dry_run: bool) -> Result<BatchSummary> {
        let mut summary = self.process_file(input)?;

        if dry_run {
            info!(
                "DRY RUN: would write {} payment records",
                summary.records.len()
            );
        } else {
            let path = self.write_payment_list(&summary.records)?;
            info!("Wrote payment list to {}", path.display());
            summary.output_path = Some(path);
        }

        Ok(summary)
    }

    /// Score every row of the export and assemble payment records for the
    /// ones meeting the threshold, preserving row order.
    pub fn process_file(&self, input: &Path) -> Result<BatchSummary> {
        let table = SurveyTable::load(input)?;
        let schema = ResolvedSchema::resolve(table.headers(), &self.config.schema)?;

        info!(
            "Processing {} responses from {}",
            table.rows().len(),
            input.display()
        );

        let mut records = Vec::new();
        for row in table.rows() {
            let quality_score = self.scorer.score(row, &schema);

            if quality_score >= self.config.scoring.threshold {
                records.push(PaymentRecord::new(
                    row.get(schema.feedback_code).to_string(),
                    row.get(schema.alipay_account).to_string(),
                    self.config.payment.amount,
                    quality_score,
                    row.to_map(table.headers()),
                ));
            } else {
                debug!(
                    "Row with feedback code '{}' scored {} (below threshold {})",
                    row.get(schema.feedback_code),
                    quality_score,
                    self.config.scoring.threshold
                );
            }
        }

        Ok(BatchSummary {
            total_rows: table.rows().len(),
            records,
            output_path: None,
        })
    }

    /// Serialize the records as a pretty-printed UTF-8 JSON array named
    /// after today's date. Non-ASCII text is written as-is.
    pub fn write_payment_list(&self, records: &[PaymentRecord]) -> Result<PathBuf> {
        let filename = format!("payment_list_{}.json", Local::now().format("%Y%m%d"));
        let path = Path::new(&self.config.output.directory).join(filename);

        let json = serde_json::to_string_pretty(records)?;
        fs::write(&path, json)?;

        Ok(path)
    }
}

/// Outcome of one batch run.
#[derive(Debug)]
pub struct BatchSummary {
    pub total_rows: usize,
    pub records: Vec<PaymentRecord>,
    pub output_path: Option<PathBuf>,
}

impl BatchSummary {
    pub fn qualifying(&self) -> usize {
        self.records.len()
    }

    /// The one-line console report.
    pub fn print_summary(&self) {
        println!(
            "Processing complete: {} qualifying responses",
            self.qualifying()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payout::PaymentStatus;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    const HEADER: &str = "序号,反馈码,支付宝账号,提交时间,q1,q2,q3,q4";

    fn export(rows: &[&str]) -> NamedTempFile {
        let mut tmp = NamedTempFile::new().unwrap();
        writeln!(tmp, "{}", HEADER).unwrap();
        for row in rows {
            writeln!(tmp, "{}", row).unwrap();
        }
        tmp
    }

    fn processor() -> BatchProcessor {
        BatchProcessor::new(Config::default())
    }

    #[test]
    fn qualifying_rows_become_records_in_file_order() {
        // Row 1: two long answers + keyword = 4, qualifies.
        // Row 2: all blank = 1, filtered out.
        // Row 3: two long answers = 3, qualifies.
        let tmp = export(&[
            "1,FB001,alice,2024-01-01,建议改进一下加载的速度,这个界面我非常非常喜欢,,",
            "2,FB002,bob,2024-01-02,,,,",
            "3,FB003,carol,2024-01-03,answer well past ten,another long answer here,,",
        ]);

        let summary = processor().process_file(tmp.path()).unwrap();
        assert_eq!(summary.total_rows, 3);
        assert_eq!(summary.qualifying(), 2);

        let codes: Vec<&str> = summary
            .records
            .iter()
            .map(|r| r.feedback_code.as_str())
            .collect();
        assert_eq!(codes, ["FB001", "FB003"]);

        for record in &summary.records {
            assert_eq!(record.amount, 3.00);
            assert_eq!(record.payment_status, PaymentStatus::Pending);
            assert!(record.quality_score >= 3 && record.quality_score <= 5);
            assert_eq!(record.feedback_data.len(), 8);
        }
    }

    #[test]
    fn feedback_data_carries_the_full_row() {
        let tmp = export(&[
            "1,FB001,alice,2024-01-01,建议改进一下加载的速度,这个界面我非常非常喜欢,,",
        ]);

        let summary = processor().process_file(tmp.path()).unwrap();
        let data = &summary.records[0].feedback_data;
        assert_eq!(data["反馈码"], "FB001");
        assert_eq!(data["支付宝账号"], "alice");
        assert_eq!(data["q4"], "");
    }

    #[test]
    fn write_then_reparse_round_trips() {
        let tmp = export(&[
            "1,FB001,alice,2024-01-01,建议改进一下加载的速度,这个界面我非常非常喜欢,,",
        ]);
        let out = tempdir().unwrap();

        let mut config = Config::default();
        config.output.directory = out.path().to_string_lossy().into_owned();
        let processor = BatchProcessor::new(config);

        let summary = processor.run(tmp.path(), false).unwrap();
        let path = summary.output_path.as_ref().unwrap();
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("payment_list_"));

        let json = fs::read_to_string(path).unwrap();
        // Non-ASCII must be preserved, not \u-escaped.
        assert!(json.contains("反馈码"));

        let reparsed: Vec<PaymentRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(reparsed, summary.records);
    }

    #[test]
    fn dry_run_writes_nothing() {
        let tmp = export(&[
            "1,FB001,alice,2024-01-01,建议改进一下加载的速度,这个界面我非常非常喜欢,,",
        ]);
        let out = tempdir().unwrap();

        let mut config = Config::default();
        config.output.directory = out.path().to_string_lossy().into_owned();
        let processor = BatchProcessor::new(config);

        let summary = processor.run(tmp.path(), true).unwrap();
        assert_eq!(summary.qualifying(), 1);
        assert!(summary.output_path.is_none());
        assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
    }

    #[test]
    fn schema_mismatch_aborts_the_run() {
        let mut tmp = NamedTempFile::new().unwrap();
        writeln!(tmp, "only,three,columns").unwrap();
        writeln!(tmp, "1,2,3").unwrap();

        assert!(processor().process_file(tmp.path()).is_err());
    }
}
