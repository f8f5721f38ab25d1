mod cli;

use std::path::Path;

use clap::Parser;
use colored::*;
use tracing::{error, info};

use cli::{Cli, Commands};
use survey_payout::{
    config::Config,
    payout::{BatchProcessor, QualityScorer},
    survey::{ResolvedSchema, SurveyTable},
    utils, Result,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "survey_payout=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match Config::load(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Process {
            input,
            dry_run,
            threshold,
            output_dir,
        } => {
            if let Some(t) = threshold {
                config.scoring.threshold = t;
            }
            if let Some(dir) = output_dir {
                config.output.directory = dir.to_string_lossy().into_owned();
            }
            process(config, &input, dry_run)
        }

        Commands::Score { input, verbose } => score(config, &input, verbose),

        Commands::Validate { input } => validate(config, &input),
    };

    if let Err(e) = result {
        error!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }
}

fn process(config: Config, input: &Path, dry_run: bool) -> Result<()> {
    if dry_run {
        println!("{}", "Dry run: no file will be written".yellow());
    }

    let processor = BatchProcessor::new(config);
    let summary = processor.run(input, dry_run)?;

    if let Some(path) = &summary.output_path {
        println!("Payment list: {}", path.display().to_string().cyan());
    }
    summary.print_summary();

    Ok(())
}

fn score(config: Config, input: &Path, verbose: bool) -> Result<()> {
    let table = SurveyTable::load(input)?;
    let schema = ResolvedSchema::resolve(table.headers(), &config.schema)?;
    let scorer = QualityScorer::new(&config.scoring);
    let threshold = config.scoring.threshold;

    info!("Scoring {} responses", table.rows().len());

    let widths = [20, 24, 6, 10];
    utils::print_table_border(68);
    utils::print_table_row(&["Feedback code", "Account", "Score", "Qualifies"], &widths);
    utils::print_table_border(68);

    let mut qualifying = 0usize;
    for row in table.rows() {
        let s = scorer.score(row, &schema);
        let qualifies = s >= threshold;
        if qualifies {
            qualifying += 1;
        }
        if qualifies || verbose {
            utils::print_table_row(
                &[
                    row.get(schema.feedback_code),
                    &utils::format_account(row.get(schema.alipay_account)),
                    &s.to_string(),
                    if qualifies { "yes" } else { "no" },
                ],
                &widths,
            );
        }
    }
    utils::print_table_border(68);
    println!(
        "{} of {} responses qualify (threshold {})",
        qualifying.to_string().green(),
        table.rows().len(),
        threshold
    );

    Ok(())
}

fn validate(config: Config, input: &Path) -> Result<()> {
    let table = SurveyTable::load(input)?;
    let schema = ResolvedSchema::resolve(table.headers(), &config.schema)?;

    println!("{}", "Header schema resolved".green());
    println!(
        "  feedback code   -> column {} ({})",
        schema.feedback_code,
        table.headers()[schema.feedback_code]
    );
    println!(
        "  payment account -> column {} ({})",
        schema.alipay_account,
        table.headers()[schema.alipay_account]
    );
    for (n, idx) in schema.text_fields.iter().enumerate() {
        println!(
            "  text field {}    -> column {} ({})",
            n + 1,
            idx,
            table.headers()[*idx]
        );
    }

    Ok(())
}
