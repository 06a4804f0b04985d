//! QueryOpp: Query Opportunity Analyzer CLI
//!
//! Scores a search-query performance export and prints a prioritized,
//! action-ready list of keywords.

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use console::style;

use queryopp::cli::{prompt_for_other_input, Cli};
use queryopp::pipeline::{load_raw_table, prepare_table, PipelineError};
use queryopp::report::{
    display_opportunities, display_top_actions, export_run_summary, save_dataset, top_actions,
    ExportParams, OpportunityFilter, RunSummary,
};
use queryopp::utils::{
    create_spinner, finish_with_success, finish_with_warning, init_logging, print_banner,
    print_completion, print_config, print_count, print_info, print_step_header, print_success,
    print_warning,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut input = cli.input().cloned().ok_or_else(|| {
        anyhow::anyhow!("Input file is required. Use -i/--input to specify a file.")
    })?;
    let filter = cli.filter();

    print_banner(env!("CARGO_PKG_VERSION"));

    loop {
        let output_path = cli.output_path(&input);
        print_config(&input, &output_path, &filter);

        match run(&cli, &input, &output_path, &filter) {
            Ok(()) => break,
            Err(err) if is_no_usable_data(&err) && !cli.no_confirm => {
                print_warning(&err.to_string());
                match prompt_for_other_input()? {
                    Some(next) => input = next,
                    None => {
                        println!("Cancelled by user.");
                        return Ok(());
                    }
                }
            }
            Err(err) => return Err(err),
        }
    }

    print_completion();

    Ok(())
}

/// Load, score, report and save one export
fn run(cli: &Cli, input: &Path, output_path: &Path, filter: &OpportunityFilter) -> Result<()> {
    // Step 1: Load export
    print_step_header(1, "Load Export");
    let spinner = create_spinner("Reading export...");
    let raw = load_raw_table(input)?;
    finish_with_success(&spinner, "Export loaded");

    let total_rows = raw.height();
    println!("\n    {} Export Statistics:", style("✧").cyan());
    println!("      Rows: {}", total_rows);
    println!("      Columns: {}", raw.width());

    // Step 2: Normalize and score
    print_step_header(2, "Normalize & Score");
    let spinner = create_spinner("Coercing metrics and scoring keywords...");
    let scored = match prepare_table(raw) {
        Ok(df) => df,
        Err(err) => {
            let message = if err.is_no_usable_data() {
                "No usable data"
            } else {
                "Scoring failed"
            };
            finish_with_warning(&spinner, message);
            return Err(err.into());
        }
    };
    finish_with_success(&spinner, "Keywords scored");

    let dropped = total_rows - scored.height();
    if dropped > 0 {
        print_count("row(s) without a usable keyword", dropped, Some("(dropped)"));
    }
    print_success(&format!("{} keyword(s) bucketed", scored.height()));

    // Step 3: Summary
    print_step_header(3, "Summary");
    let summary = RunSummary::from_frame(&scored)?;
    summary.display();

    // Step 4: Prioritized opportunities
    print_step_header(4, "Prioritized Opportunities");
    let mut filtered = filter.apply(&scored)?;
    if filtered.height() == 0 {
        print_info("No keywords match the current filters");
    } else {
        print_count(
            "keyword(s) after filtering",
            filtered.height(),
            Some(&format!("(score ≥ {:.2})", filter.min_score)),
        );
        println!();
        display_opportunities(&filtered)?;
    }

    // Step 5: What to do next
    print_step_header(5, "What You Do Next");
    let actions = top_actions(&scored, cli.top)?;
    display_top_actions(&actions);

    // Step 6: Save
    print_step_header(6, "Save Results");
    let spinner = create_spinner("Writing output file...");
    save_dataset(&mut filtered, output_path)?;
    finish_with_success(&spinner, &format!("Saved to {}", output_path.display()));

    if let Some(json_path) = &cli.summary_json {
        let input_file = input.display().to_string();
        let params = ExportParams {
            input_file: &input_file,
            filter,
        };
        export_run_summary(&summary, &actions, &params, json_path)?;
        print_success(&format!("Run summary written to {}", json_path.display()));
    }

    Ok(())
}

fn is_no_usable_data(err: &anyhow::Error) -> bool {
    err.downcast_ref::<PipelineError>()
        .is_some_and(PipelineError::is_no_usable_data)
}
