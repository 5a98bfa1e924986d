
use indicatif::ProgressIterator;
use log::{LevelFilter, error, info, warn};
use std::time::Instant;

use exomark::cli::aggregate::{AggregateSettings, check_aggregate_settings};
use exomark::cli::core::{Commands, get_cli};
use exomark::cli::verify::{VerifySettings, check_verify_settings};
use exomark::parsing::base_counts::BaseCountTable;
use exomark::parsing::case_scan::{find_case_dirs, load_case_benchmark};
use exomark::parsing::variant_table::{check_containment, load_passing_variants, load_truth_table};
use exomark::util::json_io::save_json;
use exomark::util::progress_bar::get_progress_style;
use exomark::writers::benchmark_report::{BenchmarkReportWriter, ReportConfigBuilder};

fn run_aggregate(settings: AggregateSettings) {
    // start the timer
    let start_time = Instant::now();

    // set up logging before we check the other settings
    let filter_level: LevelFilter = match settings.verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace
    };
    env_logger::builder()
        .format_timestamp_millis()
        .filter_level(filter_level)
        .init();

    let settings = match check_aggregate_settings(settings) {
        Ok(s) => s,
        Err(e) => {
            error!("Error while verifying settings: {e:#}");
            std::process::exit(exitcode::CONFIG);
        }
    };

    // create the primary output folder
    info!("Creating output folder at {:?}...", settings.output_dir);
    match std::fs::create_dir_all(&settings.output_dir) {
        Ok(()) => {},
        Err(e) => {
            error!("Error while creating output folder: {e}");
            std::process::exit(exitcode::IOERR);
        }
    }

    // create a debug folder if specified and save the CLI options there
    if let Some(debug_folder) = settings.debug_folder.as_ref() {
        info!("Creating debug folder at {debug_folder:?}...");
        match std::fs::create_dir_all(debug_folder) {
            Ok(()) => {},
            Err(e) => {
                error!("Error while creating debug folder: {e}");
                std::process::exit(exitcode::IOERR);
            }
        }

        let cli_json = debug_folder.join("cli_settings.json");
        info!("Saving CLI options to {cli_json:?}...");
        if let Err(e) = save_json(&settings, &cli_json) {
            error!("Error while saving CLI options: {e}");
            std::process::exit(exitcode::IOERR);
        }
    }

    // load the base-count table first, nothing can be derived without it
    info!("Loading the number of bases table...");
    let base_counts_fn = match BaseCountTable::find_in_dir(&settings.input_dir) {
        Ok(filename) => filename,
        Err(e) => {
            error!("Error while locating the number of bases table: {e:#}");
            std::process::exit(exitcode::NOINPUT);
        }
    };
    let base_counts = match BaseCountTable::from_path(&base_counts_fn) {
        Ok(table) => table,
        Err(e) => {
            error!("Error while parsing {base_counts_fn:?}: {e:#}");
            std::process::exit(exitcode::DATAERR);
        }
    };
    info!("Loaded base counts for {} case(s) from {base_counts_fn:?}.", base_counts.len());

    // find the case directories to aggregate
    let case_dirs = match find_case_dirs(&settings.input_dir, &settings.case_prefixes) {
        Ok(dirs) => dirs,
        Err(e) => {
            error!("Error while scanning for case directories: {e:#}");
            std::process::exit(exitcode::IOERR);
        }
    };
    if case_dirs.is_empty() {
        warn!("No case directories found in {:?}, the report will be empty.", settings.input_dir);
    } else {
        info!("Found {} case directories to aggregate.", case_dirs.len());
    }

    // parse every case; any failure here is fatal since the report must cover all cases
    let mut report_writer = BenchmarkReportWriter::default();
    let style = get_progress_style();
    info!("Aggregating case metrics...");
    for case_dir in case_dirs.iter().progress_with_style(style) {
        match load_case_benchmark(case_dir, &base_counts) {
            Ok(case_benchmark) => report_writer.add_case_benchmark(case_benchmark),
            Err(e) => {
                error!("Error while loading case {case_dir:?}: {e:#}");
                std::process::exit(exitcode::DATAERR);
            }
        }
    }

    // now write the report
    let report_config = match ReportConfigBuilder::default()
        .output_folder(settings.output_dir.clone())
        .build() {
        Ok(rc) => rc,
        Err(e) => {
            error!("Error while building report config: {e:?}");
            std::process::exit(exitcode::SOFTWARE);
        }
    };

    match report_writer.write_report(&report_config) {
        Ok(report_fn) => info!("Benchmarking metrics for {} case(s) written to {report_fn:?}.", report_writer.case_count()),
        Err(e) => {
            error!("Error while saving report file: {e:#}");
            std::process::exit(exitcode::IOERR);
        }
    }

    info!("Aggregation completed in {} seconds.", start_time.elapsed().as_secs_f64());
}

fn run_verify(settings: VerifySettings) {
    // start the timer
    let start_time = Instant::now();

    // set up logging before we check the other settings
    let filter_level: LevelFilter = match settings.verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace
    };
    env_logger::builder()
        .format_timestamp_millis()
        .filter_level(filter_level)
        .init();

    let settings = match check_verify_settings(settings) {
        Ok(s) => s,
        Err(e) => {
            error!("Error while verifying settings: {e:#}");
            std::process::exit(exitcode::CONFIG);
        }
    };

    // load the truth table, which also pins the chromosome of interest
    let truth = match load_truth_table(&settings.truth_filename) {
        Ok(t) => t,
        Err(e) => {
            error!("Error while loading truth table: {e:#}");
            std::process::exit(exitcode::DATAERR);
        }
    };
    info!("Loaded {} truth variant(s) on {}.", truth.variants.len(), truth.chromosome);

    let passing_variants = match load_passing_variants(&settings.vcf_filename, &truth.chromosome) {
        Ok(v) => v,
        Err(e) => {
            error!("Error while loading VCF variants: {e:#}");
            std::process::exit(exitcode::DATAERR);
        }
    };
    info!("Loaded {} passing variant(s) on {} from the VCF.", passing_variants.len(), truth.chromosome);

    // the verdict goes to stdout, it is the product of this subcommand
    let outcome = check_containment(&truth, &passing_variants);
    println!("VCF file: {}", settings.vcf_filename.display());
    println!("Truth file: {}", settings.truth_filename.display());
    println!("Variants matched: {}/{}", outcome.matched, truth.variants.len());
    for missing in outcome.missing.iter() {
        println!("Missing: {missing}");
    }

    if outcome.passed() {
        println!("Pass");
    } else {
        println!("Fail");
        info!("Verification completed in {} seconds.", start_time.elapsed().as_secs_f64());
        std::process::exit(exitcode::DATAERR);
    }

    info!("Verification completed in {} seconds.", start_time.elapsed().as_secs_f64());
}

fn main() {
    let cli = get_cli();
    match cli.command {
        Commands::Aggregate(settings) => {
            run_aggregate(*settings);
        },
        Commands::Verify(settings) => {
            run_verify(*settings);
        }
    }

    info!("Process finished successfully.");
}
