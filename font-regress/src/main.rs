//! Checks a font engine against golden data for third party fonts.
//!
//! The fonts are not distributed with this tool. Point it at them with
//! `--microsoft-dir` and `--adobe-dir` and pass `--proprietary` to run.

use std::path::PathBuf;

use clap::Parser;
use font_regress::{
    DatasetRegistry, FontReport, Harness, HarnessConfig, Provider, QualifiedFontId, SkrifaEngine,
    Status,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug)]
struct GoldenArgs {
    /// Golden data to use in place of the built in set
    #[arg(long)]
    golden: Option<PathBuf>,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Check fonts against their golden data
    Check {
        /// Enable checking (also enabled by FONT_REGRESS_PROPRIETARY=1)
        #[arg(long)]
        proprietary: bool,
        /// Directory containing the Adobe fonts
        #[arg(long)]
        adobe_dir: Option<PathBuf>,
        /// Directory containing the Microsoft fonts
        #[arg(long)]
        microsoft_dir: Option<PathBuf>,
        /// Check fonts concurrently
        #[arg(long)]
        parallel: bool,
        /// Also print fonts that passed or were skipped
        #[arg(short, long)]
        verbose: bool,
        #[command(flatten)]
        golden: GoldenArgs,
        /// Fonts to check, as provider/filename (defaults to every font with golden data)
        fonts: Vec<QualifiedFontId>,
    },
    /// List the fonts that have golden data
    List {
        #[command(flatten)]
        golden: GoldenArgs,
    },
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::Check {
            proprietary,
            adobe_dir,
            microsoft_dir,
            parallel,
            verbose,
            golden,
            fonts,
        } => {
            let mut config = match HarnessConfig::from_env() {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("{e}");
                    std::process::exit(1);
                }
            };
            config.enabled |= proprietary;
            config.parallel |= parallel;
            let dirs = [(Provider::Adobe, adobe_dir), (Provider::Microsoft, microsoft_dir)];
            for (provider, dir) in dirs {
                if let Some(dir) = dir {
                    config.set_dir(provider, dir);
                }
            }
            let registry = load_registry(&golden);
            let harness = Harness::new(config, registry, SkrifaEngine);
            let reports = harness.run(&fonts);
            print_reports(&reports, verbose);
            if reports
                .iter()
                .any(|report| report.status() == Status::Failed)
            {
                std::process::exit(1);
            }
        }
        Command::List { golden } => {
            let registry = load_registry(&golden);
            for (id, entry) in registry.iter() {
                println!(
                    "{id}\t{}\t{} mappings, {} kerning samples",
                    entry.version,
                    entry.glyph_index.len(),
                    entry.kern.len()
                );
            }
        }
    }
}

fn load_registry(args: &GoldenArgs) -> DatasetRegistry {
    let registry = match &args.golden {
        Some(path) => DatasetRegistry::load(path),
        None => DatasetRegistry::builtin(),
    };
    match registry {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

fn print_reports(reports: &[FontReport], verbose: bool) {
    let (mut passed, mut failed, mut skipped) = (0, 0, 0);
    for report in reports {
        let status = report.status();
        match status {
            Status::Passed => passed += 1,
            Status::Failed => failed += 1,
            Status::Skipped => skipped += 1,
        }
        if verbose || status == Status::Failed {
            print!("{report}");
        }
    }
    // everything skipped means checking is disabled, so say why once
    if skipped == reports.len() {
        if let Some(reason) = reports.first().and_then(|report| report.skipped.as_deref()) {
            println!("{reason}");
        }
    }
    println!("{passed} passed, {failed} failed, {skipped} skipped");
}
