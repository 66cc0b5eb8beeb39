//! Recombineer - dsDNA and MASC PCR Primer Design
//!
//! Command-line front end for designing recombineering cassette primers
//! and writing MASC PCR primer tables.

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{error, info};

use recombineer::{
    generate_dsdna_primer_file, read_sequence_file, reverse_complement, write_masc_report, DesignError,
    DsdnaRecord, MascPrimerSets, NearestNeighbor, OverwritePolicy, RunConfig,
};

#[derive(Parser, Debug)]
#[clap(name = "recombineer", version, about = "Recombineering and MASC PCR primer design")]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Design the two dsDNA cassette primers for a genome replacement
    Dsdna {
        /// Genome sequence (FASTA or raw)
        #[clap(long)]
        genome: PathBuf,
        /// Sequence to insert (FASTA or raw)
        #[clap(long)]
        insert: PathBuf,
        /// First replaced base, 1-indexed
        #[clap(long)]
        left: usize,
        /// Last replaced base, 1-indexed
        #[clap(long)]
        right: usize,
        #[clap(long)]
        out: PathBuf,
        /// JSON run configuration
        #[clap(long)]
        config: Option<PathBuf>,
        /// Replace the output file if it already exists
        #[clap(long)]
        overwrite: bool,
    },

    /// Write a MASC PCR primer table from primer sets in JSON
    Masc {
        #[clap(long)]
        primers: PathBuf,
        #[clap(long)]
        out: PathBuf,
        /// JSON run configuration
        #[clap(long)]
        config: Option<PathBuf>,
        /// Leave the output file alone if it already exists
        #[clap(long)]
        skip_existing: bool,
    },

    /// Print the reverse complement of a sequence
    Revcomp { sequence: String },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<ExitCode, DesignError> {
    match command {
        Command::Dsdna {
            genome,
            insert,
            left,
            right,
            out,
            config,
            overwrite,
        } => {
            let config = load_config(config.as_deref())?;
            let genome = read_sequence_file(&genome)?;
            let insert = read_sequence_file(&insert)?;
            let policy = if overwrite {
                OverwritePolicy::Replace
            } else {
                OverwritePolicy::SkipExisting
            };

            let (record, _) = generate_dsdna_primer_file(
                &genome.sequence,
                &insert.sequence,
                left,
                right,
                &config.design,
                &out,
                policy,
            )?;
            match record {
                DsdnaRecord::Primers(pair) => {
                    println!("{}\n{}", pair.forward, pair.reverse);
                    Ok(ExitCode::SUCCESS)
                }
                DsdnaRecord::Rejected(message) => {
                    eprintln!("{}", message);
                    Ok(ExitCode::from(2))
                }
            }
        }
        Command::Masc {
            primers,
            out,
            config,
            skip_existing,
        } => {
            let config = load_config(config.as_deref())?;
            let sets = MascPrimerSets::from_json_file(&primers)?;
            let melt = NearestNeighbor::new(config.melt)?;
            let policy = if skip_existing {
                OverwritePolicy::SkipExisting
            } else {
                OverwritePolicy::Replace
            };
            write_masc_report(&sets, &melt, config.target_temp, &out, policy)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Revcomp { sequence } => {
            println!("{}", reverse_complement(&sequence)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<RunConfig, DesignError> {
    match path {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            RunConfig::from_json_file(path)
        }
        None => Ok(RunConfig::default()),
    }
}
