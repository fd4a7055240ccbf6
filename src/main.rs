use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::Parser;
use log::info;

use react_mc::check::check_all;
use react_mc::config::CheckerConfig;
use react_mc::model::SymbolicModel;

#[derive(Debug, Parser)]
#[command(author, version, about = "Check G F f -> G F g properties of SMV models")]
struct Cli {
    /// SMV model with LTLSPEC properties.
    #[arg(value_name = "MODEL")]
    model: PathBuf,

    /// Give up on a property after this many iterations of a single fixpoint.
    #[arg(long, value_name = "INT")]
    max_iterations: Option<usize>,

    /// Give up on a property once the BDD holds more nodes than this.
    #[arg(long, value_name = "INT")]
    max_nodes: Option<usize>,

    /// BDD unique table size (in bits, so the initial size is `2^bits` buckets).
    #[arg(long, value_name = "INT", default_value = "20", value_parser = clap::value_parser!(u8).range(0..=31))]
    storage_bits: u8,

    /// Log level for diagnostics on stderr.
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    log_level: simplelog::LevelFilter,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                let _ = e.print();
                std::process::exit(1);
            }
        },
    };

    simplelog::TermLogger::init(
        args.log_level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;
    info!("args = {:?}", args);

    let config = CheckerConfig {
        max_iterations: args.max_iterations,
        max_nodes: args.max_nodes,
    };

    let time_total = std::time::Instant::now();
    let (system, properties) = SymbolicModel::load(&args.model, usize::from(args.storage_bits))?;
    info!("Loaded {} properties, bdd = {:?}", properties.len(), system.bdd());

    for report in check_all(&system, &properties, &config) {
        print!("{}", report);
    }

    info!("bdd = {:?}", system.bdd());
    info!("All done in {:.3} s", time_total.elapsed().as_secs_f64());

    Ok(())
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_storage_bits_range() {
        let args = Cli::try_parse_from(["react-mc", "model.smv"]).unwrap();
        assert_eq!(args.storage_bits, 20);

        let args = Cli::try_parse_from(["react-mc", "model.smv", "--storage-bits", "31"]).unwrap();
        assert_eq!(args.storage_bits, 31);

        let err = Cli::try_parse_from(["react-mc", "model.smv", "--storage-bits", "32"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_log_level() {
        let args = Cli::try_parse_from(["react-mc", "model.smv", "--log-level", "debug"]).unwrap();
        assert_eq!(args.log_level, simplelog::LevelFilter::Debug);
    }
}
