use clap::Parser;
use log::{debug, error};
use thiserror::Error;

use riffwalk::riff::config::ConfigError;
use riffwalk::{Event, Events, Region, RiffError};

mod cli;
use crate::cli::Cli;

mod dump;

const RULE: &str = "---------------------------------------";

#[derive(Error, Debug)]
enum DriverError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Riff(#[from] RiffError),
}

fn run(cli: &Cli) -> Result<(), DriverError> {
    let config = cli.reader_config()?;
    debug!("CONFIG: {:?}", config);

    let region = Region::open(&cli.file, cli.format)?;
    println!(
        "RIFF <{}> declared size {} actual size {}",
        region.header().format,
        region.header().size,
        region.len()
    );

    println!("{}", RULE);
    for event in Events::new(&region, config) {
        match event? {
            Event::GroupStart { depth, group } => println!("{}", dump::group_start(depth, &group)),
            Event::GroupEnd { depth, id } => println!("{}", dump::group_end(depth, &id)),
            Event::Chunk { depth, chunk } => println!("{}", dump::chunk(depth, &chunk, cli.preview)),
            Event::Underflow(underflow) => println!("{}", dump::underflow(&underflow)),
        }
    }
    println!("EOF.");
    println!("{}", RULE);

    Ok(())
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    println!("RIFF file reader");
    println!("Filename {} type {}", cli.file.display(), cli.format);

    if let Err(e) = run(&cli) {
        error!("{}", e);
        eprintln!("ERROR: {}", e);
        std::process::exit(1);
    }
}
