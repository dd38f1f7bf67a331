// SPDX-License-Identifier: Apache-2.0

//! Command-line front end: reads a tree configuration from flags and an
//! optional TOML file, and prints or writes the generated module.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::debug;

use adder_tree::{Dialect, Error, TreeBuilder, TreeConfig, Usage};

/// Generate a binary adder tree in Verilog or SystemVerilog.
#[derive(Parser, Debug)]
#[command(name = "adder-tree", version, about)]
struct Cli {
    /// TOML file with tree parameters. Flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Width in bits of each signed input word.
    #[arg(short, long)]
    width: Option<usize>,

    /// Number of input words; must be a power of two.
    #[arg(short, long)]
    rows: Option<usize>,

    /// Name of the leaf adder module to instantiate.
    #[arg(long)]
    adder_name: Option<String>,

    /// Name of the input port.
    #[arg(long)]
    input_name: Option<String>,

    /// Name of the output port.
    #[arg(long)]
    output_name: Option<String>,

    /// Name of the generated module.
    #[arg(long)]
    module_name: Option<String>,

    /// HDL dialect to emit.
    #[arg(long, value_enum)]
    dialect: Option<Dialect>,

    /// Also emit an interface-only stub of the leaf adder.
    #[arg(long)]
    emit_adder_stub: bool,

    /// Write the module to this file instead of standard output.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable debug-level logging.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn tree_config(&self) -> Result<TreeConfig, Error> {
        let mut config = match &self.config {
            Some(path) => TreeConfig::from_file(path)?,
            None => TreeConfig::default(),
        };
        if let Some(width) = self.width {
            config.word_width = width;
        }
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(name) = &self.adder_name {
            config.adder_name = name.clone();
        }
        if let Some(name) = &self.input_name {
            config.input_name = name.clone();
        }
        if let Some(name) = &self.output_name {
            config.output_name = name.clone();
        }
        if let Some(name) = &self.module_name {
            config.module_name = name.clone();
        }
        if let Some(dialect) = self.dialect {
            config.dialect = dialect;
        }
        if self.emit_adder_stub {
            config.adder_usage = Usage::EmitStub;
        }
        Ok(config)
    }
}

fn run(cli: &Cli) -> Result<(), Error> {
    let config = cli.tree_config()?;
    debug!("Configuration: {:?}", config);
    let text = TreeBuilder::new(config).generate()?;
    match &cli.output {
        Some(path) => {
            std::fs::write(path, text)?;
            debug!("Wrote {}", path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
