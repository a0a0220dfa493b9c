// src/main.rs
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{anyhow, bail, Context, Result};
use log::info;
use scopetrace::drivers::{decode_with_preamble, write_trace_csv, ByteOrder, Preamble};
use scopetrace::{gui, load_batch, AppConfig, BatchOutcome};
const USAGE: &str = "usage:
  scopetrace [<file.csv>...]
  scopetrace convert <block-file> <preamble-file> <out.csv> [--unsigned] [--lsb-first]";
#[derive(Debug, PartialEq)]
enum Command {
    Help,
    /// Plot the given files; an empty list opens the file picker.
    Plot(Vec<PathBuf>),
    Convert {
        block: PathBuf,
        preamble: PathBuf,
        output: PathBuf,
        signed: bool,
        byte_order: ByteOrder,
    },
}
impl Command {
    fn parse(args: &[String]) -> Result<Self> {
        match args.first().map(String::as_str) {
            Some("-h" | "--help") => Ok(Command::Help),
            Some("convert") => {
                let mut positional = Vec::new();
                let mut signed = true;
                let mut byte_order = ByteOrder::MsbFirst;
                for arg in &args[1..] {
                    match arg.as_str() {
                        "--unsigned" => signed = false,
                        "--lsb-first" => byte_order = ByteOrder::LsbFirst,
                        flag if flag.starts_with("--") => bail!("unknown option {flag}\n{USAGE}"),
                        path => positional.push(PathBuf::from(path)),
                    }
                }
                let [block, preamble, output]: [PathBuf; 3] = positional
                    .try_into()
                    .map_err(|_| anyhow!("convert takes three paths\n{USAGE}"))?;
                Ok(Command::Convert {
                    block,
                    preamble,
                    output,
                    signed,
                    byte_order,
                })
            }
            _ => Ok(Command::Plot(args.iter().map(PathBuf::from).collect())),
        }
    }
}
fn pick_files(start_dir: Option<&Path>) -> Vec<PathBuf> {
    let mut dialog = rfd::FileDialog::new()
        .set_title("Select scope traces")
        .add_filter("CSV", &["csv"]);
    if let Some(dir) = start_dir {
        dialog = dialog.set_directory(dir);
    }
    dialog.pick_files().unwrap_or_default()
}
fn plot(paths: Vec<PathBuf>, config: &AppConfig) -> Result<()> {
    let paths = if paths.is_empty() {
        pick_files(config.data_dir.as_deref())
    } else {
        paths
    };
    let batch = match load_batch(&paths)? {
        BatchOutcome::Cancelled => return Ok(()),
        BatchOutcome::Loaded(batch) => batch,
    };
    gui::run(batch, &config.figure).map_err(|e| anyhow!("figure window failed: {e}"))
}
fn convert(
    block: &Path,
    preamble: &Path,
    output: &Path,
    signed: bool,
    byte_order: ByteOrder,
) -> Result<()> {
    let raw = fs::read(block).with_context(|| format!("cannot read {}", block.display()))?;
    let preamble: Preamble = fs::read_to_string(preamble)
        .with_context(|| format!("cannot read {}", preamble.display()))?
        .parse()?;
    let trace = decode_with_preamble(&raw, &preamble, signed, byte_order)
        .with_context(|| format!("cannot decode {}", block.display()))?;
    info!("decoded {} points from {}", trace.len(), block.display());
    write_trace_csv(output, &trace)?;
    Ok(())
}
fn main() -> Result<()> {
    env_logger::init();
    let args: Vec<String> = env::args().skip(1).collect();
    match Command::parse(&args)? {
        Command::Help => {
            println!("{USAGE}");
            Ok(())
        }
        Command::Plot(paths) => plot(paths, &AppConfig::load()?),
        Command::Convert {
            block,
            preamble,
            output,
            signed,
            byte_order,
        } => convert(&block, &preamble, &output, signed, byte_order),
    }
}
