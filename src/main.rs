use duel_engine::{run, CliOptions};
use std::env;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn usage() -> ! {
    eprintln!(
        "Usage: duel [--encounter encounter.json] [--moves 0,1,0] [--seed SEED] \
[--resume snapshot.json] [--snapshot out.json] [--batch RUNS] [--max-turns N]"
    );
    std::process::exit(1);
}

fn parse_moves(raw: &str) -> anyhow::Result<Vec<usize>> {
    raw.split(',')
        .map(|part| {
            part.trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid move index '{part}': {e}"))
        })
        .collect()
}

fn parse_args() -> anyhow::Result<CliOptions> {
    let mut opts = CliOptions::default();

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--encounter" => {
                opts.encounter_path = args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--encounter requires a path (e.g. --encounter encounter.json)")
                })?;
            }
            "--moves" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--moves requires a list like 0,1,0"))?;
                opts.moves = parse_moves(&val)?;
            }
            "--seed" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--seed requires a number"))?;
                opts.seed = val.parse()?;
            }
            "--resume" => {
                opts.resume_path = Some(args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--resume requires a path (e.g. --resume snapshot.json)")
                })?);
            }
            "--snapshot" => {
                opts.snapshot_path = Some(args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--snapshot requires a path (e.g. --snapshot snapshot.json)")
                })?);
            }
            "--batch" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--batch requires a number of runs"))?;
                opts.batch_runs = Some(val.parse()?);
            }
            "--max-turns" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--max-turns requires a number"))?;
                opts.max_turns = val.parse()?;
            }
            "--help" | "-h" => usage(),
            other => return Err(anyhow::anyhow!("Unknown argument {other}")),
        }
    }

    Ok(opts)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("duel_engine=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let opts = parse_args()?;
    run(opts)
}
