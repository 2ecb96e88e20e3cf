use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use topogen_rs::error::TopoError;
use topogen_rs::format::{OutputFormat, write_topology};
use topogen_rs::topo::{FatTreeParams, build_fat_tree, parse_k, verify};
use tracing::{debug, info, warn};

#[derive(Debug, Parser)]
#[command(
    name = "topogen",
    about = "Generate a k-ary fat-tree topology description file"
)]
struct Args {
    /// Fat-tree parameter k (even, >= 4)
    #[arg(allow_negative_numbers = true)]
    k: Option<String>,

    /// Extra positional arguments are ignored
    #[arg(hide = true, allow_negative_numbers = true)]
    extra: Vec<String>,

    /// Output path; `-` writes to stdout
    #[arg(short, long, default_value = "resultat.topo")]
    output: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Topo)]
    format: OutputFormat,

    /// Check port symmetry, degrees and pod connectivity before writing
    #[arg(long)]
    verify: bool,
}

fn run(args: Args) -> Result<(), TopoError> {
    if !args.extra.is_empty() {
        debug!(extra = ?args.extra, "ignoring extra arguments");
    }
    let k = parse_k(args.k.as_deref())?;
    let params = FatTreeParams::new(k)?;
    let topo = build_fat_tree(&params);

    if args.verify {
        let violations = verify(&topo);
        if !violations.is_empty() {
            for v in &violations {
                warn!(k, "{v}");
            }
            return Err(TopoError::Inconsistent {
                count: violations.len(),
            });
        }
        info!(k, "verification passed");
    }

    if args.output.to_str() == Some("-") {
        let stdout = io::stdout();
        let mut w = BufWriter::new(stdout.lock());
        write_topology(&topo, args.format, &mut w)?;
        w.flush()?;
    } else {
        let mut w = BufWriter::new(File::create(&args.output)?);
        write_topology(&topo, args.format, &mut w)?;
        w.flush()?;
        info!(path = %args.output.display(), "wrote topology");
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
