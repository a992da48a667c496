extern crate packscan;

use std::io::{ self, Cursor, Write };
use std::path::PathBuf;
use std::fs::File;
use clap::Parser;
use memmap::MmapOptions;
use tracing_subscriber::EnvFilter;

use packscan::pack::buffer::DEFAULT_BUFFER_SIZE;
use packscan::{ Catalog, Kind };

/// List the records of a packfile: offset, type, size, packed length, crc32
/// and, for deltas, the base.
#[derive(Parser)]
struct Args {
    pack: PathBuf,

    /// Initial read-ahead buffer size in bytes.
    #[clap(long, default_value_t = DEFAULT_BUFFER_SIZE)]
    buffer_size: usize,

    /// Only print the number of records of each type.
    #[clap(long)]
    summary: bool,
}

const KINDS: [Kind; 6] = [
    Kind::Commit,
    Kind::Tree,
    Kind::Blob,
    Kind::Tag,
    Kind::OfsDelta,
    Kind::RefDelta
];

pub fn main() {
    init_logging();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        tracing::error!(error = %e, "failed to list packfile");
        eprintln!("{}: {}", args.pack.display(), e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let f = File::open(&args.pack)?;
    let mmap = unsafe { MmapOptions::new().map(&f)? };

    let catalog = Catalog::build_with_capacity(Cursor::new(&mmap[..]), args.buffer_size)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.summary {
        writeln!(out, "version {}", catalog.version())?;
        for kind in KINDS.iter() {
            writeln!(out, "{:>10} {}", kind.as_str(), catalog.count_by_kind(*kind))?;
        }
        writeln!(out, "{:>10} {}", "total", catalog.len())?;
        return Ok(())
    }

    for object in catalog.objects() {
        write!(
            out,
            "{} {} {} {} {:08x}",
            object.offset(),
            object.kind(),
            object.size(),
            object.packed_len(),
            object.crc32()
        )?;
        match object.base() {
            Some(base) => writeln!(out, " {}", base)?,
            None => writeln!(out)?
        }
    }

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("packscan=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}
