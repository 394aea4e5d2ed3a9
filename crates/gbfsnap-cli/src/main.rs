mod clipboard;
mod logger;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use gbfsnap_core::store::{self, ExportKind};
use gbfsnap_core::{
    CaptureOptions, GameState, HtmlPage, Notifier, Outcome, SchemaVersion,
    UNRECOGNIZED_SCREEN_MESSAGE, classify,
};
use tracing::info;

use crate::clipboard::SystemClipboard;

#[derive(Parser, Debug)]
#[command(
    name = "gbfsnap",
    about = "Capture Granblue Fantasy party, EMP and artifact screens as JSON",
    version
)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Print which screen a location hash points at
    Classify(ClassifyArgs),
    /// Build the snapshot for a saved page
    Capture(CaptureArgs),
    /// Store a pasted EMP or artifact export
    Ingest(IngestArgs),
    /// List stored snapshots
    List(StoreArgs),
    /// Print a stored snapshot
    Show(ShowArgs),
    /// Zip the store next to itself
    Backup(StoreArgs),
}

#[derive(Args, Debug)]
struct ClassifyArgs {
    /// Location hash, e.g. "#party/index/0/npc/0"
    hash: String,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Schema {
    #[value(name = "1")]
    V1,
    #[value(name = "2")]
    V2,
}

impl From<Schema> for SchemaVersion {
    fn from(s: Schema) -> Self {
        match s {
            Schema::V1 => SchemaVersion::V1,
            Schema::V2 => SchemaVersion::V2,
        }
    }
}

#[derive(Args, Debug)]
struct CaptureArgs {
    /// Location hash of the page
    #[arg(long)]
    hash: String,
    /// JSON dump of the page's `Game` object
    #[arg(long, value_name = "JSON")]
    state: PathBuf,
    /// Saved HTML of the page
    #[arg(long, value_name = "HTML")]
    page: Option<PathBuf>,
    /// Export schema version
    #[arg(long, value_enum, default_value = "2", env = "GBFSNAP_SCHEMA")]
    schema: Schema,
    /// Copy to the system clipboard instead of printing
    #[arg(long, default_value_t = false)]
    copy: bool,
    /// Write the JSON to a file instead of printing
    #[arg(long, conflicts_with = "copy")]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct StoreArgs {
    /// Snapshot store directory
    #[arg(long, default_value = "snapshots", env = "GBFSNAP_STORE")]
    store: PathBuf,
}

#[derive(Args, Debug)]
struct IngestArgs {
    /// Export file; reads the clipboard with --paste
    #[arg(long, value_name = "JSON", required_unless_present = "paste")]
    input: Option<PathBuf>,
    #[arg(long, default_value_t = false, conflicts_with = "input")]
    paste: bool,
    #[command(flatten)]
    store: StoreArgs,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ShowKind {
    Emp,
    Artifact,
}

#[derive(Args, Debug)]
struct ShowArgs {
    #[arg(value_enum)]
    kind: ShowKind,
    /// Character id
    id: String,
    #[command(flatten)]
    store: StoreArgs,
}

struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn alert(&mut self, message: &str) {
        eprintln!("{}", message);
    }
}

fn main() {
    logger::init();
    let cli = Cli::parse();
    let res = match cli.cmd {
        Cmd::Classify(a) => {
            println!("{}", classify(&a.hash));
            Ok(())
        }
        Cmd::Capture(a) => cmd_capture(a),
        Cmd::Ingest(a) => cmd_ingest(a),
        Cmd::List(a) => cmd_list(a),
        Cmd::Show(a) => cmd_show(a),
        Cmd::Backup(a) => cmd_backup(a),
    };
    if let Err(e) = res {
        eprintln!("error: {:#}", e);
        std::process::exit(2);
    }
}

fn cmd_capture(args: CaptureArgs) -> Result<()> {
    let state = GameState::from_file(&args.state)
        .with_context(|| format!("loading state {}", args.state.display()))?;
    let page = match &args.page {
        Some(p) => HtmlPage::from_file(p).with_context(|| format!("loading page {}", p.display()))?,
        None => HtmlPage::empty(),
    };
    let opts = CaptureOptions {
        schema: args.schema.into(),
    };

    if args.copy {
        let mut clip = SystemClipboard::open()?;
        let mut notifier = StderrNotifier;
        match gbfsnap_core::run(&args.hash, &state, &page, &mut clip, &mut notifier, opts)? {
            Outcome::Copied(_) => Ok(()),
            Outcome::NotCopied(_) => bail!("the clipboard refused the copy"),
            Outcome::Unrecognized => std::process::exit(3),
        }
    } else {
        let Some(snapshot) = gbfsnap_core::capture(&args.hash, &state, &page, opts)? else {
            StderrNotifier.alert(UNRECOGNIZED_SCREEN_MESSAGE);
            std::process::exit(3);
        };
        match args.out {
            Some(out) => {
                std::fs::write(&out, snapshot.to_json()?)
                    .with_context(|| format!("writing {}", out.display()))?;
                info!(path = %out.display(), "snapshot written");
            }
            None => println!("{}", serde_json::to_string_pretty(&snapshot)?),
        }
        Ok(())
    }
}

fn read_export(args: &IngestArgs) -> Result<serde_json::Value> {
    let text = match &args.input {
        Some(p) => std::fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))?,
        None => SystemClipboard::open()?.paste()?,
    };
    serde_json::from_str(&text).context("export is not JSON, did you click the bookmarklet?")
}

fn cmd_ingest(args: IngestArgs) -> Result<()> {
    let export = read_export(&args)?;
    store::check_version(&export)?;
    let dir = args.store.store.as_path();
    match store::classify_export(&export) {
        ExportKind::Emp => {
            let s = store::save_emp(dir, &export)?;
            println!("EMP for {}: {} extended, {} over masteries", s.id, s.emp, s.rings);
            for (name, n) in [("domain", s.domain), ("saint", s.saint), ("extra", s.extra)] {
                match n {
                    Some(n) => println!("  {}: {}", name, n),
                    None => println!("  no {} data, update the bookmarklet", name),
                }
            }
        }
        ExportKind::Artifact => {
            if !store::save_artifact(dir, &export)? {
                println!("no artifact equipped");
            }
        }
        ExportKind::Party => {
            // parties are rendered by the image builder, nothing to keep here
            let p = store::summarize_party(&export);
            let class = p.class_id.map_or_else(|| "unknown".to_string(), |id| id.to_string());
            println!(
                "party: class {}, {} allies, {} summons, {} weapons",
                class, p.allies, p.summons, p.weapons
            );
        }
    }
    Ok(())
}

fn cmd_list(args: StoreArgs) -> Result<()> {
    for p in store::list_saved(&args.store) {
        println!("{}", p.strip_prefix(&args.store).unwrap_or(&p).display());
    }
    Ok(())
}

fn cmd_show(args: ShowArgs) -> Result<()> {
    let dir: &Path = &args.store.store;
    let found = match args.kind {
        ShowKind::Emp => store::load_emp(dir, &args.id)?,
        ShowKind::Artifact => store::load_artifact(dir, &args.id)?,
    };
    match found {
        Some(v) => println!("{}", serde_json::to_string_pretty(&v)?),
        None => bail!("no {:?} snapshot for {}", args.kind, args.id),
    }
    Ok(())
}

fn cmd_backup(args: StoreArgs) -> Result<()> {
    let backup = store::backup_store(&args.store)?;
    println!("{} ({} snapshots)", backup.path.display(), backup.files.len());
    Ok(())
}
