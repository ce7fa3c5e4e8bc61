use clap::Parser;
use listnav::core::config::{self, CliOverrides};
use listnav::tui;
use listnav::tui::components::Entry;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::io::{self, BufRead, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "listnav", about = "Pick one line from a list with the keyboard")]
struct Args {
    /// Items to choose from (read from stdin when empty and no --file)
    items: Vec<String>,

    /// Read items from a file, one per line
    #[arg(short, long, conflicts_with = "items")]
    file: Option<PathBuf>,

    /// Only rows with this role count as items
    #[arg(long)]
    role: Option<String>,

    /// Move the focus marker along with the highlight
    #[arg(long)]
    focus: bool,

    /// Do not scroll the highlighted row into view
    #[arg(long)]
    no_scroll: bool,

    /// Dropdown title
    #[arg(short, long)]
    title: Option<String>,

    /// Config file (defaults to ~/.listnav/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            item_role: self.role.clone(),
            scroll_on_highlight: self.no_scroll.then_some(false),
            focus_on_navigation: self.focus.then_some(true),
            title: self.title.clone(),
        }
    }
}

fn read_entries(args: &Args) -> io::Result<Vec<Entry>> {
    if let Some(path) = &args.file {
        let contents = std::fs::read_to_string(path)?;
        return Ok(Entry::from_lines(contents.lines()));
    }
    if !args.items.is_empty() {
        return Ok(Entry::from_lines(&args.items));
    }
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(Vec::new());
    }
    let lines = stdin.lock().lines().collect::<io::Result<Vec<_>>>()?;
    Ok(Entry::from_lines(lines))
}

fn main() -> io::Result<ExitCode> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - the terminal belongs to the UI
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create("listnav.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match &args.config {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    }
    .map_err(io::Error::other)?;
    let resolved = config::resolve(&file_config, &args.overrides());
    log::info!("listnav starting with {:?}", resolved.navigator);

    let entries = read_entries(&args)?;
    if entries.is_empty() {
        eprintln!("listnav: nothing to choose from");
        return Ok(ExitCode::from(2));
    }
    log::debug!("Loaded {} entries", entries.len());

    match tui::run(&resolved, entries)? {
        Some(entry) => {
            println!("{}", entry.label);
            Ok(ExitCode::SUCCESS)
        }
        None => Ok(ExitCode::from(1)),
    }
}
