use std::{
    collections::HashSet,
    error::Error,
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{ArgAction, Parser, ValueEnum};
use mtl::{
    compile_with,
    config::EngineConfig,
    interpreter::{lexer::tokenize, parser::parse_with_limit},
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

/// mtl compiles Mahjong hand templates into every concrete tile combination
/// they describe.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Template files, or directories searched for `.mtl` templates.
    #[arg(required_unless_present = "eval")]
    paths: Vec<PathBuf>,

    /// Compiles the given template source instead of reading files.
    #[arg(short, long, conflicts_with = "paths")]
    eval: Option<String>,

    /// What to produce for each template.
    #[arg(long, value_enum, default_value_t = Emit::Json)]
    emit: Emit,

    /// Pretty-prints the output.
    #[arg(short, long)]
    pretty: bool,

    /// Emits only the tile lists, one JSON array per template.
    #[arg(short, long)]
    tiles_only: bool,

    /// Writes one file per template into this directory instead of printing.
    /// Templates found in a directory keep their path relative to it.
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Engine configuration file (JSON).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides the maximum nesting depth.
    #[arg(long)]
    max_depth: Option<usize>,

    /// Overrides the maximum length of ranges, sequences and lists, and the
    /// maximum number of variations per template.
    #[arg(long)]
    max_items: Option<usize>,

    /// Rejects unbound identifiers everywhere, including tuples and tile
    /// groups.
    #[arg(long)]
    strict: bool,

    /// Logs more detail to stderr (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Emit {
    /// The compiled template as JSON.
    Json,
    /// The token stream with positions.
    Tokens,
    /// The parsed syntax tree.
    Ast,
}

impl Emit {
    const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Tokens => "tokens",
            Self::Ast => "ast",
        }
    }
}

/// Template text with the names used to report on it.
struct Source {
    label:  String,
    /// Output path below `--out-dir`, without extension.
    output: PathBuf,
    text:   String,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };
    debug!(?config, "engine configuration");

    let sources = match &args.eval {
        Some(text) => vec![Source { label:  "<eval>".to_string(),
                                    output: PathBuf::from("eval"),
                                    text:   text.clone(), }],
        None => match read_sources(&args.paths) {
            Ok(sources) => sources,
            Err(e) => {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            },
        },
    };

    let mut failed = 0;
    let mut written = HashSet::new();
    for source in &sources {
        let target = args.out_dir
                         .as_ref()
                         .map(|dir| dir.join(with_suffix(&source.output, args.emit.extension())));
        if let Some(target) = &target
           && !written.insert(target.clone())
        {
            eprintln!("{}: another template already writes '{}'",
                      source.label,
                      target.display());
            failed += 1;
            continue;
        }
        if let Err(e) = run(&args, &config, source, target.as_deref()) {
            eprintln!("{}: {e}", source.label);
            failed += 1;
        }
    }
    info!(templates = sources.len(), failed, "done");

    if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
                             .with_writer(std::io::stderr)
                             .init();
}

fn load_config(args: &Args) -> Result<EngineConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::from_json(&fs::read_to_string(path)?)?,
        None => EngineConfig::default(),
    };
    if let Some(max_depth) = args.max_depth {
        config = config.with_max_depth(max_depth);
    }
    if let Some(max_items) = args.max_items {
        config = config.with_max_items(max_items);
    }
    if args.strict {
        config = config.with_symbol_atoms(false);
    }
    Ok(config)
}

/// Expands the given paths into template files and reads them.
///
/// Directories are walked recursively in file-name order; only `.mtl` files
/// whose names do not start with `_` are taken from them, and their output
/// path mirrors their place below the directory. Files named explicitly are
/// always read and are written under their file stem.
fn read_sources(paths: &[PathBuf]) -> Result<Vec<Source>, Box<dyn Error>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path).sort_by_file_name() {
                let entry = entry?;
                if is_template(entry.path()) {
                    let output = entry.path()
                                      .strip_prefix(path)
                                      .map_or_else(|_| stem_of(entry.path()), |p| p.with_extension(""));
                    files.push((entry.into_path(), output));
                }
            }
        } else {
            files.push((path.clone(), stem_of(path)));
        }
    }

    files.into_iter()
         .map(|(path, output)| {
             let text = fs::read_to_string(&path).map_err(|e| {
                            format!("Failed to read the input file '{}'. Perhaps this file does \
                                     not exist? ({e})",
                                    path.display())
                        })?;
             Ok(Source { label: path.display().to_string(),
                         output,
                         text })
         })
         .collect()
}

/// Appends `.ext` without touching dots already in the name.
fn with_suffix(path: &Path, ext: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

fn stem_of(path: &Path) -> PathBuf {
    path.file_stem()
        .map_or_else(|| PathBuf::from("template"), PathBuf::from)
}

fn is_template(path: &Path) -> bool {
    path.is_file()
    && path.extension().is_some_and(|ext| ext == "mtl")
    && !path.file_name()
            .is_some_and(|name| name.to_string_lossy().starts_with('_'))
}

fn run(args: &Args,
       config: &EngineConfig,
       source: &Source,
       target: Option<&Path>)
       -> Result<(), Box<dyn Error>> {
    let output = match args.emit {
        Emit::Tokens => tokenize(&source.text)?.iter()
                                               .map(|(token, position)| {
                                                   format!("{}:{}\t{token:?}",
                                                           position.line, position.column)
                                               })
                                               .collect::<Vec<_>>()
                                               .join("\n"),
        Emit::Ast => {
            let program = parse_with_limit(&tokenize(&source.text)?, config.max_depth)?;
            if args.pretty {
                format!("{program:#?}")
            } else {
                format!("{program:?}")
            }
        },
        Emit::Json => {
            let template = compile_with(&source.text, config)?;
            info!(template = %source.label,
                  variations = template.variations.len(),
                  "compiled");
            match (args.tiles_only, args.pretty) {
                (true, true) => serde_json::to_string_pretty(&template.tile_lists())?,
                (true, false) => serde_json::to_string(&template.tile_lists())?,
                (false, pretty) => template.to_json(pretty)?,
            }
        },
    };

    match target {
        Some(target) => {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(target, output)?;
            info!(output = %target.display(), "wrote");
        },
        None => println!("{output}"),
    }

    Ok(())
}
