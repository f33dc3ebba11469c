// SPDX-License-Identifier: MPL-2.0
use image_versioning::config;
use image_versioning::domain::history::{HistoryImageType, ImageHistory};
use image_versioning::domain::versioning::VersionFileInfo;
use image_versioning::error::{Error, Result};
use image_versioning::format::format_from_path;
use image_versioning::paths;
use image_versioning::report::OperationReport;
use image_versioning::version_manager::{FileNameType, VersionManager};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
image-versioning: decide where an edited image is saved

USAGE:
  image-versioning [OPTIONS] <LOADED_FILE>

OPTIONS:
  --new-version             Always create a new version
  --in-format FMT           Create a new version stored as FMT
  --save-as PATH            Create a new version at exactly PATH
  --loaded-format FMT       Format of the loaded file (default: from extension)
  --history FILE            Current edit history (TOML)
  --resolved-history FILE   History resolved from files on disk (TOML)
  --config-dir DIR          Directory holding settings.toml
  -v                        More logging (repeatable)
  -q                        Only log errors
  -h, --help                Print this help
";

const ENV_LOG: &str = "IMAGE_VERSIONING_LOG";

struct Args {
    loaded_file: PathBuf,
    new_version: bool,
    in_format: Option<String>,
    save_as: Option<PathBuf>,
    loaded_format: Option<String>,
    history: Option<PathBuf>,
    resolved_history: Option<PathBuf>,
    config_dir: Option<String>,
    verbosity: u8,
    quiet: bool,
}

fn parse_args() -> std::result::Result<Option<Args>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(None);
    }

    let mut verbosity = 0;
    while args.contains("-v") {
        verbosity += 1;
    }

    Ok(Some(Args {
        new_version: args.contains("--new-version"),
        in_format: args.opt_value_from_str("--in-format")?,
        save_as: args.opt_value_from_str("--save-as")?,
        loaded_format: args.opt_value_from_str("--loaded-format")?,
        history: args.opt_value_from_str("--history")?,
        resolved_history: args.opt_value_from_str("--resolved-history")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
        quiet: args.contains("-q"),
        verbosity,
        loaded_file: args.free_from_str()?,
    }))
}

fn init_tracing(verbosity: u8, quiet: bool) {
    let level = match (quiet, verbosity) {
        (true, _) => Level::ERROR,
        (false, 0) => Level::WARN,
        (false, 1) => Level::INFO,
        (false, 2) => Level::DEBUG,
        _ => Level::TRACE,
    };

    let env_filter = EnvFilter::try_from_env(ENV_LOG)
        .unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn load_history(path: &Path) -> Result<ImageHistory> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|err| Error::History(format!("{}: {err}", path.display())))
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

fn file_info(path: &Path, format: Option<String>) -> Result<VersionFileInfo> {
    let path = absolute(path)?;
    let format = format
        .map(|f| f.to_uppercase())
        .or_else(|| format_from_path(&path))
        .ok_or_else(|| Error::Config(format!("cannot tell the format of {}", path.display())))?;

    VersionFileInfo::from_file_path(&path, format)
        .ok_or_else(|| Error::Config(format!("{} has no usable file name", path.display())))
}

fn run(args: Args) -> Result<String> {
    paths::init_cli_overrides(args.config_dir);

    let (config, warning) = config::load();
    if let Some(warning) = warning {
        tracing::warn!("{warning}, using defaults");
    }
    let manager = VersionManager::with_settings(config.version_settings());

    let loaded = file_info(&args.loaded_file, args.loaded_format)?;

    let resolved = match &args.resolved_history {
        Some(path) => load_history(path)?,
        None => ImageHistory::new().with_referred_image(HistoryImageType::Original),
    };
    let current = match &args.history {
        Some(path) => load_history(path)?,
        None => resolved.clone(),
    };

    let operation = if let Some(save_as) = &args.save_as {
        let target = file_info(save_as, None)?;
        manager.operation_new_version_as(&loaded, &target, &resolved, &current)?
    } else if let Some(format) = &args.in_format {
        manager.operation_new_version_in_format(&loaded, format, &resolved, &current)?
    } else {
        let request = if args.new_version {
            FileNameType::NewVersionName
        } else {
            FileNameType::CurrentVersionName
        };
        manager.operation(request, &loaded, &resolved, &current)?
    };

    OperationReport::from(&operation).to_toml()
}

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => return ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            return ExitCode::from(2);
        }
    };

    init_tracing(args.verbosity, args.quiet);

    match run(args) {
        Ok(report) => {
            print!("{report}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
