//! simplegui-check - builds a layout document headlessly and reports on it
//!
//! Usage: simplegui-check <layout-file> [--config <path>]

use std::path::PathBuf;
use std::process::ExitCode;

use tracing::{error, info};

use simplegui::{logging, App, AppConfig, CommandTable, LayoutDocument};

struct Args {
    layout: PathBuf,
    config: Option<PathBuf>,
}

fn usage() -> String {
    "usage: simplegui-check <layout-file> [--config <path>]".to_string()
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut layout = None;
    let mut config = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => config = Some(PathBuf::from(args.next().ok_or_else(usage)?)),
            "-h" | "--help" => return Err(usage()),
            _ if layout.is_none() => layout = Some(PathBuf::from(arg)),
            _ => return Err(format!("unexpected argument '{}'\n{}", arg, usage())),
        }
    }
    Ok(Args {
        layout: layout.ok_or_else(usage)?,
        config,
    })
}

fn main() -> ExitCode {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::FAILURE;
        }
    };

    let loaded = match &args.config {
        Some(path) => AppConfig::load_from_path(path),
        None => AppConfig::load(),
    };
    let (config, config_error) = match loaded {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    logging::init(&config.logging);
    if let Some(e) = config_error {
        error!(error = %e, "Failed to load configuration, using defaults");
        eprintln!("warning: configuration ignored: {}", e);
    }

    let document = match LayoutDocument::load(&args.layout) {
        Ok(document) => document,
        Err(e) => {
            error!(path = %args.layout.display(), error = %e, "Cannot read layout");
            eprintln!("error: {}: {}", args.layout.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let mut app = App::from_config(&config, CommandTable::new(), ());
    let report = app.setup_layout(&document);
    info!(path = %args.layout.display(), widgets = app.tree().len(), "Checked layout");

    print!("{}", app.dump_tree());
    if let Some(menu) = app.menu() {
        for m in &menu.menus {
            println!("menu {} ({} entries)", m.label, m.entries.len());
        }
    }
    if report.is_clean() {
        println!("ok: no problems found");
    } else {
        print!("{}", report);
        println!(
            "{} warning(s), {} error(s)",
            report.warnings().count(),
            report.errors().count()
        );
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args, String> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_args() {
        let parsed = args(&["layout.yaml", "--config", "my.toml"]).unwrap();
        assert_eq!(parsed.layout, PathBuf::from("layout.yaml"));
        assert_eq!(parsed.config, Some(PathBuf::from("my.toml")));

        assert!(args(&[]).is_err());
        assert!(args(&["a.json", "b.json"]).is_err());
        assert!(args(&["a.json", "--config"]).is_err());
    }
}
