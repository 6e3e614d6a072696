use std::str::FromStr;

use fern::colors::{Color, ColoredLevelConfig};

use crate::env::get_env;

/// Workspace crates whose records pass at `CARGO_LOG_LEVEL`.
const WORKSPACE_CRATES: [&str; 4] = ["cryke_rs", "cryke_toolkit", "cryke_utils", "provider_utils"];

pub fn setup_logger(
    levels: Option<Vec<(String, log::LevelFilter)>>,
) -> Result<(), log::SetLoggerError> {
    let colors = ColoredLevelConfig {
        trace: Color::Cyan,
        debug: Color::Magenta,
        info: Color::Green,
        warn: Color::Yellow,
        error: Color::BrightRed,
    };

    let cargo_log_level_str = get_env("CARGO_LOG_LEVEL", Some("INFO".to_string()));
    let cargo_log_level =
        log::LevelFilter::from_str(&cargo_log_level_str).unwrap_or(log::LevelFilter::Info);

    let mut dispatch = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{}[{}] {}",
                chrono::Local::now().format("[%H:%M:%S.%f]"),
                colors.color(record.level()),
                message
            ))
        })
        .chain(std::io::stdout())
        .level(log::LevelFilter::Warn);
    for module in WORKSPACE_CRATES {
        dispatch = dispatch.level_for(module, cargo_log_level);
    }
    if let Some(cargo_bin_name) = current_bin_name() {
        dispatch = dispatch.level_for(cargo_bin_name, cargo_log_level);
    }
    if let Some(levels) = levels {
        for (module, level) in levels {
            dispatch = dispatch.level_for(module, level);
        }
    }

    dispatch.apply()?;
    Ok(())
}

fn current_bin_name() -> Option<String> {
    std::env::current_exe()
        .ok()?
        .file_stem()?
        .to_str()?
        .to_owned()
        .into()
}
