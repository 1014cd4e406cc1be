//! Build script for safelock-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates game.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Sections the firmware understands and the keys allowed in each
const SCHEMA: &[(&str, &[&str])] = &[
    ("sweep", &["min", "max", "delay_ms"]),
    ("target", &["min", "max"]),
    ("lid", &["locked", "unlocked", "open", "tease"]),
    ("timing", &["status_interval_ms", "retry_pause_ms"]),
    ("game", &["attempts", "difficulty"]),
];

/// Defaults used by the firmware for keys left out
const DEFAULT_SWEEP: (i64, i64) = (0, 90);
const DEFAULT_TARGET: (i64, i64) = (20, 89);
const DEFAULT_LID: (i64, i64, i64) = (0, 120, 180);

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate game.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=game.toml");

    let config_path = Path::new("game.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: game.toml not found!                                     ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds game.toml from the safelock-firmware        ║\n\
            ║  directory. Restore it or create a new one.                      ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read game.toml                                 ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in game.toml                         ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_schema(&config, &mut errors);
    report_errors("Unsupported entries in game.toml", &errors);

    validate_ranges(&config, &mut errors);
    report_errors("Invalid game configuration", &errors);

    println!("cargo:warning=game.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn report_errors(title: &str, errors: &[String]) {
    if errors.is_empty() {
        return;
    }
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Only known sections and keys, integer values only
///
/// Matches what the on-device reader accepts at boot.
fn validate_schema(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        errors.push("top level must be a table".to_string());
        return;
    };

    for (section, body) in root {
        let Some((_, keys)) = SCHEMA.iter().find(|(name, _)| name == section) else {
            errors.push(format!("unknown section [{}]", section));
            continue;
        };
        let Some(table) = body.as_table() else {
            errors.push(format!("'{}' must be a [section]", section));
            continue;
        };
        for (key, value) in table {
            if !keys.contains(&key.as_str()) {
                errors.push(format!("[{}] unknown key '{}'", section, key));
            } else if !value.is_integer() {
                errors.push(format!("[{}] {} must be an integer", section, key));
            }
        }
    }
}

fn get(config: &toml::Value, section: &str, key: &str) -> Option<i64> {
    config.get(section)?.get(key)?.as_integer()
}

fn validate_ranges(config: &toml::Value, errors: &mut Vec<String>) {
    let sweep_min = get(config, "sweep", "min").unwrap_or(DEFAULT_SWEEP.0);
    let sweep_max = get(config, "sweep", "max").unwrap_or(DEFAULT_SWEEP.1);
    let target_min = get(config, "target", "min").unwrap_or(DEFAULT_TARGET.0);
    let target_max = get(config, "target", "max").unwrap_or(DEFAULT_TARGET.1);

    for (name, angle) in [
        ("sweep.min", sweep_min),
        ("sweep.max", sweep_max),
        ("target.min", target_min),
        ("target.max", target_max),
    ] {
        if !(0..=180).contains(&angle) {
            errors.push(format!("{} must be 0-180", name));
        }
    }
    if sweep_min >= sweep_max {
        errors.push("sweep.min must be below sweep.max".to_string());
    }
    if target_min > target_max {
        errors.push("target.min must not exceed target.max".to_string());
    }
    if target_min < sweep_min || target_max > sweep_max {
        errors.push("target range must sit inside the sweep range".to_string());
    }

    if config.get("lid").is_some() {
        let locked = get(config, "lid", "locked").unwrap_or(DEFAULT_LID.0);
        let unlocked = get(config, "lid", "unlocked").unwrap_or(DEFAULT_LID.1);
        let open = get(config, "lid", "open").unwrap_or(DEFAULT_LID.2);

        let tease = get(config, "lid", "tease");
        for (name, angle) in [
            ("lid.locked", Some(locked)),
            ("lid.unlocked", Some(unlocked)),
            ("lid.open", Some(open)),
            ("lid.tease", tease),
        ] {
            if angle.is_some_and(|a| !(0..=180).contains(&a)) {
                errors.push(format!("{} must be 0-180", name));
            }
        }
        if locked >= unlocked || unlocked > open {
            errors.push("lid needs locked < unlocked <= open".to_string());
        }
        if sweep_max >= unlocked - 10 {
            errors.push("sweep.max must stay 10 degrees below lid.unlocked".to_string());
        }
    }

    let max_ms = u32::MAX as i64;
    for (section, key) in [("sweep", "delay_ms"), ("timing", "status_interval_ms")] {
        if get(config, section, key).is_some_and(|v| !(1..=max_ms).contains(&v)) {
            errors.push(format!("{}.{} must be 1-{}", section, key, max_ms));
        }
    }
    if get(config, "timing", "retry_pause_ms").is_some_and(|v| !(0..=max_ms).contains(&v)) {
        errors.push(format!("timing.retry_pause_ms must be 0-{}", max_ms));
    }
    if get(config, "game", "attempts").is_some_and(|v| !(1..=255).contains(&v)) {
        errors.push("game.attempts must be 1-255".to_string());
    }
    if get(config, "game", "difficulty").is_some_and(|v| !(0..=2).contains(&v)) {
        errors.push("game.difficulty must be 0, 1 or 2".to_string());
    }
}
