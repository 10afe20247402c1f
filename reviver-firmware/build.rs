//! Build script for reviver-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates board.toml and generates the pin map

use std::collections::BTreeMap;
use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// GPIOs available on the RP2040
const GPIO_COUNT: u8 = 30;

/// Timeout select strap lines
const STRAP_LINES: usize = 3;

fn main() {
    setup_linker();
    generate_board_pins();
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
    if env::var_os("CARGO_FEATURE_DEFMT").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

#[derive(Debug, Clone, Copy)]
enum Pull {
    Up,
    Down,
    None,
}

impl Pull {
    fn path(self) -> &'static str {
        match self {
            Pull::Up => "embassy_rp::gpio::Pull::Up",
            Pull::Down => "embassy_rp::gpio::Pull::Down",
            Pull::None => "embassy_rp::gpio::Pull::None",
        }
    }
}

/// Validated contents of board.toml
struct Board {
    heartbeat: u8,
    heartbeat_pull: Pull,
    reset: u8,
    power: u8,
    strap: [u8; STRAP_LINES],
    strap_pull: Pull,
}

/// Validate board.toml and write `board_pins.rs` to OUT_DIR
fn generate_board_pins() {
    println!("cargo:rerun-if-changed=board.toml");

    let config_path = Path::new("board.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: board.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a board.toml pin map in the               ║\n\
            ║  reviver-firmware directory.                                     ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read board.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in board.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    let board = match validate_board(&config) {
        Ok(board) => board,
        Err(errors) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid board.toml                                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                errors
                    .iter()
                    .map(|e| format!("║  • {:<62} ║", e))
                    .collect::<Vec<_>>()
                    .join("\n")
            );
        }
    };

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("board_pins.rs"), render_board(&board)).unwrap();

    println!(
        "cargo:warning=board.toml validated: heartbeat=gpio{} reset=gpio{} power=gpio{}",
        board.heartbeat, board.reset, board.power
    );
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

/// Parse a "gpioN" pin string
fn parse_pin(s: &str) -> Result<u8, String> {
    let s = s.trim();

    if s.starts_with('!') {
        return Err(format!("'{}': inverted pins are not supported", s));
    }

    let num = s
        .strip_prefix("gpio")
        .ok_or_else(|| format!("'{}' is not a gpioN pin", s))?;
    let pin: u8 = num
        .parse()
        .map_err(|_| format!("'{}' has no valid pin number", s))?;

    if pin >= GPIO_COUNT {
        return Err(format!("'{}' is out of range (gpio0-gpio29)", s));
    }

    Ok(pin)
}

fn parse_pull(value: Option<&toml::Value>, section: &str) -> Result<Pull, String> {
    match value {
        None => Ok(Pull::Down),
        Some(toml::Value::String(s)) => match s.as_str() {
            "up" => Ok(Pull::Up),
            "down" => Ok(Pull::Down),
            "none" => Ok(Pull::None),
            _ => Err(format!("[{}] pull must be 'up', 'down' or 'none'", section)),
        },
        Some(_) => Err(format!("[{}] pull must be a string", section)),
    }
}

/// Read `[section] pin = "gpioN"`
fn section_pin(config: &toml::Value, section: &str, errors: &mut Vec<String>) -> Option<u8> {
    let Some(table) = config.get(section).and_then(|s| s.as_table()) else {
        errors.push(format!("Missing [{}] section", section));
        return None;
    };

    match table.get("pin") {
        Some(toml::Value::String(s)) => match parse_pin(s) {
            Ok(pin) => Some(pin),
            Err(e) => {
                errors.push(format!("[{}] {}", section, e));
                None
            }
        },
        Some(_) => {
            errors.push(format!("[{}] pin must be a string", section));
            None
        }
        None => {
            errors.push(format!("[{}] missing 'pin'", section));
            None
        }
    }
}

fn section_pull(config: &toml::Value, section: &str, errors: &mut Vec<String>) -> Pull {
    let value = config.get(section).and_then(|s| s.get("pull"));
    parse_pull(value, section).unwrap_or_else(|e| {
        errors.push(e);
        Pull::Down
    })
}

fn strap_pins(config: &toml::Value, errors: &mut Vec<String>) -> Option<[u8; STRAP_LINES]> {
    let Some(table) = config.get("strap").and_then(|s| s.as_table()) else {
        errors.push("Missing [strap] section".to_string());
        return None;
    };

    let Some(toml::Value::Array(entries)) = table.get("pins") else {
        errors.push("[strap] pins must be an array of 3 pin strings".to_string());
        return None;
    };

    if entries.len() != STRAP_LINES {
        errors.push(format!(
            "[strap] pins has {} entries, expected {}",
            entries.len(),
            STRAP_LINES
        ));
        return None;
    }

    let mut pins = [0u8; STRAP_LINES];
    let mut ok = true;
    for (i, entry) in entries.iter().enumerate() {
        match entry.as_str().map(parse_pin) {
            Some(Ok(pin)) => pins[i] = pin,
            Some(Err(e)) => {
                errors.push(format!("[strap] pin {}: {}", i, e));
                ok = false;
            }
            None => {
                errors.push(format!("[strap] pin {} must be a string", i));
                ok = false;
            }
        }
    }

    ok.then_some(pins)
}

/// Validate the whole pin map, collecting every error
fn validate_board(config: &toml::Value) -> Result<Board, Vec<String>> {
    let mut errors = Vec::new();

    let heartbeat = section_pin(config, "heartbeat", &mut errors);
    let reset = section_pin(config, "reset", &mut errors);
    let power = section_pin(config, "power", &mut errors);
    let strap = strap_pins(config, &mut errors);
    let heartbeat_pull = section_pull(config, "heartbeat", &mut errors);
    let strap_pull = section_pull(config, "strap", &mut errors);

    // Each GPIO may only have one role
    let mut roles: BTreeMap<u8, String> = BTreeMap::new();
    let mut assigned: Vec<(u8, String)> = Vec::new();
    if let Some(pin) = heartbeat {
        assigned.push((pin, "heartbeat".to_string()));
    }
    if let Some(pin) = reset {
        assigned.push((pin, "reset".to_string()));
    }
    if let Some(pin) = power {
        assigned.push((pin, "power".to_string()));
    }
    if let Some(pins) = strap {
        for (i, pin) in pins.iter().enumerate() {
            assigned.push((*pin, format!("strap {}", i)));
        }
    }
    for (pin, role) in assigned {
        if let Some(existing) = roles.get(&pin) {
            errors.push(format!("gpio{} used for both {} and {}", pin, existing, role));
        } else {
            roles.insert(pin, role);
        }
    }

    match (heartbeat, reset, power, strap) {
        (Some(heartbeat), Some(reset), Some(power), Some(strap)) if errors.is_empty() => Ok(Board {
            heartbeat,
            heartbeat_pull,
            reset,
            power,
            strap,
            strap_pull,
        }),
        _ => Err(errors),
    }
}

/// Render the generated pin map
fn render_board(board: &Board) -> String {
    let take = |pin: u8| format!("$p.PIN_{}.into::<embassy_rp::gpio::AnyPin>()", pin);

    let mut out = String::new();
    out.push_str("// Generated by build.rs from board.toml. Do not edit.\n\n");
    out.push_str(&format!("pub const HEARTBEAT_GPIO: u8 = {};\n", board.heartbeat));
    out.push_str(&format!("pub const RESET_GPIO: u8 = {};\n", board.reset));
    out.push_str(&format!("pub const POWER_GPIO: u8 = {};\n", board.power));
    out.push_str(&format!(
        "pub const STRAP_GPIOS: [u8; {}] = [{}, {}, {}];\n",
        STRAP_LINES, board.strap[0], board.strap[1], board.strap[2]
    ));
    out.push_str(&format!(
        "pub const HEARTBEAT_PULL: embassy_rp::gpio::Pull = {};\n",
        board.heartbeat_pull.path()
    ));
    out.push_str(&format!(
        "pub const STRAP_PULL: embassy_rp::gpio::Pull = {};\n\n",
        board.strap_pull.path()
    ));

    out.push_str("/// Move the board's pins out of `embassy_rp::Peripherals`\n");
    out.push_str("macro_rules! take_board_pins {\n");
    out.push_str("    ($p:ident) => {\n");
    out.push_str("        $crate::board::BoardPins {\n");
    out.push_str(&format!("            heartbeat: {},\n", take(board.heartbeat)));
    out.push_str(&format!("            reset: {},\n", take(board.reset)));
    out.push_str(&format!("            power: {},\n", take(board.power)));
    out.push_str("            strap: [\n");
    for pin in board.strap {
        out.push_str(&format!("                {},\n", take(pin)));
    }
    out.push_str("            ],\n");
    out.push_str("        }\n");
    out.push_str("    };\n");
    out.push_str("}\n");
    out
}
