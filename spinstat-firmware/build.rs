//! Build script for spinstat-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates bike.toml at compile time
//! - Generates `bike_config.rs` constants from it

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    let config = load_config();
    let bike = validate_config(&config);
    generate_constants(&bike);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Abort the build with a boxed error report
fn fail(title: &str, details: &[String]) -> ! {
    let rule = "═".repeat(68);
    let body = details
        .iter()
        .flat_map(|d| d.lines())
        .map(|line| {
            let line = if line.chars().count() > 62 {
                format!("{}...", line.chars().take(59).collect::<String>())
            } else {
                line.to_string()
            };
            format!("║  • {:<62} ║", line)
        })
        .collect::<Vec<_>>()
        .join("\n");

    panic!(
        "\n╔{rule}╗\n║  ERROR: {:<58} ║\n╠{rule}╣\n{body}\n╚{rule}╝\n",
        title
    );
}

/// Read and parse bike.toml
fn load_config() -> toml::Value {
    println!("cargo:rerun-if-changed=bike.toml");

    let config_path = Path::new("bike.toml");
    if !config_path.exists() {
        fail(
            "bike.toml not found!",
            &["Create bike.toml in the spinstat-firmware directory.".to_string()],
        );
    }

    let content = fs::read_to_string(config_path)
        .unwrap_or_else(|e| fail("Failed to read bike.toml", &[e.to_string()]));

    toml::from_str(&content)
        .unwrap_or_else(|e| fail("Invalid TOML syntax in bike.toml", &[e.to_string()]))
}

/// Validated bike.toml contents
struct BikeConfig {
    wheel_size_m: f64,
    smoothing_factor: f64,
    splash_ms: u64,
    debounce_ms: u64,
}

/// Read a number that may be written as an integer or a float
fn number(config: &toml::Value, section: &str, key: &str) -> Option<f64> {
    match config.get(section)?.get(key)? {
        toml::Value::Float(f) => Some(*f),
        toml::Value::Integer(i) => Some(*i as f64),
        _ => None,
    }
}

fn integer(config: &toml::Value, section: &str, key: &str) -> Option<i64> {
    config.get(section)?.get(key)?.as_integer()
}

/// Check one value against its allowed range, recording a problem if it fails
fn checked<T: Copy + Default>(
    errors: &mut Vec<String>,
    value: Option<T>,
    valid: impl Fn(T) -> bool,
    missing: &str,
    out_of_range: &str,
) -> T {
    match value {
        Some(v) if valid(v) => v,
        Some(_) => {
            errors.push(out_of_range.to_string());
            T::default()
        }
        None => {
            errors.push(missing.to_string());
            T::default()
        }
    }
}

/// Validate every section, collecting all problems before failing
fn validate_config(config: &toml::Value) -> BikeConfig {
    let mut errors = Vec::new();

    let wheel_size_m = checked(
        &mut errors,
        number(config, "wheel", "size_m"),
        |size| size > 0.0 && size < 5.0,
        "[wheel] missing numeric 'size_m'",
        "[wheel] size_m must be between 0 and 5 metres",
    );
    let smoothing_factor = checked(
        &mut errors,
        number(config, "smoothing", "factor"),
        |factor| factor > 0.0 && factor <= 1.0,
        "[smoothing] missing numeric 'factor'",
        "[smoothing] factor must be in (0, 1]",
    );
    let splash_ms = checked(
        &mut errors,
        integer(config, "display", "splash_ms"),
        |ms| (0..=10_000).contains(&ms),
        "[display] missing integer 'splash_ms'",
        "[display] splash_ms must be 0-10000",
    );
    let debounce_ms = checked(
        &mut errors,
        integer(config, "buttons", "debounce_ms"),
        |ms| (1..=500).contains(&ms),
        "[buttons] missing integer 'debounce_ms'",
        "[buttons] debounce_ms must be 1-500",
    );

    if !errors.is_empty() {
        fail("Invalid bike.toml configuration", &errors);
    }

    println!("cargo:warning=bike.toml validated successfully");

    BikeConfig {
        wheel_size_m,
        smoothing_factor,
        splash_ms: splash_ms as u64,
        debounce_ms: debounce_ms as u64,
    }
}

/// Write the validated values as Rust constants into OUT_DIR
fn generate_constants(bike: &BikeConfig) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let source = format!(
        "/// Wheel circumference (m)\n\
         pub const WHEEL_SIZE_M: f64 = {:?};\n\
         /// EMA weight of each new reading\n\
         pub const SMOOTHING_FACTOR: f64 = {:?};\n\
         /// Splash banner duration\n\
         pub const SPLASH_MS: u64 = {};\n\
         /// Key debounce time\n\
         pub const DEBOUNCE_MS: u64 = {};\n",
        bike.wheel_size_m, bike.smoothing_factor, bike.splash_ms, bike.debounce_ms
    );

    fs::write(out_dir.join("bike_config.rs"), source).unwrap();
}
