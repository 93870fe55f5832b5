//! Build script for maison-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates object.toml at compile time
//! - Generates object_config.rs from it

use std::collections::BTreeMap;
use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use maison_core::objects::ObjectId;
use maison_hal::PinId;

// Host implementation for the critical sections maison-core links against
use critical_section as _;

/// Pin roles every LCD slider configuration must assign, in generation order
const SLIDER_ROLES: [&str; 14] = [
    "phase_a",
    "phase_b",
    "switch",
    "boost_enable",
    "led_network",
    "led_battery",
    "button_network",
    "lcd_e",
    "lcd_rw",
    "lcd_rs",
    "lcd_d4",
    "lcd_d5",
    "lcd_d6",
    "lcd_d7",
];

/// Object roles this firmware has an implementation for
const IMPLEMENTED: [ObjectId; 1] = [ObjectId::LcdSlider];

fn main() {
    setup_linker();
    let (object, pins) = validate_config();
    generate_config(object, &pins);
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
    if env::var_os("CARGO_FEATURE_DEFMT").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate object.toml and return the selected object and its pins
fn validate_config() -> (ObjectId, BTreeMap<&'static str, PinId>) {
    // Re-run if object.toml changes
    println!("cargo:rerun-if-changed=object.toml");

    let config_path = Path::new("object.toml");

    // Check if config file exists
    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: object.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires an object.toml configuration file.        ║\n\
            ║  Please create one in the maison-firmware directory.             ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    // Read the config file
    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read object.toml                               ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in object.toml                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let object = validate_object(&config);
    let pins = validate_pins(&config);

    println!("cargo:warning=object.toml validated successfully ({})", object.name());

    (object, pins)
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

/// Fail the build with a list of errors under a heading
fn fail(heading: &str, errors: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        heading,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Validate the [object] section
fn validate_object(config: &toml::Value) -> ObjectId {
    let kind = match config.get("object").and_then(|o| o.get("kind")) {
        Some(toml::Value::String(kind)) => kind,
        Some(_) => fail(
            "Invalid object configuration",
            &["[object] kind must be a string".to_string()],
        ),
        None => fail(
            "Missing required sections in object.toml",
            &["Missing [object] kind".to_string()],
        ),
    };

    let object = match ObjectId::from_key(kind) {
        Some(object) => object,
        None => {
            let mut errors = vec![format!("unknown object kind '{}'", kind)];
            errors.push("known kinds:".to_string());
            errors.extend(ObjectId::ALL.iter().map(|o| format!("  {}", o.key())));
            fail("Invalid object configuration", &errors);
        }
    };

    if !IMPLEMENTED.contains(&object) {
        fail(
            "Invalid object configuration",
            &[format!(
                "'{}' ({}) has no implementation in this firmware",
                kind,
                object.name()
            )],
        );
    }

    object
}

/// Validate the [pins] section: every role present, valid and unique
fn validate_pins(config: &toml::Value) -> BTreeMap<&'static str, PinId> {
    let table = match config.get("pins") {
        Some(toml::Value::Table(t)) => t,
        Some(_) => fail(
            "Invalid pin configuration",
            &["[pins] must be a table".to_string()],
        ),
        None => fail(
            "Missing required sections in object.toml",
            &["Missing [pins] section".to_string()],
        ),
    };

    let mut errors = Vec::new();
    let mut pins = BTreeMap::new();
    let mut owners: BTreeMap<PinId, &str> = BTreeMap::new();

    for role in SLIDER_ROLES {
        let pin = match table.get(role) {
            Some(toml::Value::String(s)) => match PinId::parse(s) {
                Some(pin) => pin,
                None => {
                    errors.push(format!("[pins] {} = '{}' is not a P0 pin", role, s));
                    continue;
                }
            },
            Some(_) => {
                errors.push(format!("[pins] {} must be a string like \"P0.12\"", role));
                continue;
            }
            None => {
                errors.push(format!("[pins] missing '{}'", role));
                continue;
            }
        };

        if let Some(other) = owners.insert(pin, role) {
            errors.push(format!("[pins] {} and {} both use {}", other, role, pin));
        }
        pins.insert(role, pin);
    }

    for key in table.keys() {
        if !SLIDER_ROLES.contains(&key.as_str()) {
            errors.push(format!("[pins] unknown role '{}'", key));
        }
    }

    if !errors.is_empty() {
        fail("Invalid pin configuration", &errors);
    }

    pins
}

/// Write object_config.rs into OUT_DIR
fn generate_config(object: ObjectId, pins: &BTreeMap<&'static str, PinId>) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let pin = |role: &str| format!("PinId::p0({})", pins[role].number());

    let code = format!(
        "// Generated by build.rs from object.toml\n\
         \n\
         /// Object role selected by object.toml\n\
         pub const OBJECT: ObjectId = ObjectId::{:?};\n\
         \n\
         /// Pin roles from object.toml\n\
         pub const PINS: SliderPins = SliderPins {{\n\
         \x20   phase_a: {},\n\
         \x20   phase_b: {},\n\
         \x20   switch: {},\n\
         \x20   boost_enable: {},\n\
         \x20   led_network: {},\n\
         \x20   led_battery: {},\n\
         \x20   button_network: {},\n\
         \x20   lcd: LcdPins {{\n\
         \x20       enable: {},\n\
         \x20       rw: {},\n\
         \x20       rs: {},\n\
         \x20       data: [{}, {}, {}, {}],\n\
         \x20   }},\n\
         }};\n",
        object,
        pin("phase_a"),
        pin("phase_b"),
        pin("switch"),
        pin("boost_enable"),
        pin("led_network"),
        pin("led_battery"),
        pin("button_network"),
        pin("lcd_e"),
        pin("lcd_rw"),
        pin("lcd_rs"),
        pin("lcd_d4"),
        pin("lcd_d5"),
        pin("lcd_d6"),
        pin("lcd_d7"),
    );

    fs::write(out_dir.join("object_config.rs"), code).unwrap();
}
