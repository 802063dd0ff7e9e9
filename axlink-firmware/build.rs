//! Build script for axlink-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates node.toml and generates its constants

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use axlink_core::config::{NodeConfig, NodeFile};

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    setup_linker(&out_dir);
    let config = load_config();
    generate_constants(&out_dir, &config);
}

/// Set up linker search paths for memory.x
fn setup_linker(out_dir: &Path) {
    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Read and validate node.toml
fn load_config() -> NodeConfig {
    println!("cargo:rerun-if-changed=node.toml");

    let config_path = Path::new("node.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: node.toml not found!                                     ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a node.toml configuration file.           ║\n\
            ║  Please create one in the axlink-firmware directory.             ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read node.toml", &[e.to_string()]),
    };

    let file: NodeFile = match toml::from_str(&content) {
        Ok(file) => file,
        Err(e) => fail(
            "Invalid node.toml",
            &e.to_string().lines().map(String::from).collect::<Vec<_>>(),
        ),
    };

    let config = NodeConfig::from(file);

    if config.first_channel > 3 {
        fail(
            "Invalid node configuration",
            &[format!(
                "[adc] first_channel must be 0-3 (ADC0-ADC3), got {}",
                config.first_channel
            )],
        );
    }

    if let Err(e) = config.validate() {
        fail("Invalid node configuration", &[format!("{:?}", e)]);
    }

    println!(
        "cargo:warning=node.toml validated: period {} us, {} baud",
        config.sampling.period_us(),
        config.baudrate
    );

    config
}

/// Write the validated values for `include!` by the firmware
fn generate_constants(out_dir: &Path, config: &NodeConfig) {
    let generated = format!(
        "// Generated from node.toml by build.rs\n\
         pub const REFERENCE_HZ: u32 = {};\n\
         pub const COMPARE: u32 = {};\n\
         pub const BAUDRATE: u32 = {};\n\
         pub const FIRST_CHANNEL: u8 = {};\n",
        config.sampling.reference_hz,
        config.sampling.compare,
        config.baudrate,
        config.first_channel,
    );
    fs::write(out_dir.join("node_config.rs"), generated).unwrap();
}

/// Abort the build with a boxed error listing
fn fail(title: &str, errors: &[String]) -> ! {
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
            .map(|e| {
                let line = if e.len() > 62 {
                    format!("{}...", &e[..59])
                } else {
                    e.clone()
                };
                format!("║  • {:<62} ║", line)
            })
            .collect::<Vec<_>>()
            .join("\n")
    );
}
