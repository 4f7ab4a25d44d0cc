//! Turns `kernel_types.toml` into `cfg(gw_exposes = "...")` flags and the
//! generated `TYPE_CAPABILITIES` table.

use serde::Deserialize;
use std::collections::HashSet;
use std::fmt::Write as _;
use std::{env, fs, path::Path};

#[derive(Deserialize)]
struct Manifest {
    #[serde(rename = "type")]
    types: Vec<Entry>,
}

#[derive(Deserialize)]
struct Entry {
    name: String,
    status: String,
    description: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=kernel_types.toml");

    let raw = fs::read_to_string("kernel_types.toml")?;
    let manifest: Manifest = toml::from_str(&raw)?;

    let mut seen = HashSet::new();
    for entry in &manifest.types {
        if !seen.insert(entry.name.as_str()) {
            return Err(format!("kernel_types.toml lists `{}` more than once", entry.name).into());
        }
    }

    let values: Vec<String> = manifest.types.iter().map(|t| format!("\"{}\"", t.name)).collect();
    println!("cargo:rustc-check-cfg=cfg(gw_exposes, values({}))", values.join(", "));

    let mut table = String::from("pub const TYPE_CAPABILITIES: &[TypeCapability] = &[\n");
    for entry in &manifest.types {
        let status = match entry.status.as_str() {
            "supported" => {
                println!("cargo:rustc-cfg=gw_exposes=\"{}\"", entry.name);
                "CapabilityStatus::Supported"
            }
            "pending" => "CapabilityStatus::Pending",
            other => {
                return Err(format!("unknown status `{other}` for `{}`", entry.name).into());
            }
        };
        writeln!(
            table,
            "    TypeCapability {{ name: {:?}, status: {status}, description: {:?} }},",
            entry.name, entry.description
        )?;
    }
    table.push_str("];\n");

    let out = Path::new(&env::var("OUT_DIR")?).join("type_capabilities.rs");
    fs::write(out, table)?;
    Ok(())
}
