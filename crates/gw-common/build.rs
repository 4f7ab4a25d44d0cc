use std::{env, fs, path::Path};

/// Lane count used when `GW_SMALL_PACK_SIZE` is not set.
const DEFAULT_SMALL_PACK_SIZE: usize = 4;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=GW_SMALL_PACK_SIZE");

    let pack_size = match env::var("GW_SMALL_PACK_SIZE") {
        Ok(raw) => raw.trim().parse::<usize>().map_err(|_| {
            format!("GW_SMALL_PACK_SIZE must be a positive integer, got {raw:?}")
        })?,
        Err(_) => DEFAULT_SMALL_PACK_SIZE,
    };
    if pack_size == 0 {
        return Err("GW_SMALL_PACK_SIZE must be at least 1".into());
    }

    let out = Path::new(&env::var("OUT_DIR")?).join("pack_config.rs");
    fs::write(
        out,
        format!(
            "/// Number of scalar lanes in the kernel module's small pack \
             (`GW_SMALL_PACK_SIZE` at build time).\n\
             pub const SMALL_PACK_SIZE: usize = {pack_size};\n"
        ),
    )?;

    Ok(())
}
