use std::{env, fs, path::PathBuf, process::Command};

use proc_macro2::TokenStream;

mod percentile_table;

pub fn main() {
    println!("cargo:rerun-if-changed=build");
    write_generated_file(percentile_table::build(), "percentile_table.rs");
}

/// Writes `content` to `OUT_DIR/out_file` for the crate to `include!`.
pub fn write_generated_file(content: TokenStream, out_file: &str) {
    let out_dir = env::var_os("OUT_DIR").expect("OUT_DIR is set by cargo for build scripts");
    let path = PathBuf::from(out_dir).join(out_file);

    fs::write(&path, content.to_string())
        .unwrap_or_else(|err| panic!("Failed to write {}: {err}", path.display()));

    // Formatting only helps when reading the generated file; rustfmt may be missing.
    let _ = Command::new("rustfmt").arg(&path).output();
}
