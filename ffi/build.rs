//! Generates `notes_ffi.h` into `OUT_DIR` from the `extern "C"` surface.

use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=src/lib.rs");
    println!("cargo:rerun-if-changed=src/types.rs");

    let crate_dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let out_dir = match env::var("OUT_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => return,
    };

    let generated = cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("NOTES_FFI_H")
        .with_documentation(true)
        .generate();

    match generated {
        Ok(bindings) => {
            bindings.write_to_file(out_dir.join("notes_ffi.h"));
        }
        // Header generation never blocks the library build.
        Err(err) => println!("cargo:warning=cbindgen failed: {err}"),
    }
}
