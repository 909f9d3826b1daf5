//! Puts the workspace `memory.x` on the linker search path and adds the
//! cortex-m-rt and defmt linker scripts for the firmware examples.

use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rustc-link-arg-examples=--nmagic");
    println!("cargo:rustc-link-arg-examples=-Tlink.x");
    println!("cargo:rustc-link-arg-examples=-Tdefmt.x");

    println!("cargo:rerun-if-changed=../memory.x");

    let out = PathBuf::from(env::var_os("OUT_DIR").expect("OUT_DIR not set by cargo"));
    fs::write(out.join("memory.x"), include_bytes!("../memory.x")).expect("can't write memory.x");
    println!("cargo:rustc-link-search={}", out.display());
}
