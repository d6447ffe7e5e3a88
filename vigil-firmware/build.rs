//! Build script for vigil-firmware
//!
//! Emits the linker arguments for cortex-m-rt and defmt. The memory map
//! comes from embassy-stm32's `memory-x` feature.

fn main() {
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    println!("cargo:rerun-if-changed=build.rs");
}
