fn main() {
    // Board settings are baked in by `toml_cfg` at compile time.
    println!("cargo:rerun-if-changed=cfg.toml");
}
