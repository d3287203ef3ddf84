use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Git hash is optional: source tarballs and container builds have no .git
    let hash = Command::new("git")
        .args(["rev-parse", "--short=8", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .unwrap_or_default();

    println!("cargo:rustc-env=BUILD_VERSION={}", hash);
}
