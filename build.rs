use std::env;

// Stamps the binary with the build version printed by `taskboard --version`
// and in the startup log line.
fn main() {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let pkg_name = env::var("CARGO_PKG_NAME").unwrap_or_else(|_| "taskboard".to_string());
    let mut pkg_version = env::var("CARGO_PKG_VERSION").unwrap_or_default();
    if let Ok(build_date) = env::var("DATE") {
        pkg_version = format!("{}+{}", pkg_version, build_date);
    }

    let version = versionisator::Version::new(&manifest_dir, pkg_name, pkg_version);
    println!("cargo:rustc-env=FULL_VERSION={}", version.full());
    println!("cargo:rustc-env=SOURCE_VERSION={}", version.hash());
    println!("cargo:rerun-if-env-changed=DATE");
}
