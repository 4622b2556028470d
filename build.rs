use std::process::Command;

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");

    let version = std::env::var("CARGO_PKG_VERSION").unwrap_or_default();
    // Tagged release builds report the bare version; anything else gets
    // the short commit hash appended.
    let tagged = git(&["describe", "--exact-match", "--tags", "HEAD"]).is_some();
    let version = match git(&["rev-parse", "--short", "HEAD"]) {
        Some(hash) if !tagged && !hash.is_empty() => format!("{version} ({hash})"),
        _ => version,
    };
    println!("cargo:rustc-env=CARESITE_VERSION={version}");
}
