use std::process::Command;

// TALLY_BUILD_SHA: set explicitly (release builds) or read from git.
fn main() {
    println!("cargo:rerun-if-env-changed=TALLY_BUILD_SHA");

    let sha = std::env::var("TALLY_BUILD_SHA")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(git_short_sha);

    println!("cargo:rustc-env=TALLY_BUILD_SHA={}", sha);
}

fn git_short_sha() -> String {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let repo_root = format!("{}/..", manifest_dir);

    Command::new("git")
        .args(["-C", &repo_root, "rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}
