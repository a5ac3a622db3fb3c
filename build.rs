use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn main() {
    let hash = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
            } else {
                None
            }
        })
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".into());

    println!("cargo:rustc-env=GHOSTDRAW_GIT_HASH={hash}");

    if let Some(git_dir) = locate_git_dir() {
        rerun_if_exists(&git_dir.join("HEAD"));
        rerun_if_exists(&git_dir.join("refs"));
        rerun_if_exists(&git_dir.join("packed-refs"));
    }
}

fn locate_git_dir() -> Option<PathBuf> {
    if let Some(from_env) = env::var_os("GIT_DIR") {
        return Some(PathBuf::from(from_env));
    }

    let dot_git = PathBuf::from(".git");
    if dot_git.is_dir() {
        return Some(dot_git);
    }

    // Worktrees and submodules store a pointer file instead of a directory.
    let contents = fs::read_to_string(&dot_git).ok()?;
    let target = contents.strip_prefix("gitdir:")?.trim();
    let resolved = PathBuf::from(target);
    if resolved.is_relative() {
        Some(Path::new(".").join(resolved))
    } else {
        Some(resolved)
    }
}

fn rerun_if_exists(path: &Path) {
    if path.exists() {
        if let Some(display) = path.to_str() {
            println!("cargo:rerun-if-changed={display}");
        }
    }
}
