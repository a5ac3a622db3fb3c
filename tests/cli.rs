use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn ghostdraw_cmd() -> Command {
    Command::cargo_bin("ghostdraw").expect("binary exists")
}

const QUICK_CONFIG: &str = r#"
[canvas]
width = 40.0
height = 40.0
display_scale = 1.0
line_width = 4.0

[tools.red]
delay_secs = 0.01

[tools.blue]
delay_secs = 0.01
"#;

fn argb_at(surface: &mut cairo::ImageSurface, x: usize, y: usize) -> u32 {
    let stride = surface.stride() as usize;
    let data = surface.data().unwrap();
    let offset = y * stride + x * 4;
    u32::from_ne_bytes(data[offset..offset + 4].try_into().unwrap())
}

#[test]
fn ghostdraw_help_prints_usage() {
    ghostdraw_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Delayed-replay ghost drawing canvas"))
        .stdout(predicate::str::contains("--frames-dir"));
}

#[test]
fn no_script_lists_tools() {
    let temp = TempDir::new().unwrap();
    ghostdraw_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .env("HOME", temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("green"))
        .stdout(predicate::str::contains("5.0s"));
}

#[test]
fn print_config_uses_overrides() {
    let temp = TempDir::new().unwrap();
    ghostdraw_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .env("HOME", temp.path())
        .args(["--print-config", "--width", "640"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[canvas]"))
        .stdout(predicate::str::contains("width = 640.0"));
}

#[test]
fn size_overrides_are_clamped() {
    let temp = TempDir::new().unwrap();
    ghostdraw_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .env("HOME", temp.path())
        .args(["--print-config", "--width", "100000", "--scale", "0.1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("width = 8192.0"))
        .stdout(predicate::str::contains("display_scale = 0.5"));
}

#[test]
fn oversized_canvas_fails_cleanly() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("config.toml");
    let script = temp.path().join("script.toml");
    std::fs::write(&config, QUICK_CONFIG).unwrap();
    std::fs::write(&script, "").unwrap();

    ghostdraw_cmd()
        .arg("--config")
        .arg(&config)
        .arg("--script")
        .arg(&script)
        .arg("--output")
        .arg(temp.path().join("out.png"))
        .args(["--width", "8192", "--scale", "8"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to create canvas"));
}

#[test]
fn missing_script_fails() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("config.toml");
    std::fs::write(&config, QUICK_CONFIG).unwrap();

    ghostdraw_cmd()
        .arg("--config")
        .arg(&config)
        .arg("--script")
        .arg(temp.path().join("missing.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid gesture script"));
}

#[test]
fn invalid_config_fails() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("config.toml");
    std::fs::write(&config, "[canvas\nwidth = ").unwrap();

    ghostdraw_cmd()
        .arg("--config")
        .arg(&config)
        .arg("--print-config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));
}

#[test]
fn script_renders_png_and_frames() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("config.toml");
    let script = temp.path().join("script.toml");
    let output = temp.path().join("out.png");
    let frames = temp.path().join("frames");
    std::fs::write(&config, QUICK_CONFIG).unwrap();
    std::fs::write(
        &script,
        r#"
        [[gesture]]
        tool = "blue"
        points = [[5.0, 20.0, 0.0], [20.0, 20.0, 0.01], [35.0, 20.0, 0.02]]

        [[gesture]]
        cancel = true
        points = [[20.0, 5.0, 0.0], [20.0, 35.0, 0.01]]
        "#,
    )
    .unwrap();

    ghostdraw_cmd()
        .arg("--config")
        .arg(&config)
        .arg("--script")
        .arg(&script)
        .arg("--output")
        .arg(&output)
        .arg("--frames-dir")
        .arg(&frames)
        .assert()
        .success();

    let mut file = std::fs::File::open(&output).unwrap();
    let mut surface = cairo::ImageSurface::create_from_png(&mut file).unwrap();
    assert_eq!((surface.width(), surface.height()), (40, 40));
    assert_eq!(argb_at(&mut surface, 20, 20), 0xFF00_00FF);
    assert_eq!(argb_at(&mut surface, 20, 5), 0xFFAA_AAAA);

    assert!(frames.join("frame-00001.png").exists());
}
