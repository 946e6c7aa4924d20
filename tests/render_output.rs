use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::tempdir;
use tiny_skia::Pixmap;

use workflow_diagram::{DiagramError, RenderConfig, SUCCESS_MARKER, run};

fn config_for(output: &Path, dpi: f32, tight: bool) -> RenderConfig {
    RenderConfig {
        output: output.to_path_buf(),
        dpi,
        tight,
        fonts_dir: output.with_file_name("no-fonts"),
        ..RenderConfig::default()
    }
}

#[test]
fn writes_exactly_one_png() {
    let dir = tempdir().expect("Failed to create temp directory");
    let output = dir.path().join("langgraph_architecture.png");

    let written = run(&config_for(&output, 72.0, true)).expect("render succeeds");

    assert_eq!(written, output);
    assert!(output.is_file());
    let entries: Vec<_> = fs::read_dir(dir.path())
        .expect("list dir")
        .flatten()
        .collect();
    assert_eq!(entries.len(), 1, "temporary files must not be left behind");
}

#[test]
fn full_canvas_size_follows_dpi() {
    let dir = tempdir().expect("Failed to create temp directory");

    for (dpi, expected) in [(72.0, (1152, 864)), (150.0, (2400, 1800))] {
        let output = dir.path().join(format!("canvas_{dpi}.png"));
        run(&config_for(&output, dpi, false)).expect("render succeeds");

        let data = fs::read(&output).expect("read png");
        let size = imagesize::blob_size(&data).expect("valid image header");
        assert_eq!((size.width, size.height), expected, "dpi {dpi}");
    }
}

#[test]
fn tight_export_is_smaller_than_canvas() {
    let dir = tempdir().expect("Failed to create temp directory");
    let output = dir.path().join("tight.png");
    run(&config_for(&output, 72.0, true)).expect("render succeeds");

    let size = imagesize::size(&output).expect("valid image");
    assert!(size.width > 0 && size.width <= 1152 + 15);
    assert!(size.height > 0 && size.height < 864);
}

#[test]
fn corner_pixel_is_white() {
    let dir = tempdir().expect("Failed to create temp directory");
    let output = dir.path().join("white.png");
    run(&config_for(&output, 72.0, true)).expect("render succeeds");

    let pixmap = Pixmap::load_png(&output).expect("decode png");
    for (x, y) in [(0, 0), (pixmap.width() - 1, pixmap.height() - 1)] {
        let pixel = pixmap.pixel(x, y).expect("pixel in bounds");
        assert_eq!(
            (pixel.red(), pixel.green(), pixel.blue(), pixel.alpha()),
            (255, 255, 255, 255),
            "pixel at ({x}, {y})"
        );
    }
}

#[test]
fn repeated_renders_are_identical() {
    let dir = tempdir().expect("Failed to create temp directory");
    let first = dir.path().join("first.png");
    let second = dir.path().join("second.png");

    run(&config_for(&first, 100.0, true)).expect("first render");
    run(&config_for(&second, 100.0, true)).expect("second render");

    assert_eq!(
        fs::read(&first).expect("read first"),
        fs::read(&second).expect("read second")
    );
}

#[test]
fn missing_directory_fails_without_output() {
    let dir = tempdir().expect("Failed to create temp directory");
    let output = dir.path().join("missing").join("out.png");

    let err = run(&config_for(&output, 72.0, true)).expect_err("directory is missing");

    assert!(matches!(err, DiagramError::MissingDirectory(_)));
    assert!(!output.exists());
}

#[test]
fn unwritable_target_fails_without_leftovers() {
    let dir = tempdir().expect("Failed to create temp directory");
    let output = dir.path().join("taken.png");
    fs::create_dir(&output).expect("create directory at output path");

    let err = run(&config_for(&output, 72.0, true)).expect_err("target is a directory");

    assert!(matches!(err, DiagramError::Io { .. }));
    assert!(output.is_dir());
    let entries: Vec<_> = fs::read_dir(dir.path())
        .expect("list dir")
        .flatten()
        .collect();
    assert_eq!(entries.len(), 1, "temporary files must not be left behind");
}

#[test]
fn invalid_dpi_is_rejected_before_rendering() {
    let dir = tempdir().expect("Failed to create temp directory");
    let output = dir.path().join("out.png");

    let err = run(&config_for(&output, 0.0, true)).expect_err("dpi is invalid");

    assert!(matches!(err, DiagramError::InvalidSetting(_)));
    assert!(!output.exists());
}

#[test]
fn binary_prints_marker_on_success() {
    let dir = tempdir().expect("Failed to create temp directory");
    let output = dir.path().join("cli.png");

    let result = Command::new(env!("CARGO_BIN_EXE_workflow-diagram"))
        .current_dir(dir.path())
        .args(["--dpi", "50", "--log-level", "off", "-o"])
        .arg(&output)
        .output()
        .expect("run binary");

    assert!(result.status.success());
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains(SUCCESS_MARKER), "stdout was: {stdout}");
    assert_eq!(stdout.lines().count(), 1);
    assert!(output.is_file());
}

#[test]
fn binary_exits_non_zero_for_missing_directory() {
    let dir = tempdir().expect("Failed to create temp directory");
    let output = dir.path().join("nowhere").join("cli.png");

    let result = Command::new(env!("CARGO_BIN_EXE_workflow-diagram"))
        .current_dir(dir.path())
        .arg("-o")
        .arg(&output)
        .output()
        .expect("run binary");

    assert!(!result.status.success());
    assert!(!String::from_utf8_lossy(&result.stdout).contains(SUCCESS_MARKER));
    assert!(!output.exists());
    assert!(!dir.path().join("nowhere").exists());
}

#[test]
fn binary_exits_non_zero_for_unwritable_target() {
    let dir = tempdir().expect("Failed to create temp directory");
    let output = dir.path().join("taken.png");
    fs::create_dir(&output).expect("create directory at output path");

    let result = Command::new(env!("CARGO_BIN_EXE_workflow-diagram"))
        .current_dir(dir.path())
        .args(["--dpi", "36", "--log-level", "off", "-o"])
        .arg(&output)
        .output()
        .expect("run binary");

    assert!(!result.status.success());
    assert!(!String::from_utf8_lossy(&result.stdout).contains(SUCCESS_MARKER));
    assert_eq!(fs::read_dir(dir.path()).expect("list dir").count(), 1);
}

#[test]
fn binary_reads_config_file() {
    let dir = tempdir().expect("Failed to create temp directory");
    let output = dir.path().join("from_config.png");
    let config_path = dir.path().join("custom.toml");
    fs::write(
        &config_path,
        format!(
            "output = {:?}\ndpi = 36\ntight = false\n",
            output.to_string_lossy()
        ),
    )
    .expect("write config");

    let result = Command::new(env!("CARGO_BIN_EXE_workflow-diagram"))
        .current_dir(dir.path())
        .arg("--config")
        .arg(&config_path)
        .output()
        .expect("run binary");

    assert!(result.status.success());
    let size = imagesize::size(&output).expect("valid image");
    assert_eq!((size.width, size.height), (576, 432));
}
