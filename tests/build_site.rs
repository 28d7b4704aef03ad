//! End-to-end CLI tests: run the binary against a generated content directory.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_simple-folio"))
}

fn write_png(path: &Path, width: u32, height: u32) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    image::RgbImage::from_pixel(width, height, image::Rgb([200, 80, 40]))
        .save_with_format(path, image::ImageFormat::Png)
        .unwrap();
}

const PORTFOLIO: &str = r#"{
    "name": "Grace Hopper",
    "bio": "Compilers and *nanoseconds*.",
    "avatar": "images/avatar.png",
    "email": "grace@example.com",
    "phone": "+1 555 0100",
    "linkedin": "https://linkedin.com/in/grace",
    "projects": [
        {
            "title": "Data Dashboard",
            "description": "Live metrics.",
            "technologies": ["Rust", "SQL"],
            "highlights": ["Realtime"],
            "url": "https://example.com/dash",
            "images": {
                "hero": "images/dash/hero.png",
                "demo": "images/dash/demo.gif",
                "gallery": ["images/dash/1.png", "images/dash/missing.png"]
            }
        },
        {
            "title": "Compiler",
            "description": "A-0 system.",
            "url": "https://example.com/a0"
        },
        {
            "title": "Empty Images",
            "description": "Nothing to show.",
            "url": "https://example.com/empty",
            "images": {}
        }
    ]
}"#;

fn content() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    fs::write(root.join("config.json"), PORTFOLIO).unwrap();
    write_png(&root.join("images/avatar.png"), 32, 32);
    write_png(&root.join("images/dash/hero.png"), 64, 40);
    write_png(&root.join("images/dash/1.png"), 64, 40);
    fs::write(root.join("images/dash/demo.gif"), b"not a gif").unwrap();
    fs::create_dir_all(root.join("assets")).unwrap();
    fs::write(root.join("assets/favicon.ico"), b"ico").unwrap();
    tmp
}

fn run(args: &[&str], source: &Path, output: &Path) -> Output {
    bin()
        .args(args)
        .arg("--source")
        .arg(source)
        .arg("--output")
        .arg(output)
        .output()
        .expect("failed to run simple-folio")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn build_writes_complete_site() {
    let src = content();
    let out = TempDir::new().unwrap();

    let result = run(&["build"], src.path(), out.path());
    assert!(result.status.success(), "{}", String::from_utf8_lossy(&result.stderr));

    let html = fs::read_to_string(out.path().join("index.html")).unwrap();
    assert!(html.contains("Grace Hopper"));
    assert!(html.contains("<em>nanoseconds</em>"));
    assert!(html.contains("Project Gallery (2 images)"));
    assert_eq!(html.matches(r#"class="project-card""#).count(), 3);
    assert_eq!(html.matches(r#"class="project-image-carousel""#).count(), 1);
    assert!(!html.contains("demo.gif"));
    assert!(!html.contains("missing.png"));
    assert!(html.contains(r#"href="tel:+1 555 0100""#));

    assert!(out.path().join("images/avatar.png").is_file());
    assert!(out.path().join("images/dash/hero.png").is_file());
    assert!(out.path().join("images/dash/1.png").is_file());
    assert!(!out.path().join("images/dash/demo.gif").exists());
    assert!(out.path().join("assets/favicon.ico").is_file());

    let text = stdout(&result);
    assert!(text.contains("001 Data Dashboard (2 images)"));
    assert!(text.contains("002 Compiler (no gallery)"));
    assert!(text.contains("003 Empty Images (no gallery)"));
    assert!(text.contains("Failed  images/dash/demo.gif"));
}

#[test]
fn build_is_deterministic() {
    let src = content();
    let a = TempDir::new().unwrap();
    let b = TempDir::new().unwrap();

    assert!(run(&["build"], src.path(), a.path()).status.success());
    assert!(run(&["build"], src.path(), b.path()).status.success());

    assert_eq!(
        fs::read(a.path().join("index.html")).unwrap(),
        fs::read(b.path().join("index.html")).unwrap()
    );
}

#[test]
fn quiet_build_prints_only_failures() {
    let src = content();
    let out = TempDir::new().unwrap();

    let result = run(&["build", "--quiet"], src.path(), out.path());
    let text = stdout(&result);

    assert!(result.status.success());
    assert!(!text.contains("Testing "));
    assert!(!text.contains("Loaded "));
    assert!(text.contains("Failed  images/dash/missing.png"));
}

#[test]
fn broken_portfolio_fails_but_writes_error_page() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    fs::write(src.path().join("config.json"), "[]").unwrap();

    let result = run(&["build"], src.path(), out.path());

    assert!(!result.status.success());
    let html = fs::read_to_string(out.path().join("index.html")).unwrap();
    assert!(html.contains("Error Loading Portfolio"));
}

#[test]
fn check_writes_nothing() {
    let src = content();
    let out = TempDir::new().unwrap();
    let target = out.path().join("dist");

    let result = run(&["check"], src.path(), &target);

    assert!(result.status.success());
    assert!(!target.exists());
    assert!(stdout(&result).contains("Rendered 3 projects, 1 gallery, 2 images"));
}

#[test]
fn config_controls_thumbnail_centering() {
    let src = content();
    let out = TempDir::new().unwrap();
    fs::write(
        src.path().join("config.toml"),
        "[gallery]\ncenter_thumbnails_max = 1\n",
    )
    .unwrap();

    assert!(run(&["build"], src.path(), out.path()).status.success());

    let html = fs::read_to_string(out.path().join("index.html")).unwrap();
    assert!(!html.contains("center-thumbnails"));
}

#[test]
fn gen_config_prints_stock_config() {
    let result = bin().arg("gen-config").output().unwrap();
    assert!(result.status.success());

    let text = stdout(&result);
    let value: toml::Value = toml::from_str(&text).unwrap();
    assert!(value.get("gallery").is_some());
}
