// Name Bridge - Build Task Runner
// Unified build system using cargo xtask pattern

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use xshell::{Shell, cmd};

const BINARY: &str = "name-bridge";

fn main() -> Result<()> {
    let sh = Shell::new()?;
    let args: Vec<_> = std::env::args().skip(1).collect();

    match args.first().map(|s| s.as_str()) {
        Some("build") => {
            let release = args.iter().any(|a| a == "--release");
            build(&sh, release)
        },
        Some("test") => test(&sh),
        Some("format") => {
            let check = args.iter().any(|a| a == "--check");
            format(&sh, check)
        },
        Some("clippy") => clippy(&sh),
        Some("run") => run(&sh, &args[1..]),
        Some("clean") => clean(&sh),
        Some("ci") => ci(&sh),
        Some("dist") => dist(&sh),
        _ => {
            print_help();
            Ok(())
        },
    }
}

fn print_help() {
    println!("Name Bridge - Build Commands:");
    println!();
    println!("Usage: cargo xtask <COMMAND> [OPTIONS]");
    println!();
    println!("Commands:");
    println!("  build [--release]   Build the server");
    println!("  test                Run all tests");
    println!("  format [--check]    Format code (check mode doesn't modify)");
    println!("  clippy              Run clippy checks");
    println!("  run [ARGS...]       Run the server (args go to name-bridge)");
    println!("  clean               Clean build artifacts");
    println!("  ci                  Run all CI checks (format + clippy + build + test)");
    println!("  dist                Create distribution package (tar.gz)");
    println!();
    println!("Examples:");
    println!("  cargo xtask build --release");
    println!("  cargo xtask run -- --port 9000");
    println!("  cargo xtask format --check");
}

/// Build the backend, packaging a dist tree in release mode
fn build(sh: &Shell, release: bool) -> Result<()> {
    println!("🔨 Building Name Bridge{}...", if release { " (release)" } else { "" });

    let _dir = sh.push_dir(project_root());
    if release {
        cmd!(sh, "cargo build --release -p {BINARY}")
            .run()
            .context("Failed to build backend in release mode")?;
        create_distribution(sh)?;
    } else {
        cmd!(sh, "cargo build -p {BINARY}").run().context("Failed to build backend")?;
    }

    println!("✅ Build complete!");
    Ok(())
}

/// Lay out build/dist with binary, config and log directory
fn create_distribution(sh: &Shell) -> Result<()> {
    let project = project_root();
    let dist_dir = project.join("build/dist");

    cmd!(sh, "mkdir -p {dist_dir}/bin {dist_dir}/conf {dist_dir}/logs").run()?;

    let binary_src = project.join("target/release").join(BINARY);
    let binary_dst = dist_dir.join("bin").join(BINARY);
    cmd!(sh, "cp {binary_src} {binary_dst}").run()?;

    let config_src = project.join("backend/conf/config.toml");
    let config_dst = dist_dir.join("conf/config.toml");
    if config_src.exists() {
        cmd!(sh, "cp {config_src} {config_dst}").run()?;
    }

    Ok(())
}

/// Run all tests
fn test(sh: &Shell) -> Result<()> {
    println!("🧪 Running tests...");

    let _dir = sh.push_dir(project_root());
    cmd!(sh, "cargo test --workspace").run().context("Tests failed")?;

    println!("✅ All tests passed!");
    Ok(())
}

/// Format code
fn format(sh: &Shell, check: bool) -> Result<()> {
    println!("🎨 Formatting Rust code...");

    let _dir = sh.push_dir(project_root());
    if check {
        cmd!(sh, "cargo fmt --all -- --check").run().context("Rust code is not formatted")?;
        println!("✅ Rust code is properly formatted");
    } else {
        cmd!(sh, "cargo fmt --all").run().context("Failed to format Rust code")?;
        println!("✅ Rust code formatted");
    }

    Ok(())
}

/// Run clippy checks
fn clippy(sh: &Shell) -> Result<()> {
    let _dir = sh.push_dir(project_root());

    cmd!(sh, "cargo clippy --workspace --all-targets -- --deny warnings --allow clippy::uninlined-format-args")
        .run()
        .context("Clippy checks failed")?;

    Ok(())
}

/// Run the server with extra arguments
fn run(sh: &Shell, args: &[String]) -> Result<()> {
    println!("▶️  Starting Name Bridge...");

    let _dir = sh.push_dir(project_root().join("backend"));
    let args = args.iter().skip_while(|a| a.as_str() == "--");
    cmd!(sh, "cargo run -p {BINARY} -- {args...}").run().context("Failed to run application")?;

    Ok(())
}

/// Clean build artifacts
fn clean(sh: &Shell) -> Result<()> {
    println!("🧹 Cleaning build artifacts...");

    let project = project_root();
    let _dir = sh.push_dir(&project);
    cmd!(sh, "cargo clean").run()?;

    let build_dir = project.join("build");
    if build_dir.exists() {
        cmd!(sh, "rm -rf {build_dir}").run()?;
    }

    println!("✅ Clean complete!");
    Ok(())
}

/// Run all CI checks (format + clippy + build + test)
fn ci(sh: &Shell) -> Result<()> {
    println!("🔄 Running CI pipeline...");

    println!("📝 [1/4] Checking code format...");
    format(sh, true)?;

    println!("🔍 [2/4] Running clippy checks...");
    clippy(sh)?;

    println!("🔨 [3/4] Building project...");
    build(sh, true)?;

    println!("🧪 [4/4] Running tests...");
    test(sh)?;

    println!("🎉 CI pipeline completed successfully!");
    Ok(())
}

/// Create distribution package (tar.gz)
fn dist(sh: &Shell) -> Result<()> {
    println!("📦 Creating distribution package...");

    build(sh, true)?;

    let dist_dir = project_root().join("build/dist");
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let package_name = format!("{}-{}.tar.gz", BINARY, timestamp);
    let package_path = dist_dir.join(&package_name);

    let _dir = sh.push_dir(&dist_dir);
    cmd!(sh, "tar czf {package_name} bin conf logs").run().context("Failed to create tarball")?;

    println!("✅ Distribution package created!");
    println!("   Location: {}", package_path.display());
    Ok(())
}

/// Get project root directory
fn project_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir.parent().unwrap_or(manifest_dir).to_path_buf()
}
