//! Кладёт config.toml и SQL-миграции рядом с собранным бинарником,
//! где их ищут `shared::config` и `migration_runner`.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

fn copy_dir(src: &Path, dst: &Path) -> io::Result<usize> {
    fs::create_dir_all(dst)?;
    let mut copied = 0;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "sql") {
            fs::copy(&path, dst.join(entry.file_name()))?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// target/<profile> по OUT_DIR вида target/<profile>/build/backend-xxx/out
fn target_dir() -> Option<PathBuf> {
    let out_dir = PathBuf::from(env::var("OUT_DIR").ok()?);
    let profile = env::var("PROFILE").ok()?;
    out_dir
        .ancestors()
        .find(|p| p.ends_with(&profile))
        .map(Path::to_path_buf)
}

fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");
    println!("cargo:rerun-if-changed=../../migrations");

    let Some(target_dir) = target_dir() else {
        println!("cargo:warning=target profile directory not found, nothing copied");
        return;
    };
    let workspace_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");

    let source_config = workspace_root.join("config.toml");
    if source_config.exists() {
        if let Err(e) = fs::copy(&source_config, target_dir.join("config.toml")) {
            println!("cargo:warning=failed to copy config.toml: {}", e);
        }
    } else {
        println!("cargo:warning=config.toml not found, embedded defaults will be used");
    }

    match copy_dir(
        &workspace_root.join("migrations"),
        &target_dir.join("migrations"),
    ) {
        Ok(n) => println!("cargo:warning=copied {} migration(s)", n),
        Err(e) => println!("cargo:warning=failed to copy migrations: {}", e),
    }
}
