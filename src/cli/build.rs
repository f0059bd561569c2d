//! Build script writing the current Git revision for `--version`.

use std::env;
use std::error::Error;
use std::fs;
use std::path::Path;
use std::process::Command;
use std::str;


/// File in the $OUT_DIR where the current revision is written.
const REVISION_FILE: &str = "revision";


fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-changed=../../.git/HEAD");

    // The file has to exist even without Git, since it's include_str!()'d.
    let out_dir = env::var("OUT_DIR")?;
    let revision = git_head_sha().unwrap_or_else(|e| {
        println!("cargo:warning=Failed to obtain current Git SHA: {}", e);
        String::new()
    });
    fs::write(Path::new(&out_dir).join(REVISION_FILE), revision)?;
    Ok(())
}

fn git_head_sha() -> Result<String, Box<dyn Error>> {
    let output = Command::new("git")
        .args(&["rev-parse", "--short", "HEAD"])
        .output()?;
    if !output.status.success() {
        return Err("git rev-parse failed".into());
    }
    let sha = str::from_utf8(&output.stdout)?.trim().to_owned();
    Ok(sha)
}
