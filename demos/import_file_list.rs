//! Stage a model and its side-car files from disk, import, and print the JSON result
//!
//! Usage: cargo run --example import_file_list -- <model> [side-car files...]
//!
//! Each argument is either a path, staged under its file name, or
//! `name=path` to stage under a nested name such as `textures/albedo.png`.
//! The importer is picked from the model's extension; formats without a
//! backend are reported as `unsupported_format`.

use asset_stage::{import_staged, stage_file, stage_file_as, FileList, ImportConfig, ImportResult};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        anyhow::bail!("usage: import_file_list <model> [side-car files...] (path or name=path)");
    }

    let mut files = FileList::new();
    for arg in &args {
        match arg.split_once('=') {
            Some((name, path)) => stage_file_as(&mut files, path, name)?,
            None => stage_file(&mut files, arg)?,
        }
    }
    println!(
        "asset_stage v{}: staged {} files ({} bytes)",
        asset_stage::VERSION,
        files.count(),
        files.total_bytes()
    );

    let result = import_staged(&files, &ImportConfig::default());

    // The JSON form is what a host would hand across a language boundary
    let json = result.to_json_pretty()?;
    let result = ImportResult::from_json(&json)?;
    println!("{json}");

    if let Some(failure) = result.failure() {
        anyhow::bail!("import failed: {}", failure.message);
    }
    Ok(())
}
