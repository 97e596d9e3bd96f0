//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::{Component, Path};

use bridgegen_ast::Document;

use crate::backend::{Artifact, ArtifactWriter, GenerateError, Generator, GeneratorConfig};

use super::{CliError, CliResult, ExitCode};

/// Maximum input document size (100 MB)
///
/// Larger documents are rejected to prevent out-of-memory conditions
/// while deserializing.
const MAX_SOURCE_SIZE: u64 = 100 * 1024 * 1024;

// ============================================================================
// Input and output helpers
// ============================================================================

/// Validate the output directory to prevent path traversal attacks.
///
/// This function ensures:
/// - The path doesn't contain `..` components
/// - Absolute paths are allowed but logged
fn validate_output_dir(out_dir: &Path) -> CliResult<()> {
    if out_dir.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(CliError::failure(format!(
            "Output directory '{}' contains path traversal (..)",
            out_dir.display()
        )));
    }

    if out_dir.is_absolute() {
        tracing::warn!(
            "Using absolute output path: {}. Consider using a relative path.",
            out_dir.display()
        );
    }

    Ok(())
}

/// Validate a header or source directory, which is joined below the output directory.
///
/// Rejects `..` components and absolute paths, either of which would place artifacts outside the output directory.
fn validate_artifact_dir(flag: &str, dir: &Path) -> CliResult<()> {
    if dir.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(CliError::failure(format!(
            "{} '{}' contains path traversal (..)",
            flag,
            dir.display()
        )));
    }
    if dir.has_root() {
        return Err(CliError::failure(format!(
            "{} '{}' must be relative to the output directory",
            flag,
            dir.display()
        )));
    }
    Ok(())
}

/// Read and deserialize a resolved document.
///
/// ## Errors
///
/// Returns an error if:
/// - The file cannot be read (I/O error)
/// - The file exceeds `MAX_SOURCE_SIZE` (100 MB)
/// - The contents are not a valid document
pub fn read_document(path: &Path) -> CliResult<Document> {
    let metadata = fs::metadata(path)
        .map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", path.display(), e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Input file '{}' is too large ({} bytes, max {} bytes)",
            path.display(),
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    let text = fs::read_to_string(path)
        .map_err(|e| CliError::failure(format!("Error reading file '{}': {}", path.display(), e)))?;
    serde_json::from_str(&text)
        .map_err(|e| CliError::failure(format!("Invalid document '{}': {}", path.display(), e)))
}

/// Render a generation error with its diagnostic code and help.
fn report(err: GenerateError) -> CliError {
    CliError::failure(format!("{:?}", miette::Report::new(err)))
}

fn run_generator(input: &Path, config: &GeneratorConfig) -> CliResult<Vec<Artifact>> {
    let doc = read_document(input)?;
    Generator::new(config.clone()).generate(&doc).map_err(report)
}

// ============================================================================
// Commands
// ============================================================================

/// Generate artifacts for a document and write them below `out_dir`.
pub fn generate(
    input: &Path,
    out_dir: &Path,
    config: &GeneratorConfig,
    list_out: Option<&Path>,
    dry_run: bool,
) -> CliResult<ExitCode> {
    validate_output_dir(out_dir)?;
    validate_artifact_dir("--header-dir", &config.header_out)?;
    validate_artifact_dir("--source-dir", &config.source_out)?;
    let artifacts = run_generator(input, config)?;
    let writer = ArtifactWriter::new(out_dir);

    if dry_run {
        for artifact in &artifacts {
            println!("{}", writer.root().join(&artifact.path).display());
        }
        return Ok(ExitCode::SUCCESS);
    }

    let summary = writer
        .write_all(&artifacts)
        .map_err(|e| CliError::failure(format!("Error writing output: {}", e)))?;

    if let Some(list) = list_out {
        let paths: Vec<_> = artifacts.iter().map(|a| &a.path).collect();
        writer
            .write_list(list, paths)
            .map_err(|e| CliError::failure(format!("Error writing file list: {}", e)))?;
    }

    println!(
        "✓ Generated {} files in {} ({} unchanged)",
        artifacts.len(),
        out_dir.display(),
        summary.unchanged.len()
    );
    Ok(ExitCode::SUCCESS)
}

/// Validate a document by generating in memory.
pub fn check(input: &Path, config: &GeneratorConfig) -> CliResult<ExitCode> {
    let artifacts = run_generator(input, config)?;
    println!("✓ Check passed: {} artifacts", artifacts.len());
    Ok(ExitCode::SUCCESS)
}
