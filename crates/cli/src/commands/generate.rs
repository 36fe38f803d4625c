//! `clientgen generate`: write or check the client module.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use clap::Args;
use clientgen_core::{DescriptorDocument, GeneratorConfig, generate_client};
use similar::{ChangeTag, TextDiff};
use tracing::{debug, info};

use super::run_inner;

/// Arguments for `clientgen generate`.
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Operation descriptor document (.json, .yaml or .yml)
    #[arg(long, short, value_name = "FILE")]
    pub input: PathBuf,
    /// Generator config (TOML, `[generator]` table)
    #[arg(long, short, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Write the module here instead of stdout
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<PathBuf>,
    /// Emit synchronous methods
    #[arg(long)]
    pub sync: bool,
    /// Name of the generated class
    #[arg(long, value_name = "NAME")]
    pub class_name: Option<String>,
    /// Import ApiClient/QueryParameters from this module
    #[arg(long, value_name = "MODULE")]
    pub runtime_module: Option<String>,
    /// Fail without writing when any operation could not be generated
    #[arg(long)]
    pub strict: bool,
    /// Compare against the existing output instead of writing it
    #[arg(long, requires = "output")]
    pub check: bool,
}

/// Run `generate` and return the exit code.
pub fn run(args: &GenerateArgs) -> i32 {
    run_inner(|| generate(args))
}

fn resolve_config(args: &GenerateArgs) -> Result<GeneratorConfig, String> {
    let mut config = match &args.config {
        Some(path) => GeneratorConfig::load(path).map_err(|e| e.to_string())?,
        None => GeneratorConfig::default(),
    };
    if args.sync {
        config.sync = true;
    }
    if let Some(name) = &args.class_name {
        config.class_name = name.clone();
    }
    if let Some(module) = &args.runtime_module {
        config.runtime_module = Some(module.clone());
    }
    Ok(config)
}

fn generate(args: &GenerateArgs) -> Result<(), String> {
    let config = resolve_config(args)?;
    debug!(?config, "resolved generator config");

    let operations = DescriptorDocument::load(&args.input)
        .map_err(|e| e.to_string())?
        .into_operations();
    let output = generate_client(&operations, &config);

    if args.strict && !output.is_complete() {
        return Err(format!(
            "refusing to write: {} of {} operation(s) failed",
            output.failures.len(),
            operations.len()
        ));
    }

    let rendered = output.render();
    match &args.output {
        Some(path) if args.check => check(path, &rendered),
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)
                    .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
            }
            fs::write(path, &rendered)
                .map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
            info!(path = %path.display(), "client written");
            println!("wrote {}", path.display());
            Ok(())
        }
        None => {
            print!("{rendered}");
            Ok(())
        }
    }
}

fn check(path: &Path, rendered: &str) -> Result<(), String> {
    let existing = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
        Err(e) => return Err(format!("Failed to read {}: {e}", path.display())),
    };
    match unified_diff(&path.display().to_string(), &existing, rendered) {
        None => {
            println!("{} is up to date", path.display());
            Ok(())
        }
        Some(diff) => Err(format!("{diff}{} is out of date", path.display())),
    }
}

/// Unified diff of `current` -> `new`, or `None` when they are equal.
pub fn unified_diff(name: &str, current: &str, new: &str) -> Option<String> {
    if current == new {
        return None;
    }

    let diff = TextDiff::from_lines(current, new);
    let mut output = String::new();
    output.push_str(&format!("--- {name} (current)\n"));
    output.push_str(&format!("+++ {name} (generated)\n"));

    for (idx, group) in diff.grouped_ops(3).iter().enumerate() {
        if idx > 0 {
            output.push_str("...\n");
        }
        for op in group {
            for change in diff.iter_changes(op) {
                let sign = match change.tag() {
                    ChangeTag::Delete => "-",
                    ChangeTag::Insert => "+",
                    ChangeTag::Equal => " ",
                };
                output.push_str(sign);
                output.push_str(change.value());
                if change.missing_newline() {
                    output.push('\n');
                }
            }
        }
    }

    Some(output)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn args(input: PathBuf) -> GenerateArgs {
        GenerateArgs {
            input,
            config: None,
            output: None,
            sync: false,
            class_name: None,
            runtime_module: None,
            strict: false,
            check: false,
        }
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("clientgen.toml");
        fs::write(
            &config_path,
            "[generator]\nclass_name = \"FromFile\"\nruntime_module = \"./a\"\n",
        )
        .unwrap();

        let mut args = args(dir.path().join("ops.json"));
        args.config = Some(config_path);
        args.class_name = Some("FromFlag".into());
        args.sync = true;

        let config = resolve_config(&args).unwrap();
        assert_eq!(config.class_name, "FromFlag");
        assert_eq!(config.runtime_module.as_deref(), Some("./a"));
        assert!(config.sync);
    }

    #[test]
    fn test_check_missing_output_is_stale() {
        let dir = tempfile::tempdir().unwrap();
        let err = check(&dir.path().join("client.ts"), "export class Client {}\n").unwrap_err();
        assert!(err.contains("+export class Client {}"));
        assert!(err.ends_with("is out of date"));
    }

    #[test]
    fn test_check_unreadable_output_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = check(dir.path(), "export class Client {}\n").unwrap_err();
        assert!(err.starts_with("Failed to read"), "{err}");
        assert!(!err.contains("out of date"));
    }

    #[test]
    fn test_unified_diff() {
        assert!(unified_diff("a.ts", "same\n", "same\n").is_none());
        let diff = unified_diff("a.ts", "one\ntwo\n", "one\nthree\n").unwrap();
        assert!(diff.starts_with("--- a.ts (current)\n+++ a.ts (generated)\n"));
        assert!(diff.contains("-two\n"));
        assert!(diff.contains("+three\n"));
        assert!(diff.contains(" one\n"));
    }
}
