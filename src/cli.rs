//! Minimal CLI: infer → (dart | classes), plus the converter module
use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use once_cell::sync::Lazy;
use rayon::prelude::*;
use regex::Regex;
use serde_json::{Map, Value};

use json_freezed::helpers::DEFAULT_CONVERTERS_PATH;
use json_freezed::naming::{to_pascal_case, to_snake_case};
use json_freezed::{FieldOverrides, GenerateOptions};

use crate::project;

/// Root class names accepted from the command line or derived from file names.
static CLASS_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z][A-Za-z0-9]*$").expect("valid regex"));

/// Import used when printing to stdout without `--import`.
const STDOUT_CONVERTERS_IMPORT: &str = "json_converters.dart";

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// infer immutable Dart models (freezed + json_serializable) from JSON samples
#[derive(Parser, Debug)]
#[command(name = "json-freezed", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// infer and emit a Dart model file per input
    Dart(DartOut),
    /// infer and print the class records as JSON (debug view)
    Classes(ClassesOut),
    /// write the converter module referenced by generated models
    Converters(ConvertersOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// JSON Pointer to select a subnode in each document (e.g. /data/items/0)
    #[arg(long)]
    json_pointer: Option<String>,

    /// One or more inputs. May be literal paths, quoted glob patterns, or '-' for stdin
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug, Clone)]
struct GenerationSettings {
    /// options file (JSON, camelCase keys); flags below take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// per-field overrides for root-level keys (JSON array)
    #[arg(long)]
    overrides: Option<PathBuf>,

    /// make every field nullable
    #[arg(long, default_value_t = false)]
    nullable: bool,

    /// emit @Default(...) values for primitive and list fields
    #[arg(long, default_value_t = false)]
    defaults: bool,

    #[arg(long)]
    default_string: Option<String>,

    #[arg(long)]
    default_int: Option<String>,

    #[arg(long)]
    default_float: Option<String>,

    #[arg(long)]
    default_bool: Option<String>,

    #[arg(long)]
    default_list: Option<String>,

    /// maximum object/array nesting depth
    #[arg(long)]
    max_depth: Option<usize>,
}

#[derive(clap::Parser, Debug)]
struct DartOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    generation: GenerationSettings,

    /// root class name (single input only; default: PascalCase file stem)
    #[arg(long)]
    name: Option<String>,

    /// output .dart file (single input only; stdout if neither --out nor --out-dir)
    #[arg(short, long, conflicts_with = "out_dir")]
    out: Option<PathBuf>,

    /// output directory; files are named <snake_case_root>.dart
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// converter module location (default: <project root>/lib/core/json_converters.dart)
    #[arg(long)]
    converters: Option<PathBuf>,

    /// import string for the converter module, used verbatim
    #[arg(long)]
    import: Option<String>,
}

#[derive(clap::Parser, Debug)]
struct ClassesOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    generation: GenerationSettings,

    /// root class name (default: PascalCase file stem)
    #[arg(long)]
    name: Option<String>,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct ConvertersOut {
    /// output .dart file
    #[arg(short, long, default_value = DEFAULT_CONVERTERS_PATH)]
    out: PathBuf,

    /// overwrite an existing file
    #[arg(long, default_value_t = false)]
    force: bool,
}

/// One input document with an object root.
#[derive(Debug)]
struct Document {
    source: String,
    root: Map<String, Value>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_documents(&self) -> Result<Vec<Document>> {
        let mut documents = Vec::new();
        for source in resolve_file_path_patterns(&self.input)? {
            let text = if source == "-" {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .context("failed to read stdin")?;
                buf
            } else {
                std::fs::read_to_string(&source)
                    .with_context(|| format!("failed to read source file {source}"))?
            };
            let json_value = serde_json::from_str::<Value>(&text)
                .with_context(|| format!("failed to parse JSON source file ({source})"))?;
            let json_value = match self.json_pointer.as_deref() {
                None => json_value,
                Some(pointer) => json_value
                    .pointer(pointer)
                    .cloned()
                    .with_context(|| format!("JSON pointer {pointer} matched nothing in {source}"))?,
            };
            let root = match json_value {
                Value::Object(map) => map,
                other => bail!("{source}: root must be a JSON object, found {}", kind_of(&other)),
            };
            documents.push(Document { source, root });
        }
        Ok(documents)
    }
}

impl GenerationSettings {
    fn options(&self) -> Result<GenerateOptions> {
        let mut options = match &self.config {
            Some(path) => GenerateOptions::from_file(path)?,
            None => GenerateOptions::default(),
        };
        if self.nullable {
            options.make_nullable = true;
        }
        if self.defaults {
            options.use_default_values = true;
        }
        let literals = &mut options.defaults;
        for (flag, slot) in [
            (&self.default_string, &mut literals.string),
            (&self.default_int, &mut literals.int),
            (&self.default_float, &mut literals.float),
            (&self.default_bool, &mut literals.bool),
            (&self.default_list, &mut literals.list),
        ] {
            if let Some(value) = flag {
                *slot = value.clone();
            }
        }
        if let Some(max_depth) = self.max_depth {
            options.max_depth = max_depth;
        }
        Ok(options)
    }

    fn overrides(&self) -> Result<FieldOverrides> {
        match &self.overrides {
            Some(path) => Ok(FieldOverrides::from_file(path)?),
            None => Ok(FieldOverrides::new()),
        }
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Dart(target) => target.run(),
            Command::Classes(target) => target.run(),
            Command::Converters(target) => {
                if project::ensure_converters(&target.out, target.force)? {
                    eprintln!("{} {}", "wrote".green().bold(), target.out.display());
                } else {
                    eprintln!("{} {} (use --force to overwrite)", "exists".yellow().bold(), target.out.display());
                }
                Ok(())
            }
        }
    }
}

impl DartOut {
    fn run(&self) -> Result<()> {
        let documents = self.input_settings.load_documents()?;
        let options = self.generation.options()?;
        let overrides = self.generation.overrides()?;
        let multiple = documents.len() > 1;
        if multiple && (self.name.is_some() || self.out.is_some()) {
            bail!("--name and --out take a single input; use --out-dir for several");
        }

        for doc in &documents {
            warn_unmatched_overrides(&overrides, doc);
        }

        let named = documents
            .iter()
            .map(|doc| Ok((root_name(self.name.as_deref(), &doc.source)?, doc)))
            .collect::<Result<Vec<_>>>()?;

        // stdout
        let Some(out_dir) = self.output_dir() else {
            if multiple {
                bail!("several inputs need --out-dir");
            }
            let import = self.import.as_deref().unwrap_or(STDOUT_CONVERTERS_IMPORT);
            for (name, doc) in &named {
                let dart_src = json_freezed::generate(name, &doc.root, &options, &overrides, import)?;
                print!("{dart_src}");
            }
            return Ok(());
        };

        let mut seen = HashSet::new();
        let targets = named
            .into_iter()
            .map(|(name, doc)| {
                let path = match &self.out {
                    Some(out) => out.clone(),
                    None => out_dir.join(format!("{}.dart", to_snake_case(&name))),
                };
                if !seen.insert(path.clone()) {
                    bail!("two inputs map to {}; pass distinct file names", path.display());
                }
                Ok((name, doc, path))
            })
            .collect::<Result<Vec<_>>>()?;

        let converters = match &self.converters {
            Some(path) => path.clone(),
            None => project::find_project_root(&out_dir)
                .unwrap_or_else(|| out_dir.clone())
                .join(DEFAULT_CONVERTERS_PATH),
        };
        let import = match &self.import {
            Some(import) => import.clone(),
            None => project::relative_import(&out_dir, &converters)?,
        };

        targets
            .par_iter()
            .map(|(name, doc, path)| {
                let dart_src = json_freezed::generate(name, &doc.root, &options, &overrides, &import)
                    .with_context(|| format!("failed to generate {name} from {}", doc.source))?;
                project::write_file(path, &dart_src)?;
                tracing::info!(class = %name, path = %path.display(), "wrote model");
                eprintln!("{} {}", "wrote".green().bold(), path.display());
                Ok(())
            })
            .collect::<Result<Vec<()>>>()?;

        if project::ensure_converters(&converters, false)? {
            eprintln!("{} {}", "wrote".green().bold(), converters.display());
        }
        Ok(())
    }

    /// Directory the generated files land in, or `None` for stdout.
    fn output_dir(&self) -> Option<PathBuf> {
        if let Some(out) = &self.out {
            let parent = out.parent().filter(|p| !p.as_os_str().is_empty());
            return Some(parent.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from(".")));
        }
        self.out_dir.clone()
    }
}

impl ClassesOut {
    fn run(&self) -> Result<()> {
        let documents = self.input_settings.load_documents()?;
        let [doc] = documents.as_slice() else {
            bail!("classes takes exactly one input, got {}", documents.len());
        };
        let options = self.generation.options()?;
        let overrides = self.generation.overrides()?;
        warn_unmatched_overrides(&overrides, doc);
        let name = root_name(self.name.as_deref(), &doc.source)?;
        let classes = json_freezed::infer_classes(&name, &doc.root, &options, &overrides)?;
        let json_src = serde_json::to_string_pretty(&classes)?;
        match &self.out {
            Some(out) => project::write_file(out, &json_src)?,
            None => println!("{json_src}"),
        }
        Ok(())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

/// Explicit `--name`, or the PascalCase stem of the source file.
fn root_name(explicit: Option<&str>, source: &str) -> Result<String> {
    let name = match explicit {
        Some(name) => name.to_string(),
        None if source == "-" => bail!("--name is required when reading stdin"),
        None => {
            let stem = Path::new(source)
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            to_pascal_case(&stem)
        }
    };
    if !CLASS_NAME.is_match(&name) {
        bail!("invalid class name {name:?}: expected PascalCase letters and digits");
    }
    Ok(name)
}

/// Override keys absent from the document root.
fn unmatched_overrides<'o>(overrides: &'o FieldOverrides, doc: &Document) -> Vec<&'o str> {
    overrides
        .iter()
        .map(|o| o.key.as_str())
        .filter(|key| !doc.root.contains_key(*key))
        .collect()
}

fn warn_unmatched_overrides(overrides: &FieldOverrides, doc: &Document) {
    for key in unmatched_overrides(overrides, doc) {
        tracing::warn!(key, source = %doc.source, "override matches no root key");
    }
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<String>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'['))
    }

    let mut out = Vec::<String>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern).with_context(|| format!("bad glob pattern: {pattern}"))? {
                let path = entry?;
                matched_any = true;
                out.push(path.to_string_lossy().into_owned());
            }
            if !matched_any {
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(pattern.to_string());
        }
    }

    Ok(out)
}
