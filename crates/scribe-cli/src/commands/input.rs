//! Source text and language loading shared by the parsing commands.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use scribe_langs::Lang;
use scribe_lib::Language;

use super::lang_resolver::require_lang;

/// Where the source comes from and which language parses it.
#[derive(Debug, Default)]
pub struct InputArgs {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub lang: Option<String>,
    pub grammar: Option<PathBuf>,
}

/// Loaded source text paired with its language.
pub struct Input {
    /// Display name used in diagnostics.
    pub name: String,
    pub text: String,
    pub lang: Lang,
}

/// Load source and language, exiting with an error message on failure.
pub fn load_input(args: InputArgs, command: &str) -> Input {
    let (name, text) =
        match load_source(args.source_path.as_deref(), args.source_text.as_deref()) {
            Ok(loaded) => loaded,
            Err(msg) => {
                eprintln!("error: {}", msg);
                std::process::exit(1);
            }
        };

    let lang = match &args.grammar {
        Some(path) => load_grammar(path).unwrap_or_else(|msg| {
            eprintln!("error: {}", msg);
            std::process::exit(1);
        }),
        None => require_lang(args.lang.as_deref(), args.source_path.as_deref(), command),
    };

    tracing::debug!(source = %name, bytes = text.len(), language = lang.name(), "input loaded");
    Input { name, text, lang }
}

/// Returns the display name and the text. `-` reads stdin.
pub fn load_source(path: Option<&Path>, text: Option<&str>) -> Result<(String, String), String> {
    if let Some(text) = text {
        return Ok(("<source>".to_owned(), text.to_owned()));
    }

    let Some(path) = path else {
        return Err("source is required (pass a file, - for stdin, or -s <TEXT>)".to_owned());
    };

    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("failed to read stdin: {}", e))?;
        return Ok(("<stdin>".to_owned(), buf));
    }

    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => format!("file not found: {}", path.display()),
        _ => format!("failed to read {}: {}", path.display(), e),
    })?;
    Ok((path.display().to_string(), text))
}

/// Build a language from a JSON definition file.
pub fn load_grammar(path: &Path) -> Result<Lang, String> {
    let json = fs::read_to_string(path)
        .map_err(|e| format!("failed to read grammar {}: {}", path.display(), e))?;
    let language = Language::from_json(&json)
        .map_err(|e| format!("invalid grammar {}: {}", path.display(), e))?;

    tracing::info!(
        path = %path.display(),
        language = language.name(),
        patterns = language.reducer().patterns().count(),
        "grammar loaded"
    );
    Ok(Arc::new(language))
}
