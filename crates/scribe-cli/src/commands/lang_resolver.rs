use std::path::Path;

use scribe_langs::Lang;

/// Resolve language from explicit flag or infer from the source file extension.
pub fn resolve_lang(explicit: Option<&str>, source_path: Option<&Path>) -> Option<Lang> {
    if let Some(name) = explicit {
        return scribe_langs::from_name(name);
    }

    if let Some(path) = source_path
        && path.as_os_str() != "-"
        && let Some(ext) = path.extension().and_then(|e| e.to_str())
    {
        return scribe_langs::from_ext(ext);
    }

    None
}

/// Resolve language, returning an error message if unknown.
pub fn resolve_lang_required(lang_name: &str) -> Result<Lang, String> {
    scribe_langs::from_name(lang_name).ok_or_else(|| format!("unknown language: '{}'", lang_name))
}

/// Resolve language with user-friendly error handling.
/// Exits with error message if language cannot be determined.
pub fn require_lang(explicit: Option<&str>, source_path: Option<&Path>, command: &str) -> Lang {
    if let Some(lang_name) = explicit {
        match resolve_lang_required(lang_name) {
            Ok(l) => return l,
            Err(msg) => {
                eprintln!("error: {}", msg);
                if let Some(suggestion) = suggest_language(lang_name) {
                    eprintln!();
                    eprintln!("Did you mean '{}'?", suggestion);
                }
                eprintln!();
                eprintln!("Run 'scribe langs' for the full list.");
                std::process::exit(1);
            }
        }
    }

    if let Some(l) = resolve_lang(None, source_path) {
        return l;
    }

    match source_path.and_then(|p| p.extension()).and_then(|e| e.to_str()) {
        Some(ext) => eprintln!("error: cannot infer language from extension '.{}'", ext),
        None => eprintln!("error: language is required for {}", command),
    }
    eprintln!();
    eprintln!("hint: use -l <language> or -g <grammar.json>");
    std::process::exit(1);
}

/// Suggest similar language names for typos.
pub fn suggest_language(input: &str) -> Option<String> {
    let input_lower = input.to_lowercase();
    scribe_langs::all()
        .into_iter()
        .filter(|lang| levenshtein(lang.name(), &input_lower) <= 2)
        .min_by_key(|lang| levenshtein(lang.name(), &input_lower))
        .map(|lang| lang.name().to_string())
}

pub(crate) fn levenshtein(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let (m, n) = (a_chars.len(), b_chars.len());
    if m == 0 || n == 0 {
        return m.max(n);
    }

    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0; n + 1];

    for (i, &ac) in a_chars.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_chars.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}
