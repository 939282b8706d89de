use std::sync::{Arc, LazyLock};

use scribe_lib::Language;

use crate::Lang;

macro_rules! define_langs {
    (
        $(
            $fn_name:ident => {
                feature: $feature:literal,
                grammar: $grammar:literal,
                names: [$($alias:literal),* $(,)?] $(,)?
            }
        ),* $(,)?
    ) => {
        $(
            #[cfg(feature = $feature)]
            pub fn $fn_name() -> Lang {
                static LANG: LazyLock<Lang> = LazyLock::new(|| {
                    let json = include_str!(concat!("../grammars/", $grammar));
                    let language = Language::from_json(json)
                        .unwrap_or_else(|e| panic!("bundled grammar `{}` is invalid: {e}", $grammar));
                    Arc::new(language)
                });
                Arc::clone(&LANG)
            }
        )*

        /// Looks a language up by name or alias, ignoring case.
        pub fn from_name(s: &str) -> Option<Lang> {
            match s.to_ascii_lowercase().as_str() {
                $(
                    #[cfg(feature = $feature)]
                    $($alias)|* => Some($fn_name()),
                )*
                _ => None,
            }
        }

        /// Looks a language up by file extension (without the dot), ignoring case.
        pub fn from_ext(ext: &str) -> Option<Lang> {
            let ext = ext.to_ascii_lowercase();
            all()
                .into_iter()
                .find(|lang| lang.extensions().iter().any(|e| *e == ext))
        }

        pub fn all() -> Vec<Lang> {
            vec![
                $(
                    #[cfg(feature = $feature)]
                    $fn_name(),
                )*
            ]
        }
    };
}

define_langs! {
    ini => {
        feature: "lang-ini",
        grammar: "ini.json",
        names: ["ini", "cfg", "conf"],
    },
    json => {
        feature: "lang-json",
        grammar: "json.json",
        names: ["json"],
    },
    sql => {
        feature: "lang-sql",
        grammar: "sql.json",
        names: ["sql"],
    },
}
