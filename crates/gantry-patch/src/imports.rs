//! Import injection
//!
//! Adds import statements directly below the package declaration of a source
//! file, skipping any name the file already mentions.

use std::fmt;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::document::{Anchor, Document};

static JAVA_PACKAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^package .*;$").expect("invalid Java package regex"));

static KOTLIN_PACKAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^package \S+$").expect("invalid Kotlin package regex"));

/// Language of a native project source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceLanguage {
    Java,
    Kotlin,
    ObjectiveC,
    Swift,
    Ruby,
    Unknown,
}

impl SourceLanguage {
    /// Detect the language from a file name. `Podfile` has no extension but
    /// is Ruby.
    pub fn from_path(path: &Path) -> Self {
        if path.file_name().is_some_and(|n| n == "Podfile") {
            return Self::Ruby;
        }
        match path.extension().and_then(|e| e.to_str()) {
            Some("java") => Self::Java,
            Some("kt") => Self::Kotlin,
            Some("m") | Some("mm") | Some("h") => Self::ObjectiveC,
            Some("swift") => Self::Swift,
            Some("rb") => Self::Ruby,
            _ => Self::Unknown,
        }
    }

    /// Regex matching the package declaration line, for languages that have one
    fn package_declaration(&self) -> Option<&'static Regex> {
        match self {
            Self::Java => Some(&JAVA_PACKAGE),
            Self::Kotlin => Some(&KOTLIN_PACKAGE),
            _ => None,
        }
    }

    /// Import statement for `name`, for languages that use package imports
    pub fn import_statement(&self, name: &str) -> Option<String> {
        match self {
            Self::Java => Some(format!("import {};", name)),
            Self::Kotlin => Some(format!("import {}", name)),
            _ => None,
        }
    }
}

impl fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Java => "Java",
            Self::Kotlin => "Kotlin",
            Self::ObjectiveC => "Objective-C",
            Self::Swift => "Swift",
            Self::Ruby => "Ruby",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Insert an import for each of `names` the source does not mention yet,
/// directly after the package declaration and in the given order.
///
/// Sources without a package declaration, and languages without package
/// imports, come back unchanged.
pub fn inject_imports<S: AsRef<str>>(source: &str, language: SourceLanguage, names: &[S]) -> String {
    let Some(package) = language.package_declaration() else {
        return source.to_string();
    };

    let statements: Vec<String> = names
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| !source.contains(name))
        .filter_map(|name| language.import_statement(name))
        .collect();

    let mut doc = Document::parse(source);
    if doc
        .insert_lines(&Anchor::Pattern(package.clone()), 1, &statements)
        .changed()
    {
        doc.to_string()
    } else {
        source.to_string()
    }
}
