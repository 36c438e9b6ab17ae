//! Lexical/structural validation of submitted strategy source text.
//!
//! This is the first of two defense layers (the second is the bytecode and
//! storage-layout checks in `compiler`). Source-level checks alone are not
//! sufficient — a submitter can synthesize unreachable code or exploit
//! compiler quirks that survive these patterns — but they catch the bulk of
//! obviously hostile submissions cheaply, before a `solc` invocation.

use once_cell::sync::Lazy;
use regex::Regex;

/// Files a strategy submission is allowed to import, by basename.
const WHITELISTED_IMPORTS: &[&str] = &["AMMStrategyBase.sol", "IAMMStrategy.sol"];

const REQUIRED_BASE: &str = "AMMStrategyBase";

static EXTERNAL_CALL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.(call|delegatecall|staticcall|send|transfer)\s*\(").unwrap());

static ASSEMBLY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bassembly\s*(\([^)]*\))?\s*\{").unwrap());

static IMPORT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"import\s+(?:\{[^}]*\}\s+from\s+)?["']([^"']+)["']"#).unwrap());

static RESERVED_DECL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(contract|interface|library|abstract\s+contract)\s+(AMMStrategyBase|IAMMStrategy)\b").unwrap()
});

static INHERITANCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bcontract\s+Strategy\s+is\s+([A-Za-z0-9_,\s]+)").unwrap());

/// Outcome of validating a submission's source text.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    fn ok() -> Self {
        Self { valid: true, errors: Vec::new() }
    }
}

/// Validates Solidity strategy source text before it reaches the compiler.
#[derive(Debug, Default)]
pub struct SolidityValidator;

impl SolidityValidator {
    pub fn new() -> Self {
        Self
    }

    /// Run every check and collect all violations — never stops at the first.
    pub fn validate(&self, source: &str) -> ValidationResult {
        let stripped = strip_comments(source);
        let mut errors = Vec::new();

        if let Some(m) = EXTERNAL_CALL_RE.find(&stripped) {
            errors.push(format!("External calls are not allowed (found `{}`)", m.as_str()));
        }

        if ASSEMBLY_RE.is_match(&stripped) {
            errors.push("Inline assembly is not allowed".to_string());
        }

        errors.extend(self.check_imports(&stripped));
        errors.extend(self.check_reserved_identifiers(&stripped));
        errors.extend(self.check_inheritance(&stripped));

        if errors.is_empty() {
            ValidationResult::ok()
        } else {
            ValidationResult { valid: false, errors }
        }
    }

    fn check_imports(&self, stripped: &str) -> Vec<String> {
        IMPORT_RE
            .captures_iter(stripped)
            .filter_map(|cap| {
                let path = cap.get(1)?.as_str();
                if import_path_allowed(path) {
                    None
                } else {
                    Some(format!("Import path not allowed: {path}"))
                }
            })
            .collect()
    }

    fn check_reserved_identifiers(&self, stripped: &str) -> Vec<String> {
        RESERVED_DECL_RE
            .captures_iter(stripped)
            .map(|cap| {
                let name = cap.get(2).map(|m| m.as_str()).unwrap_or("");
                format!("Redefining reserved identifier: {name}")
            })
            .collect()
    }

    fn check_inheritance(&self, stripped: &str) -> Vec<String> {
        let inherits = INHERITANCE_RE
            .captures(stripped)
            .map(|cap| {
                cap.get(1)
                    .map(|m| m.as_str())
                    .unwrap_or("")
                    .split(',')
                    .any(|name| name.trim() == REQUIRED_BASE)
            })
            .unwrap_or(false);

        if inherits {
            Vec::new()
        } else {
            vec![format!("Strategy contract must directly inherit from {REQUIRED_BASE}")]
        }
    }
}

fn import_path_allowed(path: &str) -> bool {
    let segments: Vec<&str> = path.split('/').collect();
    let Some(last) = segments.last() else { return false };
    if !WHITELISTED_IMPORTS.contains(last) {
        return false;
    }
    segments[..segments.len() - 1].iter().all(|s| *s == "." || *s == "..")
}

/// Strips `//` and `/* */` comments, leaving string literals intact so
/// patterns inside a string aren't accidentally unmasked.
fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    let mut in_string: Option<char> = None;

    while let Some(c) = chars.next() {
        if let Some(quote) = in_string {
            out.push(c);
            if c == '\\' {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
                continue;
            }
            if c == quote {
                in_string = None;
            }
            continue;
        }

        match c {
            '"' | '\'' => {
                in_string = Some(c);
                out.push(c);
            }
            '/' if chars.peek() == Some(&'/') => {
                for c in chars.by_ref() {
                    if c == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = ' ';
                for c in chars.by_ref() {
                    if prev == '*' && c == '/' {
                        break;
                    }
                    if c == '\n' {
                        out.push('\n');
                    }
                    prev = c;
                }
            }
            other => out.push(other),
        }
    }

    out
}
