//! Include/exclude glob selection over the compiled-source tree.
//!
//! Paths are relative to the compiled folder and use `/` separators. `*`
//! matches within one segment, `**` across any number of segments
//! (including none), and `?` one non-separator character.

use regex::Regex;

/// One compiled glob pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    /// Compiles `glob`.
    ///
    /// # Errors
    ///
    /// Returns an error if the translated expression is rejected.
    pub fn new(glob: &str) -> Result<Self, String> {
        let regex = Regex::new(&translate(glob))
            .map_err(|e| format!("invalid glob pattern {glob:?}: {e}"))?;
        Ok(Self { regex })
    }

    /// Whether `path` is matched in full.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }
}

/// Translates a glob into an anchored regular expression.
fn translate(glob: &str) -> String {
    let mut out = String::from("^");
    let chars: Vec<char> = glob.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '*' if chars.get(i + 1) == Some(&'*') => {
                if chars.get(i + 2) == Some(&'/') {
                    out.push_str("(?:.*/)?");
                    i += 3;
                } else {
                    out.push_str(".*");
                    i += 2;
                }
            }
            '*' => {
                out.push_str("[^/]*");
                i += 1;
            }
            '?' => {
                out.push_str("[^/]");
                i += 1;
            }
            c => {
                out.push_str(&regex::escape(c.encode_utf8(&mut [0; 4])));
                i += 1;
            }
        }
    }
    out.push('$');
    out
}

/// Ordered include rules with global exclusions.
#[derive(Debug, Clone)]
pub struct Selection {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

impl Selection {
    /// Compiles include and exclude globs.
    ///
    /// # Errors
    ///
    /// Returns an error if any glob fails to compile.
    pub fn new(include: &[&str], exclude: &[&str]) -> Result<Self, String> {
        Ok(Self {
            include: include.iter().map(|g| Pattern::new(g)).collect::<Result<_, _>>()?,
            exclude: exclude.iter().map(|g| Pattern::new(g)).collect::<Result<_, _>>()?,
        })
    }

    /// Selects from `paths` in include-rule order, sorted within one rule.
    ///
    /// A path matched by several include rules appears once, at its first
    /// position. A path matched by any exclude rule never appears.
    #[must_use]
    pub fn select(&self, paths: &[String]) -> Vec<String> {
        let mut sorted: Vec<&String> = paths.iter().collect();
        sorted.sort();

        let mut selected: Vec<String> = Vec::new();
        for rule in &self.include {
            for path in &sorted {
                if rule.matches(path)
                    && !self.is_excluded(path)
                    && !selected.iter().any(|s| s == *path)
                {
                    selected.push((*path).clone());
                }
            }
        }
        selected
    }

    fn is_excluded(&self, path: &str) -> bool {
        self.exclude.iter().any(|p| p.matches(path))
    }
}
