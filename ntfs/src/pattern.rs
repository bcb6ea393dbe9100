//! Compiles a single-`*` glob (the only wildcard the original search
//! dialect supports) into one of a handful of concrete match modes, so
//! matching a name against it is a plain substring/prefix/suffix check
//! rather than a general glob walk.

/// How a compiled pattern is matched against a candidate name.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    /// No `*` at all: the whole name must equal the pattern.
    Exact(String),
    /// `prefix*`: name must start with `prefix`.
    Prefix(String),
    /// `*suffix`: name must end with `suffix`.
    Suffix(String),
    /// `*middle*`: name must contain `middle` somewhere.
    Substring(String),
    /// `prefix*suffix`: name must start with `prefix` and end with
    /// `suffix` (and be long enough for both to not overlap).
    PrefixAndSuffix(String, String),
}

/// Options controlling how [`SearchPattern`] compares names.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternOptions {
    pub case_sensitive: bool,
}

#[derive(Debug, Clone)]
pub struct SearchPattern {
    mode: Mode,
    case_sensitive: bool,
}

impl SearchPattern {
    /// Compiles `pattern`, which may contain at most one `*`.
    ///
    /// An empty pattern or one of length <= 1 is rejected outright: no
    /// matcher is built, and callers should treat the query as zero hits
    /// rather than attempt a match.
    pub fn compile(pattern: &str, options: PatternOptions) -> Option<Self> {
        if pattern.chars().count() <= 1 {
            return None;
        }

        let normalize = |s: &str| if options.case_sensitive { s.to_string() } else { s.to_lowercase() };
        let pattern = normalize(pattern);

        let mode = match pattern.find('*') {
            None => Mode::Exact(pattern),
            Some(star) => {
                let prefix = pattern[..star].to_string();
                let suffix = pattern[star + 1..].to_string();
                match (prefix.is_empty(), suffix.is_empty()) {
                    (true, true) => Mode::Substring(String::new()),
                    (false, true) => Mode::Prefix(prefix),
                    (true, false) => Mode::Suffix(suffix),
                    (false, false) => {
                        if suffix.contains('*') || prefix.contains('*') {
                            // More than one `*`; treat everything between
                            // the first and last as free substring match.
                            Mode::Substring(prefix)
                        } else {
                            Mode::PrefixAndSuffix(prefix, suffix)
                        }
                    }
                }
            }
        };

        Some(Self { mode, case_sensitive: options.case_sensitive })
    }

    pub fn matches(&self, name: &str) -> bool {
        let name = if self.case_sensitive { name.to_string() } else { name.to_lowercase() };

        match &self.mode {
            Mode::Exact(p) => &name == p,
            Mode::Prefix(p) => name.starts_with(p.as_str()),
            Mode::Suffix(s) => name.ends_with(s.as_str()),
            Mode::Substring(s) => s.is_empty() || name.contains(s.as_str()),
            Mode::PrefixAndSuffix(p, s) => {
                name.len() >= p.len() + s.len() && name.starts_with(p.as_str()) && name.ends_with(s.as_str())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pat(p: &str) -> SearchPattern {
        SearchPattern::compile(p, PatternOptions::default()).expect("pattern should compile")
    }

    #[test]
    fn exact_match_is_case_insensitive_by_default() {
        let p = pat("readme.txt");
        assert!(p.matches("README.TXT"));
        assert!(!p.matches("readme.md"));
    }

    #[test]
    fn prefix_pattern() {
        let p = pat("img_*");
        assert!(p.matches("IMG_0001.jpg"));
        assert!(!p.matches("thumb_0001.jpg"));
    }

    #[test]
    fn suffix_pattern() {
        let p = pat("*.log");
        assert!(p.matches("server.log"));
        assert!(!p.matches("server.log.gz"));
    }

    #[test]
    fn substring_pattern() {
        let p = pat("*backup*");
        assert!(p.matches("daily_backup_2024.tar"));
        assert!(!p.matches("restore.tar"));
    }

    #[test]
    fn prefix_and_suffix_pattern() {
        let p = pat("report_*_final.pdf");
        assert!(p.matches("report_q3_final.pdf"));
        assert!(!p.matches("report_final.pd"));
        assert!(!p.matches("rep_q3_final.pdf"));
    }

    #[test]
    fn case_sensitive_option() {
        let p = SearchPattern::compile("README*", PatternOptions { case_sensitive: true }).unwrap();
        assert!(p.matches("README.txt"));
        assert!(!p.matches("readme.txt"));
    }

    #[test]
    fn empty_pattern_is_rejected() {
        assert!(SearchPattern::compile("", PatternOptions::default()).is_none());
    }

    #[test]
    fn single_character_pattern_is_rejected() {
        assert!(SearchPattern::compile("a", PatternOptions::default()).is_none());
        assert!(SearchPattern::compile("*", PatternOptions::default()).is_none());
    }
}
