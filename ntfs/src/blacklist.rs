//! An ordered set of absolute path prefixes to suppress from query
//! results, matched case-insensitively (NTFS paths are case-preserving
//! but not case-sensitive).

#[derive(Debug, Clone, Default)]
pub struct Blacklist {
    prefixes: Vec<String>,
}

impl Blacklist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, prefixes: Vec<String>) {
        self.prefixes = prefixes.into_iter().map(|p| p.to_lowercase()).collect();
    }

    pub fn clear(&mut self) {
        self.prefixes.clear();
    }

    pub fn is_blocked(&self, path: &str) -> bool {
        let lower = path.to_lowercase();
        self.prefixes.iter().any(|prefix| lower.starts_with(prefix.as_str()))
    }
}
