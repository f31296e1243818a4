//! The vocabulary of categories a new transaction can be filed under.

use crate::Error;

/// The categories offered when no others are configured.
pub const DEFAULT_CATEGORIES: [&str; 10] = [
    "Gıda & Market",
    "Barınma",
    "Ulaşım",
    "Faturalar",
    "Eğlence",
    "Sağlık",
    "Maaş",
    "Ek Gelir",
    "Yatırım",
    "Diğer",
];

/// A non-empty, ordered list of distinct category names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Categories(Vec<String>);

impl Categories {
    /// Create a vocabulary from `names`, trimming whitespace and dropping
    /// blanks and duplicates while keeping the first occurrence's position.
    ///
    /// # Errors
    /// Returns [Error::ValidationFailed] if no names remain.
    pub fn new(names: Vec<String>) -> Result<Self, Error> {
        let mut categories: Vec<String> = Vec::with_capacity(names.len());

        for name in names {
            let name = name.trim();

            if !name.is_empty() && !categories.iter().any(|existing| existing == name) {
                categories.push(name.to_owned());
            }
        }

        if categories.is_empty() {
            return Err(Error::ValidationFailed(
                "at least one category must be configured".to_owned(),
            ));
        }

        Ok(Self(categories))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|category| category == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for Categories {
    fn default() -> Self {
        Self(DEFAULT_CATEGORIES.iter().map(|&name| name.to_owned()).collect())
    }
}
