//! Keyword vocabulary used as match targets.
//!
//! Keywords are stored normalized (lowercased, trimmed). Categories are
//! informational: they drive reporting breakdowns and never affect scores.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DemogError, Result};

/// Lowercases and trims text the same way for keywords and matched text.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Keyword(String);

impl Keyword {
    pub fn new(raw: &str) -> Result<Self> {
        let normalized = normalize(raw);
        if normalized.is_empty() {
            return Err(DemogError::EmptyKeyword);
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Keyword {
    type Error = DemogError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(&value)
    }
}

impl From<Keyword> for String {
    fn from(value: Keyword) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordCategory {
    Age,
    Gender,
    RaceEthnicity,
    Demographic,
    Background,
    Socioeconomic,
    Name,
    Identification,
    Address,
    Contact,
    Membership,
    Custom,
}

impl KeywordCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Age => "Age",
            Self::Gender => "Gender",
            Self::RaceEthnicity => "Race / Ethnicity",
            Self::Demographic => "Demographic",
            Self::Background => "Background",
            Self::Socioeconomic => "Socioeconomic",
            Self::Name => "Name Information",
            Self::Identification => "Identification",
            Self::Address => "Address Information",
            Self::Contact => "Contact Information",
            Self::Membership => "Membership & Dates",
            Self::Custom => "Custom",
        }
    }
}

impl fmt::Display for KeywordCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

const DEMOGRAPHIC_TERMS: &[(&str, KeywordCategory)] = &[
    ("age", KeywordCategory::Age),
    ("birth", KeywordCategory::Age),
    ("date of birth", KeywordCategory::Age),
    ("dob", KeywordCategory::Age),
    ("gender", KeywordCategory::Gender),
    ("sex", KeywordCategory::Gender),
    ("race", KeywordCategory::RaceEthnicity),
    ("ethnicity", KeywordCategory::RaceEthnicity),
    ("ancestry", KeywordCategory::RaceEthnicity),
    ("nationality", KeywordCategory::RaceEthnicity),
    ("heritage", KeywordCategory::RaceEthnicity),
    ("origin", KeywordCategory::RaceEthnicity),
    ("demographic", KeywordCategory::Demographic),
    ("population", KeywordCategory::Demographic),
    ("background", KeywordCategory::Background),
];

const EXTENDED_TERMS: &[(&str, KeywordCategory)] = &[
    ("birth date", KeywordCategory::Age),
    ("income", KeywordCategory::Socioeconomic),
    ("education", KeywordCategory::Socioeconomic),
    ("marital status", KeywordCategory::Socioeconomic),
    ("occupation", KeywordCategory::Socioeconomic),
    ("embossed name", KeywordCategory::Name),
    ("embossed company name", KeywordCategory::Name),
    ("primary name", KeywordCategory::Name),
    ("secondary name", KeywordCategory::Name),
    ("legal name", KeywordCategory::Name),
    ("dba name", KeywordCategory::Name),
    ("double byte name", KeywordCategory::Name),
    ("gov ids", KeywordCategory::Identification),
    ("government ids", KeywordCategory::Identification),
    ("government identification", KeywordCategory::Identification),
    ("social security", KeywordCategory::Identification),
    ("ssn", KeywordCategory::Identification),
    ("tax id", KeywordCategory::Identification),
    ("identification number", KeywordCategory::Identification),
    ("home address", KeywordCategory::Address),
    ("business address", KeywordCategory::Address),
    ("alternate address", KeywordCategory::Address),
    ("temporary address", KeywordCategory::Address),
    ("other address", KeywordCategory::Address),
    ("additional addresses", KeywordCategory::Address),
    ("mailing address", KeywordCategory::Address),
    ("billing address", KeywordCategory::Address),
    ("shipping address", KeywordCategory::Address),
    ("residential address", KeywordCategory::Address),
    ("work address", KeywordCategory::Address),
    ("home phone", KeywordCategory::Contact),
    ("business phone", KeywordCategory::Contact),
    ("mobile phone", KeywordCategory::Contact),
    ("cell phone", KeywordCategory::Contact),
    ("work phone", KeywordCategory::Contact),
    ("phone number", KeywordCategory::Contact),
    ("telephone", KeywordCategory::Contact),
    ("fax", KeywordCategory::Contact),
    ("fax number", KeywordCategory::Contact),
    ("home email", KeywordCategory::Contact),
    ("business email", KeywordCategory::Contact),
    ("work email", KeywordCategory::Contact),
    ("personal email", KeywordCategory::Contact),
    ("email address", KeywordCategory::Contact),
    ("email", KeywordCategory::Contact),
    ("e-mail", KeywordCategory::Contact),
    ("member since date", KeywordCategory::Membership),
    ("membership date", KeywordCategory::Membership),
    ("registration date", KeywordCategory::Membership),
    ("enrollment date", KeywordCategory::Membership),
    ("customer since", KeywordCategory::Membership),
    ("account opened", KeywordCategory::Membership),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub keyword: Keyword,
    pub category: KeywordCategory,
}

/// Ordered, duplicate-free keyword list.
///
/// Iteration order is insertion order; the matcher relies on it for its
/// first-wins tie-break.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    entries: Vec<VocabularyEntry>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in demographic vocabulary.
    pub fn demographic() -> Self {
        Self::from_static(DEMOGRAPHIC_TERMS)
    }

    /// Demographic terms followed by socioeconomic and personal-data terms.
    pub fn extended() -> Self {
        let mut vocabulary = Self::demographic();
        vocabulary.extend(Self::from_static(EXTENDED_TERMS));
        vocabulary
    }

    /// Builds a vocabulary from free-form terms, all tagged [`KeywordCategory::Custom`].
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_category(terms, KeywordCategory::Custom)
    }

    /// Builds a vocabulary from free-form terms sharing one category.
    ///
    /// Blank terms are skipped and later duplicates are dropped.
    pub fn with_category<I, S>(terms: I, category: KeywordCategory) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocabulary = Self::new();
        for term in terms {
            if let Ok(keyword) = Keyword::new(term.as_ref()) {
                vocabulary.push(keyword, category);
            }
        }
        vocabulary
    }

    fn from_static(terms: &[(&str, KeywordCategory)]) -> Self {
        let mut vocabulary = Self::new();
        for (term, category) in terms {
            if let Ok(keyword) = Keyword::new(term) {
                vocabulary.push(keyword, *category);
            }
        }
        vocabulary
    }

    /// Appends a keyword. Returns `false` when it is already present.
    pub fn push(&mut self, keyword: Keyword, category: KeywordCategory) -> bool {
        if self.contains(&keyword) {
            return false;
        }
        self.entries.push(VocabularyEntry { keyword, category });
        true
    }

    /// Appends the entries of `other` that are not yet present.
    pub fn extend(&mut self, other: Vocabulary) {
        for entry in other.entries {
            self.push(entry.keyword, entry.category);
        }
    }

    pub fn contains(&self, keyword: &Keyword) -> bool {
        self.entries.iter().any(|entry| &entry.keyword == keyword)
    }

    pub fn category_of(&self, keyword: &Keyword) -> Option<KeywordCategory> {
        self.entries
            .iter()
            .find(|entry| &entry.keyword == keyword)
            .map(|entry| entry.category)
    }

    pub fn entries(&self) -> &[VocabularyEntry] {
        &self.entries
    }

    pub fn keywords(&self) -> impl Iterator<Item = &Keyword> {
        self.entries.iter().map(|entry| &entry.keyword)
    }

    /// Keywords grouped by category, each group in vocabulary order.
    pub fn by_category(&self) -> BTreeMap<KeywordCategory, Vec<&Keyword>> {
        let mut groups: BTreeMap<KeywordCategory, Vec<&Keyword>> = BTreeMap::new();
        for entry in &self.entries {
            groups.entry(entry.category).or_default().push(&entry.keyword);
        }
        groups
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
