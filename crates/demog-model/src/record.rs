use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Text(String),
    Missing,
}

impl CellValue {
    /// Text content, or `None` for a missing cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::Missing => None,
        }
    }

    /// Builds a cell from raw input, treating empty strings as present text.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Option<String>> for CellValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Missing, Self::Text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub value: CellValue,
}

/// One metadata row: named cells in their source column order.
///
/// A field that is present with an empty or missing value is distinct from a
/// field that is absent from the record altogether.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    fields: Vec<Field>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from `(name, value)` pairs in order.
    ///
    /// A repeated name overwrites the earlier value in its original position.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<CellValue>,
    {
        let mut record = Self::new();
        for (name, value) in pairs {
            record.insert(name, value);
        }
        record
    }

    /// Sets a field, appending it when the name is new.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<CellValue>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|field| field.name == name) {
            Some(field) => field.value = value,
            None => self.fields.push(Field { name, value }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&CellValue> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| &field.value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|field| field.name == name)
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_preserves_column_order() {
        let record = Record::from_pairs([
            ("table_name", "patients"),
            ("attr_name", "pt_age"),
            ("attr_description", "Patient age"),
        ]);
        let names: Vec<_> = record.column_names().collect();
        assert_eq!(names, vec!["table_name", "attr_name", "attr_description"]);
    }

    #[test]
    fn repeated_name_overwrites_in_place() {
        let mut record = Record::from_pairs([("a", "1"), ("b", "2")]);
        record.insert("a", "3");
        assert_eq!(record.len(), 2);
        assert_eq!(record.fields()[0].value, CellValue::text("3"));
    }

    #[test]
    fn missing_and_absent_are_distinct() {
        let record = Record::from_pairs([("attr_description", CellValue::Missing)]);
        assert!(record.contains("attr_description"));
        assert_eq!(record.get("attr_description"), Some(&CellValue::Missing));
        assert!(!record.contains("table_name"));
    }
}
