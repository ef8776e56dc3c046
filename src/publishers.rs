use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::{debug, error};

/// Shape of a category's `publishers` value as found in the file.
/// Validation is deferred to classification.
#[derive(Debug, Clone, PartialEq)]
pub enum PublisherList {
    Names(Vec<String>),
    /// A list, but with at least one non-string item.
    BadItems(Value),
    /// Missing, or anything other than a list.
    NotAList,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDefinition {
    pub display_name: Option<String>,
    pub publishers: PublisherList,
}

/// Categories in file order; classification is first-match-wins over this order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTable {
    categories: Vec<(String, CategoryDefinition)>,
}

impl CategoryTable {
    pub fn from_json(root: Map<String, Value>) -> Self {
        let categories = root
            .into_iter()
            .map(|(key, value)| (key, CategoryDefinition::from_value(value)))
            .collect();
        Self { categories }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryDefinition)> {
        self.categories.iter().map(|(k, d)| (k.as_str(), d))
    }
}

impl CategoryDefinition {
    fn from_value(value: Value) -> Self {
        let Value::Object(mut obj) = value else {
            return Self {
                display_name: None,
                publishers: PublisherList::NotAList,
            };
        };
        let display_name = match obj.remove("display_name") {
            Some(Value::String(s)) => Some(s),
            _ => None,
        };
        let publishers = match obj.remove("publishers") {
            Some(Value::Array(items)) => {
                if items.iter().all(Value::is_string) {
                    PublisherList::Names(
                        items
                            .into_iter()
                            .filter_map(|v| match v {
                                Value::String(s) => Some(s),
                                _ => None,
                            })
                            .collect(),
                    )
                } else {
                    PublisherList::BadItems(Value::Array(items))
                }
            }
            _ => PublisherList::NotAList,
        };
        Self {
            display_name,
            publishers,
        }
    }
}

/// Read the category table. Any failure is logged and yields an empty table,
/// which leaves every record unassigned.
pub fn load_category_table(path: &Path) -> CategoryTable {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            error!(
                "Could not locate [{}] to read publisher info: {}",
                path.display(),
                e
            );
            return CategoryTable::default();
        }
    };

    match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Object(root)) => {
            let table = CategoryTable::from_json(root);
            debug!(
                "Loaded {} publisher categories from [{}]: {:?}",
                table.len(),
                path.display(),
                table.keys().collect::<Vec<_>>()
            );
            table
        }
        Ok(_) | Err(_) => {
            error!(
                "[{}] appears to be invalid JSON. Expected an object of categories with display_name and publishers",
                path.display()
            );
            CategoryTable::default()
        }
    }
}
