//! Name index over an application's category, tag and property definitions

use std::collections::HashMap;

use shared::models::{Category, Property, Tag};

/// Canonical form used to match cell text against definition names
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Definitions loaded once per import
#[derive(Debug, Clone, Default)]
pub struct Definitions {
    categories: HashMap<String, i64>,
    tags: HashMap<String, i64>,
    properties: HashMap<String, i64>,
}

impl Definitions {
    pub fn new(categories: Vec<Category>, tags: Vec<Tag>, properties: Vec<Property>) -> Self {
        Self {
            categories: index(categories.into_iter().map(|c| (c.name, c.id))),
            tags: index(tags.into_iter().map(|t| (t.name, t.id))),
            properties: index(properties.into_iter().map(|p| (p.name, p.id))),
        }
    }

    pub fn category_id(&self, name: &str) -> Option<i64> {
        self.categories.get(&normalize_name(name)).copied()
    }

    pub fn tag_id(&self, name: &str) -> Option<i64> {
        self.tags.get(&normalize_name(name)).copied()
    }

    pub fn property_id(&self, name: &str) -> Option<i64> {
        self.properties.get(&normalize_name(name)).copied()
    }
}

fn index(entries: impl Iterator<Item = (String, i64)>) -> HashMap<String, i64> {
    let mut map = HashMap::new();
    for (name, id) in entries {
        let key = normalize_name(&name);
        if map.contains_key(&key) {
            tracing::debug!(name = %name, id, "Duplicate definition name, keeping first");
            continue;
        }
        map.insert(key, id);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: i64, name: &str) -> Category {
        Category {
            id,
            app_id: "app".into(),
            name: name.into(),
        }
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Gold   Card "), "gold card");
        assert_eq!(normalize_name("VIP"), "vip");
        assert_eq!(normalize_name("金卡"), "金卡");
    }

    #[test]
    fn test_lookup_is_whitespace_and_case_insensitive() {
        let defs = Definitions::new(vec![category(1, "Gold Card")], vec![], vec![]);
        assert_eq!(defs.category_id("gold  card"), Some(1));
        assert_eq!(defs.category_id(" GOLD CARD"), Some(1));
        assert_eq!(defs.category_id("silver"), None);
        assert_eq!(defs.tag_id("gold card"), None);
    }

    #[test]
    fn test_duplicate_names_keep_first_definition() {
        let defs = Definitions::new(
            vec![category(1, "vip"), category(2, "VIP")],
            vec![],
            vec![],
        );
        assert_eq!(defs.category_id("vip"), Some(1));
    }
}
