use crate::models::CanonicalRecord;

/// All records from one ingestion run, in file order then row order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<CanonicalRecord>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: CanonicalRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[CanonicalRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CanonicalRecord> {
        self.records.iter()
    }

    /// Records whose name contains `text`, ignoring case. Empty `text`
    /// matches everything.
    pub fn filter_by_substring(&self, text: &str) -> Vec<&CanonicalRecord> {
        let needle = text.to_lowercase();
        self.records
            .iter()
            .filter(|r| r.name.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn search(&self, text: &str) -> Vec<&CanonicalRecord> {
        let mut found = self.filter_by_substring(text);
        sort_by_unit_price(&mut found);
        found
    }
}

impl Extend<CanonicalRecord> for Catalog {
    fn extend<T: IntoIterator<Item = CanonicalRecord>>(&mut self, iter: T) {
        for record in iter {
            self.push(record);
        }
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CanonicalRecord;
    type IntoIter = std::slice::Iter<'a, CanonicalRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Ascending by unit price; equal prices keep their input order.
pub fn sort_by_unit_price(records: &mut [&CanonicalRecord]) {
    records.sort_by(|a, b| a.unit_price.total_cmp(&b.unit_price));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, price: f64, weight: f64, file: &str) -> CanonicalRecord {
        CanonicalRecord::new(name.into(), price, weight, file.into())
    }

    fn milk_catalog() -> Catalog {
        let mut c = Catalog::new();
        c.push(record("Молоко 3.2%", 30.0, 1.0, "price_a.csv"));
        c.push(record("Сыр", 500.0, 1.0, "price_a.csv"));
        c.push(record("молоко топлёное", 10.0, 1.0, "price_b.csv"));
        c.push(record("МОЛОКО сгущёное", 20.0, 1.0, "price_b.csv"));
        c
    }

    #[test]
    fn test_search_sorts_by_unit_price() {
        let c = milk_catalog();
        let found = c.search("молоко");
        let prices: Vec<f64> = found.iter().map(|r| r.unit_price).collect();
        assert_eq!(prices, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let c = milk_catalog();
        assert_eq!(c.filter_by_substring("МоЛоКо").len(), 3);
        assert_eq!(c.filter_by_substring("сыр")[0].name, "Сыр");
    }

    #[test]
    fn test_filter_keeps_insertion_order() {
        let c = milk_catalog();
        let names: Vec<&str> = c.filter_by_substring("молоко").iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Молоко 3.2%", "молоко топлёное", "МОЛОКО сгущёное"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let c = milk_catalog();
        assert!(c.search("хлеб").is_empty());
    }

    #[test]
    fn test_empty_query_matches_all() {
        let c = milk_catalog();
        assert_eq!(c.filter_by_substring("").len(), c.len());
    }

    #[test]
    fn test_sort_is_stable() {
        let mut c = Catalog::new();
        c.push(record("b first", 40.0, 2.0, "price_1.csv"));
        c.push(record("cheap", 5.0, 1.0, "price_1.csv"));
        c.push(record("a second", 20.0, 1.0, "price_2.csv"));
        c.push(record("c third", 60.0, 3.0, "price_2.csv"));
        let found = c.search("");
        let names: Vec<&str> = found.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["cheap", "b first", "a second", "c third"]);
    }

    #[test]
    fn test_extend_appends_in_order() {
        let mut c = Catalog::new();
        c.extend(vec![record("x", 1.0, 1.0, "f"), record("y", 2.0, 1.0, "f")]);
        let names: Vec<&str> = c.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["x", "y"]);
        assert!(!c.is_empty());
    }
}
