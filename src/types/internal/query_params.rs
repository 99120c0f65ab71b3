use std::collections::HashMap;

use sea_orm::Value;

/// Value bound to a `:name` placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Single(Value),
    /// Expanded into one placeholder per element, for `IN (:name)`
    List(Vec<Value>),
}

/// Named parameters for a native report query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    values: HashMap<String, ParamValue>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, value: impl Into<Value>) -> &mut Self {
        self.values.insert(name.to_string(), ParamValue::Single(value.into()));
        self
    }

    pub fn insert_list<V, I>(&mut self, name: &str, values: I) -> &mut Self
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        let list = values.into_iter().map(Into::into).collect();
        self.values.insert(name.to_string(), ParamValue::List(list));
        self
    }

    /// Builder form of [`QueryParams::insert`]
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut params = QueryParams::new();
        params.insert("vin", "LZYTBGBW5J1000001").insert("startYear", 2024);

        assert_eq!(params.len(), 2);
        assert_eq!(params.get("startYear"), Some(&ParamValue::Single(Value::from(2024))));
        assert!(params.get("endYear").is_none());
    }

    #[test]
    fn test_insert_list() {
        let mut params = QueryParams::new();
        params.insert_list("groupIds", vec![1, 2, 3]);

        match params.get("groupIds") {
            Some(ParamValue::List(values)) => assert_eq!(values.len(), 3),
            other => panic!("Expected list, got {:?}", other),
        }
    }

    #[test]
    fn test_later_insert_replaces_value() {
        let params = QueryParams::new().with("vin", "A").with("vin", "B");

        assert_eq!(params.get("vin"), Some(&ParamValue::Single(Value::from("B"))));
    }
}
