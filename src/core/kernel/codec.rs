use crate::core::errors::ValidationError;
use std::collections::BTreeMap;
use url::form_urlencoded;

/// Ordered, duplicate-free set of query parameters.
///
/// Keys are kept in ascending byte order so that the string that gets signed
/// and the string that gets sent are produced by the same walk over the same
/// data. Inserting an existing key replaces its value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamSet {
    params: BTreeMap<&'static str, String>,
}

impl ParamSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &'static str, value: impl ToString) -> &mut Self {
        self.params.insert(key, value.to_string());
        self
    }

    /// Insert `value` only when present; absent optionals are omitted entirely.
    pub fn insert_opt<T: ToString>(&mut self, key: &'static str, value: Option<T>) -> &mut Self {
        if let Some(value) = value {
            self.insert(key, value);
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.params.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Canonical `application/x-www-form-urlencoded` rendering.
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

/// Capability of a request model to check itself and render itself as query
/// parameters.
pub trait RequestParams: Send + Sync {
    /// Pure local precondition check. Must not touch the network.
    fn validate(&self) -> Result<(), ValidationError>;

    /// Parameters the model defines as present, in canonical order.
    fn encode(&self) -> ParamSet;
}

/// Endpoints without parameters.
impl RequestParams for () {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }

    fn encode(&self) -> ParamSet {
        ParamSet::new()
    }
}
