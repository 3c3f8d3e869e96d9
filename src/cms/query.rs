/// Declarative JSON:API query: sparse fieldsets, included relationships and
/// custom parameters.
///
/// Resource identifiers are always part of a JSON:API response, so `id`
/// never needs to be listed as a field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    fields: Vec<(String, Vec<String>)>,
    includes: Vec<String>,
    custom: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request only `fields` for resources of `resource_type`
    pub fn fields(mut self, resource_type: &str, fields: &[&str]) -> Self {
        let fields: Vec<String> = fields.iter().map(|f| f.to_string()).collect();
        match self.fields.iter_mut().find(|(t, _)| t == resource_type) {
            Some((_, existing)) => *existing = fields,
            None => self.fields.push((resource_type.to_string(), fields)),
        }
        self
    }

    /// Include related resources (dotted relationship paths) in the response
    pub fn add_include(&mut self, relationships: &[&str]) {
        for rel in relationships {
            if !self.includes.iter().any(|i| i == rel) {
                self.includes.push(rel.to_string());
            }
        }
    }

    /// Attach an arbitrary query parameter, replacing an earlier value for `key`
    pub fn add_custom_param(&mut self, key: &str, value: &str) {
        self.custom.retain(|(k, _)| k != key);
        self.custom.push((key.to_string(), value.to_string()));
    }

    pub fn includes(&self) -> &[String] {
        &self.includes
    }

    pub fn custom_param(&self, key: &str) -> Option<&str> {
        self.custom
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Query string pairs in the order they were declared
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for (resource_type, fields) in &self.fields {
            pairs.push((format!("fields[{}]", resource_type), fields.join(",")));
        }
        if !self.includes.is_empty() {
            pairs.push(("include".to_string(), self.includes.join(",")));
        }
        pairs.extend(self.custom.iter().cloned());
        pairs
    }
}
