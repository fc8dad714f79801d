use serde_json::{Map, Value};
use tracing::{debug, info};

/// Attributes declared with a dynamic pseudo-type. The CRD generator has no
/// schema mapping for them, so they have to go before code generation.
pub const DYNAMIC_FIELDS: [&str; 2] = ["local_field", "local_field_sensitive"];

/// Fields removed from a single resource, in removal order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    pub provider: String,
    pub resource: String,
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StripReport {
    pub removals: Vec<Removal>,
}

impl StripReport {
    pub fn modified(&self) -> bool {
        !self.removals.is_empty()
    }

    pub fn removed_count(&self) -> usize {
        self.removals.iter().map(|removal| removal.fields.len()).sum()
    }
}

pub fn strip_dynamic_fields(document: &mut Value) -> StripReport {
    strip_fields(document, &DYNAMIC_FIELDS)
}

/// Removes `fields` from every `provider_schemas.*.resource_schemas.*.block.attributes`
/// mapping. Absent levels are skipped, and keys with the same name anywhere
/// else in the document are left alone.
pub fn strip_fields<S: AsRef<str>>(document: &mut Value, fields: &[S]) -> StripReport {
    let mut report = StripReport::default();

    let Some(providers) =
        document.as_object_mut().and_then(|root| object_field(root, "provider_schemas"))
    else {
        return report;
    };

    for (provider, provider_schema) in providers.iter_mut() {
        let Some(resources) = provider_schema
            .as_object_mut()
            .and_then(|schema| object_field(schema, "resource_schemas"))
        else {
            continue;
        };

        for (resource, resource_schema) in resources.iter_mut() {
            let Some(attributes) = resource_schema
                .as_object_mut()
                .and_then(|schema| object_field(schema, "block"))
                .and_then(|block| object_field(block, "attributes"))
            else {
                continue;
            };

            let removed: Vec<String> = fields
                .iter()
                .map(AsRef::<str>::as_ref)
                .filter(|field| attributes.shift_remove(*field).is_some())
                .map(str::to_owned)
                .collect();

            if removed.is_empty() {
                continue;
            }

            info!(provider = %provider, "Removed {} from {}", removed.join(", "), resource);
            report.removals.push(Removal {
                provider: provider.clone(),
                resource: resource.clone(),
                fields: removed,
            });
        }
    }

    report
}

fn object_field<'a>(
    object: &'a mut Map<String, Value>,
    key: &str,
) -> Option<&'a mut Map<String, Value>> {
    match object.get_mut(key)? {
        Value::Object(child) => Some(child),
        other => {
            debug!(key, kind = kind_of(other), "Skipping schema level that is not an object");
            None
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
