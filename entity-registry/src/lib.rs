use serde::{Deserialize, Serialize};

/// Rendered in place of a missing, null or empty field value.
pub const PLACEHOLDER: &str = "-";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub placeholder: Option<&'static str>,
}

impl FieldSpec {
    pub const fn new(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            placeholder: None,
        }
    }

    pub fn input_placeholder(&self) -> &'static str {
        self.placeholder.unwrap_or(self.label)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntitySchema {
    pub endpoint: &'static str,
    pub fields: &'static [FieldSpec],
}

impl EntitySchema {
    pub fn headers(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.label).collect()
    }

    /// One cell per declared field, in declared order.
    pub fn cells(&self, record: &Record) -> Vec<String> {
        self.fields.iter().map(|f| record.cell(f.name)).collect()
    }
}

const CUSTOMER_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("name", "Name"),
    FieldSpec::new("company", "Company"),
    FieldSpec::new("email", "Email"),
    FieldSpec::new("stage", "Stage"),
];

const LEAD_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("name", "Name"),
    FieldSpec::new("source", "Source"),
    FieldSpec::new("status", "Status"),
    FieldSpec::new("value", "Value"),
];

const ACTIVITY_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("type", "Type"),
    FieldSpec::new("subject", "Subject"),
    FieldSpec::new("owner", "Owner"),
];

const TICKET_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("subject", "Subject"),
    FieldSpec::new("status", "Status"),
    FieldSpec::new("priority", "Priority"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Customers,
    Leads,
    Activities,
    Tickets,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Customers,
        EntityKind::Leads,
        EntityKind::Activities,
        EntityKind::Tickets,
    ];

    pub fn endpoint(self) -> &'static str {
        match self {
            EntityKind::Customers => "/api/customers",
            EntityKind::Leads => "/api/leads",
            EntityKind::Activities => "/api/activities",
            EntityKind::Tickets => "/api/tickets",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            EntityKind::Customers => "Customers",
            EntityKind::Leads => "Leads",
            EntityKind::Activities => "Activities",
            EntityKind::Tickets => "Tickets",
        }
    }

    pub fn schema(self) -> EntitySchema {
        let fields = match self {
            EntityKind::Customers => CUSTOMER_FIELDS,
            EntityKind::Leads => LEAD_FIELDS,
            EntityKind::Activities => ACTIVITY_FIELDS,
            EntityKind::Tickets => TICKET_FIELDS,
        };
        EntitySchema {
            endpoint: self.endpoint(),
            fields,
        }
    }
}

/// A backend record: an opaque `id` plus whatever fields the backend sent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default)]
    pub id: serde_json::Value,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl Record {
    pub fn cell(&self, field: &str) -> String {
        match self.fields.get(field) {
            None | Some(serde_json::Value::Null) => PLACEHOLDER.to_string(),
            Some(serde_json::Value::String(s)) if s.is_empty() => PLACEHOLDER.to_string(),
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    pub fn row_key(&self) -> String {
        match &self.id {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

pub fn validate_schema(schema: &EntitySchema) -> Result<(), String> {
    if schema.endpoint.trim().is_empty() {
        return Err("endpoint is required".into());
    }
    if !schema.endpoint.starts_with('/') {
        return Err(format!("endpoint '{}' must start with '/'", schema.endpoint));
    }
    if schema.fields.is_empty() {
        return Err(format!("schema for '{}' declares no fields", schema.endpoint));
    }
    let mut seen = std::collections::BTreeSet::new();
    for field in schema.fields {
        if field.name.trim().is_empty() {
            return Err("field name is required".into());
        }
        if !seen.insert(field.name) {
            return Err(format!("duplicate field '{}'", field.name));
        }
    }
    Ok(())
}
