//! Input schema derivation from tool signatures

use crate::tools::{PrimitiveType, ToolSignature};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// JSON Schema of a tool's arguments: `{type: "object", properties, required}`
#[derive(Debug, Clone, PartialEq)]
pub struct InputSchema {
    pub properties: Vec<(String, PropertySchema)>,
    pub required: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub description: String,
}

impl Serialize for InputSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.required.is_empty() { 2 } else { 3 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("type", "object")?;
        map.serialize_entry("properties", &Properties(&self.properties))?;
        if !self.required.is_empty() {
            map.serialize_entry("required", &self.required)?;
        }
        map.end()
    }
}

/// Serializes properties as an object in declaration order
struct Properties<'a>(&'a [(String, PropertySchema)]);

impl Serialize for Properties<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, property) in self.0 {
            map.serialize_entry(name, property)?;
        }
        map.end()
    }
}

/// JSON Schema type of a primitive parameter
pub fn schema_type(ty: PrimitiveType) -> &'static str {
    match ty {
        PrimitiveType::Int | PrimitiveType::Long | PrimitiveType::Double => "number",
        PrimitiveType::Boolean => "boolean",
        PrimitiveType::String => "string",
    }
}

/// Every parameter is required; there is no optionality marker on parameters.
pub fn derive_schema(signature: &ToolSignature) -> InputSchema {
    let properties = signature
        .parameters
        .iter()
        .map(|param| {
            let description = if param.description.is_empty() {
                param.name.clone()
            } else {
                param.description.clone()
            };
            (
                param.name.clone(),
                PropertySchema {
                    kind: schema_type(param.ty),
                    description,
                },
            )
        })
        .collect();

    InputSchema {
        properties,
        required: signature.parameters.iter().map(|p| p.name.clone()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_types_and_required() {
        let signature = ToolSignature::new("mixed", "")
            .param("count", PrimitiveType::Int, "How many")
            .param("total", PrimitiveType::Long, "Sum")
            .param("ratio", PrimitiveType::Double, "Ratio")
            .param("strict", PrimitiveType::Boolean, "Strict mode")
            .param("label", PrimitiveType::String, "Label");

        let schema = serde_json::to_value(derive_schema(&signature)).unwrap();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["count"]["type"], "number");
        assert_eq!(schema["properties"]["total"]["type"], "number");
        assert_eq!(schema["properties"]["ratio"]["type"], "number");
        assert_eq!(schema["properties"]["strict"]["type"], "boolean");
        assert_eq!(schema["properties"]["label"]["type"], "string");
        assert_eq!(schema["required"], json!(["count", "total", "ratio", "strict", "label"]));
    }

    #[test]
    fn test_description_falls_back_to_name() {
        let signature = ToolSignature::new("echo", "").param("text", PrimitiveType::String, "");
        let schema = serde_json::to_value(derive_schema(&signature)).unwrap();
        assert_eq!(schema["properties"]["text"]["description"], "text");
    }

    #[test]
    fn test_no_parameters_omits_required() {
        let signature = ToolSignature::new("now", "Current time");
        let schema = serde_json::to_value(derive_schema(&signature)).unwrap();
        assert_eq!(schema, json!({"type": "object", "properties": {}}));
    }

    #[test]
    fn test_properties_keep_declaration_order() {
        let signature = ToolSignature::new("range", "")
            .param("start", PrimitiveType::String, "")
            .param("end", PrimitiveType::String, "");
        let text = serde_json::to_string(&derive_schema(&signature)).unwrap();
        assert!(text.find("\"start\"").unwrap() < text.find("\"end\"").unwrap());
    }
}
