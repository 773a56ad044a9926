//! Declared input shapes for tools and the validation applied before a
//! handler ever sees its arguments.

use serde_json::{json, Map, Value};

use super::ToolError;

/// Semantic type plus constraint of a single tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Integer > 0.
    PositiveInteger,
    /// Integer >= 0.
    NonNegativeInteger,
    Integer,
    String,
    IntegerArray,
    /// Array with elements of any JSON type.
    AnyArray,
    /// JSON object with arbitrary members.
    Object,
    /// String restricted to the listed values.
    OneOf(&'static [&'static str]),
}

#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub required: bool,
    pub default: Option<Value>,
    pub description: &'static str,
}

impl ParamSpec {
    pub fn required(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            required: true,
            default: None,
            description,
        }
    }

    pub fn optional(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            required: false,
            ..Self::required(name, kind, description)
        }
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.required = false;
        self.default = Some(default);
        self
    }

    /// JSON Schema fragment for this parameter.
    pub fn json_schema(&self) -> Value {
        let mut schema = match self.kind {
            ParamKind::PositiveInteger => json!({"type": "integer", "exclusiveMinimum": 0}),
            ParamKind::NonNegativeInteger => json!({"type": "integer", "minimum": 0}),
            ParamKind::Integer => json!({"type": "integer"}),
            ParamKind::String => json!({"type": "string"}),
            ParamKind::IntegerArray => json!({"type": "array", "items": {"type": "integer"}}),
            ParamKind::AnyArray => json!({"type": "array", "items": {}}),
            ParamKind::Object => json!({"type": "object", "additionalProperties": {}}),
            ParamKind::OneOf(values) => json!({"type": "string", "enum": values}),
        };
        if let Value::Object(map) = &mut schema {
            map.insert("description".into(), json!(self.description));
            if let Some(default) = &self.default {
                map.insert("default".into(), default.clone());
            }
        }
        schema
    }

    fn check(&self, value: &Value) -> Result<Value, ToolError> {
        match self.kind {
            ParamKind::PositiveInteger => {
                let n = self.integer(value)?;
                if n <= 0 {
                    return Err(self.invalid("must be an integer greater than 0"));
                }
                Ok(json!(n))
            }
            ParamKind::NonNegativeInteger => {
                let n = self.integer(value)?;
                if n < 0 {
                    return Err(self.invalid("must be an integer greater than or equal to 0"));
                }
                Ok(json!(n))
            }
            ParamKind::Integer => Ok(json!(self.integer(value)?)),
            ParamKind::String => match value {
                Value::String(_) => Ok(value.clone()),
                _ => Err(self.invalid("must be a string")),
            },
            ParamKind::IntegerArray => {
                let items = value
                    .as_array()
                    .ok_or_else(|| self.invalid("must be an array of integers"))?;
                items
                    .iter()
                    .map(|item| {
                        coerce_integer(item)
                            .map(Value::from)
                            .ok_or_else(|| self.invalid("must be an array of integers"))
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::Array)
            }
            ParamKind::AnyArray => match value {
                Value::Array(_) => Ok(value.clone()),
                _ => Err(self.invalid("must be an array")),
            },
            ParamKind::Object => match value {
                Value::Object(_) => Ok(value.clone()),
                _ => Err(self.invalid("must be an object")),
            },
            ParamKind::OneOf(allowed) => match value.as_str() {
                Some(s) if allowed.contains(&s) => Ok(value.clone()),
                _ => Err(self.invalid(&format!("must be one of {}", allowed.join(", ")))),
            },
        }
    }

    fn integer(&self, value: &Value) -> Result<i64, ToolError> {
        coerce_integer(value).ok_or_else(|| self.invalid("must be an integer"))
    }

    fn invalid(&self, reason: &str) -> ToolError {
        ToolError::InvalidArgument {
            field: self.name.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Integer parsing is the only coercion allowed: whole-valued floats and
/// decimal strings are accepted.
fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// JSON Schema object describing a whole parameter list.
pub fn object_schema(params: &[ParamSpec]) -> Value {
    let properties: Map<String, Value> = params
        .iter()
        .map(|p| (p.name.to_string(), p.json_schema()))
        .collect();
    let required: Vec<&str> = params.iter().filter(|p| p.required).map(|p| p.name).collect();
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

/// Validate raw arguments against the declared parameters.
pub fn validate(params: &[ParamSpec], raw: Option<&Value>) -> Result<Arguments, ToolError> {
    let empty = Map::new();
    let supplied = match raw {
        None | Some(Value::Null) => &empty,
        Some(Value::Object(map)) => map,
        Some(_) => {
            return Err(ToolError::InvalidArgument {
                field: "arguments".into(),
                reason: "must be an object".into(),
            })
        }
    };

    let mut values = Map::new();
    for param in params {
        match supplied.get(param.name) {
            Some(v) if !v.is_null() => {
                values.insert(param.name.to_string(), param.check(v)?);
            }
            _ if param.required => return Err(param.invalid("is required")),
            _ => {
                if let Some(default) = &param.default {
                    values.insert(param.name.to_string(), default.clone());
                }
            }
        }
    }
    Ok(Arguments { values })
}

/// Arguments that passed validation, keyed by parameter name.
#[derive(Debug, Clone, Default)]
pub struct Arguments {
    values: Map<String, Value>,
}

impl Arguments {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Value of a parameter that must be present after validation.
    pub fn value(&self, name: &str) -> Result<Value, ToolError> {
        self.values.get(name).cloned().ok_or_else(|| ToolError::InvalidArgument {
            field: name.to_string(),
            reason: "is required".into(),
        })
    }

    pub fn str(&self, name: &str) -> Result<&str, ToolError> {
        self.values
            .get(name)
            .and_then(Value::as_str)
            .ok_or_else(|| ToolError::InvalidArgument {
                field: name.to_string(),
                reason: "must be a string".into(),
            })
    }

    pub fn array(&self, name: &str) -> Result<Vec<Value>, ToolError> {
        match self.values.get(name) {
            Some(Value::Array(items)) => Ok(items.clone()),
            _ => Err(ToolError::InvalidArgument {
                field: name.to_string(),
                reason: "must be an array".into(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const METHODS: &[&str] = &["GET", "POST", "PUT"];

    fn params() -> Vec<ParamSpec> {
        vec![
            ParamSpec::required("chainId", ParamKind::PositiveInteger, "chain"),
            ParamSpec::required("height", ParamKind::NonNegativeInteger, "height"),
            ParamSpec::optional("assetIdList", ParamKind::IntegerArray, "ids"),
            ParamSpec::optional("method", ParamKind::OneOf(METHODS), "verb").with_default(json!("GET")),
        ]
    }

    fn field_of(err: ToolError) -> (String, String) {
        match err {
            ToolError::InvalidArgument { field, reason } => (field, reason),
            other => panic!("expected InvalidArgument, got {:?}", other),
        }
    }

    #[test]
    fn accepts_valid_arguments_and_applies_defaults() {
        let args = validate(&params(), Some(&json!({"chainId": 9, "height": 0}))).unwrap();
        assert_eq!(args.get("chainId"), Some(&json!(9)));
        assert_eq!(args.get("height"), Some(&json!(0)));
        assert_eq!(args.str("method").unwrap(), "GET");
        assert!(args.get("assetIdList").is_none());
    }

    #[test]
    fn coerces_integers_from_strings_and_whole_floats() {
        let args = validate(&params(), Some(&json!({"chainId": "9", "height": 12.0}))).unwrap();
        assert_eq!(args.get("chainId"), Some(&json!(9)));
        assert_eq!(args.get("height"), Some(&json!(12)));
    }

    #[test]
    fn names_field_and_constraint_on_failure() {
        let (field, reason) =
            field_of(validate(&params(), Some(&json!({"chainId": 0, "height": 1}))).unwrap_err());
        assert_eq!(field, "chainId");
        assert!(reason.contains("greater than 0"));

        let (field, reason) =
            field_of(validate(&params(), Some(&json!({"chainId": 1, "height": -1}))).unwrap_err());
        assert_eq!(field, "height");
        assert!(reason.contains("greater than or equal to 0"));

        let (field, _) =
            field_of(validate(&params(), Some(&json!({"chainId": 1.5, "height": 1}))).unwrap_err());
        assert_eq!(field, "chainId");
    }

    #[test]
    fn integers_outside_i64_are_rejected_not_clamped() {
        let too_big = [
            json!(9223372036854775808u64),
            json!(9.223372036854775808e18),
            json!("9223372036854775808"),
        ];
        for too_big in too_big {
            let (field, _) = field_of(
                validate(&params(), Some(&json!({"chainId": too_big, "height": 1}))).unwrap_err(),
            );
            assert_eq!(field, "chainId");
        }
    }

    #[test]
    fn missing_required_field_is_reported() {
        let (field, reason) = field_of(validate(&params(), None).unwrap_err());
        assert_eq!(field, "chainId");
        assert_eq!(reason, "is required");
    }

    #[test]
    fn enum_is_case_sensitive() {
        let (field, reason) = field_of(
            validate(
                &params(),
                Some(&json!({"chainId": 1, "height": 1, "method": "get"})),
            )
            .unwrap_err(),
        );
        assert_eq!(field, "method");
        assert!(reason.contains("GET, POST, PUT"));
    }

    #[test]
    fn non_object_arguments_are_rejected() {
        let (field, _) = field_of(validate(&params(), Some(&json!([1, 2]))).unwrap_err());
        assert_eq!(field, "arguments");
    }

    #[test]
    fn object_schema_lists_required_and_constraints() {
        let schema = object_schema(&params());
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["chainId", "height"]));
        assert_eq!(schema["properties"]["chainId"]["exclusiveMinimum"], json!(0));
        assert_eq!(schema["properties"]["height"]["minimum"], json!(0));
        assert_eq!(schema["properties"]["method"]["default"], json!("GET"));
        assert_eq!(schema["properties"]["method"]["enum"], json!(["GET", "POST", "PUT"]));
    }
}
