use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A TCP port, accepted as a number or as a numeric string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "PortValue", into = "u16")]
pub struct Port(pub u16);

impl Default for Port {
    fn default() -> Self {
        Port(5432)
    }
}

impl From<Port> for u16 {
    fn from(port: Port) -> Self {
        port.0
    }
}

impl std::str::FromStr for Port {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value
            .trim()
            .parse::<u16>()
            .map(Port)
            .map_err(|err| format!("invalid port '{value}': {err}"))
    }
}

#[derive(Deserialize, JsonSchema)]
#[serde(untagged)]
enum PortValue {
    Number(u16),
    Text(String),
}

impl TryFrom<PortValue> for Port {
    type Error = String;

    fn try_from(value: PortValue) -> Result<Self, Self::Error> {
        match value {
            PortValue::Number(port) => Ok(Port(port)),
            PortValue::Text(text) => text.parse(),
        }
    }
}
