use crate::vocabulary::DEFAULT_PORT_CLASS;
use cadence_document::Element;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether a port receives, sends, or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortDirection {
    Input,
    Output,
    InputOutput,
}

impl PortDirection {
    /// The token used in descriptor documents.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Output => "output",
            Self::InputOutput => "inputoutput",
        }
    }

    pub fn is_input(self) -> bool {
        matches!(self, Self::Input | Self::InputOutput)
    }

    pub fn is_output(self) -> bool {
        matches!(self, Self::Output | Self::InputOutput)
    }
}

impl fmt::Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "input" => Ok(Self::Input),
            "output" => Ok(Self::Output),
            "inputoutput" => Ok(Self::InputOutput),
            other => Err(format!(
                "'{other}' is not a port direction (expected input, output or inputoutput)"
            )),
        }
    }
}

/// Metadata for one port of a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortDescriptor {
    pub name: String,
    pub direction: PortDirection,
    pub data_type: String,
    pub is_multiport: bool,
    pub port_class_name: String,
    /// Sub-properties other than direction, data type, multiplicity and port class.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_attributes: Vec<Element>,
}

impl PortDescriptor {
    pub fn new(name: impl Into<String>, direction: PortDirection, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            direction,
            data_type: data_type.into(),
            is_multiport: false,
            port_class_name: DEFAULT_PORT_CLASS.to_string(),
            extra_attributes: Vec::new(),
        }
    }

    /// Shorthand for a single input port.
    pub fn input(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self::new(name, PortDirection::Input, data_type)
    }

    /// Shorthand for a single output port.
    pub fn output(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self::new(name, PortDirection::Output, data_type)
    }

    #[must_use]
    pub fn multiport(mut self) -> Self {
        self.is_multiport = true;
        self
    }

    #[must_use]
    pub fn with_class(mut self, port_class_name: impl Into<String>) -> Self {
        self.port_class_name = port_class_name.into();
        self
    }
}
