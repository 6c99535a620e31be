//! Service label keys and boundary parsing.
//!
//! Services carry an engine-facing string label map; everything pygmy needs
//! to know about a service (name, purpose, weight, defaults opt-in, output)
//! is encoded there under `pygmy.*` keys. All parsing of that map lives in
//! this module: the rest of the crate works with [`ServiceMetadata`] and the
//! typed accessors on `Service`, never with raw label strings.

use std::collections::HashMap;
use std::str::FromStr;

/// Marker label present on every container pygmy manages.
pub const MARKER: &str = "pygmy";
/// Unique, display-facing service identifier.
pub const NAME: &str = "pygmy.name";
/// Free-text role tag; `sshagent` is the forced-first sentinel.
pub const PURPOSE: &str = "pygmy.purpose";
/// Integer sort key among non-sshagent services, encoded as a string.
pub const WEIGHT: &str = "pygmy.weight";
/// Truthy opt-in for importing catalog defaults over this entry.
pub const DEFAULTS: &str = "pygmy.defaults";
/// Truthy flag: surface the container's output to the user.
pub const OUTPUT: &str = "pygmy.output";

/// Returns whether a string-encoded boolean label value is truthy.
///
/// Only `"1"` and `"true"` count; everything else, including absence,
/// is false.
pub fn truthy(value: &str) -> bool {
    value == "1" || value == "true"
}

/// Service role, parsed from the `pygmy.purpose` label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Purpose {
    /// The SSH agent; always scheduled first, regardless of weight.
    SshAgent,
    /// One-shot container that adds keys to the agent.
    AddKeys,
    /// One-shot container that lists the keys held by the agent.
    ShowKeys,
    /// Any other role tag; carried through verbatim.
    Other(String),
}

impl Purpose {
    /// Returns the label value for this purpose.
    pub fn as_str(&self) -> &str {
        match self {
            Purpose::SshAgent => "sshagent",
            Purpose::AddKeys => "addkeys",
            Purpose::ShowKeys => "showkeys",
            Purpose::Other(s) => s,
        }
    }
}

impl FromStr for Purpose {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "sshagent" => Purpose::SshAgent,
            "addkeys" => Purpose::AddKeys,
            "showkeys" => Purpose::ShowKeys,
            other => Purpose::Other(other.to_string()),
        })
    }
}

impl std::fmt::Display for Purpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Typed view of the recognized `pygmy.*` labels.
///
/// Constructed once per catalog entry at definition time, or parsed from a
/// raw label map at the ingestion boundary. Parsing is tolerant for
/// optional fields: an absent or malformed value degrades to the zero
/// value (`weight` 0, flags false, `purpose`/`name` none).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceMetadata {
    /// `pygmy.name` value, when present and non-empty.
    pub name: Option<String>,
    /// `pygmy.purpose` value, when present.
    pub purpose: Option<Purpose>,
    /// `pygmy.weight` value; 0 when absent or unparseable.
    pub weight: i32,
    /// `pygmy.defaults` truthiness.
    pub defaults: bool,
    /// `pygmy.output` truthiness.
    pub output: bool,
}

impl ServiceMetadata {
    /// Parses the recognized keys out of a raw label map.
    pub fn parse(labels: &HashMap<String, String>) -> Self {
        let name = labels
            .get(NAME)
            .filter(|v| !v.is_empty())
            .map(|v| v.to_string());
        let purpose = labels.get(PURPOSE).and_then(|v| v.parse().ok());
        let weight = labels
            .get(WEIGHT)
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        let defaults = labels.get(DEFAULTS).map(|v| truthy(v)).unwrap_or(false);
        let output = labels.get(OUTPUT).map(|v| truthy(v)).unwrap_or(false);

        Self {
            name,
            purpose,
            weight,
            defaults,
            output,
        }
    }

    /// Renders the metadata back into a raw label map, including the
    /// `pygmy` marker label. Unset optional fields produce no key.
    pub fn to_labels(&self) -> HashMap<String, String> {
        let mut labels = HashMap::new();
        labels.insert(MARKER.to_string(), MARKER.to_string());

        if let Some(name) = &self.name {
            labels.insert(NAME.to_string(), name.clone());
        }
        if let Some(purpose) = &self.purpose {
            labels.insert(PURPOSE.to_string(), purpose.to_string());
        }
        labels.insert(WEIGHT.to_string(), self.weight.to_string());
        if self.defaults {
            labels.insert(DEFAULTS.to_string(), "true".to_string());
        }
        labels.insert(
            OUTPUT.to_string(),
            if self.output { "true" } else { "false" }.to_string(),
        );

        labels
    }
}
