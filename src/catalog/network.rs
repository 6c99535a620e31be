//! Built-in network catalog entry.

use crate::catalog::NETWORK_KEY;
use crate::runtime::Network;
use crate::service::labels;

/// Default descriptor for the shared bridge network every catalog service
/// attaches to.
pub fn network() -> Network {
    Network {
        name: NETWORK_KEY.to_string(),
        driver: "bridge".to_string(),
        labels: [(labels::MARKER.to_string(), labels::MARKER.to_string())]
            .into_iter()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_defaults() {
        let net = network();
        assert_eq!(net.name, "amazeeio-network");
        assert_eq!(net.driver, "bridge");
        assert_eq!(net.labels.get("pygmy").map(String::as_str), Some("pygmy"));
    }
}
