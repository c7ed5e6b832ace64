//! Playback devices as reported by the provider.

use serde::{Deserialize, Serialize};

/// A provider-registered playback endpoint (speaker, app instance, ...).
///
/// Deserialized straight from the provider's device list; fields the gateway
/// does not use are still captured so that logs show the full snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Opaque device id. The provider may report `null` for restricted devices.
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_private_session: bool,
    #[serde(default)]
    pub is_restricted: bool,
    #[serde(default)]
    pub volume_percent: Option<u8>,
}

impl Device {
    /// Whether this device answers to `device_id`.
    ///
    /// An absent `device_id` only matches a device that itself has no id.
    #[must_use]
    pub fn matches(&self, device_id: Option<&str>) -> bool {
        self.id.as_deref() == device_id
    }
}

/// The public projection of a [`Device`] returned by `GET /device`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSummary {
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl From<Device> for DeviceSummary {
    fn from(d: Device) -> Self {
        Self {
            id: d.id,
            name: d.name,
            kind: d.kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_provider_payload() {
        let d: Device = serde_json::from_value(json!({
            "id": "abc",
            "is_active": true,
            "is_private_session": false,
            "is_restricted": false,
            "name": "Kitchen",
            "supports_volume": true,
            "type": "Speaker",
            "volume_percent": 40
        }))
        .unwrap();
        assert_eq!(d.id.as_deref(), Some("abc"));
        assert_eq!(d.kind, "Speaker");
        assert!(d.is_active);
        assert_eq!(d.volume_percent, Some(40));
    }

    #[test]
    fn test_deserialize_rejects_missing_name() {
        let res = serde_json::from_value::<Device>(json!({"id": "abc", "type": "Speaker"}));
        assert!(res.is_err());
    }

    #[test]
    fn test_missing_is_active_defaults_false() {
        let d: Device =
            serde_json::from_value(json!({"id": "x", "name": "Phone", "type": "Smartphone"}))
                .unwrap();
        assert!(!d.is_active);
    }

    #[test]
    fn test_matches() {
        let d: Device =
            serde_json::from_value(json!({"id": "x", "name": "Phone", "type": "Smartphone"}))
                .unwrap();
        assert!(d.matches(Some("x")));
        assert!(!d.matches(Some("y")));
        assert!(!d.matches(Some("")));
        assert!(!d.matches(None));
    }

    #[test]
    fn test_summary_drops_activity() {
        let d: Device = serde_json::from_value(
            json!({"id": "x", "name": "Phone", "type": "Smartphone", "is_active": true}),
        )
        .unwrap();
        let v = serde_json::to_value(DeviceSummary::from(d)).unwrap();
        assert_eq!(v, json!({"id": "x", "name": "Phone", "type": "Smartphone"}));
    }
}
