//! Device capability providers.
//!
//! Location and image capture are opaque asynchronous providers: each
//! either yields a value or reports that the user denied permission or
//! the capability is unavailable. Results only feed display fields and
//! the add-item flow; no cart or session logic depends on them.

use serde::{Deserialize, Serialize};
use url::Url;

/// Outcome of asking the device for a capability.
#[derive(Debug, Clone, PartialEq)]
pub enum CapabilityOutcome<T> {
    /// Permission granted and a value produced.
    Granted(T),
    /// The user denied the permission prompt.
    Denied,
    /// The capability could not produce a value.
    Unavailable(String),
}

impl<T> CapabilityOutcome<T> {
    /// The granted value, if any.
    pub fn granted(self) -> Option<T> {
        match self {
            Self::Granted(value) => Some(value),
            Self::Denied | Self::Unavailable(_) => None,
        }
    }
}

/// A one-shot device position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    /// Coordinate fallback string shown when reverse geocoding fails,
    /// e.g. "32.0853, 34.7818".
    #[must_use]
    pub fn display_coords(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// A reverse-geocoded street address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub name: String,
    pub city: String,
    pub region: String,
    pub country: String,
}

impl Address {
    /// The readable form shown in the shop header.
    #[must_use]
    pub fn readable(&self) -> String {
        format!(
            "{}, {}, {}, {}",
            self.name, self.city, self.region, self.country
        )
    }
}

/// An image selected from the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedImage {
    /// Device-local URI of the picked image.
    pub uri: Url,
}

/// Where an image pick comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    Camera,
    Gallery,
}

/// Foreground location: permission prompt, one-shot position, reverse
/// geocode.
#[allow(async_fn_in_trait)]
pub trait LocationProvider {
    /// Request permission and read the current position.
    async fn current_position(&self) -> CapabilityOutcome<Position>;

    /// Resolve a position to a street address.
    async fn reverse_geocode(&self, position: &Position) -> CapabilityOutcome<Address>;
}

/// Camera/gallery permission prompt plus a single image pick.
#[allow(async_fn_in_trait)]
pub trait ImagePicker {
    /// Request permission and pick one image from `source`.
    async fn pick_image(&self, source: ImageSource) -> CapabilityOutcome<PickedImage>;
}

/// Resolve the location banner for the shop header.
///
/// Prefers the readable address; falls back to raw coordinates when the
/// geocoder comes up empty; `None` when the permission is denied or the
/// device has no fix.
pub async fn location_banner<L: LocationProvider>(provider: &L) -> Option<String> {
    let position = match provider.current_position().await {
        CapabilityOutcome::Granted(position) => position,
        CapabilityOutcome::Denied => {
            tracing::warn!("location permission denied");
            return None;
        }
        CapabilityOutcome::Unavailable(reason) => {
            tracing::warn!(%reason, "location unavailable");
            return None;
        }
    };

    match provider.reverse_geocode(&position).await {
        CapabilityOutcome::Granted(address) => Some(address.readable()),
        CapabilityOutcome::Denied | CapabilityOutcome::Unavailable(_) => {
            Some(position.display_coords())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedLocation {
        position: CapabilityOutcome<Position>,
        address: CapabilityOutcome<Address>,
    }

    impl LocationProvider for FixedLocation {
        async fn current_position(&self) -> CapabilityOutcome<Position> {
            self.position.clone()
        }

        async fn reverse_geocode(&self, _position: &Position) -> CapabilityOutcome<Address> {
            self.address.clone()
        }
    }

    fn tel_aviv() -> Position {
        Position {
            latitude: 32.0853,
            longitude: 34.7818,
        }
    }

    #[tokio::test]
    async fn test_banner_prefers_readable_address() {
        let provider = FixedLocation {
            position: CapabilityOutcome::Granted(tel_aviv()),
            address: CapabilityOutcome::Granted(Address {
                name: "1 Rothschild Blvd".to_owned(),
                city: "Tel Aviv".to_owned(),
                region: "Tel Aviv District".to_owned(),
                country: "Israel".to_owned(),
            }),
        };

        assert_eq!(
            location_banner(&provider).await.as_deref(),
            Some("1 Rothschild Blvd, Tel Aviv, Tel Aviv District, Israel")
        );
    }

    #[tokio::test]
    async fn test_banner_falls_back_to_coordinates() {
        let provider = FixedLocation {
            position: CapabilityOutcome::Granted(tel_aviv()),
            address: CapabilityOutcome::Unavailable("no geocoder".to_owned()),
        };

        assert_eq!(
            location_banner(&provider).await.as_deref(),
            Some("32.0853, 34.7818")
        );
    }

    #[tokio::test]
    async fn test_banner_absent_when_permission_denied() {
        let provider = FixedLocation {
            position: CapabilityOutcome::Denied,
            address: CapabilityOutcome::Denied,
        };

        assert_eq!(location_banner(&provider).await, None);
    }

    #[test]
    fn test_granted_extracts_value() {
        let outcome = CapabilityOutcome::Granted(7);
        assert_eq!(outcome.granted(), Some(7));

        let denied: CapabilityOutcome<i32> = CapabilityOutcome::Denied;
        assert_eq!(denied.granted(), None);
    }
}
