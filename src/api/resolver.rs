use tracing::{debug, warn};

use super::nominatim::{RawAddress, ReverseGeocoder, ReverseResponse};
use crate::domain::{AddressInfo, Point, RegionDefaults};

/// Best-effort reverse geocoding into a fully populated [`AddressInfo`]
///
/// Each call to [`resolve`](Self::resolve) is independent. There is no
/// sequencing guard: when two calls overlap, whichever finishes last is the
/// one the caller sees last, even if it was started first. Callers that need
/// strict ordering must tag requests themselves (e.g. compare the point in
/// the returned [`crate::pipeline::ResolvedLocation`] with the current pin).
#[derive(Debug)]
pub struct AddressResolver<G> {
    geocoder: G,
    defaults: RegionDefaults,
}

impl<G: ReverseGeocoder> AddressResolver<G> {
    pub fn new(geocoder: G, defaults: RegionDefaults) -> Self {
        Self { geocoder, defaults }
    }

    /// Look up the address at `point`
    ///
    /// Network failures, timeouts, error statuses and malformed bodies are
    /// logged and yield `None`; this never fails the caller.
    pub async fn resolve(&self, point: Point) -> Option<AddressInfo> {
        match self.geocoder.reverse(point).await {
            Ok(response) => {
                let address = normalize(&response, &self.defaults);
                debug!(lat = point.lat, lng = point.lng, city = %address.city, "address resolved");
                Some(address)
            }
            Err(e) => {
                warn!(lat = point.lat, lng = point.lng, error = %e, "reverse geocoding failed");
                None
            }
        }
    }
}

/// Map a geocoder response onto [`AddressInfo`], applying per-field fallbacks
///
/// - street: road, street, ""
/// - suburb: suburb, neighbourhood, quarter, village, ""
/// - city: city, town, municipality, default municipality
/// - state, postcode, country: response value, configured default
///
/// Empty strings count as missing.
pub fn normalize(response: &ReverseResponse, defaults: &RegionDefaults) -> AddressInfo {
    let empty = RawAddress::default();
    let a = response.address.as_ref().unwrap_or(&empty);

    AddressInfo {
        street: first_of(&[&a.road, &a.street]).unwrap_or_default(),
        house_number: first_of(&[&a.house_number]).unwrap_or_default(),
        suburb: first_of(&[&a.suburb, &a.neighbourhood, &a.quarter, &a.village])
            .unwrap_or_default(),
        city: first_of(&[&a.city, &a.town, &a.municipality])
            .unwrap_or_else(|| defaults.municipality.clone()),
        state: first_of(&[&a.state]).unwrap_or_else(|| defaults.state.clone()),
        postcode: first_of(&[&a.postcode]).unwrap_or_else(|| defaults.postcode.clone()),
        country: first_of(&[&a.country]).unwrap_or_else(|| defaults.country.clone()),
        full_address: first_of(&[&response.display_name]).unwrap_or_default(),
    }
}

fn first_of(fields: &[&Option<String>]) -> Option<String> {
    fields
        .iter()
        .filter_map(|f| f.as_deref())
        .find(|s| !s.is_empty())
        .map(str::to_string)
}
