//! Response shapes of the two remote reads and the rules for turning an
//! IP-geolocation payload into displayable location fields.

use serde::{Deserialize, Serialize};

use crate::{
    CoordinateError, FetchError, ValidatedCoordinate, UNKNOWN_CITY, UNKNOWN_COUNTRY,
    UNKNOWN_REGION,
};

/// Subset of the ipinfo.io `/json` payload. Every field may be absent or null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpInfoResponse {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    /// `"lat,lon"`
    #[serde(default)]
    pub loc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyScoreResponse {
    pub safety_score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub city: String,
    pub region: String,
    pub country: String,
    pub coordinate: Option<ValidatedCoordinate>,
}

/// Applies the per-field fallbacks and parses `loc`.
///
/// A missing or blank `loc` yields `coordinate: None`; a present but unusable
/// one fails the whole resolution.
///
/// # Errors
///
/// Returns [`FetchError::Parse`] when `loc` is malformed or out of range.
pub fn resolve_location(response: IpInfoResponse) -> Result<ResolvedLocation, FetchError> {
    let coordinate = match response.loc.as_deref().map(str::trim) {
        Some(loc) if !loc.is_empty() => Some(parse_loc(loc)?),
        _ => None,
    };

    Ok(ResolvedLocation {
        city: or_unknown(response.city, UNKNOWN_CITY),
        region: or_unknown(response.region, UNKNOWN_REGION),
        country: or_unknown(response.country, UNKNOWN_COUNTRY),
        coordinate,
    })
}

fn or_unknown(value: Option<String>, fallback: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

/// Parses `"lat,lon"`, splitting on the first comma.
///
/// # Errors
///
/// [`CoordinateError::Malformed`] when there is no comma or either half is not
/// a number, otherwise the range errors of [`ValidatedCoordinate::new`].
pub fn parse_loc(loc: &str) -> Result<ValidatedCoordinate, CoordinateError> {
    let malformed = || CoordinateError::Malformed(loc.to_string());

    let (lat, lon) = loc.split_once(',').ok_or_else(malformed)?;
    let lat: f64 = lat.trim().parse().map_err(|_| malformed())?;
    let lon: f64 = lon.trim().parse().map_err(|_| malformed())?;

    ValidatedCoordinate::new(lat, lon)
}
