//! Geocodificación inversa: coordenadas → "aldea, distrito, estado".

use crate::config::ProviderConfig;
use crate::errors::{ProviderError, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

#[async_trait::async_trait]
pub trait ReverseGeocoder: Send + Sync {
    async fn reverse(&self, lat: f64, lon: f64) -> Result<String>;
}

/// Campos de `address` que usamos de la respuesta de Nominatim.
#[derive(Debug, Default, Deserialize)]
pub struct NominatimAddress {
    pub village: Option<String>,
    pub hamlet: Option<String>,
    pub town: Option<String>,
    pub city_district: Option<String>,
    pub county: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    #[serde(default)]
    address: Option<NominatimAddress>,
    #[serde(default)]
    error: Option<String>,
}

fn non_empty(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Aldea (village, hamlet, town o city_district, en ese orden), distrito
/// (county) y estado, omitiendo las partes vacías.
pub fn format_address(address: &NominatimAddress) -> String {
    let village = non_empty(&address.village).or_else(|| non_empty(&address.hamlet))
                                             .or_else(|| non_empty(&address.town))
                                             .or_else(|| non_empty(&address.city_district));
    [village, non_empty(&address.county), non_empty(&address.state)].into_iter()
                                                                    .flatten()
                                                                    .collect::<Vec<_>>()
                                                                    .join(", ")
}

pub struct NominatimGeocoder {
    client: Client,
    url: String,
}

impl NominatimGeocoder {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout)
                                      .user_agent(config.user_agent.clone())
                                      .build()?;
        Ok(Self { client, url: config.nominatim_url.clone() })
    }
}

#[async_trait::async_trait]
impl ReverseGeocoder for NominatimGeocoder {
    async fn reverse(&self, lat: f64, lon: f64) -> Result<String> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(ProviderError::InvalidResponse(format!("coordenadas fuera de rango: {}, {}", lat, lon)));
        }
        let (lat_s, lon_s) = (lat.to_string(), lon.to_string());
        debug!("nominatim: reverse {}, {}", lat_s, lon_s);
        let response = self.client
                           .get(&self.url)
                           .query(&[("format", "json"),
                                    ("lat", lat_s.as_str()),
                                    ("lon", lon_s.as_str()),
                                    ("zoom", "18"),
                                    ("addressdetails", "1")])
                           .send()
                           .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api { status: status.as_u16(), body });
        }
        let parsed: NominatimResponse = response.json().await?;
        if let Some(err) = parsed.error {
            return Err(ProviderError::InvalidResponse(err));
        }
        let formatted = parsed.address.as_ref().map(format_address).unwrap_or_default();
        if formatted.is_empty() {
            return Err(ProviderError::InvalidResponse("dirección vacía".into()));
        }
        Ok(formatted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(village: Option<&str>, town: Option<&str>, county: Option<&str>, state: Option<&str>) -> NominatimAddress {
        NominatimAddress { village: village.map(String::from),
                           town: town.map(String::from),
                           county: county.map(String::from),
                           state: state.map(String::from),
                           ..Default::default() }
    }

    #[test]
    fn full_address() {
        assert_eq!(format_address(&addr(Some("Rampur"), None, Some("Puri"), Some("Odisha"))), "Rampur, Puri, Odisha");
    }

    #[test]
    fn falls_back_to_town_and_skips_empty_parts() {
        assert_eq!(format_address(&addr(None, Some("Konark"), None, Some("Odisha"))), "Konark, Odisha");
        assert_eq!(format_address(&addr(Some("  "), None, Some("Khordha"), None)), "Khordha");
        assert_eq!(format_address(&NominatimAddress::default()), "");
    }
}
