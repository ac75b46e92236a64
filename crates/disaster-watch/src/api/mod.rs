//! API clients for the search and geocoding services

pub mod nominatim;
pub mod serpapi;

pub use nominatim::{Coordinates, Geocoder, NominatimGeocoder};
pub use serpapi::{NO_RESULTS_SENTINEL, SerpApiClient};
