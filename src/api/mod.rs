pub mod nominatim;
pub mod resolver;

pub use nominatim::{
    NominatimClient, RawAddress, ReverseGeocoder, ReverseResponse, parse_reverse_response,
};
pub use resolver::{AddressResolver, normalize};
