use serde::Deserialize;

/// Structured address of a resolved pin; every field is always populated
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AddressInfo {
    pub street: String,
    pub house_number: String,
    pub suburb: String,
    pub city: String,
    pub state: String,
    pub postcode: String,
    pub country: String,
    pub full_address: String,
}

fn default_municipality() -> String {
    "Ucú".to_string()
}
fn default_state() -> String {
    "Yucatán".to_string()
}
fn default_postcode() -> String {
    "97357".to_string()
}
fn default_country() -> String {
    "México".to_string()
}

/// Values substituted when the geocoder omits a field, and the region an
/// address is expected to belong to
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegionDefaults {
    #[serde(default = "default_municipality")]
    pub municipality: String,
    #[serde(default = "default_state")]
    pub state: String,
    #[serde(default = "default_postcode")]
    pub postcode: String,
    #[serde(default = "default_country")]
    pub country: String,
    /// Postcodes accepted by [`AddressInfo::matches_region`]; empty accepts any
    #[serde(default)]
    pub postcodes: Vec<String>,
}

impl Default for RegionDefaults {
    fn default() -> Self {
        Self {
            municipality: default_municipality(),
            state: default_state(),
            postcode: default_postcode(),
            country: default_country(),
            postcodes: Vec::new(),
        }
    }
}

impl AddressInfo {
    /// Whether the address names the configured municipality and state
    ///
    /// Comparison ignores case, surrounding whitespace and diacritics, so
    /// "Merida" matches "Mérida" whether the accent is precomposed or a
    /// separate combining mark.
    pub fn matches_region(&self, region: &RegionDefaults) -> bool {
        let same_city = fold(&self.city) == fold(&region.municipality);
        let same_state = fold(&self.state) == fold(&region.state);
        let postcode_ok = self.postcode.is_empty()
            || region.postcodes.is_empty()
            || region.postcodes.iter().any(|p| p == &self.postcode);

        same_city && same_state && postcode_ok
    }

    /// Street line for a free-text address field, e.g. "Calle 20 104"
    pub fn street_line(&self) -> String {
        match (self.street.is_empty(), self.house_number.is_empty()) {
            (true, _) => String::new(),
            (false, true) => self.street.clone(),
            (false, false) => format!("{} {}", self.street, self.house_number),
        }
    }
}

/// Combining Diacritical Marks block
fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

fn fold(s: &str) -> String {
    s.trim()
        .chars()
        .flat_map(char::to_lowercase)
        .filter(|c| !is_combining_mark(*c))
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}
