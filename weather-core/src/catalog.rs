use crate::model::CityDescriptor;

/// Cities covered by the national summary, in display order.
pub const CANADIAN_CITIES: &[CityDescriptor] = &[
    city("Toronto", 43.6532, -79.3832, "Ontario"),
    city("Vancouver", 49.2827, -123.1207, "British Columbia"),
    city("Montreal", 45.5017, -73.5673, "Quebec"),
    city("Calgary", 51.0447, -114.0719, "Alberta"),
    city("Ottawa", 45.4215, -75.6972, "Ontario"),
    city("Edmonton", 53.5461, -113.4938, "Alberta"),
    city("Winnipeg", 49.8951, -97.1384, "Manitoba"),
    city("Quebec City", 46.8139, -71.2080, "Quebec"),
];

const fn city(
    name: &'static str,
    latitude: f64,
    longitude: f64,
    province: &'static str,
) -> CityDescriptor {
    CityDescriptor { name, latitude, longitude, province }
}

/// Fixed, ordered list of known cities.
#[derive(Debug, Clone, Copy)]
pub struct CityCatalog {
    cities: &'static [CityDescriptor],
}

impl Default for CityCatalog {
    fn default() -> Self {
        Self::new(CANADIAN_CITIES)
    }
}

impl CityCatalog {
    pub const fn new(cities: &'static [CityDescriptor]) -> Self {
        Self { cities }
    }

    pub fn cities(&self) -> &'static [CityDescriptor] {
        self.cities
    }

    /// Case-insensitive exact match on the city name.
    pub fn find(&self, name: &str) -> Option<&'static CityDescriptor> {
        let cities: &'static [CityDescriptor] = self.cities;
        let wanted = name.to_lowercase();
        cities.iter().find(|c| c.name.to_lowercase() == wanted)
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}
