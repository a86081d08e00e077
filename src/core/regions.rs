/// City-to-voivodeship lookup for the location scorer's same-region branch.
///
/// Covers the markets Pokojowo operates in; anything not listed simply never
/// matches on region. Entries are lowercase and include common ASCII spellings
/// alongside the Polish ones.
const REGIONS: &[(&str, &[&str])] = &[
    ("mazowieckie", &["warsaw", "warszawa", "radom", "płock"]),
    ("malopolskie", &["krakow", "kraków", "tarnow", "tarnów"]),
    ("wielkopolskie", &["poznan", "poznań", "kalisz", "konin"]),
    ("pomorskie", &["gdansk", "gdańsk", "gdynia", "sopot"]),
    ("dolnoslaskie", &["wroclaw", "wrocław", "legnica", "wałbrzych"]),
    ("slaskie", &["katowice", "gliwice", "zabrze", "bielsko-biała"]),
];

/// Find the region a free-text location belongs to, by city-name substring.
fn region_of(location: &str) -> Option<&'static str> {
    REGIONS
        .iter()
        .find(|(_, cities)| cities.iter().any(|city| location.contains(city)))
        .map(|(region, _)| *region)
}

/// Whether two free-text locations (already lowercased) fall in the same
/// region. Both must resolve to a known region for this to hold.
pub fn same_region(a: &str, b: &str) -> bool {
    match (region_of(a), region_of(b)) {
        (Some(region_a), Some(region_b)) => region_a == region_b,
        _ => false,
    }
}
