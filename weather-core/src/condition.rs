/// Map an OpenWeatherMap `weather[0].main` value to the display vocabulary.
///
/// Unknown values are returned unchanged.
pub fn map_condition(raw: &str) -> String {
    let mapped = match raw {
        "Clear" => "Clear",
        "Clouds" => "Cloudy",
        "Rain" | "Drizzle" => "Rainy",
        "Thunderstorm" => "Stormy",
        "Snow" => "Snowy",
        "Mist" => "Misty",
        "Fog" => "Foggy",
        "Haze" => "Hazy",
        other => other,
    };
    mapped.to_string()
}
