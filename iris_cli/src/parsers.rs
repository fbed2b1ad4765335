use iris_osrm::travel_mode::TravelMode;
use jiff::SpanRelativeTo;

pub fn parse_duration(input: &str) -> Result<jiff::SignedDuration, String> {
    if let Ok(duration) = input.parse::<jiff::SignedDuration>() {
        return Ok(duration);
    }

    if let Ok(duration) = input
        .parse::<jiff::Span>()
        .and_then(|span| span.to_duration(SpanRelativeTo::days_are_24_hours()))
    {
        return Ok(duration);
    }

    if let Ok(seconds) = input.parse::<i64>() {
        return Ok(jiff::SignedDuration::from_secs(seconds.abs()));
    }

    Err(String::from("Invalid duration"))
}

pub fn parse_travel_mode(input: &str) -> Result<TravelMode, String> {
    match input.to_ascii_lowercase().as_str() {
        "driving" | "car" => Ok(TravelMode::Driving),
        "cycling" | "bike" => Ok(TravelMode::Cycling),
        "walking" | "foot" => Ok(TravelMode::Walking),
        other => Err(format!(
            "Invalid travel mode '{other}', expected driving, cycling or walking"
        )),
    }
}

/// Parses a `key=value` routing option.
pub fn parse_key_value(input: &str) -> Result<(String, String), String> {
    match input.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("Invalid option '{input}', expected key=value")),
    }
}
