//! Display formatting for popups, tooltips, the table and map controls.
//!
//! All times render in UTC with an explicit `UTC` suffix so the display
//! string never depends on the viewer's timezone.

use chrono::{DateTime, Utc};
use quake_types::{EarthquakeEvent, LatLng};

/// Shown when an epoch value is outside the representable range.
const INVALID_DATE: &str = "Invalid Date";

/// Long form used in marker popups, e.g. `May 1, 2024, 3:04:05 PM UTC`.
pub fn format_time_long(epoch_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(epoch_ms).map_or_else(
        || INVALID_DATE.to_owned(),
        |t| t.format("%B %-d, %Y, %-I:%M:%S %p UTC").to_string(),
    )
}

/// Short form used in table rows, e.g. `5/1/2024, 3:04:05 PM UTC`.
pub fn format_time_short(epoch_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(epoch_ms).map_or_else(
        || INVALID_DATE.to_owned(),
        |t| t.format("%-m/%-d/%Y, %-I:%M:%S %p UTC").to_string(),
    )
}

/// Escape text for inclusion in popup HTML.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Bold `{magnitude} {title}` heading shared by the popup and the tooltip.
pub fn event_heading(event: &EarthquakeEvent) -> String {
    format!("<b>{} {}</b>", event.magnitude, escape_html(&event.title))
}

/// Marker popup body.
pub fn event_popup(event: &EarthquakeEvent) -> String {
    format!(
        "{}<br/>Magnitude: {}<br/>Depth: {} km<br/>Time: {}",
        event_heading(event),
        event.magnitude,
        event.depth,
        format_time_long(event.time),
    )
}

/// Cursor readout for the mouse-position control.
pub fn mouse_position(position: LatLng) -> String {
    format!("Lat: {:.5}, Lng: {:.5}", position.lat, position.lng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quake_types::EventId;

    /// 2024-05-01T15:04:05Z
    const SAMPLE_MS: i64 = 1_714_575_845_000;

    #[test]
    fn long_time_is_unambiguous() {
        assert_eq!(format_time_long(SAMPLE_MS), "May 1, 2024, 3:04:05 PM UTC");
    }

    #[test]
    fn short_time_matches_table_layout() {
        assert_eq!(format_time_short(SAMPLE_MS), "5/1/2024, 3:04:05 PM UTC");
    }

    #[test]
    fn out_of_range_time_is_invalid_date() {
        assert_eq!(format_time_long(i64::MAX), "Invalid Date");
    }

    #[test]
    fn popup_escapes_title() {
        let event = EarthquakeEvent {
            id: EventId::from("x"),
            lat: 0.0,
            long: 0.0,
            depth: 10.0,
            magnitude: 5.0,
            title: String::from("<script>"),
            time: SAMPLE_MS,
        };
        let popup = event_popup(&event);
        assert!(popup.starts_with("<b>5 &lt;script&gt;</b>"));
        assert!(popup.contains("Depth: 10 km"));
        assert!(popup.ends_with("3:04:05 PM UTC"));
    }

    #[test]
    fn mouse_position_uses_five_decimals() {
        assert_eq!(
            mouse_position(LatLng::new(12.345_678, -0.5)),
            "Lat: 12.34568, Lng: -0.50000"
        );
    }
}
