/// Spells out a horizontal distance in meters, capping at "10 kilómetros o
/// más" for the 9999 visibility code.
pub fn format_distance_meters(meters: u32) -> String {
    if meters >= 9999 {
        return "10 kilómetros o más".to_string();
    }
    if meters >= 1000 {
        let km = meters / 1000;
        let rem = meters % 1000;
        let unit = if km == 1 { "kilómetro" } else { "kilómetros" };
        return if rem == 0 {
            format!("{km} {unit}")
        } else {
            format!("{km} {unit} y {rem} metros")
        };
    }
    if meters == 1 {
        return "1 metro".to_string();
    }
    format!("{meters} metros")
}
