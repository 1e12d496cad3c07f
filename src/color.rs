use log::warn;
use palette::Srgb;
use plotters::style::RGBColor;

// ---------------------------------------------------------------------------
// Named colours → plotters colours
// ---------------------------------------------------------------------------

/// Used when a series names a colour palette does not know.
pub const FALLBACK: RGBColor = RGBColor(128, 128, 128);

/// Resolve a CSS colour name (`"gray"`, `"orange"`, ...) to an RGB colour.
pub fn named(name: &str) -> RGBColor {
    match palette::named::from_str(&name.to_ascii_lowercase()) {
        Some(c) => to_rgb(c),
        None => {
            warn!("unknown colour '{name}', using gray");
            FALLBACK
        }
    }
}

pub fn to_rgb(c: Srgb<u8>) -> RGBColor {
    RGBColor(c.red, c.green, c.blue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_names_resolve() {
        assert_eq!(named("gray"), RGBColor(128, 128, 128));
        assert_eq!(named("blue"), RGBColor(0, 0, 255));
        assert_eq!(named("green"), RGBColor(0, 128, 0));
        assert_eq!(named("Orange"), RGBColor(255, 165, 0));
    }

    #[test]
    fn unknown_name_falls_back() {
        assert_eq!(named("not-a-colour"), FALLBACK);
    }
}
