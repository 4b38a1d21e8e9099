use plotters::style::RGBColor;

/// Ordered color list cycled across categorical chart series. Built
/// from the configured hex strings; invalid entries are dropped.
#[derive(Debug, Clone)]
pub struct Palette {
    colors: Vec<RGBColor>,
}

impl Palette {
    pub fn from_hex(hex_colors: &[String]) -> Self {
        let colors: Vec<RGBColor> = hex_colors
            .iter()
            .filter_map(|h| parse_hex_color(h))
            .collect();
        Self {
            colors: if colors.is_empty() {
                vec![RGBColor(128, 128, 128)]
            } else {
                colors
            },
        }
    }

    /// Cycles when the series index runs past the configured colors.
    pub fn color(&self, index: usize) -> RGBColor {
        self.colors[index % self.colors.len()]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }
}

pub fn parse_hex_color(hex: &str) -> Option<RGBColor> {
    let hex = hex.trim_start_matches('#');
    if hex.len() < 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(RGBColor(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#8C7853"), Some(RGBColor(0x8C, 0x78, 0x53)));
        assert_eq!(parse_hex_color("B8860B"), Some(RGBColor(0xB8, 0x86, 0x0B)));
        assert_eq!(parse_hex_color("#xyz"), None);
    }

    #[test]
    fn test_palette_cycles_past_its_length() {
        let palette = Palette::from_hex(&[
            "#8C7853".to_string(),
            "#B77A62".to_string(),
            "#C49C6C".to_string(),
        ]);
        assert_eq!(palette.len(), 3);
        assert_eq!(palette.color(0), palette.color(3));
        assert_eq!(palette.color(2), palette.color(5));
    }

    #[test]
    fn test_empty_palette_falls_back_to_gray() {
        let palette = Palette::from_hex(&[]);
        assert_eq!(palette.color(0), RGBColor(128, 128, 128));
    }
}
