//! Auto-sizing of the message input.

/// Line height used when the computed style doesn't have a usable one.
pub const DEFAULT_LINE_HEIGHT: f64 = 18.0;

const MIN_LINES: f64 = 2.0;
const MAX_LINES: f64 = 10.0;

/// Live measurements of the input element.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputMetrics {
    /// Computed line height in pixels, if the style specifies one.
    pub line_height: Option<f64>,
    /// Computed top padding in pixels.
    pub padding_top: f64,
    /// Computed bottom padding in pixels.
    pub padding_bottom: f64,
    /// Natural content height, measured after resetting height to `auto`.
    pub scroll_height: f64,
}

/// Returns the height the input should get: its natural height, but no
/// less than 2 lines and no more than 10 lines (padding included).
pub fn clamp_height(metrics: &InputMetrics) -> f64 {
    let line_height = metrics
        .line_height
        .filter(|h| h.is_finite() && *h > 0.0)
        .unwrap_or(DEFAULT_LINE_HEIGHT);
    let padding = metrics.padding_top + metrics.padding_bottom;
    let min_height = MIN_LINES * line_height + padding;
    let max_height = MAX_LINES * line_height + padding;
    metrics.scroll_height.clamp(min_height, max_height)
}

/// Parses a computed CSS length like `"18px"` or `"18.5"`.
///
/// Keywords such as `"normal"` yield `None`.
pub fn parse_px(value: &str) -> Option<f64> {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value);
    number.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(line_height: Option<f64>, scroll_height: f64) -> InputMetrics {
        InputMetrics {
            line_height,
            padding_top: 8.0,
            padding_bottom: 8.0,
            scroll_height,
        }
    }

    #[test]
    fn test_clamp_height() {
        // 2 lines of 20px plus 16px padding.
        assert_eq!(clamp_height(&metrics(Some(20.0), 10.0)), 56.0);
        assert_eq!(clamp_height(&metrics(Some(20.0), 120.0)), 120.0);
        // 10 lines of 20px plus 16px padding.
        assert_eq!(clamp_height(&metrics(Some(20.0), 900.0)), 216.0);
    }

    #[test]
    fn test_default_line_height() {
        assert_eq!(clamp_height(&metrics(None, 0.0)), 52.0);
        assert_eq!(clamp_height(&metrics(Some(0.0), 1000.0)), 196.0);
    }

    #[test]
    fn test_parse_px() {
        assert_eq!(parse_px("18px"), Some(18.0));
        assert_eq!(parse_px(" 7.5px "), Some(7.5));
        assert_eq!(parse_px("12"), Some(12.0));
        assert_eq!(parse_px("normal"), None);
        assert_eq!(parse_px(""), None);
    }
}
