//! WCAG 2.1 contrast evaluation.
//!
//! Pure luminance math: sRGB channel linearization, the weighted relative
//! luminance sum, and the `(L1 + 0.05) / (L2 + 0.05)` contrast ratio.
//! Level AA requires 4.5:1 for normal text and 3:1 for large text
//! (18pt+, or 14pt+ bold).

use crate::model::Rgb;

/// Minimum AA ratio for normal text.
pub const AA_NORMAL_RATIO: f64 = 4.5;
/// Minimum AA ratio for large text.
pub const AA_LARGE_RATIO: f64 = 3.0;
/// Point size at which text counts as large.
pub const LARGE_TEXT_PT: f32 = 18.0;
/// Point size at which bold text counts as large.
pub const LARGE_TEXT_BOLD_PT: f32 = 14.0;

/// Outcome of evaluating a ratio against the AA thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContrastLevel {
    /// Meets the AA minimum for the given text size.
    Pass,
    /// Normal text between 3:1 and 4.5:1 - readable for large text only.
    Borderline,
    /// Below 3:1 - fails for any text size.
    Fail,
}

/// Relative luminance of a color per the WCAG formula.
pub fn relative_luminance(color: Rgb) -> f64 {
    fn linearize(channel: u8) -> f64 {
        let c = channel as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }

    0.2126 * linearize(color.r) + 0.7152 * linearize(color.g) + 0.0722 * linearize(color.b)
}

/// Contrast ratio between two colors, rounded to two decimals.
///
/// The lighter color's luminance goes in the numerator, so the result is
/// always in [1.0, 21.0] regardless of argument order.
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    let ratio = (lighter + 0.05) / (darker + 0.05);
    (ratio * 100.0).round() / 100.0
}

/// Whether text qualifies as "large" per the WCAG definition. Unknown sizes
/// are conservatively treated as normal text.
pub fn is_large_text(font_size_pt: Option<f32>, bold: bool) -> bool {
    match font_size_pt {
        Some(size) if bold => size >= LARGE_TEXT_BOLD_PT,
        Some(size) => size >= LARGE_TEXT_PT,
        None => false,
    }
}

/// Classify a computed ratio for the given text size.
pub fn evaluate(ratio: f64, large_text: bool) -> ContrastLevel {
    if ratio < AA_LARGE_RATIO {
        ContrastLevel::Fail
    } else if large_text || ratio >= AA_NORMAL_RATIO {
        ContrastLevel::Pass
    } else {
        ContrastLevel::Borderline
    }
}

/// The ratio a text run must meet, for report messages.
pub fn required_ratio(large_text: bool) -> f64 {
    if large_text {
        AA_LARGE_RATIO
    } else {
        AA_NORMAL_RATIO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgb = Rgb::new(0, 0, 0);
    const WHITE: Rgb = Rgb::new(255, 255, 255);
    const GRAY: Rgb = Rgb::new(0xcc, 0xcc, 0xcc);

    #[test]
    fn test_black_on_white_is_21() {
        let ratio = contrast_ratio(BLACK, WHITE);
        assert_eq!(ratio, 21.0);
        assert_eq!(evaluate(ratio, false), ContrastLevel::Pass);
        // Argument order must not matter.
        assert_eq!(contrast_ratio(WHITE, BLACK), 21.0);
    }

    #[test]
    fn test_light_gray_on_white_fails() {
        let ratio = contrast_ratio(GRAY, WHITE);
        assert!(ratio < 3.0, "expected ratio below 3.0, got {}", ratio);
        assert_eq!(evaluate(ratio, false), ContrastLevel::Fail);
        assert_eq!(evaluate(ratio, true), ContrastLevel::Fail);
    }

    #[test]
    fn test_same_color_is_unity() {
        assert_eq!(contrast_ratio(GRAY, GRAY), 1.0);
    }

    #[test]
    fn test_borderline_band_for_normal_text() {
        // #767676 on white is just above 4.5:1 and passes for normal text.
        let ratio = contrast_ratio(Rgb::new(0x76, 0x76, 0x76), WHITE);
        assert!(ratio >= 4.5);
        assert_eq!(evaluate(ratio, false), ContrastLevel::Pass);

        // #949494 on white sits between 3:1 and 4.5:1: large-text only.
        let ratio = contrast_ratio(Rgb::new(0x94, 0x94, 0x94), WHITE);
        assert!(
            ratio >= 3.0 && ratio < 4.5,
            "expected borderline ratio, got {}",
            ratio
        );
        assert_eq!(evaluate(ratio, false), ContrastLevel::Borderline);
        assert_eq!(evaluate(ratio, true), ContrastLevel::Pass);
    }

    #[test]
    fn test_large_text_definition() {
        assert!(is_large_text(Some(18.0), false));
        assert!(!is_large_text(Some(17.5), false));
        assert!(is_large_text(Some(14.0), true));
        assert!(!is_large_text(Some(13.0), true));
        assert!(!is_large_text(None, true));
    }

    #[test]
    fn test_luminance_extremes() {
        assert!(relative_luminance(BLACK) < 1e-9);
        assert!((relative_luminance(WHITE) - 1.0).abs() < 1e-9);
    }
}
