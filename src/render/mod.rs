//! Writing probe results back onto the page

use crate::defaults::SLOW_THRESHOLD_MS;
use crate::page::{ElementLookup, FontWeight, MarkerColor, MarkerStyle};
use regex::Regex;
use std::sync::OnceLock;

/// Write a formatted time onto the element with `element_id`
///
/// Returns `false` when the element does not exist; that is not an error and
/// nothing is written. Errors get the alert style; successes are colored by
/// the numeric prefix of `time_str` against the slow threshold.
pub fn render_result<L: ElementLookup + ?Sized>(
    surface: &mut L,
    element_id: &str,
    time_str: &str,
    is_error: bool,
) -> bool {
    let Some(element) = surface.element_by_id_mut(element_id) else {
        return false;
    };

    element.text = time_str.to_string();
    element.style = Some(style_for(time_str, is_error));
    true
}

/// Style the renderer applies for a label
pub fn style_for(time_str: &str, is_error: bool) -> MarkerStyle {
    if is_error {
        return MarkerStyle {
            color: MarkerColor::Alert,
            font_weight: FontWeight::Bold,
        };
    }

    // A label with no numeric prefix never counts as slow.
    let slow = leading_integer(time_str).is_some_and(|ms| ms > SLOW_THRESHOLD_MS as f64);
    MarkerStyle {
        color: if slow { MarkerColor::Warning } else { MarkerColor::Healthy },
        font_weight: FontWeight::Normal,
    }
}

/// Integer prefix of a label: leading whitespace, optional sign, digits
pub fn leading_integer(text: &str) -> Option<f64> {
    static PREFIX: OnceLock<Regex> = OnceLock::new();
    let re = PREFIX.get_or_init(|| Regex::new(r"^\s*([+-]?\d+)").expect("static regex"));

    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::MarkerElement;
    use std::collections::HashMap;

    #[derive(Default)]
    struct Surface(HashMap<String, MarkerElement>);

    impl Surface {
        fn with(id: &str) -> Self {
            let mut surface = Self::default();
            surface.0.insert(
                id.to_string(),
                MarkerElement {
                    id: id.to_string(),
                    tag: "i".to_string(),
                    text: "--".to_string(),
                    style: None,
                },
            );
            surface
        }
    }

    impl ElementLookup for Surface {
        fn element_by_id_mut(&mut self, id: &str) -> Option<&mut MarkerElement> {
            self.0.get_mut(id)
        }
    }

    #[test]
    fn test_fast_success_is_healthy() {
        let mut surface = Surface::with("lineMs1");
        assert!(render_result(&mut surface, "lineMs1", "120ms", false));

        let element = &surface.0["lineMs1"];
        assert_eq!(element.text, "120ms");
        assert_eq!(
            element.style,
            Some(MarkerStyle { color: MarkerColor::Healthy, font_weight: FontWeight::Normal })
        );
    }

    #[test]
    fn test_threshold_boundary() {
        assert_eq!(style_for("500ms", false).color, MarkerColor::Healthy);
        assert_eq!(style_for("501ms", false).color, MarkerColor::Warning);
        assert_eq!(style_for("2999ms", false).font_weight, FontWeight::Normal);
    }

    #[test]
    fn test_error_is_bold_alert() {
        let mut surface = Surface::with("lineMs3");
        assert!(render_result(&mut surface, "lineMs3", "999ms", true));

        let element = &surface.0["lineMs3"];
        assert_eq!(element.text, "999ms");
        assert_eq!(
            element.style,
            Some(MarkerStyle { color: MarkerColor::Alert, font_weight: FontWeight::Bold })
        );
    }

    #[test]
    fn test_error_flag_wins_over_fast_label() {
        assert_eq!(style_for("10ms", true).color, MarkerColor::Alert);
    }

    #[test]
    fn test_missing_element_is_noop() {
        let mut surface = Surface::with("lineMs1");
        assert!(!render_result(&mut surface, "lineMs9", "45ms", false));
        assert_eq!(surface.0["lineMs1"].text, "--");
    }

    #[test]
    fn test_rerender_resets_weight() {
        let mut surface = Surface::with("lineMs1");
        render_result(&mut surface, "lineMs1", "999ms", true);
        render_result(&mut surface, "lineMs1", "45ms", false);
        assert_eq!(surface.0["lineMs1"].style.unwrap().font_weight, FontWeight::Normal);
    }

    #[test]
    fn test_leading_integer() {
        assert_eq!(leading_integer("120ms"), Some(120.0));
        assert_eq!(leading_integer("  42 ms"), Some(42.0));
        assert_eq!(leading_integer("-5ms"), Some(-5.0));
        assert_eq!(leading_integer("ms"), None);
        assert_eq!(leading_integer(""), None);
        assert_eq!(leading_integer("12.9ms"), Some(12.0));
    }

    #[test]
    fn test_non_numeric_label_is_healthy() {
        assert_eq!(style_for("n/a", false).color, MarkerColor::Healthy);
    }
}
