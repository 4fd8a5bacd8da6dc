//! Display scale factor used to pixel-snap text baselines.

/// Screen width assumed when the host has no screen open.
pub const FALLBACK_SCREEN_WIDTH: u32 = 1920;

/// Integer ratio between physical display pixels and logical screen units.
///
/// `screen_width` is the logical width of the active screen, if any. A zero
/// screen width yields `1` so callers never divide by zero.
///
/// ```
/// use sigil_render::gui_scale_factor;
///
/// assert_eq!(gui_scale_factor(3840, Some(1920)), 2);
/// assert_eq!(gui_scale_factor(1920, None), 1);
/// assert_eq!(gui_scale_factor(1920, Some(0)), 1);
/// ```
pub fn gui_scale_factor(display_width: u32, screen_width: Option<u32>) -> u32 {
    let screen_width = screen_width.unwrap_or(FALLBACK_SCREEN_WIDTH);
    if screen_width > 0 {
        display_width / screen_width
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_division() {
        assert_eq!(gui_scale_factor(2560, Some(854)), 2);
        assert_eq!(gui_scale_factor(1280, Some(427)), 2);
    }

    #[test]
    fn test_falls_back_to_default_width() {
        assert_eq!(gui_scale_factor(3840, None), 2);
    }
}
