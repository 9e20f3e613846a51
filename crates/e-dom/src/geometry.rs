//! Geometry and forced layout
//!
//! There is no layout engine behind this tree. Reading a box metric still
//! behaves like a browser: pending mutations are flushed first, and the
//! number of flushes is observable.

/// Layout invalidation bookkeeping
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutState {
    dirty: bool,
    passes: u64,
}

impl LayoutState {
    /// Mark layout as stale after a mutation
    #[inline]
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Whether a mutation happened since the last flush
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of layout passes performed so far
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Run a layout pass if anything is pending. Returns true if one ran.
    pub fn flush(&mut self) -> bool {
        if !self.dirty {
            return false;
        }
        self.dirty = false;
        self.passes += 1;
        tracing::debug!(pass = self.passes, "layout flushed");
        true
    }
}

/// Rectangle geometry
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create with dimensions
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }
}

/// Parse a `<n>px` (or unitless) length
pub(crate) fn parse_px(value: &str) -> Option<f64> {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value).trim();
    number.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flush_only_when_dirty() {
        let mut layout = LayoutState::default();
        assert!(!layout.flush());

        layout.invalidate();
        assert!(layout.is_dirty());
        assert!(layout.flush());
        assert!(!layout.flush());
        assert_eq!(layout.passes(), 1);
    }

    #[test]
    fn test_parse_px() {
        assert_eq!(parse_px("10px"), Some(10.0));
        assert_eq!(parse_px(" 2.5 "), Some(2.5));
        assert_eq!(parse_px("auto"), None);
    }
}
