#[derive(Clone, Debug, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub bottom: f64,
}

impl SectionBounds {
    pub fn new(id: impl Into<String>, top: f64, bottom: f64) -> Self {
        Self {
            id: id.into(),
            top,
            bottom,
        }
    }

    fn contains(&self, line: f64) -> bool {
        self.top <= line && self.bottom >= line
    }
}

pub fn section_at_line(sections: &[SectionBounds], reference_line: f64) -> Option<&str> {
    sections
        .iter()
        .rev()
        .find(|section| !section.id.is_empty() && section.contains(reference_line))
        .map(|section| section.id.as_str())
}

pub fn header_is_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

#[derive(Clone, Debug, Default)]
pub struct SectionTracker {
    active: Option<String>,
    reference_line: f64,
}

impl SectionTracker {
    pub fn new(reference_line: f64) -> Self {
        Self {
            active: None,
            reference_line,
        }
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    // Feeds one scroll measurement. Returns the new section id only when it
    // differs from the stored one; when no section covers the reference line
    // the previous value is kept.
    pub fn observe(&mut self, sections: &[SectionBounds]) -> Option<String> {
        let candidate = section_at_line(sections, self.reference_line)?;

        if self.active.as_deref() == Some(candidate) {
            return None;
        }

        let changed = candidate.to_string();
        self.active = Some(changed.clone());
        Some(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(scroll: f64) -> Vec<SectionBounds> {
        // three stacked 600px sections starting at document top
        ["home", "services", "contact"]
            .iter()
            .enumerate()
            .map(|(index, id)| {
                let top = index as f64 * 600.0 - scroll;
                SectionBounds::new(*id, top, top + 600.0)
            })
            .collect()
    }

    #[test]
    fn reference_line_selects_containing_section() {
        assert_eq!(section_at_line(&layout(0.0), 100.0), Some("home"));
        assert_eq!(section_at_line(&layout(650.0), 100.0), Some("services"));
        assert_eq!(section_at_line(&layout(1_300.0), 100.0), Some("contact"));
    }

    #[test]
    fn overlapping_sections_resolve_to_last_in_document_order() {
        let sections = vec![
            SectionBounds::new("outer", 0.0, 1_000.0),
            SectionBounds::new("inner", 50.0, 200.0),
        ];
        assert_eq!(section_at_line(&sections, 100.0), Some("inner"));
    }

    #[test]
    fn sections_without_id_are_ignored() {
        let sections = vec![
            SectionBounds::new("home", 0.0, 1_000.0),
            SectionBounds::new("", 0.0, 1_000.0),
        ];
        assert_eq!(section_at_line(&sections, 100.0), Some("home"));
    }

    #[test]
    fn repeated_positions_emit_a_single_change() {
        let mut tracker = SectionTracker::new(100.0);

        assert_eq!(tracker.observe(&layout(0.0)).as_deref(), Some("home"));
        assert_eq!(tracker.observe(&layout(0.0)), None);
        assert_eq!(tracker.observe(&layout(20.0)), None);
        assert_eq!(tracker.observe(&layout(700.0)).as_deref(), Some("services"));
        assert_eq!(tracker.active(), Some("services"));
    }

    #[test]
    fn gap_between_sections_keeps_previous_value() {
        let mut tracker = SectionTracker::new(100.0);
        tracker.observe(&layout(0.0));

        let gap = vec![SectionBounds::new("home", -900.0, -300.0)];
        assert_eq!(tracker.observe(&gap), None);
        assert_eq!(tracker.active(), Some("home"));
    }

    #[test]
    fn nothing_is_active_before_first_measurement() {
        let tracker = SectionTracker::new(100.0);
        assert_eq!(tracker.active(), None);
    }

    #[test]
    fn header_threshold_is_exclusive() {
        assert!(!header_is_scrolled(100.0, 100.0));
        assert!(header_is_scrolled(100.5, 100.0));
    }
}
