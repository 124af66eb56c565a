//! Keyboard focus within the rendered form

/// Focus position: one of the fields, or the submit button after them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormFocus {
    index: usize,
}

impl FormFocus {
    /// Number of focusable slots (fields plus the submit button)
    fn slots(field_count: usize) -> usize {
        field_count + 1
    }

    /// Move to the next slot (wraps around)
    pub fn next(&mut self, field_count: usize) {
        self.index = (self.index + 1) % Self::slots(field_count);
    }

    /// Move to the previous slot (wraps around)
    pub fn prev(&mut self, field_count: usize) {
        if self.index == 0 {
            self.index = Self::slots(field_count) - 1;
        } else {
            self.index -= 1;
        }
    }

    /// Focus a specific field
    pub fn focus_field(&mut self, index: usize, field_count: usize) {
        self.index = index.min(field_count);
    }

    /// Index of the focused field, `None` on the submit button
    pub fn field_index(&self, field_count: usize) -> Option<usize> {
        (self.index < field_count).then_some(self.index)
    }

    /// Returns true if the submit button is focused
    pub fn is_submit(&self, field_count: usize) -> bool {
        self.index >= field_count
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_focuses_first_field() {
        let focus = FormFocus::default();
        assert_eq!(focus.field_index(3), Some(0));
        assert!(!focus.is_submit(3));
    }

    #[test]
    fn test_next_reaches_submit_then_wraps() {
        let mut focus = FormFocus::default();
        focus.next(2);
        focus.next(2);
        assert!(focus.is_submit(2));
        assert_eq!(focus.field_index(2), None);

        focus.next(2);
        assert_eq!(focus.field_index(2), Some(0));
    }

    #[test]
    fn test_prev_wraps_to_submit() {
        let mut focus = FormFocus::default();
        focus.prev(2);
        assert!(focus.is_submit(2));
    }

    #[test]
    fn test_no_fields_means_submit_only() {
        let mut focus = FormFocus::default();
        assert!(focus.is_submit(0));
        focus.next(0);
        assert!(focus.is_submit(0));
    }

    #[test]
    fn test_focus_field_clamps() {
        let mut focus = FormFocus::default();
        focus.focus_field(10, 2);
        assert!(focus.is_submit(2));

        focus.focus_field(1, 2);
        assert_eq!(focus.field_index(2), Some(1));
    }

    #[test]
    fn test_reset() {
        let mut focus = FormFocus::default();
        focus.next(4);
        focus.reset();
        assert_eq!(focus.field_index(4), Some(0));
    }
}
