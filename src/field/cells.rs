//! Cell Renderer
//!
//! Pure mapping from the mirrored text to one descriptor per cell.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellStyle {
    #[default]
    Default,
    /// Next cell to fill while the field has focus
    Current,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellDescriptor {
    pub display: char,
    pub style: CellStyle,
}

/// Always yields exactly `max_length` cells; a full field has no current cell
pub fn render_cells(
    text: &[char],
    max_length: usize,
    placeholder: char,
    masker: Option<char>,
    focused: bool,
) -> Vec<CellDescriptor> {
    let len = text.len();
    (0..max_length)
        .map(|i| {
            let display = match (text.get(i), masker) {
                (Some(_), Some(mask)) => mask,
                (Some(&c), None) => c,
                (None, _) => placeholder,
            };
            let style = if i == len && focused { CellStyle::Current } else { CellStyle::Default };
            CellDescriptor { display, style }
        })
        .collect()
}

/// Index of the current cell, if any
pub fn current_index(cells: &[CellDescriptor]) -> Option<usize> {
    cells.iter().position(|cell| cell.style == CellStyle::Current)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn displays(cells: &[CellDescriptor]) -> String {
        cells.iter().map(|c| c.display).collect()
    }

    #[test]
    fn test_always_max_length_cells() {
        for text in ["", "1", "12", "123", "1234"] {
            let cells = render_cells(&chars(text), 4, '_', None, true);
            assert_eq!(cells.len(), 4);
        }
    }

    #[test]
    fn test_filled_and_placeholder() {
        let cells = render_cells(&chars("a0"), 4, '#', None, false);
        assert_eq!(displays(&cells), "a0##");
    }

    #[test]
    fn test_masker_hides_filled_cells() {
        let cells = render_cells(&chars("ab"), 4, ' ', Some('•'), false);
        assert_eq!(displays(&cells), "••  ");
    }

    #[test]
    fn test_current_follows_typing() {
        let mut typed = String::new();
        let mut currents = Vec::new();
        for c in "1234".chars() {
            typed.push(c);
            let cells = render_cells(&chars(&typed), 4, ' ', None, true);
            currents.push(current_index(&cells));
        }
        assert_eq!(currents, vec![Some(1), Some(2), Some(3), None]);
    }

    #[test]
    fn test_exactly_one_current_when_focused() {
        for text in ["", "1", "12", "123"] {
            let cells = render_cells(&chars(text), 4, ' ', None, true);
            let count = cells.iter().filter(|c| c.style == CellStyle::Current).count();
            assert_eq!(count, 1, "text {:?}", text);
        }
    }

    #[test]
    fn test_no_current_when_unfocused_or_full() {
        let unfocused = render_cells(&chars("12"), 4, ' ', None, false);
        assert_eq!(current_index(&unfocused), None);

        let full = render_cells(&chars("1234"), 4, ' ', None, true);
        assert_eq!(current_index(&full), None);
    }
}
