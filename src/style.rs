use console::Style;

/// Marks the matched span of a search hit
pub struct Highlighter {
    style: Style,
}

impl Highlighter {
    /// Red highlighting when `colored`, plain text otherwise
    pub fn new(colored: bool) -> Self {
        let style = if colored {
            Style::new().red().force_styling(true)
        } else {
            Style::new()
        };
        Highlighter { style }
    }

    pub fn highlight(&self, line: &str, start: usize, end: usize) -> String {
        format!(
            "{}{}{}",
            &line[..start],
            self.style.apply_to(&line[start..end]),
            &line[end..]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain() {
        assert_eq!(Highlighter::new(false).highlight("foobar", 0, 3), "foobar");
    }

    #[test]
    fn test_colored() {
        let out = Highlighter::new(true).highlight("foobar", 0, 3);
        assert!(out.starts_with("\u{1b}[31mfoo\u{1b}[0m"));
        assert!(out.ends_with("bar"));
    }
}
