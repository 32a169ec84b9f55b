/// Greedy word wrap bounded by a character count.
///
/// Words are never split, so a word longer than `max_chars` occupies a line
/// of its own and overflows it. Always returns at least one line.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= max_chars {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_single_empty_line() {
        assert_eq!(wrap_text("", 28), vec![String::new()]);
        assert_eq!(wrap_text("   \n\t", 28), vec![String::new()]);
    }

    #[test]
    fn short_text_stays_on_one_line() {
        assert_eq!(wrap_text("Check Z1 cues", 28), vec!["Check Z1 cues"]);
    }

    #[test]
    fn wraps_at_budget() {
        assert_eq!(
            wrap_text("Detect lag>500ms or FPS<30 (3s)", 28),
            vec!["Detect lag>500ms or FPS<30", "(3s)"]
        );
    }

    #[test]
    fn line_may_fill_budget_exactly() {
        assert_eq!(wrap_text("abc def", 7), vec!["abc def"]);
        assert_eq!(wrap_text("abc defg", 7), vec!["abc", "defg"]);
    }

    #[test]
    fn long_word_overflows_instead_of_splitting() {
        assert_eq!(
            wrap_text("a supercalifragilistic b", 5),
            vec!["a", "supercalifragilistic", "b"]
        );
    }

    #[test]
    fn first_word_at_budget_does_not_emit_blank_line() {
        assert_eq!(wrap_text("abcd ef", 4), vec!["abcd", "ef"]);
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(wrap_text("über café", 9), vec!["über café"]);
    }
}
