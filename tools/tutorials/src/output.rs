//! Terminal output for streamed agent events.

use agentgraph::Message;

/// Cuts `repr` to `max_length` characters, marking the cut.
pub fn truncate(repr: &str, max_length: usize) -> String {
    if repr.chars().count() <= max_length {
        return repr.to_string();
    }
    let head: String = repr.chars().take(max_length).collect();
    format!("{} ... (truncated)", head)
}

/// Prints messages not yet printed. History is append-only, so `printed`
/// (messages already shown) is enough to find the new ones.
pub fn print_new_messages(messages: &[Message], printed: &mut usize, max_length: usize) {
    for message in messages.iter().skip(*printed) {
        println!("{}", truncate(&message.pretty(), max_length));
    }
    *printed = (*printed).max(messages.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_marks_long_output() {
        assert_eq!(truncate("abc", 3), "abc");
        assert_eq!(truncate("abcdef", 3), "abc ... (truncated)");
        assert_eq!(truncate("°°°°", 2), "°° ... (truncated)");
    }
}
