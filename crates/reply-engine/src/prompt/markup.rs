use once_cell::sync::Lazy;
use regex::Regex;

// Comments first so a `>` inside a comment does not end the match early.
static MARKUP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<!--.*?-->|<[A-Za-z/!?][^>]*>").expect("markup pattern is valid")
});

/// Remove HTML-style tags and comments, leaving text and entities untouched.
pub fn strip_markup(text: &str) -> String {
    MARKUP.replace_all(text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_tags_and_comments() {
        assert_eq!(
            strip_markup("<p>Hello <b>there</b><!-- note -->!</p><br/>"),
            "Hello there!"
        );
    }

    #[test]
    fn keeps_comparisons_and_entities() {
        assert_eq!(strip_markup("if a < b &amp; c > d"), "if a < b &amp; c > d");
    }
}
