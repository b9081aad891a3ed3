use once_cell::sync::Lazy;
use regex::Regex;

/// A single named cleaning step.
#[derive(Clone, Copy)]
pub struct TextTransform {
    pub name: &'static str,
    apply: fn(&str) -> String,
}

impl TextTransform {
    pub fn apply(&self, text: &str) -> String {
        (self.apply)(text)
    }
}

impl std::fmt::Debug for TextTransform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextTransform").field("name", &self.name).finish()
    }
}

/// Cleaning steps in application order.
pub const CLEANING_PIPELINE: &[TextTransform] = &[
    TextTransform { name: "strip_control_chars", apply: strip_control_chars },
    TextTransform { name: "normalize_line_endings", apply: normalize_line_endings },
    TextTransform { name: "collapse_blank_lines", apply: collapse_blank_lines },
    TextTransform { name: "strip_subject_line", apply: strip_subject_line },
    TextTransform { name: "strip_instruction_artifact", apply: strip_instruction_artifact },
    TextTransform { name: "strip_signature_block", apply: strip_signature_block },
    TextTransform { name: "strip_trailing_signature_line", apply: strip_trailing_signature_line },
    TextTransform { name: "trim", apply: trim },
];

static EXCESS_BLANK_LINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("blank line pattern is valid"));

static SUBJECT_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:Re:|Subject:)[^\n]+\n*").expect("subject pattern is valid")
});

static INSTRUCTION_ARTIFACT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^Skip generating responder name\.?\s*").expect("artifact pattern is valid")
});

// Closing phrase, optional comma, then an optional sign-off line holding a
// placeholder, a team name or a capitalized one- or two-word personal name.
// Anchored to the end.
static SIGNATURE_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"\n+(?i:Kind regards|Warm regards|Best regards|Sincerely|Regards|Thank you|Thanks|Cheers|Best),?[ \t]*",
        r"(?:\n+(?:(?i:\[Your Name\]|The Support Team|Customer Support|Support Team)|[A-Z][a-z]+(?: [A-Z][a-z]+)?|\[[^\]\n]*\])?)?",
        r"\s*$",
    ))
    .expect("signature pattern is valid")
});

static TRAILING_SIGNATURE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n+(?i:\[Your Name\]|The Support Team|Customer Support|Support Team)\s*$")
        .expect("trailing signature pattern is valid")
});

/// Drops ASCII control characters other than line breaks. Carriage returns
/// are left for `normalize_line_endings`.
fn strip_control_chars(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_ascii_control() || *c == '\n' || *c == '\r')
        .collect()
}

fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

fn collapse_blank_lines(text: &str) -> String {
    EXCESS_BLANK_LINES.replace_all(text, "\n\n").into_owned()
}

fn strip_subject_line(text: &str) -> String {
    SUBJECT_LINE.replace(text, "").into_owned()
}

fn strip_instruction_artifact(text: &str) -> String {
    INSTRUCTION_ARTIFACT.replace(text, "").into_owned()
}

fn strip_signature_block(text: &str) -> String {
    SIGNATURE_BLOCK.replace(text, "").into_owned()
}

fn strip_trailing_signature_line(text: &str) -> String {
    TRAILING_SIGNATURE_LINE.replace(text, "").into_owned()
}

fn trim(text: &str) -> String {
    text.trim().to_string()
}

fn run_pipeline(text: &str) -> String {
    CLEANING_PIPELINE
        .iter()
        .fold(text.to_string(), |current, transform| transform.apply(&current))
}

/// Applies the pipeline until the text stops changing, so cleaning an
/// already clean reply is a no-op.
///
/// Terminates: only the first pass can rewrite without shrinking the text
/// (`\r` to `\n`), every later change removes characters.
pub fn clean_text(text: &str) -> String {
    let mut current = run_pipeline(text);
    loop {
        let next = run_pipeline(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}
