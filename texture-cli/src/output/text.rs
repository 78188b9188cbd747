//! Plain text output formatter

use super::{Body, OutputFormatter};
use anyhow::Result;
use std::io::Write;

/// Plain text formatter - one line per item, or per speech when attributed
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputFormatter for TextFormatter<W> {
    fn format_item(&mut self, label: &str, body: &Body) -> Result<()> {
        match body {
            Body::Text(text) => {
                let line = text.split_whitespace().collect::<Vec<_>>().join(" ");
                writeln!(self.writer, "{label}\t{line}")?;
            }
            Body::Tokens(tokens) => writeln!(self.writer, "{label}\t{}", tokens.join(" "))?,
            Body::Attributed(pairs) => {
                for (speaker, text) in pairs {
                    writeln!(self.writer, "{label}\t{speaker}: {text}")?;
                }
            }
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(items: &[(&str, Body)]) -> String {
        let mut out = Vec::new();
        let mut formatter = TextFormatter::new(&mut out);
        for (label, body) in items {
            formatter.format_item(label, body).unwrap();
        }
        formatter.finish().unwrap();
        drop(formatter);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_text_is_flattened_to_one_line() {
        let out = render(&[("first.txt", Body::Text("Shall I\ncompare thee\n".into()))]);
        assert_eq!(out, "first.txt\tShall I compare thee\n");
    }

    #[test]
    fn test_tokens_and_attributed() {
        let out = render(&[
            ("a_0000", Body::Tokens(vec!["shall".into(), "i".into()])),
            (
                "hamlet",
                Body::Attributed(vec![
                    ("Barnardo".into(), "Who's there?".into()),
                    ("Francisco".into(), "Nay, answer me.".into()),
                ]),
            ),
        ]);
        assert_eq!(
            out,
            "a_0000\tshall i\nhamlet\tBarnardo: Who's there?\nhamlet\tFrancisco: Nay, answer me.\n"
        );
    }
}
