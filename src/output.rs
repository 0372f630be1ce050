//! Rendering listings for the terminal.

use filetag_library::TaggedEntry;
use std::io::{self, Write};

/// One line per file: the name, then its tags and description if it has any.
pub fn write_plain(out: &mut impl Write, entries: &[TaggedEntry]) -> io::Result<()> {
    for entry in entries {
        write!(out, "{}", entry.name)?;
        if !entry.tags.is_empty() {
            write!(out, "  [{}]", entry.tags.join(", "))?;
        }
        if !entry.description.is_empty() {
            write!(out, "  {}", entry.description)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn write_json(out: &mut impl Write, entries: &[TaggedEntry]) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(&mut *out, entries)?;
    writeln!(out).map_err(serde_json::Error::io)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<TaggedEntry> {
        vec![
            TaggedEntry {
                name: "a.txt".to_string(),
                tags: vec!["red".to_string(), "blue".to_string()],
                description: "holiday notes".to_string(),
                is_dir: false,
            },
            TaggedEntry { name: "b.txt".to_string(), ..Default::default() },
        ]
    }

    #[test]
    fn test_write_plain() {
        let mut out = Vec::new();
        write_plain(&mut out, &entries()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a.txt  [red, blue]  holiday notes\nb.txt\n");
    }

    #[test]
    fn test_write_plain_empty() {
        let mut out = Vec::new();
        write_plain(&mut out, &[]).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_write_json() {
        let mut out = Vec::new();
        write_json(&mut out, &entries()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["tags"], serde_json::json!(["red", "blue"]));
        assert_eq!(value[1]["name"], "b.txt");
        assert_eq!(value[1]["description"], "");
    }
}
