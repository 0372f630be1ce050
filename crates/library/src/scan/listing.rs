use crate::error::{Error, Result};

/// A file in a listed directory, joined with its metadata.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TaggedEntry {
    /// Base name of the file.
    pub name: String,
    /// Tags in the order they were added. May contain duplicates.
    pub tags: Vec<String>,
    /// Free-text description; empty when none was set.
    pub description: String,
    pub is_dir: bool,
}

impl TaggedEntry {
    /// Whether any tag or description is attached.
    pub fn has_metadata(&self) -> bool {
        !self.tags.is_empty() || !self.description.is_empty()
    }
}

/// The outcome of listing a directory.
///
/// A failed listing still carries every entry collected before the failure;
/// it is up to the caller whether a partial listing is useful.
#[derive(Debug, Default)]
pub struct Listing {
    pub entries: Vec<TaggedEntry>,
    pub error: Option<Error>,
}

impl Listing {
    /// `true` if the whole directory was listed.
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// Discard partial entries in favour of the error, if there was one.
    pub fn into_result(self) -> Result<Vec<TaggedEntry>> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.entries),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::path::PathBuf;

    fn entry(name: &str) -> TaggedEntry {
        TaggedEntry { name: name.to_string(), ..Default::default() }
    }

    #[test]
    fn test_has_metadata() {
        assert!(!entry("a.txt").has_metadata());
        let tagged = TaggedEntry { tags: vec!["red".to_string()], ..entry("a.txt") };
        assert!(tagged.has_metadata());
        let described = TaggedEntry { description: "notes".to_string(), ..entry("a.txt") };
        assert!(described.has_metadata());
    }

    #[test]
    fn test_into_result() {
        let complete = Listing { entries: vec![entry("a.txt")], error: None };
        assert!(complete.is_complete());
        assert_eq!(complete.into_result().unwrap(), vec![entry("a.txt")]);

        let failed = Listing {
            entries: vec![entry("a.txt")],
            error: Some(exn::Exn::from(ErrorKind::Filesystem(PathBuf::from("/nope")))),
        };
        assert!(!failed.is_complete());
        let err = failed.into_result().unwrap_err();
        assert!(matches!(&*err, ErrorKind::Filesystem(_)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serialize() {
        let tagged = TaggedEntry { tags: vec!["red".to_string(), "red".to_string()], ..entry("a.txt") };
        let json = serde_json::to_value(&tagged).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "a.txt", "tags": ["red", "red"], "description": "", "is_dir": false})
        );
    }
}
