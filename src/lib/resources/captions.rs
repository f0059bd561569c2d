//! Module for loading the catalog of caption suggestions.

use std::fs;
use std::io;
use std::path::Path;
use std::slice;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::model::FALLBACK_CAPTIONS;


/// Ordered list of caption suggestions, used by the random template picker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaptionCatalog {
    captions: Vec<String>,
}

/// Result of loading the `CaptionCatalog`.
#[derive(Clone, Debug)]
pub struct CatalogLoad {
    pub catalog: CaptionCatalog,
    /// Message for the user if the built-in captions had to be used.
    pub warning: Option<String>,
}

impl CaptionCatalog {
    /// The built-in catalog used when no caption file is available.
    pub fn fallback() -> Self {
        CaptionCatalog{
            captions: FALLBACK_CAPTIONS.iter().map(|&c| c.to_owned()).collect(),
        }
    }

    /// Load captions from a comma-separated file, one per record.
    ///
    /// Only the first field of each record is used. If the file is missing,
    /// unreadable or has no captions, the fallback catalog is returned
    /// along with a warning.
    pub fn load<P: AsRef<Path>>(path: P) -> CatalogLoad {
        let path = path.as_ref();
        debug!("Loading captions from {}", path.display());

        let warning = match fs::read_to_string(path) {
            Ok(content) => {
                let catalog = CaptionCatalog::parse(&content);
                if !catalog.is_empty() {
                    debug!("Loaded {} caption(s)", catalog.len());
                    return CatalogLoad{catalog, warning: None};
                }
                format!("Failed to load captions: {} is empty. Using default captions.",
                    path.display())
            }
            Err(ref e) if e.kind() == io::ErrorKind::NotFound => {
                format!("Captions file not found: {}. Using default captions.",
                    path.display())
            }
            Err(e) => format!("Failed to load captions: {}. Using default captions.", e),
        };
        warn!("{}", warning);
        CatalogLoad{catalog: CaptionCatalog::fallback(), warning: Some(warning)}
    }

    /// Parse captions from the content of a comma-separated file.
    pub fn parse(content: &str) -> Self {
        let content = content.trim_start_matches('\u{feff}');
        let captions = first_fields(content).into_iter()
            .filter(|caption| !caption.is_empty())
            .collect();
        CaptionCatalog{captions}
    }
}

impl CaptionCatalog {
    #[inline]
    pub fn len(&self) -> usize {
        self.captions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.captions.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<String> {
        self.captions.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[String] {
        &self.captions[..]
    }

    /// Pick a caption uniformly at random.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.captions.choose(rng).map(|c| c.as_str())
    }
}

impl<'c> IntoIterator for &'c CaptionCatalog {
    type Item = &'c String;
    type IntoIter = slice::Iter<'c, String>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}


/// State of the CSV scanner within the current field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Scan {
    /// At the start of a field.
    FieldStart,
    /// Inside an unquoted field.
    Unquoted,
    /// Inside a double-quoted field.
    Quoted,
    /// Just after a quote inside a quoted field,
    /// which either closes it or starts a `""` escape.
    QuoteInQuoted,
}

/// Extract the first field of every CSV record in given content.
///
/// Double-quoted fields may contain commas and line breaks,
/// and `""` within them stands for a literal quote.
/// Records with nothing in them at all are skipped.
fn first_fields(content: &str) -> Vec<String> {
    let mut result = vec![];
    let mut field = String::new();
    let mut field_index = 0;
    let mut record_empty = true;
    let mut state = Scan::FieldStart;

    let mut chars = content.chars().peekable();
    while let Some(c) = chars.next() {
        if state == Scan::QuoteInQuoted {
            if c == '"' {
                if field_index == 0 { field.push('"'); }
                state = Scan::Quoted;
                continue;
            }
            state = Scan::Unquoted;
        }
        match (state, c) {
            (Scan::Quoted, '"') => state = Scan::QuoteInQuoted,
            (Scan::Quoted, c) => {
                if field_index == 0 { field.push(c); }
            }
            (_, ',') => {
                field_index += 1;
                record_empty = false;
                state = Scan::FieldStart;
            }
            (_, '\r') if chars.peek() == Some(&'\n') => {}
            (_, '\n') | (_, '\r') => {
                if !record_empty || !field.is_empty() {
                    result.push(field.clone());
                }
                field.clear();
                field_index = 0;
                record_empty = true;
                state = Scan::FieldStart;
            }
            (Scan::FieldStart, '"') => {
                record_empty = false;
                state = Scan::Quoted;
            }
            (_, c) => {
                if field_index == 0 { field.push(c); }
                record_empty = false;
                state = Scan::Unquoted;
            }
        }
    }
    if !record_empty || !field.is_empty() {
        result.push(field);
    }
    result
}


#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use spectral::prelude::*;

    use crate::model::FALLBACK_CAPTIONS;
    use crate::testing::TempDir;
    use super::{first_fields, CaptionCatalog};

    #[test]
    fn missing_file_gives_fallback() {
        let dir = TempDir::new("captions_missing_file_gives_fallback");
        let loaded = CaptionCatalog::load(dir.path().join("captions.csv"));

        assert_that!(loaded.warning).is_some();
        assert_that!(loaded.catalog.len()).is_equal_to(15);
        let expected: Vec<_> = FALLBACK_CAPTIONS.iter().map(|c| c.to_string()).collect();
        assert_eq!(&expected[..], loaded.catalog.as_slice());
        assert_eq!("LOL SO TRUE!", loaded.catalog.as_slice()[0]);
        assert_eq!("SLAY QUEEN!", loaded.catalog.as_slice()[14]);
    }

    #[test]
    fn empty_file_gives_fallback() {
        let dir = TempDir::new("captions_empty_file_gives_fallback");
        dir.write("captions.csv", b"\n\n");
        let loaded = CaptionCatalog::load(dir.path().join("captions.csv"));

        assert_that!(loaded.warning).is_some();
        assert_eq!(CaptionCatalog::fallback(), loaded.catalog);
    }

    #[test]
    fn load_first_column() {
        let dir = TempDir::new("captions_load_first_column");
        dir.write("captions.csv", b"ONE DOES NOT SIMPLY,boromir\r\nSUCH WOW,doge\n");
        let loaded = CaptionCatalog::load(dir.path().join("captions.csv"));

        assert_that!(loaded.warning).is_none();
        assert_eq!(vec!["ONE DOES NOT SIMPLY", "SUCH WOW"], loaded.catalog.as_slice());
    }

    #[test]
    fn parse_skips_blank_records() {
        let catalog = CaptionCatalog::parse("\u{feff}FIRST\n\n,orphan\nSECOND,x\n");
        assert_eq!(vec!["FIRST", "SECOND"], catalog.as_slice());
    }

    #[test]
    fn quoted_fields() {
        assert_eq!(vec!["WAIT, WHAT?"], first_fields(r#""WAIT, WHAT?",second"#));
        assert_eq!(vec![r#"SAY "CHEESE""#], first_fields(r#""SAY ""CHEESE""",x"#));
        assert_eq!(vec!["unterminated"], first_fields(r#""unterminated"#));
        assert_eq!(vec![""], first_fields(",just second"));
    }

    #[test]
    fn quoted_field_spans_lines() {
        let catalog = CaptionCatalog::parse("\"TWO\nLINES\",x\nNEXT,y\n");
        assert_eq!(vec!["TWO\nLINES", "NEXT"], catalog.as_slice());
    }

    #[test]
    fn quotes_in_later_fields() {
        let catalog = CaptionCatalog::parse(
            "FIRST,\"later, with\nnewline\"\r\nSECOND,\"x\"\"y\"\n");
        assert_eq!(vec!["FIRST", "SECOND"], catalog.as_slice());
    }

    #[test]
    fn crlf_records() {
        let catalog = CaptionCatalog::parse("\"A\r\nB\",1\r\nC\r\n\r\nD");
        assert_eq!(vec!["A\r\nB", "C", "D"], catalog.as_slice());
    }

    #[test]
    fn choose_is_reproducible() {
        let catalog = CaptionCatalog::fallback();
        let first = catalog.choose(&mut StdRng::seed_from_u64(42)).map(str::to_owned);
        let second = catalog.choose(&mut StdRng::seed_from_u64(42)).map(str::to_owned);
        assert_that!(first).is_some();
        assert_eq!(first, second);
    }

    #[test]
    fn choose_from_empty() {
        let catalog = CaptionCatalog::parse("");
        assert_that!(catalog.choose(&mut StdRng::seed_from_u64(0))).is_none();
    }
}
