use crate::error::{BookmarkSplitterError, Result};
use crate::types::Bookmark;
use regex::Regex;
use tracing::{debug, info, warn};

/// Parses the bookmark section of a `pdftk dump_data_utf8` report.
///
/// Each field sits on its own line behind a keyword prefix, but a title may
/// run over several lines with nothing marking where it stops. Any line after
/// `BookmarkTitle` that is not a keyword line belongs to the title, up to the
/// `BookmarkLevel` line that always follows it.
pub struct MetadataParser {
    begin_pattern: Regex,
    level_pattern: Regex,
    page_pattern: Regex,
    title_pattern: Regex,
    end_pattern: Regex,
}

#[derive(Debug, PartialEq, Eq)]
enum MetadataLine<'a> {
    Begin,
    Level(u32),
    Page(u32),
    Title(&'a str),
    End,
    Unrecognized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TitleState {
    Idle,
    AccumulatingTitle,
}

#[derive(Debug, Default)]
struct Draft {
    level: Option<u32>,
    page: Option<u32>,
    title: Option<String>,
}

impl Draft {
    fn into_bookmark(self) -> Option<Bookmark> {
        let page = self.page?;
        Some(Bookmark::new(
            self.level.unwrap_or(0),
            page,
            self.title.unwrap_or_default(),
        ))
    }
}

impl MetadataParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            begin_pattern: Regex::new(r"^BookmarkBegin")?,
            level_pattern: Regex::new(r"^BookmarkLevel: (\d+)")?,
            page_pattern: Regex::new(r"^BookmarkPageNumber: (\d+)")?,
            title_pattern: Regex::new(r"^BookmarkTitle: (.*)")?,
            end_pattern: Regex::new(r"^BookmarkEnd")?,
        })
    }

    /// Parses a metadata dump into bookmarks, making sure page 1 is covered.
    pub fn parse(&self, content: &str) -> Result<Vec<Bookmark>> {
        let mut bookmarks = self.parse_records(content)?;

        let first_page = match bookmarks.first() {
            Some(first) => first.page,
            None => return Err(BookmarkSplitterError::NoBookmarks),
        };

        if first_page != 1 {
            debug!("Page 1 is not bookmarked, adding a (start) bookmark");
            bookmarks.insert(0, Bookmark::start());
        }

        info!("Parsed {} bookmarks", bookmarks.len());
        Ok(bookmarks)
    }

    /// Runs the line state machine and returns the records in source order,
    /// without any post-processing.
    pub fn parse_records(&self, content: &str) -> Result<Vec<Bookmark>> {
        let mut bookmarks = Vec::new();
        let mut current: Option<Draft> = None;
        let mut state = TitleState::Idle;

        for (line_idx, line) in content.lines().enumerate() {
            match self.classify(line, line_idx + 1)? {
                MetadataLine::Begin => {
                    if let Some(draft) = current.take() {
                        Self::commit(draft, &mut bookmarks);
                    }
                    current = Some(Draft::default());
                    state = TitleState::Idle;
                }
                MetadataLine::Level(level) => {
                    state = TitleState::Idle;
                    match current.as_mut() {
                        Some(draft) => draft.level = Some(level),
                        None => debug!("Ignoring BookmarkLevel outside a bookmark (line {})", line_idx + 1),
                    }
                }
                // Leaves the title state alone.
                MetadataLine::Page(page) => match current.as_mut() {
                    Some(draft) => draft.page = Some(page),
                    None => debug!("Ignoring BookmarkPageNumber outside a bookmark (line {})", line_idx + 1),
                },
                MetadataLine::Title(title) => match current.as_mut() {
                    Some(draft) => {
                        draft.title = Some(title.to_string());
                        state = TitleState::AccumulatingTitle;
                    }
                    None => debug!("Ignoring BookmarkTitle outside a bookmark (line {})", line_idx + 1),
                },
                MetadataLine::End | MetadataLine::Unrecognized => match state {
                    TitleState::AccumulatingTitle => {
                        if let Some(title) = current.as_mut().and_then(|d| d.title.as_mut()) {
                            title.push('\n');
                            title.push_str(line);
                        }
                    }
                    TitleState::Idle => {
                        if let Some(draft) = current.take() {
                            Self::commit(draft, &mut bookmarks);
                        }
                    }
                },
            }
        }

        if let Some(draft) = current.take() {
            Self::commit(draft, &mut bookmarks);
        }

        debug!("Found {} bookmark records", bookmarks.len());
        Ok(bookmarks)
    }

    fn classify<'a>(&self, line: &'a str, line_number: usize) -> Result<MetadataLine<'a>> {
        if self.begin_pattern.is_match(line) {
            return Ok(MetadataLine::Begin);
        }
        if let Some(captures) = self.level_pattern.captures(line) {
            return Self::parse_number(&captures[1], line_number).map(MetadataLine::Level);
        }
        if let Some(captures) = self.page_pattern.captures(line) {
            return Self::parse_number(&captures[1], line_number).map(MetadataLine::Page);
        }
        if let Some(captures) = self.title_pattern.captures(line) {
            let title = captures.get(1).map_or("", |m| m.as_str());
            return Ok(MetadataLine::Title(title));
        }
        if self.end_pattern.is_match(line) {
            return Ok(MetadataLine::End);
        }
        Ok(MetadataLine::Unrecognized)
    }

    fn parse_number(digits: &str, line_number: usize) -> Result<u32> {
        digits
            .parse()
            .map_err(|e| BookmarkSplitterError::MalformedMetadata {
                line: line_number,
                reason: format!("invalid number '{}': {}", digits, e),
            })
    }

    fn commit(draft: Draft, bookmarks: &mut Vec<Bookmark>) {
        match draft.into_bookmark() {
            Some(bookmark) => bookmarks.push(bookmark),
            None => warn!("Dropping bookmark without a page number"),
        }
    }
}
