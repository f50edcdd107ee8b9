use crate::error::Result;
use crate::types::{Bookmark, EndPage, SplitTarget};
use regex::Regex;
use tracing::{debug, info};

/// Longest title kept in a file name, ellipsis included.
pub const MAX_TITLE_LENGTH: usize = 100;

const ELLIPSIS: &str = "...";

/// Turns ordered bookmarks into page ranges and file names.
pub struct RangeDeriver {
    unfriendly_chars: Regex,
}

impl RangeDeriver {
    pub fn new() -> Result<Self> {
        Ok(Self {
            unfriendly_chars: Regex::new(r"[^ \w]")?,
        })
    }

    /// Builds the final split targets, collapsing same-page runs first when asked.
    ///
    /// Ranges and names are always derived from the surviving bookmarks, so
    /// indices stay contiguous and every range ends right before the next one.
    pub fn plan(&self, bookmarks: Vec<Bookmark>, skip_duplicates: bool) -> Vec<SplitTarget> {
        let bookmarks = if skip_duplicates {
            let before = bookmarks.len();
            let kept = Self::skip_duplicates(bookmarks);
            info!("Skipped {} duplicate bookmarks", before - kept.len());
            kept
        } else {
            bookmarks
        };

        self.derive(&bookmarks)
    }

    pub fn derive(&self, bookmarks: &[Bookmark]) -> Vec<SplitTarget> {
        bookmarks
            .iter()
            .enumerate()
            .map(|(idx, bookmark)| {
                let end_page = Self::end_page(bookmark, bookmarks.get(idx + 1));
                let file = self.make_filename(idx + 1, bookmark.page, end_page, &bookmark.text);
                debug!("Bookmark {} covers {}-{}: {}", idx + 1, bookmark.page, end_page, file);

                SplitTarget {
                    bookmark: bookmark.clone(),
                    end_page,
                    file,
                }
            })
            .collect()
    }

    fn end_page(current: &Bookmark, next: Option<&Bookmark>) -> EndPage {
        match next {
            None => EndPage::DocumentEnd,
            Some(next) if next.page > current.page => EndPage::Page(next.page - 1),
            Some(_) => EndPage::Page(current.page),
        }
    }

    /// Drops every bookmark whose successor starts on the same page, so a run
    /// of same-page bookmarks collapses to its last member.
    pub fn skip_duplicates(bookmarks: Vec<Bookmark>) -> Vec<Bookmark> {
        bookmarks.into_iter().fold(Vec::new(), |mut kept, bookmark| {
            if kept.last().map(|last: &Bookmark| last.page) == Some(bookmark.page) {
                kept.pop();
            }
            kept.push(bookmark);
            kept
        })
    }

    /// `NNN - p X - title.pdf` or `NNN - pp X-Y - title.pdf`, `position` being 1-based.
    pub fn make_filename(&self, position: usize, page: u32, end_page: EndPage, text: &str) -> String {
        let pages = if end_page == EndPage::Page(page) {
            format!("p {}", page)
        } else {
            format!("pp {}-{}", page, end_page)
        };

        format!("{:03} - {} - {}.pdf", position, pages, self.sanitize_title(text))
    }

    pub fn sanitize_title(&self, text: &str) -> String {
        let friendly = self.unfriendly_chars.replace_all(text, "");

        if friendly.chars().count() > MAX_TITLE_LENGTH {
            let mut truncated: String = friendly
                .chars()
                .take(MAX_TITLE_LENGTH - ELLIPSIS.len())
                .collect();
            truncated.push_str(ELLIPSIS);
            truncated
        } else {
            friendly.into_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn deriver() -> RangeDeriver {
        RangeDeriver::new().unwrap()
    }

    fn bookmarks_at(pages: &[u32]) -> Vec<Bookmark> {
        pages
            .iter()
            .enumerate()
            .map(|(idx, &page)| Bookmark::new(1, page, format!("Section {}", idx + 1)))
            .collect()
    }

    #[test]
    fn test_ranges_abut_next_bookmark() {
        let targets = deriver().derive(&bookmarks_at(&[1, 5, 9]));
        let ends: Vec<EndPage> = targets.iter().map(|t| t.end_page).collect();

        assert_eq!(
            ends,
            vec![EndPage::Page(4), EndPage::Page(8), EndPage::DocumentEnd]
        );
        assert_eq!(targets[0].page_range(), "1-4");
        assert_eq!(targets[2].page_range(), "9-end");
    }

    #[test]
    fn test_same_page_bookmarks_share_single_page() {
        let targets = deriver().derive(&bookmarks_at(&[1, 3, 3, 7]));
        let ends: Vec<EndPage> = targets.iter().map(|t| t.end_page).collect();

        assert_eq!(
            ends,
            vec![
                EndPage::Page(2),
                EndPage::Page(3),
                EndPage::Page(6),
                EndPage::DocumentEnd
            ]
        );
        assert!(targets[1].is_single_page());
        assert!(!targets[2].is_single_page());
    }

    #[test]
    fn test_out_of_order_bookmark_keeps_own_page() {
        let targets = deriver().derive(&bookmarks_at(&[1, 8, 4]));
        assert_eq!(targets[1].end_page, EndPage::Page(8));
    }

    #[test]
    fn test_sanitize_strips_punctuation() {
        assert_eq!(
            deriver().sanitize_title("Chapter 1: A/B Testing!!"),
            "Chapter 1 AB Testing"
        );
        assert_eq!(deriver().sanitize_title("Part One\ncontinued"), "Part Onecontinued");
    }

    #[test]
    fn test_sanitize_keeps_unicode_word_chars() {
        assert_eq!(
            deriver().sanitize_title("Résumé — Über_alles"),
            "Résumé  Über_alles"
        );
    }

    #[test]
    fn test_long_title_is_truncated() {
        let title = "a".repeat(150);
        let sanitized = deriver().sanitize_title(&title);

        assert_eq!(sanitized.chars().count(), MAX_TITLE_LENGTH);
        assert!(sanitized.ends_with("..."));
        assert_eq!(&sanitized[..97], "a".repeat(97));
    }

    #[test]
    fn test_title_at_limit_is_kept() {
        let title = "b".repeat(MAX_TITLE_LENGTH);
        assert_eq!(deriver().sanitize_title(&title), title);
    }

    #[test]
    fn test_filename_format() {
        let deriver = deriver();
        let bookmarks = vec![
            Bookmark::new(1, 1, "Intro"),
            Bookmark::new(1, 5, "Chapter 1: Start"),
            Bookmark::new(1, 6, "Appendix"),
        ];
        let files: Vec<String> = deriver.derive(&bookmarks).into_iter().map(|t| t.file).collect();

        assert_eq!(
            files,
            vec![
                "001 - pp 1-4 - Intro.pdf",
                "002 - p 5 - Chapter 1 Start.pdf",
                "003 - pp 6-end - Appendix.pdf",
            ]
        );
    }

    #[test]
    fn test_filenames_unique_for_colliding_titles() {
        let bookmarks = vec![
            Bookmark::new(1, 1, "!!!"),
            Bookmark::new(1, 2, "???"),
            Bookmark::new(1, 2, "Same"),
            Bookmark::new(1, 3, "Same"),
            Bookmark::new(1, 3, ""),
        ];
        let targets = deriver().derive(&bookmarks);
        let unique: HashSet<&str> = targets.iter().map(|t| t.file.as_str()).collect();

        assert_eq!(unique.len(), bookmarks.len());
        assert_eq!(targets[0].file, "001 - p 1 - .pdf");
    }

    #[test]
    fn test_skip_duplicates_keeps_last_of_run() {
        let bookmarks = vec![
            Bookmark::new(1, 1, "Intro"),
            Bookmark::new(1, 10, "Part"),
            Bookmark::new(2, 10, "Chapter"),
        ];
        let kept = RangeDeriver::skip_duplicates(bookmarks);

        assert_eq!(
            kept,
            vec![Bookmark::new(1, 1, "Intro"), Bookmark::new(2, 10, "Chapter")]
        );
    }

    #[test]
    fn test_skip_duplicates_collapses_long_runs() {
        let kept = RangeDeriver::skip_duplicates(bookmarks_at(&[2, 2, 2, 3, 4, 4]));
        let titles: Vec<&str> = kept.iter().map(|b| b.text.as_str()).collect();

        assert_eq!(titles, vec!["Section 3", "Section 4", "Section 6"]);
    }

    #[test]
    fn test_plan_derives_after_skipping() {
        let bookmarks = vec![
            Bookmark::new(1, 1, "Intro"),
            Bookmark::new(1, 10, "Part"),
            Bookmark::new(2, 10, "Chapter"),
        ];
        let targets = deriver().plan(bookmarks, true);

        assert_eq!(targets.len(), 2);
        assert_eq!(targets[1].bookmark.page, 10);
        assert_eq!(targets[1].bookmark.text, "Chapter");
        assert_eq!(targets[0].end_page, EndPage::Page(9));
        assert_eq!(targets[1].file, "002 - pp 10-end - Chapter.pdf");
    }

    #[test]
    fn test_plan_without_skipping_keeps_everything() {
        let targets = deriver().plan(bookmarks_at(&[1, 10, 10]), false);

        assert_eq!(targets.len(), 3);
        assert_eq!(targets[1].file, "002 - p 10 - Section 2.pdf");
    }

    #[test]
    fn test_target_serializes_flat() {
        let targets = deriver().derive(&bookmarks_at(&[1, 4]));
        let json = serde_json::to_value(&targets).unwrap();

        assert_eq!(
            json,
            serde_json::json!([
                {
                    "level": 1,
                    "page": 1,
                    "text": "Section 1",
                    "end_page": 3,
                    "file": "001 - pp 1-3 - Section 1.pdf"
                },
                {
                    "level": 1,
                    "page": 4,
                    "text": "Section 2",
                    "end_page": "end",
                    "file": "002 - pp 4-end - Section 2.pdf"
                }
            ])
        );
    }
}
