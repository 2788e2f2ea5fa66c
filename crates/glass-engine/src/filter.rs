//! Target selection by window title.

use crate::{
    snapshot::Snapshot,
    window::{WindowHandle, WindowSnapshot},
};

/// Split a filter string into terms on line breaks, dropping empty lines.
pub fn split_terms(filter: &str) -> Vec<String> {
    filter
        .split('\n')
        .map(|t| t.trim_end_matches('\r'))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Case-insensitive substring match against any of several terms.
#[derive(Clone, Debug)]
pub struct TitleFilter {
    /// Lowercased terms.
    terms: Vec<String>,
    /// Process ids whose windows are never selected.
    excluded_pids: Vec<u32>,
}

impl TitleFilter {
    /// Build a filter from literal terms; empty terms are ignored.
    pub fn new<I, S>(terms: I, excluded_pids: Vec<u32>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = terms
            .into_iter()
            .map(|t| t.as_ref().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self {
            terms,
            excluded_pids,
        }
    }

    /// The normalized terms this filter matches.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// True when `w` is a shown, foreign window whose title contains a term.
    pub fn matches(&self, w: &WindowSnapshot) -> bool {
        if self.excluded_pids.contains(&w.pid) || !w.flags.is_shown() {
            return false;
        }
        let title = w.title.to_lowercase();
        self.terms.iter().any(|t| title.contains(t.as_str()))
    }

    /// Matching windows in snapshot order.
    pub fn select(&self, snapshot: &Snapshot) -> Vec<WindowHandle> {
        snapshot
            .iter()
            .filter(|w| self.matches(w))
            .map(|w| w.handle)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{geom::Rect, test_support::win, window::WindowFlags};

    fn r() -> Rect {
        Rect::new(0, 0, 100, 100)
    }

    #[test]
    fn split_on_line_breaks() {
        assert_eq!(split_terms("Notepad\nCalc\r\n\n"), vec!["Notepad", "Calc"]);
        assert!(split_terms("").is_empty());
    }

    #[test]
    fn case_insensitive_substring() {
        let snap = Snapshot::new(vec![
            win(1, "Untitled - Notepad", 10, r()),
            win(2, "Calculator", 11, r()),
            win(3, "NOTEPAD++", 12, r()),
        ]);
        let f = TitleFilter::new(["notepad"], vec![]);
        assert_eq!(f.select(&snap), vec![WindowHandle(1), WindowHandle(3)]);
    }

    #[test]
    fn any_term_matches_in_snapshot_order() {
        let snap = Snapshot::new(vec![
            win(1, "Calculator", 10, r()),
            win(2, "Terminal", 11, r()),
            win(3, "Browser", 12, r()),
        ]);
        let f = TitleFilter::new(["brow", "CALC"], vec![]);
        assert_eq!(f.select(&snap), vec![WindowHandle(1), WindowHandle(3)]);
    }

    #[test]
    fn own_process_hidden_and_minimized_are_skipped() {
        let hidden = WindowFlags {
            visible: false,
            ..WindowFlags::default()
        };
        let minimized = WindowFlags {
            minimized: true,
            ..WindowFlags::default()
        };
        let snap = Snapshot::new(vec![
            win(1, "target self", 99, r()),
            win(2, "target parent", 98, r()),
            win(3, "target hidden", 10, r()).with_flags(hidden),
            win(4, "target minimized", 10, r()).with_flags(minimized),
            win(5, "target ok", 10, r()),
        ]);
        let f = TitleFilter::new(["target"], vec![99, 98]);
        assert_eq!(f.select(&snap), vec![WindowHandle(5)]);
    }

    #[test]
    fn no_match_is_empty() {
        let snap = Snapshot::new(vec![win(1, "Calculator", 10, r())]);
        assert!(TitleFilter::new(["zzz"], vec![]).select(&snap).is_empty());
        assert!(TitleFilter::new([""], vec![]).select(&snap).is_empty());
    }
}
