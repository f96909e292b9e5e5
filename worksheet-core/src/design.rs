use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::content::{Page, Theme};
use crate::pages;

/// One of the fixed worksheet sets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Design {
    #[default]
    PawPrint,
    Panda,
    Fox,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown design `{0}` (expected pawprint, panda or fox)")]
pub struct ParseDesignError(pub String);

impl Design {
    pub const ALL: [Design; 3] = [Design::PawPrint, Design::Panda, Design::Fox];

    pub fn id(self) -> &'static str {
        match self {
            Design::PawPrint => "pawprint",
            Design::Panda => "panda",
            Design::Fox => "fox",
        }
    }

    pub fn page_count(self) -> u32 {
        match self {
            Design::PawPrint => 3,
            Design::Panda | Design::Fox => 2,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Design::PawPrint => "Animal Parade",
            Design::Panda => "Zoo Timetable",
            Design::Fox => "Treasure Hunt",
        }
    }

    /// Label of the design's button in the navigation bar.
    pub fn nav_label(self) -> &'static str {
        match self {
            Design::PawPrint => "PawPrint Parade",
            Design::Panda => "Zoo Schedule",
            Design::Fox => "Treasure Hunt",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Design::PawPrint => "🐾",
            Design::Panda => "🐼",
            Design::Fox => "🦊",
        }
    }

    pub fn theme(self) -> Theme {
        match self {
            Design::PawPrint => Theme::Blue,
            Design::Panda => Theme::Green,
            Design::Fox => Theme::Orange,
        }
    }

    /// Content of page `number` (1-based), or `None` past the last page.
    pub fn page(self, number: u32) -> Option<Page> {
        match self {
            Design::PawPrint => pages::pawprint::page(number),
            Design::Panda => pages::panda::page(number),
            Design::Fox => pages::fox::page(number),
        }
    }
}

impl fmt::Display for Design {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Design {
    type Err = ParseDesignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Design::ALL
            .into_iter()
            .find(|d| d.id().eq_ignore_ascii_case(key))
            .ok_or_else(|| ParseDesignError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_from_str() {
        for d in Design::ALL {
            assert_eq!(d.id().parse::<Design>(), Ok(d));
        }
        assert_eq!(" FOX ".parse::<Design>(), Ok(Design::Fox));
    }

    #[test]
    fn unknown_id_is_rejected() {
        let err = "frog".parse::<Design>().unwrap_err();
        assert_eq!(err, ParseDesignError("frog".to_string()));
        assert!(err.to_string().contains("frog"));
    }

    #[test]
    fn every_page_in_range_has_content() {
        for d in Design::ALL {
            assert!(d.page_count() >= 1);
            for n in 1..=d.page_count() {
                let page = d.page(n).expect("page in range");
                assert_eq!(page.design, d);
                assert_eq!(page.number, n);
                assert_eq!(page.theme, d.theme());
                assert!(!page.sections.is_empty());
            }
            assert!(d.page(0).is_none());
            assert!(d.page(d.page_count() + 1).is_none());
        }
    }

    #[test]
    fn section_numbers_continue_across_pages() {
        for d in Design::ALL {
            let numbers: Vec<u8> = (1..=d.page_count())
                .filter_map(|n| d.page(n))
                .flat_map(|p| p.sections.into_iter().map(|s| s.number))
                .collect();
            let expected: Vec<u8> = (1..=numbers.len() as u8).collect();
            assert_eq!(numbers, expected, "{d}");
        }
    }

    #[test]
    fn only_the_last_pawprint_page_has_a_drawing_pad() {
        let pads: Vec<usize> = (1..=3)
            .filter_map(|n| Design::PawPrint.page(n))
            .map(|p| p.drawing_pads())
            .collect();
        assert_eq!(pads, vec![0, 0, 1]);
    }

    #[test]
    fn serializes_ids_in_lowercase() {
        let json = serde_json::to_string(&Design::PawPrint).unwrap();
        assert_eq!(json, "\"pawprint\"");
    }
}
