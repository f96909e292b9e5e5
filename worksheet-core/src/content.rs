//! Static page content. Plain data: layout and artwork live in `sheet-core`.

use serde::Serialize;

use crate::design::Design;

/// Accent family of a design; every page of a design shares it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Blue,
    Green,
    Orange,
}

/// Small illustrations used on cards, tables and matching rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    PawPrint,
    Rabbit,
    Frog,
    Panda,
    Fox,
    Cat,
    Star,
}

/// Pastel used for card borders and day tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tint {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Indigo,
    Purple,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Page {
    pub design: Design,
    /// 1-based position within the design.
    pub number: u32,
    pub theme: Theme,
    pub title: &'static str,
    pub sub_title: &'static str,
    pub sections: Vec<Section>,
}

impl Page {
    /// Number of drawing pads on the page, in document order.
    pub fn drawing_pads(&self) -> usize {
        fn count(blocks: &[Block]) -> usize {
            blocks
                .iter()
                .map(|b| match b {
                    Block::DrawingPad { .. } => 1,
                    Block::Panel { blocks } => count(blocks),
                    _ => 0,
                })
                .sum()
        }
        self.sections.iter().map(|s| count(&s.blocks)).sum()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Section {
    /// Numbering continues across the pages of a design.
    pub number: u8,
    pub title: &'static str,
    pub blocks: Vec<Block>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Block {
    /// Large day flashcards, three per row.
    DayCards { cards: Vec<DayCard> },
    /// Vocabulary cards with an icon on the left, two per row.
    WordCards { cards: Vec<WordCard> },
    /// Numbered write-in boxes in one row.
    OrderSlots { slots: u8, hint: &'static str },
    /// Animals on the left, day tags on the right, dashed guides between.
    Matching {
        animals: Vec<(Icon, &'static str)>,
        days: Vec<(&'static str, Tint)>,
    },
    /// One week: header labels and one cell per day.
    Calendar {
        heads: [&'static str; 7],
        days: [&'static str; 7],
    },
    FillIn { lines: Vec<FillLine> },
    Schedule {
        columns: [&'static str; 3],
        rows: Vec<ScheduleRow>,
    },
    Note { text: &'static str, style: NoteStyle },
    /// Tinted box around nested blocks.
    Panel { blocks: Vec<Block> },
    /// Freehand drawing area; hosts a drawing surface on screen.
    DrawingPad { height_mm: f64 },
    TreasureMap {
        stops: Vec<MapStop>,
        goal: &'static str,
        caption: &'static str,
    },
    /// Blank make-your-own cards: a draw box over ruled lines.
    DiyCards { count: u8 },
    Reading {
        title: &'static str,
        lines: Vec<Vec<Span>>,
    },
    Choice {
        prompt: &'static str,
        options: Vec<&'static str>,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DayCard {
    pub hanzi: &'static str,
    pub pinyin: &'static str,
    pub english: &'static str,
    pub icon: Icon,
    pub tint: Tint,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WordCard {
    pub hanzi: &'static str,
    pub pinyin: &'static str,
    pub english: &'static str,
    pub icon: Icon,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FillLine {
    /// Grey lead-in such as "Yesterday:".
    pub label: Option<&'static str>,
    pub parts: Vec<Fill>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Fill {
    Text(&'static str),
    /// Underlined gap. `width_mm: None` runs to the end of the line.
    Blank {
        width_mm: Option<f64>,
        placeholder: Option<&'static str>,
    },
}

impl Fill {
    pub const fn blank(width_mm: f64) -> Self {
        Fill::Blank {
            width_mm: Some(width_mm),
            placeholder: None,
        }
    }

    pub const fn rest_of_line() -> Self {
        Fill::Blank {
            width_mm: None,
            placeholder: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScheduleRow {
    pub day: &'static str,
    /// Greyed, to be completed by the pupil.
    pub hint: bool,
    pub icon: Icon,
    pub activity: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteStyle {
    Plain,
    Bold,
    Italic,
    Hint,
}

/// Route stop in the treasure map's 400 x 300 artboard.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MapStop {
    pub label: &'static str,
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Span {
    pub text: &'static str,
    pub emphasis: bool,
}

impl Span {
    pub const fn plain(text: &'static str) -> Self {
        Span {
            text,
            emphasis: false,
        }
    }

    pub const fn strong(text: &'static str) -> Self {
        Span {
            text,
            emphasis: true,
        }
    }
}
