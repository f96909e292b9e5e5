use crate::content::{
    Block, DayCard, Fill, FillLine, Icon, NoteStyle, Page, Section, Theme, Tint,
};
use crate::design::Design;

const TITLE: &str = "Animal Week Parade";
const SUB_TITLE: &str = "小动物的一周游行";

pub(crate) fn page(number: u32) -> Option<Page> {
    let sections = match number {
        1 => vec![Section {
            number: 1,
            title: "Flashcards (读一读，记一记)",
            blocks: vec![Block::DayCards { cards: week() }],
        }],
        2 => vec![
            Section {
                number: 2,
                title: "Order the Days (给星期排排队)",
                blocks: vec![Block::OrderSlots {
                    slots: 7,
                    hint: "Put \"星期一\" to \"星期天\" in the correct order.",
                }],
            },
            Section {
                number: 3,
                title: "Match (连一连)",
                blocks: vec![Block::Matching {
                    animals: vec![
                        (Icon::PawPrint, "小熊"),
                        (Icon::Rabbit, "小兔"),
                        (Icon::Panda, "熊猫"),
                    ],
                    days: vec![
                        ("星期五", Tint::Yellow),
                        ("星期天", Tint::Green),
                        ("星期一", Tint::Red),
                    ],
                }],
            },
        ],
        3 => vec![
            Section {
                number: 4,
                title: "Sentences (写句子)",
                blocks: vec![Block::FillIn {
                    lines: vec![
                        day_line("Yesterday:", "昨天是"),
                        day_line("Today:", "今天是"),
                        day_line("Tomorrow:", "明天是"),
                    ],
                }],
            },
            Section {
                number: 5,
                title: "Writing & Drawing (写一写，画一画)",
                blocks: vec![
                    Block::FillIn {
                        lines: vec![
                            FillLine {
                                label: None,
                                parts: vec![
                                    Fill::Text("我最喜欢"),
                                    Fill::blank(34.0),
                                    Fill::Text("， 因为"),
                                    Fill::rest_of_line(),
                                ],
                            },
                            FillLine {
                                label: None,
                                parts: vec![Fill::rest_of_line(), Fill::Text("。")],
                            },
                        ],
                    },
                    Block::Note {
                        text: "(I like... best, because...)",
                        style: NoteStyle::Hint,
                    },
                    Block::DrawingPad { height_mm: 64.0 },
                ],
            },
        ],
        _ => return None,
    };
    Some(Page {
        design: Design::PawPrint,
        number,
        theme: Theme::Blue,
        title: TITLE,
        sub_title: SUB_TITLE,
        sections,
    })
}

fn day_line(label: &'static str, lead: &'static str) -> FillLine {
    FillLine {
        label: Some(label),
        parts: vec![
            Fill::Text(lead),
            Fill::Blank {
                width_mm: Some(40.0),
                placeholder: Some("星期?"),
            },
            Fill::Text("。"),
        ],
    }
}

fn day(
    hanzi: &'static str,
    pinyin: &'static str,
    english: &'static str,
    icon: Icon,
    tint: Tint,
) -> DayCard {
    DayCard {
        hanzi,
        pinyin,
        english,
        icon,
        tint,
    }
}

fn week() -> Vec<DayCard> {
    vec![
        day("星期一", "xīng qī yī", "Monday", Icon::PawPrint, Tint::Red),
        day("星期二", "xīng qī èr", "Tuesday", Icon::Rabbit, Tint::Orange),
        day("星期三", "xīng qī sān", "Wednesday", Icon::Frog, Tint::Yellow),
        day("星期四", "xīng qī sì", "Thursday", Icon::Panda, Tint::Green),
        day("星期五", "xīng qī wǔ", "Friday", Icon::Fox, Tint::Blue),
        day("星期六", "xīng qī liù", "Saturday", Icon::Cat, Tint::Indigo),
        day("星期天", "xīng qī tiān", "Sunday", Icon::Star, Tint::Purple),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flashcards_cover_the_whole_week_in_order() {
        let page = page(1).unwrap();
        let Block::DayCards { cards } = &page.sections[0].blocks[0] else {
            panic!("expected day cards");
        };
        let english: Vec<_> = cards.iter().map(|c| c.english).collect();
        assert_eq!(
            english,
            ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"]
        );
        assert!(cards.iter().all(|c| c.hanzi.starts_with("星期")));
    }

    #[test]
    fn no_fourth_page() {
        assert!(page(4).is_none());
    }
}
