use crate::content::{
    Block, Fill, FillLine, Icon, NoteStyle, Page, ScheduleRow, Section, Theme, WordCard,
};
use crate::design::Design;

pub(crate) fn page(number: u32) -> Option<Page> {
    let sections = match number {
        1 => vec![
            Section {
                number: 1,
                title: "Mini Calendar (小日历)",
                blocks: vec![Block::Calendar {
                    heads: ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
                    days: ["一", "二", "三", "四", "五", "六", "天"],
                }],
            },
            Section {
                number: 2,
                title: "Flashcards (认一认)",
                blocks: vec![Block::WordCards {
                    cards: vec![
                        word("熊猫", "xióng māo", "Panda", Icon::Panda),
                        word("狐狸", "hú li", "Fox", Icon::Fox),
                        word("兔子", "tù zi", "Rabbit", Icon::Rabbit),
                        word("小熊", "xiǎo xióng", "Bear", Icon::PawPrint),
                    ],
                }],
            },
        ],
        2 => vec![
            Section {
                number: 3,
                title: "Fill the Schedule (填一填)",
                blocks: vec![Block::Schedule {
                    columns: ["Time (时间)", "Who (谁)", "Activity (做什么)"],
                    rows: vec![
                        row("星期一", false, Icon::Panda, "学中文 (Learn Chinese)"),
                        row("星期___", true, Icon::Fox, "画画 (Drawing)"),
                        row("星期___", true, Icon::Rabbit, "跳舞 (Dance)"),
                        row("星期___", true, Icon::PawPrint, "去公园 (Go to park)"),
                    ],
                }],
            },
            Section {
                number: 4,
                title: "Make Sentences (造句)",
                blocks: vec![Block::Panel {
                    blocks: vec![
                        Block::Note {
                            text: "Example: 熊猫星期一学中文。",
                            style: NoteStyle::Bold,
                        },
                        Block::FillIn {
                            lines: vec![
                                FillLine {
                                    label: None,
                                    parts: vec![
                                        Fill::Text("1. 小狐狸"),
                                        Fill::blank(32.0),
                                        Fill::Text("画画。"),
                                    ],
                                },
                                FillLine {
                                    label: None,
                                    parts: vec![
                                        Fill::Text("2. 小兔"),
                                        Fill::blank(32.0),
                                        Fill::Text("跳舞。"),
                                    ],
                                },
                                FillLine {
                                    label: None,
                                    parts: vec![Fill::Text("3."), Fill::rest_of_line()],
                                },
                            ],
                        },
                    ],
                }],
            },
        ],
        _ => return None,
    };
    Some(Page {
        design: Design::Panda,
        number,
        theme: Theme::Green,
        title: "Zoo Timetable",
        sub_title: "动物乐园时间表",
        sections,
    })
}

fn word(hanzi: &'static str, pinyin: &'static str, english: &'static str, icon: Icon) -> WordCard {
    WordCard {
        hanzi,
        pinyin,
        english,
        icon,
    }
}

fn row(day: &'static str, hint: bool, icon: Icon, activity: &'static str) -> ScheduleRow {
    ScheduleRow {
        day,
        hint,
        icon,
        activity,
    }
}
