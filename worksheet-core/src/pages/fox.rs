use crate::content::{
    Block, Fill, FillLine, MapStop, NoteStyle, Page, Section, Span, Theme,
};
use crate::design::Design;

pub(crate) fn page(number: u32) -> Option<Page> {
    let sections = match number {
        1 => vec![
            Section {
                number: 1,
                title: "Treasure Map (寻宝路线)",
                blocks: vec![Block::TreasureMap {
                    stops: vec![
                        MapStop {
                            label: "Mon",
                            x: 50.0,
                            y: 50.0,
                        },
                        MapStop {
                            label: "Wed",
                            x: 150.0,
                            y: 100.0,
                        },
                        MapStop {
                            label: "Fri",
                            x: 250.0,
                            y: 150.0,
                        },
                    ],
                    goal: "Sunday Treasure!",
                    caption: "Follow the path: 星期一 > 星期三 > 星期五 > 星期天",
                }],
            },
            Section {
                number: 2,
                title: "DIY Flashcards (自己做卡片)",
                blocks: vec![Block::DiyCards { count: 3 }],
            },
        ],
        2 => vec![
            Section {
                number: 3,
                title: "Reading (读一读)",
                blocks: vec![Block::Panel {
                    blocks: vec![Block::Reading {
                        title: "小狐狸的一周 (Fox's Week)",
                        lines: vec![
                            vec![Span::plain("我是小狐狸。")],
                            vec![Span::strong("星期一"), Span::plain("，我在家读书。")],
                            vec![Span::strong("星期三"), Span::plain("，我和朋友说中文。")],
                            vec![Span::strong("星期五"), Span::plain("，我去上中文课。")],
                            vec![Span::strong("星期天"), Span::plain("，我休息，听中文歌。")],
                            vec![Span::plain("我喜欢我的一周！")],
                        ],
                    }],
                }],
            },
            Section {
                number: 4,
                title: "Questions (想一想)",
                blocks: vec![
                    Block::Choice {
                        prompt: "1. 星期一，小狐狸做什么？(What does Fox do on Monday?)",
                        options: vec!["读书 (Reading)", "睡觉 (Sleeping)"],
                    },
                    Block::Choice {
                        prompt: "2. 小狐狸哪天去上中文课？(When is Chinese class?)",
                        options: vec!["星期三", "星期五"],
                    },
                    Block::Panel {
                        blocks: vec![
                            Block::Note {
                                text: "3. Write your own (写一写):",
                                style: NoteStyle::Bold,
                            },
                            Block::FillIn {
                                lines: vec![FillLine {
                                    label: None,
                                    parts: vec![
                                        Fill::Text("我和小狐狸，"),
                                        Fill::blank(24.0),
                                        Fill::Text("(which day?) 一起玩。"),
                                    ],
                                }],
                            },
                        ],
                    },
                ],
            },
        ],
        _ => return None,
    };
    Some(Page {
        design: Design::Fox,
        number,
        theme: Theme::Orange,
        title: "Treasure Hunt",
        sub_title: "星期寻宝大冒险",
        sections,
    })
}
