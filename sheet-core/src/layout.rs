use tracing::debug;
use worksheet_core::content::{
    Block, DayCard, Fill, FillLine, Icon, MapStop, NoteStyle, Page, ScheduleRow, Section, Span,
    Tint, WordCard,
};

use crate::icons::icon_svg;
use crate::palette::{
    GRAY_50, GRAY_200, GRAY_300, GRAY_400, GRAY_500, GRAY_600, GRAY_700, GRAY_800, Palette,
    UNIT_ORANGE, WHITE, palette, tint,
};
use crate::{InkOverlay, PAGE_H_MM, PAGE_W_MM, PadRect, RenderedSheet, svg_escape, text_width};

const MARGIN: f64 = 14.0;
const BODY_W: f64 = PAGE_W_MM - 2.0 * MARGIN;
const BODY_TOP: f64 = 48.0;
const FOOTER_Y: f64 = 290.0;
const BLOCK_GAP: f64 = 4.0;
const SECTION_GAP: f64 = 8.0;
const PANEL_PAD: f64 = 6.0;

const UNIT_LINE: &str = "LINGOACE LEVEL 1 UNIT 9";

#[derive(Clone, Copy)]
enum Anchor {
    Start,
    Middle,
}

#[derive(Clone, Copy)]
struct Font {
    size: f64,
    fill: &'static str,
    bold: bool,
    italic: bool,
    anchor: Anchor,
}

impl Font {
    const fn new(size: f64, fill: &'static str) -> Self {
        Font {
            size,
            fill,
            bold: false,
            italic: false,
            anchor: Anchor::Start,
        }
    }
    const fn bold(self) -> Self {
        Font { bold: true, ..self }
    }
    const fn italic(self) -> Self {
        Font {
            italic: true,
            ..self
        }
    }
    const fn middle(self) -> Self {
        Font {
            anchor: Anchor::Middle,
            ..self
        }
    }

    fn attrs(&self) -> String {
        let mut a = format!("font-size=\"{:.2}\" fill=\"{}\"", self.size, self.fill);
        if self.bold {
            a.push_str(" font-weight=\"bold\"");
        }
        if self.italic {
            a.push_str(" font-style=\"italic\"");
        }
        match self.anchor {
            Anchor::Start => {}
            Anchor::Middle => a.push_str(" text-anchor=\"middle\""),
        }
        a
    }
}

/// SVG writer with a vertical cursor, all coordinates in millimetres.
struct Sheet<'a> {
    out: String,
    y: f64,
    pal: &'static Palette,
    pads: Vec<PadRect>,
    overlays: &'a [InkOverlay],
}

/// Lay out one page at `px_per_mm` pixels per millimetre. Overlays are drawn
/// over the pad with the matching index; unmatched ones are ignored.
pub fn build_page_svg(page: &Page, px_per_mm: f64, overlays: &[InkOverlay]) -> RenderedSheet {
    let width_px = (PAGE_W_MM * px_per_mm).ceil().max(1.0) as u32;
    let height_px = (PAGE_H_MM * px_per_mm).ceil().max(1.0) as u32;

    let mut s = String::new();
    s.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    s.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\" font-family=\"sans-serif\">\n",
        width_px, height_px, PAGE_W_MM, PAGE_H_MM
    ));
    s.push_str(&format!(
        "<rect x=\"0\" y=\"0\" width=\"100%\" height=\"100%\" fill=\"{WHITE}\"/>\n"
    ));

    let sheet = lay_out(page, overlays);
    s.push_str(&sheet.out);
    s.push_str("</svg>\n");

    debug!(
        design = %page.design,
        page = page.number,
        pads = sheet.pads.len(),
        bottom_mm = sheet.y,
        "page laid out"
    );
    RenderedSheet {
        svg: s,
        width_px,
        height_px,
        pads: sheet.pads,
    }
}

fn lay_out<'a>(page: &Page, overlays: &'a [InkOverlay]) -> Sheet<'a> {
    let mut sheet = Sheet {
        out: String::new(),
        y: 0.0,
        pal: palette(page.theme),
        pads: Vec::new(),
        overlays,
    };
    sheet.header(page);
    sheet.y = BODY_TOP;
    for section in &page.sections {
        sheet.section(section);
    }
    sheet.text(
        PAGE_W_MM / 2.0,
        FOOTER_Y,
        Font::new(3.4, GRAY_400).middle(),
        &format!("Page {}", page.number),
    );
    sheet
}

impl Sheet<'_> {
    fn text(&mut self, x: f64, y: f64, font: Font, body: &str) {
        self.out.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" {}>{}</text>\n",
            x,
            y,
            font.attrs(),
            svg_escape(body)
        ));
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, rx: f64, style: &str) {
        self.out.push_str(&rect_markup(x, y, w, h, rx, style));
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, style: &str) {
        self.out.push_str(&format!(
            "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" {style}/>\n",
            x1, y1, x2, y2
        ));
    }

    fn icon(&mut self, icon: Icon, cx: f64, cy: f64, size: f64) {
        self.out.push_str(&icon_svg(icon, cx, cy, size));
    }

    fn header(&mut self, page: &Page) {
        self.text(MARGIN, 18.0, Font::new(3.2, UNIT_ORANGE).bold(), UNIT_LINE);
        self.text(MARGIN, 28.0, Font::new(9.0, self.pal.heading).bold(), page.title);
        self.text(MARGIN, 35.0, Font::new(5.0, GRAY_500), page.sub_title);

        let right = PAGE_W_MM - MARGIN;
        for (label, y) in [("Name:", 24.0), ("Date:", 33.0)] {
            self.text(right - 50.0, y, Font::new(3.8, GRAY_600).bold(), label);
            self.line(
                right - 38.0,
                y + 0.8,
                right,
                y + 0.8,
                &format!("stroke=\"{GRAY_400}\" stroke-width=\"0.4\""),
            );
        }
        let rule = self.pal.rule;
        self.line(
            MARGIN,
            40.0,
            right,
            40.0,
            &format!("stroke=\"{rule}\" stroke-width=\"0.8\""),
        );
    }

    fn section(&mut self, section: &Section) {
        let top = self.y;
        self.out.push_str(&format!(
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"5\" fill=\"{}\"/>\n",
            MARGIN + 5.0,
            top + 5.0,
            self.pal.accent
        ));
        self.text(
            MARGIN + 5.0,
            top + 6.8,
            Font::new(5.0, WHITE).bold().middle(),
            &section.number.to_string(),
        );
        self.text(
            MARGIN + 13.0,
            top + 7.0,
            Font::new(5.5, GRAY_800).bold(),
            section.title,
        );
        self.y = top + 14.0;
        self.blocks(&section.blocks, MARGIN, BODY_W);
        self.y += SECTION_GAP;
    }

    fn blocks(&mut self, blocks: &[Block], x: f64, w: f64) {
        for (i, block) in blocks.iter().enumerate() {
            if i > 0 {
                self.y += BLOCK_GAP;
            }
            self.block(block, x, w);
        }
    }

    fn block(&mut self, block: &Block, x: f64, w: f64) {
        match block {
            Block::DayCards { cards } => self.day_cards(cards, x, w),
            Block::WordCards { cards } => self.word_cards(cards, x, w),
            Block::OrderSlots { slots, hint } => self.order_slots(*slots, hint, x, w),
            Block::Matching { animals, days } => self.matching(animals, days, x, w),
            Block::Calendar { heads, days } => self.calendar(heads, days, x, w),
            Block::FillIn { lines } => {
                for line in lines {
                    self.fill_line(line, x, w);
                }
            }
            Block::Schedule { columns, rows } => self.schedule(columns, rows, x, w),
            Block::Note { text, style } => {
                let font = match style {
                    NoteStyle::Plain => Font::new(4.2, GRAY_700),
                    NoteStyle::Bold => Font::new(4.4, GRAY_800).bold(),
                    NoteStyle::Italic => Font::new(4.2, GRAY_600).italic(),
                    NoteStyle::Hint => Font::new(3.6, GRAY_400).italic(),
                };
                self.text(x, self.y + 5.0, font, text);
                self.y += 7.0;
            }
            Block::Panel { blocks } => self.panel(blocks, x, w),
            Block::DrawingPad { height_mm } => self.drawing_pad(*height_mm, x, w),
            Block::TreasureMap {
                stops,
                goal,
                caption,
            } => self.treasure_map(stops, goal, caption, x, w),
            Block::DiyCards { count } => self.diy_cards(*count, x, w),
            Block::Reading { title, lines } => self.reading(title, lines, x),
            Block::Choice { prompt, options } => self.choice(prompt, options, x),
        }
    }

    fn day_cards(&mut self, cards: &[DayCard], x: f64, w: f64) {
        const COLS: usize = 3;
        const GAP: f64 = 6.0;
        const H: f64 = 46.0;
        let card_w = (w - GAP * (COLS - 1) as f64) / COLS as f64;
        let rows = cards.len().div_ceil(COLS);
        for (i, card) in cards.iter().enumerate() {
            let (row, col) = (i / COLS, i % COLS);
            // An incomplete last row is centred.
            let in_row = (cards.len() - row * COLS).min(COLS);
            let shift = (COLS - in_row) as f64 * (card_w + GAP) / 2.0;
            let cx = x + shift + col as f64 * (card_w + GAP);
            let cy = self.y + row as f64 * (H + GAP);
            let (border, _) = tint(card.tint);
            self.rect(
                cx,
                cy,
                card_w,
                H,
                4.0,
                &format!("fill=\"{WHITE}\" stroke=\"{border}\" stroke-width=\"1.5\""),
            );
            let mid = cx + card_w / 2.0;
            self.icon(card.icon, mid, cy + 13.0, 16.0);
            self.text(mid, cy + 29.0, Font::new(6.5, GRAY_800).bold().middle(), card.hanzi);
            self.text(
                mid,
                cy + 35.5,
                Font::new(3.6, self.pal.accent).middle(),
                card.pinyin,
            );
            self.text(mid, cy + 41.5, Font::new(3.4, GRAY_500).middle(), card.english);
        }
        self.y += stacked(rows, H, GAP);
    }

    fn word_cards(&mut self, cards: &[WordCard], x: f64, w: f64) {
        const COLS: usize = 2;
        const GAP: f64 = 6.0;
        const H: f64 = 26.0;
        let card_w = (w - GAP) / COLS as f64;
        let mid = self.pal.mid;
        for (i, card) in cards.iter().enumerate() {
            let cx = x + (i % COLS) as f64 * (card_w + GAP);
            let cy = self.y + (i / COLS) as f64 * (H + GAP);
            self.rect(
                cx,
                cy,
                card_w,
                H,
                3.0,
                &format!("fill=\"{WHITE}\" stroke=\"{mid}\" stroke-width=\"0.8\""),
            );
            self.icon(card.icon, cx + 13.0, cy + 13.0, 16.0);
            self.text(cx + 26.0, cy + 11.0, Font::new(6.0, GRAY_800).bold(), card.hanzi);
            self.text(
                cx + 26.0,
                cy + 17.0,
                Font::new(3.4, self.pal.accent),
                card.pinyin,
            );
            self.text(cx + 26.0, cy + 22.0, Font::new(3.2, GRAY_500), card.english);
        }
        self.y += stacked(cards.len().div_ceil(COLS), H, GAP);
    }

    fn order_slots(&mut self, slots: u8, hint: &str, x: f64, w: f64) {
        const H: f64 = 46.0;
        const GAP: f64 = 3.0;
        let (wash, soft, mid) = (self.pal.wash, self.pal.soft, self.pal.mid);
        self.rect(
            x,
            self.y,
            w,
            H,
            4.0,
            &format!(
                "fill=\"{wash}\" stroke=\"{soft}\" stroke-width=\"0.8\" stroke-dasharray=\"3 2\""
            ),
        );
        let n = slots.max(1) as f64;
        let box_w = (w - 12.0 - GAP * (n - 1.0)) / n;
        let by = self.y + 8.0;
        for i in 0..slots {
            let bx = x + 6.0 + i as f64 * (box_w + GAP);
            self.rect(
                bx,
                by,
                box_w,
                30.0,
                2.0,
                &format!("fill=\"{WHITE}\" stroke=\"{mid}\" stroke-width=\"0.6\""),
            );
            self.text(
                bx + 2.5,
                by + 4.5,
                Font::new(3.0, GRAY_400),
                &(i + 1).to_string(),
            );
        }
        self.text(
            x + w / 2.0,
            self.y + H + 6.0,
            Font::new(3.6, GRAY_500).italic().middle(),
            hint,
        );
        self.y += H + 8.0;
    }

    fn matching(&mut self, animals: &[(Icon, &str)], days: &[(&str, Tint)], x: f64, w: f64) {
        const PITCH: f64 = 24.0;
        const BOX_H: f64 = 14.0;
        const LEFT_W: f64 = 46.0;
        const RIGHT_W: f64 = 34.0;
        let rows = animals.len().max(days.len());
        let row_y = |top: f64, i: usize| top + i as f64 * PITCH + (PITCH - BOX_H) / 2.0;
        let top = self.y;
        let right_x = x + w - RIGHT_W;

        for (i, (icon, name)) in animals.iter().enumerate() {
            let ry = row_y(top, i);
            self.rect(
                x,
                ry,
                LEFT_W,
                BOX_H,
                3.0,
                &format!("fill=\"{WHITE}\" stroke=\"{GRAY_300}\" stroke-width=\"0.6\""),
            );
            self.icon(*icon, x + 9.0, ry + BOX_H / 2.0, 11.0);
            self.text(x + 18.0, ry + 9.0, Font::new(5.0, GRAY_800).bold(), name);
        }
        for (i, (day, t)) in days.iter().enumerate() {
            let ry = row_y(top, i);
            let (border, fill) = tint(*t);
            self.rect(
                right_x,
                ry,
                RIGHT_W,
                BOX_H,
                BOX_H / 2.0,
                &format!("fill=\"{fill}\" stroke=\"{border}\" stroke-width=\"0.8\""),
            );
            self.text(
                right_x + RIGHT_W / 2.0,
                ry + 9.0,
                Font::new(5.0, GRAY_700).bold().middle(),
                day,
            );
        }
        // Guides pair animal i with the day one row up, wrapping round.
        for i in 0..animals.len() {
            let j = (i + rows - 1) % rows;
            if j >= days.len() {
                continue;
            }
            let (x1, y1) = (x + LEFT_W, row_y(top, i) + BOX_H / 2.0);
            let (x2, y2) = (right_x, row_y(top, j) + BOX_H / 2.0);
            let dx = (x2 - x1) / 3.0;
            self.out.push_str(&format!(
                "<path d=\"M{:.2},{:.2} C{:.2},{:.2} {:.2},{:.2} {:.2},{:.2}\" fill=\"none\" stroke=\"{GRAY_300}\" stroke-width=\"0.6\" stroke-dasharray=\"2 2\"/>\n",
                x1,
                y1,
                x1 + dx,
                y1,
                x2 - dx,
                y2,
                x2,
                y2
            ));
        }
        self.y += rows as f64 * PITCH;
    }

    fn calendar(&mut self, heads: &[&str; 7], days: &[&str; 7], x: f64, w: f64) {
        const HEAD_H: f64 = 7.0;
        const CELL_H: f64 = 24.0;
        let cell_w = w / 7.0;
        let (pale, mid, dark) = (self.pal.pale, self.pal.mid, self.pal.dark);
        self.rect(x, self.y, w, HEAD_H, 0.0, &format!("fill=\"{pale}\""));
        let cells_top = self.y + HEAD_H;
        for (i, (head, day)) in heads.iter().zip(days).enumerate() {
            let cx = x + i as f64 * cell_w;
            let mid_x = cx + cell_w / 2.0;
            self.text(mid_x, self.y + 5.0, Font::new(3.6, dark).bold().middle(), head);
            self.rect(
                cx,
                cells_top,
                cell_w,
                CELL_H,
                0.0,
                &format!("fill=\"{WHITE}\" stroke=\"{mid}\" stroke-width=\"0.6\""),
            );
            self.text(mid_x, cells_top + 6.0, Font::new(3.0, GRAY_400).middle(), "星期");
            self.text(
                mid_x,
                cells_top + 18.0,
                Font::new(10.0, GRAY_700).bold().middle(),
                day,
            );
        }
        self.y += HEAD_H + CELL_H;
    }

    fn fill_line(&mut self, line: &FillLine, x: f64, w: f64) {
        const H: f64 = 13.0;
        const SIZE: f64 = 5.5;
        const SPACE: f64 = 1.5;
        const MIN_BLANK: f64 = 10.0;
        let base = self.y + 9.0;
        let mut cx = x;
        if let Some(label) = line.label {
            self.text(cx, base, Font::new(3.8, GRAY_500), label);
            cx += 26.0;
        }
        let advance = |part: &Fill| match part {
            Fill::Text(t) => text_width(t, SIZE) + SPACE,
            Fill::Blank { width_mm, .. } => width_mm.unwrap_or(MIN_BLANK) + SPACE,
        };
        for (i, part) in line.parts.iter().enumerate() {
            match part {
                Fill::Text(t) => {
                    self.text(cx, base, Font::new(SIZE, GRAY_800), t);
                    cx += advance(part);
                }
                Fill::Blank {
                    width_mm,
                    placeholder,
                } => {
                    let bw = match width_mm {
                        Some(bw) => *bw,
                        None => {
                            let trailing: f64 = line.parts[i + 1..].iter().map(advance).sum();
                            (x + w - cx - trailing).max(MIN_BLANK)
                        }
                    };
                    self.line(
                        cx,
                        base + 1.5,
                        cx + bw,
                        base + 1.5,
                        &format!("stroke=\"{GRAY_400}\" stroke-width=\"0.4\""),
                    );
                    if let Some(p) = placeholder {
                        self.text(cx + bw / 2.0, base, Font::new(4.0, GRAY_300).middle(), p);
                    }
                    cx += bw + SPACE;
                }
            }
        }
        self.y += H;
    }

    fn schedule(&mut self, columns: &[&str; 3], rows: &[ScheduleRow], x: f64, w: f64) {
        const HEAD_H: f64 = 10.0;
        const ROW_H: f64 = 20.0;
        let widths = [w * 0.3, w * 0.3, w * 0.4];
        let starts = [x, x + widths[0], x + widths[0] + widths[1]];
        let (pale, mid, dark) = (self.pal.pale, self.pal.mid, self.pal.dark);
        let cell = format!("fill=\"{WHITE}\" stroke=\"{mid}\" stroke-width=\"0.6\"");

        self.rect(
            x,
            self.y,
            w,
            HEAD_H,
            0.0,
            &format!("fill=\"{pale}\" stroke=\"{mid}\" stroke-width=\"0.6\""),
        );
        for (c, title) in columns.iter().enumerate() {
            self.text(
                starts[c] + widths[c] / 2.0,
                self.y + 6.5,
                Font::new(4.0, dark).bold().middle(),
                title,
            );
        }
        for (r, row) in rows.iter().enumerate() {
            let ry = self.y + HEAD_H + r as f64 * ROW_H;
            for c in 0..3 {
                self.rect(starts[c], ry, widths[c], ROW_H, 0.0, &cell);
            }
            let day_font = if row.hint {
                Font::new(5.0, GRAY_400).italic()
            } else {
                Font::new(5.0, GRAY_800).bold()
            };
            self.text(
                starts[0] + widths[0] / 2.0,
                ry + 12.0,
                day_font.middle(),
                row.day,
            );
            self.icon(row.icon, starts[1] + widths[1] / 2.0, ry + ROW_H / 2.0, 14.0);
            self.text(
                starts[2] + widths[2] / 2.0,
                ry + 11.5,
                Font::new(4.2, GRAY_700).middle(),
                row.activity,
            );
        }
        self.y += HEAD_H + rows.len() as f64 * ROW_H;
    }

    fn panel(&mut self, blocks: &[Block], x: f64, w: f64) {
        let at = self.out.len();
        let top = self.y;
        self.y += PANEL_PAD;
        self.blocks(blocks, x + PANEL_PAD, w - 2.0 * PANEL_PAD);
        self.y += PANEL_PAD;
        let (wash, soft) = (self.pal.wash, self.pal.soft);
        // Background goes under the content already written.
        self.out.insert_str(
            at,
            &rect_markup(
                x,
                top,
                w,
                self.y - top,
                4.0,
                &format!("fill=\"{wash}\" stroke=\"{soft}\" stroke-width=\"0.6\""),
            ),
        );
    }

    fn drawing_pad(&mut self, h: f64, x: f64, w: f64) {
        let index = self.pads.len();
        let y = self.y;
        self.rect(
            x,
            y,
            w,
            h,
            3.0,
            &format!(
                "fill=\"{WHITE}\" stroke=\"{GRAY_300}\" stroke-width=\"0.6\" stroke-dasharray=\"3 2\""
            ),
        );
        self.text(
            x + w / 2.0,
            y + h / 2.0 + 1.5,
            Font::new(4.0, GRAY_300).middle(),
            "画一画 (Draw Here)",
        );
        if let Some(ink) = self.overlays.iter().find(|o| o.pad == index) {
            self.out.push_str(&format!(
                "<image x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" preserveAspectRatio=\"none\" xlink:href=\"{}\"/>\n",
                x,
                y,
                w,
                h,
                ink.data_url()
            ));
        }
        self.pads.push(PadRect { x, y, w, h });
        self.y += h;
    }

    fn treasure_map(&mut self, stops: &[MapStop], goal: &str, caption: &str, x: f64, w: f64) {
        const H: f64 = 100.0;
        const GOAL: (f64, f64) = (350.0, 250.0);
        let (wash, soft, mid, accent, dark) = (
            self.pal.wash,
            self.pal.soft,
            self.pal.mid,
            self.pal.accent,
            self.pal.dark,
        );
        let top = self.y;
        self.rect(
            x,
            top,
            w,
            H,
            4.0,
            &format!(
                "fill=\"{wash}\" stroke=\"{soft}\" stroke-width=\"0.8\" stroke-dasharray=\"3 2\""
            ),
        );

        // 400 x 300 artboard, fitted and centred.
        let k = (w / 400.0).min(H / 300.0);
        let ax = x + (w - 400.0 * k) / 2.0;
        let ay = top + (H - 300.0 * k) / 2.0;
        self.out.push_str(&format!(
            "<g transform=\"translate({:.2} {:.2}) scale({:.4})\">\n",
            ax, ay, k
        ));
        if let Some(first) = stops.first() {
            let mut d = format!("M{},{}", first.x, first.y);
            let mut rest = stops[1..].iter().map(|s| (s.x, s.y)).chain([GOAL]);
            if let Some((x1, y1)) = rest.next() {
                d.push_str(&format!(
                    " Q{},{} {},{}",
                    (first.x + x1) / 2.0,
                    first.y,
                    x1,
                    y1
                ));
            }
            for (px, py) in rest {
                d.push_str(&format!(" T{},{}", px, py));
            }
            self.out.push_str(&format!(
                "<path d=\"{d}\" fill=\"none\" stroke=\"{mid}\" stroke-width=\"8\" stroke-dasharray=\"10 10\"/>\n"
            ));
        }
        for stop in stops {
            self.out.push_str(&format!(
                "<circle cx=\"{}\" cy=\"{}\" r=\"15\" fill=\"{accent}\"/>\n",
                stop.x, stop.y
            ));
            self.text(
                stop.x,
                stop.y - 20.0,
                Font::new(12.0, dark).middle(),
                stop.label,
            );
        }
        self.out.push_str(&format!(
            "<rect x=\"{}\" y=\"{}\" width=\"40\" height=\"40\" fill=\"#f59e0b\"/>\n",
            GOAL.0 - 20.0,
            GOAL.1 - 20.0
        ));
        self.text(
            GOAL.0,
            GOAL.1 - 30.0,
            Font::new(12.0, GRAY_800).bold().middle(),
            goal,
        );
        self.out.push_str("</g>\n");

        let cap_w = text_width(caption, 3.4) + 6.0;
        self.rect(
            x + 4.0,
            top + H - 12.0,
            cap_w,
            8.0,
            1.5,
            &format!("fill=\"{WHITE}\" stroke=\"{soft}\" stroke-width=\"0.4\""),
        );
        self.text(x + 7.0, top + H - 6.8, Font::new(3.4, dark), caption);
        self.y += H;
    }

    fn diy_cards(&mut self, count: u8, x: f64, w: f64) {
        const GAP: f64 = 6.0;
        const H: f64 = 64.0;
        let n = count.max(1) as f64;
        let card_w = (w - GAP * (n - 1.0)) / n;
        let accent = self.pal.accent;
        let top = self.y;
        for i in 0..count {
            let cx = x + i as f64 * (card_w + GAP);
            self.rect(
                cx,
                top,
                card_w,
                H,
                4.0,
                &format!("fill=\"{WHITE}\" stroke=\"{GRAY_300}\" stroke-width=\"1.2\""),
            );
            self.rect(
                cx + 4.0,
                top + 4.0,
                card_w - 8.0,
                30.0,
                2.0,
                &format!(
                    "fill=\"{GRAY_50}\" stroke=\"{GRAY_200}\" stroke-width=\"0.6\" stroke-dasharray=\"2 2\""
                ),
            );
            self.text(
                cx + card_w / 2.0,
                top + 20.5,
                Font::new(4.0, GRAY_300).middle(),
                "Draw",
            );
            for ly in [42.0, 50.0, 58.0] {
                self.line(
                    cx + 4.0,
                    top + ly,
                    cx + card_w - 4.0,
                    top + ly,
                    &format!("stroke=\"{GRAY_300}\" stroke-width=\"0.4\""),
                );
            }
            self.out.push_str(&format!(
                "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"4\" fill=\"{accent}\"/>\n",
                cx + card_w - 1.0,
                top + 1.0
            ));
            self.text(
                cx + card_w - 1.0,
                top + 2.4,
                Font::new(4.0, WHITE).bold().middle(),
                &(i + 1).to_string(),
            );
        }
        self.y += H;
    }

    fn reading(&mut self, title: &str, lines: &[Vec<Span>], x: f64) {
        self.text(x, self.y + 6.0, Font::new(5.0, self.pal.dark).bold(), title);
        self.y += 10.0;
        let heading = self.pal.heading;
        for line in lines {
            let mut spans = String::new();
            for span in line {
                if span.emphasis {
                    spans.push_str(&format!(
                        "<tspan font-weight=\"bold\" fill=\"{heading}\">{}</tspan>",
                        svg_escape(span.text)
                    ));
                } else {
                    spans.push_str(&format!("<tspan>{}</tspan>", svg_escape(span.text)));
                }
            }
            self.out.push_str(&format!(
                "<text x=\"{:.2}\" y=\"{:.2}\" {}>{}</text>\n",
                x,
                self.y + 6.0,
                Font::new(4.8, GRAY_700).attrs(),
                spans
            ));
            self.y += 9.0;
        }
    }

    fn choice(&mut self, prompt: &str, options: &[&str], x: f64) {
        const SIZE: f64 = 4.2;
        self.text(x, self.y + 5.0, Font::new(4.4, GRAY_800), prompt);
        let oy = self.y + 12.5;
        let mut ox = x + 6.0;
        for option in options {
            self.out.push_str(&format!(
                "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"2\" fill=\"{WHITE}\" stroke=\"{GRAY_400}\" stroke-width=\"0.5\"/>\n",
                ox + 2.0,
                oy - 1.4
            ));
            self.text(ox + 6.0, oy, Font::new(SIZE, GRAY_700), option);
            ox += 6.0 + text_width(option, SIZE) + 12.0;
        }
        self.y += 16.0;
    }
}

fn rect_markup(x: f64, y: f64, w: f64, h: f64, rx: f64, style: &str) -> String {
    format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"{:.2}\" {style}/>\n",
        x, y, w, h, rx
    )
}

/// Height of `rows` rows of `h` separated by `gap`.
fn stacked(rows: usize, h: f64, gap: f64) -> f64 {
    if rows == 0 {
        0.0
    } else {
        rows as f64 * h + (rows - 1) as f64 * gap
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use worksheet_core::{Design, RasterInk};

    fn every_page() -> Vec<Page> {
        Design::ALL
            .iter()
            .flat_map(|d| (1..=d.page_count()).filter_map(|n| d.page(n)))
            .collect()
    }

    #[test]
    fn every_page_is_valid_svg_of_a4_size() {
        for page in every_page() {
            let sheet = build_page_svg(&page, 4.0, &[]);
            assert_eq!((sheet.width_px, sheet.height_px), (840, 1188));
            let tree = usvg::Tree::from_str(&sheet.svg, &usvg::Options::default())
                .unwrap_or_else(|e| panic!("{} page {}: {e}", page.design, page.number));
            assert_eq!(tree.size().width(), 840.0);
            assert_eq!(tree.size().height(), 1188.0);
        }
    }

    #[test]
    fn content_stays_above_the_footer() {
        for page in every_page() {
            let sheet = lay_out(&page, &[]);
            assert!(
                sheet.y < FOOTER_Y - 4.0,
                "{} page {} runs to {} mm",
                page.design,
                page.number,
                sheet.y
            );
        }
    }

    #[test]
    fn pads_match_content_and_sit_on_the_page() {
        for page in every_page() {
            let sheet = build_page_svg(&page, 2.0, &[]);
            assert_eq!(sheet.pads.len(), page.drawing_pads());
            for pad in &sheet.pads {
                assert!(pad.x >= 0.0 && pad.x + pad.w <= PAGE_W_MM);
                assert!(pad.y >= BODY_TOP && pad.y + pad.h <= FOOTER_Y);
            }
        }
    }

    #[test]
    fn drawing_pad_spans_the_body_width() {
        let page = Design::PawPrint.page(3).unwrap();
        let sheet = build_page_svg(&page, 4.0, &[]);
        assert_eq!(sheet.pads.len(), 1);
        let pad = sheet.pads[0];
        assert_eq!((pad.x, pad.w, pad.h), (MARGIN, BODY_W, 64.0));
    }

    #[test]
    fn overlay_is_embedded_over_its_pad() {
        let page = Design::PawPrint.page(3).unwrap();
        let plain = build_page_svg(&page, 4.0, &[]);
        assert!(!plain.svg.contains("<image"));

        let (w, h) = plain.pads[0].size_px(4.0);
        let ink = RasterInk::new(w, h).unwrap();
        let overlay = InkOverlay::from_raster(0, &ink).unwrap();
        let inked = build_page_svg(&page, 4.0, &[overlay]);
        assert!(inked.svg.contains("xlink:href=\"data:image/png;base64,"));
        assert!(usvg::Tree::from_str(&inked.svg, &usvg::Options::default()).is_ok());
    }

    #[test]
    fn overlay_for_missing_pad_is_ignored() {
        let page = Design::Panda.page(1).unwrap();
        let overlay = InkOverlay {
            pad: 0,
            png: vec![1, 2, 3],
        };
        let sheet = build_page_svg(&page, 4.0, &[overlay]);
        assert!(sheet.pads.is_empty());
        assert!(!sheet.svg.contains("<image"));
    }

    #[test]
    fn header_carries_titles_and_footer_the_page_number() {
        let page = Design::Fox.page(2).unwrap();
        let svg = build_page_svg(&page, 4.0, &[]).svg;
        assert!(svg.contains(">Treasure Hunt</text>"));
        assert!(svg.contains(">星期寻宝大冒险</text>"));
        assert!(svg.contains(">Page 2</text>"));
        assert!(svg.contains(UNIT_LINE));
    }

    #[test]
    fn caption_markup_is_escaped() {
        let page = Design::Fox.page(1).unwrap();
        let svg = build_page_svg(&page, 4.0, &[]).svg;
        assert!(svg.contains("星期一 &gt; 星期三"));
    }

    #[test]
    fn tiny_scale_still_yields_a_pixel() {
        let page = Design::Panda.page(2).unwrap();
        let sheet = build_page_svg(&page, 0.0, &[]);
        assert_eq!((sheet.width_px, sheet.height_px), (1, 1));
    }
}
