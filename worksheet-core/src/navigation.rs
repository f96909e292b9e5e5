use tracing::debug;

use crate::content::Page;
use crate::design::Design;

/// Active design and page. The page always lies in `1..=page_count`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Navigator {
    design: Design,
    page: u32,
}

impl Default for Navigator {
    fn default() -> Self {
        Navigator {
            design: Design::default(),
            page: 1,
        }
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start at `design`, `page` clamped into range.
    pub fn at(design: Design, page: u32) -> Self {
        let mut nav = Navigator { design, page: 1 };
        nav.set_page(page);
        nav
    }

    pub fn design(&self) -> Design {
        self.design
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_count(&self) -> u32 {
        self.design.page_count()
    }

    pub fn select_design(&mut self, design: Design) {
        debug!(from = %self.design, to = %design, "select design");
        self.design = design;
        self.page = 1;
    }

    pub fn next_page(&mut self) {
        self.page = (self.page + 1).min(self.page_count());
        debug!(design = %self.design, page = self.page, "next page");
    }

    pub fn previous_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
        debug!(design = %self.design, page = self.page, "previous page");
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page.clamp(1, self.page_count());
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn label(&self) -> String {
        format!("Page {} of {}", self.page, self.page_count())
    }

    pub fn current_page_content(&self) -> Option<Page> {
        self.design.page(self.page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_first_page_of_first_design() {
        let nav = Navigator::new();
        assert_eq!(nav.design(), Design::PawPrint);
        assert_eq!(nav.page(), 1);
        assert_eq!(nav.label(), "Page 1 of 3");
    }

    #[test]
    fn next_page_stops_at_the_last_page() {
        let mut nav = Navigator::new();
        nav.next_page();
        nav.next_page();
        assert_eq!(nav.page(), 3);
        nav.next_page();
        assert_eq!(nav.page(), 3);
        assert!(!nav.has_next());
    }

    #[test]
    fn previous_page_stops_at_one() {
        let mut nav = Navigator::at(Design::Fox, 2);
        nav.previous_page();
        assert_eq!(nav.page(), 1);
        nav.previous_page();
        assert_eq!(nav.page(), 1);
        assert!(!nav.has_previous());
    }

    #[test]
    fn selecting_a_design_resets_the_page() {
        let mut nav = Navigator::at(Design::Panda, 2);
        assert_eq!(nav.page(), 2);
        nav.select_design(Design::Fox);
        assert_eq!(nav.design(), Design::Fox);
        assert_eq!(nav.page(), 1);
        assert_eq!(nav.page_count(), 2);

        nav.next_page();
        nav.select_design(Design::Fox);
        assert_eq!(nav.page(), 1);
    }

    #[test]
    fn page_stays_in_range_for_any_walk() {
        // Small deterministic LCG drives a long mixed walk over all designs.
        let mut seed: u32 = 0x2545_f491;
        let mut nav = Navigator::new();
        for _ in 0..2_000 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            match (seed >> 16) % 5 {
                0 => nav.next_page(),
                1 => nav.previous_page(),
                2 => nav.select_design(Design::ALL[(seed as usize >> 8) % 3]),
                3 => nav.set_page(seed >> 20),
                _ => nav.next_page(),
            }
            assert!((1..=nav.page_count()).contains(&nav.page()), "{nav:?}");
            assert!(nav.current_page_content().is_some());
        }
    }

    #[test]
    fn set_page_clamps_out_of_range_requests() {
        let mut nav = Navigator::new();
        nav.set_page(0);
        assert_eq!(nav.page(), 1);
        nav.set_page(99);
        assert_eq!(nav.page(), 3);
        assert_eq!(Navigator::at(Design::Panda, 7).page(), 2);
    }

    #[test]
    fn content_tracks_the_current_page() {
        let mut nav = Navigator::new();
        nav.next_page();
        let page = nav.current_page_content().unwrap();
        assert_eq!((page.design, page.number), (Design::PawPrint, 2));
    }
}
