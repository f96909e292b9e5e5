//! Printable output for the days-of-the-week worksheets: SVG, PNG and
//! multi-page PDF, with recorded pad ink laid over the drawing pads.

use anyhow::{Result, bail};
use worksheet_core::{Design, Navigator, Page};

pub mod config;
pub mod ink;
pub mod render;

pub use config::{Config, Format};
pub use render::Renderer;

/// Pages of `design` in order, or just `page` when given.
pub fn design_pages(design: Design, page: Option<u32>) -> Result<Vec<Page>> {
    if let Some(n) = page {
        if n == 0 || n > design.page_count() {
            bail!("{design} has pages 1 to {}, not {n}", design.page_count());
        }
        return Ok(Navigator::at(design, n).current_page_content().into_iter().collect());
    }
    let mut nav = Navigator::new();
    nav.select_design(design);
    let mut pages = Vec::new();
    loop {
        pages.extend(nav.current_page_content());
        if !nav.has_next() {
            break;
        }
        nav.next_page();
    }
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_every_page_of_a_design() {
        let pages = design_pages(Design::PawPrint, None).unwrap();
        let numbers: Vec<_> = pages.iter().map(|p| p.number).collect();
        assert_eq!(numbers, [1, 2, 3]);
    }

    #[test]
    fn single_page_must_exist() {
        assert_eq!(design_pages(Design::Fox, Some(2)).unwrap()[0].number, 2);
        assert!(design_pages(Design::Fox, Some(3)).is_err());
        assert!(design_pages(Design::Fox, Some(0)).is_err());
    }
}
