use sheet::config::FontConfig;
use sheet::ink::InkFile;
use sheet::{Renderer, design_pages};
use worksheet_core::Design;

fn renderer(px_per_mm: f64) -> Renderer {
    let fonts = FontConfig {
        path: None,
        system: false,
    };
    Renderer::new(&fonts, px_per_mm).unwrap()
}

fn decode(png_bytes: &[u8]) -> (png::OutputInfo, Vec<u8>) {
    let decoder = png::Decoder::new(png_bytes);
    let mut reader = decoder.read_info().unwrap();
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).unwrap();
    (info, buf)
}

fn pixel(info: &png::OutputInfo, buf: &[u8], x: u32, y: u32) -> [u8; 4] {
    let i = (y * info.width + x) as usize * 4;
    [buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]
}

#[test]
fn pdf_has_one_page_per_sheet() {
    let r = renderer(1.0);
    let pages = design_pages(Design::PawPrint, None).unwrap();
    let sheets: Vec<_> = pages.iter().map(|p| r.sheet(p, &[])).collect();
    let pdf = r.pdf(&sheets).unwrap();
    assert!(pdf.starts_with(b"%PDF-"));
    let text = String::from_utf8_lossy(&pdf);
    assert!(text.contains("/Count 3"));
    assert!(text.contains("/MediaBox"));
}

#[test]
fn pdf_keeps_worksheet_text() {
    let r = renderer(1.0);
    // Nothing to embed on a machine without any font.
    if r.font_faces() == 0 {
        return;
    }
    let page = Design::Fox.page(1).unwrap();
    let pdf = r.pdf(&[r.sheet(&page, &[])]).unwrap();
    let text = String::from_utf8_lossy(&pdf);
    assert!(text.contains("/Font"), "no font resources in the PDF");
}

#[test]
fn png_is_a4_at_the_requested_resolution() {
    let r = renderer(1.0);
    let page = Design::Panda.page(1).unwrap();
    let png_bytes = r.png(&r.sheet(&page, &[])).unwrap();
    let (info, buf) = decode(&png_bytes);
    assert_eq!((info.width, info.height), (210, 297));
    // Page corner is paper white.
    assert_eq!(pixel(&info, &buf, 1, 1), [255, 255, 255, 255]);
}

#[test]
fn recorded_ink_prints_on_the_drawing_pad() {
    let r = renderer(2.0);
    let pages = design_pages(Design::PawPrint, Some(3)).unwrap();
    let plain = r.sheet(&pages[0], &[]);
    let pad = plain.pads[0];

    let ink: InkFile =
        serde_json::from_str(r#"{ "pads": [ [ [[10, 12], [150, 12]] ] ] }"#).unwrap();
    let overlays = ink.overlays(0, &plain.pads, r.px_per_mm()).unwrap();
    assert_eq!(overlays.len(), 1);
    let inked = r.sheet(&pages[0], &overlays);

    let x = ((pad.x + 80.0) * 2.0) as u32;
    let y = ((pad.y + 12.0) * 2.0) as u32;
    let (info, buf) = decode(&r.png(&plain).unwrap());
    assert_eq!(pixel(&info, &buf, x, y), [255, 255, 255, 255]);
    let (info, buf) = decode(&r.png(&inked).unwrap());
    let [red, ..] = pixel(&info, &buf, x, y);
    assert!(red < 0x80, "expected ink, got red = {red}");
}

#[test]
fn zero_resolution_is_refused() {
    let fonts = FontConfig::default();
    assert!(Renderer::new(&fonts, 0.0).is_err());
    assert!(Renderer::new(&fonts, f64::NAN).is_err());
}
