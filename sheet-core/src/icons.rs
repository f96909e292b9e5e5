//! Icon artwork on a 100 x 100 artboard.

use worksheet_core::Icon;

use crate::palette::GRAY_600;

/// `<g>` drawing `icon` centred on (`cx`, `cy`), `size` mm square.
pub fn icon_svg(icon: Icon, cx: f64, cy: f64, size: f64) -> String {
    let k = size / 100.0;
    format!(
        "<g transform=\"translate({:.2} {:.2}) scale({:.4})\">{}</g>\n",
        cx - size / 2.0,
        cy - size / 2.0,
        k,
        artwork(icon)
    )
}

fn artwork(icon: Icon) -> String {
    match icon {
        Icon::Panda => concat!(
            "<circle cx=\"50\" cy=\"50\" r=\"40\" fill=\"white\" stroke=\"black\" stroke-width=\"4\"/>",
            "<circle cx=\"30\" cy=\"35\" r=\"8\" fill=\"black\"/>",
            "<circle cx=\"70\" cy=\"35\" r=\"8\" fill=\"black\"/>",
            "<ellipse cx=\"50\" cy=\"60\" rx=\"15\" ry=\"10\" fill=\"black\"/>",
            "<circle cx=\"20\" cy=\"20\" r=\"10\" fill=\"black\"/>",
            "<circle cx=\"80\" cy=\"20\" r=\"10\" fill=\"black\"/>"
        )
        .to_string(),
        Icon::Fox => concat!(
            "<path d=\"M20,20 L50,80 L80,20 L50,40 Z\" fill=\"#f97316\"/>",
            "<circle cx=\"40\" cy=\"40\" r=\"5\" fill=\"black\"/>",
            "<circle cx=\"60\" cy=\"40\" r=\"5\" fill=\"black\"/>"
        )
        .to_string(),
        Icon::Frog => concat!(
            "<g fill=\"#22c55e\">",
            "<circle cx=\"50\" cy=\"50\" r=\"35\"/>",
            "<circle cx=\"30\" cy=\"25\" r=\"10\"/>",
            "<circle cx=\"70\" cy=\"25\" r=\"10\"/>",
            "</g>",
            "<circle cx=\"50\" cy=\"60\" r=\"20\" fill=\"white\"/>"
        )
        .to_string(),
        Icon::Star => {
            // Five points, outer radius 42, inner 18.
            let pts: Vec<String> = (0..10)
                .map(|i| {
                    let r = if i % 2 == 0 { 42.0 } else { 18.0 };
                    let a = (-90.0 + 36.0 * i as f64).to_radians();
                    format!("{:.1},{:.1}", 50.0 + r * a.cos(), 52.0 + r * a.sin())
                })
                .collect();
            format!(
                "<polygon points=\"{}\" fill=\"#facc15\" stroke=\"#facc15\" stroke-width=\"6\" stroke-linejoin=\"round\"/>",
                pts.join(" ")
            )
        }
        Icon::PawPrint => outline(concat!(
            "<ellipse cx=\"27\" cy=\"38\" rx=\"8\" ry=\"10\"/>",
            "<ellipse cx=\"42\" cy=\"20\" rx=\"8\" ry=\"10\"/>",
            "<ellipse cx=\"62\" cy=\"20\" rx=\"8\" ry=\"10\"/>",
            "<ellipse cx=\"77\" cy=\"38\" rx=\"8\" ry=\"10\"/>",
            "<path d=\"M52,46 C36,46 26,66 30,78 C33,88 44,86 52,83 C60,86 71,88 74,78 C78,66 68,46 52,46 Z\"/>"
        )),
        Icon::Rabbit => outline(concat!(
            "<path d=\"M40,44 C32,30 30,12 36,8 C42,4 48,22 48,40\"/>",
            "<path d=\"M60,44 C68,30 70,12 64,8 C58,4 52,22 52,40\"/>",
            "<circle cx=\"50\" cy=\"62\" r=\"24\"/>",
            "<circle cx=\"42\" cy=\"58\" r=\"2.5\" fill=\"#4b5563\"/>",
            "<circle cx=\"58\" cy=\"58\" r=\"2.5\" fill=\"#4b5563\"/>",
            "<path d=\"M46,70 Q50,74 54,70\"/>"
        )),
        Icon::Cat => outline(concat!(
            "<path d=\"M22,40 L24,12 L42,28 C47,27 53,27 58,28 L76,12 L78,40 C84,62 70,86 50,86 C30,86 16,62 22,40 Z\"/>",
            "<circle cx=\"40\" cy=\"52\" r=\"3\" fill=\"#4b5563\"/>",
            "<circle cx=\"60\" cy=\"52\" r=\"3\" fill=\"#4b5563\"/>",
            "<path d=\"M46,64 L50,68 L54,64\"/>",
            "<path d=\"M8,60 L32,62 M8,72 L32,68 M92,60 L68,62 M92,72 L68,68\"/>"
        )),
    }
}

/// Line-art icons share one stroke style.
fn outline(body: &str) -> String {
    format!(
        "<g fill=\"none\" stroke=\"{GRAY_600}\" stroke-width=\"6\" stroke-linecap=\"round\" stroke-linejoin=\"round\">{body}</g>"
    )
}
