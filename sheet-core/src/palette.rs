use worksheet_core::{Theme, Tint};

pub const WHITE: &str = "#ffffff";
pub const GRAY_50: &str = "#f9fafb";
pub const GRAY_100: &str = "#f3f4f6";
pub const GRAY_200: &str = "#e5e7eb";
pub const GRAY_300: &str = "#d1d5db";
pub const GRAY_400: &str = "#9ca3af";
pub const GRAY_500: &str = "#6b7280";
pub const GRAY_600: &str = "#4b5563";
pub const GRAY_700: &str = "#374151";
pub const GRAY_800: &str = "#1f2937";
pub const UNIT_ORANGE: &str = "#fb923c";

/// Shades of a design's accent, lightest to darkest use.
pub struct Palette {
    /// Section badges, map stops.
    pub accent: &'static str,
    pub heading: &'static str,
    /// Rule under the header.
    pub rule: &'static str,
    /// Panel backgrounds.
    pub wash: &'static str,
    pub pale: &'static str,
    /// Dashed panel borders.
    pub soft: &'static str,
    /// Card and table lines.
    pub mid: &'static str,
    pub dark: &'static str,
}

pub fn palette(theme: Theme) -> &'static Palette {
    match theme {
        Theme::Blue => &BLUE,
        Theme::Green => &GREEN,
        Theme::Orange => &ORANGE,
    }
}

static BLUE: Palette = Palette {
    accent: "#3b82f6",
    heading: "#3b82f6",
    rule: "#60a5fa",
    wash: "#eff6ff",
    pale: "#dbeafe",
    soft: "#bfdbfe",
    mid: "#93c5fd",
    dark: "#1e40af",
};

static GREEN: Palette = Palette {
    accent: "#16a34a",
    heading: "#16a34a",
    rule: "#22c55e",
    wash: "#f0fdf4",
    pale: "#dcfce7",
    soft: "#bbf7d0",
    mid: "#86efac",
    dark: "#166534",
};

static ORANGE: Palette = Palette {
    accent: "#f97316",
    heading: "#ea580c",
    rule: "#f97316",
    wash: "#fff7ed",
    pale: "#ffedd5",
    soft: "#fed7aa",
    mid: "#fdba74",
    dark: "#9a3412",
};

/// (border, fill) pair of a tint.
pub fn tint(t: Tint) -> (&'static str, &'static str) {
    match t {
        Tint::Red => ("#fecaca", "#fee2e2"),
        Tint::Orange => ("#fed7aa", "#ffedd5"),
        Tint::Yellow => ("#fef08a", "#fef9c3"),
        Tint::Green => ("#bbf7d0", "#dcfce7"),
        Tint::Blue => ("#bfdbfe", "#dbeafe"),
        Tint::Indigo => ("#c7d2fe", "#e0e7ff"),
        Tint::Purple => ("#e9d5ff", "#f3e8ff"),
    }
}
