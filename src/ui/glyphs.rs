#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyphs {
    pub row_marker: &'static str,
    pub row_blank: &'static str,
    pub separator: &'static str,
    pub arrow_up: &'static str,
    pub arrow_down: &'static str,
}

pub fn select(fancy_requested: bool) -> Glyphs {
    if fancy_requested {
        fancy()
    } else {
        ascii()
    }
}

fn ascii() -> Glyphs {
    Glyphs {
        row_marker: "> ",
        row_blank: "  ",
        separator: "|",
        arrow_up: "^",
        arrow_down: "v",
    }
}

fn fancy() -> Glyphs {
    Glyphs {
        row_marker: "▶ ",
        row_blank: "  ",
        separator: "│",
        arrow_up: "↑",
        arrow_down: "↓",
    }
}
