use std::io::IsTerminal;

use termimad::crossterm::style::{Attribute, Color};
use termimad::{Alignment, MadSkin};

fn is_tty() -> bool {
    std::io::stdout().is_terminal()
}

/// Run header: a `#` title over a bullet list.
fn header_skin() -> MadSkin {
    let mut skin = MadSkin::default();
    let title = &mut skin.headers[0];
    title.align = Alignment::Left;
    title.add_attr(Attribute::Bold);
    title.add_attr(Attribute::NoUnderline);
    title.set_fg(Color::White);
    title.set_bg(Color::Blue);
    skin.inline_code.set_fg(Color::Cyan);
    skin
}

/// Result tables: labels in blue, grid dimmed.
fn table_skin() -> MadSkin {
    let mut skin = MadSkin::default();
    skin.table.align = Alignment::Left;
    skin.table.set_fg(Color::DarkGrey);
    skin.bold.set_fg(Color::Blue);
    skin
}

fn print_with(skin: MadSkin, text: &str) {
    if is_tty() {
        skin.print_text(text);
    } else {
        println!("{}", text);
    }
}

pub fn print_md(s: impl AsRef<str>) {
    print_with(header_skin(), s.as_ref());
}

/// Print a markdown table, rendered only when stdout is a terminal.
pub fn print_table(s: impl AsRef<str>) {
    print_with(table_skin(), s.as_ref());
}

#[macro_export]
macro_rules! print_md {
    ($($arg:tt)*) => {
        $crate::utils::md::print_md(format!($($arg)*));
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_skin_renders_every_cell() {
        let text = "|benchmark|ns/op|\n|:-|-:|\n|math_sqrt|1.25|\n";
        let rendered = table_skin().term_text(text).to_string();
        assert!(rendered.contains("math_sqrt"));
        assert!(rendered.contains("1.25"));
    }
}
