//! MediaWiki rendering of the tool status table.

use crate::scrape::ToolStatus;
use crate::table::{Flag, ToolEntry};

const POSITIVE_COLOR: &str = r#"bgcolor="lightgreen""#;
const NEGATIVE_COLOR: &str = r#"bgcolor="red""#;

const HEADER: &str = "== Tools ==

{| class=\"wikitable\" align=\"center\"
|-
! Tool !! Uses tool classes || Has regression tests || Not using libraries || Tool status || Has squadt
";

const FOOTER: &str = "|}\n";

/// A coloured legend cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// `bgcolor=...` attribute, or empty.
    pub color: &'static str,
    /// Text shown in the cell.
    pub value: String,
}

/// `+` and `-` become a coloured blank cell; anything else is shown as is.
pub fn render_cell(flag: &Flag) -> Cell {
    match flag {
        Flag::Plus => Cell {
            color: POSITIVE_COLOR,
            value: String::new(),
        },
        Flag::Minus => Cell {
            color: NEGATIVE_COLOR,
            value: String::new(),
        },
        Flag::Other(text) => Cell {
            color: "",
            value: text.clone(),
        },
    }
}

/// One `|-` row. Only the first and third legend columns are coloured.
pub fn render_row(entry: &ToolEntry, status: &ToolStatus) -> String {
    let classes = render_cell(&entry.uses_tool_classes);
    let libraries = render_cell(&entry.not_using_libraries);
    let squadt = if status.has_squadt { "yes" } else { "no" };

    format!(
        "|-\n| [[User manual/{name}|{name}]] ||align=\"center\" {c1}| {v1} ||align=\"center\"| {v2} ||align=\"center\" {c3}| {v3} || {status} ||align=\"center\"| {squadt}\n",
        name = entry.name,
        c1 = classes.color,
        v1 = classes.value,
        v2 = entry.has_regression_tests.as_str(),
        c3 = libraries.color,
        v3 = libraries.value,
        status = status.status,
        squadt = squadt,
    )
}

/// The full document: header, rows in the given order, footer.
pub fn render_table<'a, I>(rows: I) -> String
where
    I: IntoIterator<Item = (&'a ToolEntry, &'a ToolStatus)>,
{
    let mut out = String::from(HEADER);
    for (entry, status) in rows {
        out.push_str(&render_row(entry, status));
    }
    out.push_str(FOOTER);
    out
}
