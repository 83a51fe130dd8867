use crate::score::ScoreRecord;

/// Shown while the responsible party is not part of the source data.
pub const LEADER_PLACEHOLDER: &str = "-";

/// Build the Graphviz HTML-like label for one unit:
///
/// ```text
/// ┌──────────────────────┐
/// │     display name     │
/// ├──────────┬─────┬─────┤
/// │  leader  │ pop │ ES  │
/// └──────────┴─────┴─────┘
/// ```
///
/// The score cell carries the grading-band background color.
pub fn node_label(record: &ScoreRecord) -> String {
    format!(
        "<<TABLE>\
         <TR><TD COLSPAN=\"4\">{name}</TD></TR>\
         <TR><TD COLSPAN=\"2\">{leader}</TD>\
         <TD COLSPAN=\"1\">{count}名</TD>\
         <TD COLSPAN=\"1\" BGCOLOR=\"{color}\">{score}</TD></TR>\
         </TABLE>>",
        name = escape_html(&record.display_name),
        leader = LEADER_PLACEHOLDER,
        count = record.respondent_count,
        color = record.color.to_hex(),
        score = record.score,
    )
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
