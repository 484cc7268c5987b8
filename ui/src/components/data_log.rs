use widgetry::{Color, EventCtx, Line, Text, Widget};

use model::{format_timestamp, DataLog};

const ROWS_SHOWN: usize = 12;

/// The samples recorded around some time. The most recent one at or before the time is
/// highlighted.
pub fn render(ctx: &mut EventCtx, log: &DataLog, time: f64) -> Widget {
    if log.is_empty() {
        return Line("No samples selected").secondary().into_widget(ctx);
    }

    let current = log.current_index(time).map(|idx| &log.rows()[idx]);
    let mut txt = Text::new();
    for row in log.window(time, ROWS_SHOWN) {
        let details = Line(format!(
            "  {}  {:.5}, {:.5}",
            format_timestamp(row.timestamp),
            row.lat,
            row.lng
        ));
        let details = if current.map_or(false, |c| std::ptr::eq(c, row)) {
            details.fg(Color::YELLOW)
        } else {
            details.secondary()
        };
        txt.add_appended(vec![
            Line(row.id.to_string()).fg(Color::hex(row.color)),
            details,
        ]);
    }
    txt.into_widget(ctx)
}
