use std::collections::BTreeSet;

use widgetry::{EventCtx, Line, Panel, Toggle, Widget};

use model::store::EntityName;
use model::Selection;

pub fn to_controls(ctx: &mut EventCtx, selection: &Selection) -> Widget {
    let mut col = Vec::new();
    col.push(
        Line(format!(
            "{} of {} entities shown",
            selection.selected().len(),
            selection.all_ids().len()
        ))
        .secondary()
        .into_widget(ctx),
    );
    col.push(Widget::row(vec![
        ctx.style().btn_outline.text("Select all").build_def(ctx),
        ctx.style().btn_outline.text("Deselect all").build_def(ctx),
    ]));
    for id in selection.all_ids() {
        col.push(Toggle::checkbox(
            ctx,
            id.as_str(),
            None,
            selection.is_selected(id),
        ));
    }
    Widget::col(col).section(ctx)
}

/// The ids whose checkboxes are ticked
pub fn from_controls(p: &Panel, selection: &Selection) -> BTreeSet<EntityName> {
    selection
        .all_ids()
        .iter()
        .filter(|id| p.is_checked(id.as_str()))
        .cloned()
        .collect()
}
