use anyhow::Result;
use widgetry::tools::PopupMsg;
use widgetry::{
    Color, Drawable, EventCtx, GfxCtx, HorizontalAlignment, Line, Outcome, Panel, State, Text,
    UpdateType, VerticalAlignment, Widget,
};

use model::DataLog;

use crate::components::{data_log, selection, FileLoader, PickedFile, TimeControls};
use crate::{App, Transition};

pub struct Viewer {
    panel: Panel,
    time_controls: Option<TimeControls>,
    log_panel: Panel,
    data_log: DataLog,
    draw_paths: Drawable,
}

impl Viewer {
    pub fn new_state(ctx: &mut EventCtx, app: &App) -> Box<dyn State<App>> {
        let session = &app.session;

        let mut col = vec![
            Line("Movement Playback").small_heading().into_widget(ctx),
            ctx.style().btn_outline.text("Open data").build_def(ctx),
        ];
        col.push(Line(session.summary()).secondary().into_widget(ctx));
        if let Some(ref notice) = session.notice {
            let color = if notice.is_fatal() {
                Color::RED
            } else {
                Color::YELLOW
            };
            col.push(
                Text::from(Line(notice.to_string()).fg(color))
                    .wrap_to_pct(ctx, 20)
                    .into_widget(ctx),
            );
        }
        col.push(Widget::placeholder(ctx, "selection"));

        let panel = Panel::new_builder(Widget::col(col))
            .aligned(HorizontalAlignment::Left, VerticalAlignment::Top)
            .build(ctx);
        let log_panel = Panel::new_builder(Widget::col(vec![
            Line("Data log").small_heading().into_widget(ctx),
            Widget::placeholder(ctx, "rows"),
        ]))
        .aligned(HorizontalAlignment::Right, VerticalAlignment::Top)
        .build(ctx);

        let mut state = Self {
            panel,
            time_controls: session
                .playback
                .as_ref()
                .map(|playback| TimeControls::new(ctx, playback)),
            log_panel,
            data_log: session.data_log(),
            draw_paths: Drawable::empty(ctx),
        };
        state.on_selection_change(ctx, app);
        Box::new(state)
    }

    fn on_selection_change(&mut self, ctx: &mut EventCtx, app: &App) {
        let controls = selection::to_controls(ctx, &app.session.selection);
        self.panel.replace(ctx, "selection", controls);
        self.data_log = app.session.data_log();
        self.on_positions_change(ctx, app);
    }

    fn on_positions_change(&mut self, ctx: &mut EventCtx, app: &App) {
        let scene = app.surface.render(&app.session.frame());
        self.draw_paths = ctx.upload(crate::draw::scene(&scene));

        let time = app
            .session
            .playback
            .as_ref()
            .map(|p| p.clock().current_time())
            .unwrap_or(f64::NAN);
        let rows = data_log::render(ctx, &self.data_log, time);
        self.log_panel.replace(ctx, "rows", rows);
    }
}

impl State<App> for Viewer {
    fn event(&mut self, ctx: &mut EventCtx, app: &mut App) -> Transition {
        ctx.canvas_movement();

        if let (Some(time_controls), Some(playback)) =
            (self.time_controls.as_mut(), app.session.playback.as_mut())
        {
            if time_controls.event(ctx, playback) {
                self.on_positions_change(ctx, app);
            }
        }

        match self.panel.event(ctx) {
            Outcome::Clicked(x) => match x.as_ref() {
                "Open data" => {
                    return open_data(ctx);
                }
                "Select all" => {
                    app.session.selection.select_all();
                    self.on_selection_change(ctx, app);
                }
                "Deselect all" => {
                    app.session.selection.deselect_all();
                    self.on_selection_change(ctx, app);
                }
                _ => unreachable!(),
            },
            Outcome::Changed(_) => {
                // One of the checkboxes
                let ids = selection::from_controls(&self.panel, &app.session.selection);
                app.session.selection.replace(ids);
                self.on_selection_change(ctx, app);
            }
            _ => {}
        }

        if app
            .session
            .playback
            .as_ref()
            .map(|p| p.wants_frames())
            .unwrap_or(false)
        {
            ctx.request_update(UpdateType::Game);
        }

        Transition::Keep
    }

    fn draw(&self, g: &mut GfxCtx, _: &App) {
        g.redraw(&self.draw_paths);
        self.panel.draw(g);
        self.log_panel.draw(g);
        if let Some(ref time_controls) = self.time_controls {
            time_controls.draw(g);
        }
    }

    fn recreate(&mut self, ctx: &mut EventCtx, app: &mut App) -> Box<dyn State<App>> {
        // Also called when the window is resized
        app.refit_surface(ctx);
        Self::new_state(ctx, app)
    }

    fn on_destroy(&mut self, _: &mut EventCtx, app: &mut App) {
        if let Some(playback) = app.session.playback.as_mut() {
            playback.stop();
        }
    }
}

fn open_data(ctx: &mut EventCtx) -> Transition {
    Transition::Push(FileLoader::new_state(
        ctx,
        Box::new(|ctx, app, picked: Result<Option<PickedFile>>| {
            match picked {
                Ok(Some((name, bytes))) => ctx.loading_screen("load data", |ctx, timer| {
                    let store = crate::open_store(name, bytes);
                    app.load_session(ctx, store, timer);
                    let mut transitions = vec![Transition::Pop, Transition::Recreate];
                    if let Some(ref notice) = app.session.notice {
                        if notice.is_fatal() {
                            transitions.push(Transition::Push(PopupMsg::new_state(
                                ctx,
                                "Error",
                                vec![notice.to_string()],
                            )));
                        }
                    }
                    Transition::Multi(transitions)
                }),
                // User didn't pick a file
                Ok(None) => Transition::Pop,
                Err(err) => {
                    Transition::Replace(PopupMsg::new_state(ctx, "Error", vec![err.to_string()]))
                }
            }
        }),
    ))
}
