use widgetry::{
    Choice, EventCtx, GfxCtx, HorizontalAlignment, Key, Line, Outcome, Panel, Slider, Text,
    TextExt, VerticalAlignment, Widget,
};

use model::{format_timestamp, Playback};

/// Play/pause, reset, speed, and a slider to scrub through time. Only talks to the playback
/// engine; the caller decides what to redraw.
pub struct TimeControls {
    pub panel: Panel,
    time: f64,
    playing: bool,
}

impl TimeControls {
    pub fn new(ctx: &mut EventCtx, playback: &Playback) -> Self {
        let clock = playback.clock();
        let mut controls = Self {
            panel: Panel::new_builder(Widget::col(vec![
                Widget::placeholder(ctx, "clock"),
                Slider::area(
                    ctx,
                    0.3 * ctx.canvas.window_width,
                    clock.progress_percent() / 100.0,
                    "time slider",
                ),
                Widget::row(vec![
                    Line(format_timestamp(clock.start_time()))
                        .secondary()
                        .into_widget(ctx),
                    Line(format_timestamp(clock.end_time()))
                        .secondary()
                        .into_widget(ctx)
                        .align_right(),
                ]),
                Widget::placeholder(ctx, "controls"),
            ]))
            .aligned(HorizontalAlignment::Center, VerticalAlignment::Bottom)
            .build(ctx),
            time: clock.current_time(),
            playing: clock.is_playing(),
        };
        controls.update_controls(ctx, playback);
        controls.on_time_change(ctx, playback);
        controls
    }

    fn update_controls(&mut self, ctx: &mut EventCtx, playback: &Playback) {
        let play = if self.playing {
            ctx.style()
                .btn_solid
                .text("Pause")
                .hotkey(Key::Space)
                .build_widget(ctx, "pause")
        } else {
            ctx.style()
                .btn_solid
                .text("Play")
                .hotkey(Key::Space)
                .build_widget(ctx, "play")
        };

        let row = Widget::row(vec![
            play,
            ctx.style()
                .btn_outline
                .text("Reset")
                .hotkey(Key::X)
                .build_widget(ctx, "reset"),
            "Speed:".text_widget(ctx).centered_vert(),
            Widget::dropdown(
                ctx,
                "speed",
                playback.clock().speed(),
                // 0.25x to 8x
                (1..=32)
                    .map(|step| {
                        let speed = step as f64 * 0.25;
                        Choice::new(format!("{speed}x"), speed)
                    })
                    .collect(),
            ),
        ]);
        self.panel.replace(ctx, "controls", row);
    }

    fn on_time_change(&mut self, ctx: &mut EventCtx, playback: &Playback) {
        let clock = playback.clock();
        let txt = Text::from(Line(format_timestamp(clock.current_time())).big_monospaced())
            .into_widget(ctx);
        self.panel.replace(ctx, "clock", txt);

        self.panel
            .slider_mut("time slider")
            .set_percent(ctx, clock.progress_percent() / 100.0);
    }

    /// Returns true if the current time or anybody's position changed.
    pub fn event(&mut self, ctx: &mut EventCtx, playback: &mut Playback) -> bool {
        let mut changed = false;

        match self.panel.event(ctx) {
            Outcome::Clicked(x) => match x.as_ref() {
                "play" | "pause" => {
                    playback.toggle_play();
                    changed = true;
                }
                "reset" => {
                    playback.reset();
                    changed = true;
                }
                _ => unreachable!(),
            },
            Outcome::Changed(x) => match x.as_ref() {
                "speed" => {
                    playback.set_speed(self.panel.dropdown_value("speed"));
                }
                "time slider" => {
                    let pct = self.panel.slider("time slider").get_percent();
                    let clock = playback.clock();
                    let time = clock.start_time() + pct * (clock.end_time() - clock.start_time());
                    playback.seek(time);
                    changed = true;
                }
                _ => unreachable!(),
            },
            _ => {}
        }

        if playback.wants_frames() {
            if let Some(real_dt) = ctx.input.nonblocking_is_update_event() {
                ctx.input.use_update_event();
                playback.tick(real_dt.inner_seconds());
                changed = true;
            }
        }

        // Reaching the end pauses, so this can change without a click
        if playback.clock().is_playing() != self.playing {
            self.playing = playback.clock().is_playing();
            self.update_controls(ctx, playback);
        }
        if playback.clock().current_time() != self.time {
            self.time = playback.clock().current_time();
            self.on_time_change(ctx, playback);
        }

        changed
    }

    pub fn draw(&self, g: &mut GfxCtx) {
        self.panel.draw(g);
    }
}
