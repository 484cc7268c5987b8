#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod components;
mod draw;
mod viewer;

use std::str::FromStr;

use abstutil::Timer;
use anyhow::Result;
use geom::Pt2D;
use structopt::StructOpt;
use widgetry::{Color, EventCtx, GfxCtx, Settings, SharedAppState};

use model::render::{GeoMapSurface, PlaneSurface, RenderSurface};
use model::store::{CsvStore, SampleStore, ZipStore};
use model::{LoadError, PathRegistry, Session};

#[derive(StructOpt)]
struct Args {
    /// The path to a CSV file with columns id, timestamp, latitude, longitude
    #[structopt(long)]
    csv: Option<String>,
    /// The path to a .zip file with one devices/<id>.csv file per entity
    #[structopt(long)]
    zip: Option<String>,
    /// Draw paths over a map, or on a plain coordinate plane
    #[structopt(long, default_value = "map")]
    view: View,
    /// Don't open a window. Load the data, write paths and markers to this GeoJSON file, and quit.
    #[structopt(long)]
    export_geojson: Option<String>,
    /// With --export-geojson, the time to export, in seconds since the Unix epoch. Defaults to
    /// the start of the data.
    #[structopt(long)]
    at: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum View {
    Map,
    Plane,
}

impl FromStr for View {
    type Err = anyhow::Error;

    fn from_str(x: &str) -> Result<Self> {
        match x {
            "map" => Ok(View::Map),
            "plane" => Ok(View::Plane),
            _ => bail!("Unknown view {x}; use map or plane"),
        }
    }
}

impl Args {
    fn store(&self) -> Result<Option<Box<dyn SampleStore>>> {
        match (&self.csv, &self.zip) {
            (Some(_), Some(_)) => bail!("You can't specify both --csv and --zip"),
            (Some(path), None) => Ok(Some(Box::new(CsvStore::load_path(path)?))),
            (None, Some(path)) => Ok(Some(Box::new(ZipStore::load_path(path)?))),
            (None, None) => Ok(None),
        }
    }

    fn load(&self, timer: &mut Timer) -> Session {
        match self.store() {
            Ok(Some(mut store)) => Session::load(Some(store.as_mut()), timer),
            // Nothing to load yet; the user can pick a file
            Ok(None) => Session::empty(),
            Err(err) => Session::failed(LoadError::Configuration(format!("{err:#}")), None),
        }
    }

    fn export_geojson(&self, path: String) -> Result<()> {
        let mut timer = Timer::new("export GeoJSON");
        let mut store = match self.store()? {
            Some(store) => store,
            None => bail!("--export-geojson needs --csv or --zip"),
        };
        let mut session = Session::load(Some(store.as_mut()), &mut timer);
        if let Some(ref notice) = session.notice {
            if notice.is_fatal() {
                bail!("{notice}");
            }
        }
        let playback = match session.playback.as_mut() {
            Some(playback) => playback,
            None => bail!("Nothing to export"),
        };
        if let Some(time) = self.at {
            playback.seek(time);
        }

        let surface = GeoMapSurface::new(playback.registry());
        let frame = session.frame();
        let num_paths = frame.paths.len();
        abstio::write_file(path.clone(), surface.to_geojson_string(&frame)?)?;
        info!("Wrote {num_paths} paths to {path}");
        Ok(())
    }
}

/// Whatever the file's extension says it is
pub fn open_store(name: String, bytes: Vec<u8>) -> Result<Box<dyn SampleStore>> {
    if name.to_lowercase().ends_with(".zip") {
        Ok(Box::new(ZipStore::from_bytes(name, bytes)?))
    } else {
        Ok(Box::new(CsvStore::load(name, bytes.as_slice())?))
    }
}

fn run(settings: Settings) {
    abstutil::logger::setup();

    let args = Args::from_iter(abstutil::cli_args());

    if let Some(path) = args.export_geojson.clone() {
        if let Err(err) = args.export_geojson(path) {
            error!("Export failed: {err:#}");
            std::process::exit(1);
        }
        return;
    }

    widgetry::run(settings, move |ctx| {
        let session = ctx.loading_screen("load data", |_, timer| args.load(timer));
        let app = App::new(ctx, session, args.view);
        let states = vec![viewer::Viewer::new_state(ctx, &app)];
        (app, states)
    });
}

pub fn main() {
    let settings = Settings::new("Movement Playback");
    run(settings);
}

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn run_wasm() {
    run(Settings::new("Movement Playback").root_dom_element_id("loading".to_string()));
}

pub struct App {
    session: Session,
    view: View,
    surface: Box<dyn RenderSurface>,
}

impl SharedAppState for App {
    fn draw_default(&self, g: &mut GfxCtx) {
        if cfg!(not(target_arch = "wasm32")) {
            g.clear(Color::BLACK);
        }
    }
}

pub type Transition = widgetry::Transition<App>;

impl App {
    pub fn new(ctx: &mut EventCtx, session: Session, view: View) -> Self {
        let surface = make_surface(ctx, &session, view);
        let mut app = Self {
            session,
            view,
            surface,
        };
        app.center_camera(ctx);
        app
    }

    /// Replaces the current data with whatever's in the store. A store that couldn't even be
    /// opened is treated like any other configuration problem.
    pub fn load_session(
        &mut self,
        ctx: &mut EventCtx,
        store: Result<Box<dyn SampleStore>>,
        timer: &mut Timer,
    ) {
        match store {
            Ok(mut store) => self.session.reload(Some(store.as_mut()), timer),
            Err(err) => {
                self.session =
                    Session::failed(LoadError::Configuration(format!("{err:#}")), None);
            }
        }
        self.surface = make_surface(ctx, &self.session, self.view);
        self.center_camera(ctx);
    }

    /// The plane surface is sized to the window, so it has to follow it.
    pub fn refit_surface(&mut self, ctx: &mut EventCtx) {
        if self.view == View::Plane && self.surface.dims() != window_dims(ctx) {
            self.surface = make_surface(ctx, &self.session, self.view);
            self.center_camera(ctx);
        }
    }

    fn center_camera(&self, ctx: &mut EventCtx) {
        let (width, height) = self.surface.dims();
        ctx.canvas.map_dims = (width, height);
        ctx.canvas.center_on_map_pt(Pt2D::new(width / 2.0, height / 2.0));
    }
}

fn make_surface(ctx: &EventCtx, session: &Session, view: View) -> Box<dyn RenderSurface> {
    match view {
        View::Map => match session.playback {
            Some(ref playback) => Box::new(GeoMapSurface::new(playback.registry())),
            None => Box::new(GeoMapSurface::new(&PathRegistry::default())),
        },
        View::Plane => {
            let (width, height) = window_dims(ctx);
            Box::new(PlaneSurface::new(width, height))
        }
    }
}

fn window_dims(ctx: &EventCtx) -> (f64, f64) {
    (ctx.canvas.window_width, ctx.canvas.window_height)
}
