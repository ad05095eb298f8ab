use anyhow::Context as _;
use crossbeam_channel::Receiver;
use mapmosaic::{
    constants::{PIXEL_RADIUS, READOUT_DECIMALS},
    prelude::*,
};

const WINDOW_SIZE: [f32; 2] = [1200.0, 800.0];
const HEADLESS_FRAME: Duration = Duration::from_millis(16);

/// Command line options
#[derive(Debug, Default)]
struct Options {
    config: Option<String>,
    headless: bool,
    clicks: usize,
}

impl Options {
    fn parse() -> anyhow::Result<Self> {
        let mut options = Options {
            clicks: 12,
            ..Default::default()
        };
        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--headless" => options.headless = true,
                "--config" => {
                    options.config = Some(args.next().context("--config needs a path")?);
                }
                "--clicks" => {
                    let value = args.next().context("--clicks needs a number")?;
                    options.clicks = value
                        .parse()
                        .with_context(|| format!("invalid click count '{}'", value))?;
                }
                other => anyhow::bail!("unknown argument '{}'", other),
            }
        }
        Ok(options)
    }

    fn load_config(&self) -> anyhow::Result<MosaicConfig> {
        match &self.config {
            Some(path) => MosaicConfig::from_json_file(path)
                .with_context(|| format!("failed to load config from {}", path)),
            None => Ok(MosaicConfig::default()),
        }
    }
}

fn main() -> anyhow::Result<()> {
    mapmosaic::init_logging();

    let options = Options::parse()?;
    let config = options.load_config()?;

    if options.headless {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()?;
        return runtime.block_on(run_headless(config, options.clicks));
    }

    run_window(config)
}

/// Seeds with real timers, simulates clicks across the screen, then lets
/// every animation finish
async fn run_headless(config: MosaicConfig, clicks: usize) -> anyhow::Result<()> {
    let size = Point::new(WINDOW_SIZE[0] as f64, WINDOW_SIZE[1] as f64);
    let mut session = MosaicSession::headless(config.clone(), size)?;
    let events = session.subscribe();

    if session.take_seed_schedule().is_some() {
        let report = SeedLoader::from_config(&config.seed)
            .load_examples(session.controller_mut(), &config.seed.examples, &TokioDelay)
            .await;
        for (index, error) in &report.failed {
            log::warn!("example #{} failed: {}", index, error);
        }
    }

    let palette_len = session.palette().colors().len().max(1);
    for i in 0..clicks {
        session.controller_mut().select_color_index(i % palette_len);

        let step = (i + 1) as f64 / (clicks + 1) as f64;
        let point = Point::new(size.x * step, size.y * (0.25 + 0.5 * step));
        let viewport = session.controller().layer().viewport().clone();
        let click = MapEvent::click_at(point, |p| viewport.pixel_to_lat_lng(p));
        session.handle_event(click);
    }

    let mut frames = 0usize;
    while session.tick(HEADLESS_FRAME) > 0 {
        frames += 1;
    }
    log::info!("animations settled after {} frames", frames);

    for event in events.try_iter() {
        if let UiEvent::PixelPlaced { pixel, total } = event {
            log::debug!(
                "#{} {} {} at {}",
                total,
                pixel.id(),
                pixel.color(),
                pixel.coordinate().readout(READOUT_DECIMALS)
            );
        }
    }

    let failed = session.input().failed_placements();
    let total = session.shutdown();
    log::info!("headless run finished: {} pixels, {} failed clicks", total, failed);
    Ok(())
}

fn run_window(config: MosaicConfig) -> anyhow::Result<()> {
    let size = Point::new(WINDOW_SIZE[0] as f64, WINDOW_SIZE[1] as f64);
    let session = MosaicSession::headless(config, size)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(WINDOW_SIZE)
            .with_title("MapMosaic"),
        ..Default::default()
    };

    eframe::run_native(
        "mapmosaic-app",
        options,
        Box::new(move |cc| Box::new(MosaicApp::new(cc, session))),
    )
    .map_err(|e| anyhow::anyhow!("window closed with error: {}", e))
}

/// Desktop front end: palette sidebar plus a painted world map
struct MosaicApp {
    session: MosaicSession,
    events: Receiver<UiEvent>,
    custom_color: String,
    readout: String,
    total: usize,
    hovering: bool,
}

impl MosaicApp {
    fn new(cc: &eframe::CreationContext<'_>, session: MosaicSession) -> Self {
        let ctx = cc.egui_ctx.clone();
        let mut session = session.with_scheduler(move || ctx.request_repaint());
        let events = session.subscribe();
        let custom_color = session.palette().current().to_string();

        Self {
            session,
            events,
            custom_color,
            readout: String::new(),
            total: 0,
            hovering: false,
        }
    }

    fn drain_events(&mut self) {
        for event in self.events.try_iter() {
            match event {
                UiEvent::PixelPlaced { total, .. } => self.total = total,
                UiEvent::ActiveColorChanged { color } => self.custom_color = color.to_string(),
                UiEvent::PointerMoved { readout, .. } => self.readout = readout,
            }
        }
    }

    fn palette_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Palette");
        ui.separator();

        let colors = self.session.palette().colors().to_vec();
        ui.horizontal_wrapped(|ui| {
            for (index, color) in colors.iter().enumerate() {
                let (rect, response) =
                    ui.allocate_exact_size(egui::vec2(26.0, 26.0), egui::Sense::click());
                ui.painter().rect_filled(rect, 4.0, to_color32(color, 1.0));
                if self.session.palette().is_active(color) {
                    ui.painter()
                        .rect_stroke(rect, 4.0, egui::Stroke::new(2.0, egui::Color32::WHITE));
                }
                if response.on_hover_text(color.as_str()).clicked() {
                    self.session.controller_mut().select_color_index(index);
                }
            }
        });

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            let edit = ui.text_edit_singleline(&mut self.custom_color);
            let submitted = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            let use_clicked = ui.button("Use").clicked();
            if submitted || use_clicked {
                let wanted = self.custom_color.clone();
                if !self.session.select_color(&wanted) {
                    self.custom_color = self.session.palette().current().to_string();
                }
            }
        });

        ui.separator();
        ui.label(format!("Pixels placed: {}", self.total));
        if self.session.is_seeding() {
            ui.label("Loading examples...");
        }
        if !self.readout.is_empty() {
            ui.label(format!("Cursor: {}", self.readout));
        }
    }

    fn map_panel(&mut self, ui: &mut egui::Ui) {
        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
        let to_local =
            |pos: egui::Pos2| Point::new((pos.x - rect.min.x) as f64, (pos.y - rect.min.y) as f64);

        {
            let viewport = self.session.controller_mut().layer_mut().viewport_mut();
            viewport.set_size(Point::new(rect.width() as f64, rect.height() as f64));

            if response.hovered() {
                let scroll = ui.input(|i| i.raw_scroll_delta.y);
                if scroll.abs() > 0.1 {
                    let focus = response.hover_pos().map(to_local).unwrap_or_else(|| {
                        Point::new(rect.width() as f64 / 2.0, rect.height() as f64 / 2.0)
                    });
                    let zoom = viewport.zoom + scroll as f64 * 0.002;
                    viewport.zoom_around(zoom, focus);
                }
            }

            if response.dragged() {
                let delta = response.drag_delta();
                viewport.pan(Point::new(delta.x as f64, delta.y as f64));
            }
        }

        let viewport = self.session.controller().layer().viewport().clone();
        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let click = MapEvent::click_at(to_local(pos), |p| viewport.pixel_to_lat_lng(p));
                self.session.handle_event(click);
            }
        }

        match response.hover_pos() {
            Some(pos) => {
                let lat_lng = viewport.pixel_to_lat_lng(&to_local(pos));
                self.session.handle_event(MapEvent::PointerMove { lat_lng });
                self.hovering = true;
            }
            None if self.hovering => {
                self.session.handle_event(MapEvent::PointerLeave);
                self.readout.clear();
                self.hovering = false;
            }
            None => {}
        }

        self.paint_map(ui, rect, &viewport);
    }

    fn paint_map(&self, ui: &egui::Ui, rect: egui::Rect, viewport: &Viewport) {
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(18, 20, 28));

        let to_screen = |lat_lng: LatLng| {
            let p = viewport.lat_lng_to_pixel(&lat_lng);
            rect.min + egui::vec2(p.x as f32, p.y as f32)
        };

        let grid = egui::Stroke::new(1.0, egui::Color32::from_gray(45));
        for lng in (-180..=180).step_by(30) {
            let lng = lng as f64;
            painter.line_segment(
                [to_screen(LatLng::new(85.0, lng)), to_screen(LatLng::new(-85.0, lng))],
                grid,
            );
        }
        for lat in (-60..=60).step_by(30) {
            let lat = lat as f64;
            painter.line_segment(
                [to_screen(LatLng::new(lat, -180.0)), to_screen(LatLng::new(lat, 180.0))],
                grid,
            );
        }

        let layer = self.session.controller().layer();
        for pixel in layer.rendered() {
            let pos = to_screen(pixel.coordinate());
            if rect.expand(PIXEL_RADIUS as f32).contains(pos) {
                painter.circle_filled(pos, PIXEL_RADIUS as f32, to_color32(pixel.color(), 1.0));
            }
        }

        for shape in layer.overlays() {
            let pos = to_screen(shape.coordinate);
            let radius = (shape.radius * shape.scale) as f32;
            let color = to_color32(&shape.color, shape.opacity);
            match shape.style {
                AnimationStyle::Pulse => {
                    painter.circle_filled(pos, radius, color);
                }
                AnimationStyle::Ripple => {
                    painter.circle_stroke(pos, radius, egui::Stroke::new(2.0, color));
                }
            }
        }

        let config = self.session.config();
        painter.text(
            rect.left_bottom() + egui::vec2(6.0, -6.0),
            egui::Align2::LEFT_BOTTOM,
            &config.map.attribution,
            egui::FontId::proportional(10.0),
            egui::Color32::from_gray(140),
        );
    }
}

fn to_color32(color: &Color, opacity: f32) -> egui::Color32 {
    let [r, g, b, a] = color.rgba_or([255, 107, 107, 255]);
    let alpha = (a as f32 * opacity.clamp(0.0, 1.0)).round() as u8;
    egui::Color32::from_rgba_unmultiplied(r, g, b, alpha)
}

impl eframe::App for MosaicApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let dt = Duration::from_secs_f32(ctx.input(|i| i.stable_dt).clamp(0.0, 0.1));
        self.session.tick(dt);
        if self.session.is_seeding() {
            ctx.request_repaint_after(Duration::from_millis(50));
        }

        egui::SidePanel::left("palette_panel")
            .resizable(false)
            .default_width(200.0)
            .show(ctx, |ui| self.palette_panel(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| self.map_panel(ui));

        self.drain_events();
    }
}
