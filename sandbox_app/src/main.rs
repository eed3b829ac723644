//! Tile engine sandbox
//!
//! Builds a small cave level (solid walls, an ersatz water layer, a
//! far-background torch layer and a wandering player), then runs a fixed
//! number of frames against a recording surface and logs what happened.
//!
//! Usage: `sandbox [config.ron|config.toml] [frames]`

use std::rc::Rc;

use tile_engine::component::{
    BoundingRecter, Capabilities, Component, Drawer, Id, Identifier, Updater, ZPositioner,
};
use tile_engine::foundation::logging;
use tile_engine::prelude::*;

const DEFAULT_FRAMES: u32 = 240;

const LEVEL: [&str; 12] = [
    "########################################",
    "#......................................#",
    "#......................................#",
    "#..........####........................#",
    "#......................######..........#",
    "#......................................#",
    "#....######........................#####",
    "#......................................#",
    "#.................######...............#",
    "#......................................#",
    "#~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~#",
    "########################################",
];

const TORCHES: [(i32, i32); 4] = [(4, 2), (15, 2), (26, 2), (37, 2)];

/// Walks back and forth under gravity and drags the camera along
struct Player {
    id: Id,
    actor: Actor,
    run_speed: f64,
    fall_speed: f64,
    camera: ComponentId,
    sheet: Rc<dyn Sheet>,
    z: ZOrder,
    turns: u32,
}

impl Updater for Player {
    fn update(&mut self, game: &mut Game) -> Result<(), EngineError> {
        let mut turned = false;
        self.actor.move_x(&*game, self.run_speed, || turned = true);
        if turned {
            self.run_speed = -self.run_speed;
            self.turns += 1;
            log::debug!("{} turned at {}", self.id.0, self.actor.position);
        }

        let mut landed = false;
        self.fall_speed = (self.fall_speed + 0.25).min(4.0);
        self.actor.move_y(&*game, self.fall_speed, || landed = true);
        if landed {
            self.fall_speed = 0.0;
        }

        let centre = self.actor.position + self.actor.size / 2;
        let camera = game
            .downcast_mut::<Camera>(self.camera)
            .ok_or(EngineError::MissingComponent(self.camera))?;
        camera.centre = centre;
        Ok(())
    }
}

impl Drawer for Player {
    fn draw(&self, _game: &Game, surface: &mut dyn Surface, opts: &DrawOptions) {
        let (x, y) = self.actor.position.to_f64();
        surface.draw_image(&self.sheet.sub_image(2), &opts.prepend(&Transform::translation(x, y)));
    }
}

impl Component for Player {
    fn name(&self) -> &'static str {
        "Player"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::IDENTIFY | Capabilities::DRAW | Capabilities::Z_POSITION | Capabilities::UPDATE
    }

    fn as_identifier(&self) -> Option<&dyn Identifier> {
        Some(&self.id)
    }

    fn as_drawer(&self) -> Option<&dyn Drawer> {
        Some(self)
    }

    fn as_z_positioner(&self) -> Option<&dyn ZPositioner> {
        Some(&self.z)
    }

    fn as_updater(&mut self) -> Option<&mut dyn Updater> {
        Some(self)
    }
}

/// Sandbox application: owns the game and a recording surface
pub struct SandboxApp {
    game: Game,
    surface: RecordingSurface,
    player: ComponentId,
}

impl SandboxApp {
    /// Build the level
    pub fn new(config: GameConfig) -> Result<Self, Box<dyn std::error::Error>> {
        log::info!("Creating sandbox level...");
        let sheet: Rc<dyn Sheet> = Rc::new(GridSheet::from_ron_str(include_str!("../assets/cave_sheet.ron"))?);
        let mut game = Game::new(config);

        let mut walls = Tilemap::new("walls", Rc::clone(&sheet)).with_z(1.0);
        let mut water = Tilemap::new("water", Rc::clone(&sheet)).ersatz(true).with_z(2.0);
        for (y, row) in (0..).zip(LEVEL) {
            for (x, c) in (0..).zip(row.chars()) {
                match c {
                    '#' => {
                        walls.set_tile(Point2::new(x, y), Some(Tile::Static(1)));
                    }
                    '~' => {
                        water.set_tile(Point2::new(x, y), Some(Tile::animated("water")));
                    }
                    _ => {}
                }
            }
        }
        let bounds = walls.bounding_rect();
        log::info!("Level bounds {bounds}");

        let mut torches = Tilemap::new("torches", Rc::clone(&sheet))
            .ersatz(true)
            .with_parallax(0.5)
            .with_z(0.5);
        for (x, y) in TORCHES {
            torches.set_tile(Point2::new(x, y), Some(Tile::animated("torch")));
        }

        let camera = game.insert(Camera::new("camera").with_filter(game.config().filter));
        let backdrop = game.insert(Fill::new(Color::rgba(16, 12, 24, 255)).with_id("backdrop"));
        let walls = game.insert(walls);
        let water = game.insert(water);
        let torches = game.insert(torches);
        let player = game.insert(Player {
            id: Id::new("player"),
            actor: Actor::new(Point2::new(32, 32), Point2::new(12, 14)),
            run_speed: 1.5,
            fall_speed: 0.0,
            camera,
            sheet,
            z: ZOrder(3.0),
            turns: 0,
        });

        let root = game.insert(
            Scene::new("cave")
                .with_child(player)
                .with_child(water)
                .with_child(walls)
                .with_child(torches)
                .with_child(backdrop)
                .with_camera(camera)
                .with_bounds(bounds),
        );
        game.set_root(root);

        Ok(Self {
            game,
            surface: RecordingSurface::new(),
            player,
        })
    }

    /// Run the Load and Prepare passes
    pub fn initialize(&mut self) -> Result<(), EngineError> {
        self.game.load()?;
        self.game.prepare()?;
        log::info!("Sandbox ready: {} components", self.game.components().len());
        Ok(())
    }

    /// Run `frames` fixed steps
    pub fn run(&mut self, frames: u32) -> Result<(), EngineError> {
        for frame in 0..frames {
            self.game.update()?;
            self.surface.clear();
            self.game.draw(&mut self.surface);

            if frame % 60 == 0 {
                if let Some(player) = self.game.downcast_ref::<Player>(self.player) {
                    log::info!(
                        "frame {frame}: player at {} ({} draw calls)",
                        player.actor.position,
                        self.surface.calls().len()
                    );
                }
            }
        }
        if let Some(player) = self.game.downcast_ref::<Player>(self.player) {
            log::info!("Finished {frames} frames; player turned {} times", player.turns);
        }
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => GameConfig::load_from_file(&path)?,
        None => GameConfig::from_ron_str(include_str!("../assets/sandbox.ron"))?,
    };
    config.validate()?;
    let frames = match args.next() {
        Some(n) => n.parse()?,
        None => DEFAULT_FRAMES,
    };

    logging::init_with_filter(&config.log_filter);
    log::info!("Starting {}", config.title);

    let mut app = SandboxApp::new(config)?;
    app.initialize()?;
    app.run(frames)?;
    Ok(())
}
