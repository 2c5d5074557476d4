use std::cell::RefCell;
use std::rc::Rc;

use macroquad::prelude::*;

use tilequest::config::Config;
use tilequest::tiled::load_map;
use tilequest::{DialogSink, Direction, Notifier, World};

#[derive(Clone, Copy, PartialEq)]
enum NoticeLevel {
    Info,
    Success,
    Warning,
}

/// On-screen message fed through the simulation's notifier interface
struct Snackbar {
    message: Option<(NoticeLevel, String)>,
}

#[derive(Clone)]
struct SnackbarHandle(Rc<RefCell<Snackbar>>);

impl SnackbarHandle {
    fn new() -> Self {
        SnackbarHandle(Rc::new(RefCell::new(Snackbar { message: None })))
    }

    fn set(&self, level: NoticeLevel, message: &str) {
        self.0.borrow_mut().message = Some((level, message.to_string()));
    }
}

impl Notifier for SnackbarHandle {
    fn info(&mut self, message: &str) {
        self.set(NoticeLevel::Info, message);
    }

    fn success(&mut self, message: &str) {
        self.set(NoticeLevel::Success, message);
    }

    fn warning(&mut self, message: &str) {
        self.set(NoticeLevel::Warning, message);
    }

    fn close(&mut self) {
        self.0.borrow_mut().message = None;
    }
}

/// Host-side dialog state; the simulation only asks to open and close it
struct DialogBox {
    subject: Option<String>,
}

#[derive(Clone)]
struct DialogHandle(Rc<RefCell<DialogBox>>);

impl DialogHandle {
    fn new() -> Self {
        DialogHandle(Rc::new(RefCell::new(DialogBox { subject: None })))
    }

    fn dismiss(&self) {
        self.0.borrow_mut().subject = None;
    }
}

impl DialogSink for DialogHandle {
    fn open(&mut self, subject: &str) {
        self.0.borrow_mut().subject = Some(subject.to_string());
    }

    fn request_close(&mut self) {
        self.0.borrow_mut().subject = None;
    }

    fn is_open(&self) -> bool {
        self.0.borrow().subject.is_some()
    }
}

fn held_direction() -> Option<Direction> {
    if is_key_down(KeyCode::Left) {
        Some(Direction::Left)
    } else if is_key_down(KeyCode::Right) {
        Some(Direction::Right)
    } else if is_key_down(KeyCode::Up) {
        Some(Direction::Up)
    } else if is_key_down(KeyCode::Down) {
        Some(Direction::Down)
    } else {
        None
    }
}

/// Camera scroll in pixels, following the player and clamped to map bounds
fn follow_camera(world: &World, free_x: f32, free_y: f32) -> (f32, f32) {
    let (target_x, target_y) = if world.free_camera() {
        (free_x, free_y)
    } else {
        let player = world.player_actor();
        (player.x - screen_width() / 2.0, player.y - screen_height() / 2.0)
    };
    (
        target_x.clamp(0.0, (world.grid.width_in_pixels() - screen_width()).max(0.0)),
        target_y.clamp(0.0, (world.grid.height_in_pixels() - screen_height()).max(0.0)),
    )
}

fn draw_world(world: &World, camera_x: f32, camera_y: f32, background: Color) {
    clear_background(background);

    let tw = world.grid.tile_width as f32;
    let th = world.grid.tile_height as f32;

    for y in 0..world.grid.rows {
        for x in 0..world.grid.cols {
            let Some(tile) = world.grid.tile(x, y) else {
                continue;
            };
            let color = if tile.collides {
                Color::from_rgba(96, 72, 48, 255)
            } else {
                Color::from_rgba(70, 105, 70, 255)
            };
            draw_rectangle(
                x as f32 * tw - camera_x,
                y as f32 * th - camera_y,
                tw - 1.0,
                th - 1.0,
                color,
            );
        }
    }

    // Tile marker under the mouse, hidden over impassable tiles
    let (mouse_x, mouse_y) = mouse_position();
    let marker = world
        .grid
        .world_to_tile(mouse_x + camera_x, mouse_y + camera_y);
    if world.grid.is_passable(marker.x, marker.y) {
        draw_rectangle(
            marker.x as f32 * tw - camera_x,
            marker.y as f32 * th - camera_y,
            tw,
            th,
            Color::from_rgba(255, 255, 255, 120),
        );
    }

    for (i, actor) in world.actors.iter().enumerate() {
        let color = if i == world.player { BLUE } else { GOLD };
        draw_rectangle(
            actor.x - tw / 2.0 + 2.0 - camera_x,
            actor.y - th / 2.0 + 2.0 - camera_y,
            tw - 4.0,
            th - 4.0,
            color,
        );
        // Facing tick
        let (dx, dy) = actor.facing.delta();
        draw_circle(
            actor.x + dx as f32 * tw / 3.0 - camera_x,
            actor.y + dy as f32 * th / 3.0 - camera_y,
            2.0,
            WHITE,
        );
    }
}

fn draw_overlay(world: &World, snackbar: &SnackbarHandle, dialog: &DialogHandle) {
    if let Some((level, message)) = &snackbar.0.borrow().message {
        let color = match level {
            NoticeLevel::Info => SKYBLUE,
            NoticeLevel::Success => GREEN,
            NoticeLevel::Warning => ORANGE,
        };
        draw_text(message, 10.0, 24.0, 24.0, color);
    }

    if let Some(subject) = &dialog.0.borrow().subject {
        let text = format!("{} has nothing more to say. (walk away to close)", subject);
        draw_text(&text, 10.0, screen_height() - 16.0, 22.0, WHITE);
    }

    let mode = if world.free_camera() { "camera" } else { "walk" };
    let help = format!(
        "arrows: move | click: walk to | space: interact | V: {} mode | F5/F9: save/load",
        mode
    );
    draw_text(&help, 10.0, screen_height() - 42.0, 18.0, LIGHTGRAY);
}

fn window_conf() -> Conf {
    let config = Config::load();
    Conf {
        window_title: config.visual.window_title,
        window_width: 640,
        window_height: 480,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    let config = Config::load();
    let map = match load_map(&config.map.path) {
        Ok(map) => map,
        Err(e) => {
            eprintln!("fatal: {}", e);
            return;
        }
    };

    let snackbar = SnackbarHandle::new();
    let dialog = DialogHandle::new();
    let mut world = World::new(
        map,
        &config,
        Box::new(snackbar.clone()),
        Box::new(dialog.clone()),
    );

    let background = Color::from_rgba(
        config.visual.background_r,
        config.visual.background_g,
        config.visual.background_b,
        255,
    );
    let tick_dt = 1.0 / config.simulation.tick_rate as f32;
    let mut accumulator = 0.0;
    let mut inventory = serde_json::Value::Null;
    let (mut free_x, mut free_y) = (0.0f32, 0.0f32);
    let camera_speed = 120.0;

    loop {
        // One-shot commands
        if is_key_pressed(KeyCode::V) {
            world.toggle_free_camera();
        }
        if is_key_pressed(KeyCode::Space) {
            world.interact();
        }
        if is_key_pressed(KeyCode::Escape) {
            dialog.dismiss();
        }
        if is_key_pressed(KeyCode::F5) {
            if let Err(e) = world.save(&config.save.path, inventory.clone()) {
                eprintln!("{}", e);
            }
        }
        if is_key_pressed(KeyCode::F9) {
            match world.restore(&config.save.path) {
                Ok(saved) => inventory = saved,
                Err(e) => eprintln!("{}", e),
            }
        }

        let (camera_x, camera_y) = follow_camera(&world, free_x, free_y);
        if is_mouse_button_pressed(MouseButton::Left) && !world.free_camera() {
            let (mouse_x, mouse_y) = mouse_position();
            world.handle_click(mouse_x + camera_x, mouse_y + camera_y);
        }

        // Fixed-rate simulation ticks decoupled from the render rate
        accumulator += get_frame_time();
        while accumulator >= tick_dt {
            if world.free_camera() {
                let dt = tick_dt * camera_speed;
                match held_direction() {
                    Some(Direction::Left) => free_x -= dt,
                    Some(Direction::Right) => free_x += dt,
                    Some(Direction::Up) => free_y -= dt,
                    Some(Direction::Down) => free_y += dt,
                    None => {}
                }
            }
            world.tick(held_direction());
            accumulator -= tick_dt;
        }

        let (camera_x, camera_y) = follow_camera(&world, free_x, free_y);
        draw_world(&world, camera_x, camera_y, background);
        draw_overlay(&world, &snackbar, &dialog);

        next_frame().await
    }
}
