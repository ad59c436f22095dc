//! # Raycast Room
//!
//! A 50x50 room with three walls, a chair and a cube. Click to capture the
//! mouse, walk with WASD or the arrow keys and click the highlighted prop to
//! collect it. `I` shows the inventory, Escape releases the mouse.
//!
//! ```text
//! cargo run --example raycast_room [path/to/chair.obj] [--damped]
//! ```
//!
//! Without a loadable OBJ the chair is built from boxes.

use log::{error, info};
use roomwalk::prelude::*;

const ROOM_SIZE: f32 = 50.0;
const WALL_HEIGHT: f32 = 30.0;
const WALL_THICKNESS: f32 = 0.5;

const FLOOR_COLOR: [f32; 3] = [0.45, 0.42, 0.38];
const WALL_COLOR: [f32; 3] = [0.62, 0.6, 0.58];
const CHAIR_COLOR: [f32; 3] = [0.55, 0.35, 0.2];
const CUBE_COLOR: [f32; 3] = [0.2, 0.45, 0.8];

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut chair_path = None;
    let mut movement_mode = MovementMode::Stepped;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--damped" => movement_mode = MovementMode::Damped,
            path => chair_path = Some(path.to_string()),
        }
    }

    let config = AppConfig {
        title: "Raycast Room".to_string(),
        session: SessionConfig {
            movement_mode,
            ..Default::default()
        },
        ..Default::default()
    };

    let mut app = RoomWalkApp::new(config)?.with_fps_overlay(true);
    build_room(app.scene_mut());
    add_chair(app.scene_mut(), chair_path.as_deref());
    add_cube(app.scene_mut());

    info!(
        "{} props to find; movement mode {:?}",
        app.scene().interactable_count(),
        movement_mode
    );

    app.run()?;
    Ok(())
}

fn build_room(scene: &mut Scene) {
    let half = ROOM_SIZE * 0.5;

    scene.add(
        Object::new(vec![generate_plane(ROOM_SIZE, ROOM_SIZE).into_mesh()]).with_color(FLOOR_COLOR),
    );

    let side_wall = || generate_box(WALL_THICKNESS, WALL_HEIGHT, ROOM_SIZE).into_mesh();
    scene.add(
        Object::new(vec![side_wall()])
            .with_color(WALL_COLOR)
            .with_translation(Vector3::new(-half, WALL_HEIGHT * 0.5, 0.0)),
    );
    scene.add(
        Object::new(vec![side_wall()])
            .with_color(WALL_COLOR)
            .with_translation(Vector3::new(half, WALL_HEIGHT * 0.5, 0.0)),
    );
    scene.add(
        Object::new(vec![generate_box(ROOM_SIZE, WALL_HEIGHT, WALL_THICKNESS).into_mesh()])
            .with_color(WALL_COLOR)
            .with_translation(Vector3::new(0.0, WALL_HEIGHT * 0.5, -half)),
    );
}

fn add_chair(scene: &mut Scene, path: Option<&str>) {
    let mut chair = match path.map(|p| Scene::load_obj(p, Some("Chair"))) {
        Some(Ok(chair)) => chair,
        Some(Err(e)) => {
            error!("{e}; using the built-in chair");
            procedural_chair()
        }
        None => procedural_chair(),
    };

    chair.base_color = [CHAIR_COLOR[0], CHAIR_COLOR[1], CHAIR_COLOR[2], 1.0];
    chair.set_transform_trs(Vector3::new(0.0, 0.0, 0.0), Deg(0.0), 2.0);
    scene.add(chair);
}

/// Seat, four legs and a back, in a unit-scale chair about one unit tall
fn procedural_chair() -> Object {
    let seat_height = 0.45;
    let leg = 0.05;
    let seat = 0.45;
    let leg_offset = seat * 0.5 - leg * 0.5;

    let mut meshes = vec![generate_box(seat, leg, seat)
        .translated([0.0, seat_height, 0.0])
        .into_mesh()];

    for (x, z) in [(-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)] {
        meshes.push(
            generate_box(leg, seat_height, leg)
                .translated([x * leg_offset, seat_height * 0.5, z * leg_offset])
                .into_mesh(),
        );
    }

    meshes.push(
        generate_box(seat, 0.5, leg)
            .translated([0.0, seat_height + 0.25, -leg_offset])
            .into_mesh(),
    );

    Object::new(meshes).with_name("Chair")
}

fn add_cube(scene: &mut Scene) {
    scene.add(
        Object::new(vec![generate_box(2.0, 2.0, 2.0).into_mesh()])
            .with_name("Cube")
            .with_color(CUBE_COLOR)
            .with_translation(Vector3::new(6.0, 1.0, -4.0)),
    );
}
