//! Headless walkthrough of the kitchen interactions.
//!
//! Builds a small kitchen, then scripts the character through opening and
//! closing a drawer, carrying a cup to the table, swapping hands, and trying
//! to reach a drawer from across the room. Run with `RUST_LOG=debug` to see
//! every state transition.

use anyhow::Context;
use cgmath::{Deg, Vector3};
use kitchen::prelude::*;
use winit::{
    event::{ElementState, MouseButton},
    keyboard::KeyCode,
};

const FRAME: f32 = 1.0 / 60.0;

fn build_kitchen() -> KitchenScene {
    let mut scene = KitchenScene::new();

    scene.spawn(
        ObjectBuilder::new("Player")
            .mesh(AABB::from_half_extents(Vector3::new(5.0, 5.0, 80.0)))
            .build(),
    );

    let drawer = scene.spawn(
        ObjectBuilder::new("Drawer1")
            .at(Vector3::new(200.0, 0.0, 40.0))
            .mesh(AABB::from_half_extents(Vector3::new(20.0, 40.0, 20.0)))
            .build(),
    );
    scene.spawn(
        ObjectBuilder::new("Drawer1_Handle")
            .at(Vector3::new(175.0, 0.0, 40.0))
            .mesh(AABB::from_half_extents(Vector3::new(5.0, 10.0, 3.0)))
            .attached_to(drawer)
            .build(),
    );

    let fridge = scene.spawn(
        ObjectBuilder::new("FridgeDoor")
            .at(Vector3::new(0.0, 250.0, 90.0))
            .facing(Deg(-90.0))
            .mesh(AABB::from_half_extents(Vector3::new(10.0, 40.0, 90.0)))
            .build(),
    );
    scene.spawn(
        ObjectBuilder::new("Fridge_Handle")
            .at(Vector3::new(0.0, 235.0, 90.0))
            .facing(Deg(-90.0))
            .mesh(AABB::from_half_extents(Vector3::new(3.0, 3.0, 20.0)))
            .attached_to(fridge)
            .build(),
    );

    scene.spawn(
        ObjectBuilder::new("Cup1")
            .at(Vector3::new(120.0, 80.0, 45.0))
            .mesh(AABB::from_half_extents(Vector3::new(4.0, 4.0, 5.0)))
            .tag("Item")
            .build(),
    );
    scene.spawn(
        ObjectBuilder::new("Plate1")
            .at(Vector3::new(120.0, -80.0, 41.0))
            .mesh(AABB::from_half_extents(Vector3::new(10.0, 10.0, 1.0)))
            .tag("Item")
            .build(),
    );
    scene.spawn(
        ObjectBuilder::new("Table")
            .at(Vector3::new(150.0, -150.0, 20.0))
            .mesh(AABB::from_half_extents(Vector3::new(60.0, 60.0, 20.0)))
            .build(),
    );

    scene
}

/// Turns the character so the crosshair sits on the centre of `name`
fn look_at(app: &mut KitchenApp<KitchenScene>, name: &str) -> anyhow::Result<()> {
    let target = app
        .world()
        .find_by_name(name)
        .and_then(|id| app.world().get_object(id))
        .and_then(|object| object.world_bounds())
        .map(|bounds| bounds.center())
        .with_context(|| format!("no visible mesh named {}", name))?;

    let to_target = target - app.character().eye_location();
    let ground = (to_target.x * to_target.x + to_target.y * to_target.y).sqrt();

    let character = app.character_mut();
    character.set_yaw(to_target.y.atan2(to_target.x).to_degrees());
    character.set_pitch(to_target.z.atan2(ground).to_degrees());
    Ok(())
}

fn click(app: &mut KitchenApp<KitchenScene>, name: &str) -> anyhow::Result<()> {
    look_at(app, name)?;
    app.input_mut()
        .handle_mouse_button(MouseButton::Left, ElementState::Pressed);
    let report = app.tick(FRAME);
    for result in report.actions {
        let outcome = result.with_context(|| format!("clicking {} failed", name))?;
        log::info!("Clicked {}: {:?}", name, outcome);
    }
    Ok(())
}

fn press(app: &mut KitchenApp<KitchenScene>, key: KeyCode) {
    app.input_mut()
        .handle_key(key, ElementState::Pressed, false);
    app.tick(FRAME);
    app.input_mut()
        .handle_key(key, ElementState::Released, false);
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let scene = build_kitchen();
    let body = scene.find_by_name("Player").context("player body missing")?;

    let config = KitchenConfig::default();
    let character = Character::new(&config).with_body(body);
    let mut app = KitchenApp::new(scene, config).with_character(character);
    app.begin_play();

    log::info!("-- Open and close the drawer by its handle");
    click(&mut app, "Drawer1_Handle")?;
    click(&mut app, "Drawer1_Handle")?;

    log::info!("-- Carry the cup to the table");
    click(&mut app, "Cup1")?;
    click(&mut app, "Table")?;

    log::info!("-- One item per hand");
    click(&mut app, "Plate1")?;
    press(&mut app, KeyCode::Tab);
    click(&mut app, "Cup1")?;
    click(&mut app, "Table")?;
    press(&mut app, KeyCode::Tab);
    click(&mut app, "Table")?;

    log::info!("-- Swing the fridge door open");
    click(&mut app, "Fridge_Handle")?;

    log::info!("-- Walk away and try to reach the drawer");
    app.character_mut().set_yaw(0.0);
    app.input_mut()
        .handle_key(KeyCode::KeyS, ElementState::Pressed, false);
    app.tick(1.0);
    app.input_mut()
        .handle_key(KeyCode::KeyS, ElementState::Released, false);
    click(&mut app, "Drawer1_Handle")?;

    let drawer = app
        .world()
        .find_by_name("Drawer1")
        .context("drawer missing")?;
    let interactor = app.interactor().context("level was never classified")?;
    log::info!(
        "Drawer is {:?}; left hand {:?}, right hand {:?}",
        interactor.asset_state(drawer),
        interactor.hands().held(Hand::Left),
        interactor.hands().held(Hand::Right),
    );

    Ok(())
}
