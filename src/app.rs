//! # Kitchen App
//!
//! Frame driver tying the character, input, and interaction core to a host
//! [`World`]. The host forwards winit events and calls [`KitchenApp::tick`]
//! once per frame; rendering stays with the host.

use winit::{
    event::{DeviceEvent, ElementState, KeyEvent, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use crate::character::Character;
use crate::config::KitchenConfig;
use crate::input::{InputAction, InputAxis, InputBindings, InputState};
use crate::interaction::{classify, ActionOutcome, Hand, HitResolver, InteractionError, Interactor};
use crate::world::{Hit, World};

/// What one tick did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Result of each click, in press order
    pub actions: Vec<Result<ActionOutcome, InteractionError>>,
    /// Set when the highlight could not be refreshed; clicks still ran
    pub highlight_error: Option<InteractionError>,
}

impl TickReport {
    /// Outcomes of the clicks that succeeded
    pub fn outcomes(&self) -> impl Iterator<Item = &ActionOutcome> {
        self.actions.iter().filter_map(|result| result.as_ref().ok())
    }

    pub fn errors(&self) -> impl Iterator<Item = &InteractionError> {
        self.actions
            .iter()
            .filter_map(|result| result.as_ref().err())
            .chain(self.highlight_error.as_ref())
    }

    pub fn is_ok(&self) -> bool {
        self.errors().next().is_none()
    }
}

pub struct KitchenApp<W: World> {
    world: W,
    config: KitchenConfig,
    character: Character,
    input: InputState,
    resolver: HitResolver,
    interactor: Option<Interactor>,
    last_hit: Option<Hit>,
    exit_requested: bool,
}

impl<W: World> KitchenApp<W> {
    pub fn new(world: W, config: KitchenConfig) -> Self {
        Self {
            world,
            config,
            character: Character::new(&config),
            input: InputState::default(),
            resolver: HitResolver::from_config(&config),
            interactor: None,
            last_hit: None,
            exit_requested: false,
        }
    }

    /// Replaces the character; its body (if any) is excluded from traces
    pub fn with_character(mut self, character: Character) -> Self {
        self.resolver = HitResolver::from_config(&self.config);
        if let Some(body) = character.body {
            self.resolver = self.resolver.ignore(body);
        }
        self.character = character;
        self
    }

    pub fn with_bindings(mut self, bindings: InputBindings) -> Self {
        self.input = InputState::new(bindings);
        self
    }

    /// Classifies the loaded level. Must run once before the first tick.
    pub fn begin_play(&mut self) {
        if self.interactor.is_some() {
            log::warn!("begin_play called twice; keeping the existing classification");
            return;
        }
        let classification = classify(&mut self.world, &self.config);
        self.interactor = Some(Interactor::new(self.config, classification));
    }

    pub fn is_playing(&self) -> bool {
        self.interactor.is_some()
    }

    /// Advances one frame.
    ///
    /// Moves the character, resolves the hit under the crosshair, refreshes
    /// the highlight, then runs the actions queued since the last frame in
    /// press order. The hit is traced again after every click, so a click
    /// sees the world as the previous one left it.
    pub fn tick(&mut self, dt: f32) -> TickReport {
        let mut report = TickReport::default();
        let Some(interactor) = self.interactor.as_mut() else {
            log::warn!("tick before begin_play; level is not classified yet");
            return report;
        };

        self.character
            .move_forward(self.input.axis(InputAxis::MoveForward), dt);
        self.character
            .move_right(self.input.axis(InputAxis::MoveRight), dt);
        let (yaw, pitch) = self.input.take_look();
        self.character.add_controller_yaw(yaw);
        self.character.add_controller_pitch(pitch);

        let (eye, forward) = self.character.viewpoint();
        self.last_hit = self.resolver.resolve(&self.world, eye, forward);

        if let Err(err) = interactor.update_highlight(&mut self.world, self.last_hit.as_ref()) {
            log::error!("Highlight update failed: {}", err);
            report.highlight_error = Some(err);
        }

        for action in self.input.drain_actions() {
            match action {
                InputAction::Click => {
                    let result =
                        interactor.primary_action(&mut self.world, self.last_hit.as_ref());
                    if let Err(err) = &result {
                        log::error!("Primary action failed: {}", err);
                    }
                    report.actions.push(result);
                    self.last_hit = self.resolver.resolve(&self.world, eye, forward);
                }
                InputAction::SwitchSelectedHand => {
                    interactor.switch_hand();
                }
            }
        }
        report
    }

    /// Runs a primary action against the hit of the last tick
    pub fn primary_action(&mut self) -> Result<ActionOutcome, InteractionError> {
        let interactor = self
            .interactor
            .as_mut()
            .ok_or(InteractionError::NotClassified)?;
        interactor.primary_action(&mut self.world, self.last_hit.as_ref())
    }

    pub fn switch_hand(&mut self) -> Result<Hand, InteractionError> {
        let interactor = self
            .interactor
            .as_mut()
            .ok_or(InteractionError::NotClassified)?;
        Ok(interactor.switch_hand())
    }

    /// Feeds a window event to the input state. Returns whether it was used.
    pub fn process_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput { event, .. } => self.process_keyed_event(event),
            WindowEvent::MouseInput { state, button, .. } => {
                self.input.handle_mouse_button(*button, *state)
            }
            WindowEvent::Focused(false) => {
                self.input.release_all();
                true
            }
            WindowEvent::CloseRequested => {
                self.exit_requested = true;
                true
            }
            _ => false,
        }
    }

    pub fn process_device_event(&mut self, event: &DeviceEvent) -> bool {
        self.input.process_device_event(event)
    }

    fn process_keyed_event(&mut self, event: &KeyEvent) -> bool {
        if let KeyEvent {
            physical_key: PhysicalKey::Code(KeyCode::Escape),
            state: ElementState::Pressed,
            ..
        } = event
        {
            self.exit_requested = true;
            return true;
        }
        self.input.process_keyed_event(event)
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    pub fn config(&self) -> &KitchenConfig {
        &self.config
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn character_mut(&mut self) -> &mut Character {
        &mut self.character
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn interactor(&self) -> Option<&Interactor> {
        self.interactor.as_ref()
    }

    /// Hit resolved by the most recent tick
    pub fn last_hit(&self) -> Option<&Hit> {
        self.last_hit.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::AssetState;
    use crate::world::{KitchenScene, ObjectBuilder, ObjectId, WorldError, AABB};
    use cgmath::Vector3;
    use winit::event::MouseButton;

    struct Fixture {
        app: KitchenApp<KitchenScene>,
        cup: ObjectId,
        body: ObjectId,
    }

    /// Character body at the origin with a cup straight ahead at eye height
    fn fixture() -> Fixture {
        let _ = env_logger::builder().is_test(true).try_init();

        let mut scene = KitchenScene::new();
        let body = scene.spawn(
            ObjectBuilder::new("Player")
                .mesh(AABB::from_half_extents(Vector3::new(5.0, 5.0, 80.0)))
                .build(),
        );
        let cup = scene.spawn(
            ObjectBuilder::new("Cup1")
                .at(Vector3::new(150.0, 0.0, 64.0))
                .mesh(AABB::from_half_extents(Vector3::new(5.0, 5.0, 5.0)))
                .tag("Item")
                .build(),
        );

        let config = KitchenConfig::default();
        let character = Character::new(&config).with_body(body);
        let app = KitchenApp::new(scene, config).with_character(character);
        Fixture { app, cup, body }
    }

    fn click(app: &mut KitchenApp<KitchenScene>) {
        app.input_mut()
            .handle_mouse_button(MouseButton::Left, ElementState::Pressed);
    }

    #[test]
    fn test_nothing_happens_before_begin_play() {
        let mut f = fixture();
        click(&mut f.app);

        assert_eq!(f.app.tick(0.016), TickReport::default());
        assert!(f.app.last_hit().is_none());
        assert_eq!(f.app.primary_action(), Err(InteractionError::NotClassified));
        assert_eq!(f.app.switch_hand(), Err(InteractionError::NotClassified));
    }

    #[test]
    fn test_tick_resolves_hit_past_own_body() {
        let mut f = fixture();
        f.app.begin_play();
        f.app.tick(0.016);

        let hit = f.app.last_hit().unwrap();
        assert_eq!(hit.object, f.cup);
        assert_ne!(hit.object, f.body);
        assert!((hit.distance - 145.0).abs() < 1e-3);
        assert!(f.app.world().is_highlighted(f.cup));
    }

    #[test]
    fn test_click_picks_up_then_tab_switches_hand() {
        let mut f = fixture();
        f.app.begin_play();

        click(&mut f.app);
        let report = f.app.tick(0.016);
        assert_eq!(
            report.actions,
            vec![Ok(ActionOutcome::PickedUp {
                object: f.cup,
                hand: Hand::Right
            })]
        );
        assert!(report.is_ok());
        assert!(!f.app.world().is_visible(f.cup));

        f.app
            .input_mut()
            .handle_key(KeyCode::Tab, ElementState::Pressed, false);
        f.app.tick(0.016);
        assert_eq!(f.app.interactor().unwrap().hands().selected(), Hand::Left);
    }

    #[test]
    fn test_second_click_in_a_tick_sees_the_pick_up() {
        let mut f = fixture();
        f.app.begin_play();

        click(&mut f.app);
        click(&mut f.app);
        let report = f.app.tick(0.016);

        // The cup is hidden after the first click, nothing else is ahead
        assert_eq!(
            report.actions,
            vec![
                Ok(ActionOutcome::PickedUp {
                    object: f.cup,
                    hand: Hand::Right
                }),
                Ok(ActionOutcome::NoTarget),
            ]
        );
        assert!(f.app.last_hit().is_none());
        assert!(!f.app.world().is_visible(f.cup));
        assert_eq!(f.app.interactor().unwrap().hands().selected_item(), Some(f.cup));
    }

    #[test]
    fn test_click_failure_is_reported() {
        let _ = env_logger::builder().is_test(true).try_init();

        let mut scene = KitchenScene::new();
        let body = scene.spawn(ObjectBuilder::new("Drawer9").build());
        scene.spawn(
            ObjectBuilder::new("Drawer9_Handle")
                .at(Vector3::new(100.0, 0.0, 64.0))
                .mesh(AABB::from_half_extents(Vector3::new(5.0, 5.0, 5.0)))
                .attached_to(body)
                .build(),
        );
        let mut app = KitchenApp::new(scene, KitchenConfig::default());
        app.begin_play();

        click(&mut app);
        let report = app.tick(0.016);

        let missing = InteractionError::World(WorldError::MissingMesh(body));
        assert_eq!(report.actions, vec![Err(missing)]);
        assert_eq!(report.outcomes().count(), 0);
        assert_eq!(report.errors().collect::<Vec<_>>(), vec![&missing]);
        assert!(!report.is_ok());
        assert_eq!(
            app.interactor().unwrap().asset_state(body),
            Some(AssetState::Closed)
        );
    }

    #[test]
    fn test_walking_and_mouse_look() {
        let mut f = fixture();
        f.app.begin_play();

        f.app
            .input_mut()
            .handle_key(KeyCode::KeyW, ElementState::Pressed, false);
        f.app.process_device_event(&DeviceEvent::MouseMotion {
            delta: (450.0, 0.0),
        });
        f.app.tick(1.0);

        let character = f.app.character();
        assert!((character.location.x - 300.0).abs() < 1e-3);
        assert!((character.yaw - 90.0).abs() < 1e-3);
        // Looking along +Y now; the cup is out of view
        f.app.tick(0.0);
        assert!(f.app.last_hit().is_none());
    }

    #[test]
    fn test_window_events() {
        let mut f = fixture();
        f.app
            .input_mut()
            .handle_key(KeyCode::KeyD, ElementState::Pressed, false);

        assert!(f.app.process_window_event(&WindowEvent::Focused(false)));
        assert_eq!(f.app.input_mut().axis(InputAxis::MoveRight), 0.0);

        assert!(!f.app.exit_requested());
        assert!(f.app.process_window_event(&WindowEvent::CloseRequested));
        assert!(f.app.exit_requested());
    }
}
