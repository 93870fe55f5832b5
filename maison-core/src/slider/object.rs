//! The LCD slider object

use maison_hal::{
    ButtonCallbacks, ButtonId, ButtonService, Edge, EdgeRegistry, GpioPort, LedId, LedService,
    PinDirection, Pull,
};

use super::SliderHandlers;
use crate::config::SliderPins;
use crate::objects::ObjectId;
use crate::state::{Event, Lifecycle};
use crate::traits::{DisplayExt, Object, ObjectError, TextDisplay};

/// Row 0 text shown once init completes, until the first rotation
pub const SPLASH_TEXT: &str = "LCD SLIDER READY";

/// Label of the value row
pub const VALUE_LABEL: &str = "Value";

fn network_button_pressed() {
    #[cfg(feature = "defmt")]
    defmt::info!("Network button has been shortly pressed");
}

/// Encoder-driven display object
///
/// Owns the display, the pin roles and its lifecycle. Edge handlers only
/// touch the shared [`super::SliderState`]; every display write happens
/// from [`Object::process_tick`].
pub struct LcdSlider<'a, D, G, E, L, B> {
    pins: SliderPins,
    handlers: &'a SliderHandlers<'a>,
    display: D,
    gpio: G,
    edges: E,
    leds: L,
    buttons: B,
    lifecycle: Lifecycle,
}

impl<'a, D, G, E, L, B> LcdSlider<'a, D, G, E, L, B>
where
    D: TextDisplay,
    G: GpioPort,
    E: EdgeRegistry<'a>,
    L: LedService,
    B: ButtonService,
{
    /// Create the object in [`Lifecycle::Init`]
    ///
    /// Nothing touches the hardware until the first tick. `handlers` must
    /// have been built from the same `pins`.
    pub fn new(
        pins: SliderPins,
        handlers: &'a SliderHandlers<'a>,
        display: D,
        gpio: G,
        edges: E,
        leds: L,
        buttons: B,
    ) -> Self {
        Self {
            pins,
            handlers,
            display,
            gpio,
            edges,
            leds,
            buttons,
            lifecycle: Lifecycle::Init,
        }
    }

    /// Pin roles in use
    pub fn pins(&self) -> &SliderPins {
        &self.pins
    }

    /// Get a reference to the display
    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn gpio(&self) -> &G {
        &self.gpio
    }

    pub fn gpio_mut(&mut self) -> &mut G {
        &mut self.gpio
    }

    /// Get a reference to the edge registry
    pub fn edges(&self) -> &E {
        &self.edges
    }

    pub fn leds(&self) -> &L {
        &self.leds
    }

    pub fn buttons(&self) -> &B {
        &self.buttons
    }

    /// Current counter value
    pub fn value(&self) -> u8 {
        self.handlers.state.value()
    }

    /// One-time bring-up, in hardware dependency order
    fn setup(&mut self) -> Result<(), ObjectError> {
        let pins = self.pins;
        let handlers = self.handlers;

        pins.validate()?;

        self.display.initialize()?;

        // The LCD runs from the 5 V boost converter
        self.gpio
            .configure(pins.boost_enable, Pull::Up, PinDirection::Output)?;
        self.gpio.set_high(pins.boost_enable);

        for pin in [pins.phase_a, pins.phase_b, pins.switch] {
            self.gpio.configure(pin, Pull::Up, PinDirection::Input)?;
        }
        handlers.state.capture_phase(self.gpio.read(pins.phase_a));

        self.edges
            .register(pins.phase_a, Edge::Toggle, Pull::Up, &handlers.quadrature)?;
        self.edges
            .register(pins.switch, Edge::Falling, Pull::Up, &handlers.press)?;
        self.edges.enable(pins.phase_a, true)?;
        self.edges.enable(pins.switch, true)?;

        self.leds.add_led(LedId::Network, pins.led_network)?;
        self.leds.add_led(LedId::Battery, pins.led_battery)?;

        self.buttons.add_button(
            ButtonId::Network,
            pins.button_network,
            true,
            ButtonCallbacks::short(network_button_pressed),
        )?;

        handlers.state.reset();

        self.display.write_line(0, SPLASH_TEXT)?;

        #[cfg(feature = "defmt")]
        defmt::info!("LCD SLIDER - INITIALISED");

        Ok(())
    }

    /// Redraw the value row if an edge asked for it
    fn refresh(&mut self) -> Result<(), ObjectError> {
        if let Some(value) = self.handlers.state.take_redraw() {
            #[cfg(feature = "defmt")]
            defmt::debug!("Slider value : {}", value);

            self.display.write_field(0, VALUE_LABEL, value)?;
        }
        Ok(())
    }
}

impl<'a, D, G, E, L, B> Object for LcdSlider<'a, D, G, E, L, B>
where
    D: TextDisplay,
    G: GpioPort,
    E: EdgeRegistry<'a>,
    L: LedService,
    B: ButtonService,
{
    fn id(&self) -> ObjectId {
        ObjectId::LcdSlider
    }

    fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    fn process_tick(&mut self) -> Result<(), ObjectError> {
        match self.lifecycle {
            Lifecycle::Init => {
                self.setup()?;
                self.lifecycle = self.lifecycle.transition(Event::SetupComplete);
            }
            Lifecycle::Run => {
                self.refresh()?;
                self.lifecycle = self.lifecycle.transition(Event::Tick);
            }
            Lifecycle::Idle => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slider::SliderState;
    use crate::traits::DisplayError;
    use heapless::Vec;
    use maison_hal::{EdgeTable, HalError, Level, LedMode, PinId, PinSampler};

    const COLS: usize = 16;
    const ROWS: usize = 2;

    /// 2x16 frame buffer that counts bus calls
    struct MockDisplay {
        frame: [[u8; COLS]; ROWS],
        cursor: (u8, u8),
        initialized: bool,
        calls: u32,
    }

    impl MockDisplay {
        fn new() -> Self {
            Self {
                frame: [[b' '; COLS]; ROWS],
                cursor: (0, 0),
                initialized: false,
                calls: 0,
            }
        }

        fn row(&self, row: usize) -> &str {
            core::str::from_utf8(&self.frame[row]).unwrap()
        }
    }

    impl TextDisplay for MockDisplay {
        fn initialize(&mut self) -> Result<(), DisplayError> {
            self.initialized = true;
            self.calls += 1;
            Ok(())
        }

        fn clear(&mut self) -> Result<(), DisplayError> {
            self.frame = [[b' '; COLS]; ROWS];
            self.cursor = (0, 0);
            self.calls += 1;
            Ok(())
        }

        fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), DisplayError> {
            self.calls += 1;
            if row as usize >= ROWS || col as usize >= COLS {
                return Err(DisplayError::InvalidPosition { row, col });
            }
            self.cursor = (row, col);
            Ok(())
        }

        fn write_text(&mut self, text: &str) -> Result<(), DisplayError> {
            self.calls += 1;
            assert!(self.initialized, "write before initialize");
            let (row, mut col) = self.cursor;
            for byte in text.bytes() {
                if (col as usize) < COLS {
                    self.frame[row as usize][col as usize] = byte;
                }
                col += 1;
            }
            self.cursor = (row, col);
            Ok(())
        }

        fn dimensions(&self) -> (u8, u8) {
            (COLS as u8, ROWS as u8)
        }
    }

    /// GPIO port and sampler backed by a level mask
    struct MockGpio {
        levels: u32,
        configured: Vec<(PinId, Pull, PinDirection), 16>,
    }

    impl MockGpio {
        fn new() -> Self {
            Self {
                levels: 0,
                configured: Vec::new(),
            }
        }

        fn set(&mut self, pin: PinId, level: Level) {
            match level {
                Level::High => self.levels |= pin.mask(),
                Level::Low => self.levels &= !pin.mask(),
            }
        }

        fn config_of(&self, pin: PinId) -> Option<(Pull, PinDirection)> {
            self.configured
                .iter()
                .find(|(p, _, _)| *p == pin)
                .map(|(_, pull, dir)| (*pull, *dir))
        }
    }

    impl GpioPort for MockGpio {
        fn configure(
            &mut self,
            pin: PinId,
            pull: Pull,
            direction: PinDirection,
        ) -> Result<(), HalError> {
            self.configured
                .push((pin, pull, direction))
                .map_err(|_| HalError::NoFreeSlot)
        }

        fn write(&mut self, pin: PinId, level: Level) {
            self.set(pin, level);
        }

        fn read(&self, pin: PinId) -> Level {
            Level::from(self.levels & pin.mask() != 0)
        }
    }

    impl PinSampler for MockGpio {
        fn level(&self, pin: PinId) -> Level {
            self.read(pin)
        }
    }

    #[derive(Default)]
    struct MockLeds {
        leds: Vec<(LedId, PinId), 2>,
    }

    impl LedService for MockLeds {
        fn add_led(&mut self, id: LedId, pin: PinId) -> Result<(), HalError> {
            self.leds.push((id, pin)).map_err(|_| HalError::NoFreeSlot)
        }

        fn set(&mut self, _id: LedId, _mode: LedMode) {}

        fn toggle(&mut self, _id: LedId) {}
    }

    #[derive(Default)]
    struct MockButtons {
        buttons: Vec<(ButtonId, PinId, bool, ButtonCallbacks), 1>,
    }

    impl ButtonService for MockButtons {
        fn add_button(
            &mut self,
            id: ButtonId,
            pin: PinId,
            active_low: bool,
            callbacks: ButtonCallbacks,
        ) -> Result<(), HalError> {
            self.buttons
                .push((id, pin, active_low, callbacks))
                .map_err(|_| HalError::NoFreeSlot)
        }
    }

    type TestSlider<'a, const N: usize> =
        LcdSlider<'a, MockDisplay, MockGpio, EdgeTable<'a, N>, MockLeds, MockButtons>;

    fn slider<'a, const N: usize>(handlers: &'a SliderHandlers<'a>) -> TestSlider<'a, N> {
        LcdSlider::new(
            SliderPins::reference_board(),
            handlers,
            MockDisplay::new(),
            MockGpio::new(),
            EdgeTable::new(),
            MockLeds::default(),
            MockButtons::default(),
        )
    }

    /// Toggle phase A with B set for the requested direction, then fire
    /// the phase A channel the way the interrupt vector would
    fn turn<const N: usize>(slider: &mut TestSlider<'_, N>, clockwise: bool) {
        let pins = *slider.pins();
        let a = !slider.gpio().read(pins.phase_a);
        let b = if clockwise { !a } else { a };
        slider.gpio_mut().set(pins.phase_a, a);
        slider.gpio_mut().set(pins.phase_b, b);

        let index = slider.edges().find(pins.phase_a).unwrap();
        assert!(slider.edges().dispatch(index, slider.gpio()));
    }

    fn press<const N: usize>(slider: &mut TestSlider<'_, N>) {
        let pins = *slider.pins();
        slider.gpio_mut().set(pins.switch, Level::Low);
        let index = slider.edges().find(pins.switch).unwrap();
        assert!(slider.edges().dispatch(index, slider.gpio()));
        slider.gpio_mut().set(pins.switch, Level::High);
    }

    #[test]
    fn test_init_transitions_to_run() {
        let state = SliderState::new();
        let handlers = SliderHandlers::new(&state, &SliderPins::reference_board());
        let mut slider = slider::<8>(&handlers);

        assert_eq!(slider.id(), ObjectId::LcdSlider);
        assert_eq!(slider.lifecycle(), Lifecycle::Init);

        slider.process_tick().unwrap();

        assert_eq!(slider.lifecycle(), Lifecycle::Run);
        assert_eq!(slider.display().row(0), SPLASH_TEXT);
        assert_eq!(slider.value(), 0);
        assert!(!state.redraw_pending());
    }

    #[test]
    fn test_init_configures_pins() {
        let state = SliderState::new();
        let pins = SliderPins::reference_board();
        let handlers = SliderHandlers::new(&state, &pins);
        let mut slider = slider::<8>(&handlers);

        slider.process_tick().unwrap();

        let gpio = slider.gpio();
        assert_eq!(
            gpio.config_of(pins.boost_enable),
            Some((Pull::Up, PinDirection::Output))
        );
        assert_eq!(gpio.read(pins.boost_enable), Level::High);
        for pin in [pins.phase_a, pins.phase_b, pins.switch] {
            assert_eq!(gpio.config_of(pin), Some((Pull::Up, PinDirection::Input)));
        }

        let edges = slider.edges();
        assert_eq!(edges.len(), 2);
        let a = edges.channel(edges.find(pins.phase_a).unwrap()).unwrap();
        assert_eq!(a.edge, Edge::Toggle);
        assert!(a.enabled);
        let sw = edges.channel(edges.find(pins.switch).unwrap()).unwrap();
        assert_eq!(sw.edge, Edge::Falling);
        assert!(sw.enabled);

        assert_eq!(
            slider.leds().leds.as_slice(),
            &[
                (LedId::Network, pins.led_network),
                (LedId::Battery, pins.led_battery)
            ]
        );

        let (id, pin, active_low, callbacks) = slider.buttons().buttons[0];
        assert_eq!(id, ButtonId::Network);
        assert_eq!(pin, pins.button_network);
        assert!(active_low);
        assert!(callbacks.short_press.is_some());
        assert!(callbacks.long_press.is_none());
    }

    #[test]
    fn test_three_clockwise_edges_redraw_value() {
        let state = SliderState::new();
        let handlers = SliderHandlers::new(&state, &SliderPins::reference_board());
        let mut slider = slider::<8>(&handlers);
        slider.process_tick().unwrap();

        for _ in 0..3 {
            turn(&mut slider, true);
        }
        assert_eq!(slider.value(), 3);
        assert!(state.redraw_pending());

        slider.process_tick().unwrap();

        assert_eq!(slider.display().row(0), "Value : 3       ");
        assert!(!state.redraw_pending());
        assert_eq!(slider.lifecycle(), Lifecycle::Run);
    }

    #[test]
    fn test_idle_tick_makes_no_display_calls() {
        let state = SliderState::new();
        let handlers = SliderHandlers::new(&state, &SliderPins::reference_board());
        let mut slider = slider::<8>(&handlers);
        slider.process_tick().unwrap();

        let calls = slider.display().calls;
        for _ in 0..10 {
            slider.process_tick().unwrap();
        }
        assert_eq!(slider.display().calls, calls);
        assert_eq!(slider.display().row(0), SPLASH_TEXT);
    }

    #[test]
    fn test_one_redraw_per_burst() {
        let state = SliderState::new();
        let handlers = SliderHandlers::new(&state, &SliderPins::reference_board());
        let mut slider = slider::<8>(&handlers);
        slider.process_tick().unwrap();

        for _ in 0..20 {
            turn(&mut slider, true);
        }
        for _ in 0..5 {
            turn(&mut slider, false);
        }

        let calls = slider.display().calls;
        slider.process_tick().unwrap();
        slider.process_tick().unwrap();

        // set_cursor + write_text, once
        assert_eq!(slider.display().calls, calls + 2);
        assert_eq!(slider.display().row(0), "Value : 15      ");
    }

    #[test]
    fn test_upper_bound_holds() {
        let state = SliderState::new();
        let handlers = SliderHandlers::new(&state, &SliderPins::reference_board());
        let mut slider = slider::<8>(&handlers);
        slider.process_tick().unwrap();

        for _ in 0..254 {
            turn(&mut slider, true);
        }
        slider.process_tick().unwrap();
        assert_eq!(slider.display().row(0), "Value : 254     ");

        turn(&mut slider, true);
        assert_eq!(slider.value(), 254);
        assert!(state.redraw_pending());

        slider.process_tick().unwrap();
        assert_eq!(slider.display().row(0), "Value : 254     ");
    }

    #[test]
    fn test_lower_bound_holds() {
        let state = SliderState::new();
        let handlers = SliderHandlers::new(&state, &SliderPins::reference_board());
        let mut slider = slider::<8>(&handlers);
        slider.process_tick().unwrap();

        turn(&mut slider, false);
        assert_eq!(slider.value(), 0);
        assert!(state.redraw_pending());

        slider.process_tick().unwrap();
        assert_eq!(slider.display().row(0), "Value : 0       ");
    }

    #[test]
    fn test_press_does_not_redraw() {
        let state = SliderState::new();
        let handlers = SliderHandlers::new(&state, &SliderPins::reference_board());
        let mut slider = slider::<8>(&handlers);
        slider.process_tick().unwrap();

        for _ in 0..42 {
            turn(&mut slider, true);
        }
        slider.process_tick().unwrap();
        let calls = slider.display().calls;

        press(&mut slider);

        assert_eq!(state.press_count(), 1);
        assert_eq!(slider.value(), 42);
        assert!(!state.redraw_pending());

        slider.process_tick().unwrap();
        assert_eq!(slider.display().calls, calls);
    }

    #[test]
    fn test_phase_captured_at_init() {
        let state = SliderState::new();
        let pins = SliderPins::reference_board();
        let handlers = SliderHandlers::new(&state, &pins);
        let mut slider = slider::<8>(&handlers);

        // Encoder resting with A high
        slider.gpio_mut().set(pins.phase_a, Level::High);
        slider.process_tick().unwrap();
        assert_eq!(state.phase(), Level::High);

        // Same level again is not a transition
        let index = slider.edges().find(pins.phase_a).unwrap();
        slider.edges().dispatch(index, slider.gpio());
        assert!(!state.redraw_pending());
    }

    #[test]
    fn test_registration_failure_stays_in_init() {
        let state = SliderState::new();
        let handlers = SliderHandlers::new(&state, &SliderPins::reference_board());
        let mut slider = slider::<1>(&handlers);

        let err = slider.process_tick().unwrap_err();

        assert_eq!(err, ObjectError::Hal(HalError::NoFreeChannel));
        assert_eq!(slider.lifecycle(), Lifecycle::Init);
    }

    #[test]
    fn test_duplicate_role_fails_before_hardware() {
        let state = SliderState::new();
        let mut pins = SliderPins::reference_board();
        pins.led_battery = pins.led_network;
        let handlers = SliderHandlers::new(&state, &pins);
        let mut slider = LcdSlider::new(
            pins,
            &handlers,
            MockDisplay::new(),
            MockGpio::new(),
            EdgeTable::<8>::new(),
            MockLeds::default(),
            MockButtons::default(),
        );

        let err = slider.process_tick().unwrap_err();

        assert!(matches!(err, ObjectError::Config(_)));
        assert_eq!(slider.display().calls, 0);
        assert_eq!(slider.lifecycle(), Lifecycle::Init);
    }
}
